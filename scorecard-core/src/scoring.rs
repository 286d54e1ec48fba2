//! Score tracking and ranking for a single game.

use serde::{Deserialize, Serialize};

/// Number of rounds in a game. The last one counts double.
pub const TOTAL_ROUNDS: usize = 5;

/// One player's row on the score sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Display name; empty until the player types one.
    pub name: String,
    rounds: Vec<i32>,
    #[serde(default)]
    total: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rank: Option<u32>,
}

impl Default for PlayerScore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerScore {
    /// Create an unnamed player with every round at zero.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            rounds: vec![0; TOTAL_ROUNDS],
            total: 0,
            rank: None,
        }
    }

    /// Create a named player from a full set of round scores.
    ///
    /// Missing rounds are filled with zero, extra rounds are dropped, and
    /// the total is derived. No rank is assigned.
    pub fn with_rounds(name: impl Into<String>, rounds: &[i32]) -> Self {
        let mut player = Self {
            name: name.into(),
            rounds: rounds.to_vec(),
            total: 0,
            rank: None,
        };
        player.normalize();
        player
    }

    pub fn rounds(&self) -> &[i32] {
        &self.rounds
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn rank(&self) -> Option<u32> {
        self.rank
    }

    /// Score for a 1-based round, if the round exists.
    pub fn round(&self, round: usize) -> Option<i32> {
        round.checked_sub(1).and_then(|i| self.rounds.get(i).copied())
    }

    /// Record a score for a 1-based round and re-derive the total.
    ///
    /// Returns false when the round is out of range.
    pub fn set_round(&mut self, round: usize, score: i32) -> bool {
        match round.checked_sub(1).and_then(|i| self.rounds.get_mut(i)) {
            Some(slot) => {
                *slot = score;
                self.total = weighted_total(&self.rounds);
                true
            }
            None => false,
        }
    }

    /// Force `rounds` back to `TOTAL_ROUNDS` entries and re-derive the total.
    ///
    /// Used on data that came from outside (the store), where the length
    /// and the cached total cannot be trusted.
    pub(crate) fn normalize(&mut self) {
        self.rounds.resize(TOTAL_ROUNDS, 0);
        self.total = weighted_total(&self.rounds);
    }
}

/// Sum of all rounds with the final round counted twice.
pub fn weighted_total(rounds: &[i32]) -> i32 {
    rounds
        .iter()
        .enumerate()
        .map(|(idx, &score)| {
            if idx == TOTAL_ROUNDS - 1 {
                score.saturating_mul(2)
            } else {
                score
            }
        })
        .fold(0i32, |acc, score| acc.saturating_add(score))
}

/// Parse raw score input, falling back to zero for anything that is not an
/// integer.
///
/// Leading digits are honored the way a number field reads them, so `"12abc"`
/// becomes 12 and `"abc"` becomes 0. Values beyond `i32` saturate.
pub fn coerce_score(raw: &str) -> i32 {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1i64, &trimmed[1..]),
        Some(b'+') => (1i64, &trimmed[1..]),
        _ => (1i64, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    (sign * magnitude).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// How sorted players are matched back onto the roster when ranks are
/// assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankStrategy {
    /// Track each player by roster position. Every player gets a distinct
    /// rank.
    #[default]
    Position,
    /// Re-locate each sorted player by its `(name, total)` pair, first match
    /// wins. Players that share both collapse onto one slot and the others
    /// keep whatever rank they had.
    NameAndTotal,
}

/// Rank the whole roster by ascending total.
///
/// The sort is stable, so equal totals keep roster order and still receive
/// consecutive, distinct ranks.
pub fn assign_ranks(players: &mut [PlayerScore], strategy: RankStrategy) {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by_key(|&idx| players[idx].total);

    match strategy {
        RankStrategy::Position => {
            for (position, idx) in order.into_iter().enumerate() {
                players[idx].rank = Some(position as u32 + 1);
            }
        }
        RankStrategy::NameAndTotal => {
            let sorted: Vec<(String, i32)> = order
                .iter()
                .map(|&idx| (players[idx].name.clone(), players[idx].total))
                .collect();
            for (position, (name, total)) in sorted.into_iter().enumerate() {
                if let Some(target) = players
                    .iter_mut()
                    .find(|p| p.name == name && p.total == total)
                {
                    target.rank = Some(position as u32 + 1);
                }
            }
        }
    }
}

/// Roster indices ordered for display: ranked players by rank, then
/// unranked players in roster order.
pub fn standings_order(players: &[PlayerScore]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by_key(|&idx| players[idx].rank.unwrap_or(u32::MAX));
    order
}
