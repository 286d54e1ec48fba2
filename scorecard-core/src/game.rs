//! The game currently being scored and its persisted form.

use serde::{Deserialize, Serialize};

use crate::scoring::{PlayerScore, TOTAL_ROUNDS};

/// The in-progress game. Empty (`player_count == 0`) until a player count is
/// chosen and again after a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGame {
    pub(crate) players: Vec<PlayerScore>,
    pub(crate) player_count: usize,
    #[serde(default = "first_round")]
    pub(crate) current_round: usize,
}

fn first_round() -> usize {
    1
}

impl Default for ActiveGame {
    fn default() -> Self {
        Self::empty()
    }
}

impl ActiveGame {
    /// No roster, awaiting a player count.
    pub fn empty() -> Self {
        Self {
            players: Vec::new(),
            player_count: 0,
            current_round: 1,
        }
    }

    /// A fresh roster of `count` unnamed, unranked players.
    pub(crate) fn with_players(count: usize) -> Self {
        Self {
            players: (0..count).map(|_| PlayerScore::new()).collect(),
            player_count: count,
            current_round: 1,
        }
    }

    pub fn players(&self) -> &[PlayerScore] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Repair a game that was read back from storage so the roster
    /// invariants hold again. Returns true if anything had to change.
    pub(crate) fn normalize(&mut self) -> bool {
        let mut changed = false;
        for player in &mut self.players {
            let before = (player.rounds().len(), player.total());
            player.normalize();
            changed |= before != (player.rounds().len(), player.total());
        }
        if self.player_count != self.players.len() {
            self.player_count = self.players.len();
            changed = true;
        }
        let round = self.current_round.clamp(1, TOTAL_ROUNDS);
        if round != self.current_round {
            self.current_round = round;
            changed = true;
        }
        changed
    }
}
