//! Archive of finished games.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::clock::{format_record_date, millis_since_epoch};
use crate::scoring::{standings_order, PlayerScore};

/// A finished game as it looked at reset time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Time-derived identifier, unique within one history.
    pub id: String,
    /// Human-readable timestamp of the reset.
    pub date: String,
    /// Roster snapshot including final ranks.
    pub players: Vec<PlayerScore>,
}

impl GameRecord {
    /// Players in finishing order, unranked players last.
    pub fn standings(&self) -> impl Iterator<Item = (usize, &PlayerScore)> + '_ {
        standings_order(&self.players)
            .into_iter()
            .map(move |idx| (idx, &self.players[idx]))
    }

    /// The rank-1 player with its roster index, if the game was ranked at
    /// all.
    pub fn winner(&self) -> Option<(usize, &PlayerScore)> {
        self.standings().next().filter(|(_, p)| p.rank() == Some(1))
    }
}

/// Past games, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHistory {
    records: Vec<GameRecord>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&GameRecord> {
        self.records.first()
    }

    /// Archive a roster snapshot taken at `at`, placing it in front.
    ///
    /// Ids are milliseconds since the epoch. When two games are archived
    /// within the same millisecond (or the clock steps back) the id is bumped
    /// past the newest existing one so ids never repeat.
    pub fn archive(&mut self, players: Vec<PlayerScore>, at: OffsetDateTime) -> &GameRecord {
        let mut id = millis_since_epoch(at);
        if let Some(newest) = self.latest().and_then(|r| r.id.parse::<i64>().ok()) {
            if id <= newest {
                id = newest + 1;
            }
        }
        self.records.insert(
            0,
            GameRecord {
                id: id.to_string(),
                date: format_record_date(at),
                players,
            },
        );
        &self.records[0]
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Re-derive totals of archived players read back from storage.
    pub(crate) fn normalize(&mut self) {
        for player in self.records.iter_mut().flat_map(|r| r.players.iter_mut()) {
            player.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{assign_ranks, RankStrategy};
    use time::macros::datetime;

    fn ranked_roster() -> Vec<PlayerScore> {
        let mut roster = vec![
            PlayerScore::with_rounds("high", &[20]),
            PlayerScore::with_rounds("low", &[10]),
        ];
        assign_ranks(&mut roster, RankStrategy::Position);
        roster
    }

    #[test]
    fn archive_prepends_newest() {
        let mut history = GameHistory::new();
        history.archive(ranked_roster(), datetime!(2026-01-01 10:00 UTC));
        history.archive(ranked_roster(), datetime!(2026-01-02 10:00 UTC));

        assert_eq!(history.len(), 2);
        let latest = history.latest().unwrap();
        assert_eq!(latest.date, "January 2, 2026 at 10:00 AM");
        assert_eq!(
            latest.id,
            millis_since_epoch(datetime!(2026-01-02 10:00 UTC)).to_string()
        );
    }

    #[test]
    fn same_instant_still_gets_unique_ids() {
        let at = datetime!(2026-03-04 05:06 UTC);
        let mut history = GameHistory::new();
        history.archive(ranked_roster(), at);
        history.archive(ranked_roster(), at);

        let ids: Vec<_> = history.records().iter().map(|r| r.id.clone()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn standings_order_by_rank() {
        let mut history = GameHistory::new();
        let record = history.archive(ranked_roster(), datetime!(2026-01-01 0:00 UTC));
        let names: Vec<_> = record.standings().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["low", "high"]);
        assert_eq!(record.winner().map(|(_, p)| p.name.as_str()), Some("low"));
    }

    #[test]
    fn unranked_games_have_no_winner() {
        let mut history = GameHistory::new();
        let record = history.archive(
            vec![PlayerScore::new(), PlayerScore::new()],
            datetime!(2026-01-01 0:00 UTC),
        );
        assert!(record.winner().is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut history = GameHistory::new();
        history.archive(ranked_roster(), datetime!(2026-01-01 0:00 UTC));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["players"][1]["rank"], 1);

        history.clear();
        assert!(history.is_empty());
    }
}
