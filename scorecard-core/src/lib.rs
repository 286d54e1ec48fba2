use std::fmt;

pub mod clock;
pub mod error;
pub mod game;
pub mod history;
pub mod manager;
pub mod scoring;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, ScorecardError, StoreError};
pub use game::ActiveGame;
pub use history::{GameHistory, GameRecord};
pub use manager::{GameStateManager, ManagerConfig};
pub use scoring::{coerce_score, PlayerScore, RankStrategy, TOTAL_ROUNDS};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Smallest roster a game can be started with.
pub const MIN_PLAYERS: usize = 2;
/// Largest roster a game can be started with.
pub const MAX_PLAYERS: usize = 8;

/// Podium decoration for the top three ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Decoration for a rank, `None` below third place or when unranked.
    pub fn for_rank(rank: Option<u32>) -> Option<Medal> {
        match rank? {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medal::Gold => write!(f, "gold"),
            Medal::Silver => write!(f, "silver"),
            Medal::Bronze => write!(f, "bronze"),
        }
    }
}

/// Name to show for a player, falling back to `Player N` (1-based) when the
/// name is blank.
pub fn display_name(player: &PlayerScore, position: usize) -> String {
    if player.name.trim().is_empty() {
        format!("Player {}", position + 1)
    } else {
        player.name.clone()
    }
}
