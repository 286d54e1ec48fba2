use std::io;

use thiserror::Error;

use crate::scoring::TOTAL_ROUNDS;
use crate::{MAX_PLAYERS, MIN_PLAYERS};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key {key:?}")]
    InvalidKey { key: String },

    #[error("store I/O failed for {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScorecardError {
    #[error(
        "player count must be between {min} and {max}, got {0}",
        min = MIN_PLAYERS,
        max = MAX_PLAYERS
    )]
    InvalidPlayerCount(usize),

    #[error("no player at index {index} (roster has {count})")]
    PlayerOutOfRange { index: usize, count: usize },

    #[error("round must be between 1 and {max}, got {0}", max = TOTAL_ROUNDS)]
    RoundOutOfRange(usize),

    #[error("no game in progress")]
    NoActiveGame,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode game state: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T, E = ScorecardError> = std::result::Result<T, E>;
