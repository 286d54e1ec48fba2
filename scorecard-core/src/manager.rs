//! Owner of the active game and the archive, kept in sync with a store.

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, ScorecardError};
use crate::game::ActiveGame;
use crate::history::{GameHistory, GameRecord};
use crate::scoring::{assign_ranks, standings_order, PlayerScore, RankStrategy, TOTAL_ROUNDS};
use crate::store::{KeyValueStore, CURRENT_GAME_KEY, GAME_HISTORY_KEY};
use crate::{MAX_PLAYERS, MIN_PLAYERS};

/// Tunables for a manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerConfig {
    pub rank_strategy: RankStrategy,
}

/// Applies user intents to the game state and writes every change through
/// to the store.
#[derive(Debug)]
pub struct GameStateManager<S, C = SystemClock> {
    store: S,
    clock: C,
    config: ManagerConfig,
    game: ActiveGame,
    history: GameHistory,
    selecting: bool,
}

impl<S: KeyValueStore> GameStateManager<S> {
    /// Restore state from `store` using the wall clock and default settings.
    pub fn load(store: S) -> Result<Self> {
        Self::load_with(store, SystemClock, ManagerConfig::default())
    }
}

impl<S: KeyValueStore, C: Clock> GameStateManager<S, C> {
    /// Restore whatever `store` holds.
    ///
    /// The active game and the history are restored independently. A record
    /// that cannot be decoded is logged and treated as absent.
    pub fn load_with(store: S, clock: C, config: ManagerConfig) -> Result<Self> {
        let game = match restore::<ActiveGame, _>(&store, CURRENT_GAME_KEY)? {
            Some(mut game) => {
                if game.normalize() {
                    warn!("repaired inconsistent saved game");
                }
                Some(game)
            }
            None => None,
        };
        let history = restore::<GameHistory, _>(&store, GAME_HISTORY_KEY)?.map(|mut history| {
            history.normalize();
            history
        });

        let selecting = game.as_ref().map_or(true, ActiveGame::is_empty);
        let game = game.unwrap_or_default();
        let history = history.unwrap_or_default();
        debug!(
            players = game.player_count(),
            archived = history.len(),
            "loaded game state"
        );

        Ok(Self {
            store,
            clock,
            config,
            game,
            history,
            selecting,
        })
    }

    pub fn active_game(&self) -> &ActiveGame {
        &self.game
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// True while waiting for a player count, i.e. no game is running.
    pub fn selection_in_progress(&self) -> bool {
        self.selecting
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active roster in display order with each player's roster index.
    pub fn standings(&self) -> Vec<(usize, &PlayerScore)> {
        let players = self.game.players();
        standings_order(players)
            .into_iter()
            .map(|idx| (idx, &players[idx]))
            .collect()
    }

    /// Start a new game with `count` blank players, discarding any roster
    /// that was not archived.
    pub fn select_player_count(&mut self, count: usize) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ScorecardError::InvalidPlayerCount(count));
        }
        self.commit_game(ActiveGame::with_players(count))?;
        self.selecting = false;
        info!(players = count, "started new game");
        Ok(())
    }

    /// Record `score` for a 1-based `round` and re-rank the roster.
    pub fn update_score(&mut self, player_index: usize, round: usize, score: i32) -> Result<()> {
        if !(1..=TOTAL_ROUNDS).contains(&round) {
            return Err(ScorecardError::RoundOutOfRange(round));
        }
        let mut game = self.game.clone();
        let player = player_mut(&mut game, player_index)?;
        player.set_round(round, score);
        let total = player.total();
        assign_ranks(&mut game.players, self.config.rank_strategy);
        self.commit_game(game)?;
        debug!(player = player_index, round, score, total, "recorded score");
        Ok(())
    }

    pub fn update_player_name(
        &mut self,
        player_index: usize,
        name: impl Into<String>,
    ) -> Result<()> {
        let mut game = self.game.clone();
        player_mut(&mut game, player_index)?.name = name.into();
        self.commit_game(game)?;
        debug!(player = player_index, "renamed player");
        Ok(())
    }

    /// Move the progress marker. Scores may still be entered for any round.
    pub fn set_current_round(&mut self, round: usize) -> Result<()> {
        if self.game.is_empty() {
            return Err(ScorecardError::NoActiveGame);
        }
        if !(1..=TOTAL_ROUNDS).contains(&round) {
            return Err(ScorecardError::RoundOutOfRange(round));
        }
        let mut game = self.game.clone();
        game.current_round = round;
        self.commit_game(game)
    }

    /// Archive the current roster (if any) and return to player selection.
    ///
    /// The history is written before the saved game is removed, so a failed
    /// write never loses the finished roster. Once the history is stored the
    /// roster counts as archived; if removing the saved game then fails, a
    /// retry only finishes the removal. Returns the archived record.
    pub fn reset_game(&mut self) -> Result<Option<GameRecord>> {
        let archived = if self.game.is_empty() {
            None
        } else {
            let mut history = self.history.clone();
            let at = self.clock.now();
            let record = history.archive(self.game.players.clone(), at).clone();
            self.commit_history(history)?;
            info!(id = %record.id, players = record.players.len(), "archived game");
            Some(record)
        };

        self.game = ActiveGame::empty();
        self.selecting = true;
        self.store.remove(CURRENT_GAME_KEY)?;
        Ok(archived)
    }

    /// Forget every archived game.
    ///
    /// The stored history is overwritten with an empty list rather than
    /// removed.
    pub fn clear_history(&mut self) -> Result<()> {
        let dropped = self.history.len();
        self.commit_history(GameHistory::new())?;
        info!(dropped, "cleared history");
        Ok(())
    }

    /// Hand back the store, e.g. to reopen it with a fresh manager.
    pub fn into_store(self) -> S {
        self.store
    }

    fn commit_game(&mut self, game: ActiveGame) -> Result<()> {
        let encoded = serde_json::to_string(&game)?;
        self.store.set(CURRENT_GAME_KEY, &encoded)?;
        self.game = game;
        Ok(())
    }

    fn commit_history(&mut self, history: GameHistory) -> Result<()> {
        let encoded = serde_json::to_string(&history)?;
        self.store.set(GAME_HISTORY_KEY, &encoded)?;
        self.history = history;
        Ok(())
    }
}

fn player_mut(game: &mut ActiveGame, index: usize) -> Result<&mut PlayerScore> {
    let count = game.players.len();
    game.players
        .get_mut(index)
        .ok_or(ScorecardError::PlayerOutOfRange { index, count })
}

fn restore<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key, error = %err, "discarding unreadable saved record");
            Ok(None)
        }
    }
}
