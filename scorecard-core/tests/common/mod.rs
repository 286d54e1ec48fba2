//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use proptest::prelude::ProptestConfig;
use scorecard_core::{FixedClock, GameStateManager, KeyValueStore, ManagerConfig};
use time::macros::datetime;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a quiet test subscriber once. `TEST_LOG`, then `RUST_LOG`, then
/// `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Manager over `store` with a pinned clock.
pub fn manager<S: KeyValueStore>(store: S) -> GameStateManager<S, FixedClock> {
    init_logging();
    GameStateManager::load_with(
        store,
        FixedClock(datetime!(2026-10-18 19:05 UTC)),
        ManagerConfig::default(),
    )
    .expect("load manager")
}

/// Proptest config, case count overridable with `PROPTEST_CASES`.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    ProptestConfig {
        cases,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}
