//! Time source for archived game ids and timestamps.

use time::macros::format_description;
use time::OffsetDateTime;

/// Supplies the current instant when a game is archived.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in the local offset, falling back to UTC when the offset
/// cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Milliseconds since the Unix epoch.
pub fn millis_since_epoch(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Render an instant the way archived games display it: long-form US date
/// with a two-digit 12-hour clock, e.g. `October 18, 2026 at 07:05 PM`.
pub fn format_record_date(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[month repr:long] [day padding:none], [year] at [hour repr:12]:[minute] [period]"
    );
    at.format(format).unwrap_or_else(|_| at.date().to_string())
}
