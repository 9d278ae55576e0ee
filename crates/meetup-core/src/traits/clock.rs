//! Clock port - the current instant, injected so tests can freeze time

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

/// Source of the current instant
///
/// The core never reads process-global time; every "started"/"finished"
/// predicate goes through an injected clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as epoch seconds
    fn now_ts(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Wall clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a settable instant, for deterministic tests
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ts: AtomicI64,
}

impl FixedClock {
    /// Create a clock frozen at the given epoch second
    pub fn at(ts: i64) -> Self {
        Self {
            now_ts: AtomicI64::new(ts),
        }
    }

    /// Move the frozen instant
    pub fn set(&self, ts: i64) {
        self.now_ts.store(ts, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.now_ts.load(Ordering::SeqCst), 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}
