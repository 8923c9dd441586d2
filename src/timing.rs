//! Monotonic-clock helpers shared by the touch and button recognizers.
//!
//! All timestamps are milliseconds from a free-running counter. Differences are
//! taken with wrapping subtraction so a counter rollover never reads as a huge
//! negative gap.

pub fn elapsed_ms(now_ms: u64, since_ms: u64) -> u64 {
    now_ms.wrapping_sub(since_ms)
}

/// A level change accepted by [`LevelDebouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelChange {
    pub level: bool,
    /// When the raw reading first showed `level`, not when it was accepted.
    pub since_ms: u64,
}

/// Accepts a digital level only after it has held steady for `stable_ms`.
#[derive(Clone, Copy, Debug)]
pub struct LevelDebouncer {
    stable_ms: u64,
    stable_level: bool,
    candidate_level: bool,
    last_change_ms: u64,
}

impl LevelDebouncer {
    pub const fn new(stable_ms: u64, initial_level: bool) -> Self {
        Self {
            stable_ms,
            stable_level: initial_level,
            candidate_level: initial_level,
            last_change_ms: 0,
        }
    }

    pub fn level(&self) -> bool {
        self.stable_level
    }

    /// Feeds one raw reading. Returns the change once it is accepted.
    pub fn update(&mut self, now_ms: u64, raw_level: bool) -> Option<LevelChange> {
        if raw_level != self.candidate_level {
            self.candidate_level = raw_level;
            self.last_change_ms = now_ms;
            return None;
        }

        if self.candidate_level == self.stable_level {
            return None;
        }

        if elapsed_ms(now_ms, self.last_change_ms) < self.stable_ms {
            return None;
        }

        self.stable_level = self.candidate_level;
        Some(LevelChange {
            level: self.stable_level,
            since_ms: self.last_change_ms,
        })
    }
}

/// Rate limiter for hardware reads.
#[derive(Clone, Copy, Debug)]
pub struct SampleThrottle {
    min_interval_ms: u64,
    last_admitted_ms: Option<u64>,
}

impl SampleThrottle {
    pub const fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_admitted_ms: None,
        }
    }

    pub fn admit(&mut self, now_ms: u64) -> bool {
        if let Some(last_ms) = self.last_admitted_ms {
            if elapsed_ms(now_ms, last_ms) < self.min_interval_ms {
                return false;
            }
        }
        self.last_admitted_ms = Some(now_ms);
        true
    }
}

/// Tracks consecutive failures so only the first of a streak gets reported.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorStreak {
    failures: u32,
}

impl ErrorStreak {
    pub const fn new() -> Self {
        Self { failures: 0 }
    }

    /// Returns `true` when this failure opens a new streak.
    pub fn record_failure(&mut self) -> bool {
        self.failures = self.failures.saturating_add(1);
        self.failures == 1
    }

    /// Ends the current streak and returns how many failures it held.
    pub fn record_success(&mut self) -> u32 {
        core::mem::take(&mut self.failures)
    }

    pub fn failing(&self) -> bool {
        self.failures > 0
    }
}
