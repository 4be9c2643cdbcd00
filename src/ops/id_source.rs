use chrono::Utc;

use crate::model::snapshot::Snapshot;

/// Source of fresh list and task identifiers.
///
/// Implementations must never hand out the same value twice. `None` means
/// the id space is used up.
pub trait IdSource {
    fn next_id(&mut self) -> Option<i64>;
}

/// Millisecond wall-clock ids, forced to be strictly increasing.
///
/// If the clock has not moved past the last id handed out (two adds in the
/// same millisecond, or the clock stepping backwards) the last id plus one
/// is used instead.
pub struct ClockIds {
    last: i64,
    now: fn() -> i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl ClockIds {
    pub fn new() -> Self {
        Self::with_clock(now_millis)
    }

    /// Ids that stay clear of everything already present in `snapshot`
    pub fn after(snapshot: &Snapshot) -> Self {
        let mut ids = Self::new();
        ids.last = snapshot.max_id().unwrap_or(0);
        ids
    }

    pub fn with_clock(now: fn() -> i64) -> Self {
        ClockIds { last: 0, now }
    }

    pub fn last(&self) -> i64 {
        self.last
    }
}

impl Default for ClockIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for ClockIds {
    fn next_id(&mut self) -> Option<i64> {
        let id = (self.now)().max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}

/// Counter-based ids: 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: i64,
}

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds { last: 0 }
    }

    pub fn starting_after(last: i64) -> Self {
        SequentialIds { last }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Option<i64> {
        self.last = self.last.checked_add(1)?;
        Some(self.last)
    }
}
