//! Numeric id allocation for plants and care actions.
//!
//! Ids keep the millisecond-timestamp shape of existing data but are
//! strictly increasing: each id is `max(now_ms, last + 1)`, so two calls in
//! the same millisecond (or under a frozen clock) never collide.

use crate::traits::Clock;

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already in use.
    pub fn seeded<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self {
            last: existing.into_iter().max().unwrap_or(0),
        }
    }

    pub fn next_id(&mut self, clock: &dyn Clock) -> u64 {
        let now_ms = u64::try_from(clock.now_utc().timestamp_millis()).unwrap_or(0);
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}
