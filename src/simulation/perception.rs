//! Per-actor memo of "who can I see", refreshed every few ticks.
//!
//! Scanning the opposing population is the dominant per-actor cost, so each
//! actor reuses its last answer for a fixed number of calls. The cache is a
//! plain field of the actor: removing the actor from its arena drops it.

use super::entity::EntityId;

/// Bounded-lifetime cache of visible entity handles.
///
/// The underlying query runs on the first call and then whenever the number
/// of previous calls is a multiple of `period`.
#[derive(Debug, Clone)]
pub struct PerceptionCache {
    period: u32,
    calls: u64,
    visible: Vec<EntityId>,
}

impl PerceptionCache {
    /// Creates an empty cache that recomputes every `period` calls.
    ///
    /// A period of zero is treated as one (recompute on every call).
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            calls: 0,
            visible: Vec::new(),
        }
    }

    /// Returns the cached handles, running `compute` first if the entry is due.
    pub fn query<F>(&mut self, compute: F) -> &[EntityId]
    where
        F: FnOnce() -> Vec<EntityId>,
    {
        if self.calls % u64::from(self.period) == 0 {
            self.visible = compute();
        }
        self.calls += 1;
        &self.visible
    }

    /// Fallible variant of [`PerceptionCache::query`].
    ///
    /// On error the call still counts and the previous answer is kept, so a
    /// failed refresh is retried at the next period boundary.
    pub fn try_query<F, E>(&mut self, compute: F) -> Result<&[EntityId], E>
    where
        F: FnOnce() -> Result<Vec<EntityId>, E>,
    {
        let due = self.calls % u64::from(self.period) == 0;
        self.calls += 1;
        if due {
            self.visible = compute()?;
        }
        Ok(&self.visible)
    }

    /// Number of queries served so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Refresh period in calls.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// The most recently computed handles without counting a call.
    pub fn last(&self) -> &[EntityId] {
        &self.visible
    }
}
