//! Timer APIs
//!
//! `setTimeout` and `requestAnimationFrame` against a virtual clock. The page
//! decides when time passes; the manager only orders what is due.

use std::collections::BTreeMap;

use crate::UnitId;

/// Timer identifier, increasing in scheduling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Timer entry
#[derive(Debug, Clone)]
pub struct Timer {
    pub id: TimerId,
    /// Unit that receives the callback
    pub owner: UnitId,
    /// Opaque value handed back to the owner
    pub token: u64,
    /// Virtual time (ms) at which the timer becomes due
    pub due_at: f64,
}

/// Pending animation frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub owner: UnitId,
    pub token: u64,
}

/// Timer manager
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: BTreeMap<TimerId, Timer>,
    frames: Vec<FrameRequest>,
    next_id: u64,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timeout due `delay_ms` after `now`
    pub fn set_timeout(&mut self, owner: UnitId, token: u64, delay_ms: f64, now: f64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
        self.timers.insert(
            id,
            Timer {
                id,
                owner,
                token,
                due_at: now + delay,
            },
        );
        id
    }

    /// Clear a timer, returns true if it was pending
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Earliest due time
    pub fn next_due(&self) -> Option<f64> {
        self.timers.values().map(|t| t.due_at).min_by(f64::total_cmp)
    }

    /// Remove and return the earliest timer due at or before `at`.
    /// Ties resolve in scheduling order.
    pub fn pop_due(&mut self, at: f64) -> Option<Timer> {
        let id = self
            .timers
            .values()
            .filter(|t| t.due_at <= at)
            .min_by(|a, b| a.due_at.total_cmp(&b.due_at).then(a.id.cmp(&b.id)))
            .map(|t| t.id)?;
        self.timers.remove(&id)
    }

    /// Queue a callback for the next animation frame
    pub fn request_frame(&mut self, owner: UnitId, token: u64) {
        self.frames.push(FrameRequest { owner, token });
    }

    pub fn has_frame_requests(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Take this frame's callbacks; requests made while running them wait
    /// for the following frame
    pub fn take_frame_requests(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.frames)
    }

    /// Check if anything is scheduled
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty() || !self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: UnitId = UnitId::from_raw(0);

    #[test]
    fn test_timer_manager() {
        let mut tm = TimerManager::new();

        let id1 = tm.set_timeout(OWNER, 1, 100.0, 0.0);
        let id2 = tm.set_timeout(OWNER, 2, 200.0, 0.0);

        assert!(tm.has_pending());
        assert_eq!(tm.next_due(), Some(100.0));

        assert!(tm.clear(id1));
        assert!(!tm.clear(id1));
        assert_eq!(tm.next_due(), Some(200.0));

        tm.clear(id2);
        assert!(!tm.has_pending());
    }

    #[test]
    fn test_pop_due_orders_by_time_then_id() {
        let mut tm = TimerManager::new();
        tm.set_timeout(OWNER, 1, 300.0, 0.0);
        tm.set_timeout(OWNER, 2, 100.0, 0.0);
        tm.set_timeout(OWNER, 3, 100.0, 0.0);

        assert!(tm.pop_due(50.0).is_none());
        let order: Vec<u64> = std::iter::from_fn(|| tm.pop_due(1000.0))
            .map(|t| t.token)
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_negative_delay_is_immediate() {
        let mut tm = TimerManager::new();
        tm.set_timeout(OWNER, 1, -5.0, 10.0);
        tm.set_timeout(OWNER, 2, f64::NAN, 10.0);
        assert_eq!(tm.next_due(), Some(10.0));
        assert_eq!(tm.pop_due(10.0).map(|t| t.token), Some(1));
    }

    #[test]
    fn test_frame_requests_are_taken_once() {
        let mut tm = TimerManager::new();
        tm.request_frame(OWNER, 1);
        tm.request_frame(OWNER, 2);
        assert_eq!(tm.take_frame_requests().len(), 2);
        assert!(!tm.has_frame_requests());
    }
}
