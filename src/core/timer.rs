//=========================================================================
// Timer Scheduler
//=========================================================================
//
// Priority queue of pending timer fires, earliest first.
//
// Architecture:
//   schedule(id, t) ──> BinaryHeap<Companion> ──> pop_due(now)
//         │                                          │
//         └─> CompanionHandle (kept by the timer)    └─> may be cancelled
//
// Cancellation is lazy: a handle flips a shared flag and the companion
// stays in the heap until it reaches the top, where the caller drops
// it. There is no removal by key.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

//=== CompanionHandle =====================================================

/// The running timer's reference to its live companion.
#[derive(Debug, Clone)]
pub struct CompanionHandle {
    fire_at: f64,
    cancelled: Rc<Cell<bool>>,
}

impl CompanionHandle {
    /// Absolute engine time (ms) of the scheduled fire.
    pub fn fire_at(&self) -> f64 {
        self.fire_at
    }

    /// Marks the companion dead. It is discarded when popped.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

//=== Companion ===========================================================

/// One pending fire inside the scheduler.
#[derive(Debug)]
pub struct Companion {
    identifier: String,
    fire_at: f64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
}

impl Companion {
    /// Identifier of the timer at scheduling time.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn fire_at(&self) -> f64 {
        self.fire_at
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

// Reversed so BinaryHeap (a max-heap) yields the earliest fire first.
// Equal fire times come out in scheduling order.
impl Ord for Companion {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Companion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Companion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Companion {}

//=== TimerScheduler ======================================================

/// Min-ordered queue of timer companions with tombstone deletion.
#[derive(Debug, Default)]
pub struct TimerScheduler {
    queue: BinaryHeap<Companion>,
    next_seq: u64,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a fire for `identifier` at absolute time `fire_at`.
    pub fn schedule(&mut self, identifier: &str, fire_at: f64) -> CompanionHandle {
        let cancelled = Rc::new(Cell::new(false));
        let seq = self.next_seq;
        self.next_seq += 1;

        self.queue.push(Companion {
            identifier: identifier.to_string(),
            fire_at,
            seq,
            cancelled: Rc::clone(&cancelled),
        });

        CompanionHandle { fire_at, cancelled }
    }

    /// Fire time of the earliest companion, dead or alive.
    pub fn peek_fire_at(&self) -> Option<f64> {
        self.queue.peek().map(|c| c.fire_at)
    }

    /// Pops the earliest companion if it is due at `now`.
    ///
    /// The returned companion may be cancelled; callers must check
    /// [`Companion::is_cancelled`] and skip dead entries.
    pub fn pop_due(&mut self, now: f64) -> Option<Companion> {
        if self.peek_fire_at()? > now {
            return None;
        }
        self.queue.pop()
    }

    /// Number of queued companions, tombstones included.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every companion.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_due_before_fire_time() {
        let mut timers = TimerScheduler::new();
        timers.schedule("timer%%0", 1500.0);

        assert!(timers.pop_due(1499.9).is_none());
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn due_exactly_at_fire_time() {
        let mut timers = TimerScheduler::new();
        timers.schedule("timer%%0", 1500.0);

        let companion = timers.pop_due(1500.0).expect("due");
        assert_eq!(companion.identifier(), "timer%%0");
        assert_eq!(companion.fire_at(), 1500.0);
        assert!(timers.is_empty());
    }

    #[test]
    fn earliest_fire_comes_first() {
        let mut timers = TimerScheduler::new();
        timers.schedule("late", 3000.0);
        timers.schedule("early", 1000.0);
        timers.schedule("middle", 2000.0);

        let order: Vec<String> = std::iter::from_fn(|| timers.pop_due(5000.0))
            .map(|c| c.identifier().to_string())
            .collect();
        assert_eq!(order, ["early", "middle", "late"]);
    }

    #[test]
    fn equal_fire_times_keep_scheduling_order() {
        let mut timers = TimerScheduler::new();
        for name in ["a", "b", "c", "d"] {
            timers.schedule(name, 500.0);
        }

        let order: Vec<String> = std::iter::from_fn(|| timers.pop_due(500.0))
            .map(|c| c.identifier().to_string())
            .collect();
        assert_eq!(order, ["a", "b", "c", "d"]);
    }

    #[test]
    fn cancelled_companions_surface_as_tombstones() {
        let mut timers = TimerScheduler::new();
        let handle = timers.schedule("timer%%0", 100.0);
        handle.cancel();

        assert!(handle.is_cancelled());
        assert_eq!(timers.len(), 1, "cancel does not remove eagerly");

        let companion = timers.pop_due(100.0).expect("tombstone is still popped");
        assert!(companion.is_cancelled());
    }

    #[test]
    fn handle_reports_fire_time() {
        let mut timers = TimerScheduler::new();
        let handle = timers.schedule("timer%%0", 42.5);
        assert_eq!(handle.fire_at(), 42.5);
        assert!(!handle.is_cancelled());
    }
}
