//=========================================================================
// Event Queues
//=========================================================================
//
// Per-(identifier, event kind) FIFO queues.
//
// Architecture:
//   producers → push(id, kind) → HashMap<id, HashMap<kind, VecDeque>>
//                                      ↓
//   program   ← pop(id, kind)  (oldest first)
//
// Queues are grouped by identifier so a rename or a removal moves or
// drops every queue of an entity in a single map operation. A queue
// exists only while its entity subscribes to that kind; pushes to a
// missing queue are dropped.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::{HashMap, VecDeque};

//=== Internal Dependencies ===============================================

use super::{EventKind, EventPayload};

//=== EventQueues =========================================================

/// Unbounded FIFO queues keyed by entity identifier and event kind.
#[derive(Debug, Default)]
pub struct EventQueues {
    queues: HashMap<String, HashMap<EventKind, VecDeque<EventPayload>>>,
}

impl EventQueues {
    /// Creates an empty multiplexer.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Allocates an empty queue for `(identifier, kind)`.
    ///
    /// Subscribing twice keeps the existing queue and its contents.
    pub fn subscribe(&mut self, identifier: &str, kind: EventKind) {
        self.queues
            .entry(identifier.to_string())
            .or_default()
            .entry(kind)
            .or_default();
    }

    /// Returns true if `(identifier, kind)` has a queue.
    pub fn is_subscribed(&self, identifier: &str, kind: EventKind) -> bool {
        self.queues
            .get(identifier)
            .is_some_and(|kinds| kinds.contains_key(&kind))
    }

    /// Kinds subscribed by `identifier`, sorted.
    pub fn kinds(&self, identifier: &str) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self
            .queues
            .get(identifier)
            .map(|kinds| kinds.keys().copied().collect())
            .unwrap_or_default();
        kinds.sort();
        kinds
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a payload. Returns false (and drops the payload) when the
    /// queue does not exist.
    pub fn push(&mut self, identifier: &str, kind: EventKind, payload: EventPayload) -> bool {
        match self
            .queues
            .get_mut(identifier)
            .and_then(|kinds| kinds.get_mut(&kind))
        {
            Some(queue) => {
                queue.push_back(payload);
                true
            }
            None => false,
        }
    }

    /// Pops the oldest payload, or `None` if the queue is empty or absent.
    pub fn pop(&mut self, identifier: &str, kind: EventKind) -> Option<EventPayload> {
        self.queues
            .get_mut(identifier)
            .and_then(|kinds| kinds.get_mut(&kind))
            .and_then(|queue| queue.pop_front())
    }

    /// Number of payloads waiting in `(identifier, kind)`.
    pub fn len(&self, identifier: &str, kind: EventKind) -> usize {
        self.queues
            .get(identifier)
            .and_then(|kinds| kinds.get(&kind))
            .map_or(0, VecDeque::len)
    }

    //--- Ownership Transfer -----------------------------------------------

    /// Moves every queue of `from` to `to`.
    ///
    /// Any queues previously held by `to` are replaced.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(kinds) = self.queues.remove(from) {
            self.queues.insert(to.to_string(), kinds);
        }
    }

    /// Drops every queue of `identifier`.
    pub fn remove_all(&mut self, identifier: &str) {
        self.queues.remove(identifier);
    }

    /// Drops every queue of every identifier.
    pub fn clear(&mut self) {
        self.queues.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_multiplexer_has_no_queues() {
        let queues = EventQueues::new();
        assert!(!queues.is_subscribed("stage%%0", EventKind::KeyDown));
        assert_eq!(queues.len("stage%%0", EventKind::KeyDown), 0);
    }

    #[test]
    fn push_without_subscription_is_dropped() {
        let mut queues = EventQueues::new();
        assert!(!queues.push("text%a%0", EventKind::Click, EventPayload::Flag));
        assert_eq!(queues.pop("text%a%0", EventKind::Click), None);
    }

    #[test]
    fn payloads_come_out_in_push_order() {
        let mut queues = EventQueues::new();
        queues.subscribe("stage%%0", EventKind::KeyDown);

        for key in ["a", "b", "c"] {
            assert!(queues.push("stage%%0", EventKind::KeyDown, key.into()));
        }

        assert_eq!(queues.pop("stage%%0", EventKind::KeyDown), Some("a".into()));
        assert_eq!(queues.pop("stage%%0", EventKind::KeyDown), Some("b".into()));
        assert_eq!(queues.pop("stage%%0", EventKind::KeyDown), Some("c".into()));
        assert_eq!(queues.pop("stage%%0", EventKind::KeyDown), None);
    }

    #[test]
    fn kinds_are_independent() {
        let mut queues = EventQueues::new();
        queues.subscribe("image%coffee%0", EventKind::Click);
        queues.subscribe("image%coffee%0", EventKind::Tap);

        queues.push("image%coffee%0", EventKind::Tap, EventPayload::Flag);

        assert_eq!(queues.len("image%coffee%0", EventKind::Click), 0);
        assert_eq!(queues.len("image%coffee%0", EventKind::Tap), 1);
        assert_eq!(
            queues.kinds("image%coffee%0"),
            vec![EventKind::Click, EventKind::Tap]
        );
    }

    #[test]
    fn resubscribe_keeps_pending_payloads() {
        let mut queues = EventQueues::new();
        queues.subscribe("timer%%0", EventKind::Fire);
        queues.push("timer%%0", EventKind::Fire, EventPayload::Count(0));
        queues.subscribe("timer%%0", EventKind::Fire);
        assert_eq!(queues.len("timer%%0", EventKind::Fire), 1);
    }

    #[test]
    fn rename_moves_all_queues() {
        let mut queues = EventQueues::new();
        queues.subscribe("old", EventKind::Click);
        queues.push("old", EventKind::Click, EventPayload::Flag);

        queues.rename("old", "new");

        assert!(!queues.is_subscribed("old", EventKind::Click));
        assert!(queues.is_subscribed("new", EventKind::Click));
        assert_eq!(queues.pop("new", EventKind::Click), Some(EventPayload::Flag));
    }

    #[test]
    fn remove_all_drops_every_kind() {
        let mut queues = EventQueues::new();
        queues.subscribe("stage%%0", EventKind::KeyDown);
        queues.subscribe("stage%%0", EventKind::Swipe);
        queues.subscribe("timer%%0", EventKind::Fire);

        queues.remove_all("stage%%0");

        assert!(queues.kinds("stage%%0").is_empty());
        assert!(queues.is_subscribed("timer%%0", EventKind::Fire));
    }
}
