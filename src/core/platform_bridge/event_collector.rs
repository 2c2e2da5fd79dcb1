//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of the host channel with bounded polling.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → events (this tick)
//
// The bound only defers work to the next tick; nothing is dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::HostEvent;

//=== EventCollector ======================================================

/// Collects host events once per tick.
pub(crate) struct EventCollector {
    receiver: Receiver<HostEvent>,
    events: Vec<HostEvent>,
}

impl EventCollector {
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 1024;

    pub(crate) fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Drains pending host events, up to the per-frame bound.
    pub(crate) fn collect_frame(&mut self) -> &mut Vec<HostEvent> {
        self.events.clear();

        while self.events.len() < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => self.events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.events.len() >= Self::MAX_EVENTS_PER_FRAME {
            warn!(
                "Host event backlog: drained {} events this frame, {} left",
                self.events.len(),
                self.receiver.len()
            );
        }

        &mut self.events
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{EventKind, EventPayload};
    use crossbeam_channel::unbounded;

    fn key(name: &str) -> HostEvent {
        HostEvent::Device {
            kind: EventKind::KeyDown,
            payload: EventPayload::from(name),
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<HostEvent>();
        let mut collector = EventCollector::new(rx);

        assert!(collector.collect_frame().is_empty());
    }

    #[test]
    fn collect_preserves_send_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key("a")).unwrap();
        tx.send(key("b")).unwrap();

        let events = collector.collect_frame();
        assert_eq!(events.as_slice(), &[key("a"), key("b")]);
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key("a")).unwrap();
        assert_eq!(collector.collect_frame().len(), 1);
        assert!(collector.collect_frame().is_empty());
    }

    #[test]
    fn backlog_carries_over_to_next_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..EventCollector::MAX_EVENTS_PER_FRAME + 3 {
            tx.send(key("x")).unwrap();
        }

        assert_eq!(
            collector.collect_frame().len(),
            EventCollector::MAX_EVENTS_PER_FRAME
        );
        assert_eq!(collector.collect_frame().len(), 3);
    }

    #[test]
    fn collect_survives_disconnect() {
        let (tx, rx) = unbounded::<HostEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);
        assert!(collector.collect_frame().is_empty());
    }
}
