//=========================================================================
// Event Types
//
// Names and payloads of everything a program can dequeue.
//
// Event kinds fall into three families:
// - Device events (keydown, swipe): produced by the input surface and
//   routed to whichever entity currently holds the stage role
// - Shape events (click, tap, mouse*): produced by a drawable when the
//   user interacts with it
// - Timer events (fire): produced by the timer scheduler
//
// `remain` is not a queue at all: dequeuing it on a timer returns the
// countdown to the next fire.
//
//=========================================================================

//=== Module Declarations =================================================

mod event_queue;

//=== Public API ==========================================================

pub use event_queue::EventQueues;

//=== Standard Library Imports ============================================

use std::fmt;
use std::str::FromStr;

//=== Internal Dependencies ===============================================

use super::error::EngineError;

//=== EventKind ===========================================================

/// Name of an event stream attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    //--- Device -----------------------------------------------------------
    /// Key pressed on the input surface. Payload: key name.
    KeyDown,

    /// Swipe gesture on the input surface. Payload: direction.
    Swipe,

    //--- Shape ------------------------------------------------------------
    /// Pointer click on a drawable. Payload: presence flag.
    Click,

    /// Touch tap on a drawable. Payload: presence flag.
    Tap,

    /// Pointer entered a drawable.
    MouseEnter,

    /// Pointer left a drawable.
    MouseLeave,

    /// Pointer button pressed over a drawable.
    MouseDown,

    /// Pointer button released over a drawable.
    MouseUp,

    //--- Timer ------------------------------------------------------------
    /// Timer fired. Payload: fire count before this fire.
    Fire,

    /// Countdown query on a timer (never queued).
    Remain,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 10] = [
        EventKind::KeyDown,
        EventKind::Swipe,
        EventKind::Click,
        EventKind::Tap,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::Fire,
        EventKind::Remain,
    ];

    /// Wire name used in `eventList` configs and feature tags.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::KeyDown => "keydown",
            EventKind::Swipe => "swipe",
            EventKind::Click => "click",
            EventKind::Tap => "tap",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::Fire => "fire",
            EventKind::Remain => "remain",
        }
    }

    /// Produced by the input surface and delivered to the stage.
    pub fn is_device(self) -> bool {
        matches!(self, EventKind::KeyDown | EventKind::Swipe)
    }

    /// Produced by interacting with a drawable.
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            EventKind::Click
                | EventKind::Tap
                | EventKind::MouseEnter
                | EventKind::MouseLeave
                | EventKind::MouseDown
                | EventKind::MouseUp
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| EngineError::UnknownEventKind(name.to_string()))
    }
}

//=== EventPayload ========================================================

/// Opaque value carried by a queued event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Presence-only event (click, tap, ...).
    Flag,

    /// Integer counter (timer fire count).
    Count(u64),

    /// Numeric value (timer countdown in milliseconds).
    Number(f64),

    /// Textual value (key name, swipe direction).
    Text(String),
}

impl EventPayload {
    /// Returns the counter if this is a `Count` payload.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            EventPayload::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number` payload.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EventPayload::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text if this is a `Text` payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventPayload::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for EventPayload {
    fn from(value: &str) -> Self {
        EventPayload::Text(value.to_string())
    }
}

impl From<String> for EventPayload {
    fn from(value: String) -> Self {
        EventPayload::Text(value)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "dblclick".parse::<EventKind>(),
            Err(EngineError::UnknownEventKind("dblclick".to_string()))
        );
    }

    #[test]
    fn families_are_disjoint() {
        for kind in EventKind::ALL {
            assert!(!(kind.is_device() && kind.is_shape()), "{kind} in two families");
        }
        assert!(!EventKind::Fire.is_device());
        assert!(!EventKind::Remain.is_shape());
    }

    #[test]
    fn payload_accessors() {
        assert_eq!(EventPayload::Count(3).as_count(), Some(3));
        assert_eq!(EventPayload::Flag.as_count(), None);
        assert_eq!(EventPayload::Number(1.5).as_number(), Some(1.5));
        assert_eq!(EventPayload::from("left").as_text(), Some("left"));
    }
}
