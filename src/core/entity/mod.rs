//=========================================================================
// Entities
//=========================================================================
//
// Records stored in the entity registry.
//
// Three variants share one identifier namespace:
// - Shape: a renderer drawable, optionally emitting shape events
// - Stage: the single input surface, emitting device events
// - Timer: a software timer driven by the timer scheduler
//
// Lifecycle:
//   create ──> loading ──(load completes)──> ready ──> removed
//     │                                        ↑
//     └──────────── synchronous kinds ─────────┘
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;

//=== Public API ==========================================================

pub use registry::EntityRegistry;

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::config::Attributes;
use super::event::EventKind;
use super::loader::LoadTicket;
use super::render::DrawableId;
use super::timer::{CompanionHandle, TimerScheduler};

//=== ShapeKind ===========================================================

/// Drawable primitives understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Text,
    Rect,
    Ellipse,
    Line,
    Image,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Text,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Line,
        ShapeKind::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Text => "text",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Image => "image",
        }
    }
}

//=== EntityKind ==========================================================

/// What a Create call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Text,
    Rect,
    Ellipse,
    Line,
    Image,
    Stage,
    Timer,
}

impl EntityKind {
    /// The drawable primitive, for shape kinds.
    pub fn shape(self) -> Option<ShapeKind> {
        match self {
            EntityKind::Text => Some(ShapeKind::Text),
            EntityKind::Rect => Some(ShapeKind::Rect),
            EntityKind::Ellipse => Some(ShapeKind::Ellipse),
            EntityKind::Line => Some(ShapeKind::Line),
            EntityKind::Image => Some(ShapeKind::Image),
            EntityKind::Stage | EntityKind::Timer => None,
        }
    }

    /// True for kinds that finish creation asynchronously.
    pub fn is_async(self) -> bool {
        matches!(self, EntityKind::Image)
    }

    /// Whether an entity of this kind may subscribe to `event`.
    pub fn accepts(self, event: EventKind) -> bool {
        match self {
            EntityKind::Stage => event.is_device(),
            EntityKind::Timer => event == EventKind::Fire,
            _ => event.is_shape(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Stage => "stage",
            EntityKind::Timer => "timer",
            shape => shape.shape().map_or("shape", ShapeKind::as_str),
        };
        f.write_str(name)
    }
}

//=== Lifecycle ===========================================================

/// Registry state of a live identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Creation requested, asynchronous provisioning in flight.
    Loading,

    /// Registered, mutable and event-subscribed.
    Ready,
}

//=== Records =============================================================

#[derive(Debug)]
pub(crate) struct Shape {
    pub kind: ShapeKind,
    pub drawable: DrawableId,
}

/// Running timers hold their live companion; paused timers hold the
/// time that was left. Never both.
#[derive(Debug)]
pub(crate) enum TimerSchedule {
    Running(CompanionHandle),
    Paused { remaining: f64 },
}

#[derive(Debug)]
pub(crate) struct Timer {
    pub interval: f64,
    pub count: u64,
    pub schedule: TimerSchedule,
}

impl Timer {
    /// Milliseconds until the next fire.
    pub fn remain(&self, now: f64) -> f64 {
        match &self.schedule {
            TimerSchedule::Running(handle) => (handle.fire_at() - now).max(0.0),
            TimerSchedule::Paused { remaining } => *remaining,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.schedule, TimerSchedule::Paused { .. })
    }

    /// Freezes the countdown and cancels the live companion.
    pub fn pause(&mut self, now: f64) {
        if let TimerSchedule::Running(handle) = &self.schedule {
            let remaining = (handle.fire_at() - now).max(0.0);
            handle.cancel();
            self.schedule = TimerSchedule::Paused { remaining };
        }
    }

    /// Restarts the countdown from where it was frozen.
    pub fn resume(&mut self, identifier: &str, now: f64, timers: &mut TimerScheduler) {
        if let TimerSchedule::Paused { remaining } = self.schedule {
            self.schedule = TimerSchedule::Running(timers.schedule(identifier, now + remaining));
        }
    }

    /// Re-issues the live companion under a new identifier, same fire time.
    pub fn rekey(&mut self, identifier: &str, timers: &mut TimerScheduler) {
        if let TimerSchedule::Running(handle) = &self.schedule {
            let fire_at = handle.fire_at();
            handle.cancel();
            self.schedule = TimerSchedule::Running(timers.schedule(identifier, fire_at));
        }
    }

    /// Cancels the live companion, if any.
    pub fn cancel(&self) {
        if let TimerSchedule::Running(handle) = &self.schedule {
            handle.cancel();
        }
    }
}

#[derive(Debug)]
pub(crate) enum Entity {
    Shape(Shape),
    Stage,
    Timer(Timer),
}

/// Image creation waiting for its load to complete.
#[derive(Debug)]
pub(crate) struct PendingImage {
    pub ticket: LoadTicket,
    pub attributes: Attributes,
    pub events: Vec<EventKind>,
}

#[derive(Debug)]
pub(crate) enum Slot {
    Loading(PendingImage),
    Ready(Entity),
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn running_timer(timers: &mut TimerScheduler, fire_at: f64) -> Timer {
        Timer {
            interval: 500.0,
            count: 0,
            schedule: TimerSchedule::Running(timers.schedule("timer%%0", fire_at)),
        }
    }

    #[test]
    fn remain_counts_down_while_running() {
        let mut timers = TimerScheduler::new();
        let timer = running_timer(&mut timers, 2000.0);
        assert_eq!(timer.remain(1800.0), 200.0);
        assert_eq!(timer.remain(2100.0), 0.0);
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut timers = TimerScheduler::new();
        let mut timer = running_timer(&mut timers, 2000.0);

        timer.pause(1800.0);

        assert!(timer.is_paused());
        assert_eq!(timer.remain(1800.0), 200.0);
        assert_eq!(timer.remain(9000.0), 200.0);
        let companion = timers.pop_due(2000.0).expect("tombstone");
        assert!(companion.is_cancelled());
    }

    #[test]
    fn resume_schedules_the_rest_of_the_interval() {
        let mut timers = TimerScheduler::new();
        let mut timer = running_timer(&mut timers, 2000.0);
        timer.pause(1800.0);

        timer.resume("timer%%0", 5000.0, &mut timers);

        assert!(!timer.is_paused());
        assert_eq!(timer.remain(5000.0), 200.0);
        assert_eq!(timers.peek_fire_at(), Some(2000.0), "old tombstone still on top");
        timers.pop_due(2000.0);
        assert_eq!(timers.peek_fire_at(), Some(5200.0));
    }

    #[test]
    fn pause_twice_keeps_first_snapshot() {
        let mut timers = TimerScheduler::new();
        let mut timer = running_timer(&mut timers, 2000.0);
        timer.pause(1500.0);
        timer.pause(1900.0);
        assert_eq!(timer.remain(0.0), 500.0);
    }

    #[test]
    fn rekey_moves_companion_to_new_identifier() {
        let mut timers = TimerScheduler::new();
        let mut timer = running_timer(&mut timers, 1000.0);

        timer.rekey("timer%renamed%0", &mut timers);

        let first = timers.pop_due(1000.0).expect("old companion");
        let second = timers.pop_due(1000.0).expect("new companion");
        assert!(first.is_cancelled());
        assert_eq!(second.identifier(), "timer%renamed%0");
        assert!(!second.is_cancelled());
    }

    #[test]
    fn kinds_accept_their_own_event_families() {
        assert!(EntityKind::Stage.accepts(EventKind::KeyDown));
        assert!(!EntityKind::Stage.accepts(EventKind::Click));
        assert!(EntityKind::Image.accepts(EventKind::Tap));
        assert!(!EntityKind::Text.accepts(EventKind::Swipe));
        assert!(EntityKind::Timer.accepts(EventKind::Fire));
        assert!(!EntityKind::Timer.accepts(EventKind::Remain));
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(EntityKind::Ellipse.to_string(), "ellipse");
        assert_eq!(EntityKind::Stage.to_string(), "stage");
    }
}
