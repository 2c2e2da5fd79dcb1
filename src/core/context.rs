//=========================================================================
// Frame Context
//=========================================================================
//
// Capability sets handed to program callbacks.
//
// Architecture:
//   RedrawContext   create                                  + system
//   UpdateContext   create, update, remove, dequeue_event   + system
//
// Both wrap a `Scope`: a borrow of the engine state, the launch-time
// context revision and the engine time every operation is stamped with.
// A context only lives for the callback it was built for.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::Config;
use super::entity::EntityKind;
use super::error::EngineResult;
use super::event::{EventKind, EventPayload};
use super::state::EngineState;
use super::viewport::Viewport;

//=== SystemStats =========================================================

/// Read-only frame statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemStats {
    /// Host timestamp of the current tick (ms).
    pub timestamp: f64,

    /// Frames since the program was (re)started.
    pub frame_count: u64,

    /// Engine time since the program was (re)started (ms).
    pub elapsed_ms: f64,

    /// Frames over the lifetime of the engine.
    pub engine_frame_count: u64,

    /// Engine time over the lifetime of the engine (ms). Drives timers.
    pub engine_elapsed_ms: f64,

    pub width: f64,
    pub height: f64,

    /// `width / height`.
    pub aspect_ratio: f64,
}

//=== ContextRevision =====================================================

/// How context operations interpret program-supplied configs.
///
/// Chosen once when a program is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextRevision {
    /// Viewport-relative coordinates: horizontal values in `0..1` of
    /// the viewport width, vertical values in `0..1` of its height.
    #[default]
    Junkrat,
}

impl ContextRevision {
    pub fn name(self) -> &'static str {
        match self {
            ContextRevision::Junkrat => "junkrat",
        }
    }

    /// Feature tag advertised for this revision.
    pub fn feature_tag(self) -> String {
        format!("context:{}", self.name())
    }

    /// Converts a program config into renderer units.
    pub(crate) fn prepare(self, config: &Config, viewport: &Viewport) -> Config {
        match self {
            ContextRevision::Junkrat => {
                let mut prepared = config.clone();
                for key in ["x", "width"] {
                    prepared.scale(key, viewport.width);
                }
                for key in ["y", "height", "fontSize"] {
                    prepared.scale(key, viewport.height);
                }
                prepared
            }
        }
    }
}

//=== Scope ===============================================================

struct Scope<'a> {
    state: &'a mut EngineState,
    revision: ContextRevision,
    now: f64,
}

impl Scope<'_> {
    fn create(&mut self, identifier: &str, kind: EntityKind, config: &Config) -> EngineResult<()> {
        let config = self.revision.prepare(config, &self.state.services.viewport);
        self.state.create(identifier, kind, &config, self.now)
    }

    fn update(&mut self, identifier: &str, config: &Config) -> EngineResult<()> {
        let config = self.revision.prepare(config, &self.state.services.viewport);
        self.state.update(identifier, &config, self.now)
    }
}

//=== RedrawContext =======================================================

/// Context for the one-time `redraw` callback.
pub struct RedrawContext<'a> {
    scope: Scope<'a>,
    system: SystemStats,
}

impl<'a> RedrawContext<'a> {
    pub(crate) fn new(
        state: &'a mut EngineState,
        revision: ContextRevision,
        system: SystemStats,
    ) -> Self {
        Self {
            scope: Scope {
                state,
                revision,
                now: system.engine_elapsed_ms,
            },
            system,
        }
    }

    /// Creates `identifier` as `kind`. See [`UpdateContext::create`].
    pub fn create(&mut self, identifier: &str, kind: EntityKind, config: &Config) -> EngineResult<()> {
        self.scope.create(identifier, kind, config)
    }

    pub fn system(&self) -> &SystemStats {
        &self.system
    }
}

//=== UpdateContext =======================================================

/// Context for every regular frame.
pub struct UpdateContext<'a> {
    scope: Scope<'a>,
    system: SystemStats,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(
        state: &'a mut EngineState,
        revision: ContextRevision,
        system: SystemStats,
    ) -> Self {
        Self {
            scope: Scope {
                state,
                revision,
                now: system.engine_elapsed_ms,
            },
            system,
        }
    }

    /// Creates `identifier` as `kind`.
    ///
    /// Images are `loading` until their data arrives on a later tick;
    /// everything else is ready on return.
    ///
    /// # Errors
    ///
    /// Fails if the identifier is taken, a stage already exists, a timer
    /// interval is not positive, or `eventList` names a kind this entity
    /// cannot produce.
    pub fn create(&mut self, identifier: &str, kind: EntityKind, config: &Config) -> EngineResult<()> {
        self.scope.create(identifier, kind, config)
    }

    /// Mutates a ready entity. An `identifier` key renames it.
    ///
    /// Does nothing while `identifier` is loading.
    pub fn update(&mut self, identifier: &str, config: &Config) -> EngineResult<()> {
        self.scope.update(identifier, config)
    }

    /// Removes an entity and all of its queues.
    pub fn remove(&mut self, identifier: &str) -> EngineResult<()> {
        self.scope.state.remove(identifier)
    }

    /// Pops the oldest payload of `kind` for `identifier`.
    ///
    /// `Remain` on a timer reports the time left until its next fire.
    pub fn dequeue_event(
        &mut self,
        identifier: &str,
        kind: EventKind,
    ) -> EngineResult<Option<EventPayload>> {
        self.scope.state.dequeue(identifier, kind, self.scope.now)
    }

    pub fn system(&self) -> &SystemStats {
        &self.system
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Value;

    #[test]
    fn junkrat_scales_coordinates_to_viewport() {
        let viewport = Viewport::new(800.0, 600.0);
        let config = Config::new()
            .with("x", 0.5)
            .with("y", 0.25)
            .with("width", 0.1)
            .with("height", 0.2)
            .with("fontSize", 0.05)
            .with("fill", "red")
            .with("interval", 100);

        let prepared = ContextRevision::Junkrat.prepare(&config, &viewport);

        assert_eq!(prepared.get("x"), Some(&Value::Number(400.0)));
        assert_eq!(prepared.get("y"), Some(&Value::Number(150.0)));
        assert_eq!(prepared.get("width"), Some(&Value::Number(80.0)));
        assert_eq!(prepared.get("height"), Some(&Value::Number(120.0)));
        assert_eq!(prepared.get("fontSize"), Some(&Value::Number(30.0)));
        assert_eq!(prepared.get("fill"), Some(&Value::from("red")));
        assert_eq!(prepared.get("interval"), Some(&Value::Number(100.0)));
    }

    #[test]
    fn non_numeric_coordinates_pass_through() {
        let viewport = Viewport::new(800.0, 600.0);
        let config = Config::new().with("x", "left");
        let prepared = ContextRevision::Junkrat.prepare(&config, &viewport);
        assert_eq!(prepared.get("x"), Some(&Value::from("left")));
    }

    #[test]
    fn revision_tag() {
        assert_eq!(ContextRevision::default().feature_tag(), "context:junkrat");
    }
}
