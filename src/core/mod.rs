//=========================================================================
// Core Systems
//
// Everything that runs inside a tick: the entity registry, event queues,
// timer scheduler, frame contexts and the collaborator traits the engine
// talks to.
//
// Responsibilities:
// - Own entity records, queues and pending timer fires (`state`)
// - Build the capability-scoped contexts handed to programs
// - Define the renderer, input and image loader seams
// - Receive host messages over the platform bridge
//
// Notes:
// All of it is single-threaded. The only cross-thread traffic is host
// messages (input, interactions, image loads) arriving on a channel and
// applied at the top of the next tick.
//
//=========================================================================

//=== Public Modules ======================================================

pub mod config;
pub mod context;
pub mod device;
pub mod entity;
pub mod error;
pub mod event;
pub mod features;
pub mod frame_clock;
pub mod loader;
pub mod program;
pub mod render;
pub mod timer;
pub mod viewport;

//=== Internal Modules ====================================================

pub(crate) mod platform_bridge;
pub(crate) mod state;

#[cfg(test)]
pub(crate) mod testing;

//=== Re-exports ==========================================================

pub use config::{Config, Value};
pub use context::{ContextRevision, RedrawContext, SystemStats, UpdateContext};
pub use entity::{EntityKind, Lifecycle, ShapeKind};
pub use error::{EngineError, EngineResult};
pub use event::{EventKind, EventPayload};
pub use frame_clock::{RunState, TickControl};
pub use platform_bridge::HostEvent;
pub use program::{Program, ProgramCatalog, ProgramInfo};
