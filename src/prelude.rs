//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use frame_runtime::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::frame_clock::{RunState, TickControl};

// Programs and contexts
pub use crate::core::context::{ContextRevision, RedrawContext, SystemStats, UpdateContext};
pub use crate::core::program::{Program, ProgramCatalog, ProgramInfo};

// Entities and events
pub use crate::core::config::{Config, Value};
pub use crate::core::entity::EntityKind;
pub use crate::core::event::{EventKind, EventPayload};

// Errors
pub use crate::core::error::{EngineError, EngineResult};

// Collaborators
pub use crate::core::device::InputSource;
pub use crate::core::loader::{ImageData, ImageLoader, LoadReply};
pub use crate::core::render::{DrawableId, Renderer};
pub use crate::core::HostEvent;
