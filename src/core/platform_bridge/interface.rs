//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Host-to-core message types.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{EventKind, EventPayload};
use crate::core::loader::{ImageData, LoadTicket};
use crate::core::render::DrawableId;

//=== HostEvent ===========================================================

/// Messages sent from hosts to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Raw device input (keydown, swipe). Routed to the stage.
    Device {
        kind: EventKind,
        payload: EventPayload,
    },

    /// A user interaction on a drawable. Routed to the identifier that
    /// currently owns the drawable.
    Interaction {
        drawable: DrawableId,
        kind: EventKind,
        payload: EventPayload,
    },

    /// Completion of an asynchronous image load.
    ImageLoaded {
        ticket: LoadTicket,
        result: Result<ImageData, String>,
    },
}
