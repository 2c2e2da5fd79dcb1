//=========================================================================
// Input Collaborator
//=========================================================================
//
// The stage asks the input surface for device event kinds when it is
// created and releases them when it is removed. Raw payloads come back
// to the engine as `HostEvent::Device` messages.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::EventKind;

//=== InputSource =========================================================

/// Input surface producing device-level events.
pub trait InputSource {
    /// Starts producing `kind` events.
    fn subscribe(&mut self, kind: EventKind);

    /// Stops producing `kind` events.
    fn unsubscribe(&mut self, kind: EventKind);
}

//=== DeviceSubscriptions =================================================

/// Shared set of device kinds currently wanted by the stage.
///
/// Clones share the same set, so a host can keep one clone to filter
/// its raw input while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct DeviceSubscriptions {
    kinds: Rc<RefCell<BTreeSet<EventKind>>>,
}

impl DeviceSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.kinds.borrow().contains(&kind)
    }

    /// Snapshot of the subscribed kinds.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.kinds.borrow().iter().copied().collect()
    }
}

impl InputSource for DeviceSubscriptions {
    fn subscribe(&mut self, kind: EventKind) {
        debug!("Device subscription: +{}", kind);
        self.kinds.borrow_mut().insert(kind);
    }

    fn unsubscribe(&mut self, kind: EventKind) {
        debug!("Device subscription: -{}", kind);
        self.kinds.borrow_mut().remove(&kind);
    }
}

//=========================================================================
// Tests
//=========================================================================
