//=========================================================================
// Test Doubles
//=========================================================================
//
// Collaborators that record what the engine asked of them. Each double
// hands out a clone that shares its log, so a test keeps one clone and
// gives the other to the engine.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::config::Attributes;
use super::device::InputSource;
use super::entity::ShapeKind;
use super::event::EventKind;
use super::loader::{ImageData, ImageLoader, LoadReply};
use super::render::{DrawableId, Renderer};

//=== RecordingRenderer ===================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderCall {
    Add(DrawableId, ShapeKind, Attributes),
    Set(DrawableId, Attributes),
    Destroy(DrawableId),
    Listen(DrawableId, EventKind),
    Repaint,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingRenderer {
    calls: Rc<RefCell<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }

    pub fn repaints(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, RenderCall::Repaint))
            .count()
    }

    /// Drawables added and not yet destroyed.
    pub fn live_drawables(&self) -> Vec<DrawableId> {
        let calls = self.calls.borrow();
        let mut live = Vec::new();
        for call in calls.iter() {
            match call {
                RenderCall::Add(id, _, _) => live.push(*id),
                RenderCall::Destroy(id) => live.retain(|d| d != id),
                _ => {}
            }
        }
        live
    }
}

impl Renderer for RecordingRenderer {
    fn add_drawable(
        &mut self,
        id: DrawableId,
        shape: ShapeKind,
        attributes: &Attributes,
        _image: Option<&ImageData>,
    ) {
        self.calls
            .borrow_mut()
            .push(RenderCall::Add(id, shape, attributes.clone()));
    }

    fn set_attributes(&mut self, id: DrawableId, attributes: &Attributes) {
        self.calls
            .borrow_mut()
            .push(RenderCall::Set(id, attributes.clone()));
    }

    fn destroy_drawable(&mut self, id: DrawableId) {
        self.calls.borrow_mut().push(RenderCall::Destroy(id));
    }

    fn listen(&mut self, id: DrawableId, kind: EventKind) {
        self.calls.borrow_mut().push(RenderCall::Listen(id, kind));
    }

    fn repaint(&mut self) {
        self.calls.borrow_mut().push(RenderCall::Repaint);
    }
}

//=== RecordingInput ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputCall {
    Subscribe(EventKind),
    Unsubscribe(EventKind),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingInput {
    calls: Rc<RefCell<Vec<InputCall>>>,
}

impl RecordingInput {
    pub fn calls(&self) -> Vec<InputCall> {
        self.calls.borrow().clone()
    }
}

impl InputSource for RecordingInput {
    fn subscribe(&mut self, kind: EventKind) {
        self.calls.borrow_mut().push(InputCall::Subscribe(kind));
    }

    fn unsubscribe(&mut self, kind: EventKind) {
        self.calls.borrow_mut().push(InputCall::Unsubscribe(kind));
    }
}

//=== ManualImageLoader ===================================================

/// Loader whose requests stay pending until the test completes them.
#[derive(Debug, Clone, Default)]
pub(crate) struct ManualImageLoader {
    pending: Rc<RefCell<Vec<(String, LoadReply)>>>,
}

impl ManualImageLoader {
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Completes the oldest pending request successfully.
    pub fn complete_next(&self) {
        let next = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                None
            } else {
                Some(pending.remove(0))
            }
        };
        if let Some((url, reply)) = next {
            reply.complete(Ok(ImageData {
                source: url,
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }));
        }
    }

    /// Fails the oldest pending request.
    pub fn fail_next(&self, reason: &str) {
        let next = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                None
            } else {
                Some(pending.remove(0))
            }
        };
        if let Some((_, reply)) = next {
            reply.complete(Err(reason.to_string()));
        }
    }
}

impl ImageLoader for ManualImageLoader {
    fn load(&mut self, url: &str, reply: LoadReply) {
        self.pending.borrow_mut().push((url.to_string(), reply));
    }
}
