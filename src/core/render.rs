//=========================================================================
// Rendering Collaborator
//=========================================================================
//
// The engine never draws. It issues add/mutate/destroy/listen/repaint
// requests to a `Renderer` and leaves geometry to the implementation.
//
// Interaction events (click, tap, ...) flow back to the engine as
// `HostEvent::Interaction` messages tagged with the drawable id, which
// the registry resolves to the owning identifier at delivery time.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::config::Attributes;
use super::entity::ShapeKind;
use super::event::EventKind;
use super::loader::ImageData;

//=== DrawableId ==========================================================

/// Engine-assigned handle of a drawable owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u64);

//=== Renderer ============================================================

/// Drawing backend driven by the engine.
pub trait Renderer {
    /// Adds a drawable. `image` is set for image shapes only.
    fn add_drawable(
        &mut self,
        id: DrawableId,
        shape: ShapeKind,
        attributes: &Attributes,
        image: Option<&ImageData>,
    );

    /// Merges `attributes` into an existing drawable.
    fn set_attributes(&mut self, id: DrawableId, attributes: &Attributes);

    /// Destroys a drawable and releases its resources.
    fn destroy_drawable(&mut self, id: DrawableId);

    /// Starts reporting `kind` interactions on the drawable to the engine.
    fn listen(&mut self, id: DrawableId, kind: EventKind);

    /// Repaints the scene. Called once per tick.
    fn repaint(&mut self);
}

//=== HeadlessRenderer ====================================================

/// Renderer that only keeps the drawable table.
///
/// Used when no drawing backend is configured; useful for servers and
/// for inspecting what a program built.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    drawables: HashMap<DrawableId, (ShapeKind, Attributes)>,
    repaints: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn attributes(&self, id: DrawableId) -> Option<&Attributes> {
        self.drawables.get(&id).map(|(_, attrs)| attrs)
    }

    pub fn repaints(&self) -> u64 {
        self.repaints
    }
}

impl Renderer for HeadlessRenderer {
    fn add_drawable(
        &mut self,
        id: DrawableId,
        shape: ShapeKind,
        attributes: &Attributes,
        _image: Option<&ImageData>,
    ) {
        trace!("headless: add {:?} as {}", id, shape.as_str());
        self.drawables.insert(id, (shape, attributes.clone()));
    }

    fn set_attributes(&mut self, id: DrawableId, attributes: &Attributes) {
        if let Some((_, current)) = self.drawables.get_mut(&id) {
            current.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    fn destroy_drawable(&mut self, id: DrawableId) {
        trace!("headless: destroy {:?}", id);
        self.drawables.remove(&id);
    }

    fn listen(&mut self, _id: DrawableId, _kind: EventKind) {}

    fn repaint(&mut self) {
        self.repaints += 1;
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Value;

    fn attrs(pairs: &[(&str, f64)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::Number(*v)))
            .collect()
    }

    #[test]
    fn set_attributes_merges() {
        let mut renderer = HeadlessRenderer::new();
        let id = DrawableId(1);
        renderer.add_drawable(id, ShapeKind::Rect, &attrs(&[("x", 1.0), ("y", 2.0)]), None);

        renderer.set_attributes(id, &attrs(&[("y", 5.0)]));

        let current = renderer.attributes(id).expect("drawable");
        assert_eq!(current.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(current.get("y"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn destroy_forgets_drawable() {
        let mut renderer = HeadlessRenderer::new();
        renderer.add_drawable(DrawableId(7), ShapeKind::Text, &Attributes::new(), None);
        renderer.destroy_drawable(DrawableId(7));
        assert_eq!(renderer.drawable_count(), 0);
    }

    #[test]
    fn repaint_is_counted() {
        let mut renderer = HeadlessRenderer::new();
        renderer.repaint();
        renderer.repaint();
        assert_eq!(renderer.repaints(), 2);
    }
}
