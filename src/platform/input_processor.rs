//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit input into engine host events.
//
// Architecture:
//   Winit Events → InputProcessor → HostEvent::Device → engine channel
//
// Stateful cursor tracking: mouse buttons carry no position in Winit, so
// the last `CursorMoved` position is cached and used as the swipe
// origin/end. Touches carry their own location.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, MouseButton, Touch, TouchPhase},
    keyboard::Key,
};

//=== Internal Dependencies ===============================================

use super::event_mapper::key_name;
use super::swipe::SwipeTracker;
use crate::core::event::{EventKind, EventPayload};
use crate::core::platform_bridge::HostEvent;

//=== InputProcessor ======================================================

/// Converts Winit events to device host events.
pub(crate) struct InputProcessor {
    cursor: (f64, f64),
    swipe: SwipeTracker,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: (0.0, 0.0),
            swipe: SwipeTracker::default(),
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Key presses (repeats included) become `keydown`.
    pub(crate) fn process_key(&self, key: &Key, state: ElementState) -> Option<HostEvent> {
        if state != ElementState::Pressed {
            return None;
        }
        let name = key_name(key)?;
        Some(device(EventKind::KeyDown, name))
    }

    pub(crate) fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    /// Left button press/release pairs may produce a `swipe`.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<HostEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let (x, y) = self.cursor;
        match state {
            ElementState::Pressed => {
                self.swipe.press(x, y);
                None
            }
            ElementState::Released => self.finish_swipe(x, y),
        }
    }

    pub(crate) fn process_touch(&mut self, touch: &Touch) -> Option<HostEvent> {
        let (x, y) = (touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started => {
                self.swipe.press(x, y);
                None
            }
            TouchPhase::Moved => None,
            TouchPhase::Ended => self.finish_swipe(x, y),
            TouchPhase::Cancelled => {
                self.swipe.cancel();
                None
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn finish_swipe(&mut self, x: f64, y: f64) -> Option<HostEvent> {
        let direction = self.swipe.release(x, y)?;
        Some(device(EventKind::Swipe, direction.as_str()))
    }
}

fn device(kind: EventKind, payload: impl Into<EventPayload>) -> HostEvent {
    HostEvent::Device {
        kind,
        payload: payload.into(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NamedKey;

    #[test]
    fn key_press_becomes_keydown() {
        let processor = InputProcessor::new();
        let event = processor.process_key(&Key::Named(NamedKey::ArrowDown), ElementState::Pressed);
        assert_eq!(event, Some(device(EventKind::KeyDown, "ArrowDown")));
    }

    #[test]
    fn key_release_is_ignored() {
        let processor = InputProcessor::new();
        let event = processor.process_key(&Key::Character("w".into()), ElementState::Released);
        assert_eq!(event, None);
    }

    #[test]
    fn mouse_drag_becomes_swipe() {
        let mut processor = InputProcessor::new();

        processor.process_cursor_moved(200.0, 200.0);
        assert_eq!(
            processor.process_mouse_button(MouseButton::Left, ElementState::Pressed),
            None
        );
        processor.process_cursor_moved(120.0, 210.0);
        let event = processor.process_mouse_button(MouseButton::Left, ElementState::Released);

        assert_eq!(event, Some(device(EventKind::Swipe, "left")));
    }

    #[test]
    fn right_button_does_not_swipe() {
        let mut processor = InputProcessor::new();
        processor.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        processor.process_cursor_moved(500.0, 0.0);
        assert_eq!(
            processor.process_mouse_button(MouseButton::Right, ElementState::Released),
            None
        );
    }

    #[test]
    fn click_in_place_is_not_a_swipe() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(50.0, 50.0);
        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            processor.process_mouse_button(MouseButton::Left, ElementState::Released),
            None
        );
    }
}
