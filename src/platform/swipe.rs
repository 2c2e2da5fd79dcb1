//=========================================================================
// Swipe Detection
//=========================================================================
//
// Turns a pointer press/release pair into a swipe direction.
//
// The displacement's dominant axis picks the direction; displacements
// no longer than the threshold on that axis are taps, not swipes.
// Screen y grows downwards.
//
//=========================================================================

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Payload carried by the `swipe` event.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

//=== SwipeTracker ========================================================

#[derive(Debug)]
pub(crate) struct SwipeTracker {
    threshold: f64,
    origin: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub(crate) const DEFAULT_THRESHOLD: f64 = 30.0;

    pub(crate) fn new(threshold: f64) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    pub(crate) fn press(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    /// Ends the gesture. Releases without a press are ignored.
    pub(crate) fn release(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        let (start_x, start_y) = self.origin.take()?;
        let dx = x - start_x;
        let dy = y - start_y;

        if dx.abs() > dy.abs() {
            if dx.abs() <= self.threshold {
                return None;
            }
            Some(if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            })
        } else {
            if dy.abs() <= self.threshold {
                return None;
            }
            Some(if dy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            })
        }
    }

    /// Drops a gesture in progress (cancelled touch, lost focus).
    pub(crate) fn cancel(&mut self) {
        self.origin = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f64, dy: f64) -> Option<SwipeDirection> {
        let mut tracker = SwipeTracker::default();
        tracker.press(100.0, 100.0);
        tracker.release(100.0 + dx, 100.0 + dy)
    }

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(swipe(80.0, 40.0), Some(SwipeDirection::Right));
        assert_eq!(swipe(-80.0, 40.0), Some(SwipeDirection::Left));
        assert_eq!(swipe(10.0, 60.0), Some(SwipeDirection::Down));
        assert_eq!(swipe(10.0, -60.0), Some(SwipeDirection::Up));
    }

    #[test]
    fn short_moves_are_not_swipes() {
        assert_eq!(swipe(30.0, 0.0), None);
        assert_eq!(swipe(0.0, -12.0), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.release(500.0, 0.0), None);
    }

    #[test]
    fn cancel_forgets_origin() {
        let mut tracker = SwipeTracker::default();
        tracker.press(0.0, 0.0);
        tracker.cancel();
        assert_eq!(tracker.release(200.0, 0.0), None);
    }

    #[test]
    fn payload_names() {
        assert_eq!(SwipeDirection::Up.as_str(), "up");
        assert_eq!(SwipeDirection::Right.as_str(), "right");
    }
}
