//=========================================================================
// Viewport
//=========================================================================
//
// Drawable area handed to programs, in host pixels.
//
// When a program asks for a fixed aspect ratio the viewport is the
// largest rectangle of that ratio fitting inside the container,
// centered horizontally.
//
//=========================================================================

//=== AspectRatio =========================================================

/// Width:height proportion requested by a program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

//=== Viewport ============================================================

/// Size of the drawing surface exposed to programs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,

    /// Horizontal offset that centers the viewport in its container.
    pub margin_left: f64,
}

impl Viewport {
    /// Viewport filling the whole container.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_left: 0.0,
        }
    }

    /// Fits a viewport of the given ratio inside `container_width` ×
    /// `container_height`. Without a ratio the container is used as is.
    pub fn fit(container_width: f64, container_height: f64, ratio: Option<AspectRatio>) -> Self {
        let Some(ratio) = ratio else {
            return Self::new(container_width, container_height);
        };

        // Full height, derived width.
        let width_at_full_height = container_height / ratio.height * ratio.width;
        // Full width, derived height.
        let height_at_full_width = container_width / ratio.width * ratio.height;

        let (width, height) = if width_at_full_height > container_width {
            (container_width, height_at_full_width)
        } else {
            (width_at_full_height, container_height)
        };

        Self {
            width,
            height,
            margin_left: (container_width - width) / 2.0,
        }
    }

    /// Width divided by height; zero for a degenerate viewport.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ratio_uses_container() {
        let viewport = Viewport::fit(1024.0, 768.0, None);
        assert_eq!(viewport, Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn tall_ratio_in_wide_container_is_height_bound() {
        let viewport = Viewport::fit(1200.0, 600.0, Some(AspectRatio::new(5.0, 6.0)));
        assert_eq!(viewport.height, 600.0);
        assert_eq!(viewport.width, 500.0);
        assert_eq!(viewport.margin_left, 350.0);
    }

    #[test]
    fn wide_ratio_in_narrow_container_is_width_bound() {
        let viewport = Viewport::fit(400.0, 900.0, Some(AspectRatio::new(2.0, 1.0)));
        assert_eq!(viewport.width, 400.0);
        assert_eq!(viewport.height, 200.0);
        assert_eq!(viewport.margin_left, 0.0);
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert_eq!(Viewport::new(800.0, 400.0).aspect_ratio(), 2.0);
        assert_eq!(Viewport::new(800.0, 0.0).aspect_ratio(), 0.0);
    }
}
