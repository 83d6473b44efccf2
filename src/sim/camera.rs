//! Follow camera
//!
//! The track content is wider than the viewport. The camera scrolls the content so
//! the followed car sits slightly left of center, never past either content edge.

use serde::{Deserialize, Serialize};

/// Viewport and content widths, captured once per race start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub view_width: f64,
    pub content_width: f64,
}

impl Viewport {
    /// Derive geometry from the host layout: content covers the padded track
    /// and is never narrower than the view.
    pub fn from_layout(view_width: f64, track_length: f64, padding: f64) -> Self {
        let view_width = view_width.max(0.0);
        Self {
            view_width,
            content_width: (track_length + padding).max(view_width),
        }
    }

    /// Largest valid scroll offset
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.view_width).max(0.0)
    }
}

/// Horizontal content offset that keeps `car_x` in frame
pub fn follow_offset(car_x: f64, lead: f64, viewport: &Viewport) -> f64 {
    (car_x + lead - viewport.view_width * 0.5).clamp(0.0, viewport.max_offset())
}

/// Camera output for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraTransform {
    /// Content scroll offset (pixels, content moves left by this much)
    pub offset: f64,
    /// Linear transition hint (ms)
    pub transition_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_content_width() {
        let vp = Viewport::from_layout(800.0, 1600.0, 200.0);
        assert_eq!(vp.content_width, 1800.0);
        assert_eq!(vp.max_offset(), 1000.0);

        // Wide screens see the whole track
        let vp = Viewport::from_layout(2400.0, 1600.0, 200.0);
        assert_eq!(vp.content_width, 2400.0);
        assert_eq!(vp.max_offset(), 0.0);
    }

    #[test]
    fn test_follow_clamps_at_end() {
        let vp = Viewport {
            view_width: 800.0,
            content_width: 1800.0,
        };
        // raw target = 1400 + 160 - 400 = 1160
        assert_eq!(follow_offset(1400.0, 160.0, &vp), 1000.0);

        let roomy = Viewport {
            view_width: 800.0,
            content_width: 3000.0,
        };
        assert_eq!(follow_offset(1400.0, 160.0, &roomy), 1160.0);
    }

    #[test]
    fn test_follow_clamps_at_start() {
        let vp = Viewport::from_layout(800.0, 1600.0, 200.0);
        assert_eq!(follow_offset(0.0, 160.0, &vp), 0.0);
        assert_eq!(follow_offset(240.0, 160.0, &vp), 0.0);
        assert_eq!(follow_offset(500.0, 160.0, &vp), 260.0);
    }

    #[test]
    fn test_degenerate_viewport() {
        let vp = Viewport {
            view_width: 900.0,
            content_width: 600.0,
        };
        assert_eq!(follow_offset(1600.0, 160.0, &vp), 0.0);
    }
}
