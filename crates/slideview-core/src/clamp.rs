#![forbid(unsafe_code)]

//! Horizontal range clamping for the content pane.
//!
//! The content pane rests at offset `0` when closed and slides left up to the
//! rear pane's width when open, so the legal range is `[-slide_width, 0]`.

/// Clamp a requested content offset into `[-slide_width, 0]`.
///
/// Negative widths collapse the range to `[0, 0]`.
#[inline]
#[must_use]
pub fn clamp(requested: i32, slide_width: i32) -> i32 {
    let slide_width = slide_width.max(0);
    requested.max(-slide_width).min(0)
}

/// Horizontal drag budget for the content pane.
///
/// Equal to the content width today. Kept separate so settle timing can be
/// scaled against a budget that differs from the visual width.
#[inline]
#[must_use]
pub fn drag_range(content_width: i32) -> i32 {
    content_width.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_range_is_unchanged() {
        assert_eq!(clamp(-40, 100), -40);
        assert_eq!(clamp(0, 100), 0);
        assert_eq!(clamp(-100, 100), -100);
    }

    #[test]
    fn rightward_overdrag_pins_at_zero() {
        assert_eq!(clamp(25, 100), 0);
        assert_eq!(clamp(i32::MAX, 100), 0);
    }

    #[test]
    fn leftward_overdrag_pins_at_slide_width() {
        assert_eq!(clamp(-180, 100), -100);
        assert_eq!(clamp(i32::MIN, 100), -100);
    }

    #[test]
    fn degenerate_width_collapses_range() {
        assert_eq!(clamp(-10, 0), 0);
        assert_eq!(clamp(-10, -50), 0);
        assert_eq!(clamp(10, -50), 0);
    }

    #[test]
    fn drag_range_is_content_width() {
        assert_eq!(drag_range(300), 300);
        assert_eq!(drag_range(0), 0);
        assert_eq!(drag_range(-5), 0);
    }
}
