//! Active-section selection for the table of contents
//!
//! The selection rule here is the single source of truth; the client script
//! in `templates/theme/post.html` implements the same rule against live DOM
//! offsets, and any change here must be mirrored there. A heading is "active" when it is the last one (in document
//! order) lying above a trigger line placed halfway down the part of the
//! viewport below the fixed header.

/// Viewport geometry at the time of selection
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Current scroll offset of the document
    pub scroll_top: f64,
    /// Visible height of the document
    pub height: f64,
    /// Height of the fixed header overlaying the top of the viewport
    pub header_height: f64,
}

impl Viewport {
    /// Document offset of the trigger line
    fn lower_bound(&self) -> f64 {
        self.scroll_top + (self.height - self.header_height) / 2.0 + self.header_height
    }
}

/// Index of the active heading given top offsets in document order, or
/// `None` when no heading lies strictly above the trigger line.
pub fn active_heading(offsets: &[f64], viewport: &Viewport) -> Option<usize> {
    let lower_bound = viewport.lower_bound();
    let mut active = None;
    for (index, &top) in offsets.iter().enumerate() {
        if top < lower_bound {
            active = Some(index);
        }
    }
    active
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        scroll_top: 0.0,
        height: 800.0,
        header_height: 56.0,
    };

    #[test]
    fn test_no_heading_above_trigger_line() {
        // trigger line at (800 - 56) / 2 + 56 = 428
        assert_eq!(active_heading(&[500.0, 900.0], &VIEWPORT), None);
    }

    #[test]
    fn test_last_qualifying_heading_wins() {
        assert_eq!(active_heading(&[100.0, 300.0, 900.0], &VIEWPORT), Some(1));
    }

    #[test]
    fn test_scrolling_advances_selection() {
        let offsets = [100.0, 600.0, 1200.0];
        assert_eq!(active_heading(&offsets, &VIEWPORT), Some(0));

        let scrolled = Viewport {
            scroll_top: 400.0,
            ..VIEWPORT
        };
        assert_eq!(active_heading(&offsets, &scrolled), Some(1));
    }

    #[test]
    fn test_bound_is_strict() {
        let at_line = Viewport {
            scroll_top: 0.0,
            height: 800.0,
            header_height: 56.0,
        };
        // exactly on the trigger line does not qualify
        assert_eq!(active_heading(&[428.0], &at_line), None);
        assert_eq!(active_heading(&[427.9], &at_line), Some(0));
    }

    #[test]
    fn test_empty_outline() {
        assert_eq!(active_heading(&[], &VIEWPORT), None);
    }
}
