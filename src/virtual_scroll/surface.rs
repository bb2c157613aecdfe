//! Scrollable surface abstraction

use crate::model::Pixels;

/// The scroll container the tree is rendered into.
///
/// Implemented by whatever owns the real scroll position (a DOM element, a
/// terminal pane, a test double). Reads are cheap; `set_scroll_top` may
/// clamp, and callers must read `scroll_top` back afterwards.
pub trait ScrollSurface {
    /// Current vertical scroll offset.
    fn scroll_top(&self) -> Pixels;

    /// Current horizontal scroll offset.
    fn scroll_left(&self) -> Pixels;

    /// Height of the visible area.
    fn client_height(&self) -> Pixels;

    /// Request a new vertical scroll offset.
    fn set_scroll_top(&mut self, top: Pixels);
}

/// In-memory scroll container.
///
/// Clamps assigned offsets into `[0, max(0, content_height - client_height)]`
/// the same way a browser scroll container does.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemorySurface {
    scroll_top: Pixels,
    scroll_left: Pixels,
    client_height: Pixels,
    content_height: Pixels,
}

impl MemorySurface {
    /// Surface scrolled to the top.
    pub fn new(client_height: Pixels, content_height: Pixels) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            client_height,
            content_height,
        }
    }

    /// Builder-style initial offsets, clamped like `set_scroll_top`.
    pub fn with_scroll(mut self, top: Pixels, left: Pixels) -> Self {
        self.scroll_left = left.max(0.0);
        self.set_scroll_top(top);
        self
    }

    /// Full scrollable height.
    pub fn content_height(&self) -> Pixels {
        self.content_height
    }

    /// Update the scrollable extent and re-clamp the current offset.
    pub fn set_content_height(&mut self, height: Pixels) {
        self.content_height = height;
        let top = self.scroll_top;
        self.set_scroll_top(top);
    }

    fn max_scroll_top(&self) -> Pixels {
        (self.content_height - self.client_height).max(0.0)
    }
}

impl ScrollSurface for MemorySurface {
    fn scroll_top(&self) -> Pixels {
        self.scroll_top
    }

    fn scroll_left(&self) -> Pixels {
        self.scroll_left
    }

    fn client_height(&self) -> Pixels {
        self.client_height
    }

    fn set_scroll_top(&mut self, top: Pixels) {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_starts_at_origin() {
        let surface = MemorySurface::new(100.0, 1000.0);
        assert_eq!(surface.scroll_top(), 0.0);
        assert_eq!(surface.scroll_left(), 0.0);
        assert_eq!(surface.client_height(), 100.0);
    }

    #[test]
    fn set_scroll_top_clamps_negative_to_zero() {
        let mut surface = MemorySurface::new(100.0, 1000.0);
        surface.set_scroll_top(-40.0);
        assert_eq!(surface.scroll_top(), 0.0);
    }

    #[test]
    fn set_scroll_top_clamps_to_max_extent() {
        let mut surface = MemorySurface::new(100.0, 1000.0);
        surface.set_scroll_top(5000.0);
        assert_eq!(surface.scroll_top(), 900.0);
    }

    #[test]
    fn content_smaller_than_viewport_pins_to_zero() {
        let surface = MemorySurface::new(500.0, 200.0).with_scroll(50.0, 0.0);
        assert_eq!(surface.scroll_top(), 0.0);
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut surface = MemorySurface::new(100.0, 1000.0).with_scroll(800.0, 12.0);
        surface.set_content_height(400.0);
        assert_eq!(surface.scroll_top(), 300.0);
        assert_eq!(surface.scroll_left(), 12.0);
    }
}
