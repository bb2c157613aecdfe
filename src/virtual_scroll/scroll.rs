//! Quantized scroll state
//!
//! Vertical scroll is tracked in whole blocks of `block_size` pixels rather
//! than raw pixels, so the window only needs recomputing once the user has
//! scrolled past a full block.

use super::surface::ScrollSurface;
use crate::model::{Node, Pixels};
use tracing::debug;

/// Default extra pixels rendered above and below the viewport.
pub const DEFAULT_BUFFER_PX: Pixels = 300.0;

/// Default minimum scroll delta (in pixels) that moves the tracked offset.
pub const DEFAULT_BLOCK_PX: Pixels = 50.0;

/// Tunable constants for windowing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTuning {
    /// Lookahead/lookbehind margin around the viewport.
    pub buffer: Pixels,
    /// Quantization step for the vertical offset. Always > 0.
    pub block_size: Pixels,
}

impl ScrollTuning {
    /// Non-positive (or NaN) block sizes fall back to [`DEFAULT_BLOCK_PX`].
    pub fn new(buffer: Pixels, block_size: Pixels) -> Self {
        let block_size = if block_size > 0.0 {
            block_size
        } else {
            DEFAULT_BLOCK_PX
        };
        Self {
            buffer: buffer.max(0.0),
            block_size,
        }
    }
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_PX, DEFAULT_BLOCK_PX)
    }
}

/// Where the viewport is, in block-quantized form.
///
/// # Invariants
/// After [`reconcile_bounds`](Self::reconcile_bounds):
/// `0 <= offset_pixels() <= max(0, total_height - viewport_height)`.
#[derive(Debug, Clone)]
pub struct ScrollState<S> {
    /// Whole blocks after user scrolls; may be fractional after reconciliation.
    offset_blocks: f64,
    horizontal_offset: Pixels,
    viewport_height: Option<Pixels>,
    surface: Option<S>,
    tuning: ScrollTuning,
}

impl<S: ScrollSurface> ScrollState<S> {
    /// Offset 0 with no surface attached.
    pub fn new(tuning: ScrollTuning) -> Self {
        Self {
            offset_blocks: 0.0,
            horizontal_offset: 0.0,
            viewport_height: None,
            surface: None,
            tuning,
        }
    }

    /// Buffer and block size in use.
    pub fn tuning(&self) -> ScrollTuning {
        self.tuning
    }

    /// Vertical offset in blocks.
    pub fn offset_blocks(&self) -> f64 {
        self.offset_blocks
    }

    /// Effective vertical offset used for windowing.
    pub fn offset_pixels(&self) -> Pixels {
        self.offset_blocks * self.tuning.block_size
    }

    /// Horizontal offset, passed through unquantized.
    pub fn horizontal_offset(&self) -> Pixels {
        self.horizontal_offset
    }

    /// `None` until a surface has been handed to [`set_scroll`](Self::set_scroll).
    pub fn viewport_height(&self) -> Option<Pixels> {
        self.viewport_height
    }

    /// The adopted surface, if any.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Adopt `surface` and sample its scroll offsets and size.
    ///
    /// The vertical offset is rounded to the nearest block (ties round up).
    pub fn set_scroll(&mut self, surface: S) {
        self.horizontal_offset = surface.scroll_left();
        self.offset_blocks = (surface.scroll_top() / self.tuning.block_size + 0.5).floor();
        self.viewport_height = Some(surface.client_height());
        self.surface = Some(surface);
    }

    /// Scroll the surface so `node` is visible.
    ///
    /// Does nothing unless `force` is set or the node's own row lies above
    /// the viewport top or below the viewport bottom. Otherwise the surface
    /// is scrolled to center the node (`center_in_viewport`) or put it flush
    /// at the top, and the block offset is re-derived from the offset the
    /// surface actually accepted, rounding down so the node stays in view.
    ///
    /// Returns true if the surface was scrolled.
    pub fn scroll_to_node(&mut self, node: &Node, force: bool, center_in_viewport: bool) -> bool {
        let top = self.offset_pixels();
        let viewport_height = self.viewport_height.unwrap_or(0.0);

        let above = node.position() < top;
        let below = node.position() + node.self_height() > top + viewport_height;
        if !(force || above || below) {
            return false;
        }

        let target = if center_in_viewport {
            node.position() - viewport_height / 2.0
        } else {
            node.position()
        };

        let block_size = self.tuning.block_size;
        let Some(surface) = self.surface.as_mut() else {
            debug!(node = %node.id(), "scroll_to_node without a surface");
            return false;
        };
        surface.set_scroll_top(target);
        self.offset_blocks = (surface.scroll_top() / block_size).floor();

        debug!(
            node = %node.id(),
            target_px = target,
            offset_blocks = self.offset_blocks,
            "scrolled node into view"
        );
        true
    }

    /// Clamp the effective offset into `[0, max(0, total_height - viewport_height)]`.
    ///
    /// Returns true if the offset changed.
    pub fn reconcile_bounds(&mut self, total_height: Pixels) -> bool {
        let max_offset = (total_height - self.viewport_height.unwrap_or(0.0)).max(0.0);
        let before = self.offset_blocks;

        if self.offset_pixels() < 0.0 {
            self.offset_blocks = 0.0;
        }
        if self.offset_pixels() > max_offset {
            self.offset_blocks = max_offset / self.tuning.block_size;
        }

        self.offset_blocks != before
    }
}
