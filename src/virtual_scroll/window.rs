//! Viewport window resolution
//!
//! Given a flat sibling list whose positions are already computed, find the
//! contiguous run of nodes that intersects the buffered viewport
//! `[scroll_offset - buffer, scroll_offset + viewport_height + buffer]`.
//! Two binary searches, O(log n).

use super::search::first_index_where;
use crate::model::{Node, NodeId, Pixels, TreeState};
use tracing::trace;

/// Inputs for one window resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    /// When false, the input list is returned unchanged.
    pub enabled: bool,
    /// Effective vertical scroll offset in pixels.
    pub scroll_offset: Pixels,
    /// Viewport height; `None` until the surface has been measured.
    pub viewport_height: Option<Pixels>,
    /// Extra pixels rendered above and below the viewport.
    pub buffer: Pixels,
}

/// Inclusive index bounds into the filtered (non-hidden) sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// First node in the window.
    pub first_index: usize,
    /// Last node in the window, included.
    pub last_index: usize,
}

impl WindowBounds {
    /// Number of nodes covered (bounds are inclusive).
    pub fn len(&self) -> usize {
        self.last_index + 1 - self.first_index
    }

    /// Always false: inclusive bounds cover at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `index` lies within the bounds.
    pub fn contains(&self, index: usize) -> bool {
        (self.first_index..=self.last_index).contains(&index)
    }
}

/// Result of resolving a window over a sibling list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewportWindow {
    nodes: Vec<NodeId>,
    /// `None` for empty results and for pass-through (windowing disabled).
    bounds: Option<WindowBounds>,
}

impl ViewportWindow {
    /// A window that renders nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    fn passthrough(nodes: &[NodeId]) -> Self {
        Self {
            nodes: nodes.to_vec(),
            bounds: None,
        }
    }

    /// Nodes to render, in order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Take the rendered ids.
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Index bounds into the filtered list the window was cut from.
    pub fn bounds(&self) -> Option<WindowBounds> {
        self.bounds
    }

    /// Topmost rendered node.
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Number of rendered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Find the inclusive window bounds within an already-filtered, positioned list.
///
/// `first_index` is the lowest node that starts within `buffer` of the
/// scroll offset or still spans past it. `last_index` is the lowest node,
/// searching from `first_index`, that starts more than `buffer` below the
/// viewport end. That node is itself included: the slice deliberately runs
/// one node past the buffered viewport whenever such a node exists.
///
/// Returns `None` for an empty list.
pub fn window_bounds(
    nodes: &[&Node],
    scroll_offset: Pixels,
    viewport_height: Pixels,
    buffer: Pixels,
) -> Option<WindowBounds> {
    if nodes.is_empty() {
        return None;
    }

    let first_index = first_index_where(nodes, 0, |node| {
        node.position() + buffer > scroll_offset || node.bottom() > scroll_offset
    });

    let viewport_end = scroll_offset + viewport_height;
    let last_index = first_index_where(nodes, first_index, |node| {
        node.position() - buffer > viewport_end
    });

    trace!(first_index, last_index, scroll_offset, viewport_height, "window bounds");
    Some(WindowBounds {
        first_index,
        last_index,
    })
}

/// Resolve the window over a sibling list from `tree`.
///
/// - Disabled: returns `nodes` unchanged.
/// - Unmeasured / zero viewport or empty input: returns an empty window.
/// - Otherwise hidden and unknown ids are filtered out first, then the
///   bounds from [`window_bounds`] select the contiguous slice.
pub fn resolve_window<T>(tree: &T, nodes: &[NodeId], params: &WindowParams) -> ViewportWindow
where
    T: TreeState + ?Sized,
{
    if !params.enabled {
        return ViewportWindow::passthrough(nodes);
    }

    let viewport_height = match params.viewport_height {
        Some(h) if h > 0.0 => h,
        _ => return ViewportWindow::empty(),
    };
    if nodes.is_empty() {
        return ViewportWindow::empty();
    }

    let visible: Vec<&Node> = nodes
        .iter()
        .filter_map(|&id| tree.node(id))
        .filter(|node| !node.is_hidden())
        .collect();

    let Some(bounds) = window_bounds(&visible, params.scroll_offset, viewport_height, params.buffer)
    else {
        return ViewportWindow::empty();
    };

    ViewportWindow {
        nodes: visible[bounds.first_index..=bounds.last_index]
            .iter()
            .map(|node| node.id())
            .collect(),
        bounds: Some(bounds),
    }
}
