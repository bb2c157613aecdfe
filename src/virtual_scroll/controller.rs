//! Virtual-scroll controller
//!
//! Ties the three stages together as an explicit pipeline:
//!
//! 1. recalculate node positions
//! 2. resolve the root-level viewport window
//! 3. reconcile scroll bounds against the new total height
//!
//! If step 3 moves the offset, step 2 runs again so the cached window always
//! matches the settled offset. Scroll changes skip step 1.

use super::positions::recalc_positions;
use super::scroll::{ScrollState, ScrollTuning};
use super::surface::ScrollSurface;
use super::window::{resolve_window, ViewportWindow, WindowParams};
use crate::model::{NodeId, Pixels, Subscription, TreeState};
use tracing::{debug, trace};

/// Windowing state for one tree widget.
///
/// The controller does not own the tree: every operation borrows the
/// [`TreeState`] it works on. It owns the scroll state and the cached
/// root-level window.
#[derive(Debug)]
pub struct VirtualScroll<S> {
    scroll: ScrollState<S>,
    viewport: ViewportWindow,
    subscription: Option<Subscription>,
}

impl<S: ScrollSurface> VirtualScroll<S> {
    /// Detached controller with no surface yet.
    pub fn new(tuning: ScrollTuning) -> Self {
        Self {
            scroll: ScrollState::new(tuning),
            viewport: ViewportWindow::empty(),
            subscription: None,
        }
    }

    /// Subscribe to tree changes and run the pipeline once.
    ///
    /// Calling `init` again while attached only re-runs the pipeline.
    pub fn init<T>(&mut self, tree: &mut T)
    where
        T: TreeState + ?Sized,
    {
        if self.subscription.is_none() {
            self.subscription = Some(tree.subscribe());
        }
        self.refresh(tree);
    }

    /// Whether a tree subscription is held.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the tree subscription.
    ///
    /// Afterwards [`process_events`](Self::process_events) does nothing until
    /// [`init`](Self::init) is called again.
    pub fn clear<T>(&mut self, tree: &mut T)
    where
        T: TreeState + ?Sized,
    {
        if let Some(sub) = self.subscription.take() {
            tree.unsubscribe(sub.id());
            debug!(subscription = sub.id().get(), "virtual scroll detached");
        }
    }

    /// Drain pending tree events and run the pipeline if any arrived.
    ///
    /// Returns true if the pipeline ran.
    pub fn process_events<T>(&mut self, tree: &mut T) -> bool
    where
        T: TreeState + ?Sized,
    {
        let Some(sub) = self.subscription.as_ref() else {
            return false;
        };
        let events = sub.drain();
        if events.is_empty() {
            return false;
        }
        trace!(count = events.len(), ?events, "tree events");
        self.refresh(tree);
        true
    }

    /// Run the full pipeline unconditionally.
    pub fn refresh<T>(&mut self, tree: &mut T)
    where
        T: TreeState + ?Sized,
    {
        let total = recalc_positions(tree);
        self.resolve_viewport(tree);
        if self.scroll.reconcile_bounds(total) {
            self.resolve_viewport(tree);
        }
        debug!(
            total_height = total,
            offset = self.scroll.offset_pixels(),
            window = self.viewport.len(),
            "virtual scroll refreshed"
        );
    }

    /// Adopt a surface after it scrolled or resized.
    pub fn set_scroll<T>(&mut self, tree: &T, surface: S)
    where
        T: TreeState + ?Sized,
    {
        self.scroll.set_scroll(surface);
        self.settle(tree);
    }

    /// Scroll `node` into view; see [`ScrollState::scroll_to_node`].
    ///
    /// Returns true if the surface was scrolled. Unknown ids do nothing.
    pub fn scroll_to_node<T>(&mut self, tree: &T, node: NodeId, force: bool, center_in_viewport: bool) -> bool
    where
        T: TreeState + ?Sized,
    {
        let Some(node) = tree.node(node) else {
            return false;
        };
        let scrolled = self.scroll.scroll_to_node(node, force, center_in_viewport);
        if scrolled {
            self.settle(tree);
        }
        scrolled
    }

    /// Whether windowing is applied.
    pub fn is_enabled<T>(&self, tree: &T) -> bool
    where
        T: TreeState + ?Sized,
    {
        tree.use_virtual_scroll()
    }

    /// Root-level nodes to render, in order.
    pub fn viewport_nodes(&self) -> &[NodeId] {
        self.viewport.nodes()
    }

    /// Cached root-level window.
    pub fn viewport(&self) -> &ViewportWindow {
        &self.viewport
    }

    /// Vertical offset for the rendered block so the window lines up with
    /// its true scroll position. 0 when the window is empty.
    pub fn translate_y<T>(&self, tree: &T) -> Pixels
    where
        T: TreeState + ?Sized,
    {
        self.viewport
            .first()
            .and_then(|id| tree.node(id))
            .map(|node| node.position() + self.scroll.offset_pixels())
            .unwrap_or(0.0)
    }

    /// Total scrollable height, 0 without a virtual root.
    pub fn total_height<T>(&self, tree: &T) -> Pixels
    where
        T: TreeState + ?Sized,
    {
        tree.virtual_root().map(|root| root.height()).unwrap_or(0.0)
    }

    /// Resolve the window for any sibling list, e.g. an expanded node's children.
    pub fn window_for<T>(&self, tree: &T, siblings: &[NodeId]) -> ViewportWindow
    where
        T: TreeState + ?Sized,
    {
        resolve_window(tree, siblings, &self.window_params(tree))
    }

    /// Quantized scroll offset and viewport size.
    pub fn scroll_state(&self) -> &ScrollState<S> {
        &self.scroll
    }

    /// Surface adopted by the last `set_scroll`.
    pub fn surface(&self) -> Option<&S> {
        self.scroll.surface()
    }

    fn window_params<T>(&self, tree: &T) -> WindowParams
    where
        T: TreeState + ?Sized,
    {
        WindowParams {
            enabled: tree.use_virtual_scroll(),
            scroll_offset: self.scroll.offset_pixels(),
            viewport_height: self.scroll.viewport_height(),
            buffer: self.scroll.tuning().buffer,
        }
    }

    fn resolve_viewport<T>(&mut self, tree: &T)
    where
        T: TreeState + ?Sized,
    {
        self.viewport = resolve_window(tree, tree.roots(), &self.window_params(tree));
    }

    /// Reconcile bounds, then refresh the window. Positions are untouched.
    fn settle<T>(&mut self, tree: &T)
    where
        T: TreeState + ?Sized,
    {
        let total = self.total_height(tree);
        self.scroll.reconcile_bounds(total);
        self.resolve_viewport(tree);
    }
}

impl<S: ScrollSurface> Default for VirtualScroll<S> {
    fn default() -> Self {
        Self::new(ScrollTuning::default())
    }
}
