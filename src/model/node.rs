//! Tree node and virtual root

use super::types::{NodeId, Pixels};

/// A single element of the tree.
///
/// Intrinsic data (`self_height`, children, flags) is owned by the tree-state
/// collaborator. `position` and `height` are computed by
/// [`recalc_positions`](crate::virtual_scroll::positions::recalc_positions)
/// and are read-only for everyone else.
///
/// # Invariants (after position recalculation)
/// - `height == self_height + sum(child.height for child in visible_children)` when
///   expanded with loaded children, else `height == self_height`
/// - the next sibling's `position == position + height`
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    parent: Option<NodeId>,
    self_height: Pixels,
    /// `None` until the children have been loaded.
    children: Option<Vec<NodeId>>,
    /// Children actually laid out, in layout order. Hidden children are excluded.
    visible_children: Vec<NodeId>,
    is_expanded: bool,
    is_hidden: bool,
    position: Pixels,
    height: Pixels,
}

impl Node {
    /// Create a collapsed, visible node with no loaded children.
    pub fn new(id: NodeId, name: impl Into<String>, parent: Option<NodeId>, self_height: Pixels) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            self_height,
            children: None,
            visible_children: Vec::new(),
            is_expanded: false,
            is_hidden: false,
            position: 0.0,
            height: self_height,
        }
    }

    /// Arena slot of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` for top-level nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Intrinsic pixel height of the node's own row.
    pub fn self_height(&self) -> Pixels {
        self.self_height
    }

    /// All children, or `None` if they have not been loaded yet.
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    /// True if children are loaded and at least one exists.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Replace the loaded children. Does not touch `visible_children`.
    pub fn set_children(&mut self, children: Option<Vec<NodeId>>) {
        self.children = children;
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Children that take part in layout, in order.
    pub fn visible_children(&self) -> &[NodeId] {
        &self.visible_children
    }

    /// Replace the laid-out children. Callers keep it a subset of `children`.
    pub fn set_visible_children(&mut self, visible: Vec<NodeId>) {
        self.visible_children = visible;
    }

    /// Whether the node's children are shown.
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Set the expanded flag only; the tree owner tracks the id set.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    /// Hidden nodes take no space and are never windowed.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Set the hidden flag only.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.is_hidden = hidden;
    }

    /// Whether position recalculation descends into this node's children.
    pub fn lays_out_children(&self) -> bool {
        self.children.is_some() && self.is_expanded
    }

    /// Pixel offset from the top of the full virtual content.
    pub fn position(&self) -> Pixels {
        self.position
    }

    /// Pixel span of this node plus its expanded, visible descendants.
    pub fn height(&self) -> Pixels {
        self.height
    }

    /// Offset of the first pixel after this node's subtree.
    pub fn bottom(&self) -> Pixels {
        self.position + self.height
    }

    pub(crate) fn set_position(&mut self, position: Pixels) {
        self.position = position;
    }

    pub(crate) fn set_height(&mut self, height: Pixels) {
        self.height = height;
    }
}

/// Synthetic container for the top-level roots.
///
/// Its `height` is the total scrollable content height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VirtualRoot {
    height: Pixels,
}

impl VirtualRoot {
    /// Zero-height root; the first recalculation sets the height.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total scrollable content height.
    pub fn height(&self) -> Pixels {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: Pixels) {
        self.height = height;
    }
}
