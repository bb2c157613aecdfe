//! Tree-state collaborator interface and an in-memory implementation.
//!
//! The virtual-scroll layer never decides which nodes are expanded, hidden,
//! or in what order children appear. It consumes that through [`TreeState`].
//! [`TreeModel`] is a plain arena-backed implementation: it stores flags and
//! keeps `visible_children` consistent, but carries no filtering or
//! expansion policy of its own.

use super::events::{EventBus, Subscription, SubscriptionId, TreeEvent};
use super::node::{Node, VirtualRoot};
use super::types::{NodeId, Pixels};
use std::collections::HashSet;
use tracing::trace;

/// What the virtual-scroll layer needs from the tree.
pub trait TreeState {
    /// Top-level nodes in display order, hidden ones included.
    fn roots(&self) -> &[NodeId];

    /// Top-level nodes in display order, hidden ones excluded.
    fn visible_roots(&self) -> Vec<NodeId>;

    /// Look up a node; `None` for ids that were never allocated or were freed.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Mutable access for the layout pass.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node>;

    /// Synthetic root whose height is the total content height.
    fn virtual_root(&self) -> Option<&VirtualRoot>;

    /// Mutable access for writing the total height.
    fn virtual_root_mut(&mut self) -> Option<&mut VirtualRoot>;

    /// Whether windowing is applied at all.
    fn use_virtual_scroll(&self) -> bool;

    /// Start receiving layout-relevant change events.
    fn subscribe(&mut self) -> Subscription;

    /// Stop delivering events to `id`.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Tree-level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Render only the nodes near the viewport.
    pub use_virtual_scroll: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            use_virtual_scroll: true,
        }
    }
}

/// Arena-backed tree.
///
/// Slots freed by [`load_children`](TreeModel::load_children) are reused by
/// later allocations, so reloading a subtree does not grow the arena. A
/// `NodeId` held across a reload may therefore name a different node.
#[derive(Debug)]
pub struct TreeModel {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    roots: Vec<NodeId>,
    virtual_root: Option<VirtualRoot>,
    expanded_ids: HashSet<NodeId>,
    hidden_ids: HashSet<NodeId>,
    options: TreeOptions,
    events: EventBus,
}

impl TreeModel {
    /// Create an empty tree with a virtual root.
    pub fn new(options: TreeOptions) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            roots: Vec::new(),
            virtual_root: Some(VirtualRoot::new()),
            expanded_ids: HashSet::new(),
            hidden_ids: HashSet::new(),
            options,
            events: EventBus::new(),
        }
    }

    /// Tree-level options.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Turn viewport windowing on or off.
    pub fn set_use_virtual_scroll(&mut self, enabled: bool) {
        self.options.use_virtual_scroll = enabled;
    }

    /// Attach or detach the virtual root.
    pub fn set_virtual_root(&mut self, root: Option<VirtualRoot>) {
        self.virtual_root = root;
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// True if the tree holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Ids of expanded nodes.
    pub fn expanded_ids(&self) -> &HashSet<NodeId> {
        &self.expanded_ids
    }

    /// Ids of hidden nodes.
    pub fn hidden_ids(&self) -> &HashSet<NodeId> {
        &self.hidden_ids
    }

    /// First node with the given name in pre-order from the roots.
    ///
    /// Every loaded node is searched, collapsed and hidden ones included.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.slot(id) else {
                continue;
            };
            if node.name() == name {
                return Some(id);
            }
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev().copied());
            }
        }
        None
    }

    fn slot(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.get()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.get()).and_then(Option::as_mut)
    }

    fn alloc(&mut self, name: &str, parent: Option<NodeId>, self_height: Pixels) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.get()] = Some(Node::new(id, name, parent, self_height));
                id
            }
            None => {
                let id = NodeId::new(self.nodes.len());
                self.nodes.push(Some(Node::new(id, name, parent, self_height)));
                id
            }
        }
    }

    /// Free `id` and everything below it.
    fn release_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id.get()).and_then(Option::take) else {
                continue;
            };
            if let Some(children) = node.children() {
                stack.extend_from_slice(children);
            }
            self.expanded_ids.remove(&id);
            self.hidden_ids.remove(&id);
            self.free.push(id);
        }
    }

    /// Append a new top-level node.
    pub fn add_root(&mut self, name: &str, self_height: Pixels) -> NodeId {
        let id = self.alloc(name, None, self_height);
        self.roots.push(id);
        self.events.emit(TreeEvent::RootsChanged);
        id
    }

    /// Replace the top-level order. Unknown ids are dropped.
    pub fn set_roots(&mut self, roots: Vec<NodeId>) {
        self.roots = roots
            .into_iter()
            .filter(|&id| self.slot(id).is_some())
            .collect();
        self.events.emit(TreeEvent::RootsChanged);
    }

    /// Append a child to `parent`, marking the parent's children as loaded.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn add_child(&mut self, parent: NodeId, name: &str, self_height: Pixels) -> Option<NodeId> {
        self.slot(parent)?;
        let id = self.alloc(name, Some(parent), self_height);
        self.slot_mut(parent)?.push_child(id);
        self.refresh_visible_children(parent);
        self.events.emit(TreeEvent::ChildrenLoaded(parent));
        Some(id)
    }

    /// Complete a lazy load: replace `parent`'s children with fresh nodes.
    ///
    /// The previous children and their subtrees are freed. Returns the new
    /// child ids, or an empty list if `parent` does not exist.
    pub fn load_children(&mut self, parent: NodeId, children: &[(&str, Pixels)]) -> Vec<NodeId> {
        let Some(old) = self.slot(parent).map(|p| p.children().map(<[NodeId]>::to_vec)) else {
            return Vec::new();
        };
        for child in old.into_iter().flatten() {
            self.release_subtree(child);
        }

        let ids: Vec<NodeId> = children
            .iter()
            .map(|(name, height)| self.alloc(name, Some(parent), *height))
            .collect();
        if let Some(node) = self.slot_mut(parent) {
            node.set_children(Some(ids.clone()));
        }
        self.refresh_visible_children(parent);
        trace!(parent = %parent, count = ids.len(), live = self.len(), "children loaded");
        self.events.emit(TreeEvent::ChildrenLoaded(parent));
        ids
    }

    /// Expand or collapse a node. Returns true if the state changed.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        let Some(node) = self.slot_mut(id) else {
            return false;
        };
        if node.is_expanded() == expanded {
            return false;
        }
        node.set_expanded(expanded);
        if expanded {
            self.expanded_ids.insert(id);
        } else {
            self.expanded_ids.remove(&id);
        }
        self.events.emit(TreeEvent::ExpandedChanged(id));
        true
    }

    /// Hide or show a node. Returns true if the state changed.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        let Some(node) = self.slot_mut(id) else {
            return false;
        };
        if node.is_hidden() == hidden {
            return false;
        }
        node.set_hidden(hidden);
        let parent = node.parent();
        if hidden {
            self.hidden_ids.insert(id);
        } else {
            self.hidden_ids.remove(&id);
        }
        if let Some(parent) = parent {
            self.refresh_visible_children(parent);
        }
        self.events.emit(TreeEvent::HiddenChanged(id));
        true
    }

    /// Rebuild `visible_children` as children minus hidden ones, order kept.
    fn refresh_visible_children(&mut self, parent: NodeId) {
        let visible: Vec<NodeId> = match self.slot(parent).and_then(Node::children) {
            Some(children) => children
                .iter()
                .copied()
                .filter(|&c| self.slot(c).is_some_and(|n| !n.is_hidden()))
                .collect(),
            None => Vec::new(),
        };
        if let Some(node) = self.slot_mut(parent) {
            node.set_visible_children(visible);
        }
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new(TreeOptions::default())
    }
}

impl TreeState for TreeModel {
    fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    fn visible_roots(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .copied()
            .filter(|&id| self.slot(id).is_some_and(|n| !n.is_hidden()))
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slot(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slot_mut(id)
    }

    fn virtual_root(&self) -> Option<&VirtualRoot> {
        self.virtual_root.as_ref()
    }

    fn virtual_root_mut(&mut self) -> Option<&mut VirtualRoot> {
        self.virtual_root.as_mut()
    }

    fn use_virtual_scroll(&self) -> bool {
        self.options.use_virtual_scroll
    }

    fn subscribe(&mut self) -> Subscription {
        self.events.subscribe()
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }
}
