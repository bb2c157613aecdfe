//! Tree change notifications.
//!
//! The tree-state side broadcasts a [`TreeEvent`] whenever something that
//! affects layout changes. Consumers hold a [`Subscription`] and drain it
//! before recomputing. Delivery uses `std::sync::mpsc`, so a dropped
//! subscription simply stops receiving and is pruned on the next broadcast.

use super::types::NodeId;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// A layout-relevant change in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent {
    /// The top-level root list was replaced or reordered.
    RootsChanged,
    /// A node was expanded or collapsed.
    ExpandedChanged(NodeId),
    /// A node was hidden or shown.
    HiddenChanged(NodeId),
    /// A lazily-loaded node received its children.
    ChildrenLoaded(NodeId),
}

/// Handle identifying one subscriber on a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw id value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Receiving end of a tree subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<TreeEvent>,
}

impl Subscription {
    /// Id to pass to `unsubscribe`.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Drain every pending event without blocking.
    ///
    /// A disconnected sender (the tree unsubscribed us or was dropped) ends
    /// the drain like an empty queue.
    pub fn drain(&self) -> Vec<TreeEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// Sender side, owned by the tree-state implementation.
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Sender<TreeEvent>)>,
}

impl EventBus {
    /// Bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = mpsc::channel();
        self.subscribers.push((id, tx));
        Subscription { id, receiver: rx }
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver `event` to every live subscriber, pruning dead ones.
    pub fn emit(&mut self, event: TreeEvent) {
        self.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
    }

    /// Subscribers still registered, as of the last broadcast.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
