//! Tree domain model.
//!
//! Nodes live in an arena addressed by [`NodeId`]. The tree-state side owns
//! structure and flags; the virtual-scroll layer writes only the computed
//! `position` / `height` of each node and the virtual root's height.

pub mod error;
pub mod events;
pub mod node;
pub mod tree;
pub mod types;

// Re-export for convenience
pub use events::{Subscription, SubscriptionId, TreeEvent};
pub use node::{Node, VirtualRoot};
pub use tree::{TreeModel, TreeOptions, TreeState};
pub use types::{NodeId, Pixels};
