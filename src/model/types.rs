//! Core tree newtypes

use std::fmt;

/// Pixel quantity. Offsets, heights and scroll positions all share this unit.
///
/// Fractional values are allowed: centering a node in the viewport halves
/// the viewport height, and surfaces may report sub-pixel scroll offsets.
pub type Pixels = f64;

/// Index of a node within its tree's arena. 0-indexed.
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(usize);

impl NodeId {
    /// Create a new NodeId from a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena index.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
