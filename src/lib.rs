//! treescroll
//!
//! Virtual-scroll windowing for hierarchical tree views: computes node
//! positions, the buffered slice of nodes near the viewport, and a
//! block-quantized scroll state that stays inside content bounds.
//!
//! The core (`model`, `virtual_scroll`) is pure and infallible. `config`,
//! `logging`, `source` and `report` are the edges used by the binary.

pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod source;
pub mod virtual_scroll;

#[cfg(test)]
mod tests;
