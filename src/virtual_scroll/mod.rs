//! Virtual-scroll windowing for tree widgets
//!
//! Computes which slice of a large tree needs rendering for the current
//! scroll position, and the offsets to lay that slice out while keeping the
//! full scrollable height.
//!
//! # Module Structure
//!
//! - `search`: first-true binary search with a lower bound
//! - `positions`: depth-first position/height calculator
//! - `window`: ViewportWindow - buffered viewport slice via two binary searches
//! - `surface`: ScrollSurface trait and an in-memory implementation
//! - `scroll`: ScrollState - block-quantized offset, reveal, bounds clamping
//! - `controller`: VirtualScroll - the explicit recompute pipeline

pub mod controller;
pub mod positions;
pub mod scroll;
pub mod search;
pub mod surface;
pub mod window;

pub use controller::VirtualScroll;
pub use scroll::{ScrollState, ScrollTuning, DEFAULT_BLOCK_PX, DEFAULT_BUFFER_PX};
pub use surface::{MemorySurface, ScrollSurface};
pub use window::{ViewportWindow, WindowBounds, WindowParams};
