//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures every other layer is built on:
//! - The error taxonomy for all array operations
//! - Raw shape/stride/offset bookkeeping and element walking
//!
//! These are self-contained building blocks with no semantic knowledge of
//! axes, layouts, or pyramids.
//!
//! # Architecture
//!
//! ```text
//! API / prelude
//!   ↓
//! Layer 6: Pyramid
//!   ↓
//! Layer 5: Filters
//!   ↓
//! Layer 4: Array
//!   ↓
//! Layer 3: Layout
//!   ↓
//! Layer 2: Axes
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error taxonomy for tagged-array operations.
pub mod errors;

/// Raw shape/stride/offset bookkeeping.
pub mod dims;

/// Per-axis slicing specifications.
pub mod slices;
