//! Layer 2: Axes
//!
//! # Purpose
//!
//! This layer provides the semantic axis metadata attached to every array:
//! - Per-axis descriptions (spatial, channel, temporal, ...)
//! - Ordered tag sequences and their updates under array operations
//!
//! Nothing here knows about buffers or strides; tags describe meaning, not
//! memory.
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
//! Layer 2: Axes ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-axis semantic descriptions.
pub mod info;

/// Ordered axis-tag sequences.
pub mod tags;
