//! Layer 4: Array
//!
//! # Purpose
//!
//! This layer provides the array type itself and everything that operates on
//! it:
//! - The owned [`tagged::TaggedArray`] and its borrowed views
//! - Slicing and selection
//! - Reductions, transposes, reshapes, and the other shape-changing
//!   operations
//! - Element-wise combinators and operator sugar
//! - The closed set of array kinds
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
//! Layer 4: Array ← You are here
//!   ↓
//! Layer 3: Layout
//!   ↓
//! Layer 2: Axes
//!   ↓
//! Layer 1: Primitives
//! ```

/// The closed set of array kinds.
pub mod kinds;

/// The axis-tagged dense array.
pub mod tagged;

/// Borrowed array views.
pub mod view;

/// Slicing and selection.
pub mod indexing;

/// Shape- and order-changing operations.
pub mod ops;

/// Element-wise combinators and operators.
pub mod elementwise;
