//! # axarray — Axis-Tagged Dense Arrays
//!
//! Dense multidimensional arrays that know what their axes *mean*. A plain
//! numeric buffer cannot distinguish a 2-dimensional RGB image from a scalar
//! volume that happens to contain three slices; `axarray` attaches a semantic
//! tag (spatial X/Y/Z, channel, time, frequency, angle, or unknown) to every
//! dimension and keeps those tags correct through slicing, reduction,
//! transposition, and reshaping.
//!
//! The crate also provides the multiresolution image pyramid built on this
//! array type, with the classical Burt reduce/expand operations and their
//! Laplacian variants.
//!
//! ## Memory layouts
//!
//! Arrays are allocated in one of three canonical layouts, selected by a
//! one-character token:
//!
//! * **Row-major** (`'C'`): last axis fastest-varying.
//! * **Column-major** (`'F'`): first axis fastest-varying.
//! * **Channel-major** (`'V'`): spatial axes column-major among themselves,
//!   channel axis innermost, so vector-valued pixels occupy contiguous
//!   memory. With a single channel this degenerates to column-major.
//! * **Auto** (`'A'`): channel-major for fresh allocations, "preserve the
//!   source's layout" for copies.
//!
//! ## Quick Start
//!
//! ```rust
//! use axarray::prelude::*;
//!
//! // A 4x3 RGB image in the default channel-major layout: the channel
//! // axis is innermost, so each pixel's three samples are contiguous.
//! let image = TaggedArray::<f32>::zeros(ArrayKind::RGB_IMAGE, &[4, 3])?;
//! assert_eq!(image.shape(), &[4, 3, 3]);
//! assert_eq!(image.strides(), &[3, 12, 1]);
//! assert_eq!(image.order(), Some(MemoryOrder::ChannelMajor));
//! assert_eq!(image.channels(), 3);
//!
//! // Slicing keeps the surviving axes' tags.
//! let top = image.slice(&[Slice::range(0, 2)])?;
//! assert_eq!(top.shape(), &[2, 3, 3]);
//! assert_eq!(top.tags().len(), 3);
//! # Result::<(), ArrayError>::Ok(())
//! ```
//!
//! ## Pyramids
//!
//! ```rust
//! use axarray::prelude::*;
//!
//! let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[8, 8], 1.0)?;
//! let mut pyramid = Pyramid::new(&image, 0, 0, 0)?;
//!
//! // Smooth and subsample twice: 8x8 -> 4x4 -> 2x2.
//! pyramid.reduce(0, 2, 0.42)?;
//! assert_eq!(pyramid.get(2)?.shape(), &[2, 2]);
//! # Result::<(), ArrayError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Fallible operations return `Result<_, ArrayError>`. Errors fall into four
//! classes (shape, order, axis range, sequence), exposed via
//! [`prelude::ArrayError::class`] for callers that only need the category.
//! The `?` operator is idiomatic throughout.
//!
//! One deliberate exception: indexing operations that cannot track axis
//! provenance (reshapes, flattening selections) do not error; they degrade
//! the affected tags to `Unknown`. Losing metadata is preferred over
//! propagating wrong metadata.
//!
//! ## Axis-tag persistence
//!
//! With the `serde` feature, tag sequences round-trip through a JSON
//! exchange format (`AxisTags::to_json` / `AxisTags::from_json`) so layout
//! metadata can travel alongside stored samples.
//!
//! ## Minimal Usage (no_std)
//!
//! The crate supports `no_std` environments (with `alloc`):
//!
//! ```toml
//! [dependencies]
//! axarray = { version = "0.1", default-features = false }
//! ```
//!
//! ## Concurrency
//!
//! The crate is single-threaded and synchronous: every operation is an eager,
//! bounded-time transformation. Views borrow their parent's buffer, so "a
//! view never outlives its storage" is enforced at compile time, and
//! concurrent mutation of aliasing views cannot be expressed.
//!
//! ## References
//!
//! - Burt, P. J., Adelson, E. H. (1983). "The Laplacian Pyramid as a Compact
//!   Image Code"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - errors and raw dimension bookkeeping.
mod primitives;

// Layer 2: Axes - semantic axis metadata.
mod axes;

// Layer 3: Layout - memory orders and the resolution of construction
// requests.
mod layout;

// Layer 4: Array - the tagged array type and its operations.
mod array;

// Layer 5: Filters - kernels and separable convolution.
mod filters;

// Layer 6: Pyramid - the multiresolution stack.
mod pyramid;

// High-level fluent API for array construction.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        convolve_separable, ArrayBuilder, ArrayError, ArrayKind, ArrayView, ArrayViewMut,
        AxisInfo, AxisKind, AxisTags, ErrorClass, Kernel1d,
        MemoryOrder::{self, Auto, ChannelMajor, ColMajor, RowMajor},
        Pyramid, Slice, SpatialDims, TaggedArray, DEFAULT_BURT_CENTER,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod axes {
        pub use crate::axes::*;
    }
    pub mod layout {
        pub use crate::layout::*;
    }
    pub mod array {
        pub use crate::array::*;
    }
    pub mod filters {
        pub use crate::filters::*;
    }
    pub mod pyramid {
        pub use crate::pyramid::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
