//! High-level API for constructing tagged arrays.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder that turns an array kind, a shape or source array, a memory-order
//! request, and an optional fill value into a fully tagged array, plus the
//! shorthand constructors built on it.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults (order `Auto`,
//!   zero initialization, tags derived from the resolved order).
//! * **Validated**: Shape, order, and tag-length contracts are checked once,
//!   in `build`.
//! * **Type-Safe**: Generic over `Float` element types.
//!
//! ## Key concepts
//!
//! * **Copy construction**: `.source(&other)` copies another array's values;
//!   with order `Auto` the source's stride ordering is preserved, including
//!   across the addition or removal of a single channel axis.
//! * **Fill override**: `.fill(v)` takes precedence over copying source
//!   values, matching the construction conventions of the surrounding
//!   ecosystem.
//!
//! ### Configuration Flow
//!
//! 1. Create a builder via [`TaggedArray::build`] with an [`ArrayKind`].
//! 2. Chain configuration methods (`.shape()`, `.source()`, `.order()`,
//!    `.fill()`, `.tags()`).
//! 3. Call `.build()` to validate and allocate.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::array::tagged::fill_by_index;
use crate::layout::resolver::{default_axistags, resolve_ordering, resolve_shape, ResolvedShape};
use crate::primitives::dims::RawDims;

// Publicly re-exported types
pub use crate::array::kinds::{ArrayKind, SpatialDims};
pub use crate::array::tagged::TaggedArray;
pub use crate::array::view::{ArrayView, ArrayViewMut};
pub use crate::axes::info::{AxisInfo, AxisKind};
pub use crate::axes::tags::AxisTags;
pub use crate::filters::convolve::convolve_separable;
pub use crate::filters::kernel::{Kernel1d, DEFAULT_BURT_CENTER};
pub use crate::layout::order::MemoryOrder;
pub use crate::primitives::errors::{ArrayError, ErrorClass};
pub use crate::primitives::slices::Slice;
pub use crate::pyramid::Pyramid;

// ============================================================================
// ArrayBuilder
// ============================================================================

/// Fluent builder for tagged arrays.
#[derive(Debug, Clone)]
pub struct ArrayBuilder<'a, A> {
    /// The kind being constructed.
    kind: ArrayKind,

    /// Requested shape; defaults to the source's shape.
    shape: Option<Vec<usize>>,

    /// Source array to copy values (and, under `Auto`, layout) from.
    source: Option<&'a TaggedArray<A>>,

    /// Requested memory order.
    order: MemoryOrder,

    /// Fill value; takes precedence over copying source values.
    fill: Option<A>,

    /// Explicit tags; default tags are derived from the resolved order.
    tags: Option<AxisTags>,
}

impl<A: Float> TaggedArray<A> {
    /// Start building an array of the given kind.
    pub fn build<'a>(kind: ArrayKind) -> ArrayBuilder<'a, A> {
        ArrayBuilder {
            kind,
            shape: None,
            source: None,
            order: MemoryOrder::Auto,
            fill: None,
            tags: None,
        }
    }

    /// A zero-filled array of the given kind and shape in the default
    /// (channel-major) layout.
    pub fn zeros(kind: ArrayKind, shape: &[usize]) -> Result<Self, ArrayError> {
        Self::build(kind).shape(shape).build()
    }

    /// An array of the given kind and shape with every element set to
    /// `value`.
    pub fn from_elem(kind: ArrayKind, shape: &[usize], value: A) -> Result<Self, ArrayError> {
        Self::build(kind).shape(shape).fill(value).build()
    }

    /// An array of the given kind and shape filled from a function of the
    /// logical multi-index.
    pub fn from_shape_fn<F>(
        kind: ArrayKind,
        shape: &[usize],
        order: MemoryOrder,
        f: F,
    ) -> Result<Self, ArrayError>
    where
        F: FnMut(&[usize]) -> A,
    {
        let resolved = resolve_shape(shape, kind.spatial_dimensions(), kind.channels())?;
        let ordering = resolve_ordering(order, &resolved, None)?;
        let (data, dims) = fill_by_index(&resolved.shape, &ordering, f);
        let tags = default_axistags(
            kind.spatial_dimensions(),
            resolved.has_channel_axis,
            effective_order(order),
        );
        Ok(TaggedArray::from_parts(data, dims, tags))
    }
}

impl<'a, A: Float> ArrayBuilder<'a, A> {
    /// Set the requested shape.
    pub fn shape(mut self, shape: &[usize]) -> Self {
        self.shape = Some(shape.to_vec());
        self
    }

    /// Copy values (and, under `Auto`, the stride ordering) from `source`.
    pub fn source(mut self, source: &'a TaggedArray<A>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the requested memory order.
    pub fn order(mut self, order: MemoryOrder) -> Self {
        self.order = order;
        self
    }

    /// Fill every element with `value` instead of zeros or source values.
    pub fn fill(mut self, value: A) -> Self {
        self.fill = Some(value);
        self
    }

    /// Use an explicit tag sequence instead of the derived default.
    pub fn tags(mut self, tags: AxisTags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Validate the configuration and allocate the array.
    pub fn build(self) -> Result<TaggedArray<A>, ArrayError> {
        let requested: Vec<usize> = match (&self.shape, self.source) {
            (Some(shape), _) => shape.clone(),
            (None, Some(source)) => source.shape().to_vec(),
            (None, None) => return Err(ArrayError::MissingShape),
        };

        let spatial = self.kind.spatial_dimensions();
        let resolved = resolve_shape(&requested, spatial, self.kind.channels())?;
        let rank = resolved.shape.len();

        let source_ordering = self.source.map(|s| s.dims.ordering());
        let ordering = resolve_ordering(self.order, &resolved, source_ordering.as_deref())?;

        let (data, dims) = match (self.source, self.fill) {
            (_, Some(value)) => {
                let dims = RawDims::from_ordering(resolved.shape.clone(), &ordering);
                (vec![value; dims.len()], dims)
            }
            (Some(source), None) => copy_source(source, &resolved, &ordering)?,
            (None, None) => {
                let dims = RawDims::from_ordering(resolved.shape.clone(), &ordering);
                (vec![A::zero(); dims.len()], dims)
            }
        };

        let tags = match self.tags {
            Some(tags) => {
                if tags.len() != rank {
                    return Err(ArrayError::TagLengthMismatch {
                        tags: tags.len(),
                        ndim: rank,
                    });
                }
                tags
            }
            None => derive_tags(self.source, &resolved, spatial, self.order)?,
        };

        Ok(TaggedArray::from_parts(data, dims, tags))
    }
}

// ============================================================================
// Build Helpers
// ============================================================================

/// Copy source values into a fresh buffer with the resolved layout.
///
/// Equal ranks copy at matching logical indices. A target with one extra
/// trailing channel axis replicates the source across the channels; a target
/// that dropped a trailing extent-1 axis reads the source squeezed.
fn copy_source<A: Float>(
    source: &TaggedArray<A>,
    resolved: &ResolvedShape,
    ordering: &[usize],
) -> Result<(Vec<A>, RawDims), ArrayError> {
    let rank = resolved.shape.len();
    let sr = source.ndim();
    let mismatch = || ArrayError::ShapeMismatch {
        left: resolved.shape.clone(),
        right: source.shape().to_vec(),
    };

    if sr == rank {
        if source.shape() != &resolved.shape[..] {
            return Err(mismatch());
        }
        Ok(fill_by_index(&resolved.shape, ordering, |index| {
            source.data[source.dims.offset_of(index)]
        }))
    } else if sr + 1 == rank {
        if source.shape() != &resolved.shape[..rank - 1] {
            return Err(mismatch());
        }
        Ok(fill_by_index(&resolved.shape, ordering, |index| {
            source.data[source.dims.offset_of(&index[..rank - 1])]
        }))
    } else if sr == rank + 1 {
        if source.shape()[sr - 1] != 1 || &source.shape()[..rank] != &resolved.shape[..] {
            return Err(mismatch());
        }
        let mut padded = vec![0usize; sr];
        Ok(fill_by_index(&resolved.shape, ordering, |index| {
            padded[..rank].copy_from_slice(index);
            source.data[source.dims.offset_of(&padded)]
        }))
    } else {
        Err(mismatch())
    }
}

/// Tags for a built array when none were given explicitly.
fn derive_tags<A: Float>(
    source: Option<&TaggedArray<A>>,
    resolved: &ResolvedShape,
    spatial: usize,
    order: MemoryOrder,
) -> Result<AxisTags, ArrayError> {
    let rank = resolved.shape.len();
    match source {
        Some(source) if source.ndim() == rank => Ok(source.tags().clone()),
        Some(source) if source.ndim() + 1 == rank => {
            let mut tags = source.tags().clone();
            tags.insert(rank - 1, AxisInfo::channel())?;
            Ok(tags)
        }
        Some(source) if source.ndim() == rank + 1 => {
            let mut tags = source.tags().clone();
            tags.remove(rank)?;
            Ok(tags)
        }
        _ => Ok(default_axistags(
            spatial,
            resolved.has_channel_axis,
            effective_order(order),
        )),
    }
}

/// The order that decides default tags: `Auto` without a source means a
/// fresh channel-major allocation.
fn effective_order(order: MemoryOrder) -> MemoryOrder {
    match order {
        MemoryOrder::Auto => MemoryOrder::ChannelMajor,
        concrete => concrete,
    }
}
