//! The axis-tagged dense array.
//!
//! ## Purpose
//!
//! This module defines [`TaggedArray`], the owned array value that pairs a
//! contiguous numeric buffer with its shape, element strides, and a semantic
//! tag per axis. Everything the crate does is a transformation of this type.
//!
//! ## Design notes
//!
//! * **Tags travel with the value**: Every constructor and accessor keeps the
//!   tag count equal to the dimensionality; operations that change shape or
//!   order update the tags in the same call.
//! * **Kind is derived**: The array kind (ScalarImage, Vector3Volume, ...) is
//!   recovered from the tags on demand rather than stored, so it can never
//!   disagree with them.
//! * **Storage-order construction**: New arrays are filled by walking the
//!   target layout in increasing buffer offset while reading sources through
//!   their own strides, which gives a single allocation path for every
//!   requested order.
//!
//! ## Key concepts
//!
//! * **Order query**: [`TaggedArray::order`] classifies the current strides
//!   against the canonical patterns and refuses to guess when none matches.
//! * **Canonicalization**: [`TaggedArray::transpose_to_order`] permutes axes
//!   to reach a canonical order; the channel-major target consults the tags,
//!   because tag order and stride order can diverge after a transpose.
//!
//! ## Invariants
//!
//! * `tags().len() == ndim()` unconditionally.
//! * The buffer holds exactly `len()` elements; views borrow it, they never
//!   outlive it.
//!
//! ## Non-goals
//!
//! * This module does not implement slicing, reductions, or arithmetic; see
//!   the sibling modules.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::cast::AsPrimitive;

// Internal dependencies
use crate::array::kinds::ArrayKind;
use crate::array::view::{ArrayView, ArrayViewMut};
use crate::axes::tags::AxisTags;
use crate::layout::order::{classify, MemoryOrder};
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;

// ============================================================================
// TaggedArray
// ============================================================================

/// An owned dense array with one semantic tag per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedArray<A> {
    pub(crate) data: Vec<A>,
    pub(crate) dims: RawDims,
    pub(crate) tags: AxisTags,
}

impl<A: Copy> TaggedArray<A> {
    /// Assemble an array from raw parts.
    ///
    /// Internal constructor; callers are responsible for the tag-length and
    /// buffer-size invariants.
    pub(crate) fn from_parts(data: Vec<A>, dims: RawDims, tags: AxisTags) -> Self {
        debug_assert_eq!(tags.len(), dims.ndim());
        debug_assert_eq!(data.len(), dims.len());
        Self { data, dims, tags }
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Extent of each axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.dims.shape
    }

    /// Element stride of each axis.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.dims.strides
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.ndim()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Whether the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// The axis tags.
    #[inline]
    pub fn tags(&self) -> &AxisTags {
        &self.tags
    }

    /// The raw buffer in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[A] {
        &self.data
    }

    // ========================================================================
    // Semantic Accessors
    // ========================================================================

    /// Number of spatial axes, per the tags.
    #[inline]
    pub fn spatial_dimensions(&self) -> usize {
        self.tags.spatial_count()
    }

    /// Channel count: the extent of the channel axis, or 1 when no channel
    /// axis is tagged.
    pub fn channels(&self) -> usize {
        match self.tags.channel_axis() {
            Some(axis) => self.dims.shape[axis],
            None => 1,
        }
    }

    /// The array kind recovered from the tags, when the tag signature is one
    /// of the supported kinds.
    pub fn kind(&self) -> Option<ArrayKind> {
        let spatial = self.spatial_dimensions();
        if spatial + self.tags.channel_axis().map_or(0, |_| 1) != self.ndim() {
            return None;
        }
        ArrayKind::from_signature(spatial, self.channels())
    }

    /// Extent of the X-tagged axis.
    pub fn width(&self) -> Option<usize> {
        self.extent_of(crate::axes::info::AxisKind::X)
    }

    /// Extent of the Y-tagged axis.
    pub fn height(&self) -> Option<usize> {
        self.extent_of(crate::axes::info::AxisKind::Y)
    }

    /// Extent of the Z-tagged axis.
    pub fn depth(&self) -> Option<usize> {
        self.extent_of(crate::axes::info::AxisKind::Z)
    }

    fn extent_of(&self, kind: crate::axes::info::AxisKind) -> Option<usize> {
        self.tags
            .as_slice()
            .iter()
            .position(|t| t.kind == kind)
            .map(|axis| self.dims.shape[axis])
    }

    // ========================================================================
    // Element Access
    // ========================================================================

    /// The element at a multi-index, if in bounds.
    pub fn get(&self, index: &[usize]) -> Option<&A> {
        if index.len() != self.ndim() {
            return None;
        }
        if index
            .iter()
            .zip(self.dims.shape.iter())
            .any(|(&i, &e)| i >= e)
        {
            return None;
        }
        Some(&self.data[self.dims.offset_of(index)])
    }

    /// Mutable access to the element at a multi-index, if in bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        if index.len() != self.ndim() {
            return None;
        }
        if index
            .iter()
            .zip(self.dims.shape.iter())
            .any(|(&i, &e)| i >= e)
        {
            return None;
        }
        let off = self.dims.offset_of(index);
        Some(&mut self.data[off])
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// A view of the whole array.
    pub fn view(&self) -> ArrayView<'_, A> {
        ArrayView {
            data: &self.data,
            dims: self.dims.clone(),
            tags: self.tags.clone(),
        }
    }

    /// A mutable view of the whole array.
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, A> {
        ArrayViewMut {
            dims: self.dims.clone(),
            tags: self.tags.clone(),
            data: &mut self.data,
        }
    }

    // ========================================================================
    // Order
    // ========================================================================

    /// Classify the current stride pattern as one of the canonical memory
    /// orders, or `None` when the layout is ambiguous or custom.
    pub fn order(&self) -> Option<MemoryOrder> {
        classify(&self.dims, self.channels())
    }

    /// Transpose axes so that the stride pattern reaches the requested
    /// canonical order.
    ///
    /// The row-major and column-major targets derive the permutation from the
    /// current strides. The channel-major target consults the tags instead
    /// (non-channel axes first in their declared order, channel last),
    /// because tag order and stride order can diverge after a transpose.
    /// The `Auto` target is the identity.
    pub fn transpose_to_order(self, target: MemoryOrder) -> Result<Self, ArrayError> {
        match target {
            MemoryOrder::Auto => Ok(self),
            MemoryOrder::ColMajor => {
                let perm = self.dims.axes_by_stride();
                self.transpose(Some(&perm))
            }
            MemoryOrder::RowMajor => {
                let mut perm = self.dims.axes_by_stride();
                perm.reverse();
                self.transpose(Some(&perm))
            }
            MemoryOrder::ChannelMajor => {
                let perm = self.tags.canonical_ordering();
                self.transpose(Some(&perm))
            }
        }
    }

    // ========================================================================
    // Copies
    // ========================================================================

    /// Copy into a fresh buffer with the requested memory order.
    ///
    /// `Auto` preserves the current stride ordering. Tags are preserved.
    pub fn copy(&self, order: MemoryOrder) -> Self {
        let ordering = match order {
            MemoryOrder::Auto => self.dims.ordering(),
            concrete => concrete.stride_ordering(
                self.ndim(),
                self.channels(),
                self.tags.channel_axis().is_some(),
            ),
        };
        let (data, dims) = collect_into_layout(&self.data, &self.dims, &ordering, |a| a);
        Self::from_parts(data, dims, self.tags.clone())
    }

    /// Copy with element conversion, preserving layout and tags.
    pub fn astype<B>(&self) -> TaggedArray<B>
    where
        A: AsPrimitive<B>,
        B: Copy + 'static,
    {
        let ordering = self.dims.ordering();
        let (data, dims) = collect_into_layout(&self.data, &self.dims, &ordering, |a| a.as_());
        TaggedArray::from_parts(data, dims, self.tags.clone())
    }

    /// Copy every element of `src` into this array, matching logical indices.
    pub fn assign_from(&mut self, src: &ArrayView<'_, A>) -> Result<(), ArrayError> {
        self.view_mut().assign(src)
    }
}

// ============================================================================
// Storage-Order Construction Helpers
// ============================================================================

/// Allocate a buffer in the layout given by `ordering`, filling it by mapping
/// the elements of a source region.
///
/// The target layout is walked in increasing buffer offset while the source
/// is read through its own strides at the same logical indices, so a single
/// sequential pass fills the result regardless of either layout.
pub(crate) fn collect_into_layout<A: Copy, B, F>(
    src_data: &[A],
    src_dims: &RawDims,
    ordering: &[usize],
    mut f: F,
) -> (Vec<B>, RawDims)
where
    F: FnMut(A) -> B,
{
    let out_dims = RawDims::from_ordering(src_dims.shape.clone(), ordering);
    let walk = storage_walk(src_dims, ordering);
    let mut data = Vec::with_capacity(out_dims.len());
    for off in walk.offsets() {
        data.push(f(src_data[off]));
    }
    (data, out_dims)
}

/// Two-source variant of [`collect_into_layout`]; both regions must have the
/// same shape.
pub(crate) fn zip_into_layout<A: Copy, B: Copy, C, F>(
    a_data: &[A],
    a_dims: &RawDims,
    b_data: &[B],
    b_dims: &RawDims,
    ordering: &[usize],
    mut f: F,
) -> (Vec<C>, RawDims)
where
    F: FnMut(A, B) -> C,
{
    debug_assert_eq!(a_dims.shape, b_dims.shape);
    let out_dims = RawDims::from_ordering(a_dims.shape.clone(), ordering);
    let walk_a = storage_walk(a_dims, ordering);
    let walk_b = storage_walk(b_dims, ordering);
    let mut data = Vec::with_capacity(out_dims.len());
    for (off_a, off_b) in walk_a.offsets().zip(walk_b.offsets()) {
        data.push(f(a_data[off_a], b_data[off_b]));
    }
    (data, out_dims)
}

/// Allocate a buffer in the layout given by `ordering`, filling it from a
/// function of the logical multi-index.
pub(crate) fn fill_by_index<A, F>(
    shape: &[usize],
    ordering: &[usize],
    mut f: F,
) -> (Vec<A>, RawDims)
where
    F: FnMut(&[usize]) -> A,
{
    let out_dims = RawDims::from_ordering(shape.to_vec(), ordering);
    let axes = axes_outermost_first(ordering);
    let mut data = Vec::with_capacity(out_dims.len());
    let total = out_dims.len();
    let mut index = vec![0usize; shape.len()];
    for _ in 0..total {
        data.push(f(&index));
        // Advance in storage order: the innermost (last walk) axis fastest.
        for &ax in axes.iter().rev() {
            index[ax] += 1;
            if index[ax] < shape[ax] {
                break;
            }
            index[ax] = 0;
        }
    }
    (data, out_dims)
}

/// Rearrange a source region so that a plain odometer walk visits its
/// elements in the target layout's storage order.
fn storage_walk(src_dims: &RawDims, ordering: &[usize]) -> RawDims {
    let axes = axes_outermost_first(ordering);
    RawDims::new(
        axes.iter().map(|&k| src_dims.shape[k]).collect(),
        axes.iter().map(|&k| src_dims.strides[k]).collect(),
        src_dims.offset,
    )
}

/// Axis indices sorted so that the outermost target axis comes first and the
/// innermost last.
fn axes_outermost_first(ordering: &[usize]) -> Vec<usize> {
    let mut axes: Vec<usize> = (0..ordering.len()).collect();
    axes.sort_by_key(|&k| ordering[k]);
    axes.reverse();
    axes
}
