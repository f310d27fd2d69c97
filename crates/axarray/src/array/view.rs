//! Borrowed array views.
//!
//! ## Purpose
//!
//! This module provides [`ArrayView`] and [`ArrayViewMut`], strided windows
//! into a tagged array's buffer. Views are how sub-ranges, subsampled
//! lattices, and in-place convolution destinations are expressed without
//! copying.
//!
//! ## Design notes
//!
//! * **Borrowed, not shared**: A view borrows its parent's buffer; the borrow
//!   checker enforces that no view outlives the storage it reads, which is
//!   the ownership answer to "views never outlive their backing buffer".
//! * **Tags included**: Views carry the tags of the axes they expose, so
//!   consumers (convolution, pyramid bookkeeping) can locate the channel axis
//!   without reaching back to the parent.
//!
//! ## Key concepts
//!
//! * **Aliasing discipline**: At most one mutable view of an array exists at
//!   a time, and never together with a shared view; single-threaded mutation
//!   is a compile-time guarantee here, not a convention.
//!
//! ## Invariants
//!
//! * `tags().len() == ndim()` for every view.
//!
//! ## Non-goals
//!
//! * Views do not implement the full operation surface of owned arrays;
//!   `to_owned` converts when one is needed.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::array::tagged::{collect_into_layout, TaggedArray};
use crate::axes::tags::AxisTags;
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;

// ============================================================================
// ArrayView
// ============================================================================

/// A read-only strided window into an array's buffer.
#[derive(Debug)]
pub struct ArrayView<'a, A> {
    pub(crate) data: &'a [A],
    pub(crate) dims: RawDims,
    pub(crate) tags: AxisTags,
}

impl<'a, A: Copy> ArrayView<'a, A> {
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

    /// Total number of elements in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Whether the window contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// The axis tags of the exposed axes.
    #[inline]
    pub fn tags(&self) -> &AxisTags {
        &self.tags
    }

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

    /// Copy the window into a fresh owned array, preserving the window's
    /// stride ordering and tags.
    pub fn to_owned(&self) -> TaggedArray<A> {
        let ordering = self.dims.ordering();
        let (data, dims) = collect_into_layout(self.data, &self.dims, &ordering, |a| a);
        TaggedArray::from_parts(data, dims, self.tags.clone())
    }
}

// ============================================================================
// ArrayViewMut
// ============================================================================

/// A mutable strided window into an array's buffer.
#[derive(Debug)]
pub struct ArrayViewMut<'a, A> {
    pub(crate) data: &'a mut [A],
    pub(crate) dims: RawDims,
    pub(crate) tags: AxisTags,
}

impl<'a, A: Copy> ArrayViewMut<'a, A> {
    /// Extent of each axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.dims.shape
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.ndim()
    }

    /// The axis tags of the exposed axes.
    #[inline]
    pub fn tags(&self) -> &AxisTags {
        &self.tags
    }

    /// Set every element of the window to `value`.
    pub fn fill(&mut self, value: A) {
        let offsets: Vec<usize> = self.dims.offsets().collect();
        for off in offsets {
            self.data[off] = value;
        }
    }

    /// Copy every element of `src` into the window, matching logical indices.
    ///
    /// The shapes must agree exactly; layouts may differ.
    pub fn assign(&mut self, src: &ArrayView<'_, A>) -> Result<(), ArrayError> {
        if self.dims.shape != src.dims.shape {
            return Err(ArrayError::ShapeMismatch {
                left: self.dims.shape.clone(),
                right: src.dims.shape.clone(),
            });
        }
        let dst_offsets: Vec<usize> = self.dims.offsets().collect();
        for (dst_off, src_off) in dst_offsets.into_iter().zip(src.dims.offsets()) {
            self.data[dst_off] = src.data[src_off];
        }
        Ok(())
    }

    /// A read-only view of the same window.
    pub fn as_view(&self) -> ArrayView<'_, A> {
        ArrayView {
            data: self.data,
            dims: self.dims.clone(),
            tags: self.tags.clone(),
        }
    }
}
