//! Raw dimension bookkeeping for strided buffers.
//!
//! ## Purpose
//!
//! This module provides the low-level shape/stride/offset arithmetic that
//! every array operation is built on: computing element strides from a stride
//! ordering, recovering the ordering from existing strides, and walking all
//! elements of a strided region in logical index order.
//!
//! ## Design notes
//!
//! * **Element units**: Strides count elements, not bytes; the element type is
//!   a compile-time parameter, so byte strides would carry no information.
//! * **Logical order**: [`RawDims::offsets`] walks elements with the last axis
//!   varying fastest, regardless of the memory layout. Two regions of equal
//!   shape can therefore be walked in lockstep even when their layouts differ.
//! * **Plain data**: `RawDims` is a value type with no ownership of the buffer
//!   it describes; arrays and views pair it with their storage.
//!
//! ## Key concepts
//!
//! * **Stride ordering**: A permutation assigning each axis a rank, where rank
//!   0 is the fastest-varying (innermost) axis.
//! * **Odometer walk**: Incrementing a multi-index like an odometer while
//!   accumulating stride deltas, so each element visit is O(1) amortized.
//!
//! ## Invariants
//!
//! * `shape.len() == strides.len()` at all times.
//! * Strides produced by [`RawDims::from_ordering`] describe a dense,
//!   non-overlapping packing of `len()` elements.
//!
//! ## Non-goals
//!
//! * This module does not validate semantic axis metadata; that is the axes
//!   layer's concern.
//! * This module does not allocate buffers.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// ============================================================================
// RawDims
// ============================================================================

/// Shape, element strides, and base offset of a strided region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDims {
    /// Extent of each axis.
    pub shape: Vec<usize>,

    /// Element stride of each axis.
    pub strides: Vec<isize>,

    /// Offset of the first element within the backing buffer.
    pub offset: usize,
}

impl RawDims {
    /// Describe a region with the given shape, strides, and base offset.
    pub fn new(shape: Vec<usize>, strides: Vec<isize>, offset: usize) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            shape,
            strides,
            offset,
        }
    }

    /// Compute dense strides from a stride ordering and wrap them up.
    ///
    /// `ordering[k]` is the rank of axis `k`, with rank 0 the fastest-varying
    /// axis. The stride of an axis is the product of the extents of all axes
    /// with smaller rank, which is exactly the layout obtained by allocating
    /// the rank-permuted shape in column-major order and transposing back.
    pub fn from_ordering(shape: Vec<usize>, ordering: &[usize]) -> Self {
        debug_assert_eq!(shape.len(), ordering.len());
        let n = shape.len();
        let mut strides = vec![0isize; n];
        // Axis index sorted by rank, innermost first.
        let mut by_rank: Vec<usize> = (0..n).collect();
        by_rank.sort_by_key(|&k| ordering[k]);
        let mut step = 1isize;
        for &axis in &by_rank {
            strides[axis] = step;
            step *= shape[axis] as isize;
        }
        Self::new(shape, strides, 0)
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements described by the shape.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether the region contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.iter().any(|&e| e == 0)
    }

    /// Buffer offset of the element at the given multi-index.
    #[inline]
    pub fn offset_of(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.ndim());
        let mut off = self.offset as isize;
        for (ax, &i) in index.iter().enumerate() {
            debug_assert!(i < self.shape[ax], "index out of bounds");
            off += i as isize * self.strides[ax];
        }
        off as usize
    }

    /// Recover the stride ordering of the current strides.
    ///
    /// Returns `ordering` with `ordering[k]` the rank of axis `k` (rank 0 =
    /// smallest stride). Ties are broken by axis position, which keeps the
    /// result stable for extent-1 axes.
    pub fn ordering(&self) -> Vec<usize> {
        let n = self.ndim();
        let mut by_stride: Vec<usize> = (0..n).collect();
        by_stride.sort_by_key(|&k| self.strides[k]);
        let mut ordering = vec![0usize; n];
        for (rank, &axis) in by_stride.iter().enumerate() {
            ordering[axis] = rank;
        }
        ordering
    }

    /// Axis indices sorted by increasing stride (innermost axis first).
    pub fn axes_by_stride(&self) -> Vec<usize> {
        let mut axes: Vec<usize> = (0..self.ndim()).collect();
        axes.sort_by_key(|&k| self.strides[k]);
        axes
    }

    /// The same region with one axis collapsed to extent 1.
    ///
    /// Walking the result visits the first element of every line along `axis`,
    /// which is the outer loop of line-wise algorithms.
    pub fn with_unit_extent(&self, axis: usize) -> Self {
        debug_assert!(axis < self.ndim());
        let mut shape = self.shape.clone();
        shape[axis] = if shape[axis] == 0 { 0 } else { 1 };
        Self::new(shape, self.strides.clone(), self.offset)
    }

    /// Walk all element offsets in logical index order (last axis fastest).
    pub fn offsets(&self) -> OffsetIter<'_> {
        OffsetIter {
            shape: &self.shape,
            strides: &self.strides,
            index: vec![0; self.ndim()],
            offset: self.offset as isize,
            remaining: self.len(),
        }
    }
}

// ============================================================================
// OffsetIter
// ============================================================================

/// Odometer walk over a strided region, yielding buffer offsets.
#[derive(Debug)]
pub struct OffsetIter<'a> {
    shape: &'a [usize],
    strides: &'a [isize],
    index: Vec<usize>,
    offset: isize,
    remaining: usize,
}

impl<'a> Iterator for OffsetIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        debug_assert!(self.offset >= 0);
        let current = self.offset as usize;

        // Advance the multi-index, last axis fastest.
        for ax in (0..self.shape.len()).rev() {
            self.index[ax] += 1;
            self.offset += self.strides[ax];
            if self.index[ax] < self.shape[ax] {
                break;
            }
            self.offset -= self.strides[ax] * self.shape[ax] as isize;
            self.index[ax] = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for OffsetIter<'a> {}
