//! Shape- and order-changing operations.
//!
//! ## Purpose
//!
//! This module implements every operation that changes an array's shape,
//! rank, or axis order, together with the reductions. Each one recomputes
//! the axis tags inside the same call, so tags can never drift from the
//! dimensionality.
//!
//! ## Design notes
//!
//! * **One tag rule per shape rule**: Axis reductions delete the collapsed
//!   axis's tag; full reductions produce plain scalars; transposes permute
//!   tags exactly as they permute axes; rank-destroying reshapes degrade to
//!   `Unknown` tags instead of fabricating provenance.
//! * **Shared line machinery**: All axis reductions go through one
//!   line-gathering helper instead of re-deriving the iteration each time.
//! * **Layout preservation**: Results keep the operand's stride ordering
//!   (minus collapsed axes) so chains of operations stay in the layout the
//!   caller chose.
//!
//! ## Key concepts
//!
//! * **Population statistics**: `var`/`std` divide by the element count, not
//!   count minus one.
//! * **Logical row-major flattening**: `ravel`, `reshaped`, and the flat
//!   variants of `cumsum`/`repeat` read elements with the last axis varying
//!   fastest, independent of memory order.
//!
//! ## Invariants
//!
//! * `result.tags().len() == result.ndim()` for every operation here.
//!
//! ## Non-goals
//!
//! * Element-wise arithmetic lives in the `elementwise` module.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::array::tagged::{fill_by_index, TaggedArray};
use crate::axes::tags::{validate_permutation, AxisTags};
use crate::layout::order::MemoryOrder;
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;

// ============================================================================
// Axis Rearrangement
// ============================================================================

impl<A: Copy> TaggedArray<A> {
    /// Permute axes and tags by the same permutation; `None` reverses both.
    ///
    /// The buffer is untouched; only shape, strides, and tags are reordered.
    pub fn transpose(mut self, perm: Option<&[usize]>) -> Result<Self, ArrayError> {
        match perm {
            None => {
                self.dims.shape.reverse();
                self.dims.strides.reverse();
                self.tags.transpose(None)?;
                Ok(self)
            }
            Some(perm) => {
                validate_permutation(perm, self.ndim())?;
                self.dims = RawDims::new(
                    perm.iter().map(|&k| self.dims.shape[k]).collect(),
                    perm.iter().map(|&k| self.dims.strides[k]).collect(),
                    self.dims.offset,
                );
                self.tags.transpose(Some(perm))?;
                Ok(self)
            }
        }
    }

    /// Swap axes `i` and `j` and their tags.
    pub fn swapaxes(mut self, i: usize, j: usize) -> Result<Self, ArrayError> {
        let ndim = self.ndim();
        if i >= ndim {
            return Err(ArrayError::AxisOutOfRange { axis: i, ndim });
        }
        if j >= ndim {
            return Err(ArrayError::AxisOutOfRange { axis: j, ndim });
        }
        self.dims.shape.swap(i, j);
        self.dims.strides.swap(i, j);
        self.tags.swap(i, j)?;
        Ok(self)
    }

    /// Drop every axis of extent 1 together with its tag.
    pub fn squeeze(mut self) -> Self {
        let keep: Vec<usize> = (0..self.ndim())
            .filter(|&k| self.dims.shape[k] != 1)
            .collect();
        let shape = keep.iter().map(|&k| self.dims.shape[k]).collect();
        let strides = keep.iter().map(|&k| self.dims.strides[k]).collect();
        let tags = AxisTags::from_infos(
            self.tags
                .as_slice()
                .iter()
                .enumerate()
                .filter(|&(k, _)| self.dims.shape[k] != 1)
                .map(|(_, &tag)| tag)
                .collect(),
        );
        self.dims = RawDims::new(shape, strides, self.dims.offset);
        self.tags = tags;
        self
    }

    // ========================================================================
    // Rank-Destroying Reshapes
    // ========================================================================

    /// Copy into a new shape of the same total size.
    ///
    /// Elements are read in logical row-major order and the result is
    /// row-major. Element-to-axis correspondence does not survive a reshape,
    /// so the result's tags are all `Unknown`.
    pub fn reshaped(&self, new_shape: &[usize]) -> Result<TaggedArray<A>, ArrayError> {
        let new_len: usize = new_shape.iter().product();
        if new_len != self.len() {
            return Err(ArrayError::ShapeMismatch {
                left: self.dims.shape.clone(),
                right: new_shape.to_vec(),
            });
        }
        let data: Vec<A> = self.dims.offsets().map(|off| self.data[off]).collect();
        let ordering: Vec<usize> = (0..new_shape.len()).rev().collect();
        let dims = RawDims::from_ordering(new_shape.to_vec(), &ordering);
        Ok(TaggedArray::from_parts(
            data,
            dims,
            AxisTags::unknown(new_shape.len()),
        ))
    }

    /// Copy into a one-dimensional array in logical row-major order.
    ///
    /// The single result axis is `Unknown`.
    pub fn ravel(&self) -> TaggedArray<A> {
        let data: Vec<A> = self.dims.offsets().map(|off| self.data[off]).collect();
        let len = data.len();
        TaggedArray::from_parts(
            data,
            RawDims::new(vec![len], vec![1], 0),
            AxisTags::unknown(1),
        )
    }

    /// Alias of [`TaggedArray::ravel`]; both always copy.
    pub fn flatten(&self) -> TaggedArray<A> {
        self.ravel()
    }

    /// Repeat elements.
    ///
    /// With `axis` given, each element is repeated `n` times along that axis
    /// and tags are kept. Without an axis, the array is flattened in logical
    /// row-major order first and the result carries an `Unknown` tag.
    pub fn repeat(&self, n: usize, axis: Option<usize>) -> Result<TaggedArray<A>, ArrayError> {
        match axis {
            Some(axis) => {
                let ndim = self.ndim();
                if axis >= ndim {
                    return Err(ArrayError::AxisOutOfRange { axis, ndim });
                }
                let mut shape = self.dims.shape.clone();
                shape[axis] *= n;
                let ordering = self.dims.ordering();
                let mut src_index = vec![0usize; ndim];
                let (data, dims) = fill_by_index(&shape, &ordering, |index| {
                    src_index.copy_from_slice(index);
                    src_index[axis] = index[axis] / n;
                    self.data[self.dims.offset_of(&src_index)]
                });
                Ok(TaggedArray::from_parts(data, dims, self.tags.clone()))
            }
            None => {
                let flat: Vec<A> = self.dims.offsets().map(|off| self.data[off]).collect();
                let data: Vec<A> = (0..flat.len() * n).map(|j| flat[j / n]).collect();
                let len = data.len();
                Ok(TaggedArray::from_parts(
                    data,
                    RawDims::new(vec![len], vec![1], 0),
                    AxisTags::unknown(1),
                ))
            }
        }
    }

    // ========================================================================
    // Line Machinery
    // ========================================================================

    /// Collapse one axis by mapping every line along it to a single value.
    ///
    /// The result keeps the operand's stride ordering with the collapsed
    /// axis's rank removed, and the collapsed axis's tag is deleted.
    pub(crate) fn map_lines<B, F>(&self, axis: usize, mut f: F) -> Result<TaggedArray<B>, ArrayError>
    where
        B: Copy,
        F: FnMut(&[A]) -> B,
    {
        let ndim = self.ndim();
        if axis >= ndim {
            return Err(ArrayError::AxisOutOfRange { axis, ndim });
        }
        let extent = self.dims.shape[axis];
        if extent == 0 {
            return Err(ArrayError::EmptyAxis { axis });
        }

        let mut ordering = self.dims.ordering();
        let removed = ordering.remove(axis);
        for rank in ordering.iter_mut() {
            if *rank > removed {
                *rank -= 1;
            }
        }
        let mut out_shape = self.dims.shape.clone();
        out_shape.remove(axis);

        let stride = self.dims.strides[axis];
        let mut scratch: Vec<A> = Vec::with_capacity(extent);
        let mut src_index = vec![0usize; ndim];
        let (data, dims) = fill_by_index(&out_shape, &ordering, |out_index| {
            src_index[..axis].copy_from_slice(&out_index[..axis]);
            src_index[axis] = 0;
            src_index[axis + 1..].copy_from_slice(&out_index[axis..]);
            let base = self.dims.offset_of(&src_index) as isize;
            scratch.clear();
            for i in 0..extent {
                scratch.push(self.data[(base + i as isize * stride) as usize]);
            }
            f(&scratch)
        });

        let mut tags = self.tags.clone();
        tags.remove(axis)?;
        Ok(TaggedArray::from_parts(data, dims, tags))
    }

    /// Fold all elements in logical order.
    pub(crate) fn fold_all<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        let mut acc = init;
        for off in self.dims.offsets() {
            acc = f(acc, self.data[off]);
        }
        acc
    }
}

// ============================================================================
// Reductions
// ============================================================================

impl<A: Float> TaggedArray<A> {
    /// Sum of all elements.
    pub fn sum(&self) -> A {
        self.fold_all(A::zero(), |acc, v| acc + v)
    }

    /// Sum along one axis; the axis and its tag disappear.
    pub fn sum_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| {
            line.iter().fold(A::zero(), |acc, &v| acc + v)
        })
    }

    /// Product of all elements.
    pub fn prod(&self) -> A {
        self.fold_all(A::one(), |acc, v| acc * v)
    }

    /// Product along one axis; the axis and its tag disappear.
    pub fn prod_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| line.iter().fold(A::one(), |acc, &v| acc * v))
    }

    /// Arithmetic mean of all elements; NaN for an empty array.
    pub fn mean(&self) -> A {
        if self.is_empty() {
            return A::nan();
        }
        self.sum() / A::from(self.len()).unwrap_or_else(A::one)
    }

    /// Mean along one axis; the axis and its tag disappear.
    pub fn mean_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| {
            let sum = line.iter().fold(A::zero(), |acc, &v| acc + v);
            sum / A::from(line.len()).unwrap_or_else(A::one)
        })
    }

    /// Smallest element, `None` for an empty array.
    pub fn min(&self) -> Option<A> {
        if self.is_empty() {
            return None;
        }
        Some(self.fold_all(A::infinity(), |acc, v| acc.min(v)))
    }

    /// Minimum along one axis; the axis and its tag disappear.
    pub fn min_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| {
            line.iter().fold(A::infinity(), |acc, &v| acc.min(v))
        })
    }

    /// Largest element, `None` for an empty array.
    pub fn max(&self) -> Option<A> {
        if self.is_empty() {
            return None;
        }
        Some(self.fold_all(A::neg_infinity(), |acc, v| acc.max(v)))
    }

    /// Maximum along one axis; the axis and its tag disappear.
    pub fn max_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| {
            line.iter().fold(A::neg_infinity(), |acc, &v| acc.max(v))
        })
    }

    /// Population variance of all elements; NaN for an empty array.
    pub fn var(&self) -> A {
        if self.is_empty() {
            return A::nan();
        }
        let n = A::from(self.len()).unwrap_or_else(A::one);
        let mean = self.mean();
        let sq = self.fold_all(A::zero(), |acc, v| acc + (v - mean) * (v - mean));
        sq / n
    }

    /// Population variance along one axis; the axis and its tag disappear.
    pub fn var_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| variance(line))
    }

    /// Population standard deviation of all elements.
    pub fn std(&self) -> A {
        self.var().sqrt()
    }

    /// Population standard deviation along one axis.
    pub fn std_axis(&self, axis: usize) -> Result<TaggedArray<A>, ArrayError> {
        self.map_lines(axis, |line| variance(line).sqrt())
    }

    /// Whether any element is non-zero.
    pub fn any(&self) -> bool {
        self.fold_all(false, |acc, v| acc || v != A::zero())
    }

    /// Non-zero test along one axis; the axis and its tag disappear.
    pub fn any_axis(&self, axis: usize) -> Result<TaggedArray<bool>, ArrayError> {
        self.map_lines(axis, |line| line.iter().any(|&v| v != A::zero()))
    }

    /// Whether all elements are non-zero.
    pub fn all(&self) -> bool {
        self.fold_all(true, |acc, v| acc && v != A::zero())
    }

    /// All-non-zero test along one axis; the axis and its tag disappear.
    pub fn all_axis(&self, axis: usize) -> Result<TaggedArray<bool>, ArrayError> {
        self.map_lines(axis, |line| line.iter().all(|&v| v != A::zero()))
    }

    // ========================================================================
    // Scans
    // ========================================================================

    /// Cumulative sum.
    ///
    /// With `axis` given, the rank and tags are preserved. Without an axis,
    /// the array is flattened in logical row-major order and the result
    /// carries an `Unknown` tag.
    pub fn cumsum(&self, axis: Option<usize>) -> Result<TaggedArray<A>, ArrayError> {
        self.scan(axis, |acc, v| acc + v)
    }

    /// Cumulative product; tag behavior as for [`TaggedArray::cumsum`].
    pub fn cumprod(&self, axis: Option<usize>) -> Result<TaggedArray<A>, ArrayError> {
        self.scan(axis, |acc, v| acc * v)
    }

    fn scan<F>(&self, axis: Option<usize>, mut f: F) -> Result<TaggedArray<A>, ArrayError>
    where
        F: FnMut(A, A) -> A,
    {
        match axis {
            Some(axis) => {
                let ndim = self.ndim();
                if axis >= ndim {
                    return Err(ArrayError::AxisOutOfRange { axis, ndim });
                }
                let mut out = self.copy(MemoryOrder::Auto);
                let extent = out.dims.shape[axis];
                let stride = out.dims.strides[axis];
                let outer = out.dims.with_unit_extent(axis);
                for base in outer.offsets() {
                    for i in 1..extent {
                        let prev = out.data[(base as isize + (i as isize - 1) * stride) as usize];
                        let off = (base as isize + i as isize * stride) as usize;
                        out.data[off] = f(prev, out.data[off]);
                    }
                }
                Ok(out)
            }
            None => {
                let mut data: Vec<A> = self.dims.offsets().map(|off| self.data[off]).collect();
                for i in 1..data.len() {
                    data[i] = f(data[i - 1], data[i]);
                }
                let len = data.len();
                Ok(TaggedArray::from_parts(
                    data,
                    RawDims::new(vec![len], vec![1], 0),
                    AxisTags::unknown(1),
                ))
            }
        }
    }
}

/// Two-pass population variance of one gathered line.
fn variance<A: Float>(line: &[A]) -> A {
    let n = A::from(line.len()).unwrap_or_else(A::one);
    let mean = line.iter().fold(A::zero(), |acc, &v| acc + v) / n;
    let sq = line
        .iter()
        .fold(A::zero(), |acc, &v| acc + (v - mean) * (v - mean));
    sq / n
}
