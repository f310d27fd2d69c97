//! Slicing and selection.
//!
//! ## Purpose
//!
//! This module applies [`Slice`] specifications to tagged arrays, producing
//! views that share the parent's buffer, and implements `take`, the copying
//! selection.
//!
//! ## Design notes
//!
//! * **Views keep provenance**: A pure view keeps the tag of every surviving
//!   axis, drops the tags of point-indexed axes, and gives inserted axes an
//!   `Unknown` tag.
//! * **Copies do not fabricate**: Selections that force a copy without a
//!   per-axis correspondence (`take` across the flattened array) replace all
//!   tags with `Unknown`; lost metadata is preferred over wrong metadata.
//! * **Sub-range clamping**: Range bounds clamp to the axis extent as is
//!   conventional for slices; only point indices are hard errors when out of
//!   bounds.
//!
//! ## Key concepts
//!
//! * **Spec padding**: Callers may give fewer specs than axes; the remainder
//!   is implicitly `Full`.
//!
//! ## Invariants
//!
//! * The result's tag count equals its dimensionality for every operation
//!   here.
//!
//! ## Non-goals
//!
//! * Negative steps and boolean masks are not supported.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::array::tagged::{fill_by_index, TaggedArray};
use crate::array::view::{ArrayView, ArrayViewMut};
use crate::axes::tags::AxisTags;
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;
use crate::primitives::slices::Slice;

// ============================================================================
// Spec Application
// ============================================================================

/// Pad a spec list with trailing `Full` entries to cover every input axis.
pub(crate) fn pad_specs(specs: &[Slice], ndim: usize) -> Result<Vec<Slice>, ArrayError> {
    let consumed = specs.iter().filter(|s| s.consumes_input_axis()).count();
    if consumed > ndim {
        return Err(ArrayError::AxisOutOfRange {
            axis: consumed,
            ndim,
        });
    }
    let mut padded = specs.to_vec();
    padded.extend(core::iter::repeat(Slice::Full).take(ndim - consumed));
    Ok(padded)
}

/// Compute the dims of a sliced region.
pub(crate) fn slice_dims(dims: &RawDims, padded: &[Slice]) -> Result<RawDims, ArrayError> {
    let mut shape = Vec::new();
    let mut strides = Vec::new();
    let mut offset = dims.offset as isize;
    let mut axis = 0usize;

    for spec in padded {
        match *spec {
            Slice::Full => {
                shape.push(dims.shape[axis]);
                strides.push(dims.strides[axis]);
                axis += 1;
            }
            Slice::Range { start, end, step } => {
                if step == 0 {
                    return Err(ArrayError::ZeroStep { axis });
                }
                let extent = dims.shape[axis];
                let stop = end.unwrap_or(extent).min(extent);
                let begin = start.min(stop);
                let kept = (stop - begin + step - 1) / step;
                shape.push(kept);
                strides.push(dims.strides[axis] * step as isize);
                offset += begin as isize * dims.strides[axis];
                axis += 1;
            }
            Slice::At(index) => {
                let extent = dims.shape[axis];
                if index >= extent {
                    return Err(ArrayError::IndexOutOfRange {
                        axis,
                        index,
                        extent,
                    });
                }
                offset += index as isize * dims.strides[axis];
                axis += 1;
            }
            Slice::NewAxis => {
                shape.push(1);
                strides.push(0);
            }
        }
    }
    debug_assert!(offset >= 0);
    Ok(RawDims::new(shape, strides, offset as usize))
}

// ============================================================================
// Array Entry Points
// ============================================================================

impl<A: Copy> TaggedArray<A> {
    /// A view of a sub-region.
    ///
    /// Missing trailing specs default to `Full`. Surviving axes keep their
    /// tags, point-indexed axes drop theirs, inserted axes are `Unknown`.
    pub fn slice(&self, specs: &[Slice]) -> Result<ArrayView<'_, A>, ArrayError> {
        let padded = pad_specs(specs, self.ndim())?;
        let dims = slice_dims(&self.dims, &padded)?;
        let tags = self.tags.transform(&padded);
        Ok(ArrayView {
            data: &self.data,
            dims,
            tags,
        })
    }

    /// A mutable view of a sub-region.
    pub fn slice_mut(&mut self, specs: &[Slice]) -> Result<ArrayViewMut<'_, A>, ArrayError> {
        let padded = pad_specs(specs, self.ndim())?;
        let dims = slice_dims(&self.dims, &padded)?;
        let tags = self.tags.transform(&padded);
        Ok(ArrayViewMut {
            data: &mut self.data,
            dims,
            tags,
        })
    }

    /// Select elements by index, always copying.
    ///
    /// With `axis` given, the selection runs along that axis, the rank is
    /// preserved, and tags are kept. Without an axis, the selection indexes
    /// the array flattened in logical row-major order and the result is
    /// one-dimensional with an `Unknown` tag; per-axis provenance does not
    /// survive flattening and is not fabricated.
    pub fn take(
        &self,
        indices: &[usize],
        axis: Option<usize>,
    ) -> Result<TaggedArray<A>, ArrayError> {
        match axis {
            Some(axis) => {
                let ndim = self.ndim();
                if axis >= ndim {
                    return Err(ArrayError::AxisOutOfRange { axis, ndim });
                }
                let extent = self.dims.shape[axis];
                for &index in indices {
                    if index >= extent {
                        return Err(ArrayError::IndexOutOfRange {
                            axis,
                            index,
                            extent,
                        });
                    }
                }
                let mut shape = self.dims.shape.clone();
                shape[axis] = indices.len();
                let ordering = self.dims.ordering();
                let mut picked = vec![0usize; ndim];
                let (data, dims) = fill_by_index(&shape, &ordering, |index| {
                    picked.copy_from_slice(index);
                    picked[axis] = indices[index[axis]];
                    self.data[self.dims.offset_of(&picked)]
                });
                Ok(TaggedArray::from_parts(data, dims, self.tags.clone()))
            }
            None => {
                let flat: Vec<A> = self.dims.offsets().map(|off| self.data[off]).collect();
                let extent = flat.len();
                for &index in indices {
                    if index >= extent {
                        return Err(ArrayError::IndexOutOfRange {
                            axis: 0,
                            index,
                            extent,
                        });
                    }
                }
                let data: Vec<A> = indices.iter().map(|&i| flat[i]).collect();
                let dims = RawDims::new(vec![indices.len()], vec![1], 0);
                Ok(TaggedArray::from_parts(data, dims, AxisTags::unknown(1)))
            }
        }
    }
}
