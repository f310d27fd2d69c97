//! Separable convolution into caller-supplied output views.
//!
//! ## Purpose
//!
//! This module implements the convolution primitive the pyramid is built on:
//! a shape-preserving separable convolution that writes its result in place
//! into an already-shaped output view, one 1-D kernel per convolution axis.
//!
//! ## Design notes
//!
//! * **Channel axis is batch**: Convolution runs along every non-channel
//!   axis; the channel axis (when tagged) is iterated, never filtered across.
//! * **Reflective borders**: Out-of-range line indices reflect about the edge
//!   samples, so constant fields stay constant under normalized kernels.
//! * **Line gathering**: Each strided line is gathered into a scratch buffer
//!   before filtering, which makes the in-place passes safe and keeps the
//!   inner loop on contiguous memory.
//!
//! ## Key concepts
//!
//! * **Convention**: `out(x) = Σ_{k=left..right} taps[k - left] · src(x - k)`
//!   with reflected source indices.
//!
//! ## Invariants
//!
//! * Source and destination shapes agree exactly; the destination may be any
//!   strided window (e.g. a parity sublattice of a finer level).
//!
//! ## Non-goals
//!
//! * No resampling: subsampling and upsampling are the pyramid's
//!   responsibility, expressed through the views it passes in.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::array::view::{ArrayView, ArrayViewMut};
use crate::filters::kernel::Kernel1d;
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;

// ============================================================================
// Entry Point
// ============================================================================

/// Convolve `src` with one kernel per non-channel axis, writing into `out`.
///
/// A single kernel is reused for every convolution axis. `src` and `out`
/// must have the same shape; their layouts are free to differ.
pub fn convolve_separable<A: Float>(
    src: &ArrayView<'_, A>,
    kernels: &[Kernel1d<A>],
    out: &mut ArrayViewMut<'_, A>,
) -> Result<(), ArrayError> {
    if src.shape() != out.shape() {
        return Err(ArrayError::ShapeMismatch {
            left: out.shape().to_vec(),
            right: src.shape().to_vec(),
        });
    }

    let channel_axis = src.tags().channel_axis();
    let conv_axes: Vec<usize> = (0..src.ndim())
        .filter(|&ax| Some(ax) != channel_axis)
        .collect();

    if kernels.len() != 1 && kernels.len() != conv_axes.len() {
        return Err(ArrayError::KernelCount {
            expected: conv_axes.len(),
            got: kernels.len(),
        });
    }
    let kernel_for = |pass: usize| -> &Kernel1d<A> {
        if kernels.len() == 1 {
            &kernels[0]
        } else {
            &kernels[pass]
        }
    };

    let mut scratch: Vec<A> = Vec::new();
    match conv_axes.len() {
        0 => out.assign(src),
        1 => {
            convolve_axis_into(
                src.data,
                &src.dims,
                out.data,
                &out.dims,
                conv_axes[0],
                kernel_for(0),
                &mut scratch,
            );
            Ok(())
        }
        _ => {
            let mut temp = src.to_owned();
            for (pass, &axis) in conv_axes[..conv_axes.len() - 1].iter().enumerate() {
                convolve_axis_inplace(&mut temp.data, &temp.dims, axis, kernel_for(pass), &mut scratch);
            }
            let last = conv_axes.len() - 1;
            convolve_axis_into(
                &temp.data,
                &temp.dims,
                out.data,
                &out.dims,
                conv_axes[last],
                kernel_for(last),
                &mut scratch,
            );
            Ok(())
        }
    }
}

// ============================================================================
// Single-Axis Passes
// ============================================================================

/// Convolve every line of `src` along `axis` into the matching line of `dst`.
fn convolve_axis_into<A: Float>(
    src_data: &[A],
    src_dims: &RawDims,
    dst_data: &mut [A],
    dst_dims: &RawDims,
    axis: usize,
    kernel: &Kernel1d<A>,
    scratch: &mut Vec<A>,
) {
    let extent = src_dims.shape[axis];
    let src_stride = src_dims.strides[axis];
    let dst_stride = dst_dims.strides[axis];
    let src_outer = src_dims.with_unit_extent(axis);
    let dst_outer = dst_dims.with_unit_extent(axis);

    for (src_base, dst_base) in src_outer.offsets().zip(dst_outer.offsets()) {
        gather_line(src_data, src_base, src_stride, extent, scratch);
        for i in 0..extent {
            let off = (dst_base as isize + i as isize * dst_stride) as usize;
            dst_data[off] = filter_at(scratch, i, kernel);
        }
    }
}

/// Convolve every line of `data` along `axis` in place.
fn convolve_axis_inplace<A: Float>(
    data: &mut [A],
    dims: &RawDims,
    axis: usize,
    kernel: &Kernel1d<A>,
    scratch: &mut Vec<A>,
) {
    let extent = dims.shape[axis];
    let stride = dims.strides[axis];
    let outer = dims.with_unit_extent(axis);

    for base in outer.offsets() {
        gather_line(data, base, stride, extent, scratch);
        for i in 0..extent {
            let off = (base as isize + i as isize * stride) as usize;
            data[off] = filter_at(scratch, i, kernel);
        }
    }
}

/// Copy one strided line into the scratch buffer.
fn gather_line<A: Copy>(
    data: &[A],
    base: usize,
    stride: isize,
    extent: usize,
    scratch: &mut Vec<A>,
) {
    scratch.clear();
    for i in 0..extent {
        scratch.push(data[(base as isize + i as isize * stride) as usize]);
    }
}

/// Evaluate the convolution at position `i` of a gathered line.
fn filter_at<A: Float>(line: &[A], i: usize, kernel: &Kernel1d<A>) -> A {
    let n = line.len() as isize;
    let mut acc = A::zero();
    for (t, &tap) in kernel.taps().iter().enumerate() {
        let j = i as isize - kernel.left() - t as isize;
        acc = acc + tap * line[reflect(j, n)];
    }
    acc
}

/// Reflect an index about the edge samples of a line of length `n`.
fn reflect(mut j: isize, n: isize) -> usize {
    debug_assert!(n > 0);
    if n == 1 {
        return 0;
    }
    loop {
        if j < 0 {
            j = -j;
        } else if j >= n {
            j = 2 * n - 2 - j;
        } else {
            return j as usize;
        }
    }
}
