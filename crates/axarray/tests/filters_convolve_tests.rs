#![cfg(feature = "dev")]
//! Tests for kernels and separable convolution.
//!
//! These tests verify the filtering collaborator the pyramid depends on:
//! - Kernel constructors and their support contracts
//! - Shape-preserving separable convolution with reflective borders
//! - Channel batching and output-view targeting
//!
//! ## Test Organization
//!
//! 1. **Kernels** - Constructors, taps, invalid supports
//! 2. **Convolution** - Constant fields, known responses, borders
//! 3. **Output Views** - Writing into strided sublattices
//! 4. **Errors** - Shape and kernel-count mismatches

use approx::assert_relative_eq;

use axarray::internals::filters::convolve::convolve_separable;
use axarray::internals::filters::kernel::Kernel1d;
use axarray::internals::primitives::errors::{ArrayError, ErrorClass};
use axarray::prelude::*;

// ============================================================================
// Kernel Tests
// ============================================================================

/// The Burt smoothing kernel is normalized with center weight 2c.
#[test]
fn test_burt_smoothing_taps() {
    let kernel = Kernel1d::<f64>::burt_smoothing(0.42);
    assert_eq!(kernel.left(), -1);
    assert_eq!(kernel.right(), 1);
    assert_relative_eq!(kernel.taps()[0], 0.08, max_relative = 1e-12);
    assert_relative_eq!(kernel.taps()[1], 0.84, max_relative = 1e-12);
    assert_relative_eq!(kernel.taps()[2], 0.08, max_relative = 1e-12);
    assert_relative_eq!(kernel.taps().iter().sum::<f64>(), 1.0, max_relative = 1e-12);
}

/// The half-sample kernel interpolates midway between two samples.
#[test]
fn test_half_sample_taps() {
    let kernel = Kernel1d::<f64>::half_sample();
    assert_eq!((kernel.left(), kernel.right()), (-1, 0));
    assert_eq!(kernel.taps(), &[0.5, 0.5]);
}

/// Explicit kernels must cover their support exactly and contain zero.
#[test]
fn test_explicit_kernel_contract() {
    let ok = Kernel1d::explicit(-2, 1, vec![0.1, 0.2, 0.4, 0.3]);
    assert!(ok.is_ok());

    let wrong_len = Kernel1d::explicit(-1, 1, vec![0.5, 0.5]).unwrap_err();
    assert_eq!(
        wrong_len,
        ArrayError::InvalidKernel {
            left: -1,
            right: 1,
            taps: 2
        }
    );

    let no_zero = Kernel1d::explicit(1, 2, vec![0.5, 0.5]).unwrap_err();
    assert_eq!(no_zero.class(), ErrorClass::Shape);
}

// ============================================================================
// Convolution Tests
// ============================================================================

/// A normalized kernel leaves a constant field unchanged, borders included.
#[test]
fn test_constant_field_preserved() {
    let src = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[6, 5], 3.0).unwrap();
    let mut out = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[6, 5]).unwrap();
    let kernel = Kernel1d::burt_smoothing(0.42);
    convolve_separable(&src.view(), &[kernel], &mut out.view_mut()).unwrap();

    for i in 0..6 {
        for j in 0..5 {
            assert_relative_eq!(*out.get(&[i, j]).unwrap(), 3.0, max_relative = 1e-12);
        }
    }
}

/// An impulse spreads into the separable outer product of the taps.
#[test]
fn test_impulse_response() {
    let mut src = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[5, 5]).unwrap();
    *src.get_mut(&[2, 2]).unwrap() = 1.0;
    let mut out = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[5, 5]).unwrap();
    let kernel = Kernel1d::burt_smoothing(0.42);
    convolve_separable(&src.view(), &[kernel], &mut out.view_mut()).unwrap();

    assert_relative_eq!(*out.get(&[2, 2]).unwrap(), 0.84 * 0.84, max_relative = 1e-12);
    assert_relative_eq!(*out.get(&[1, 2]).unwrap(), 0.08 * 0.84, max_relative = 1e-12);
    assert_relative_eq!(*out.get(&[2, 3]).unwrap(), 0.84 * 0.08, max_relative = 1e-12);
    assert_relative_eq!(*out.get(&[1, 1]).unwrap(), 0.08 * 0.08, max_relative = 1e-12);
    assert_relative_eq!(*out.get(&[0, 0]).unwrap(), 0.0, epsilon = 1e-15);
    // Mass is conserved by a normalized kernel.
    assert_relative_eq!(out.sum(), 1.0, max_relative = 1e-12);
}

/// The channel axis is batched, never filtered across.
#[test]
fn test_channel_axis_is_batch() {
    let src = TaggedArray::<f64>::from_shape_fn(
        ArrayKind::RGB_IMAGE,
        &[4, 4],
        ChannelMajor,
        |idx| idx[2] as f64,
    )
    .unwrap();
    let mut out = TaggedArray::<f64>::zeros(ArrayKind::RGB_IMAGE, &[4, 4]).unwrap();
    let kernel = Kernel1d::burt_smoothing(0.42);
    convolve_separable(&src.view(), &[kernel], &mut out.view_mut()).unwrap();

    // Each channel is a constant field with its own value; smoothing must
    // not mix them.
    for c in 0..3 {
        assert_relative_eq!(*out.get(&[1, 2, c]).unwrap(), c as f64, max_relative = 1e-12);
    }
}

// ============================================================================
// Output View Tests
// ============================================================================

/// Convolution writes into an arbitrary strided destination window.
#[test]
fn test_convolve_into_sublattice() {
    let src = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[3, 3], 2.0).unwrap();
    let mut dest = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[6, 6]).unwrap();
    let kernel = Kernel1d::burt_smoothing(0.42);

    let mut window = dest
        .slice_mut(&[Slice::every(2), Slice::every(2)])
        .unwrap();
    convolve_separable(&src.view(), &[kernel], &mut window).unwrap();

    assert_relative_eq!(*dest.get(&[0, 0]).unwrap(), 2.0, max_relative = 1e-12);
    assert_relative_eq!(*dest.get(&[4, 2]).unwrap(), 2.0, max_relative = 1e-12);
    // The complementary sublattice is untouched.
    assert_eq!(dest.get(&[1, 1]), Some(&0.0));
    assert_eq!(dest.get(&[0, 3]), Some(&0.0));
}

// ============================================================================
// Error Tests
// ============================================================================

/// Source and destination shapes must agree exactly.
#[test]
fn test_shape_mismatch() {
    let src = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[4, 4]).unwrap();
    let mut out = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[4, 5]).unwrap();
    let kernel = Kernel1d::burt_smoothing(0.42);
    let err = convolve_separable(&src.view(), &[kernel], &mut out.view_mut()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Shape);
}

/// The kernel count must be one or one-per-convolution-axis.
#[test]
fn test_kernel_count_mismatch() {
    let src = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[4, 4]).unwrap();
    let mut out = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[4, 4]).unwrap();
    let kernels = vec![
        Kernel1d::burt_smoothing(0.42),
        Kernel1d::burt_smoothing(0.42),
        Kernel1d::half_sample(),
    ];
    let err = convolve_separable(&src.view(), &kernels, &mut out.view_mut()).unwrap_err();
    assert_eq!(err, ArrayError::KernelCount { expected: 2, got: 3 });
}
