#![cfg(feature = "dev")]
//! Tests for the multiresolution pyramid.
//!
//! These tests verify level bookkeeping and the Burt/Laplacian algorithms:
//! - The half-up / double-minus-one shape law and sequential level growth
//! - Reduce on constant fields
//! - Level-order and level-range error reporting, with no partial mutation
//! - Exact Laplacian reconstruction
//!
//! ## Test Organization
//!
//! 1. **Construction** - Ranges, zero levels, rejected volumes
//! 2. **Shape Law** - Growth in both directions
//! 3. **Reduce / Expand** - Constant fields and coverage
//! 4. **Errors** - Sequence and range violations
//! 5. **Laplacian** - Round-trip reconstruction

use approx::assert_relative_eq;

use axarray::internals::primitives::errors::{ArrayError, ErrorClass};
use axarray::prelude::*;

/// A deterministic non-constant test image.
fn ramp_image(width: usize, height: usize) -> TaggedArray<f64> {
    TaggedArray::from_shape_fn(ArrayKind::SCALAR_IMAGE, &[width, height], ColMajor, |idx| {
        (idx[0] * 7 + idx[1] * 3) as f64 * 0.25 + 1.0
    })
    .unwrap()
}

// ============================================================================
// Construction Tests
// ============================================================================

/// The source image lands at the copy level; other levels are zero-filled.
#[test]
fn test_new_populates_levels() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[8, 8], 1.0).unwrap();
    let pyramid = Pyramid::new(&image, 0, 0, 2).unwrap();
    assert_eq!(pyramid.lowest_level(), 0);
    assert_eq!(pyramid.highest_level(), 2);
    assert_eq!(pyramid.get(0).unwrap().sum(), 64.0);
    assert_eq!(pyramid.get(1).unwrap().sum(), 0.0);
    assert_eq!(pyramid.get(2).unwrap().sum(), 0.0);
}

/// The copy level must lie inside the requested range.
#[test]
fn test_new_copy_level_in_range() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[8, 8], 1.0).unwrap();
    let err = Pyramid::new(&image, 3, 0, 2).unwrap_err();
    assert_eq!(
        err,
        ArrayError::LevelOutOfRange {
            level: 3,
            lowest: 0,
            highest: 2
        }
    );
}

/// Volumes are rejected: the parity expansion scheme is two-dimensional.
#[test]
fn test_new_rejects_volumes() {
    let volume = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_VOLUME, &[4, 4, 4]).unwrap();
    let err = Pyramid::new(&volume, 0, 0, 1).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Shape);
}

// ============================================================================
// Shape Law Tests
// ============================================================================

/// Going up halves (rounding up); going down doubles minus one. Channel
/// extents never change.
#[test]
fn test_shape_law_both_directions() {
    let image = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[5, 7]).unwrap();
    let pyramid = Pyramid::new(&image, 0, -2, 3).unwrap();

    assert_eq!(pyramid.get(1).unwrap().shape(), &[3, 4]);
    assert_eq!(pyramid.get(2).unwrap().shape(), &[2, 2]);
    assert_eq!(pyramid.get(3).unwrap().shape(), &[1, 1]);
    assert_eq!(pyramid.get(-1).unwrap().shape(), &[9, 13]);
    assert_eq!(pyramid.get(-2).unwrap().shape(), &[17, 25]);

    // The halving law holds between every adjacent pair.
    for level in -2..3 {
        let finer = pyramid.get(level).unwrap().shape().to_vec();
        let coarser = pyramid.get(level + 1).unwrap().shape().to_vec();
        for (f, c) in finer.iter().zip(coarser.iter()) {
            assert_eq!(*c, (*f + 1) / 2, "level {}", level);
        }
    }
}

/// Multi-channel pyramids carry the channel axis through every level.
#[test]
fn test_shape_law_preserves_channels() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::RGB_IMAGE, &[8, 6], 1.0).unwrap();
    let pyramid = Pyramid::new(&image, 0, 0, 2).unwrap();
    assert_eq!(pyramid.get(1).unwrap().shape(), &[4, 3, 3]);
    assert_eq!(pyramid.get(2).unwrap().shape(), &[2, 2, 3]);
    assert_eq!(pyramid.get(2).unwrap().channels(), 3);
}

/// Levels outside the populated range are axis-range errors.
#[test]
fn test_get_out_of_range() {
    let image = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[4, 4]).unwrap();
    let pyramid = Pyramid::new(&image, 0, 0, 1).unwrap();
    let err = pyramid.get(5).unwrap_err();
    assert_eq!(err.class(), ErrorClass::AxisRange);
}

// ============================================================================
// Reduce / Expand Tests
// ============================================================================

/// Reducing a constant field keeps the constant: an 8x8 field of ones
/// arrives at a 2x2 level-2 array of values close to 1.
#[test]
fn test_reduce_constant_field() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[8, 8], 1.0).unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 0).unwrap();
    pyramid.reduce(0, 2, 0.42).unwrap();

    let top = pyramid.get(2).unwrap();
    assert_eq!(top.shape(), &[2, 2]);
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(*top.get(&[i, j]).unwrap(), 1.0, max_relative = 1e-10);
        }
    }
}

/// Expansion covers every destination element: no zero from the fill
/// survives on a constant field.
#[test]
fn test_expand_covers_all_parities() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[9, 7], 1.0).unwrap();
    let mut pyramid = Pyramid::new(&image, 1, 0, 1).unwrap();
    pyramid.expand(1, 0, 0.42).unwrap();

    let fine = pyramid.get(0).unwrap();
    assert_eq!(fine.shape(), &[17, 13]);
    for i in 0..17 {
        for j in 0..13 {
            assert_relative_eq!(*fine.get(&[i, j]).unwrap(), 1.0, max_relative = 1e-10);
        }
    }
}

/// Reduce works per channel on vector-valued images.
#[test]
fn test_reduce_multi_channel() {
    let image = TaggedArray::<f64>::from_shape_fn(
        ArrayKind::RGB_IMAGE,
        &[8, 8],
        ChannelMajor,
        |idx| (idx[2] + 1) as f64,
    )
    .unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 1).unwrap();
    pyramid.reduce(0, 1, 0.42).unwrap();

    let coarse = pyramid.get(1).unwrap();
    for c in 0..3 {
        assert_relative_eq!(
            *coarse.get(&[1, 1, c]).unwrap(),
            (c + 1) as f64,
            max_relative = 1e-10
        );
    }
}

/// Assign copies data into an existing level, shape-checked.
#[test]
fn test_assign_level() {
    let image = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[8, 8]).unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 1).unwrap();

    let replacement = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[4, 4], 2.0).unwrap();
    pyramid.assign(1, &replacement).unwrap();
    assert_eq!(pyramid.get(1).unwrap().sum(), 32.0);

    let wrong = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[3, 3]).unwrap();
    let err = pyramid.assign(1, &wrong).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Shape);
}

// ============================================================================
// Error Tests
// ============================================================================

/// Calling reduce with src > dest is a sequence error and leaves every
/// existing level unmodified.
#[test]
fn test_reduce_wrong_order_is_sequence_error() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[8, 8], 1.0).unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 2).unwrap();
    pyramid.reduce(0, 2, 0.42).unwrap();
    let before: Vec<f64> = (0..3)
        .map(|level| pyramid.get(level).unwrap().sum())
        .collect();

    let err = pyramid.reduce(2, 1, 0.42).unwrap_err();
    assert_eq!(
        err,
        ArrayError::LevelOrder {
            op: "reduce",
            src: 2,
            dest: 1
        }
    );
    assert_eq!(err.class(), ErrorClass::Sequence);

    let after: Vec<f64> = (0..3)
        .map(|level| pyramid.get(level).unwrap().sum())
        .collect();
    assert_eq!(before, after);
}

/// Expand with src < dest is the mirror-image sequence error.
#[test]
fn test_expand_wrong_order_is_sequence_error() {
    let image = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[8, 8]).unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 1).unwrap();
    let err = pyramid.expand(0, 1, 0.42).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Sequence);
}

/// A reduce source outside the populated range is an axis-range error.
#[test]
fn test_reduce_source_out_of_range() {
    let image = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[8, 8]).unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 1).unwrap();
    let err = pyramid.reduce(-1, 1, 0.42).unwrap_err();
    assert_eq!(err.class(), ErrorClass::AxisRange);
}

// ============================================================================
// Laplacian Tests
// ============================================================================

/// Plain expand(reduce(...)) does not reconstruct the original, but the
/// Laplacian pair does, to floating-point accuracy, for any depth.
#[test]
fn test_laplacian_round_trip() {
    for depth in 1..4 {
        let image = ramp_image(16, 16);
        let mut pyramid = Pyramid::new(&image, 0, 0, 0).unwrap();
        pyramid.reduce_laplacian(0, depth, 0.42).unwrap();
        pyramid.expand_laplacian(depth, 0, 0.42).unwrap();

        let restored = pyramid.get(0).unwrap();
        for i in 0..16 {
            for j in 0..16 {
                assert_relative_eq!(
                    *restored.get(&[i, j]).unwrap(),
                    *image.get(&[i, j]).unwrap(),
                    max_relative = 1e-9
                );
            }
        }
    }
}

/// The same round-trip holds for odd extents, where the parity sublattices
/// have unequal sizes.
#[test]
fn test_laplacian_round_trip_odd_extents() {
    let image = ramp_image(11, 9);
    let mut pyramid = Pyramid::new(&image, 0, 0, 0).unwrap();
    pyramid.reduce_laplacian(0, 2, 0.42).unwrap();
    pyramid.expand_laplacian(2, 0, 0.42).unwrap();

    let restored = pyramid.get(0).unwrap();
    for i in 0..11 {
        for j in 0..9 {
            assert_relative_eq!(
                *restored.get(&[i, j]).unwrap(),
                *image.get(&[i, j]).unwrap(),
                max_relative = 1e-9
            );
        }
    }
}

/// After reduce_laplacian, the coarsest level still holds actual image
/// content while finer levels hold difference images.
#[test]
fn test_reduce_laplacian_stores_differences() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[8, 8], 1.0).unwrap();
    let mut pyramid = Pyramid::new(&image, 0, 0, 0).unwrap();
    pyramid.reduce_laplacian(0, 2, 0.42).unwrap();

    // Constant field: the reconstruction equals the original, so the
    // difference images are (approximately) zero.
    assert_relative_eq!(pyramid.get(0).unwrap().sum(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(pyramid.get(1).unwrap().sum(), 0.0, epsilon = 1e-9);
    // The top level holds the reduced image itself.
    assert_relative_eq!(pyramid.get(2).unwrap().sum(), 4.0, max_relative = 1e-9);
}
