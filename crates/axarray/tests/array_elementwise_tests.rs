#![cfg(feature = "dev")]
//! Tests for element-wise combinators and operator sugar.
//!
//! These tests verify that generic numeric operations preserve the left
//! operand's concrete kind, tags, and stride ordering, which is the whole
//! reason the combinator layer exists.
//!
//! ## Test Organization
//!
//! 1. **Combinators** - map / zip_map / map_inplace
//! 2. **Operators** - Arithmetic sugar, scalar operands, negation
//! 3. **Comparisons** - Boolean result arrays
//! 4. **Errors** - Shape mismatches

use axarray::internals::axes::info::AxisKind;
use axarray::internals::primitives::errors::{ArrayError, ErrorClass};
use axarray::prelude::*;

// ============================================================================
// Combinator Tests
// ============================================================================

/// `map` preserves kind, tags, and stride ordering.
#[test]
fn test_map_preserves_identity() {
    let image = TaggedArray::<f64>::from_elem(ArrayKind::RGB_IMAGE, &[4, 3], 2.0).unwrap();
    let doubled = image.map(|v| v * 2.0);
    assert_eq!(doubled.strides(), image.strides());
    assert_eq!(doubled.tags(), image.tags());
    assert_eq!(doubled.kind(), Some(ArrayKind::VECTOR3_IMAGE));
    assert_eq!(doubled.get(&[1, 1, 1]), Some(&4.0));
}

/// `zip_map` combines at matching logical indices even when layouts differ.
#[test]
fn test_zip_map_across_layouts() {
    let left = TaggedArray::<f64>::from_shape_fn(
        ArrayKind::SCALAR_IMAGE,
        &[3, 2],
        ColMajor,
        |idx| (idx[0] * 10 + idx[1]) as f64,
    )
    .unwrap();
    let right = TaggedArray::<f64>::from_shape_fn(
        ArrayKind::SCALAR_IMAGE,
        &[3, 2],
        RowMajor,
        |idx| (idx[0] * 10 + idx[1]) as f64,
    )
    .unwrap();
    assert_ne!(left.strides(), right.strides());

    let diff = left.zip_map(&right, |a, b| a - b).unwrap();
    assert!(diff.as_slice().iter().all(|&v| v == 0.0));
    // The left operand decides the result layout and tags.
    assert_eq!(diff.strides(), left.strides());
    assert_eq!(diff.tags(), left.tags());
}

/// `map_inplace` rewrites every element without touching structure.
#[test]
fn test_map_inplace() {
    let mut image = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[3, 3], 1.0).unwrap();
    image.map_inplace(|v| v + 1.0);
    assert_eq!(image.sum(), 18.0);
    assert_eq!(image.shape(), &[3, 3]);
}

// ============================================================================
// Operator Tests
// ============================================================================

/// Binary operators route through the combinator and keep tags.
#[test]
fn test_binary_operators() {
    let a = TaggedArray::<f64>::from_elem(ArrayKind::RGB_IMAGE, &[2, 2], 6.0).unwrap();
    let b = TaggedArray::<f64>::from_elem(ArrayKind::RGB_IMAGE, &[2, 2], 2.0).unwrap();

    let sum = &a + &b;
    assert_eq!(sum.get(&[0, 0, 0]), Some(&8.0));
    assert_eq!(sum.tags(), a.tags());

    let difference = &a - &b;
    assert_eq!(difference.get(&[1, 1, 2]), Some(&4.0));

    let product = &a * &b;
    assert_eq!(product.get(&[0, 1, 1]), Some(&12.0));

    let quotient = &a / &b;
    assert_eq!(quotient.get(&[1, 0, 0]), Some(&3.0));

    let remainder = &a % &b;
    assert_eq!(remainder.get(&[0, 0, 0]), Some(&0.0));
}

/// Scalar operands apply element-wise.
#[test]
fn test_scalar_operators() {
    let a = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[2, 3], 5.0).unwrap();
    let shifted = &a + 1.5;
    assert_eq!(shifted.get(&[0, 0]), Some(&6.5));

    let halved = &a / 2.0;
    assert_eq!(halved.get(&[1, 2]), Some(&2.5));

    let negated = -&a;
    assert_eq!(negated.get(&[0, 1]), Some(&-5.0));
    assert_eq!(negated.tags(), a.tags());
}

// ============================================================================
// Comparison Tests
// ============================================================================

/// Comparisons produce boolean arrays carrying the left operand's tags.
#[test]
fn test_comparisons() {
    let a = TaggedArray::<f64>::from_shape_fn(
        ArrayKind::SCALAR_IMAGE,
        &[2, 2],
        ColMajor,
        |idx| (idx[0] * 2 + idx[1]) as f64,
    )
    .unwrap();
    let b = TaggedArray::<f64>::from_elem(ArrayKind::SCALAR_IMAGE, &[2, 2], 1.0).unwrap();

    let less = a.lt_elem(&b).unwrap();
    assert_eq!(less.get(&[0, 0]), Some(&true));
    assert_eq!(less.get(&[0, 1]), Some(&false));
    assert_eq!(
        less.tags().get(0).unwrap().kind,
        AxisKind::X
    );

    let equal = a.eq_elem(&b).unwrap();
    assert_eq!(equal.get(&[0, 1]), Some(&true));
    assert_eq!(equal.get(&[1, 0]), Some(&false));

    let greater_or_equal = a.ge_elem(&b).unwrap();
    assert_eq!(greater_or_equal.get(&[1, 1]), Some(&true));
}

// ============================================================================
// Error Tests
// ============================================================================

/// Shape mismatches are reported, not broadcast.
#[test]
fn test_shape_mismatch() {
    let a = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[2, 3]).unwrap();
    let b = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[3, 2]).unwrap();
    let err = a.zip_map(&b, |x, y| x + y).unwrap_err();
    assert_eq!(
        err,
        ArrayError::ShapeMismatch {
            left: vec![2, 3],
            right: vec![3, 2]
        }
    );
    assert_eq!(err.class(), ErrorClass::Shape);
}

/// The operator sugar panics on mismatched shapes.
#[test]
#[should_panic(expected = "array addition")]
fn test_operator_panics_on_mismatch() {
    let a = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[2, 3]).unwrap();
    let b = TaggedArray::<f64>::zeros(ArrayKind::SCALAR_IMAGE, &[3, 2]).unwrap();
    let _ = &a + &b;
}
