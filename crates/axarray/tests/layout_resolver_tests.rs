#![cfg(feature = "dev")]
//! Tests for memory-order tokens and layout resolution.
//!
//! These tests verify the layout layer:
//! - Token parsing and display
//! - Shape resolution against spatial dimensionality and channel count
//! - Stride-ordering resolution for every order token
//! - Ordering preservation across single channel-axis rank changes
//! - Stride-pattern classification, including the order round-trip property
//!
//! ## Test Organization
//!
//! 1. **Tokens** - Parse/display and the unsupported-token error
//! 2. **Shape Resolution** - Channel inference and incompatibility errors
//! 3. **Orderings** - Canonical stride orderings per token
//! 4. **Preservation** - The `Auto` copy path and its rank-shift rule
//! 5. **Classification** - Round-trips and ambiguity

use axarray::internals::layout::order::{classify, MemoryOrder};
use axarray::internals::layout::resolver::{
    default_axistags, preserved_ordering, resolve_ordering, resolve_shape,
};
use axarray::internals::axes::info::AxisKind;
use axarray::internals::primitives::dims::RawDims;
use axarray::internals::primitives::errors::{ArrayError, ErrorClass};

// ============================================================================
// Token Tests
// ============================================================================

/// The four tokens parse and print consistently.
#[test]
fn test_token_round_trip() {
    for token in ['C', 'F', 'V', 'A'] {
        let order = MemoryOrder::from_token(token).unwrap();
        assert_eq!(order.token(), token);
        assert_eq!(order.to_string(), token.to_string());
    }
}

/// Anything else is an order error.
#[test]
fn test_unsupported_token() {
    let err = MemoryOrder::from_token('K').unwrap_err();
    assert_eq!(err, ArrayError::UnsupportedOrder { token: 'K' });
    assert_eq!(err.class(), ErrorClass::Order);
}

// ============================================================================
// Shape Resolution Tests
// ============================================================================

/// A spatial-rank shape with inferred channels has one channel and no
/// channel axis.
#[test]
fn test_infer_single_channel() {
    let resolved = resolve_shape(&[4, 3], 2, 0).unwrap();
    assert_eq!(resolved.shape, vec![4, 3]);
    assert_eq!(resolved.channels, 1);
    assert!(!resolved.has_channel_axis);
}

/// An extra trailing dimension supplies the channel count.
#[test]
fn test_infer_trailing_channels() {
    let resolved = resolve_shape(&[4, 3, 3], 2, 0).unwrap();
    assert_eq!(resolved.shape, vec![4, 3, 3]);
    assert_eq!(resolved.channels, 3);
    assert!(resolved.has_channel_axis);
}

/// A deduced or declared channel count of 1 drops the explicit axis.
#[test]
fn test_trailing_one_is_dropped() {
    let resolved = resolve_shape(&[4, 3, 1], 2, 0).unwrap();
    assert_eq!(resolved.shape, vec![4, 3]);
    assert!(!resolved.has_channel_axis);

    let resolved = resolve_shape(&[4, 3, 1], 2, 1).unwrap();
    assert_eq!(resolved.shape, vec![4, 3]);
}

/// A fixed multi-channel kind appends its channel axis when omitted.
#[test]
fn test_fixed_channels_appended() {
    let resolved = resolve_shape(&[4, 3], 2, 3).unwrap();
    assert_eq!(resolved.shape, vec![4, 3, 3]);
    assert!(resolved.has_channel_axis);
}

/// Wrong rank or a trailing mismatch against fixed channels is a shape
/// error.
#[test]
fn test_incompatible_shapes() {
    for (shape, spatial, channels) in [
        (&[4, 3, 2, 2][..], 2usize, 0usize),
        (&[4][..], 2, 0),
        (&[4, 3, 7][..], 2, 3),
        (&[4, 3, 2][..], 2, 1),
    ] {
        let err = resolve_shape(shape, spatial, channels).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Shape, "shape {:?}", shape);
    }
}

// ============================================================================
// Ordering Tests
// ============================================================================

/// Row-major ranks run from last axis innermost to first axis outermost.
#[test]
fn test_row_major_ordering() {
    let resolved = resolve_shape(&[4, 3, 3], 2, 0).unwrap();
    let ordering = resolve_ordering(MemoryOrder::RowMajor, &resolved, None).unwrap();
    assert_eq!(ordering, vec![2, 1, 0]);
}

/// Channel-major gives the channel rank 0 and the spatial axes
/// column-major relative order.
#[test]
fn test_channel_major_ordering() {
    let resolved = resolve_shape(&[4, 3, 3], 2, 0).unwrap();
    let ordering = resolve_ordering(MemoryOrder::ChannelMajor, &resolved, None).unwrap();
    assert_eq!(ordering, vec![1, 2, 0]);

    let dims = RawDims::from_ordering(resolved.shape.clone(), &ordering);
    assert_eq!(dims.strides, vec![3, 12, 1]);
}

/// With a single channel, channel-major degenerates to column-major.
#[test]
fn test_channel_major_degenerates() {
    let resolved = resolve_shape(&[4, 3], 2, 0).unwrap();
    let channel_major = resolve_ordering(MemoryOrder::ChannelMajor, &resolved, None).unwrap();
    let col_major = resolve_ordering(MemoryOrder::ColMajor, &resolved, None).unwrap();
    assert_eq!(channel_major, col_major);
}

/// `Auto` without a source is the documented channel-major default.
#[test]
fn test_auto_defaults_to_channel_major() {
    let resolved = resolve_shape(&[4, 3, 3], 2, 0).unwrap();
    let auto = resolve_ordering(MemoryOrder::Auto, &resolved, None).unwrap();
    let channel_major = resolve_ordering(MemoryOrder::ChannelMajor, &resolved, None).unwrap();
    assert_eq!(auto, channel_major);
}

// ============================================================================
// Preservation Tests
// ============================================================================

/// Equal ranks pass the ordering through untouched.
#[test]
fn test_preserve_equal_rank() {
    assert_eq!(preserved_ordering(&[1, 2, 0], 3).unwrap(), vec![1, 2, 0]);
}

/// Dropping an innermost channel axis shifts the remaining ranks down.
#[test]
fn test_preserve_dropped_channel() {
    assert_eq!(preserved_ordering(&[1, 2, 0], 2).unwrap(), vec![0, 1]);
}

/// Dropping a non-innermost trailing axis keeps the remaining ranks.
#[test]
fn test_preserve_dropped_outer_axis() {
    assert_eq!(preserved_ordering(&[0, 1, 2], 2).unwrap(), vec![0, 1]);
}

/// Adding a channel axis shifts ranks up and makes the channel innermost.
#[test]
fn test_preserve_added_channel() {
    assert_eq!(preserved_ordering(&[0, 1], 3).unwrap(), vec![1, 2, 0]);
}

/// Rank differences beyond one are rejected, not guessed at.
#[test]
fn test_preserve_rank_mismatch() {
    let err = preserved_ordering(&[0, 1, 2, 3], 2).unwrap_err();
    assert_eq!(
        err,
        ArrayError::RankMismatch {
            source: 4,
            target: 2
        }
    );
    assert_eq!(err.class(), ErrorClass::Shape);
}

// ============================================================================
// Classification Tests
// ============================================================================

/// Resolving with a token and classifying the strides round-trips for every
/// token (modulo the single-channel degeneracy).
#[test]
fn test_order_round_trip() {
    let cases = [
        (&[4, 3, 3][..], 3usize, MemoryOrder::RowMajor, MemoryOrder::RowMajor),
        (&[4, 3, 3][..], 3, MemoryOrder::ColMajor, MemoryOrder::ColMajor),
        (&[4, 3, 3][..], 3, MemoryOrder::ChannelMajor, MemoryOrder::ChannelMajor),
        // One channel: channel-major degenerates to column-major.
        (&[4, 3][..], 1, MemoryOrder::ChannelMajor, MemoryOrder::ColMajor),
    ];
    for (shape, channels, requested, expected) in cases {
        let resolved = resolve_shape(shape, 2, 0).unwrap();
        let ordering = resolve_ordering(requested, &resolved, None).unwrap();
        let dims = RawDims::from_ordering(resolved.shape.clone(), &ordering);
        assert_eq!(
            classify(&dims, channels),
            Some(expected),
            "token {}",
            requested
        );
    }
}

/// A layout matching no canonical pattern classifies as none.
#[test]
fn test_ambiguous_layout() {
    // Transposed spatial strides with the channel no longer innermost.
    let dims = RawDims::new(vec![4, 3, 3], vec![1, 12, 4], 0);
    assert_eq!(classify(&dims, 3), None);
}

// ============================================================================
// Default Tag Tests
// ============================================================================

/// Column-major and channel-major arrays are indexed x, y; row-major is
/// reversed. An explicit channel axis contributes a trailing tag.
#[test]
fn test_default_tags() {
    let tags = default_axistags(2, true, MemoryOrder::ChannelMajor);
    let kinds: Vec<AxisKind> = tags.as_slice().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![AxisKind::X, AxisKind::Y, AxisKind::Channel]);

    let tags = default_axistags(3, false, MemoryOrder::RowMajor);
    let kinds: Vec<AxisKind> = tags.as_slice().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![AxisKind::Z, AxisKind::Y, AxisKind::X]);

    let tags = default_axistags(2, false, MemoryOrder::RowMajor);
    let kinds: Vec<AxisKind> = tags.as_slice().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![AxisKind::Y, AxisKind::X]);
}
