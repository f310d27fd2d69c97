//! Error types for axis-tagged array operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while constructing,
//! transforming, or resampling tagged arrays, including shape validation,
//! memory-order resolution, and pyramid level bookkeeping.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g., actual shape vs.
//!   declared spatial dimensionality) so callers can diagnose without replaying
//!   the operation.
//! * **Classified**: Every variant belongs to one of four failure classes
//!   (shape, order, axis range, sequence); see [`ErrorClass`].
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic
//!   messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`
//!   (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Shape errors**: Requested or derived shapes incompatible with the
//!    declared spatial dimensionality or channel count.
//! 2. **Order errors**: Unrecognized or unsatisfiable memory-order tokens.
//! 3. **Axis range errors**: Axis indices, element indices, or pyramid levels
//!    outside their valid bounds.
//! 4. **Sequence errors**: Pyramid operations called with source/destination
//!    levels in the wrong relative order.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * The failure class of a variant never changes across releases.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Classification
// ============================================================================

/// Coarse classification of array failures.
///
/// Callers that only need to distinguish "wrong shape" from "wrong call order"
/// can match on [`ArrayError::class`] instead of individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A requested or derived shape violates a structural contract.
    Shape,

    /// A memory-order token was unrecognized or unsatisfiable.
    Order,

    /// An axis index, element index, or pyramid level was out of bounds.
    AxisRange,

    /// A pyramid operation was called with levels in the wrong relative order.
    Sequence,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for tagged-array operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// A shape does not match the declared spatial dimensionality and
    /// channel count of the requested array kind.
    IncompatibleShape {
        /// The offending shape.
        shape: Vec<usize>,
        /// Declared number of spatial dimensions.
        spatial: usize,
        /// Declared channel count (0 = inferred from the trailing axis).
        channels: usize,
    },

    /// Two arrays that must agree in shape do not.
    ShapeMismatch {
        /// Shape of the left (or destination) operand.
        left: Vec<usize>,
        /// Shape of the right (or source) operand.
        right: Vec<usize>,
    },

    /// A reduction was requested along an axis of extent zero.
    EmptyAxis {
        /// The reduced axis.
        axis: usize,
    },

    /// A builder was asked to allocate without a shape or source array.
    MissingShape,

    /// Stride-order preservation was requested across a rank change larger
    /// than the addition or removal of a single channel axis.
    RankMismatch {
        /// Rank of the source stride ordering.
        source: usize,
        /// Rank of the target shape.
        target: usize,
    },

    /// An explicit tag sequence disagrees with the array's dimensionality.
    TagLengthMismatch {
        /// Number of tags supplied.
        tags: usize,
        /// Array dimensionality.
        ndim: usize,
    },

    /// A convolution kernel has an invalid support or tap count.
    InvalidKernel {
        /// Left end of the kernel support (inclusive, must be <= 0).
        left: isize,
        /// Right end of the kernel support (inclusive, must be >= 0).
        right: isize,
        /// Number of taps supplied.
        taps: usize,
    },

    /// A separable convolution received the wrong number of kernels.
    KernelCount {
        /// Number of convolution axes.
        expected: usize,
        /// Number of kernels supplied.
        got: usize,
    },

    /// An unrecognized memory-order token.
    UnsupportedOrder {
        /// The offending token.
        token: char,
    },

    /// An axis index outside the array's dimensionality.
    AxisOutOfRange {
        /// The offending axis index.
        axis: usize,
        /// The array's dimensionality.
        ndim: usize,
    },

    /// An element index or slice bound outside an axis extent.
    IndexOutOfRange {
        /// The indexed axis.
        axis: usize,
        /// The offending index or bound.
        index: usize,
        /// The axis extent.
        extent: usize,
    },

    /// A slice step of zero.
    ZeroStep {
        /// The sliced axis.
        axis: usize,
    },

    /// A sequence that is not a permutation of `0..ndim`.
    InvalidPermutation {
        /// The offending sequence.
        perm: Vec<usize>,
        /// The expected permutation length.
        ndim: usize,
    },

    /// A pyramid level outside the populated range.
    LevelOutOfRange {
        /// The requested level.
        level: i32,
        /// Lowest populated level (inclusive).
        lowest: i32,
        /// Highest populated level (inclusive).
        highest: i32,
    },

    /// A pyramid operation called with source/destination levels in the wrong
    /// relative order.
    LevelOrder {
        /// The operation name.
        op: &'static str,
        /// Source level.
        src: i32,
        /// Destination level.
        dest: i32,
    },
}

impl ArrayError {
    /// The coarse failure class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            ArrayError::IncompatibleShape { .. }
            | ArrayError::ShapeMismatch { .. }
            | ArrayError::EmptyAxis { .. }
            | ArrayError::MissingShape
            | ArrayError::RankMismatch { .. }
            | ArrayError::TagLengthMismatch { .. }
            | ArrayError::InvalidKernel { .. }
            | ArrayError::KernelCount { .. } => ErrorClass::Shape,
            ArrayError::UnsupportedOrder { .. } => ErrorClass::Order,
            ArrayError::AxisOutOfRange { .. }
            | ArrayError::IndexOutOfRange { .. }
            | ArrayError::ZeroStep { .. }
            | ArrayError::InvalidPermutation { .. }
            | ArrayError::LevelOutOfRange { .. } => ErrorClass::AxisRange,
            ArrayError::LevelOrder { .. } => ErrorClass::Sequence,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for ArrayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ArrayError::IncompatibleShape {
                shape,
                spatial,
                channels,
            } => write!(
                f,
                "shape {:?} is incompatible with {} spatial dimension(s) and {} channel(s)",
                shape, spatial, channels
            ),
            ArrayError::ShapeMismatch { left, right } => {
                write!(f, "shape mismatch: {:?} vs. {:?}", left, right)
            }
            ArrayError::EmptyAxis { axis } => {
                write!(f, "cannot reduce along axis {} of extent 0", axis)
            }
            ArrayError::MissingShape => {
                write!(f, "array construction requires a shape or a source array")
            }
            ArrayError::RankMismatch { source, target } => write!(
                f,
                "cannot preserve stride order from rank {} to rank {}: \
                 only a single added or removed channel axis is supported",
                source, target
            ),
            ArrayError::TagLengthMismatch { tags, ndim } => write!(
                f,
                "{} axis tag(s) supplied for an array of dimensionality {}",
                tags, ndim
            ),
            ArrayError::InvalidKernel { left, right, taps } => write!(
                f,
                "invalid kernel: support [{}, {}] requires {} tap(s), got {}",
                left,
                right,
                right - left + 1,
                taps
            ),
            ArrayError::KernelCount { expected, got } => write!(
                f,
                "expected one kernel or {} kernel(s), got {}",
                expected, got
            ),
            ArrayError::UnsupportedOrder { token } => {
                write!(f, "unsupported memory-order token '{}'", token)
            }
            ArrayError::AxisOutOfRange { axis, ndim } => write!(
                f,
                "axis {} is out of range for an array of dimensionality {}",
                axis, ndim
            ),
            ArrayError::IndexOutOfRange {
                axis,
                index,
                extent,
            } => write!(
                f,
                "index {} is out of range for axis {} of extent {}",
                index, axis, extent
            ),
            ArrayError::ZeroStep { axis } => {
                write!(f, "slice step along axis {} must be at least 1", axis)
            }
            ArrayError::InvalidPermutation { perm, ndim } => write!(
                f,
                "{:?} is not a permutation of 0..{}",
                perm, ndim
            ),
            ArrayError::LevelOutOfRange {
                level,
                lowest,
                highest,
            } => write!(
                f,
                "pyramid level {} is outside the populated range [{}, {}]",
                level, lowest, highest
            ),
            ArrayError::LevelOrder { op, src, dest } => write!(
                f,
                "{}: source level {} and destination level {} are in the wrong order",
                op, src, dest
            ),
        }
    }
}

#[cfg(feature = "std")]
impl Error for ArrayError {}
