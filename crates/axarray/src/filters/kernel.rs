//! One-dimensional convolution kernels.
//!
//! ## Purpose
//!
//! This module provides the explicit-tap kernel value consumed by the
//! separable convolution primitive, together with the named constructors the
//! pyramid algorithms use: the three-tap Burt smoothing kernel and the
//! two-tap half-sample interpolation kernel.
//!
//! ## Design notes
//!
//! * **Inclusive support**: A kernel covers the offsets `left..=right` with
//!   `left <= 0 <= right`; asymmetric supports are what make the
//!   phase-shifted expansion kernels expressible.
//! * **Caller-chosen precision**: Taps share the element type of the arrays
//!   they convolve.
//!
//! ## Key concepts
//!
//! * **Burt smoothing kernel**: Taps `[0.5 - c, 2c, 0.5 - c]` for center
//!   weight parameter `c`; the taps sum to 1, so smoothing a constant field
//!   preserves the constant away from borders.
//! * **Half-sample kernel**: Taps `[0.5, 0.5]` over `[-1, 0]`, interpolating
//!   midway between two samples.
//!
//! ## Invariants
//!
//! * `taps.len() == (right - left + 1)` for every constructed kernel.
//!
//! ## Non-goals
//!
//! * This module does not perform convolution; see the sibling module.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ArrayError;

/// Center weight parameter used by the pyramid operations when callers have
/// no reason to choose their own.
pub const DEFAULT_BURT_CENTER: f64 = 0.42;

// ============================================================================
// Kernel1d
// ============================================================================

/// An explicit-tap 1-D convolution kernel over an inclusive support.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1d<A> {
    left: isize,
    right: isize,
    taps: Vec<A>,
}

impl<A: Float> Kernel1d<A> {
    /// A kernel from explicit taps over the support `left..=right`.
    pub fn explicit(left: isize, right: isize, taps: Vec<A>) -> Result<Self, ArrayError> {
        if left > 0 || right < 0 || taps.len() as isize != right - left + 1 {
            return Err(ArrayError::InvalidKernel {
                left,
                right,
                taps: taps.len(),
            });
        }
        Ok(Self { left, right, taps })
    }

    /// The three-tap Burt smoothing kernel `[0.5 - c, 2c, 0.5 - c]`.
    pub fn burt_smoothing(center: A) -> Self {
        let half = A::from(0.5).unwrap_or_else(A::one);
        let two = A::from(2.0).unwrap_or_else(A::one);
        Self {
            left: -1,
            right: 1,
            taps: vec![half - center, two * center, half - center],
        }
    }

    /// The two-tap half-sample kernel `[0.5, 0.5]` over `[-1, 0]`.
    pub fn half_sample() -> Self {
        let half = A::from(0.5).unwrap_or_else(A::one);
        Self {
            left: -1,
            right: 0,
            taps: vec![half, half],
        }
    }

    /// Left end of the support (inclusive, non-positive).
    #[inline]
    pub fn left(&self) -> isize {
        self.left
    }

    /// Right end of the support (inclusive, non-negative).
    #[inline]
    pub fn right(&self) -> isize {
        self.right
    }

    /// The taps, ordered from `left` to `right`.
    #[inline]
    pub fn taps(&self) -> &[A] {
        &self.taps
    }
}
