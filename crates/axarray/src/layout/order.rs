//! Memory-order tokens and stride classification.
//!
//! ## Purpose
//!
//! This module defines the four supported memory-order requests and the
//! classifier that recognizes which of the canonical stride patterns an
//! existing array currently exhibits.
//!
//! ## Design notes
//!
//! * **Token compatibility**: Each order has a one-character token
//!   (`C`, `F`, `V`, `A`) preserved from the exchange conventions of the
//!   surrounding ecosystem.
//! * **No guessing**: Classification compares actual strides against the
//!   canonical patterns and reports `None` when nothing matches; an order is
//!   never fabricated for a custom layout.
//!
//! ## Key concepts
//!
//! * **Row-major** (`C`): First axis varies slowest, last axis fastest.
//! * **Column-major** (`F`): First axis varies fastest, last axis slowest.
//! * **Channel-major** (`V`): Spatial axes in column-major relative order,
//!   channel axis innermost, so vector-valued samples occupy contiguous
//!   memory. Degenerates to column-major when there is a single channel.
//! * **Auto** (`A`): Channel-major for fresh allocations; "preserve the
//!   source's stride ordering" when copying.
//!
//! ## Invariants
//!
//! * `classify` only returns `ChannelMajor` for arrays with more than one
//!   channel.
//!
//! ## Non-goals
//!
//! * This module does not compute stride orderings for allocation; see the
//!   resolver.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;

// ============================================================================
// MemoryOrder
// ============================================================================

/// Requested or recognized memory layout of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryOrder {
    /// Standard reversed-index layout: last axis fastest ('C').
    RowMajor,

    /// First axis fastest ('F').
    ColMajor,

    /// Channel axis innermost, spatial axes column-major among themselves
    /// ('V').
    #[default]
    ChannelMajor,

    /// Channel-major for fresh allocations, "preserve the source's stride
    /// ordering" for copies ('A').
    Auto,
}

impl MemoryOrder {
    /// Parse a one-character order token.
    pub fn from_token(token: char) -> Result<Self, ArrayError> {
        match token {
            'C' => Ok(MemoryOrder::RowMajor),
            'F' => Ok(MemoryOrder::ColMajor),
            'V' => Ok(MemoryOrder::ChannelMajor),
            'A' => Ok(MemoryOrder::Auto),
            _ => Err(ArrayError::UnsupportedOrder { token }),
        }
    }

    /// The one-character token of this order.
    pub fn token(self) -> char {
        match self {
            MemoryOrder::RowMajor => 'C',
            MemoryOrder::ColMajor => 'F',
            MemoryOrder::ChannelMajor => 'V',
            MemoryOrder::Auto => 'A',
        }
    }

    /// The stride ordering this order assigns to `rank` axes.
    ///
    /// `ordering[k]` is the rank of axis `k`, rank 0 innermost.
    /// `has_channel_axis` marks a trailing channel axis with extent
    /// `channels`; channel-major places it at rank 0 and is only distinct
    /// from column-major when `channels > 1`.
    ///
    /// `Auto` has no fixed ordering and must be resolved first; asking for
    /// its ordering is a caller bug.
    pub(crate) fn stride_ordering(
        self,
        rank: usize,
        channels: usize,
        has_channel_axis: bool,
    ) -> Vec<usize> {
        match self {
            MemoryOrder::RowMajor => (0..rank).rev().collect(),
            MemoryOrder::ColMajor => (0..rank).collect(),
            MemoryOrder::ChannelMajor => {
                if has_channel_axis && channels > 1 {
                    // Spatial ranks 1..rank in order, channel innermost.
                    let mut ordering: Vec<usize> = (1..rank).collect();
                    ordering.push(0);
                    ordering
                } else {
                    (0..rank).collect()
                }
            }
            MemoryOrder::Auto => unreachable!("Auto must be resolved before ordering"),
        }
    }
}

impl Display for MemoryOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.token())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classify the stride pattern of an array as one of the canonical orders.
///
/// `channels` is the array's channel count; the channel axis, when explicit,
/// is the trailing one. Returns `None` when the strides match none of the
/// canonical patterns (ambiguous or custom layout).
pub fn classify(dims: &RawDims, channels: usize) -> Option<MemoryOrder> {
    let rank = dims.ndim();
    let has_channel_axis = channels > 1;

    let row = RawDims::from_ordering(
        dims.shape.clone(),
        &MemoryOrder::RowMajor.stride_ordering(rank, channels, has_channel_axis),
    );
    if dims.strides == row.strides {
        return Some(MemoryOrder::RowMajor);
    }

    let col = RawDims::from_ordering(
        dims.shape.clone(),
        &MemoryOrder::ColMajor.stride_ordering(rank, channels, has_channel_axis),
    );
    if dims.strides == col.strides {
        return Some(MemoryOrder::ColMajor);
    }

    if has_channel_axis {
        let chan = RawDims::from_ordering(
            dims.shape.clone(),
            &MemoryOrder::ChannelMajor.stride_ordering(rank, channels, has_channel_axis),
        );
        if dims.strides == chan.strides {
            return Some(MemoryOrder::ChannelMajor);
        }
    }

    None
}
