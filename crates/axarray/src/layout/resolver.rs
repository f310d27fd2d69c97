//! Shape and stride-order resolution.
//!
//! ## Purpose
//!
//! This module turns a construction request (a shape or source array, a
//! spatial dimensionality, a channel count, and an order token) into the
//! concrete shape and per-axis stride ordering of the array to allocate.
//! It is the single place where "what does this order token mean for this
//! shape" is decided.
//!
//! ## Design notes
//!
//! * **Pure functions**: Resolution computes metadata only; allocation
//!   happens in the array layer from the returned ordering, through one code
//!   path regardless of the requested order.
//! * **Fail-fast**: Shape checks run before any ordering work, ordered from
//!   cheap to expensive.
//! * **Documented default**: `Auto` without a source array resolves to
//!   channel-major. This is the one sanctioned default; every other
//!   contract violation is an error, never silently corrected.
//!
//! ## Key concepts
//!
//! * **Channel inference**: A channel count of 0 means "deduce from the
//!   shape": one extra trailing dimension beyond the spatial rank is the
//!   channel extent; otherwise the array has one channel and no explicit
//!   channel axis.
//! * **Ordering preservation**: Copying with `Auto` keeps the source's
//!   stride ordering. When the copy adds or drops the channel axis, the
//!   ordering indices shift by one and the channel rank 0 is appended or
//!   removed. A rank difference larger than one is rejected.
//!
//! ## Invariants
//!
//! * A resolved shape always has rank `spatial` or `spatial + 1`, and its
//!   trailing extent equals the resolved channel count whenever the channel
//!   axis is explicit.
//! * A resolved ordering is usable with `RawDims::from_ordering` unchanged.
//!
//! ## Non-goals
//!
//! * This module does not touch buffers or element values.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::axes::info::AxisInfo;
use crate::axes::tags::AxisTags;
use crate::layout::order::MemoryOrder;
use crate::primitives::errors::ArrayError;

// ============================================================================
// Resolved Layout
// ============================================================================

/// Outcome of shape resolution: the concrete shape to allocate plus the
/// channel bookkeeping derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShape {
    /// Concrete shape, channel axis (if any) trailing.
    pub shape: Vec<usize>,

    /// Resolved channel count (at least 1).
    pub channels: usize,

    /// Whether the shape carries an explicit trailing channel axis.
    pub has_channel_axis: bool,
}

/// Resolve a requested shape against a declared spatial dimensionality and
/// channel count.
///
/// * `channels == 0`: deduce the channel count. A shape of spatial rank has
///   one channel and no channel axis; one extra trailing dimension is the
///   channel extent (a deduced extent of 1 drops the explicit axis).
/// * `channels == 1`: a trailing extent-1 axis is accepted and dropped.
/// * `channels > 1`: the channel axis may be omitted (it is appended with the
///   declared extent) or must match the declared extent exactly.
pub fn resolve_shape(
    requested: &[usize],
    spatial: usize,
    channels: usize,
) -> Result<ResolvedShape, ArrayError> {
    let err = || ArrayError::IncompatibleShape {
        shape: requested.to_vec(),
        spatial,
        channels,
    };

    if requested.len() != spatial && requested.len() != spatial + 1 {
        return Err(err());
    }

    let deduced = if channels == 0 {
        if requested.len() == spatial {
            1
        } else {
            requested[spatial]
        }
    } else {
        channels
    };

    if deduced > 1 {
        let mut shape = requested[..spatial].to_vec();
        if requested.len() == spatial + 1 && channels > 1 && requested[spatial] != channels {
            return Err(err());
        }
        shape.push(deduced);
        Ok(ResolvedShape {
            shape,
            channels: deduced,
            has_channel_axis: true,
        })
    } else {
        // One channel: no explicit channel axis in the allocated shape.
        if requested.len() == spatial + 1 && requested[spatial] != 1 {
            return Err(err());
        }
        Ok(ResolvedShape {
            shape: requested[..spatial].to_vec(),
            channels: 1,
            has_channel_axis: false,
        })
    }
}

// ============================================================================
// Ordering Resolution
// ============================================================================

/// Resolve an order token into a concrete stride ordering for `resolved`.
///
/// `source_ordering` is the stride ordering of the array being copied, when
/// there is one; it is only consulted by `Auto`.
pub fn resolve_ordering(
    order: MemoryOrder,
    resolved: &ResolvedShape,
    source_ordering: Option<&[usize]>,
) -> Result<Vec<usize>, ArrayError> {
    let rank = resolved.shape.len();
    match order {
        MemoryOrder::Auto => match source_ordering {
            None => Ok(MemoryOrder::ChannelMajor.stride_ordering(
                rank,
                resolved.channels,
                resolved.has_channel_axis,
            )),
            Some(src) => preserved_ordering(src, rank),
        },
        concrete => Ok(concrete.stride_ordering(rank, resolved.channels, resolved.has_channel_axis)),
    }
}

/// Adapt a source stride ordering to a target rank.
///
/// Equal ranks pass through. When the target dropped the source's channel
/// axis, the trailing ordering entry is cut and, if the channel was the
/// innermost axis, all remaining ranks shift down by one. When the target
/// added a channel axis, all ranks shift up and the channel takes rank 0.
/// Any larger rank difference is rejected rather than guessed at.
pub fn preserved_ordering(source: &[usize], target: usize) -> Result<Vec<usize>, ArrayError> {
    if source.len() == target {
        Ok(source.to_vec())
    } else if source.len() == target + 1 {
        let mut ordering = source[..target].to_vec();
        if source[target] == 0 {
            for rank in ordering.iter_mut() {
                *rank -= 1;
            }
        }
        Ok(ordering)
    } else if source.len() + 1 == target {
        let mut ordering: Vec<usize> = source.iter().map(|&rank| rank + 1).collect();
        ordering.push(0);
        Ok(ordering)
    } else {
        Err(ArrayError::RankMismatch {
            source: source.len(),
            target,
        })
    }
}

// ============================================================================
// Default Axis Tags
// ============================================================================

/// Default tag sequence for a freshly allocated array.
///
/// Column-major and channel-major arrays are indexed `[x, y(, z)]`; row-major
/// arrays are indexed with the reversed spatial sequence. An explicit channel
/// axis always contributes a trailing channel tag.
pub fn default_axistags(spatial: usize, has_channel_axis: bool, order: MemoryOrder) -> AxisTags {
    debug_assert!(spatial == 2 || spatial == 3);
    let spatial_tags: Vec<AxisInfo> = match order {
        MemoryOrder::RowMajor => {
            let all = [AxisInfo::z(), AxisInfo::y(), AxisInfo::x()];
            all[3 - spatial..].to_vec()
        }
        _ => {
            let all = [AxisInfo::x(), AxisInfo::y(), AxisInfo::z()];
            all[..spatial].to_vec()
        }
    };
    let mut infos = spatial_tags;
    if has_channel_axis {
        infos.push(AxisInfo::channel());
    }
    AxisTags::from_infos(infos)
}
