//! Ordered axis-tag sequences.
//!
//! ## Purpose
//!
//! This module provides [`AxisTags`], the ordered sequence of [`AxisInfo`]
//! values carried by every tagged array, one per dimension. All shape- or
//! order-changing array operations route their metadata updates through the
//! operations defined here, so tags and dimensionality can never drift apart.
//!
//! ## Design notes
//!
//! * **Same-call updates**: Arrays update their tags inside the operation that
//!   changes shape or order; a tag sequence whose length disagrees with the
//!   owning array's dimensionality is a bug, never a transient state.
//! * **Honest degradation**: When provenance cannot be tracked (reshapes,
//!   flattening copies), tags degrade to `Unknown` rather than fabricating
//!   axis meanings.
//! * **Exchange format**: With the `serde` feature, tag sequences round-trip
//!   through a JSON array of `{"key", "resolution"}` objects so layout
//!   metadata can travel alongside stored samples.
//!
//! ## Key concepts
//!
//! * **Transform under indexing**: Surviving axes keep their tags, point
//!   indices drop theirs, inserted axes get `Unknown`.
//! * **Canonical ordering**: Spatial and other non-channel axes first, in
//!   their declared order, channel axis last; used by channel-major
//!   canonicalization where stride order alone is not authoritative.
//!
//! ## Invariants
//!
//! * `transpose` accepts only a permutation of `0..len`.
//! * `transform` output length always equals the result dimensionality it is
//!   given.
//!
//! ## Non-goals
//!
//! * This module does not decide default tags for new arrays; the layout
//!   layer does, because defaults depend on the memory order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(all(feature = "serde", not(feature = "std")))]
use alloc::string::String;
#[cfg(all(feature = "serde", feature = "std"))]
use std::string::String;

// Internal dependencies
use crate::axes::info::AxisInfo;
use crate::primitives::errors::ArrayError;
use crate::primitives::slices::Slice;

// ============================================================================
// AxisTags
// ============================================================================

/// Ordered sequence of axis descriptions, one per array dimension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisTags(Vec<AxisInfo>);

impl AxisTags {
    /// Tags from an explicit sequence.
    pub fn from_infos(infos: Vec<AxisInfo>) -> Self {
        Self(infos)
    }

    /// `n` axes without semantic information.
    pub fn unknown(n: usize) -> Self {
        Self(vec![AxisInfo::unknown(); n])
    }

    /// Number of tagged axes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence is empty (scalar rank).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The tag at `pos`, if any.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&AxisInfo> {
        self.0.get(pos)
    }

    /// All tags as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[AxisInfo] {
        &self.0
    }

    /// Insert a tag at `pos`.
    pub fn insert(&mut self, pos: usize, info: AxisInfo) -> Result<(), ArrayError> {
        if pos > self.0.len() {
            return Err(ArrayError::AxisOutOfRange {
                axis: pos,
                ndim: self.0.len(),
            });
        }
        self.0.insert(pos, info);
        Ok(())
    }

    /// Remove and return the tag at `pos`.
    pub fn remove(&mut self, pos: usize) -> Result<AxisInfo, ArrayError> {
        if pos >= self.0.len() {
            return Err(ArrayError::AxisOutOfRange {
                axis: pos,
                ndim: self.0.len(),
            });
        }
        Ok(self.0.remove(pos))
    }

    /// Swap the tags at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        let ndim = self.0.len();
        if i >= ndim {
            return Err(ArrayError::AxisOutOfRange { axis: i, ndim });
        }
        if j >= ndim {
            return Err(ArrayError::AxisOutOfRange { axis: j, ndim });
        }
        self.0.swap(i, j);
        Ok(())
    }

    /// Reorder the tags by the same permutation applied to the array's axes:
    /// position `j` of the result holds the tag of axis `perm[j]`.
    ///
    /// `None` reverses the sequence, mirroring a full-axis transpose.
    pub fn transpose(&mut self, perm: Option<&[usize]>) -> Result<(), ArrayError> {
        match perm {
            None => {
                self.0.reverse();
                Ok(())
            }
            Some(perm) => {
                validate_permutation(perm, self.0.len())?;
                let old = core::mem::take(&mut self.0);
                self.0 = perm.iter().map(|&k| old[k]).collect();
                Ok(())
            }
        }
    }

    /// Recompute tags under an indexing operation.
    ///
    /// `specs` must already be padded to cover every input axis. Sliced axes
    /// keep their tags, point indices drop theirs, inserted axes get
    /// `Unknown`. The result length equals the indexing result's
    /// dimensionality by construction.
    pub fn transform(&self, specs: &[Slice]) -> Self {
        let mut out = Vec::new();
        let mut axis = 0usize;
        for spec in specs {
            match spec {
                Slice::Full | Slice::Range { .. } => {
                    out.push(self.0[axis]);
                    axis += 1;
                }
                Slice::At(_) => {
                    axis += 1;
                }
                Slice::NewAxis => {
                    out.push(AxisInfo::unknown());
                }
            }
        }
        debug_assert_eq!(axis, self.0.len());
        Self(out)
    }

    /// Position of the first channel axis, if any.
    pub fn channel_axis(&self) -> Option<usize> {
        self.0.iter().position(|t| t.is_channel())
    }

    /// Number of spatial axes in the sequence.
    pub fn spatial_count(&self) -> usize {
        self.0.iter().filter(|t| t.is_spatial()).count()
    }

    /// Permutation that arranges axes canonically: non-channel axes first in
    /// their declared order, channel axes last.
    ///
    /// Position `j` of the returned permutation is the current axis index
    /// that belongs at position `j`, i.e. the value is directly usable as a
    /// `transpose` argument.
    pub fn canonical_ordering(&self) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.0.len())
            .filter(|&k| !self.0[k].is_channel())
            .collect();
        perm.extend((0..self.0.len()).filter(|&k| self.0[k].is_channel()));
        perm
    }
}

impl<'a> IntoIterator for &'a AxisTags {
    type Item = &'a AxisInfo;
    type IntoIter = core::slice::Iter<'a, AxisInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Check that `perm` is a permutation of `0..ndim`.
pub(crate) fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), ArrayError> {
    if perm.len() != ndim {
        return Err(ArrayError::InvalidPermutation {
            perm: perm.to_vec(),
            ndim,
        });
    }
    let mut seen = vec![false; ndim];
    for &k in perm {
        if k >= ndim || seen[k] {
            return Err(ArrayError::InvalidPermutation {
                perm: perm.to_vec(),
                ndim,
            });
        }
        seen[k] = true;
    }
    Ok(())
}

// ============================================================================
// Exchange Format
// ============================================================================

#[cfg(feature = "serde")]
mod exchange {
    use super::*;
    use crate::axes::info::AxisKind;
    use serde::{Deserialize, Serialize};

    /// One axis as it appears in the exchange format.
    #[derive(Serialize, Deserialize)]
    struct AxisRepr {
        key: String,
        #[serde(default)]
        resolution: f64,
    }

    impl AxisTags {
        /// Serialize the tag sequence to the JSON exchange format.
        pub fn to_json(&self) -> Result<String, serde_json::Error> {
            let reprs: Vec<AxisRepr> = self
                .as_slice()
                .iter()
                .map(|info| AxisRepr {
                    key: info.kind.key().into(),
                    resolution: info.resolution,
                })
                .collect();
            serde_json::to_string(&reprs)
        }

        /// Deserialize a tag sequence from the JSON exchange format.
        ///
        /// Unrecognized keys become `Unknown` axes; metadata loss is
        /// preferred over rejecting stored data.
        pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
            let reprs: Vec<AxisRepr> = serde_json::from_str(json)?;
            Ok(Self::from_infos(
                reprs
                    .iter()
                    .map(|r| {
                        let kind = r.key.chars().next().map(AxisKind::from_key);
                        AxisInfo::new(kind.unwrap_or(AxisKind::Unknown))
                            .with_resolution(r.resolution)
                    })
                    .collect(),
            ))
        }
    }
}
