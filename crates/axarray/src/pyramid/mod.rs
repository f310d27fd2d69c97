//! Layer 6: Pyramid
//!
//! # Purpose
//!
//! This layer provides the multiresolution image pyramid: an indexed stack of
//! tagged arrays whose shapes halve (rounding up) from one level to the next,
//! with the classical Burt reduce/expand operations and their Laplacian
//! variants.
//!
//! # Architecture
//!
//! ```text
//! API / prelude
//!   ↓
//! Layer 6: Pyramid ← You are here
//!   ↓
//! Layer 5: Filters
//!   ↓
//! Layer 4: Array
//!   ↓
//! Layer 3: Layout
//!   ↓
//! Layer 2: Axes
//!   ↓
//! Layer 1: Primitives
//! ```
//!
//! ## Design notes
//!
//! * **Sequential growth**: New levels derive their shapes from the
//!   immediately neighboring level, one step at a time. Halving followed by
//!   doubling is not an exact inverse, so recomputing from the base image
//!   would produce inconsistent shapes.
//! * **Checks before mutation**: Level-order and level-range violations are
//!   reported before any level is created or modified.
//! * **Delegated filtering**: All smoothing and interpolation goes through
//!   the separable convolution primitive; this module only does level and
//!   parity bookkeeping.
//!
//! ## Key concepts
//!
//! * **Level direction**: Higher levels are coarser (smaller); `reduce` moves
//!   upward, `expand` moves downward.
//! * **Parity interleaving**: Expansion fills the four (even/odd row) ×
//!   (even/odd column) sublattices of the finer level with four
//!   phase-shifted separable convolutions, covering every destination
//!   element exactly once.
//! * **Laplacian storage**: `reduce_laplacian` stores, at each processed
//!   level, the difference between the coarser level's upsampled
//!   reconstruction and the level's original content; `expand_laplacian`
//!   inverts that by mirror-image subtraction, reconstructing the original
//!   to floating-point accuracy.
//!
//! ## Invariants
//!
//! * Every integer level in `[lowest_level, highest_level]` is populated.
//! * `shape(level + 1) == ceil(shape(level) / 2)` per spatial axis; channel
//!   extents never change across levels.
//!
//! ## Non-goals
//!
//! * Volume pyramids: the parity scheme above is two-dimensional, so only
//!   image-family arrays are accepted.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::array::tagged::TaggedArray;
use crate::filters::convolve::convolve_separable;
use crate::filters::kernel::Kernel1d;
use crate::layout::order::MemoryOrder;
use crate::primitives::dims::RawDims;
use crate::primitives::errors::ArrayError;
use crate::primitives::slices::Slice;

// ============================================================================
// Pyramid
// ============================================================================

/// A growable multiresolution stack of image-family arrays.
#[derive(Debug, Clone)]
pub struct Pyramid<A> {
    levels: Vec<TaggedArray<A>>,
    lowest: i32,
    highest: i32,
}

impl<A: Float> Pyramid<A> {
    /// Create a pyramid spanning `[lowest, highest]`, copying `image` into
    /// `copy_dest_level` and zero-filling every other level.
    ///
    /// Only image-family (2 spatial axes) arrays are accepted; the expansion
    /// scheme is two-dimensional.
    pub fn new(
        image: &TaggedArray<A>,
        copy_dest_level: i32,
        lowest: i32,
        highest: i32,
    ) -> Result<Self, ArrayError> {
        if image.spatial_dimensions() != 2 {
            return Err(ArrayError::IncompatibleShape {
                shape: image.shape().to_vec(),
                spatial: 2,
                channels: image.channels(),
            });
        }
        if copy_dest_level < lowest || copy_dest_level > highest {
            return Err(ArrayError::LevelOutOfRange {
                level: copy_dest_level,
                lowest,
                highest,
            });
        }

        let mut pyramid = Self {
            levels: vec![image.copy(MemoryOrder::Auto)],
            lowest: copy_dest_level,
            highest: copy_dest_level,
        };
        pyramid.create_level(lowest);
        pyramid.create_level(highest);
        Ok(pyramid)
    }

    /// Lowest populated level (inclusive).
    #[inline]
    pub fn lowest_level(&self) -> i32 {
        self.lowest
    }

    /// Highest populated level (inclusive).
    #[inline]
    pub fn highest_level(&self) -> i32 {
        self.highest
    }

    /// The array at `level`.
    pub fn get(&self, level: i32) -> Result<&TaggedArray<A>, ArrayError> {
        self.check_level(level)?;
        Ok(&self.levels[(level - self.lowest) as usize])
    }

    /// Copy the data of `src` into the array at `level`.
    pub fn assign(&mut self, level: i32, src: &TaggedArray<A>) -> Result<(), ArrayError> {
        self.check_level(level)?;
        let idx = (level - self.lowest) as usize;
        self.levels[idx].view_mut().assign(&src.view())
    }

    /// Make sure `level` exists, growing the populated range one level at a
    /// time.
    ///
    /// Levels above the current range take the half-rounded-up shape of their
    /// lower neighbor; levels below take the doubled-minus-one shape of their
    /// upper neighbor. Channel extents are preserved. New levels are
    /// zero-filled.
    pub fn create_level(&mut self, level: i32) {
        if level > self.highest {
            for _ in self.highest..level {
                let neighbor = &self.levels[self.levels.len() - 1];
                let shape = scaled_shape(neighbor, ShapeStep::Halve);
                let fresh = zero_level_like(neighbor, shape);
                self.levels.push(fresh);
            }
            self.highest = level;
        } else if level < self.lowest {
            for _ in level..self.lowest {
                let neighbor = &self.levels[0];
                let shape = scaled_shape(neighbor, ShapeStep::Double);
                let fresh = zero_level_like(neighbor, shape);
                self.levels.insert(0, fresh);
            }
            self.lowest = level;
        }
    }

    // ========================================================================
    // Burt Reduce / Expand
    // ========================================================================

    /// Fill levels `src + 1 ..= dest` by smoothing and subsampling, starting
    /// from the content of `src`.
    ///
    /// Each step convolves the current level with the separable Burt kernel
    /// parameterized by `center`, then takes every second element along each
    /// spatial axis. Requires `src <= dest`; the destination level is created
    /// on demand.
    pub fn reduce(&mut self, src: i32, dest: i32, center: A) -> Result<(), ArrayError> {
        if src > dest {
            return Err(ArrayError::LevelOrder {
                op: "reduce",
                src,
                dest,
            });
        }
        self.check_level(src)?;
        self.create_level(dest);

        let smooth = [Kernel1d::burt_smoothing(center)];
        for k in src..dest {
            let idx = (k - self.lowest) as usize;
            let level = &self.levels[idx];
            let mut smoothed = zero_level_like(level, level.shape().to_vec());
            convolve_separable(&level.view(), &smooth, &mut smoothed.view_mut())?;

            let specs = subsample_specs(level);
            let sub = smoothed.slice(&specs)?;
            self.levels[idx + 1].view_mut().assign(&sub)?;
        }
        Ok(())
    }

    /// Fill levels `src - 1 ..= dest` by parity-interleaved expansion,
    /// starting from the content of `src`.
    ///
    /// Requires `src >= dest`; the destination level is created on demand.
    pub fn expand(&mut self, src: i32, dest: i32, center: A) -> Result<(), ArrayError> {
        if src < dest {
            return Err(ArrayError::LevelOrder {
                op: "expand",
                src,
                dest,
            });
        }
        self.check_level(src)?;
        self.create_level(dest);

        let mut k = src;
        while k > dest {
            let idx = (k - self.lowest) as usize;
            let (finer, coarser) = self.levels.split_at_mut(idx);
            expand_into(&coarser[0], &mut finer[idx - 1], center)?;
            k -= 1;
        }
        Ok(())
    }

    /// As [`Pyramid::reduce`], additionally replacing each processed level
    /// with the difference between the coarser level's upsampled
    /// reconstruction and the level's original content.
    pub fn reduce_laplacian(&mut self, src: i32, dest: i32, center: A) -> Result<(), ArrayError> {
        if src > dest {
            return Err(ArrayError::LevelOrder {
                op: "reduce_laplacian",
                src,
                dest,
            });
        }
        self.check_level(src)?;
        self.create_level(dest);

        let smooth = [Kernel1d::burt_smoothing(center)];
        for k in src..dest {
            let idx = (k - self.lowest) as usize;
            let level = &self.levels[idx];
            let mut recon = zero_level_like(level, level.shape().to_vec());
            convolve_separable(&level.view(), &smooth, &mut recon.view_mut())?;

            let specs = subsample_specs(level);
            let sub = recon.slice(&specs)?;
            self.levels[idx + 1].view_mut().assign(&sub)?;

            // Overwrite the smoothed buffer with the reconstruction from the
            // coarser level, then store reconstruction minus original.
            expand_into(&self.levels[idx + 1], &mut recon, center)?;
            let laplacian = recon.zip_map(&self.levels[idx], |r, o| r - o)?;
            self.levels[idx] = laplacian;
        }
        Ok(())
    }

    /// Invert [`Pyramid::reduce_laplacian`]: reconstruct levels
    /// `src - 1 ..= dest` from their stored difference images.
    pub fn expand_laplacian(&mut self, src: i32, dest: i32, center: A) -> Result<(), ArrayError> {
        if src < dest {
            return Err(ArrayError::LevelOrder {
                op: "expand_laplacian",
                src,
                dest,
            });
        }
        self.check_level(src)?;
        self.create_level(dest);

        let mut k = src;
        while k > dest {
            let idx = (k - self.lowest) as usize;
            let finer = &self.levels[idx - 1];
            let mut recon = zero_level_like(finer, finer.shape().to_vec());
            expand_into(&self.levels[idx], &mut recon, center)?;
            let restored = recon.zip_map(&self.levels[idx - 1], |r, l| r - l)?;
            self.levels[idx - 1] = restored;
            k -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    fn check_level(&self, level: i32) -> Result<(), ArrayError> {
        if level < self.lowest || level > self.highest {
            return Err(ArrayError::LevelOutOfRange {
                level,
                lowest: self.lowest,
                highest: self.highest,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Level Shapes
// ============================================================================

#[derive(Clone, Copy)]
enum ShapeStep {
    /// `ceil(n / 2)` per spatial axis (toward coarser levels).
    Halve,

    /// `2n - 1` per spatial axis (toward finer levels).
    Double,
}

/// Shape of the level adjacent to `neighbor` in the given direction.
fn scaled_shape<A: Float>(neighbor: &TaggedArray<A>, step: ShapeStep) -> Vec<usize> {
    let channel_axis = neighbor.tags().channel_axis();
    neighbor
        .shape()
        .iter()
        .enumerate()
        .map(|(axis, &extent)| {
            if Some(axis) == channel_axis {
                extent
            } else {
                match step {
                    ShapeStep::Halve => (extent + 1) / 2,
                    ShapeStep::Double => (2 * extent).saturating_sub(1),
                }
            }
        })
        .collect()
}

/// A zero-filled array with the given shape, reusing `reference`'s stride
/// ordering and tags.
fn zero_level_like<A: Float>(reference: &TaggedArray<A>, shape: Vec<usize>) -> TaggedArray<A> {
    let ordering = reference.dims.ordering();
    let dims = RawDims::from_ordering(shape, &ordering);
    let data = vec![A::zero(); dims.len()];
    TaggedArray::from_parts(data, dims, reference.tags().clone())
}

/// Every-second-element slice specs over the spatial axes of `level`.
fn subsample_specs<A: Float>(level: &TaggedArray<A>) -> Vec<Slice> {
    let channel_axis = level.tags().channel_axis();
    (0..level.ndim())
        .map(|axis| {
            if Some(axis) == channel_axis {
                Slice::Full
            } else {
                Slice::every(2)
            }
        })
        .collect()
}

// ============================================================================
// Parity-Interleaved Expansion
// ============================================================================

/// Interpolate `src` into the double-resolution `dest` with four
/// phase-shifted separable convolutions, one per (row, column) parity.
///
/// Each parity writes a disjoint stride-2 sublattice of `dest`; together the
/// four cover every destination element exactly once. Odd parities read the
/// source trimmed by one sample when the destination extent is odd, so the
/// convolved window matches the sublattice extent.
fn expand_into<A: Float>(
    src: &TaggedArray<A>,
    dest: &mut TaggedArray<A>,
    center: A,
) -> Result<(), ArrayError> {
    let channel_axis = src.tags().channel_axis();
    let spatial: Vec<usize> = (0..src.ndim())
        .filter(|&ax| Some(ax) != channel_axis)
        .collect();
    if spatial.len() != 2 {
        return Err(ArrayError::IncompatibleShape {
            shape: src.shape().to_vec(),
            spatial: 2,
            channels: src.channels(),
        });
    }

    // Trimmed source extent per spatial axis, used by the odd parities.
    let mut trims = [0usize; 2];
    for (slot, &axis) in spatial.iter().enumerate() {
        let ss = src.shape()[axis];
        let ds = dest.shape()[axis];
        if ds == 2 * ss {
            trims[slot] = ss;
        } else if ds + 1 == 2 * ss {
            trims[slot] = ss - 1;
        } else {
            return Err(ArrayError::ShapeMismatch {
                left: dest.shape().to_vec(),
                right: src.shape().to_vec(),
            });
        }
    }

    let smooth = Kernel1d::burt_smoothing(center);
    let half = Kernel1d::half_sample();

    for &(p0, p1) in &[(0usize, 0usize), (0, 1), (1, 0), (1, 1)] {
        let parities = [p0, p1];

        let mut src_specs = vec![Slice::Full; src.ndim()];
        let mut dest_specs = vec![Slice::Full; dest.ndim()];
        let mut kernels = Vec::with_capacity(2);
        for (slot, &axis) in spatial.iter().enumerate() {
            if parities[slot] == 0 {
                kernels.push(smooth.clone());
            } else {
                src_specs[axis] = Slice::to(trims[slot]);
                kernels.push(half.clone());
            }
            dest_specs[axis] = Slice::every_from(parities[slot], 2);
        }

        let sv = src.slice(&src_specs)?;
        let mut dv = dest.slice_mut(&dest_specs)?;
        convolve_separable(&sv, &kernels, &mut dv)?;
    }
    Ok(())
}
