//! The closed set of array kinds.
//!
//! ## Purpose
//!
//! This module names the supported combinations of spatial dimensionality and
//! channel count: image-like kinds (2 spatial axes) and volume-like kinds
//! (3 spatial axes), each either scalar, fixed-vector (2/3/4/6 channels), or
//! channel-inferring. Kinds drive construction (shape validation, default
//! tags) and are recovered from an array's tags for dispatch.
//!
//! ## Design notes
//!
//! * **Closed set**: Kinds form a static table resolved at construction time;
//!   there is no runtime registry of recognizers.
//! * **Discriminant, not subclass**: A kind is a small value, not a type
//!   hierarchy; generic operations preserve it by preserving tags.
//! * **Aliases**: The RGB kinds are aliases of the 3-channel vector kinds;
//!   they exist for readable call sites, not as distinct signatures.
//!
//! ## Key concepts
//!
//! * **Inferred channels**: A channel count of 0 means the trailing shape
//!   dimension (if present) supplies the channel count at construction.
//!
//! ## Invariants
//!
//! * `from_signature` and `signature` round-trip for every named kind except
//!   the RGB aliases, which resolve to their vector equivalents.
//!
//! ## Non-goals
//!
//! * This module does not validate shapes; the layout resolver does.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};

// ============================================================================
// SpatialDims
// ============================================================================

/// Spatial dimensionality of an array kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialDims {
    /// Image-like: two spatial axes.
    Two,

    /// Volume-like: three spatial axes.
    Three,
}

impl SpatialDims {
    /// The dimensionality as a number.
    #[inline]
    pub fn count(self) -> usize {
        match self {
            SpatialDims::Two => 2,
            SpatialDims::Three => 3,
        }
    }

    /// The spatial dimensionality matching a count, if supported.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            2 => Some(SpatialDims::Two),
            3 => Some(SpatialDims::Three),
            _ => None,
        }
    }
}

// ============================================================================
// ArrayKind
// ============================================================================

/// One entry of the closed kind set: a spatial dimensionality plus a channel
/// count (0 = inferred from the trailing axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayKind {
    spatial: SpatialDims,
    channels: usize,
}

impl ArrayKind {
    /// Image with inferred channel count.
    pub const IMAGE: ArrayKind = ArrayKind::new(SpatialDims::Two, 0);

    /// Single-channel image.
    pub const SCALAR_IMAGE: ArrayKind = ArrayKind::new(SpatialDims::Two, 1);

    /// Two-channel image.
    pub const VECTOR2_IMAGE: ArrayKind = ArrayKind::new(SpatialDims::Two, 2);

    /// Three-channel image.
    pub const VECTOR3_IMAGE: ArrayKind = ArrayKind::new(SpatialDims::Two, 3);

    /// Three-channel image (alias of [`ArrayKind::VECTOR3_IMAGE`]).
    pub const RGB_IMAGE: ArrayKind = ArrayKind::VECTOR3_IMAGE;

    /// Four-channel image.
    pub const VECTOR4_IMAGE: ArrayKind = ArrayKind::new(SpatialDims::Two, 4);

    /// Volume with inferred channel count.
    pub const VOLUME: ArrayKind = ArrayKind::new(SpatialDims::Three, 0);

    /// Single-channel volume.
    pub const SCALAR_VOLUME: ArrayKind = ArrayKind::new(SpatialDims::Three, 1);

    /// Two-channel volume.
    pub const VECTOR2_VOLUME: ArrayKind = ArrayKind::new(SpatialDims::Three, 2);

    /// Three-channel volume.
    pub const VECTOR3_VOLUME: ArrayKind = ArrayKind::new(SpatialDims::Three, 3);

    /// Three-channel volume (alias of [`ArrayKind::VECTOR3_VOLUME`]).
    pub const RGB_VOLUME: ArrayKind = ArrayKind::VECTOR3_VOLUME;

    /// Four-channel volume.
    pub const VECTOR4_VOLUME: ArrayKind = ArrayKind::new(SpatialDims::Three, 4);

    /// Six-channel volume.
    pub const VECTOR6_VOLUME: ArrayKind = ArrayKind::new(SpatialDims::Three, 6);

    const fn new(spatial: SpatialDims, channels: usize) -> Self {
        Self { spatial, channels }
    }

    /// Spatial dimensionality of the kind.
    #[inline]
    pub fn spatial(self) -> SpatialDims {
        self.spatial
    }

    /// Number of spatial dimensions.
    #[inline]
    pub fn spatial_dimensions(self) -> usize {
        self.spatial.count()
    }

    /// Declared channel count (0 = inferred).
    #[inline]
    pub fn channels(self) -> usize {
        self.channels
    }

    /// Look up the kind for a concrete signature.
    ///
    /// `channels` is a resolved channel count (at least 1). Counts without a
    /// fixed-vector kind map to the channel-inferring kind of the matching
    /// spatial dimensionality.
    pub fn from_signature(spatial: usize, channels: usize) -> Option<ArrayKind> {
        let spatial = SpatialDims::from_count(spatial)?;
        let kind = match (spatial, channels) {
            (SpatialDims::Two, 1) => ArrayKind::SCALAR_IMAGE,
            (SpatialDims::Two, 2) => ArrayKind::VECTOR2_IMAGE,
            (SpatialDims::Two, 3) => ArrayKind::VECTOR3_IMAGE,
            (SpatialDims::Two, 4) => ArrayKind::VECTOR4_IMAGE,
            (SpatialDims::Two, _) => ArrayKind::IMAGE,
            (SpatialDims::Three, 1) => ArrayKind::SCALAR_VOLUME,
            (SpatialDims::Three, 2) => ArrayKind::VECTOR2_VOLUME,
            (SpatialDims::Three, 3) => ArrayKind::VECTOR3_VOLUME,
            (SpatialDims::Three, 4) => ArrayKind::VECTOR4_VOLUME,
            (SpatialDims::Three, 6) => ArrayKind::VECTOR6_VOLUME,
            (SpatialDims::Three, _) => ArrayKind::VOLUME,
        };
        Some(kind)
    }

    /// Human-readable name of the kind.
    pub fn name(self) -> &'static str {
        match (self.spatial, self.channels) {
            (SpatialDims::Two, 0) => "Image",
            (SpatialDims::Two, 1) => "ScalarImage",
            (SpatialDims::Two, 2) => "Vector2Image",
            (SpatialDims::Two, 3) => "Vector3Image",
            (SpatialDims::Two, 4) => "Vector4Image",
            (SpatialDims::Two, _) => "Image",
            (SpatialDims::Three, 0) => "Volume",
            (SpatialDims::Three, 1) => "ScalarVolume",
            (SpatialDims::Three, 2) => "Vector2Volume",
            (SpatialDims::Three, 3) => "Vector3Volume",
            (SpatialDims::Three, 4) => "Vector4Volume",
            (SpatialDims::Three, 6) => "Vector6Volume",
            (SpatialDims::Three, _) => "Volume",
        }
    }
}

impl Display for ArrayKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}
