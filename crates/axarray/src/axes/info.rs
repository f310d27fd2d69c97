//! Semantic axis descriptions.
//!
//! ## Purpose
//!
//! This module defines the per-axis metadata that distinguishes, say, a
//! 2-dimensional RGB image from a scalar volume that happens to contain three
//! slices: every array dimension carries an [`AxisInfo`] naming its semantic
//! role and, optionally, its physical resolution.
//!
//! ## Design notes
//!
//! * **Value semantics**: [`AxisInfo`] is a small immutable `Copy` value;
//!   operations on arrays replace tags rather than mutating them in place.
//! * **Kind-only predicates**: "Is this a spatial axis?" compares the kind
//!   alone; full equality also compares the resolution.
//! * **Exchange keys**: Each kind maps to a one-character key used by the
//!   textual exchange format (`x y z c t f e ?`).
//!
//! ## Key concepts
//!
//! * **Spatial axes**: X, Y, and Z; their count fixes whether an array is
//!   image-like (2) or volume-like (3).
//! * **Channel axis**: The per-sample vector dimension, e.g. the 3 of an RGB
//!   pixel.
//!
//! ## Invariants
//!
//! * Keys are unique per kind and stable across releases.
//!
//! ## Non-goals
//!
//! * This module does not maintain tag sequences; see the `tags` module.

// ============================================================================
// AxisKind
// ============================================================================

/// Semantic role of one array axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisKind {
    /// Horizontal spatial axis.
    X,

    /// Vertical spatial axis.
    Y,

    /// Depth spatial axis.
    Z,

    /// Per-sample vector dimension (e.g. color channels).
    Channel,

    /// Temporal axis.
    Time,

    /// Frequency axis (Fourier domain).
    Frequency,

    /// Angular axis.
    Angle,

    /// No semantic information.
    #[default]
    Unknown,
}

impl AxisKind {
    /// Whether this kind names a spatial axis (X, Y, or Z).
    #[inline]
    pub fn is_spatial(self) -> bool {
        matches!(self, AxisKind::X | AxisKind::Y | AxisKind::Z)
    }

    /// One-character key used by the exchange format.
    pub fn key(self) -> char {
        match self {
            AxisKind::X => 'x',
            AxisKind::Y => 'y',
            AxisKind::Z => 'z',
            AxisKind::Channel => 'c',
            AxisKind::Time => 't',
            AxisKind::Frequency => 'f',
            AxisKind::Angle => 'e',
            AxisKind::Unknown => '?',
        }
    }

    /// The kind named by an exchange-format key.
    ///
    /// Unrecognized keys map to `Unknown`: the exchange format prefers losing
    /// metadata over rejecting a stored tag sequence outright.
    pub fn from_key(key: char) -> Self {
        match key {
            'x' => AxisKind::X,
            'y' => AxisKind::Y,
            'z' => AxisKind::Z,
            'c' => AxisKind::Channel,
            't' => AxisKind::Time,
            'f' => AxisKind::Frequency,
            'e' => AxisKind::Angle,
            _ => AxisKind::Unknown,
        }
    }
}

// ============================================================================
// AxisInfo
// ============================================================================

/// Immutable description of one array axis: a semantic kind plus an optional
/// physical resolution (0.0 = unset).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisInfo {
    /// Semantic role of the axis.
    pub kind: AxisKind,

    /// Physical resolution along the axis, 0.0 when unset.
    pub resolution: f64,
}

impl AxisInfo {
    /// An axis of the given kind with unset resolution.
    #[inline]
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            resolution: 0.0,
        }
    }

    /// A horizontal spatial axis.
    #[inline]
    pub fn x() -> Self {
        Self::new(AxisKind::X)
    }

    /// A vertical spatial axis.
    #[inline]
    pub fn y() -> Self {
        Self::new(AxisKind::Y)
    }

    /// A depth spatial axis.
    #[inline]
    pub fn z() -> Self {
        Self::new(AxisKind::Z)
    }

    /// A channel axis.
    #[inline]
    pub fn channel() -> Self {
        Self::new(AxisKind::Channel)
    }

    /// A temporal axis.
    #[inline]
    pub fn time() -> Self {
        Self::new(AxisKind::Time)
    }

    /// A frequency axis.
    #[inline]
    pub fn frequency() -> Self {
        Self::new(AxisKind::Frequency)
    }

    /// An angular axis.
    #[inline]
    pub fn angle() -> Self {
        Self::new(AxisKind::Angle)
    }

    /// An axis without semantic information.
    #[inline]
    pub fn unknown() -> Self {
        Self::new(AxisKind::Unknown)
    }

    /// The same axis with an explicit physical resolution.
    #[inline]
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Whether this axis is spatial (compares the kind only).
    #[inline]
    pub fn is_spatial(&self) -> bool {
        self.kind.is_spatial()
    }

    /// Whether this axis is the channel axis (compares the kind only).
    #[inline]
    pub fn is_channel(&self) -> bool {
        self.kind == AxisKind::Channel
    }
}
