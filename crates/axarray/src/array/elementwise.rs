//! Element-wise combinators and operators.
//!
//! ## Purpose
//!
//! This module provides the "apply element-wise, then rewrap in the original
//! kind and tags" combinator and routes every arithmetic operator through it,
//! so derived array values survive generic numeric operations instead of
//! decaying to untagged buffers.
//!
//! ## Design notes
//!
//! * **One combinator, many operators**: `map`/`zip_map` are the only places
//!   that produce element-wise results; the `std::ops` implementations are
//!   thin wrappers over them.
//! * **Left operand wins**: Binary results carry the left operand's tags and
//!   stride ordering.
//! * **Checked and unchecked paths**: The combinators report shape mismatches
//!   as errors; the operator sugar panics on them, as is conventional for
//!   operator overloads. Callers that need a fallible path use `zip_map`.
//!
//! ## Key concepts
//!
//! * **Comparisons as arrays**: Element comparisons produce boolean arrays
//!   with the left operand's tags.
//!
//! ## Invariants
//!
//! * Result tags always equal the left (or only) operand's tags.
//!
//! ## Non-goals
//!
//! * No broadcasting: binary operations require exactly matching shapes.

// External dependencies
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use num_traits::Float;

// Internal dependencies
use crate::array::tagged::{collect_into_layout, zip_into_layout, TaggedArray};
use crate::primitives::errors::ArrayError;

// ============================================================================
// Combinators
// ============================================================================

impl<A: Copy> TaggedArray<A> {
    /// Apply a function to every element, preserving layout and tags.
    pub fn map<B, F>(&self, f: F) -> TaggedArray<B>
    where
        B: Copy,
        F: FnMut(A) -> B,
    {
        let ordering = self.dims.ordering();
        let (data, dims) = collect_into_layout(&self.data, &self.dims, &ordering, f);
        TaggedArray::from_parts(data, dims, self.tags.clone())
    }

    /// Apply a function to every element in place.
    pub fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(A) -> A,
    {
        for off in self.dims.offsets() {
            self.data[off] = f(self.data[off]);
        }
    }

    /// Combine two arrays element-wise at matching logical indices.
    ///
    /// The result carries the left operand's tags and stride ordering; the
    /// shapes must agree exactly.
    pub fn zip_map<B, C, F>(
        &self,
        other: &TaggedArray<B>,
        f: F,
    ) -> Result<TaggedArray<C>, ArrayError>
    where
        B: Copy,
        C: Copy,
        F: FnMut(A, B) -> C,
    {
        if self.dims.shape != other.dims.shape {
            return Err(ArrayError::ShapeMismatch {
                left: self.dims.shape.clone(),
                right: other.dims.shape.clone(),
            });
        }
        let ordering = self.dims.ordering();
        let (data, dims) = zip_into_layout(
            &self.data,
            &self.dims,
            &other.data,
            &other.dims,
            &ordering,
            f,
        );
        Ok(TaggedArray::from_parts(data, dims, self.tags.clone()))
    }
}

// ============================================================================
// Comparisons
// ============================================================================

impl<A: Copy + PartialOrd> TaggedArray<A> {
    /// Element-wise equality, tags taken from `self`.
    pub fn eq_elem(&self, other: &TaggedArray<A>) -> Result<TaggedArray<bool>, ArrayError> {
        self.zip_map(other, |a, b| a == b)
    }

    /// Element-wise inequality, tags taken from `self`.
    pub fn ne_elem(&self, other: &TaggedArray<A>) -> Result<TaggedArray<bool>, ArrayError> {
        self.zip_map(other, |a, b| a != b)
    }

    /// Element-wise less-than, tags taken from `self`.
    pub fn lt_elem(&self, other: &TaggedArray<A>) -> Result<TaggedArray<bool>, ArrayError> {
        self.zip_map(other, |a, b| a < b)
    }

    /// Element-wise less-or-equal, tags taken from `self`.
    pub fn le_elem(&self, other: &TaggedArray<A>) -> Result<TaggedArray<bool>, ArrayError> {
        self.zip_map(other, |a, b| a <= b)
    }

    /// Element-wise greater-than, tags taken from `self`.
    pub fn gt_elem(&self, other: &TaggedArray<A>) -> Result<TaggedArray<bool>, ArrayError> {
        self.zip_map(other, |a, b| a > b)
    }

    /// Element-wise greater-or-equal, tags taken from `self`.
    pub fn ge_elem(&self, other: &TaggedArray<A>) -> Result<TaggedArray<bool>, ArrayError> {
        self.zip_map(other, |a, b| a >= b)
    }
}

// ============================================================================
// Operator Sugar
// ============================================================================

macro_rules! array_binary_op {
    ($trait:ident, $method:ident, $label:literal) => {
        impl<'a, 'b, A: Float> $trait<&'b TaggedArray<A>> for &'a TaggedArray<A> {
            type Output = TaggedArray<A>;

            /// # Panics
            ///
            /// Panics when the shapes disagree; use
            /// [`TaggedArray::zip_map`] for a fallible path.
            fn $method(self, rhs: &'b TaggedArray<A>) -> TaggedArray<A> {
                match self.zip_map(rhs, |a, b| a.$method(b)) {
                    Ok(out) => out,
                    Err(e) => panic!(concat!($label, ": {}"), e),
                }
            }
        }

        impl<'a, A: Float> $trait<A> for &'a TaggedArray<A> {
            type Output = TaggedArray<A>;

            fn $method(self, rhs: A) -> TaggedArray<A> {
                self.map(|a| a.$method(rhs))
            }
        }
    };
}

array_binary_op!(Add, add, "array addition");
array_binary_op!(Sub, sub, "array subtraction");
array_binary_op!(Mul, mul, "array multiplication");
array_binary_op!(Div, div, "array division");
array_binary_op!(Rem, rem, "array remainder");

impl<'a, A: Float> Neg for &'a TaggedArray<A> {
    type Output = TaggedArray<A>;

    fn neg(self) -> TaggedArray<A> {
        self.map(|a| -a)
    }
}
