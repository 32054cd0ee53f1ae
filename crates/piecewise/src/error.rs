//! Error types for piecewise path operations.
//!
//! Thawing, freezing, copying and cloning never fail. The only runtime errors
//! come from focusing a path on a component that is not currently present:
//! a variant field while another variant is active, or an element index past
//! the end of a traversal container.

use thiserror::Error;

/// Result type alias for piecewise path operations.
pub type PiecewiseResult<T> = Result<T, PiecewiseError>;

/// Errors that can occur while focusing a reference path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PiecewiseError {
    /// The path targets a variant that is not the active one.
    #[error("{type_name}: path targets variant `{expected}` but `{active}` is active")]
    InactiveBranch {
        /// Name of the sum type.
        type_name: &'static str,
        /// Variant the path points into.
        expected: &'static str,
        /// Variant currently held by the slot.
        active: &'static str,
    },

    /// Element index is out of bounds.
    #[error("index {index} out of bounds (len: {len})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual number of elements.
        len: usize,
    },
}

impl PiecewiseError {
    /// Create an inactive branch error.
    #[inline]
    pub fn inactive_branch(
        type_name: &'static str,
        expected: &'static str,
        active: &'static str,
    ) -> Self {
        PiecewiseError::InactiveBranch {
            type_name,
            expected,
            active,
        }
    }

    /// Create an index out of bounds error.
    #[inline]
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        PiecewiseError::IndexOutOfBounds { index, len }
    }

    /// Returns true if the error was caused by an inactive branch.
    #[inline]
    pub fn is_inactive_branch(&self) -> bool {
        matches!(self, PiecewiseError::InactiveBranch { .. })
    }
}
