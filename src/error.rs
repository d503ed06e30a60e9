//! This module defines the custom error types for the library.
//!
//! Every contract violation detected by the matrix constructors, the matrix
//! accessors and the solvers is reported through a single error type,
//! [`ToeplitzError`]. The concrete cause is carried by [`ToeplitzErrorKind`], and
//! [`ToeplitzError::category`] groups the causes so callers can branch on a
//! missing argument versus a wrong size without matching every variant.
//!
//! Numerical breakdown (a singular leading principal minor) is not an error here:
//! it surfaces as non-finite values in the solution.
use thiserror::Error;

/// Represents all possible errors raised by the Toeplitz matrix and solvers.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(transparent)]
pub struct ToeplitzError(#[from] ToeplitzErrorKind);

/// The distinct kinds of errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToeplitzErrorKind {
    /// A matrix was requested with a size smaller than one.
    #[error("Invalid matrix size {size}: the size must be at least 1.")]
    InvalidSize { size: usize },

    /// The value array of a normalized matrix must hold 2N-1 entries.
    #[error("Invalid value array length {len}: the length must be odd.")]
    EvenLength { len: usize },

    /// The center of the value array is not the multiplicative identity.
    #[error(
        "The matrix is not normalized: the value at index {center} (main diagonal) must be 1."
    )]
    NotNormalized { center: usize },

    /// A diagonal offset outside `(-size, size)` was accessed.
    #[error("Offset {offset} is out of range for a matrix of size {size}.")]
    OffsetOutOfRange { offset: isize, size: usize },

    /// The main diagonal of a normalized matrix cannot be written.
    #[error("The main diagonal of a normalized matrix cannot be modified.")]
    DiagonalImmutable,

    /// An argument is in its default (uninitialized) state.
    #[error("The argument `{argument}` must be initialized (non-default).")]
    Uninitialized { argument: &'static str },

    /// The sizes of the matrix and the vectors of a one-shot solve disagree.
    #[error("Size mismatch for `{argument}`: expected {expected}, got {actual}.")]
    SizeMismatch {
        argument: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An incremental step needs more data than the argument provides.
    #[error("Insufficient size for `{argument}`: at least {required} required, got {actual}.")]
    InsufficientSize {
        argument: &'static str,
        required: usize,
        actual: usize,
    },
}

/// Coarse grouping of [`ToeplitzErrorKind`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A size parameter is outside its valid range.
    Range,
    /// A value array passed to a constructor is malformed.
    Argument,
    /// A matrix offset is not addressable.
    Index,
    /// A required argument is uninitialized.
    MissingArgument,
    /// Sizes disagree, or the solver state cannot advance with the given inputs.
    Size,
}

impl ToeplitzError {
    /// Returns the concrete cause of the error.
    pub fn kind(&self) -> &ToeplitzErrorKind {
        &self.0
    }

    /// Returns the category of the error.
    pub fn category(&self) -> ErrorCategory {
        match self.0 {
            ToeplitzErrorKind::InvalidSize { .. } => ErrorCategory::Range,
            ToeplitzErrorKind::EvenLength { .. } | ToeplitzErrorKind::NotNormalized { .. } => {
                ErrorCategory::Argument
            }
            ToeplitzErrorKind::OffsetOutOfRange { .. } | ToeplitzErrorKind::DiagonalImmutable => {
                ErrorCategory::Index
            }
            ToeplitzErrorKind::Uninitialized { .. } => ErrorCategory::MissingArgument,
            ToeplitzErrorKind::SizeMismatch { .. } | ToeplitzErrorKind::InsufficientSize { .. } => {
                ErrorCategory::Size
            }
        }
    }
}

// Unit tests to ensure error messages and categories are reported correctly.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_out_of_range_message() {
        let error = ToeplitzError(ToeplitzErrorKind::OffsetOutOfRange {
            offset: -3,
            size: 3,
        });
        assert_eq!(
            error.to_string(),
            "Offset -3 is out of range for a matrix of size 3."
        );
        assert_eq!(error.category(), ErrorCategory::Index);
    }

    #[test]
    fn test_insufficient_size_message() {
        let error = ToeplitzError::from(ToeplitzErrorKind::InsufficientSize {
            argument: "result",
            required: 8,
            actual: 7,
        });
        assert_eq!(
            error.to_string(),
            "Insufficient size for `result`: at least 8 required, got 7."
        );
        assert_eq!(error.category(), ErrorCategory::Size);
    }

    #[test]
    fn test_uninitialized_is_missing_argument() {
        let error = ToeplitzError::from(ToeplitzErrorKind::Uninitialized { argument: "matrix" });
        assert_eq!(
            error.to_string(),
            "The argument `matrix` must be initialized (non-default)."
        );
        assert_eq!(error.category(), ErrorCategory::MissingArgument);
    }

    #[test]
    fn test_constructor_error_categories() {
        let range = ToeplitzError::from(ToeplitzErrorKind::InvalidSize { size: 0 });
        let even = ToeplitzError::from(ToeplitzErrorKind::EvenLength { len: 4 });
        let center = ToeplitzError::from(ToeplitzErrorKind::NotNormalized { center: 2 });
        assert_eq!(range.category(), ErrorCategory::Range);
        assert_eq!(even.category(), ErrorCategory::Argument);
        assert_eq!(center.category(), ErrorCategory::Argument);
        assert_eq!(center.kind(), &ToeplitzErrorKind::NotNormalized { center: 2 });
    }
}
