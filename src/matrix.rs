//! This module defines the normalized Toeplitz matrix and the read-only
//! capability the solvers consume.
//!
//! A Toeplitz matrix is constant along each diagonal, so an N×N instance is
//! fully described by the 2N-1 values of its diagonals. Diagonals are addressed
//! by their signed offset `k = i - j`: positive offsets lie below the main
//! diagonal (the first column), negative offsets above it (the first row).
//! A *normalized* matrix has ones on the main diagonal, which the order
//! recursion relies on.
//!
//! The solvers only need to read diagonals, so they are written against the
//! [`ToeplitzMatrix`] trait rather than the concrete [`NormalizedToeplitzMatrix`].
//! The trait accessor is unchecked beyond slice bounds; the solvers validate
//! sizes once up front instead of on every access.

use crate::{
    error::{ToeplitzError, ToeplitzErrorKind},
    operations::Operations,
};
use faer::Mat;
use std::ops::Index;

/// Read-only access to the diagonals of a normalized Toeplitz matrix.
pub trait ToeplitzMatrix<T: Operations> {
    /// Returns the number of rows (and columns) of the matrix.
    fn size(&self) -> usize;

    /// Returns the value of diagonal `offset`.
    ///
    /// # Panics
    ///
    /// May panic if `|offset| >= size`. Callers are expected to have validated
    /// the offset range.
    fn entry(&self, offset: isize) -> T;

    /// `false` for a default-constructed matrix that was never given storage.
    fn is_initialized(&self) -> bool;
}

/// An N×N Toeplitz matrix with a unit main diagonal, stored as its 2N-1 diagonals.
///
/// The value of diagonal `k` lives at index `k + (N - 1)` of the backing store.
/// [`Default`] yields the uninitialized state, which every solver rejects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedToeplitzMatrix<T> {
    size: usize,
    values: Option<Box<[T]>>,
}

impl<T: Operations> NormalizedToeplitzMatrix<T> {
    /// Creates an identity matrix of the given size.
    ///
    /// # Errors
    /// [`ToeplitzErrorKind::InvalidSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, ToeplitzError> {
        if size < 1 {
            return Err(ToeplitzErrorKind::InvalidSize { size }.into());
        }

        let mut values = vec![T::zero(); 2 * size - 1].into_boxed_slice();
        values[size - 1] = T::one();
        Ok(Self {
            size,
            values: Some(values),
        })
    }

    /// Creates a matrix from its diagonals, ordered from offset `-(N-1)` to `N-1`.
    ///
    /// # Errors
    /// [`ToeplitzErrorKind::EvenLength`] if `values` does not hold `2N-1` entries
    /// for some `N`, and [`ToeplitzErrorKind::NotNormalized`] if the center
    /// entry is not exactly one.
    pub fn from_values(values: impl Into<Vec<T>>) -> Result<Self, ToeplitzError> {
        let values = values.into();
        if values.len() % 2 != 1 {
            return Err(ToeplitzErrorKind::EvenLength { len: values.len() }.into());
        }

        let size = (values.len() - 1) / 2 + 1;
        if values[size - 1] != T::one() {
            return Err(ToeplitzErrorKind::NotNormalized { center: size - 1 }.into());
        }

        Ok(Self {
            size,
            values: Some(values.into_boxed_slice()),
        })
    }

    /// Creates a symmetric matrix from the diagonals `1..N` of its first column.
    ///
    /// An empty slice yields the 1×1 identity.
    pub fn symmetric(off_diagonal: &[T]) -> Self {
        let size = off_diagonal.len() + 1;
        let mut values = vec![T::one(); 2 * size - 1].into_boxed_slice();
        for (k, &value) in off_diagonal.iter().enumerate() {
            values[size + k] = value;
            values[size - 2 - k] = value;
        }
        Self {
            size,
            values: Some(values),
        }
    }

    /// Number of rows of the matrix; zero when uninitialized.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The raw diagonals, ordered from offset `-(N-1)` to `N-1`.
    pub fn values(&self) -> &[T] {
        self.values.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.values.is_some()
    }

    /// Returns the value of diagonal `offset`.
    ///
    /// # Errors
    /// [`ToeplitzErrorKind::OffsetOutOfRange`] if `|offset| >= N`.
    pub fn get(&self, offset: isize) -> Result<T, ToeplitzError> {
        let index = self.checked_index(offset)?;
        Ok(self.values()[index])
    }

    /// Overwrites diagonal `offset`.
    ///
    /// # Errors
    /// [`ToeplitzErrorKind::DiagonalImmutable`] for offset zero and
    /// [`ToeplitzErrorKind::OffsetOutOfRange`] if `|offset| >= N`.
    pub fn set(&mut self, offset: isize, value: T) -> Result<(), ToeplitzError> {
        if offset == 0 {
            return Err(ToeplitzErrorKind::DiagonalImmutable.into());
        }
        let index = self.checked_index(offset)?;
        if let Some(values) = self.values.as_deref_mut() {
            values[index] = value;
        }
        Ok(())
    }

    /// Computes the product `L * x`.
    ///
    /// # Errors
    /// [`ToeplitzErrorKind::Uninitialized`] for a default matrix and
    /// [`ToeplitzErrorKind::SizeMismatch`] if `x.len() != N`.
    pub fn apply(&self, x: &[T]) -> Result<Vec<T>, ToeplitzError> {
        self.ensure_initialized()?;
        if x.len() != self.size {
            return Err(ToeplitzErrorKind::SizeMismatch {
                argument: "x",
                expected: self.size,
                actual: x.len(),
            }
            .into());
        }

        let values = self.values();
        let n = self.size;
        // Row i reads diagonals i, i-1, ..., i-(N-1), which are contiguous in
        // the backing store when walked right to left.
        Ok((0..n)
            .map(|i| {
                let row = &values[i..i + n];
                row.iter()
                    .rev()
                    .zip(x)
                    .fold(T::zero(), |acc, (&l, &xj)| T::add(acc, T::multiply(l, xj)))
            })
            .collect())
    }

    /// Expands the matrix into a dense `faer` matrix.
    ///
    /// # Errors
    /// [`ToeplitzErrorKind::Uninitialized`] for a default matrix.
    pub fn to_dense(&self) -> Result<Mat<T>, ToeplitzError> {
        self.ensure_initialized()?;
        let values = self.values();
        let offset = self.size - 1;
        Ok(Mat::from_fn(self.size, self.size, |i, j| {
            values[offset + i - j]
        }))
    }

    fn checked_index(&self, offset: isize) -> Result<usize, ToeplitzError> {
        let size = self.size as isize;
        if offset >= size || offset <= -size {
            return Err(ToeplitzErrorKind::OffsetOutOfRange {
                offset,
                size: self.size,
            }
            .into());
        }
        Ok((offset + size - 1) as usize)
    }

    fn ensure_initialized(&self) -> Result<(), ToeplitzError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(ToeplitzErrorKind::Uninitialized { argument: "matrix" }.into())
        }
    }
}

impl<T: Operations> ToeplitzMatrix<T> for NormalizedToeplitzMatrix<T> {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn entry(&self, offset: isize) -> T {
        self.values()[(offset + self.size as isize - 1) as usize]
    }

    #[inline]
    fn is_initialized(&self) -> bool {
        self.values.is_some()
    }
}

/// Panicking diagonal access, `matrix[offset]`.
impl<T: Operations> Index<isize> for NormalizedToeplitzMatrix<T> {
    type Output = T;

    fn index(&self, offset: isize) -> &T {
        match self.checked_index(offset) {
            Ok(index) => &self.values()[index],
            Err(e) => panic!("{e}"),
        }
    }
}
