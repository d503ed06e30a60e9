//! Fixed-length vectors consumed by the solvers.
//!
//! The solvers read right-hand sides through [`ReadVector`] and write solutions
//! through [`WriteVector`]. Both traits are implemented for plain slices and
//! `Vec<T>`, so callers can hand in borrowed buffers directly, and for the
//! owned [`Vector`] container.
//!
//! [`Vector::default()`] is an explicit uninitialized state. The solvers reject it
//! with [`crate::error::ToeplitzErrorKind::Uninitialized`] before touching any
//! data, which is the distinction a default value type would otherwise lose.

use crate::operations::Operations;
use std::ops::{Index, IndexMut};

/// Read access to a fixed-length scalar sequence.
pub trait ReadVector<T: Operations> {
    fn len(&self) -> usize;

    /// Returns the value at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is outside the backing storage.
    fn get(&self, index: usize) -> T;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `false` for a default-constructed container that was never given storage.
    fn is_initialized(&self) -> bool {
        true
    }
}

/// Write access to a fixed-length scalar sequence.
pub trait WriteVector<T: Operations>: ReadVector<T> {
    /// Contiguous view of the whole storage.
    fn as_mut_slice(&mut self) -> &mut [T];

    fn set(&mut self, index: usize, value: T) {
        self.as_mut_slice()[index] = value;
    }
}

impl<T: Operations> ReadVector<T> for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }
}

impl<T: Operations> WriteVector<T> for [T] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Operations> ReadVector<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }
}

impl<T: Operations> WriteVector<T> for Vec<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

/// An owned vector with a fixed length and an explicit uninitialized state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector<T> {
    values: Option<Box<[T]>>,
}

impl<T: Operations> Vector<T> {
    /// Creates a vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: Some(vec![T::zero(); len].into_boxed_slice()),
        }
    }

    /// Returns the stored values, or an empty slice when uninitialized.
    pub fn as_slice(&self) -> &[T] {
        self.values.as_deref().unwrap_or(&[])
    }

    /// Consumes the vector and returns its values.
    pub fn into_vec(self) -> Vec<T> {
        self.values.map(|values| values.into_vec()).unwrap_or_default()
    }
}

impl<T: Operations> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            values: Some(values.into_boxed_slice()),
        }
    }
}

impl<T: Operations> From<&[T]> for Vector<T> {
    fn from(values: &[T]) -> Self {
        Self::from(values.to_vec())
    }
}

impl<T: Operations> ReadVector<T> for Vector<T> {
    #[inline]
    fn len(&self) -> usize {
        self.values.as_ref().map_or(0, |values| values.len())
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self.as_slice()[index]
    }

    #[inline]
    fn is_initialized(&self) -> bool {
        self.values.is_some()
    }
}

impl<T: Operations> WriteVector<T> for Vector<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.values.as_deref_mut().unwrap_or(&mut [])
    }
}

impl<T: Operations> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Operations> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}
