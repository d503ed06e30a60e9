//! This module provides the high-level, validated API for solving normalized
//! Toeplitz systems `L x = b`.
//!
//! - [`Solver`] is the production path. It solves a complete system in one call
//!   with [`Solver::solve`], or grows the solution one order at a time with
//!   [`Solver::iterate`] while the caller extends the matrix and right-hand side
//!   between calls.
//! - [`NaiveSolver`] recomputes everything from scratch on each call and serves
//!   as a reference for cross-checks.
//!
//! Both validate their arguments eagerly and report contract violations through
//! [`ToeplitzError`] before any output is written. A singular leading principal
//! minor is not detected: it shows up as infinities or NaNs in the result.

use crate::{
    algorithms::{Recursion, naive, recursion::solve_padded},
    error::{ToeplitzError, ToeplitzErrorKind},
    matrix::ToeplitzMatrix,
    operations::Operations,
    vector::{ReadVector, WriteVector},
};
use std::marker::PhantomData;

/// A one-shot solver for normalized Toeplitz systems.
pub trait LinearSolver<T: Operations> {
    /// Writes the solution of `matrix * x = right` into `result`.
    ///
    /// # Errors
    /// - [`ToeplitzErrorKind::Uninitialized`] if any argument is in its default state.
    /// - [`ToeplitzErrorKind::SizeMismatch`] if `right` or `result` does not have
    ///   exactly `matrix.size()` entries.
    fn solve<M, V, R>(&self, matrix: &M, right: &V, result: &mut R) -> Result<(), ToeplitzError>
    where
        M: ToeplitzMatrix<T> + ?Sized,
        V: ReadVector<T> + ?Sized,
        R: WriteVector<T> + ?Sized;
}

/// Progress of an incremental solve relative to a system of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// No step has been taken.
    Fresh,
    /// Some, but not all, steps have been taken.
    Growing,
    /// The solution covers the whole system.
    Done,
}

/// Order-recursive solver with resumable, amortized-growth state.
///
/// The incremental state is advanced only by [`Solver::iterate`]; it moves forward by
/// exactly one order per call and never rewinds. [`Solver::solve`] runs on its own
/// scratch state and leaves the incremental state untouched.
///
/// # Example
///
/// ```rust
/// use toeplitz_solver::{NormalizedToeplitzMatrix, Solver};
///
/// // Rows {1, 2, 3} / {2, 1, 2} / {3, 2, 1}.
/// let matrix = NormalizedToeplitzMatrix::from_values([3.0f64, 2.0, 1.0, 2.0, 3.0]).unwrap();
/// let mut x = [0.0f64; 3];
/// Solver::new(3).solve(&matrix, &[14.0, 10.0, 10.0][..], &mut x[..]).unwrap();
/// assert!((x[2] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Solver<T> {
    recursion: Recursion<T>,
}

impl<T: Operations> Solver<T> {
    /// Creates a solver whose buffers are sized for systems of about
    /// `expected_order` unknowns. Larger systems are still supported; the buffers
    /// grow by doubling.
    pub fn new(expected_order: usize) -> Self {
        log::trace!(
            "Creating solver with expected order {expected_order} and lane width {}.",
            T::LANES
        );
        Self {
            recursion: Recursion::with_capacity(expected_order),
        }
    }

    /// The lane width. Result buffers passed to [`Solver::iterate`] must be
    /// allocated in multiples of this value.
    #[inline]
    pub fn result_vector_multiplier(&self) -> usize {
        T::LANES
    }

    /// Number of `iterate` calls completed so far.
    #[inline]
    pub fn order(&self) -> usize {
        self.recursion.order()
    }

    /// Current normalizer λ. It approaches zero as the leading principal minor
    /// becomes singular.
    #[inline]
    pub fn lambda(&self) -> T {
        self.recursion.lambda()
    }

    /// Current buffer capacity, in orders.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.recursion.capacity()
    }

    /// Progress of the incremental solve for a system with `size` unknowns.
    pub fn state(&self, size: usize) -> SolverState {
        let order = self.recursion.order();
        if order + 1 >= size {
            SolverState::Done
        } else if order == 0 {
            SolverState::Fresh
        } else {
            SolverState::Growing
        }
    }

    /// Solves `matrix * x = right` in one call, writing `x` into `result`.
    ///
    /// When the system size is not a multiple of the lane width, the recursion runs
    /// on a padded scratch buffer that is copied back into `result`.
    ///
    /// # Errors
    /// See [`LinearSolver::solve`].
    pub fn solve<M, V, R>(&self, matrix: &M, right: &V, result: &mut R) -> Result<(), ToeplitzError>
    where
        M: ToeplitzMatrix<T> + ?Sized,
        V: ReadVector<T> + ?Sized,
        R: WriteVector<T> + ?Sized,
    {
        let n = validate_solve_arguments::<T, _, _, _>(matrix, right, result)?;
        let padded = T::padded_len(n);
        let result = result.as_mut_slice();

        if padded == n {
            solve_padded(matrix, right, result);
        } else {
            let mut work = vec![T::zero(); padded];
            solve_padded(matrix, right, &mut work[..]);
            result.copy_from_slice(&work[..n]);
        }
        Ok(())
    }

    /// Advances the solution by one order.
    ///
    /// After the `k`-th call, `result[..=k]` solves the leading `(k+1)×(k+1)`
    /// subsystem. The caller must pass back the same `result` buffer every time and
    /// may grow `matrix` and `right` between calls.
    ///
    /// # Arguments
    /// * `matrix`: needs at least `order() + 2` rows.
    /// * `right`: needs at least `order() + 2` entries.
    /// * `result`: needs at least `order() + 2` entries rounded up to a multiple of
    ///   [`Solver::result_vector_multiplier`]. Entries past `order() + 1` are scratch.
    ///
    /// # Errors
    /// - [`ToeplitzErrorKind::Uninitialized`] if any argument is in its default state.
    /// - [`ToeplitzErrorKind::InsufficientSize`] if any argument is too small for the
    ///   next order. The state is left unchanged.
    pub fn iterate<M, V, R>(
        &mut self,
        matrix: &M,
        right: &V,
        result: &mut R,
    ) -> Result<(), ToeplitzError>
    where
        M: ToeplitzMatrix<T> + ?Sized,
        V: ReadVector<T> + ?Sized,
        R: WriteVector<T> + ?Sized,
    {
        ensure_initialized::<T, _, _, _>(matrix, right, result)?;

        let next = self.recursion.order() + 2;
        ensure_at_least("matrix", next, matrix.size())?;
        ensure_at_least("right", next, right.len())?;
        ensure_at_least("result", T::padded_len(next), result.len())?;

        self.recursion.step(matrix, right, result.as_mut_slice());
        Ok(())
    }
}

impl<T: Operations> Default for Solver<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Operations> LinearSolver<T> for Solver<T> {
    fn solve<M, V, R>(&self, matrix: &M, right: &V, result: &mut R) -> Result<(), ToeplitzError>
    where
        M: ToeplitzMatrix<T> + ?Sized,
        V: ReadVector<T> + ?Sized,
        R: WriteVector<T> + ?Sized,
    {
        Solver::solve(self, matrix, right, result)
    }
}

/// Reference solver that recomputes the recursion from scratch on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSolver<T> {
    _scalar: PhantomData<T>,
}

impl<T: Operations> NaiveSolver<T> {
    pub fn new() -> Self {
        Self {
            _scalar: PhantomData,
        }
    }
}

impl<T: Operations> LinearSolver<T> for NaiveSolver<T> {
    fn solve<M, V, R>(&self, matrix: &M, right: &V, result: &mut R) -> Result<(), ToeplitzError>
    where
        M: ToeplitzMatrix<T> + ?Sized,
        V: ReadVector<T> + ?Sized,
        R: WriteVector<T> + ?Sized,
    {
        validate_solve_arguments::<T, _, _, _>(matrix, right, result)?;
        naive::solve(matrix, right, result.as_mut_slice());
        Ok(())
    }
}

/// Checks initialization and exact sizes; returns the system size.
fn validate_solve_arguments<T, M, V, R>(
    matrix: &M,
    right: &V,
    result: &R,
) -> Result<usize, ToeplitzError>
where
    T: Operations,
    M: ToeplitzMatrix<T> + ?Sized,
    V: ReadVector<T> + ?Sized,
    R: WriteVector<T> + ?Sized,
{
    ensure_initialized::<T, _, _, _>(matrix, right, result)?;

    let n = matrix.size();
    for (argument, actual) in [("right", right.len()), ("result", result.len())] {
        if actual != n {
            return Err(ToeplitzErrorKind::SizeMismatch {
                argument,
                expected: n,
                actual,
            }
            .into());
        }
    }
    Ok(n)
}

fn ensure_initialized<T, M, V, R>(matrix: &M, right: &V, result: &R) -> Result<(), ToeplitzError>
where
    T: Operations,
    M: ToeplitzMatrix<T> + ?Sized,
    V: ReadVector<T> + ?Sized,
    R: WriteVector<T> + ?Sized,
{
    let checks = [
        ("matrix", matrix.is_initialized()),
        ("right", right.is_initialized()),
        ("result", result.is_initialized()),
    ];
    match checks.into_iter().find(|&(_, initialized)| !initialized) {
        Some((argument, _)) => Err(ToeplitzErrorKind::Uninitialized { argument }.into()),
        None => Ok(()),
    }
}

fn ensure_at_least(
    argument: &'static str,
    required: usize,
    actual: usize,
) -> Result<(), ToeplitzError> {
    if actual < required {
        return Err(ToeplitzErrorKind::InsufficientSize {
            argument,
            required,
            actual,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCategory, matrix::NormalizedToeplitzMatrix, vector::Vector};

    #[test]
    fn test_solve_rejects_default_arguments() {
        let solver = Solver::<f64>::new(2);
        let matrix = NormalizedToeplitzMatrix::<f64>::new(2).unwrap();

        let err = solver
            .solve(&matrix, &Vector::default(), &mut vec![0.0; 2])
            .unwrap_err();
        assert_eq!(err.kind(), &ToeplitzErrorKind::Uninitialized { argument: "right" });

        let err = solver
            .solve(&matrix, &vec![0.0; 2], &mut Vector::default())
            .unwrap_err();
        assert_eq!(err.kind(), &ToeplitzErrorKind::Uninitialized { argument: "result" });

        let err = solver
            .solve(
                &NormalizedToeplitzMatrix::default(),
                &vec![0.0; 2],
                &mut vec![0.0; 2],
            )
            .unwrap_err();
        assert_eq!(err.kind(), &ToeplitzErrorKind::Uninitialized { argument: "matrix" });
        assert_eq!(err.category(), ErrorCategory::MissingArgument);
    }

    #[test]
    fn test_solve_rejects_mismatched_sizes() {
        let solver = Solver::<f32>::new(2);
        let cases = [(3, 2, 2, "right"), (2, 3, 2, "right"), (2, 2, 3, "result")];
        for (n, right_len, result_len, argument) in cases {
            let matrix = NormalizedToeplitzMatrix::<f32>::new(n).unwrap();
            let err = solver
                .solve(&matrix, &vec![0.0; right_len], &mut vec![0.0; result_len])
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Size);
            match err.kind() {
                ToeplitzErrorKind::SizeMismatch { argument: a, .. } => assert_eq!(*a, argument),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_solve_leaves_result_untouched_on_error() {
        let solver = Solver::<f64>::new(2);
        let matrix = NormalizedToeplitzMatrix::<f64>::new(3).unwrap();
        let mut result = vec![7.0; 3];
        assert!(solver.solve(&matrix, &vec![1.0; 2], &mut result).is_err());
        assert_eq!(result, vec![7.0; 3]);
    }

    #[test]
    fn test_state_transitions() {
        let matrix = NormalizedToeplitzMatrix::symmetric(&[0.1f64, 0.1]);
        let right = vec![1.0; 3];
        let mut result = vec![0.0; 4];
        let mut solver = Solver::<f64>::new(3);

        assert_eq!(solver.state(3), SolverState::Fresh);
        solver.iterate(&matrix, &right, &mut result).unwrap();
        assert_eq!(solver.state(3), SolverState::Growing);
        solver.iterate(&matrix, &right, &mut result).unwrap();
        assert_eq!(solver.state(3), SolverState::Done);
        assert_eq!(solver.order(), 2);
        assert_eq!(Solver::<f64>::new(1).state(1), SolverState::Done);
    }

    #[test]
    fn test_iterate_rejects_default_arguments() {
        let matrix = NormalizedToeplitzMatrix::<f32>::new(2).unwrap();
        let mut solver = Solver::<f32>::new(2);
        let err = solver
            .iterate(&matrix, &Vector::default(), &mut vec![0.0; 8])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MissingArgument);
        let err = solver
            .iterate(&NormalizedToeplitzMatrix::default(), &vec![0.0; 2], &mut vec![0.0; 8])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MissingArgument);
        assert_eq!(solver.order(), 0);
    }

    #[test]
    fn test_iterate_past_matrix_size_is_rejected_without_advancing() {
        let mut solver = Solver::<f64>::new(2);
        let w = solver.result_vector_multiplier();
        let matrix = NormalizedToeplitzMatrix::<f64>::new(2).unwrap();
        let right = vec![0.0; w];
        let mut result = vec![0.0; w];

        solver.iterate(&matrix, &right, &mut result).unwrap();
        let err = solver.iterate(&matrix, &right, &mut result).unwrap_err();
        assert_eq!(
            err.kind(),
            &ToeplitzErrorKind::InsufficientSize {
                argument: "matrix",
                required: 3,
                actual: 2
            }
        );
        assert_eq!(solver.order(), 1);
    }

    #[test]
    fn test_iterate_right_vector_too_short() {
        let mut solver = Solver::<f64>::new(2);
        let w = solver.result_vector_multiplier();
        let matrix = NormalizedToeplitzMatrix::<f64>::new(w * 2).unwrap();
        let right = vec![0.0; w];
        let mut result = vec![0.0; w * 2];
        for _ in 0..w - 1 {
            solver.iterate(&matrix, &right, &mut result).unwrap();
        }
        let err = solver.iterate(&matrix, &right, &mut result).unwrap_err();
        assert!(matches!(
            err.kind(),
            ToeplitzErrorKind::InsufficientSize {
                argument: "right",
                ..
            }
        ));
    }

    #[test]
    fn test_iterate_result_vector_too_short() {
        let mut solver = Solver::<f32>::new(2);
        let w = solver.result_vector_multiplier();
        let matrix = NormalizedToeplitzMatrix::<f32>::new(w * 2).unwrap();
        let right = vec![0.0; w * 2];
        let mut result = vec![0.0; w];
        for _ in 0..w - 1 {
            solver.iterate(&matrix, &right, &mut result).unwrap();
        }
        let err = solver.iterate(&matrix, &right, &mut result).unwrap_err();
        assert_eq!(
            err.kind(),
            &ToeplitzErrorKind::InsufficientSize {
                argument: "result",
                required: 2 * w,
                actual: w
            }
        );
    }

    #[test]
    fn test_iterate_result_must_be_lane_padded_from_the_start() {
        let mut solver = Solver::<f64>::new(2);
        let w = solver.result_vector_multiplier();
        let matrix = NormalizedToeplitzMatrix::<f64>::new(w).unwrap();
        let right = vec![0.0; w];
        let mut result = vec![0.0; w - 1];
        let err = solver.iterate(&matrix, &right, &mut result).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Size);
        assert_eq!(solver.order(), 0);
    }

    #[test]
    fn test_naive_solver_validates_like_solver() {
        let naive = NaiveSolver::<f64>::new();
        let matrix = NormalizedToeplitzMatrix::<f64>::new(2).unwrap();
        let err = naive
            .solve(&matrix, &vec![0.0; 3], &mut vec![0.0; 2])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Size);
        let err = naive
            .solve(&matrix, &Vector::default(), &mut vec![0.0; 2])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MissingArgument);
    }
}
