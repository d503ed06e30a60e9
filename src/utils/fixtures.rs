//! Deterministic problem generators.
//!
//! Every generator returns an initialized [`NormalizedToeplitzMatrix`] together with
//! the vectors that define the problem. Random generators take an explicit seed so
//! experiments and tests are reproducible.

use crate::{matrix::NormalizedToeplitzMatrix, operations::Operations};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A Toeplitz system together with its exact solution, when known.
#[derive(Debug, Clone)]
pub struct Problem<T> {
    pub matrix: NormalizedToeplitzMatrix<T>,
    pub right: Vec<T>,
    /// The exact solution, for problems built from it.
    pub solution: Option<Vec<T>>,
}

/// `|cos(10 t) * exp(-t²)|`, a smooth, decaying, oscillating profile.
pub fn decaying_oscillation(t: f64) -> f64 {
    ((10.0 * t).cos() * (-t * t).exp()).abs()
}

/// Builds the symmetric system `L[±k] = R(k)`, `b[i] = R(0.5 - n/2 + i)`, where `R` is
/// [`decaying_oscillation`].
///
/// # Panics
///
/// If `n` is zero.
pub fn decaying_oscillation_problem<T: Operations>(n: usize) -> Problem<T> {
    assert!(n > 0, "problem size must be positive");
    let off_diagonal: Vec<T> = (1..n)
        .map(|k| T::from_f64(decaying_oscillation(k as f64)))
        .collect();
    let right = (0..n)
        .map(|i| T::from_f64(decaying_oscillation(0.5 - n as f64 / 2.0 + i as f64)))
        .collect();

    Problem {
        matrix: NormalizedToeplitzMatrix::symmetric(&off_diagonal),
        right,
        solution: None,
    }
}

/// Builds a random strictly diagonally dominant system.
///
/// Off-diagonal magnitudes are bounded by `dominance / (2 (n - 1))`, so each row
/// sums to less than `dominance` off the diagonal. With `dominance < 1` every
/// leading principal minor is non-singular. Upper and lower diagonals are drawn
/// independently unless `symmetric` is set.
pub fn random_dominant_problem<T: Operations>(
    n: usize,
    dominance: f64,
    symmetric: bool,
    seed: u64,
) -> Problem<T> {
    assert!(n > 0, "problem size must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    let bound = dominance / (2 * n.saturating_sub(1)).max(1) as f64;

    let mut values = vec![T::zero(); 2 * n - 1];
    values[n - 1] = T::one();
    for k in 1..n {
        let lower = rng.random_range(-bound..=bound);
        let upper = if symmetric {
            lower
        } else {
            rng.random_range(-bound..=bound)
        };
        values[n - 1 + k] = T::from_f64(lower);
        values[n - 1 - k] = T::from_f64(upper);
    }
    let right = (0..n)
        .map(|_| T::from_f64(rng.random_range(-1.0..=1.0)))
        .collect();

    let matrix = NormalizedToeplitzMatrix::from_values(values)
        .expect("center value is one and the length is odd by construction");
    Problem {
        matrix,
        right,
        solution: None,
    }
}

/// Builds `b = L x` for the given matrix and a known `x`.
///
/// # Panics
///
/// If `matrix` is uninitialized or `solution.len()` differs from its size.
pub fn known_solution_problem<T: Operations>(
    matrix: NormalizedToeplitzMatrix<T>,
    solution: Vec<T>,
) -> Problem<T> {
    let right = matrix
        .apply(&solution)
        .expect("matrix is initialized and the solution has matching length");
    Problem {
        matrix,
        right,
        solution: Some(solution),
    }
}
