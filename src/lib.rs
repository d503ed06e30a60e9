//! Order-recursive solvers for normalized Toeplitz systems.
//!
//! This crate solves `L x = b` where `L` is an N×N Toeplitz matrix with ones on
//! its main diagonal, using the Zohar-Trench recursion (a member of the
//! Levinson family). Instead of factorizing `L`, the recursion extends the
//! solution of the leading `k×k` subsystem to the `(k+1)×(k+1)` subsystem in
//! O(k) work, for O(N²) in total.
//!
//! The recursion only ever reads new diagonals and a new right-hand value when it
//! moves to the next order. [`Solver::iterate`] exposes that directly: a caller
//! can grow the matrix and the right-hand side between calls and keep extending
//! the same solution, without redoing the earlier orders.
//!
//! ## Components
//!
//! - [`NormalizedToeplitzMatrix`]: the matrix, stored as its 2N-1 diagonals.
//! - [`Vector`], [`ReadVector`], [`WriteVector`]: fixed-length vectors; slices and
//!   `Vec<T>` work directly.
//! - [`Operations`]: the scalar capability the algorithms are generic over,
//!   implemented for `f32` and `f64`.
//! - [`Solver`]: the lane-batched, resumable solver.
//! - [`NaiveSolver`]: a from-scratch reference implementation of the same recursion.
//!
//! ## Example Usage
//!
//! ```rust
//! use toeplitz_solver::{NormalizedToeplitzMatrix, Solver};
//!
//! // Rows {1, 0.2, 0.4} / {0.5, 1, 0.2} / {0.3, 0.5, 1}, with the diagonals
//! // listed from offset -2 (top-right corner) to offset 2 (bottom-left corner).
//! let matrix = NormalizedToeplitzMatrix::from_values([0.4f64, 0.2, 1.0, 0.5, 0.3]).unwrap();
//! let right = [0.42, 0.48, 0.61];
//!
//! // One-shot solve.
//! let solver = Solver::new(3);
//! let mut x = [0.0; 3];
//! solver.solve(&matrix, &right[..], &mut x[..]).unwrap();
//!
//! // The same solution, one order at a time. The result buffer must be a
//! // multiple of the lane width.
//! let mut incremental = Solver::new(3);
//! let mut y = vec![0.0; incremental.result_vector_multiplier()];
//! for _ in 0..matrix.size() - 1 {
//!     incremental.iterate(&matrix, &right[..], &mut y).unwrap();
//! }
//!
//! for (a, b) in x.iter().zip(&y) {
//!     assert!((a - b).abs() < 1e-12);
//! }
//! assert!((x[0] - 0.2).abs() < 1e-12);
//! assert!((x[2] - 0.4).abs() < 1e-12);
//! ```
//!
//! ## Numerical Behavior
//!
//! The recursion requires every leading principal minor of `L` to be
//! non-singular. This is not checked: a singular minor makes the normalizer λ
//! vanish, and the result contains infinities or NaNs. [`Solver::lambda`] exposes
//! the normalizer for callers that want to monitor it.

pub mod algorithms;
pub mod error;
pub mod matrix;
pub mod operations;
pub mod solvers;
pub mod utils;
pub mod vector;

pub use error::{ErrorCategory, ToeplitzError, ToeplitzErrorKind};
pub use matrix::{NormalizedToeplitzMatrix, ToeplitzMatrix};
pub use operations::Operations;
pub use solvers::{LinearSolver, NaiveSolver, Solver, SolverState};
pub use vector::{ReadVector, Vector, WriteVector};
