//! Core implementations of the Zohar-Trench order recursion.
//!
//! For a normalized Toeplitz matrix `L` and right-hand side `d`, the recursion
//! builds the solution of the leading `k×k` subsystem from the `(k-1)×(k-1)`
//! solution in O(k) work, so the full N×N system costs O(N²) instead of the
//! O(N³) of a dense factorization. Two auxiliary predictor vectors `e` and `g`
//! and a scalar normalizer λ carry the information needed to extend the
//! solution by one order (W. F. Trench, S. Zohar, J. ACM 21(2), 1974).
//!
//! - [`recursion`]: the resumable, lane-batched engine behind
//!   [`crate::solvers::Solver`].
//! - [`naive`]: a direct, allocation-per-order transcription used as a
//!   reference by [`crate::solvers::NaiveSolver`].
//!
//! Neither module validates its inputs; [`crate::solvers`] does.

pub mod naive;
pub mod recursion;

pub use recursion::Recursion;
