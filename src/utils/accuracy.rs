//! Error measures for computed solutions.
//!
//! All measures are evaluated in `f64`, regardless of the scalar type the system
//! was solved in, so `f32` and `f64` runs can be compared on the same scale.

use crate::{error::ToeplitzError, matrix::NormalizedToeplitzMatrix, operations::Operations};

/// Largest absolute entry of `values`, widened to `f64`.
pub fn max_norm<T: Operations>(values: &[T]) -> f64 {
    values
        .iter()
        .map(|&v| T::to_f64(v).abs())
        .fold(0.0, f64::max)
}

/// `max |L x - b| / max |b|`, or the absolute residual when `b` is zero.
///
/// Only the first `matrix.size()` entries of `x` and `b` are used, so padded
/// result buffers can be passed directly.
pub fn relative_residual<T: Operations>(
    matrix: &NormalizedToeplitzMatrix<T>,
    x: &[T],
    b: &[T],
) -> Result<f64, ToeplitzError> {
    let n = matrix.size();
    let product = matrix.apply(&x[..n])?;
    let residual = product
        .iter()
        .zip(&b[..n])
        .map(|(&p, &b)| (T::to_f64(p) - T::to_f64(b)).abs())
        .fold(0.0, f64::max);

    let scale = max_norm(&b[..n]);
    Ok(if scale > 0.0 { residual / scale } else { residual })
}

/// `max |x - reference| / max |reference|` over the length of `reference`.
pub fn relative_error<T: Operations>(x: &[T], reference: &[f64]) -> f64 {
    let difference = x
        .iter()
        .zip(reference)
        .map(|(&x, r)| (T::to_f64(x) - r).abs())
        .fold(0.0, f64::max);
    let scale = reference.iter().map(|r| r.abs()).fold(0.0, f64::max);
    if scale > 0.0 { difference / scale } else { difference }
}
