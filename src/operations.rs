//! Scalar arithmetic capability that parameterizes the solvers.
//!
//! The recursion in [`crate::algorithms`] is written once against the
//! [`Operations`] trait. Each supported scalar type gets a concrete
//! implementation through the `impl_operations!` macro, so the generic code is
//! monomorphized per type and no call goes through a vtable.
//!
//! The trait also fixes the lane width `LANES` used to batch inner products.
//! Buffers handed to [`Operations::dot`] are padded to a multiple of `LANES`
//! with zeros, so the batched loop never needs a scalar remainder.

use std::fmt::Debug;

/// Arithmetic primitives and lane-batched kernels for a scalar type.
pub trait Operations: Copy + Debug + PartialEq + PartialOrd + Default + Send + Sync + 'static {
    /// Number of scalars processed per batched step.
    const LANES: usize;

    fn zero() -> Self;
    fn one() -> Self;
    fn negate(a: Self) -> Self;
    fn subtract(a: Self, b: Self) -> Self;
    fn multiply(a: Self, b: Self) -> Self;
    fn divide(a: Self, b: Self) -> Self;

    /// Returns `a + b`.
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        Self::subtract(a, Self::negate(b))
    }

    /// Absolute value, used for tolerance checks.
    fn abs(a: Self) -> Self;

    /// Lossy conversion to `f64` for reporting and dense cross-checks.
    fn to_f64(a: Self) -> f64;

    /// Lossy conversion from `f64`.
    fn from_f64(a: f64) -> Self;

    /// Inner product of two equally long slices.
    ///
    /// # Panics
    ///
    /// In debug builds, if the lengths differ or are not a multiple of `LANES`.
    fn dot(a: &[Self], b: &[Self]) -> Self;

    /// Computes `y[j] += alpha * x[j]` for every `j`.
    fn axpy(alpha: Self, x: &[Self], y: &mut [Self]);

    /// Smallest multiple of `LANES` that is greater than or equal to `len`.
    #[inline]
    fn padded_len(len: usize) -> usize {
        len.div_ceil(Self::LANES) * Self::LANES
    }
}

macro_rules! impl_operations {
    ($t:ty, $lanes:expr) => {
        impl Operations for $t {
            const LANES: usize = $lanes;

            #[inline(always)]
            fn zero() -> Self {
                0.0
            }

            #[inline(always)]
            fn one() -> Self {
                1.0
            }

            #[inline(always)]
            fn negate(a: Self) -> Self {
                -a
            }

            #[inline(always)]
            fn subtract(a: Self, b: Self) -> Self {
                a - b
            }

            #[inline(always)]
            fn multiply(a: Self, b: Self) -> Self {
                a * b
            }

            #[inline(always)]
            fn divide(a: Self, b: Self) -> Self {
                a / b
            }

            #[inline(always)]
            fn add(a: Self, b: Self) -> Self {
                a + b
            }

            #[inline(always)]
            fn abs(a: Self) -> Self {
                a.abs()
            }

            #[inline(always)]
            fn to_f64(a: Self) -> f64 {
                a as f64
            }

            #[inline(always)]
            fn from_f64(a: f64) -> Self {
                a as $t
            }

            #[inline]
            fn dot(a: &[Self], b: &[Self]) -> Self {
                debug_assert_eq!(a.len(), b.len());
                debug_assert_eq!(a.len() % $lanes, 0);

                // One accumulator per lane, reduced once after the loop.
                let mut acc = [0.0 as $t; $lanes];
                for (x, y) in a.chunks_exact($lanes).zip(b.chunks_exact($lanes)) {
                    for lane in 0..$lanes {
                        acc[lane] += x[lane] * y[lane];
                    }
                }
                acc.iter().sum()
            }

            #[inline]
            fn axpy(alpha: Self, x: &[Self], y: &mut [Self]) {
                debug_assert_eq!(x.len(), y.len());
                for (yj, &xj) in y.iter_mut().zip(x) {
                    *yj += alpha * xj;
                }
            }
        }
    };
}

// 256-bit lanes: eight single-precision or four double-precision values.
impl_operations!(f32, 8);
impl_operations!(f64, 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_len_rounds_up_to_lane_multiple() {
        assert_eq!(<f64 as Operations>::padded_len(0), 0);
        assert_eq!(<f64 as Operations>::padded_len(1), 4);
        assert_eq!(<f64 as Operations>::padded_len(4), 4);
        assert_eq!(<f64 as Operations>::padded_len(5), 8);
        assert_eq!(<f32 as Operations>::padded_len(2), 8);
        assert_eq!(<f32 as Operations>::padded_len(17), 24);
    }

    #[test]
    fn test_dot_matches_sequential_sum() {
        let a: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
        let b: Vec<f64> = (0..12).map(|i| 1.0 - i as f64 * 0.25).collect();
        let expected: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!((f64::dot(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dot_ignores_zero_padding() {
        let a = [1.0f32, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let b = [4.0f32, 5.0, 6.0, 100.0, -7.0, 8.0, 9.0, 10.0];
        assert_eq!(f32::dot(&a, &b), 32.0);
    }

    #[test]
    fn test_dot_of_empty_slices_is_zero() {
        assert_eq!(f64::dot(&[], &[]), 0.0);
    }

    #[test]
    fn test_axpy_and_arithmetic_primitives() {
        let x = [1.0f64, -2.0, 3.0];
        let mut y = [0.5f64, 0.5, 0.5];
        f64::axpy(2.0, &x, &mut y);
        assert_eq!(y, [2.5, -3.5, 6.5]);

        assert_eq!(f32::negate(2.0), -2.0);
        assert_eq!(f32::subtract(5.0, 3.0), 2.0);
        assert_eq!(f32::multiply(1.5, 4.0), 6.0);
        assert_eq!(f32::divide(1.0, 4.0), 0.25);
        assert_eq!(f32::add(1.0, 2.0), 3.0);
        assert_eq!(f64::one(), 1.0);
        assert_eq!(f64::zero(), 0.0);
    }
}
