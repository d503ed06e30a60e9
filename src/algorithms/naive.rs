//! Non-incremental reference implementation of the Zohar-Trench recursion.
//!
//! Every order allocates fresh `e`, `g` and solution vectors and every sum is a
//! plain sequential loop over the matrix accessor. Nothing is cached and nothing
//! is padded, which makes this code path independent of the lane batching and
//! buffer management in [`super::recursion`]. It exists to cross-check that
//! path and is not tuned for speed.

use crate::{matrix::ToeplitzMatrix, operations::Operations, vector::ReadVector};

/// Solves `L x = d` for a matrix of size `n = matrix.size()`.
///
/// The caller guarantees `d.len() >= n` and `s.len() >= n`.
pub fn solve<T, M, V>(matrix: &M, d: &V, s: &mut [T])
where
    T: Operations,
    M: ToeplitzMatrix<T> + ?Sized,
    V: ReadVector<T> + ?Sized,
{
    let n = matrix.size();
    if n == 0 {
        return;
    }

    let l = |k: usize| matrix.entry(k as isize);
    let l_neg = |k: usize| matrix.entry(-(k as isize));

    let mut s_prev = vec![d.get(0)];
    if n > 1 {
        // Order-one predictors, built directly from the first off-diagonals.
        let mut e_prev = vec![T::negate(l_neg(1))];
        let mut g_prev = vec![T::negate(l(1))];
        let mut lambda_prev = T::subtract(T::one(), T::multiply(l_neg(1), l(1)));

        for i in 1..n {
            let mut theta = d.get(i);
            for (j, &sj) in s_prev.iter().enumerate() {
                theta = T::subtract(theta, T::multiply(sj, l(i - j)));
            }
            let theta_hat = T::divide(theta, lambda_prev);

            let mut s_next: Vec<T> = s_prev
                .iter()
                .zip(&e_prev)
                .map(|(&sj, &ej)| T::add(sj, T::multiply(theta_hat, ej)))
                .collect();
            s_next.push(theta_hat);

            if i != n - 1 {
                let mut eta = T::negate(l_neg(i + 1));
                let mut gamma = T::negate(l(i + 1));
                for j in 0..i {
                    eta = T::subtract(eta, T::multiply(l_neg(j + 1), e_prev[j]));
                    gamma = T::subtract(gamma, T::multiply(g_prev[j], l(i - j)));
                }
                let eta_hat = T::divide(eta, lambda_prev);
                let gamma_hat = T::divide(gamma, lambda_prev);

                let mut e_next = Vec::with_capacity(i + 1);
                e_next.push(eta_hat);
                e_next.extend(
                    e_prev
                        .iter()
                        .zip(&g_prev)
                        .map(|(&ej, &gj)| T::add(ej, T::multiply(eta_hat, gj))),
                );

                let mut g_next: Vec<T> = g_prev
                    .iter()
                    .zip(&e_prev)
                    .map(|(&gj, &ej)| T::add(gj, T::multiply(gamma_hat, ej)))
                    .collect();
                g_next.push(gamma_hat);

                lambda_prev = T::subtract(lambda_prev, T::multiply(eta, gamma_hat));
                e_prev = e_next;
                g_prev = g_next;
            }
            s_prev = s_next;
        }
    }

    s[..n].copy_from_slice(&s_prev);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::NormalizedToeplitzMatrix;

    #[test]
    fn test_naive_solves_symmetric_three_by_three() {
        let matrix = NormalizedToeplitzMatrix::from_values([3.0f64, 2.0, 1.0, 2.0, 3.0]).unwrap();
        let mut s = [0.0f64; 3];
        solve(&matrix, &[14.0f64, 10.0, 10.0][..], &mut s);
        for (x, e) in s.iter().zip([1.0, 2.0, 3.0]) {
            assert!((x - e).abs() < 1e-12, "{x} != {e}");
        }
    }

    #[test]
    fn test_naive_one_by_one() {
        let matrix = NormalizedToeplitzMatrix::<f64>::new(1).unwrap();
        let mut s = [0.0f64];
        solve(&matrix, &[-2.0f64][..], &mut s);
        assert_eq!(s, [-2.0]);
    }
}
