//! Order-recursive Zohar-Trench solver state.
//!
//! ** NOTE: We recommend using the high-level [`crate::solvers::Solver`] instead. This
//! module performs no argument validation; it is intended for callers that have
//! already checked sizes and want direct control over the recursion.
//!
//! [`Recursion`] holds everything needed to extend the solution of a normalized
//! Toeplitz system from order `i + 1` to order `i + 2` in O(i) work:
//!
//! - the normalizer λ,
//! - the predictor vectors `e` and `g` (logical length `i`),
//! - a row cache with `row[j] = L[-(j+1)]`,
//! - a column cache holding `L[1..=i]` in reverse order, anchored at the end of
//!   the capacity so the window `L[k], L[k-1], ..., L[1]` is a forward slice.
//!
//! All buffers are allocated to a multiple of [`Operations::LANES`] and kept
//! zero beyond their logical length. The column cache carries `LANES` extra
//! zero slots past its anchor, so a padded window never leaves the buffer.
//! Every inner product can therefore run over padded lengths without a scalar
//! remainder loop, and the padding contributes nothing to the sums.

use crate::{matrix::ToeplitzMatrix, operations::Operations, vector::ReadVector};

/// Resumable state of the order recursion.
#[derive(Debug, Clone)]
pub struct Recursion<T> {
    /// Number of completed steps; the solution prefix has `order + 1` entries.
    order: usize,
    lambda: T,
    /// Shared logical capacity of all four buffers, a multiple of `LANES`.
    capacity: usize,
    e: Vec<T>,
    g: Vec<T>,
    row_cache: Vec<T>,
    /// `L[k]` lives at `capacity - k`; `capacity..capacity + LANES` stays zero.
    column_cache: Vec<T>,
}

impl<T: Operations> Recursion<T> {
    /// Creates a fresh recursion whose buffers fit `expected_order` steps
    /// before the first reallocation.
    pub fn with_capacity(expected_order: usize) -> Self {
        let capacity = T::padded_len(expected_order.max(1));
        Self {
            order: 0,
            lambda: T::one(),
            capacity,
            e: vec![T::zero(); capacity],
            g: vec![T::zero(); capacity],
            row_cache: vec![T::zero(); capacity],
            column_cache: vec![T::zero(); capacity + T::LANES],
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn lambda(&self) -> T {
        self.lambda
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Extends the solution in `solution` by one entry.
    ///
    /// On the first step `solution[0]` is initialized from `right[0]`. The
    /// entries `solution[order + 1..padded(order + 2)]` are overwritten.
    ///
    /// The caller guarantees `matrix.size() >= order + 2`,
    /// `right.len() >= order + 2` and `solution.len() >= padded(order + 2)`,
    /// and that `solution[..=order]` holds the previous result.
    pub fn step<M, V>(&mut self, matrix: &M, right: &V, solution: &mut [T])
    where
        M: ToeplitzMatrix<T> + ?Sized,
        V: ReadVector<T> + ?Sized,
    {
        let i = self.order;
        if i == 0 {
            solution[0] = right.get(0);
        }
        solution[i + 1..T::padded_len(i + 2)].fill(T::zero());

        if i == self.capacity {
            self.grow();
        }

        self.consume_diagonals(matrix, i);
        self.update_predictors(i);
        self.update_solution(right, i, solution);
        self.order += 1;
    }

    /// Appends `L[-(i+1)]` to the row cache and `L[i+1]` to the column cache.
    fn consume_diagonals<M>(&mut self, matrix: &M, i: usize)
    where
        M: ToeplitzMatrix<T> + ?Sized,
    {
        let k = (i + 1) as isize;
        self.row_cache[i] = matrix.entry(-k);
        self.column_cache[self.capacity - (i + 1)] = matrix.entry(k);
    }

    /// Computes η and γ, then advances `e`, `g` and λ to order `i + 1`.
    fn update_predictors(&mut self, i: usize) {
        let padded = T::padded_len(i);
        let anchor = self.capacity;

        // η = -L[-(i+1)] - Σ L[-(j+1)] e[j]; row_cache[i] pairs with e[i] = 0.
        let eta = T::subtract(
            T::negate(self.row_cache[i]),
            T::dot(&self.row_cache[..padded], &self.e[..padded]),
        );
        // γ = -L[i+1] - Σ g[j] L[i-j]; the window starts at L[i].
        let gamma = T::subtract(
            T::negate(self.column_cache[anchor - (i + 1)]),
            T::dot(
                &self.g[..padded],
                &self.column_cache[anchor - i..anchor - i + padded],
            ),
        );

        let eta_hat = T::divide(eta, self.lambda);
        let gamma_hat = T::divide(gamma, self.lambda);

        // Both updates read the old values of e[j] and g[j]. The new e is
        // shifted by one, so it is written in place and moved afterwards.
        for (ej, gj) in self.e[..i].iter_mut().zip(&mut self.g[..i]) {
            let (e_old, g_old) = (*ej, *gj);
            *gj = T::add(g_old, T::multiply(gamma_hat, e_old));
            *ej = T::add(e_old, T::multiply(eta_hat, g_old));
        }
        self.e.copy_within(0..i, 1);
        self.e[0] = eta_hat;
        self.g[i] = gamma_hat;

        self.lambda = T::subtract(self.lambda, T::multiply(eta, gamma_hat));
    }

    /// θ = right[i+1] - Σ_{j<=i} s[j] L[i+1-j]; s += (θ/λ) e; s[i+1] = θ/λ.
    fn update_solution<V>(&self, right: &V, i: usize, solution: &mut [T])
    where
        V: ReadVector<T> + ?Sized,
    {
        let padded = T::padded_len(i + 1);
        let start = self.capacity - (i + 1);

        let theta = T::subtract(
            right.get(i + 1),
            T::dot(&solution[..padded], &self.column_cache[start..start + padded]),
        );
        let theta_hat = T::divide(theta, self.lambda);

        T::axpy(theta_hat, &self.e[..=i], &mut solution[..=i]);
        solution[i + 1] = theta_hat;
    }

    /// Doubles all buffers, keeping the column cache anchored at the new end.
    fn grow(&mut self) {
        let filled = self.order;
        let old_capacity = self.capacity;
        let new_capacity = old_capacity * 2;

        self.e.resize(new_capacity, T::zero());
        self.g.resize(new_capacity, T::zero());
        self.row_cache.resize(new_capacity, T::zero());

        let mut column_cache = vec![T::zero(); new_capacity + T::LANES];
        column_cache[new_capacity - filled..new_capacity]
            .copy_from_slice(&self.column_cache[old_capacity - filled..old_capacity]);
        self.column_cache = column_cache;
        self.capacity = new_capacity;

        log::debug!(
            "Recursion buffers grown from {old_capacity} to {new_capacity} at order {filled}."
        );
    }
}

/// Solves the full system in place.
///
/// `solution` must hold at least `padded(matrix.size())` entries and `right` at
/// least `matrix.size()`. Only the first `matrix.size()` entries are meaningful
/// afterwards.
pub fn solve_padded<T, M, V>(matrix: &M, right: &V, solution: &mut [T])
where
    T: Operations,
    M: ToeplitzMatrix<T> + ?Sized,
    V: ReadVector<T> + ?Sized,
{
    let n = matrix.size();
    if n == 0 {
        return;
    }

    solution[0] = right.get(0);
    let mut recursion = Recursion::with_capacity(n);
    for _ in 1..n {
        recursion.step(matrix, right, solution);
    }
}
