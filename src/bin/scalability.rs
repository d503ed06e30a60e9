//! Experiment Runner for the Scalability Analysis.
//!
//! This executable measures how the solvers scale with the system size N. For
//! each size in the requested range it generates a random, strictly diagonally
//! dominant Toeplitz system and times:
//!
//! - `solve`: the one-shot [`Solver::solve`],
//! - `iterate`: N-1 calls to [`Solver::iterate`] on a solver created with a size
//!   hint of one, so the amortized buffer growth is part of the measurement,
//! - `naive`: the from-scratch [`NaiveSolver`],
//! - `dense-lu`: expansion to a dense `faer` matrix followed by an LU
//!   decomposition with partial pivoting, as an O(N³) baseline.
//!
//! Each configuration is repeated and the fastest run is kept. Results are
//! appended to the output CSV after every measurement so partial runs still
//! produce data.

use anyhow::{Context, Result, anyhow, ensure};
use clap::{Parser, ValueEnum};
use faer::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use toeplitz_solver::{
    LinearSolver, NaiveSolver, Operations, Solver, SolverState,
    utils::{
        accuracy::relative_residual,
        fixtures::{Problem, random_dominant_problem},
        perf::{peak_rss_kb, time_best_of},
    },
};

/// The solver variant being timed.
#[derive(ValueEnum, Clone, Debug, Serialize, PartialEq, Eq, Copy)]
#[serde(rename_all = "kebab-case")]
enum Variant {
    Solve,
    Iterate,
    Naive,
    DenseLu,
}

/// Scalar type the systems are solved in.
#[derive(ValueEnum, Clone, Debug, Serialize, PartialEq, Eq, Copy)]
#[serde(rename_all = "kebab-case")]
enum Precision {
    F32,
    F64,
}

/// Command-line arguments for the scalability experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "scalability-runner",
    about = "Measures solver run time as a function of the Toeplitz system size."
)]
struct ScalabilityArgs {
    /// The smallest system size N.
    #[clap(long, default_value_t = 64)]
    n_start: usize,
    /// The largest system size N.
    #[clap(long, default_value_t = 4096)]
    n_end: usize,
    /// Multiplicative step between consecutive sizes.
    #[clap(long, default_value_t = 2)]
    n_factor: usize,
    /// Number of timed repetitions per configuration; the fastest is reported.
    #[clap(long, default_value_t = 5)]
    repetitions: usize,
    /// Scalar type to solve in.
    #[clap(long, value_enum, default_value_t = Precision::F64)]
    precision: Precision,
    /// Variants to time. Defaults to all of them.
    #[clap(long, value_enum, num_args = 1..)]
    variants: Vec<Variant>,
    /// Sizes above this bound skip the dense LU baseline.
    #[clap(long, default_value_t = 2048)]
    dense_limit: usize,
    /// Seed for the random systems.
    #[clap(long, default_value_t = 42)]
    seed: u64,
    /// Path to the output CSV file.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// A single row of the output CSV.
#[derive(Debug, Serialize)]
struct ScalabilityResult {
    variant: Variant,
    precision: Precision,
    n: usize,
    time_s: f64,
    relative_residual: f64,
    rss_kb: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = ScalabilityArgs::parse();
    ensure!(args.n_start >= 1, "--n-start must be at least 1");
    ensure!(args.n_factor >= 2, "--n-factor must be at least 2");

    let variants = if args.variants.is_empty() {
        vec![
            Variant::Solve,
            Variant::Iterate,
            Variant::Naive,
            Variant::DenseLu,
        ]
    } else {
        args.variants.clone()
    };

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create CSV writer for {:?}", &args.output))?;

    log::info!("Starting scalability experiment ({:?}).", args.precision);
    let mut n = args.n_start;
    while n <= args.n_end {
        log::info!("Processing system size N = {n}");
        for &variant in &variants {
            if variant == Variant::DenseLu && n > args.dense_limit {
                log::info!("Skipping dense LU for N = {n} (limit {}).", args.dense_limit);
                continue;
            }

            let record = match args.precision {
                Precision::F32 => measure::<f32>(variant, n, &args)?,
                Precision::F64 => measure::<f64>(variant, n, &args)?,
            };
            log::info!(
                "{:?}: n={}, time={:.6}s, residual={:.3e}",
                record.variant,
                record.n,
                record.time_s,
                record.relative_residual
            );
            writer.serialize(&record)?;
            writer.flush()?;
        }
        n *= args.n_factor;
    }

    log::info!(
        "Scalability experiment complete. Results saved to {:?}.",
        &args.output
    );
    Ok(())
}

/// Times one variant on a freshly generated system of size `n`.
fn measure<T: Operations>(
    variant: Variant,
    n: usize,
    args: &ScalabilityArgs,
) -> Result<ScalabilityResult> {
    let problem: Problem<T> = random_dominant_problem(n, 0.9, false, args.seed);
    let (elapsed, x) = match variant {
        Variant::Solve => {
            let solver = Solver::new(n);
            let (elapsed, x) = time_best_of(args.repetitions, || {
                let mut x = vec![T::zero(); n];
                solver.solve(&problem.matrix, &problem.right, &mut x).map(|()| x)
            });
            (elapsed, x?)
        }
        Variant::Iterate => {
            let (elapsed, x) = time_best_of(args.repetitions, || {
                let mut solver = Solver::new(1);
                let mut x = vec![T::zero(); T::padded_len(n)];
                while solver.state(n) != SolverState::Done {
                    solver.iterate(&problem.matrix, &problem.right, &mut x)?;
                }
                x.truncate(n);
                Ok::<_, toeplitz_solver::ToeplitzError>(x)
            });
            (elapsed, x?)
        }
        Variant::Naive => {
            let solver = NaiveSolver::new();
            let (elapsed, x) = time_best_of(args.repetitions, || {
                let mut x = vec![T::zero(); n];
                solver.solve(&problem.matrix, &problem.right, &mut x).map(|()| x)
            });
            (elapsed, x?)
        }
        Variant::DenseLu => {
            let (elapsed, x) = time_best_of(args.repetitions, || dense_lu_solve(&problem));
            (elapsed, x?)
        }
    };

    Ok(ScalabilityResult {
        variant,
        precision: args.precision,
        n,
        time_s: elapsed.as_secs_f64(),
        relative_residual: relative_residual(&problem.matrix, &x, &problem.right)?,
        rss_kb: peak_rss_kb(),
    })
}

/// Solves the system with a dense LU decomposition, computed in `f64`.
fn dense_lu_solve<T: Operations>(problem: &Problem<T>) -> Result<Vec<T>> {
    let n = problem.matrix.size();
    let matrix = &problem.matrix;
    ensure!(matrix.is_initialized(), "matrix has no storage");
    let dense = Mat::<f64>::from_fn(n, n, |i, j| T::to_f64(matrix[i as isize - j as isize]));
    let b = Mat::<f64>::from_fn(n, 1, |i, _| T::to_f64(problem.right[i]));
    let x = dense.as_ref().partial_piv_lu().solve(&b);
    Ok((0..n).map(|i| T::from_f64(x.as_ref()[(i, 0)])).collect())
}
