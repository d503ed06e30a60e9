//! Experiment Runner for the Numerical Stability and Accuracy Analysis.
//!
//! This executable measures the accuracy of the order recursion against a known
//! ground truth. For every size N it builds a Toeplitz matrix, picks the solution
//! `x_true[i] = sin(0.37 i) + 1` and derives `b = L x_true` in double precision.
//! The system is then solved in both `f32` and `f64`, with the fast and the
//! naive solver, and the relative residual and forward error are recorded.
//!
//! Two matrix families are available:
//! - `dominant`: random strictly diagonally dominant matrices whose off-diagonal
//!   row sum is `--dominance`. Values close to one approach singular minors.
//! - `oscillating`: the symmetric decaying-oscillation matrices.

use anyhow::{Context, Result, anyhow, ensure};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use toeplitz_solver::{
    LinearSolver, NaiveSolver, NormalizedToeplitzMatrix, Operations, Solver,
    utils::{
        accuracy::{relative_error, relative_residual},
        fixtures::{decaying_oscillation_problem, known_solution_problem, random_dominant_problem},
    },
};

/// The family of test matrices.
#[derive(ValueEnum, Clone, Debug, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
enum MatrixFamily {
    /// Random strictly diagonally dominant, non-symmetric matrices.
    Dominant,
    /// The symmetric `|cos(10 t) exp(-t²)|` profile.
    Oscillating,
}

#[derive(Clone, Debug, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Method {
    Fast,
    Naive,
}

/// Command-line arguments for the stability experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "stability-runner",
    about = "Measures the accuracy of the Toeplitz solvers against a known solution."
)]
struct StabilityArgs {
    /// The matrix family to test.
    #[clap(long, value_enum, default_value_t = MatrixFamily::Dominant)]
    family: MatrixFamily,

    /// Off-diagonal row sum for the `dominant` family, in (0, 1).
    #[clap(long, default_value_t = 0.9)]
    dominance: f64,

    /// Smallest system size.
    #[clap(long, default_value_t = 8)]
    n_min: usize,

    /// Largest system size.
    #[clap(long, default_value_t = 1024)]
    n_max: usize,

    /// Multiplicative step between sizes.
    #[clap(long, default_value_t = 2)]
    n_factor: usize,

    /// Seed for the random matrices.
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// A single row of the stability CSV.
#[derive(Debug, Serialize)]
struct StabilityResult {
    family: MatrixFamily,
    precision: &'static str,
    method: Method,
    n: usize,
    /// `max |L x - b| / max |b|`, evaluated in `f64`.
    relative_residual: f64,
    /// `max |x - x_true| / max |x_true|`.
    relative_error: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = StabilityArgs::parse();
    ensure!(args.n_min >= 1, "--n-min must be at least 1");
    ensure!(args.n_factor >= 2, "--n-factor must be at least 2");
    ensure!(
        args.dominance > 0.0 && args.dominance < 1.0,
        "--dominance must lie in (0, 1), got {}",
        args.dominance
    );

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create CSV writer for {:?}", &args.output))?;

    log::info!("Starting stability analysis for {:?} matrices.", args.family);
    let mut n = args.n_min;
    while n <= args.n_max {
        let (matrix, x_true) = build_ground_truth(&args, n);
        let right = matrix.apply(&x_true)?;

        let rows = evaluate::<f32>(&args, &matrix, &right, &x_true, "f32")?
            .into_iter()
            .chain(evaluate::<f64>(&args, &matrix, &right, &x_true, "f64")?);
        for record in rows {
            log::info!(
                "n={}, {} {:?}: residual={:.3e}, error={:.3e}",
                record.n,
                record.precision,
                record.method,
                record.relative_residual,
                record.relative_error
            );
            writer.serialize(&record)?;
        }
        writer.flush()?;
        n *= args.n_factor;
    }

    log::info!("Results successfully written to {:?}", &args.output);
    Ok(())
}

/// Builds the double-precision matrix and the known solution for size `n`.
fn build_ground_truth(args: &StabilityArgs, n: usize) -> (NormalizedToeplitzMatrix<f64>, Vec<f64>) {
    let matrix = match args.family {
        MatrixFamily::Dominant => random_dominant_problem(n, args.dominance, false, args.seed).matrix,
        MatrixFamily::Oscillating => decaying_oscillation_problem(n).matrix,
    };
    let x_true = (0..n).map(|i| (0.37 * i as f64).sin() + 1.0).collect();
    let problem = known_solution_problem(matrix, x_true);
    let x_true = problem.solution.unwrap_or_default();
    (problem.matrix, x_true)
}

/// Solves the system in precision `T` with both methods.
fn evaluate<T: Operations>(
    args: &StabilityArgs,
    matrix: &NormalizedToeplitzMatrix<f64>,
    right: &[f64],
    x_true: &[f64],
    precision: &'static str,
) -> Result<Vec<StabilityResult>> {
    let n = matrix.size();
    let narrowed = NormalizedToeplitzMatrix::from_values(
        matrix.values().iter().map(|&v| T::from_f64(v)).collect::<Vec<_>>(),
    )?;
    let right_t: Vec<T> = right.iter().map(|&v| T::from_f64(v)).collect();

    let mut fast = vec![T::zero(); n];
    Solver::new(n).solve(&narrowed, &right_t, &mut fast)?;
    let mut naive = vec![T::zero(); n];
    NaiveSolver::new().solve(&narrowed, &right_t, &mut naive)?;

    [(Method::Fast, fast), (Method::Naive, naive)]
        .into_iter()
        .map(|(method, x)| -> Result<StabilityResult> {
            let widened: Vec<f64> = x.iter().map(|&v| T::to_f64(v)).collect();
            Ok(StabilityResult {
                family: args.family,
                precision,
                method,
                n,
                relative_residual: relative_residual(matrix, &widened, right)?,
                relative_error: relative_error(&x, x_true),
            })
        })
        .collect()
}
