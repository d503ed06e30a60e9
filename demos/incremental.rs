//! Demonstrates growing a Toeplitz system one order at a time.
//!
//! The program treats the decaying-oscillation system as a stream: before each
//! call to [`Solver::iterate`] it exposes exactly one more diagonal pair and one
//! more right-hand value, then reports the normalizer λ and the residual of the
//! current leading subsystem. Run with `RUST_LOG=debug` to also see the solver's
//! buffer growth.
//!
//! ```text
//! cargo run --release --example incremental -- --n 40 --hint 4
//! ```

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use toeplitz_solver::{
    NormalizedToeplitzMatrix, Solver, Vector,
    utils::{accuracy::relative_residual, fixtures::decaying_oscillation_problem},
};

#[derive(Parser, Debug)]
#[clap(
    name = "incremental-demo",
    about = "Extends a Toeplitz solution one order at a time."
)]
struct DemoArgs {
    /// Final system size.
    #[clap(long, default_value_t = 32)]
    n: usize,
    /// Expected order passed to the solver; small values force buffer growth.
    #[clap(long, default_value_t = 1)]
    hint: usize,
    /// Optional CSV file receiving one row per order.
    #[clap(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OrderRecord {
    order: usize,
    lambda: f64,
    capacity: usize,
    relative_residual: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = DemoArgs::parse();
    let full = decaying_oscillation_problem::<f64>(args.n.max(2));
    let n = full.matrix.size();
    let center = n - 1;

    let mut writer = match &args.output {
        Some(path) => Some(
            csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create CSV writer for {path:?}"))?,
        ),
        None => None,
    };

    let mut solver = Solver::<f64>::new(args.hint);
    let w = solver.result_vector_multiplier();
    let mut result = Vec::new();

    for size in 2..=n {
        // The leading size×size subsystem: diagonals -(size-1)..=size-1.
        let values = &full.matrix.values()[center + 1 - size..center + size];
        let matrix = NormalizedToeplitzMatrix::from_values(values)?;
        let right = Vector::from(&full.right[..size]);
        result.resize(size.div_ceil(w) * w, 0.0);

        solver.iterate(&matrix, &right, &mut result)?;

        let record = OrderRecord {
            order: solver.order(),
            lambda: solver.lambda(),
            capacity: solver.capacity(),
            relative_residual: relative_residual(&matrix, &result, right.as_slice())?,
        };
        log::info!(
            "order {:>3}: lambda={:.6e}, capacity={}, residual={:.3e}",
            record.order,
            record.lambda,
            record.capacity,
            record.relative_residual
        );
        if let Some(writer) = writer.as_mut() {
            writer.serialize(&record)?;
        }
    }

    if let Some(mut writer) = writer {
        writer.flush()?;
    }
    log::info!("Solution of the {n}x{n} system: {:?}", &result[..n]);
    Ok(())
}
