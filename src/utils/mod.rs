//! Common utilities shared by the integration tests, the experiment runners and
//! the demo.
//!
//! - **`fixtures`**: deterministic generators for test problems: the
//!   decaying-oscillation systems, systems with a known solution, and random
//!   strictly diagonally dominant systems.
//! - **`accuracy`**: error measures comparing a computed solution to the
//!   right-hand side or to a reference solution.
//! - **`perf`**: wall-clock timing and peak memory for the experiment runners.

pub mod accuracy;
pub mod fixtures;
pub mod perf;
