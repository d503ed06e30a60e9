//! Timing and memory measurement for the experiment runners.
//!
//! Wall-clock timings are taken as the minimum over several repetitions, which
//! filters out scheduler noise for the short, CPU-bound solves measured here.
//! Memory is read from `/proc/self/status` and is only available on Linux.

use std::time::{Duration, Instant};

/// Runs `f` `repetitions` times (at least once) and returns the fastest run
/// together with the output of the last run.
pub fn time_best_of<R>(repetitions: usize, mut f: impl FnMut() -> R) -> (Duration, R) {
    let start = Instant::now();
    let mut output = f();
    let mut best = start.elapsed();
    for _ in 1..repetitions {
        let start = Instant::now();
        output = f();
        best = best.min(start.elapsed());
    }
    (best, output)
}

/// Peak resident set size (`VmHWM`) of the current process in kilobytes, or 0
/// when it cannot be read.
#[cfg(target_os = "linux")]
pub fn peak_rss_kb() -> u64 {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find_map(|line| line.strip_prefix("VmHWM:"))
                .and_then(|rest| rest.split_whitespace().next())
                .and_then(|value| value.parse().ok())
        })
        .unwrap_or(0)
}

#[cfg(not(target_os = "linux"))]
pub fn peak_rss_kb() -> u64 {
    use std::sync::Once;
    static WARN_ONCE: Once = Once::new();
    WARN_ONCE.call_once(|| {
        log::warn!("Peak RSS is only available on Linux; reporting 0.");
    });
    0
}
