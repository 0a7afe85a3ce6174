//! Execution strategies for per-span segmentation
//!
//! Spans are independent once tokens are aligned, so the engine runs one job
//! per span, either in order on the calling thread or fanned out over rayon.
//! Output order always follows span order.

use crate::error::Result;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Single-threaded, in span order
    Sequential,
    /// One rayon task per span
    Parallel,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Run `job(i)` for every `i` in `0..jobs` and collect the results in order
    fn run<T, F>(&self, jobs: usize, job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> Result<T> + Send + Sync;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Pick a mode from the number of spans in a call
pub fn auto_select(span_count: usize, threshold: usize) -> ExecutionMode {
    if span_count < 2 || span_count < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}
