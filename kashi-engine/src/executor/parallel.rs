//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use rayon::prelude::*;

/// Fans span jobs out over rayon
///
/// With `threads` set, jobs run on a dedicated pool of that size; otherwise
/// the global pool is used.
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a new parallel executor
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    fn run_on_current_pool<T, F>(jobs: usize, job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> Result<T> + Send + Sync,
    {
        (0..jobs).into_par_iter().map(job).collect::<Result<Vec<_>>>()
    }
}

impl Executor for ParallelExecutor {
    fn run<T, F>(&self, jobs: usize, job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> Result<T> + Send + Sync,
    {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
                pool.install(|| Self::run_on_current_pool(jobs, job))
            }
            None => Self::run_on_current_pool(jobs, job),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
