//! Fan-out of independent sub-computations.
//!
//! Builders hand a batch of closures to a [`Scheduler`] and get the results
//! back in submission order, so output never depends on completion order.

use rayon::prelude::*;

use crate::error::{SimulationError, SimulationResult};

pub trait Scheduler: Send + Sync {
    /// Run every task and return the results in submission order.
    fn run_all<T, F>(&self, tasks: Vec<F>) -> Vec<T>
    where
        F: FnOnce() -> T + Send,
        T: Send;
}

/// Runs tasks one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn run_all<T, F>(&self, tasks: Vec<F>) -> Vec<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        tasks.into_iter().map(|task| task()).collect()
    }
}

/// Runs tasks on a rayon pool.
///
/// Uses the global pool unless built with [`RayonScheduler::with_threads`].
#[derive(Debug, Default)]
pub struct RayonScheduler {
    pool: Option<rayon::ThreadPool>,
}

impl RayonScheduler {
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Dedicated pool with `threads` workers.
    pub fn with_threads(threads: usize) -> SimulationResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("qm-worker-{i}"))
            .build()
            .map_err(|e| SimulationError::Scheduler {
                what: e.to_string(),
            })?;
        Ok(Self { pool: Some(pool) })
    }

    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Scheduler for RayonScheduler {
    fn run_all<T, F>(&self, tasks: Vec<F>) -> Vec<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        let run = move || -> Vec<T> { tasks.into_par_iter().map(|task| task()).collect() };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Scheduler chosen at run time.
#[derive(Debug)]
pub enum Executor {
    Inline(InlineScheduler),
    Rayon(RayonScheduler),
}

impl Executor {
    /// Inline when `parallel` is false; otherwise rayon, on a dedicated pool
    /// when `threads` is given.
    pub fn from_options(parallel: bool, threads: Option<usize>) -> SimulationResult<Self> {
        if !parallel {
            return Ok(Executor::Inline(InlineScheduler));
        }
        match threads {
            Some(n) => Ok(Executor::Rayon(RayonScheduler::with_threads(n)?)),
            None => Ok(Executor::Rayon(RayonScheduler::new())),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Executor::Inline(InlineScheduler)
    }
}

impl Scheduler for Executor {
    fn run_all<T, F>(&self, tasks: Vec<F>) -> Vec<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        match self {
            Executor::Inline(s) => s.run_all(tasks),
            Executor::Rayon(s) => s.run_all(tasks),
        }
    }
}
