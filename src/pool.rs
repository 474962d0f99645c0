//! A fixed-size worker pool over bounded links.
//!
//! This is the one place in the crate that queues on purpose: jobs sit
//! in a bounded link so the feeder can run ahead of the workers, and
//! results sit in another so workers need not wait for the collector.
//! Once the queue fills, backpressure applies as usual.

use crate::error::Result;
use crate::link::Link;
use std::thread;
use tracing::{debug, trace};

/// Default depth of the job and result queues.
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

/// A pool of worker threads sharing one job queue.
///
/// # Example
///
/// ```rust
/// use chorus::pool::WorkerPool;
///
/// # fn main() -> chorus::error::Result<()> {
/// let results = WorkerPool::new(3).run(0..9u64, |job| job * 2)?;
/// assert_eq!(results.len(), 9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    queue_depth: usize,
}

impl WorkerPool {
    /// Create a pool. A worker count of zero is bumped to one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }

    /// Set the job and result queue depth.
    ///
    /// A depth of zero turns both queues into pure handoffs.
    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth;
        self
    }

    /// Feed `jobs` through the pool and collect the results.
    ///
    /// Workers are scoped threads, so `work` may borrow from the caller.
    /// Results arrive in completion order, not job order; with more than
    /// one worker the two differ.
    pub fn run<I, J, R, F>(&self, jobs: I, work: F) -> Result<Vec<R>>
    where
        I: IntoIterator<Item = J>,
        I::IntoIter: Send,
        J: Send,
        R: Send,
        F: Fn(J) -> R + Sync,
    {
        let jobs = jobs.into_iter();
        let (jobs_tx, jobs_rx) = Link::bounded(self.queue_depth);
        let (results_tx, results_rx) = Link::bounded(self.queue_depth);
        let mut results = Vec::new();

        thread::scope(|scope| -> Result<()> {
            for id in 0..self.workers {
                let jobs_rx = jobs_rx.clone();
                let results_tx = results_tx.clone();
                let work = &work;
                thread::Builder::new()
                    .name(format!("pool-worker-{id}"))
                    .spawn_scoped(scope, move || {
                        while let Some(job) = jobs_rx.recv() {
                            trace!(worker = id, "job started");
                            if results_tx.send(work(job)).is_err() {
                                return;
                            }
                        }
                        debug!(worker = id, "job queue drained");
                    })?;
            }
            // Workers hold the only remaining clones; dropping these lets
            // queue closure propagate.
            drop(jobs_rx);
            drop(results_tx);

            thread::Builder::new()
                .name("pool-feeder".into())
                .spawn_scoped(scope, move || {
                    for job in jobs {
                        if jobs_tx.send(job).is_err() {
                            return;
                        }
                    }
                })?;

            while let Some(result) = results_rx.recv() {
                results.push(result);
            }
            Ok(())
        })?;

        Ok(results)
    }
}
