//! # Fan-out
//!
//! The inverse of a merge: one finite generator feeding a pool of
//! workers. The job queue is bounded, so the generator runs ahead only
//! as far as the queue allows; results come back in completion order.
//!
//! ```text
//!                       ┌──> [worker 0] ──┐
//! [IterSrc 1..=9] ──────┼──> [worker 1] ──┼──> results
//!                       └──> [worker 2] ──┘
//! ```
//!
//! Run: `RUST_LOG=debug cargo run --example 03_fanout`

use chorus::error::Result;
use chorus::pool::WorkerPool;
use chorus::source::IterSrc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let jobs = IterSrc::spawn(1..=9u64);
    let results = WorkerPool::new(3).run(jobs.iter(), |job| job * 2)?;

    for result in &results {
        println!("result: {result}");
    }
    println!("{} jobs done", results.len());
    Ok(())
}
