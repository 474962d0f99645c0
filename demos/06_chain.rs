//! # Daisy chain
//!
//! A thousand threads joined by a thousand handoff links. A seed enters
//! one end, every stage adds one, and the total falls out the other end.
//! The elapsed time is the pitch: threads and links are cheap enough to
//! treat as plumbing.
//!
//! ```text
//! seed ──> [+1] ──> [+1] ──> ... ──> [+1] ──> result
//!           └──────── 1000 stages ────────┘
//! ```
//!
//! Run: `cargo run --example 06_chain`

use chorus::chain::chain;
use chorus::error::Result;
use std::time::Instant;

fn main() -> Result<()> {
    let stages = 1000;
    let start = Instant::now();

    let result = chain(stages, 1)?;

    println!("{result}");
    println!("{stages} stages in {:?}", start.elapsed());
    Ok(())
}
