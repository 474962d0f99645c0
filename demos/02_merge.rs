//! # Merge
//!
//! The full conversation, three ways. First an unordered relay merge:
//! ten lines in whatever order the talkers manage. Then a gated merge:
//! five strict rounds, one line per talker per round, each round
//! acknowledged as a unit. Finally a select merge consumed under a
//! three-second global deadline and a one-second idle deadline.
//!
//! ```text
//! [ChatterSrc Joe] ──┐
//!                    ├── merge ──> [Driver]
//! [ChatterSrc Ann] ──┘
//! ```
//!
//! Run: `RUST_LOG=debug cargo run --example 02_merge`

use chorus::driver::Driver;
use chorus::error::Result;
use chorus::merge::{merge_pair, merge_select};
use chorus::source::ChatterSrc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut driver = Driver::new();

    // No order: items land as they come.
    let merged = merge_pair(
        ChatterSrc::new("Joe").spawn(),
        ChatterSrc::new("Ann").spawn(),
    );
    driver.drain(&merged, 10)?;

    // Forced order: the gates hold each talker until the round is done.
    let merged = merge_pair(
        ChatterSrc::new("Joe").spawn_gated(),
        ChatterSrc::new("Ann").spawn_gated(),
    );
    driver.run_rounds(&merged, 2, 5)?;

    // Select with deadlines: the conversation ends when a deadline says so.
    let merged = merge_select(
        ChatterSrc::new("Joe").spawn(),
        ChatterSrc::new("Ann").spawn(),
    );
    driver.run_until_deadline(&merged)?;

    Ok(())
}
