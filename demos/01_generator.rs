//! # Generator
//!
//! Two endless talkers read in strict alternation. Because every link is
//! a handoff, reading Joe blocks Ann from completing a send even when
//! she has something ready; the merge demos show how to lift that.
//!
//! ```text
//! [ChatterSrc Joe] ──┐
//!                    ├── alternate ──> [Driver]
//! [ChatterSrc Ann] ──┘
//! ```
//!
//! Run: `cargo run --example 01_generator`

use chorus::driver::Driver;
use chorus::error::Result;
use chorus::source::ChatterSrc;

fn main() -> Result<()> {
    let joe = ChatterSrc::new("Joe").spawn();
    let ann = ChatterSrc::new("Ann").spawn();

    Driver::new().alternate(&joe, &ann, 5)
}
