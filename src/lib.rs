//! # Chorus
//!
//! Fan-in concurrency patterns over rendezvous channels.
//!
//! Chorus multiplexes independently paced producer threads into one
//! consumable stream. Every data path is a handoff link: a zero-capacity
//! channel where a send and a receive must meet for either to complete.
//! Nothing is buffered between a source and its consumer, so pacing,
//! ordering, and shutdown are negotiated at the rendezvous points rather
//! than hidden in queues.
//!
//! ## Features
//!
//! - **Labeled sources**: endless talkers with random pacing, finite
//!   generators, and a mute link holder for timeout paths
//! - **Three merge shapes**: relay fan-in, gated lock-step rounds, and a
//!   ready-first select merge with a random tie-break
//! - **Deadline-driven consumption**: a global budget armed once and an
//!   idle budget re-armed per receipt, with verbatim sentinel output
//! - **Supporting cast**: replica racing, a scoped worker pool, and a
//!   daisy chain of a thousand links
//!
//! ## Quick Start
//!
//! ```rust
//! use chorus::prelude::*;
//! use std::time::Duration;
//!
//! let joe = ChatterSrc::new("Joe").with_jitter(Duration::ZERO).with_seed(1).spawn();
//! let ann = ChatterSrc::new("Ann").with_jitter(Duration::ZERO).with_seed(2).spawn();
//!
//! let merged = merge_pair(joe, ann);
//! for msg in merged.iter().take(4) {
//!     println!("{msg}");
//! }
//! ```
//!
//! A source suspended in `send` costs nothing until its consumer shows
//! up, which is how the ordered merge can gate a whole choir of
//! producers on one consumer's acknowledgments. Shutdown is structural:
//! drop a receiver and everything upstream of it unwinds through failed
//! sends.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod driver;
pub mod error;
pub mod link;
pub mod merge;
pub mod message;
pub mod pool;
pub mod race;
pub mod source;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::driver::{Driver, DriverConfig, Outcome};
    pub use crate::error::{Error, Result};
    pub use crate::link::{Link, LinkReceiver, LinkSender};
    pub use crate::merge::{merge, merge_pair, merge_select, merge_with_stats, MergeStats};
    pub use crate::message::{AckToken, Message};
    pub use crate::pool::WorkerPool;
    pub use crate::source::{ChatterSrc, IterSrc, SilentSrc};
}

pub use error::{Error, Result};
