//! Fan-in: combining several input links into one.
//!
//! Two strategies with different threading shapes:
//!
//! - [`merge`] / [`merge_pair`]: a relay thread per input. Scales to any
//!   input count and is the base for both the unordered and the ordered
//!   (gated) variants.
//! - [`merge_select`]: one thread watching two inputs, forwarding from
//!   whichever is ready first with a random tie-break.
//!
//! Both preserve per-source order, deliver every item exactly once, and
//! close the output only after every input has closed. Both run on
//! handoff links throughout, so backpressure reaches all the way back to
//! the sources.

mod relay;
mod select;

pub use relay::{MergeStats, merge, merge_pair, merge_with_stats};
pub use select::merge_select;
