//! Sources: threads that emit values over links.
//!
//! Three flavors cover the patterns in this crate:
//!
//! - [`ChatterSrc`]: an endless labeled talker with random pacing, the
//!   producer every merge strategy is built around. Its gated mode adds
//!   the acknowledgment handshake the ordered merge needs.
//! - [`IterSrc`]: a finite generator that closes its link when done.
//! - [`SilentSrc`]: an open link that never carries a value, for driving
//!   timeout paths.
//!
//! All sources hand off over zero-capacity links: a source is suspended
//! mid-`send` until its consumer arrives, so pacing is always a joint
//! decision of both sides.

mod chatter;
mod iter;
mod jitter;
mod silent;

pub use chatter::{ChatterSrc, DEFAULT_JITTER};
pub use iter::IterSrc;
pub use silent::SilentSrc;
