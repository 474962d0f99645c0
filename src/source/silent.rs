//! A source that never speaks.
//!
//! Useful for exercising consumers with timeouts: the link stays open,
//! so receivers block instead of observing a hangup.

use crate::link::{Link, LinkReceiver};
use std::thread;
use tracing::debug;

/// A source whose link stays open but never carries a value.
pub struct SilentSrc;

impl SilentSrc {
    /// Start the source.
    ///
    /// The backing thread parks forever holding the sender, so the only
    /// way a receiver returns is its own timeout. The thread is reclaimed
    /// when the process exits.
    pub fn spawn<T: Send + 'static>() -> LinkReceiver<T> {
        let (tx, rx) = Link::handoff();
        debug!("silent source starting");
        thread::spawn(move || {
            let _keep_open = tx;
            loop {
                thread::park();
            }
        });
        rx
    }
}
