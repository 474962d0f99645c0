//! A finite source backed by an iterator.
//!
//! Unlike chatter sources, an iterator source ends: once the iterator is
//! exhausted the sender drops and receivers observe a clean close. This
//! is the generator to use for fan-out work feeds and deterministic
//! tests.

use crate::link::{Link, LinkReceiver};
use std::thread;

/// A source that hands off each item of an iterator, then closes.
pub struct IterSrc;

impl IterSrc {
    /// Start the source.
    ///
    /// Items flow over a handoff link in iterator order. The thread exits
    /// when the iterator ends or every receiver is gone.
    pub fn spawn<I>(items: I) -> LinkReceiver<I::Item>
    where
        I: IntoIterator + Send + 'static,
        I::Item: Send + 'static,
        I::IntoIter: Send,
    {
        let (tx, rx) = Link::handoff();
        thread::spawn(move || {
            for item in items {
                if tx.send(item).is_err() {
                    return;
                }
            }
        });
        rx
    }
}
