//! Select merge: one thread watching both inputs at once.
//!
//! Instead of a relay per input, a single thread waits on both links and
//! takes from whichever is ready first. When both are ready in the same
//! instant the choice is random, so neither input can starve the other
//! however the timing falls out. Over many contended picks the split
//! tends to one-to-one.
//!
//! The thread also owns the shutdown story: an input that closes is
//! dropped from the watch set, and the output closes once both are gone.

use crate::link::{Link, LinkReceiver};
use crossbeam_channel::Select;
use std::thread;
use tracing::debug;

/// Merge two inputs with a ready-first policy.
///
/// A single thread services both links. Each iteration it blocks until
/// at least one input can complete a handoff, picks among the ready ones
/// at random, and forwards the item. The output closes once both inputs
/// have closed or the output receiver goes away.
pub fn merge_select<T: Send + 'static>(
    a: LinkReceiver<T>,
    b: LinkReceiver<T>,
) -> LinkReceiver<T> {
    let (tx, rx) = Link::handoff();

    thread::spawn(move || {
        let mut sel = Select::new();
        let idx_a = sel.recv(&a.inner);
        let idx_b = sel.recv(&b.inner);
        let mut open = 2;

        while open > 0 {
            let op = sel.select();
            let idx = op.index();
            let res = if idx == idx_a {
                op.recv(&a.inner)
            } else {
                op.recv(&b.inner)
            };

            match res {
                Ok(item) => {
                    if tx.send(item).is_err() {
                        debug!("select merge stopping, output receiver gone");
                        return;
                    }
                }
                Err(_) => {
                    sel.remove(idx);
                    open -= 1;
                    debug!(input = idx, "select merge dropped closed input");
                }
            }
        }
    });

    rx
}
