//! A daisy chain of handoff links.
//!
//! A seed value enters one end, every stage adds one and passes it
//! along, and the sum falls out the other end. The point is the cost
//! model it demonstrates: a thousand threads and links stand up in
//! milliseconds, and a value traverses all of them in a blink.

use crate::error::{Error, Result};
use crate::link::Link;
use std::thread;

// Stage closures barely touch their stack.
const STAGE_STACK: usize = 64 * 1024;

/// Pass `seed` through `length` incrementing stages and return the result.
///
/// Each stage is its own thread reading one link and writing the next;
/// the value that comes out is `seed + length`. Stage threads exit as
/// soon as they have passed their value on.
pub fn chain(length: usize, seed: u64) -> Result<u64> {
    let (head_tx, mut rx) = Link::handoff();
    thread::Builder::new()
        .name("chain-head".into())
        .stack_size(STAGE_STACK)
        .spawn(move || {
            let _ = head_tx.send(seed);
        })?;

    for stage in 0..length {
        let (next_tx, next_rx) = Link::handoff();
        let prev_rx = rx;
        thread::Builder::new()
            .name(format!("chain-{stage}"))
            .stack_size(STAGE_STACK)
            .spawn(move || {
                if let Some(value) = prev_rx.recv() {
                    let _ = next_tx.send(value + 1);
                }
            })?;
        rx = next_rx;
    }

    rx.recv()
        .ok_or(Error::Disconnected("a chain stage exited early"))
}
