//! Racing redundant work.
//!
//! [`first`] runs several closures that answer the same question and
//! returns whichever finishes first. [`gather`] runs closures answering
//! different questions and collects what arrives within a time budget.
//! Both cut tail latency the same way: never wait for a straggler you
//! can do without.

use crate::error::{Error, Result};
use crate::link::Link;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// A unit of work to race.
pub type Task<T> = Box<dyn FnOnce() -> T + Send + 'static>;

/// Run every task, return the first answer.
///
/// Each task gets its own thread, all sending into one handoff link.
/// The first send wins; once the winner's value is taken the receiver
/// drops, the losers' sends fail, and their threads exit on their own.
///
/// Fails with [`Error::NoInputs`] for an empty task list, or with a
/// disconnect error in the degenerate case where every runner died
/// without answering.
pub fn first<T: Send + 'static>(tasks: Vec<Task<T>>) -> Result<T> {
    if tasks.is_empty() {
        return Err(Error::NoInputs);
    }

    let (tx, rx) = Link::handoff();
    for task in tasks {
        let tx = tx.clone();
        thread::spawn(move || {
            // Losers find the receiver gone and simply exit.
            let _ = tx.send(task());
        });
    }
    drop(tx);

    rx.recv().ok_or(Error::Disconnected("every runner hung up"))
}

/// Run every task, collect what answers within `budget`.
///
/// Results come back in completion order. Tasks that miss the budget are
/// abandoned: the receiver drops, their sends fail, and their threads
/// exit without anyone waiting on them.
pub fn gather<T: Send + 'static>(tasks: Vec<Task<T>>, budget: Duration) -> Vec<T> {
    let expected = tasks.len();
    let (tx, rx) = Link::handoff();
    for task in tasks {
        let tx = tx.clone();
        thread::spawn(move || {
            let _ = tx.send(task());
        });
    }
    drop(tx);

    let deadline = Instant::now() + budget;
    let mut results = Vec::with_capacity(expected);
    while results.len() < expected {
        match rx.recv_deadline(deadline) {
            Ok(Some(value)) => results.push(value),
            Ok(None) => {
                debug!(collected = results.len(), expected, "gather budget spent");
                break;
            }
            // Remaining runners died without answering.
            Err(_) => break,
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replica(id: u32, delay: Duration) -> Task<u32> {
        Box::new(move || {
            thread::sleep(delay);
            id
        })
    }

    #[test]
    fn test_first_rejects_empty() {
        assert!(matches!(first(Vec::<Task<u32>>::new()), Err(Error::NoInputs)));
    }

    #[test]
    fn test_first_returns_fastest() {
        let winner = first(vec![
            replica(0, Duration::from_millis(80)),
            replica(1, Duration::from_millis(5)),
            replica(2, Duration::from_millis(60)),
        ])
        .unwrap();

        assert_eq!(winner, 1);
    }

    #[test]
    fn test_first_does_not_wait_for_losers() {
        let start = Instant::now();
        let winner = first(vec![
            replica(0, Duration::from_millis(5)),
            replica(1, Duration::from_millis(500)),
        ])
        .unwrap();

        assert_eq!(winner, 0);
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn test_gather_collects_everything_when_fast() {
        let mut results = gather(
            vec![
                replica(0, Duration::ZERO),
                replica(1, Duration::ZERO),
                replica(2, Duration::ZERO),
            ],
            Duration::from_millis(500),
        );

        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2]);
    }

    #[test]
    fn test_gather_abandons_stragglers() {
        let start = Instant::now();
        let mut results = gather(
            vec![
                replica(0, Duration::from_millis(5)),
                replica(1, Duration::from_millis(400)),
                replica(2, Duration::from_millis(5)),
            ],
            Duration::from_millis(100),
        );

        assert!(start.elapsed() < Duration::from_millis(350));
        results.sort_unstable();
        assert_eq!(results, vec![0, 2]);
    }
}
