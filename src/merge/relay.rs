//! Relay merge: one forwarding thread per input.
//!
//! Each input gets a dedicated relay that pulls from it and pushes into
//! the shared output link. No relay ever inspects another's input, so an
//! item is forwarded the moment its relay and the consumer are both
//! ready. With handoff links end to end, a slow consumer suspends every
//! producer; nothing is buffered in between.
//!
//! This same merge carries the ordered variant: feed it gated sources and
//! acknowledge each round (see [`Driver::run_rounds`]) and the output
//! becomes a strict round-robin of one item per source.
//!
//! [`Driver::run_rounds`]: crate::driver::Driver::run_rounds

use crate::error::{Error, Result};
use crate::link::{Link, LinkReceiver};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tracing::debug;

/// Counters for a relay merge, one slot per input.
#[derive(Debug)]
pub struct MergeStats {
    per_input: Vec<AtomicU64>,
    total: AtomicU64,
}

impl MergeStats {
    fn new(inputs: usize) -> Self {
        Self {
            per_input: (0..inputs).map(|_| AtomicU64::new(0)).collect(),
            total: AtomicU64::new(0),
        }
    }

    /// Items forwarded from the given input so far.
    pub fn forwarded(&self, input: usize) -> u64 {
        self.per_input
            .get(input)
            .map_or(0, |n| n.load(Ordering::Relaxed))
    }

    /// Items forwarded across all inputs.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Number of inputs the merge was built with.
    pub fn inputs(&self) -> usize {
        self.per_input.len()
    }
}

/// Merge any number of inputs into one output link.
///
/// Spawns one relay thread per input. The output closes once every input
/// has closed; the relays exit on their own when either side goes away.
///
/// Fails with [`Error::NoInputs`] when `inputs` is empty, since an
/// output that can never carry anything is almost certainly a bug at the
/// call site.
pub fn merge<T: Send + 'static>(inputs: Vec<LinkReceiver<T>>) -> Result<LinkReceiver<T>> {
    merge_with_stats(inputs).map(|(rx, _)| rx)
}

/// Two-input convenience form of [`merge`].
pub fn merge_pair<T: Send + 'static>(a: LinkReceiver<T>, b: LinkReceiver<T>) -> LinkReceiver<T> {
    spawn_relays(vec![a, b]).0
}

/// Like [`merge`], returning shared counters alongside the output.
pub fn merge_with_stats<T: Send + 'static>(
    inputs: Vec<LinkReceiver<T>>,
) -> Result<(LinkReceiver<T>, Arc<MergeStats>)> {
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }
    Ok(spawn_relays(inputs))
}

fn spawn_relays<T: Send + 'static>(
    inputs: Vec<LinkReceiver<T>>,
) -> (LinkReceiver<T>, Arc<MergeStats>) {
    let stats = Arc::new(MergeStats::new(inputs.len()));
    let (tx, rx) = Link::handoff();

    for (idx, input) in inputs.into_iter().enumerate() {
        let tx = tx.clone();
        let stats = Arc::clone(&stats);
        thread::spawn(move || {
            while let Some(item) = input.recv() {
                if tx.send(item).is_err() {
                    debug!(input = idx, "relay stopping, output receiver gone");
                    return;
                }
                stats.per_input[idx].fetch_add(1, Ordering::Relaxed);
                stats.total.fetch_add(1, Ordering::Relaxed);
            }
            debug!(input = idx, "relay stopping, input closed");
        });
    }

    (rx, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::source::IterSrc;

    fn labeled(label: &'static str, count: u64) -> LinkReceiver<Message> {
        IterSrc::spawn((0..count).map(move |seq| Message::new(label, seq)))
    }

    #[test]
    fn test_merge_rejects_empty() {
        let inputs: Vec<LinkReceiver<u64>> = vec![];
        assert!(matches!(merge(inputs), Err(Error::NoInputs)));
    }

    #[test]
    fn test_merge_single_input_preserves_order() {
        let rx = merge(vec![IterSrc::spawn(0..10u64)]).unwrap();
        let got: Vec<u64> = rx.iter().collect();
        assert_eq!(got, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_merge_delivers_everything_in_source_order() {
        let rx = merge_pair(labeled("a", 50), labeled("b", 50));

        let got: Vec<Message> = rx.iter().collect();
        assert_eq!(got.len(), 100);

        for label in ["a", "b"] {
            let seqs: Vec<u64> = got
                .iter()
                .filter(|m| m.label() == label)
                .map(Message::seq)
                .collect();
            assert_eq!(seqs, (0..50).collect::<Vec<_>>(), "order for {label}");
        }
    }

    #[test]
    fn test_merge_output_closes_after_inputs() {
        let rx = merge_pair(labeled("a", 2), labeled("b", 2));

        for _ in 0..4 {
            assert!(rx.recv().is_some());
        }
        assert!(rx.recv().is_none());
    }

    #[test]
    fn test_merge_stats_count_forwards() {
        let (rx, stats) =
            merge_with_stats(vec![labeled("a", 30), labeled("b", 20), labeled("c", 10)]).unwrap();

        let got: Vec<Message> = rx.iter().collect();
        assert_eq!(got.len(), 60);

        // All relays have exited by the time the output closes, so the
        // counters are final.
        assert_eq!(stats.inputs(), 3);
        assert_eq!(stats.forwarded(0), 30);
        assert_eq!(stats.forwarded(1), 20);
        assert_eq!(stats.forwarded(2), 10);
        assert_eq!(stats.forwarded(3), 0);
        assert_eq!(stats.total(), 60);
    }
}
