//! In-process links built on crossbeam channels.
//!
//! A link is the only way data moves between threads in this crate. The
//! default flavor is a *handoff* link: a zero-capacity rendezvous channel
//! where a send suspends until a matching receive arrives, and vice versa.
//! Nothing is queued anywhere, which is what gives the merge strategies
//! their backpressure and lock-step properties. Bounded links exist for
//! the worker pool, which deliberately queues.

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Factory for link endpoints.
///
/// This is just a thin wrapper around crossbeam channels, providing a
/// consistent API and keeping channel details out of the public surface.
///
/// # Example
///
/// ```rust
/// use chorus::link::Link;
/// use std::thread;
///
/// let (tx, rx) = Link::handoff();
///
/// thread::spawn(move || {
///     tx.send("hello").unwrap();
/// });
///
/// assert_eq!(rx.recv(), Some("hello"));
/// ```
pub struct Link;

impl Link {
    /// Create a handoff (rendezvous) link.
    ///
    /// The channel has no capacity: a send and a receive must meet for
    /// either to complete. Every data path in the merge strategies uses
    /// this flavor.
    pub fn handoff<T>() -> (LinkSender<T>, LinkReceiver<T>) {
        let (tx, rx) = crossbeam_channel::bounded(0);
        (LinkSender { inner: tx }, LinkReceiver { inner: rx })
    }

    /// Create a bounded link with the specified capacity.
    ///
    /// Sends block once `capacity` items are queued. Use this only where
    /// queueing is the point (the worker pool); it changes the ordering
    /// properties the handoff flavor guarantees.
    pub fn bounded<T>(capacity: usize) -> (LinkSender<T>, LinkReceiver<T>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (LinkSender { inner: tx }, LinkReceiver { inner: rx })
    }
}

/// Sender half of a link.
pub struct LinkSender<T> {
    pub(crate) inner: crossbeam_channel::Sender<T>,
}

// Derived Clone would require T: Clone; senders are always clonable.
impl<T> Clone for LinkSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> LinkSender<T> {
    /// Send a value through the link.
    ///
    /// Blocks until a receiver takes the value (handoff links) or until
    /// queue space frees up (bounded links). Fails only when every
    /// receiver is gone.
    pub fn send(&self, value: T) -> Result<()> {
        self.inner
            .send(value)
            .map_err(|_| Error::Disconnected("link receiver dropped"))
    }

    /// Try to send without blocking.
    ///
    /// On a handoff link this succeeds only if a receiver is already
    /// waiting.
    pub fn try_send(&self, value: T) -> Result<()> {
        use crossbeam_channel::TrySendError;
        match self.inner.try_send(value) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(Error::Full("no receiver ready")),
            Err(TrySendError::Disconnected(_)) => Err(Error::Disconnected("link receiver dropped")),
        }
    }

    /// Get the number of queued values (always 0 for handoff links).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Receiver half of a link.
///
/// Receivers can be cloned; clones compete for values, each value going
/// to exactly one of them. The worker pool relies on this to share one
/// job queue across workers.
pub struct LinkReceiver<T> {
    pub(crate) inner: crossbeam_channel::Receiver<T>,
}

impl<T> Clone for LinkReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> LinkReceiver<T> {
    /// Receive a value from the link.
    ///
    /// Blocks until a value is available. Returns `None` when every
    /// sender is gone and nothing is queued.
    pub fn recv(&self) -> Option<T> {
        self.inner.recv().ok()
    }

    /// Try to receive without blocking.
    ///
    /// Returns `None` if no value is ready.
    pub fn try_recv(&self) -> Option<T> {
        self.inner.try_recv().ok()
    }

    /// Receive with a timeout.
    ///
    /// Returns `Ok(Some(value))` on receipt, `Ok(None)` if the timeout
    /// elapsed first, and an error if the link disconnected.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<T>> {
        use crossbeam_channel::RecvTimeoutError;
        match self.inner.recv_timeout(timeout) {
            Ok(value) => Ok(Some(value)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::Disconnected("link sender dropped")),
        }
    }

    /// Receive with an absolute deadline.
    ///
    /// Same contract as [`recv_timeout`](Self::recv_timeout) but measured
    /// against an `Instant`, so repeated calls share one time budget.
    pub fn recv_deadline(&self, deadline: Instant) -> Result<Option<T>> {
        use crossbeam_channel::RecvTimeoutError;
        match self.inner.recv_deadline(deadline) {
            Ok(value) => Ok(Some(value)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::Disconnected("link sender dropped")),
        }
    }

    /// Get the number of queued values (always 0 for handoff links).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Create a blocking iterator over received values.
    ///
    /// The iterator ends when every sender is gone.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    #[test]
    fn test_link_basic() {
        let (tx, rx) = Link::bounded(16);

        tx.send(1u64).unwrap();
        tx.send(2u64).unwrap();

        assert_eq!(rx.recv(), Some(1));
        assert_eq!(rx.recv(), Some(2));
    }

    #[test]
    fn test_link_handoff_blocks_sender() {
        let (tx, rx) = Link::handoff();
        let sent = Arc::new(AtomicBool::new(false));
        let sent2 = Arc::clone(&sent);

        let sender = thread::spawn(move || {
            tx.send(42u64).unwrap();
            sent2.store(true, Ordering::SeqCst);
        });

        // No receiver yet, so the send cannot have completed.
        thread::sleep(Duration::from_millis(50));
        assert!(!sent.load(Ordering::SeqCst));

        assert_eq!(rx.recv(), Some(42));
        sender.join().unwrap();
        assert!(sent.load(Ordering::SeqCst));
    }

    #[test]
    fn test_link_handoff_try_send_needs_receiver() {
        let (tx, rx) = Link::handoff();

        // Nobody is waiting to receive.
        assert!(matches!(tx.try_send(1u64), Err(Error::Full(_))));

        let receiver = thread::spawn(move || rx.recv());
        // Give the receiver time to park.
        thread::sleep(Duration::from_millis(50));
        assert!(tx.try_send(2u64).is_ok());
        assert_eq!(receiver.join().unwrap(), Some(2));
    }

    #[test]
    fn test_link_threaded() {
        let (tx, rx) = Link::handoff();
        let count = 100u64;

        let producer = thread::spawn(move || {
            for i in 0..count {
                tx.send(i).unwrap();
            }
        });

        let received: Vec<u64> = rx.iter().take(count as usize).collect();
        producer.join().unwrap();

        assert_eq!(received.len(), count as usize);
        for (i, v) in received.iter().enumerate() {
            assert_eq!(*v, i as u64);
        }
    }

    #[test]
    fn test_link_closed() {
        let (tx, rx) = Link::bounded(16);

        tx.send(1u64).unwrap();
        drop(tx);

        // Can still receive pending.
        assert_eq!(rx.recv(), Some(1));
        // Now closed.
        assert_eq!(rx.recv(), None);
    }

    #[test]
    fn test_link_send_after_receiver_drop() {
        let (tx, rx) = Link::bounded(1);
        drop(rx);

        assert!(matches!(tx.send(7u64), Err(Error::Disconnected(_))));
    }

    #[test]
    fn test_link_bounded_try_send() {
        let (tx, rx) = Link::bounded(2);

        assert!(tx.try_send(1u64).is_ok());
        assert!(tx.try_send(2u64).is_ok());
        // Channel full.
        assert!(matches!(tx.try_send(3u64), Err(Error::Full(_))));

        // Drain one.
        rx.recv();
        // Now can send.
        assert!(tx.try_send(3u64).is_ok());
    }

    #[test]
    fn test_link_cloned_receivers_compete() {
        let (tx, rx1) = Link::bounded(4);
        let rx2 = rx1.clone();

        for i in 0..4u64 {
            tx.send(i).unwrap();
        }
        drop(tx);

        let mut seen = vec![];
        seen.push(rx1.recv().unwrap());
        seen.push(rx2.recv().unwrap());
        seen.push(rx1.recv().unwrap());
        seen.push(rx2.recv().unwrap());
        seen.sort_unstable();

        // Each value went to exactly one receiver.
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(rx1.recv(), None);
        assert_eq!(rx2.recv(), None);
    }

    #[test]
    fn test_link_recv_timeout() {
        let (tx, rx) = Link::bounded(1);

        // Nothing queued: times out.
        assert!(rx.recv_timeout(Duration::from_millis(20)).unwrap().is_none());

        tx.send(9u64).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_millis(20)).unwrap(), Some(9));

        drop(tx);
        assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
    }

    #[test]
    fn test_link_recv_deadline_shared_budget() {
        let (_tx, rx) = Link::bounded::<u64>(1);
        let deadline = Instant::now() + Duration::from_millis(60);

        assert!(rx.recv_deadline(deadline).unwrap().is_none());
        // The deadline already passed, so the second call returns at once.
        let start = Instant::now();
        assert!(rx.recv_deadline(deadline).unwrap().is_none());
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
