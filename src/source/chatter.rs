//! The chatter source: an endless talker on its own thread.
//!
//! A chatter source emits `"<label> <seq>"` messages over a handoff link,
//! pausing a uniform random `[0, jitter)` between emissions. It models a
//! party you cannot hurry: the consumer decides when each handoff
//! completes, and in the gated variant the consumer also decides when the
//! source may speak again.

use crate::link::{Link, LinkReceiver, LinkSender};
use crate::message::{AckToken, Message};
use crate::source::jitter::{rng_from, uniform_pause};
use rand::rngs::SmallRng;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Default emission jitter cap, one second.
pub const DEFAULT_JITTER: Duration = Duration::from_millis(1000);

/// Builder for a chatter source.
///
/// # Example
///
/// ```rust
/// use chorus::source::ChatterSrc;
/// use std::time::Duration;
///
/// let rx = ChatterSrc::new("Joe")
///     .with_jitter(Duration::ZERO)
///     .with_seed(1)
///     .spawn();
///
/// assert_eq!(rx.recv().unwrap().text(), "Joe 0");
/// assert_eq!(rx.recv().unwrap().text(), "Joe 1");
/// ```
#[derive(Debug, Clone)]
pub struct ChatterSrc {
    label: String,
    jitter: Duration,
    seed: Option<u64>,
}

impl ChatterSrc {
    /// Create a source that will speak as `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            jitter: DEFAULT_JITTER,
            seed: None,
        }
    }

    /// Set the jitter cap: pauses are drawn uniformly from `[0, jitter)`.
    ///
    /// `Duration::ZERO` disables pausing, which tests use to run fast.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Seed the pause RNG for reproducible timing.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start the source on its own thread.
    ///
    /// Messages flow over a handoff link, so the source is suspended in
    /// `send` until the consumer takes each message. It keeps emitting
    /// until every receiver is gone, then the thread exits.
    pub fn spawn(self) -> LinkReceiver<Message> {
        let (tx, rx) = Link::handoff();
        debug!(label = %self.label, "chatter source starting");
        thread::spawn(move || self.run(tx, None));
        rx
    }

    /// Start the source in gated mode.
    ///
    /// Every message carries an [`AckToken`] for a gate shared by the
    /// whole source. After each send the source pauses, then waits on the
    /// gate; it emits its next message only once the consumer
    /// acknowledges. The source keeps its own end of the gate open to
    /// mint tokens, so a message dropped without acknowledgment parks
    /// this thread for good.
    pub fn spawn_gated(self) -> LinkReceiver<Message> {
        let (tx, rx) = Link::handoff();
        let gate = Link::handoff();
        debug!(label = %self.label, "gated chatter source starting");
        thread::spawn(move || self.run(tx, Some(gate)));
        rx
    }

    fn run(self, tx: LinkSender<Message>, gate: Option<(LinkSender<()>, LinkReceiver<()>)>) {
        let mut rng = rng_from(self.seed);
        for seq in 0.. {
            let mut msg = Message::new(&self.label, seq);
            if let Some((gate_tx, _)) = &gate {
                msg = msg.with_ack(AckToken::new(gate_tx.clone()));
            }

            if tx.send(msg).is_err() {
                debug!(label = %self.label, seq, "chatter source stopping");
                return;
            }
            trace!(label = %self.label, seq, "emitted");

            thread::sleep(self.pause(&mut rng));

            if let Some((_, gate_rx)) = &gate {
                // Wait our turn. The ack arrives through the token on the
                // message we just sent; nothing else can release us.
                if gate_rx.recv().is_none() {
                    return;
                }
            }
        }
    }

    fn pause(&self, rng: &mut SmallRng) -> Duration {
        uniform_pause(rng, self.jitter)
    }
}
