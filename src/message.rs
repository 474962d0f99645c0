//! Messages produced by chatter sources.
//!
//! A [`Message`] is a labeled, sequence-numbered line of text. In the
//! ordered merge variant each message also carries an [`AckToken`]: the
//! producer will not emit its next message until the token is acknowledged,
//! which is how the round-by-round lock-step is enforced.

use crate::error::Result;
use crate::link::LinkSender;
use std::fmt;

/// One item emitted by a source.
///
/// The display form is `"<label> <seq>"`, e.g. `"Joe 3"`.
#[derive(Debug)]
pub struct Message {
    label: String,
    seq: u64,
    text: String,
    ack: Option<AckToken>,
}

impl Message {
    /// Create an unordered message.
    pub fn new(label: impl Into<String>, seq: u64) -> Self {
        let label = label.into();
        let text = format!("{label} {seq}");
        Self {
            label,
            seq,
            text,
            ack: None,
        }
    }

    /// Attach an acknowledgment token.
    ///
    /// The producer that sent this message is now suspended until
    /// [`Message::ack`] runs (or the producer side of the gate goes away).
    pub fn with_ack(mut self, token: AckToken) -> Self {
        self.ack = Some(token);
        self
    }

    /// Get the source label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the per-source sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Get the display text, `"<label> <seq>"`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check whether this message carries an acknowledgment token.
    pub fn is_gated(&self) -> bool {
        self.ack.is_some()
    }

    /// Consume the message, acknowledging its producer if it was gated.
    ///
    /// For ungated messages this is a no-op. For gated messages it
    /// releases the producer to emit its next message; fails if the
    /// producer already went away.
    ///
    /// Dropping a gated message without calling `ack` leaves its producer
    /// suspended for good. That is deliberate: a consumer that forgets to
    /// acknowledge deadlocks the pipeline rather than silently losing the
    /// ordering guarantee.
    pub fn ack(self) -> Result<()> {
        match self.ack {
            Some(token) => token.ack(),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Permission slip for a gated producer's next send.
///
/// Acknowledging consumes the token, so each delivered message can be
/// acknowledged at most once.
pub struct AckToken {
    gate: LinkSender<()>,
}

impl AckToken {
    pub(crate) fn new(gate: LinkSender<()>) -> Self {
        Self { gate }
    }

    /// Release the producer that is waiting on this token.
    pub fn ack(self) -> Result<()> {
        self.gate.send(())
    }
}

impl fmt::Debug for AckToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AckToken")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::Link;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_message_text() {
        let msg = Message::new("Joe", 3);
        assert_eq!(msg.label(), "Joe");
        assert_eq!(msg.seq(), 3);
        assert_eq!(msg.text(), "Joe 3");
        assert_eq!(msg.to_string(), "Joe 3");
        assert!(!msg.is_gated());
    }

    #[test]
    fn test_ack_releases_producer() {
        let (gate_tx, gate_rx) = Link::handoff();
        let msg = Message::new("Ann", 0).with_ack(AckToken::new(gate_tx));
        assert!(msg.is_gated());

        let producer = thread::spawn(move || gate_rx.recv());

        thread::sleep(Duration::from_millis(20));
        msg.ack().unwrap();

        // The producer's wait completed with a value, not a hangup.
        assert_eq!(producer.join().unwrap(), Some(()));
    }

    #[test]
    fn test_dropped_message_keeps_producer_waiting() {
        let (gate_tx, gate_rx) = Link::handoff();
        let msg = Message::new("Ann", 0).with_ack(AckToken::new(gate_tx));

        drop(msg);

        // The gate sender went away without acknowledging.
        assert_eq!(gate_rx.recv(), None);
    }

    #[test]
    fn test_ack_after_producer_gone() {
        let (gate_tx, gate_rx) = Link::handoff();
        let msg = Message::new("Ann", 0).with_ack(AckToken::new(gate_tx));

        drop(gate_rx);
        assert!(msg.ack().is_err());
    }

    #[test]
    fn test_ungated_ack_is_noop() {
        let msg = Message::new("Joe", 1);
        assert!(msg.ack().is_ok());
    }
}
