//! The driver: the consumer side of every conversation.
//!
//! A [`Driver`] owns an output writer and walks a merged stream through
//! one of four shapes:
//!
//! - [`alternate`](Driver::alternate): strict turn-taking reads from two
//!   separate links, no merge involved.
//! - [`drain`](Driver::drain): take a fixed number of items from a merge
//!   in whatever order they arrive.
//! - [`run_rounds`](Driver::run_rounds): consume gated sources in
//!   lock-step rounds, acknowledging each round only after the whole
//!   round is printed.
//! - [`run_until_deadline`](Driver::run_until_deadline): consume until
//!   either a global deadline or a per-item idle deadline fires.
//!
//! The printed sentinels are part of the contract; tests match on them
//! verbatim.

use crate::error::{Error, Result};
use crate::link::LinkReceiver;
use crate::message::Message;
use crossbeam_channel::{after, select};
use smallvec::SmallVec;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, trace};

/// Printed when the driver has heard enough and walks away.
pub const FAREWELL: &str = "You're both boring. I'm leaving.";

/// Printed when the global deadline fires.
pub const GLOBAL_TIMEOUT_MSG: &str = "global timeout reached.";

/// Printed when a single wait exceeds the idle deadline.
pub const IDLE_TIMEOUT_MSG: &str = "You're too slow.";

/// Deadlines for [`Driver::run_until_deadline`].
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Budget for the whole conversation, armed once at entry.
    pub global: Duration,
    /// Budget for each wait, re-armed only by an actual receipt.
    pub idle: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            global: Duration::from_millis(3000),
            idle: Duration::from_millis(1000),
        }
    }
}

impl DriverConfig {
    /// Set the global deadline.
    pub fn with_global(mut self, global: Duration) -> Self {
        self.global = global;
        self
    }

    /// Set the per-item idle deadline.
    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = idle;
        self
    }
}

/// How a deadline-bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The global deadline fired.
    GlobalTimeout,
    /// One wait exceeded the idle deadline.
    IdleTimeout,
    /// The input closed before any deadline fired.
    Disconnected,
}

/// Consumer of merged message streams.
///
/// # Example
///
/// ```rust
/// use chorus::driver::Driver;
/// use chorus::message::Message;
/// use chorus::source::IterSrc;
///
/// # fn main() -> chorus::error::Result<()> {
/// let rx = IterSrc::spawn((0..3u64).map(|seq| Message::new("Joe", seq)));
/// Driver::new().drain(&rx, 3)?;
/// # Ok(())
/// # }
/// ```
pub struct Driver {
    out: Box<dyn Write + Send>,
    config: DriverConfig,
}

impl Driver {
    /// Create a driver printing to stdout with default deadlines.
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            config: DriverConfig::default(),
        }
    }

    /// Replace the deadline configuration.
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Redirect output, e.g. into a buffer for inspection.
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Read two links in strict alternation for `rounds` rounds.
    ///
    /// With handoff links this is already lock-step: whichever source is
    /// not being read sits suspended in its send until its turn comes.
    pub fn alternate(
        &mut self,
        a: &LinkReceiver<Message>,
        b: &LinkReceiver<Message>,
        rounds: usize,
    ) -> Result<()> {
        for _ in 0..rounds {
            for rx in [a, b] {
                match rx.recv() {
                    Some(msg) => writeln!(self.out, "{msg}")?,
                    None => return Err(Error::Disconnected("source closed early")),
                }
            }
        }
        Ok(())
    }

    /// Print `count` items in arrival order, then the farewell line.
    pub fn drain(&mut self, rx: &LinkReceiver<Message>, count: usize) -> Result<()> {
        for _ in 0..count {
            match rx.recv() {
                Some(msg) => writeln!(self.out, "{msg}")?,
                None => return Err(Error::Disconnected("merge closed early")),
            }
        }
        writeln!(self.out, "{FAREWELL}")?;
        Ok(())
    }

    /// Consume gated sources round by round, then print the farewell.
    ///
    /// Each round collects exactly one message per source (the gates
    /// guarantee no source can send twice in a round), prints the whole
    /// round in arrival order, and only then acknowledges every message.
    /// Holding the acknowledgments back until the round is printed is
    /// what keeps the sources advancing in lock-step.
    pub fn run_rounds(
        &mut self,
        rx: &LinkReceiver<Message>,
        sources: usize,
        rounds: usize,
    ) -> Result<()> {
        for round in 0..rounds {
            let mut batch: SmallVec<[Message; 4]> = SmallVec::new();
            for _ in 0..sources {
                match rx.recv() {
                    Some(msg) => batch.push(msg),
                    None => return Err(Error::Disconnected("merge closed mid-round")),
                }
            }
            for msg in &batch {
                writeln!(self.out, "{msg}")?;
            }
            trace!(round, "round printed, acknowledging");
            for msg in batch {
                msg.ack()?;
            }
        }
        writeln!(self.out, "{FAREWELL}")?;
        Ok(())
    }

    /// Consume until a deadline fires or the input closes.
    ///
    /// The global deadline is armed once on entry and never reset. The
    /// idle deadline restarts on every receipt, so only an actual gap in
    /// the stream can fire it. Each deadline prints its sentinel before
    /// the driver returns.
    pub fn run_until_deadline(&mut self, rx: &LinkReceiver<Message>) -> Result<Outcome> {
        let global = after(self.config.global);
        loop {
            let idle = after(self.config.idle);
            select! {
                recv(rx.inner) -> msg => match msg {
                    Ok(msg) => writeln!(self.out, "{msg}")?,
                    Err(_) => {
                        debug!("input closed before any deadline");
                        return Ok(Outcome::Disconnected);
                    }
                },
                recv(global) -> _ => {
                    debug!(deadline = ?self.config.global, "global deadline fired");
                    writeln!(self.out, "{GLOBAL_TIMEOUT_MSG}")?;
                    return Ok(Outcome::GlobalTimeout);
                },
                recv(idle) -> _ => {
                    debug!(deadline = ?self.config.idle, "idle deadline fired");
                    writeln!(self.out, "{IDLE_TIMEOUT_MSG}")?;
                    return Ok(Outcome::IdleTimeout);
                },
            }
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
