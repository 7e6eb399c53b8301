//! Commands understood by a blink worker
//!
//! The wire shape is a tuple `(period_ms, pattern, repeat, flag)`; here the
//! payload lives in [`Blink`] and each flag value is a [`Command`] variant,
//! so SAVE and RESTORE cannot be combined and RESTORE carries no payload.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Duration;

use crate::pattern::{Pattern, PatternError};

/// Command queue capacity per worker.
///
/// The queue is bounded; `send` applies backpressure once a producer runs
/// this many commands ahead of the worker, which under normal pacing
/// (commands slower than bit periods) never happens.
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// Type alias for the per-worker command queue
pub type CommandQueue = Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>;

/// Type alias for command sender
pub type CommandSender = Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>;

/// Type alias for command receiver
pub type CommandReceiver =
    Receiver<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>;

/// Repeat behavior of a blink payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Replay the pattern until another command arrives.
    Forever,
    /// Replay the pattern a fixed number of times.
    ///
    /// `Times(0)` and `Times(1)` both mean exactly one pass; zero shows up
    /// on the wire as the placeholder repeat of SAVE/EXIT bodies.
    Times(u16),
}

impl Repeat {
    /// Number of passes the plan will run, or `None` for endless.
    pub fn passes(self) -> Option<u32> {
        match self {
            Repeat::Forever => None,
            Repeat::Times(count) => Some(u32::from(count.max(1))),
        }
    }
}

impl From<i32> for Repeat {
    /// Wire semantics: any negative value repeats forever, a non-negative
    /// value is a pass count (saturated to `u16::MAX`).
    fn from(raw: i32) -> Self {
        if raw < 0 {
            Repeat::Forever
        } else {
            match u16::try_from(raw) {
                Ok(count) => Repeat::Times(count),
                Err(_) => Repeat::Times(u16::MAX),
            }
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repeat::Forever => write!(f, "forever"),
            Repeat::Times(count) => write!(f, "x{}", count),
        }
    }
}

/// One blink payload: how long each bit holds, which bits, how many passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blink {
    /// Hold duration applied to each bit.
    pub period: Duration,
    /// Bit sequence driven once per pass.
    pub pattern: Pattern,
    /// Pass count.
    pub repeat: Repeat,
}

impl Blink {
    /// Build a payload from wire values: a period in milliseconds, a string
    /// of `0`/`1` symbols and a repeat count (negative repeats forever).
    pub fn new(
        period_ms: u64,
        pattern: &str,
        repeat: impl Into<Repeat>,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            period: Duration::from_millis(period_ms),
            pattern: Pattern::parse(pattern)?,
            repeat: repeat.into(),
        })
    }

    /// Single all-on pass: turns the LED on and leaves it on.
    pub fn solid_on() -> Self {
        Self {
            period: Duration::from_millis(0),
            pattern: Pattern::single(true),
            repeat: Repeat::Times(1),
        }
    }

    /// Single all-off pass: turns the LED off and leaves it off.
    ///
    /// Also stands in for the absent previous command when SAVE arrives
    /// before anything has run, so a later RESTORE turns the LED off.
    pub fn solid_off() -> Self {
        Self {
            period: Duration::from_millis(0),
            pattern: Pattern::single(false),
            repeat: Repeat::Times(1),
        }
    }
}

impl fmt::Display for Blink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}ms {} {}",
            self.period.as_millis(),
            self.pattern,
            self.repeat
        )
    }
}

/// Commands that can be sent to a blink worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Adopt the payload as the current command and execute it.
    Run(Blink),
    /// Store the previous current payload in the save slot, then run this one.
    Save(Blink),
    /// Re-run the payload held in the save slot; the slot keeps its content.
    Restore,
    /// Run the payload to completion, then terminate the worker.
    Exit(Blink),
}

impl Command {
    /// Plain blink command.
    pub fn run(
        period_ms: u64,
        pattern: &str,
        repeat: impl Into<Repeat>,
    ) -> Result<Self, PatternError> {
        Ok(Command::Run(Blink::new(period_ms, pattern, repeat)?))
    }

    /// Blink command that saves the previous current payload first.
    pub fn save(
        period_ms: u64,
        pattern: &str,
        repeat: impl Into<Repeat>,
    ) -> Result<Self, PatternError> {
        Ok(Command::Save(Blink::new(period_ms, pattern, repeat)?))
    }

    /// Replay whatever the save slot holds.
    pub fn restore() -> Self {
        Command::Restore
    }

    /// Graceful shutdown: run the payload once through, then stop the worker.
    pub fn exit(
        period_ms: u64,
        pattern: &str,
        repeat: impl Into<Repeat>,
    ) -> Result<Self, PatternError> {
        Ok(Command::Exit(Blink::new(period_ms, pattern, repeat)?))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Run(blink) => write!(f, "run {}", blink),
            Command::Save(blink) => write!(f, "save prior, run {}", blink),
            Command::Restore => write!(f, "restore saved"),
            Command::Exit(blink) => write!(f, "exit after {}", blink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_follows_wire_semantics() {
        assert_eq!(Repeat::from(-1), Repeat::Forever);
        assert_eq!(Repeat::from(-37), Repeat::Forever);
        assert_eq!(Repeat::from(0), Repeat::Times(0));
        assert_eq!(Repeat::from(8), Repeat::Times(8));
        assert_eq!(Repeat::from(100_000), Repeat::Times(u16::MAX));
    }

    #[test]
    fn zero_and_one_repeat_both_mean_one_pass() {
        assert_eq!(Repeat::Times(0).passes(), Some(1));
        assert_eq!(Repeat::Times(1).passes(), Some(1));
        assert_eq!(Repeat::Times(4).passes(), Some(4));
        assert_eq!(Repeat::Forever.passes(), None);
    }

    #[test]
    fn blink_converts_wire_values() {
        let blink = Blink::new(200, "10", 2).unwrap();
        assert_eq!(blink.period, Duration::from_millis(200));
        assert_eq!(blink.pattern.len(), 2);
        assert_eq!(blink.repeat, Repeat::Times(2));
    }

    #[test]
    fn malformed_patterns_are_rejected_at_construction() {
        assert_eq!(Blink::new(200, "", 1).unwrap_err(), PatternError::Empty);
        assert_eq!(
            Command::run(200, "10z", 1).unwrap_err(),
            PatternError::InvalidSymbol('z')
        );
        assert_eq!(
            Command::save(0, "", 1).unwrap_err(),
            PatternError::Empty
        );
        assert_eq!(
            Command::exit(0, "", 1).unwrap_err(),
            PatternError::Empty
        );
    }

    #[test]
    fn solid_helpers_run_a_single_instant_pass() {
        let on = Blink::solid_on();
        assert_eq!(on.pattern.to_string(), "1");
        assert_eq!(on.period, Duration::from_millis(0));
        assert_eq!(on.repeat.passes(), Some(1));

        let off = Blink::solid_off();
        assert_eq!(off.pattern.to_string(), "0");
        assert_eq!(off.repeat.passes(), Some(1));
    }

    #[test]
    fn display_decodes_the_command() {
        assert_eq!(
            Command::run(200, "10", 2).unwrap().to_string(),
            "run 200ms 10 x2"
        );
        assert_eq!(
            Command::run(500, "10", -1).unwrap().to_string(),
            "run 500ms 10 forever"
        );
        assert_eq!(
            Command::save(50, "10000000", 8).unwrap().to_string(),
            "save prior, run 50ms 10000000 x8"
        );
        assert_eq!(Command::restore().to_string(), "restore saved");
        assert_eq!(
            Command::exit(0, "0", 1).unwrap().to_string(),
            "exit after 0ms 0 x1"
        );
    }
}
