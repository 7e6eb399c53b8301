//! Blink worker - per-LED scheduler state machine
//!
//! The worker is the consuming end of one command queue:
//! - Idles until a command arrives, polling at a fixed interval
//! - Expands the current payload into passes over its bit pattern
//! - Drives the pin one bit at a time, holding each bit for the period
//! - Re-checks the queue before every bit, so a newer command preempts the
//!   running plan within one bit period
//! - Applies SAVE/RESTORE against the one-deep save slot
//! - Terminates after an exit command finishes its own sequence
//!
//! The worker is generic over `OutputPin`, allowing different hardware
//! backends and mock pins in tests.

use embassy_futures::yield_now;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::{OutputPin, PinState};
use log::{debug, error, warn};

use crate::command::{Blink, Command, CommandReceiver, Repeat};

/// Default queue poll interval while no command is active.
const DEFAULT_IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Worker state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// No current command; polling the queue.
    Idle,
    /// Executing a bit sequence.
    Running,
    /// Exit command completed; terminal.
    Exiting,
}

/// Electrical mapping of pattern bit `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Bit `1` drives the pin high.
    #[default]
    ActiveHigh,
    /// Bit `1` drives the pin low (common-anode wiring).
    ActiveLow,
}

impl Polarity {
    fn pin_state(self, bit: bool) -> PinState {
        match self {
            Polarity::ActiveHigh => PinState::from(bit),
            Polarity::ActiveLow => PinState::from(!bit),
        }
    }
}

/// Outcome of playing one iteration plan.
enum PlayOutcome {
    /// All passes ran out.
    Completed,
    /// A queued command preempted the plan at a bit boundary.
    Interrupted(Command),
}

/// Blink worker - drives one output pin from a command queue.
///
/// The worker exclusively owns its pin, the currently adopted payload and
/// the save slot; the queue is the only shared structure. Producers hold a
/// sender and never observe the worker directly: termination is observed by
/// awaiting [`BlinkWorker::run`].
pub struct BlinkWorker<P: OutputPin> {
    /// Name used as the prefix of every log line.
    name: &'static str,
    /// Output pin driven by pattern bits.
    pin: P,
    /// Command inbox (single consumer).
    commands: CommandReceiver,
    /// Electrical mapping of bit `1`.
    polarity: Polarity,
    /// Queue poll interval while idle.
    idle_poll_interval: Duration,
    /// Most recently adopted payload.
    current: Option<Blink>,
    /// One-deep save slot; overwritten by SAVE, read by RESTORE.
    saved: Option<Blink>,
    /// Current lifecycle state.
    state: WorkerState,
}

impl<P: OutputPin> BlinkWorker<P> {
    /// Create a worker driving `pin` from `commands`.
    pub fn new(name: &'static str, pin: P, commands: CommandReceiver) -> Self {
        Self {
            name,
            pin,
            commands,
            polarity: Polarity::ActiveHigh,
            idle_poll_interval: DEFAULT_IDLE_POLL_INTERVAL,
            current: None,
            saved: None,
            state: WorkerState::Idle,
        }
    }

    /// Set the electrical mapping of pattern bit `1`.
    #[must_use]
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Set the queue poll interval used while no command is active.
    #[must_use]
    pub fn with_idle_poll_interval(mut self, interval: Duration) -> Self {
        self.idle_poll_interval = interval;
        self
    }

    /// Get current worker state
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Run the worker until an exit command completes or the pin fails.
    ///
    /// Returns `Ok(())` once an exit command's own sequence has finished;
    /// awaiting this method is how callers join the worker. A pin write
    /// failure is logged and propagated, terminating the worker early.
    pub async fn run(&mut self) -> Result<(), P::Error> {
        debug!("{}: worker started", self.name);
        let mut pending: Option<Command> = None;
        loop {
            let command = match pending.take() {
                Some(command) => command,
                None => self.next_command().await,
            };
            debug!("{}: command: {}", self.name, command);

            let exiting = matches!(command, Command::Exit(_));
            let Some(blink) = self.interpret(command) else {
                continue;
            };

            self.state = WorkerState::Running;
            if exiting {
                // The exit sequence honors its own plan; the queue is never
                // polled again, so commands behind it stay unread.
                self.play(&blink, false).await?;
                break;
            }
            match self.play(&blink, true).await? {
                PlayOutcome::Interrupted(next) => pending = Some(next),
                PlayOutcome::Completed => {}
            }
        }
        self.state = WorkerState::Exiting;
        debug!("{}: worker exited", self.name);
        Ok(())
    }

    /// Apply a command's flag semantics and produce the payload to execute.
    ///
    /// Returns `None` when the command leaves nothing to run (a restore
    /// against an empty slot); the previous current payload is kept so a
    /// later SAVE still refers to it.
    fn interpret(&mut self, command: Command) -> Option<Blink> {
        let blink = match command {
            Command::Run(blink) => blink,
            Command::Save(blink) => {
                let prior = self.current.take().unwrap_or_else(Blink::solid_off);
                debug!("{}: saved {}", self.name, prior);
                self.saved = Some(prior);
                blink
            }
            Command::Restore => {
                let Some(saved) = self.saved.clone() else {
                    warn!("{}: restore with nothing saved, ignoring", self.name);
                    return None;
                };
                debug!("{}: restored {}", self.name, saved);
                saved
            }
            Command::Exit(mut blink) => {
                if blink.repeat == Repeat::Forever {
                    warn!("{}: endless exit sequence clamped to one pass", self.name);
                    blink.repeat = Repeat::Times(1);
                }
                blink
            }
        };
        self.current = Some(blink.clone());
        Some(blink)
    }

    /// Poll the queue until a command arrives.
    async fn next_command(&mut self) -> Command {
        self.state = WorkerState::Idle;
        loop {
            if let Ok(command) = self.commands.try_receive() {
                return command;
            }
            Timer::after(self.idle_poll_interval).await;
        }
    }

    /// Execute one iteration plan.
    ///
    /// With `watch_queue` set, the queue is checked without blocking before
    /// every bit; a waiting command interrupts the plan and is handed back.
    async fn play(&mut self, blink: &Blink, watch_queue: bool) -> Result<PlayOutcome, P::Error> {
        let mut remaining = blink.repeat.passes();
        loop {
            for bit in blink.pattern.bits() {
                if watch_queue {
                    if let Ok(command) = self.commands.try_receive() {
                        return Ok(PlayOutcome::Interrupted(command));
                    }
                }
                self.write_bit(bit)?;
                if blink.period.as_ticks() > 0 {
                    Timer::after(blink.period).await;
                }
            }
            if let Some(passes) = remaining.as_mut() {
                *passes -= 1;
                if *passes == 0 {
                    return Ok(PlayOutcome::Completed);
                }
            }
            if blink.period.as_ticks() == 0 {
                // A zero-period pass never suspends; yield so sibling tasks
                // and the queue checkpoint above stay live.
                yield_now().await;
            }
        }
    }

    /// Drive the pin to the level a bit maps to under the worker polarity.
    fn write_bit(&mut self, bit: bool) -> Result<(), P::Error> {
        let state = self.polarity.pin_state(bit);
        if let Err(err) = self.pin.set_state(state) {
            error!("{}: pin write failed: {:?}", self.name, err);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_maps_bits_to_levels() {
        assert_eq!(Polarity::ActiveHigh.pin_state(true), PinState::High);
        assert_eq!(Polarity::ActiveHigh.pin_state(false), PinState::Low);
        assert_eq!(Polarity::ActiveLow.pin_state(true), PinState::Low);
        assert_eq!(Polarity::ActiveLow.pin_state(false), PinState::High);
    }
}
