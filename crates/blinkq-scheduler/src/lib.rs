#![cfg_attr(not(test), no_std)]

//! blinkq scheduler - command-driven per-LED blink engine
//!
//! Each LED gets a bounded FIFO command queue and a [`BlinkWorker`] that
//! owns the output pin. Producers push [`Command`]s; the worker plays the
//! current payload's bit pattern at the commanded period and re-checks the
//! queue at every bit boundary, so a newer command wins within one bit
//! period. A one-deep save slot supports SAVE/RESTORE overrides, and an
//! exit command shuts the worker down after finishing its own sequence.
//!
//! Architecture layers:
//! - `pattern` - bit patterns parsed from `0`/`1` strings
//! - `command` - payloads, repeat semantics and the queue type aliases
//! - `worker` - the per-LED state machine
//!
//! The worker is generic over `embedded_hal::digital::OutputPin`, allowing
//! different hardware backends.
//!
//! ```no_run
//! # use embedded_hal::digital::{ErrorType, OutputPin};
//! # struct Led;
//! # impl ErrorType for Led { type Error = core::convert::Infallible; }
//! # impl OutputPin for Led {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! use blinkq_scheduler::{BlinkWorker, Command, CommandQueue};
//!
//! static QUEUE: CommandQueue = CommandQueue::new();
//!
//! # async fn demo() {
//! let sender = QUEUE.sender();
//! sender.send(Command::run(200, "10", 2).unwrap()).await;
//! sender.send(Command::exit(0, "0", 1).unwrap()).await;
//!
//! let mut worker = BlinkWorker::new("status", Led, QUEUE.receiver());
//! worker.run().await.ok();
//! # }
//! ```

pub mod command;
pub mod pattern;
pub mod worker;

// Command exports
pub use command::{
    Blink, COMMAND_QUEUE_DEPTH, Command, CommandQueue, CommandReceiver, CommandSender, Repeat,
};

// Pattern exports
pub use pattern::{MAX_PATTERN_BITS, Pattern, PatternError};

// Worker exports
pub use worker::{BlinkWorker, Polarity, WorkerState};
