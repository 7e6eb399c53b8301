//! Worker and showcase tasks.
//!
//! Each LED owns a static [`LedChannels`]: the command queue feeding its
//! worker and the exit signal the worker fires once its run loop resolves.
//! Spawned tasks cannot be joined directly, so the signal is how the
//! showcase observes worker termination.

use blinkq_scheduler::{
    BlinkWorker, Command, CommandQueue, CommandReceiver, CommandSender, PatternError,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use esp_hal::gpio::Output;
use log::{info, warn};

use crate::config;

/// Queue plus exit signal for one LED worker.
pub(crate) struct LedChannels {
    queue: CommandQueue,
    exited: Signal<CriticalSectionRawMutex, ()>,
}

impl LedChannels {
    const fn new() -> Self {
        Self {
            queue: CommandQueue::new(),
            exited: Signal::new(),
        }
    }

    fn receiver(&'static self) -> CommandReceiver {
        self.queue.receiver()
    }

    fn sender(&'static self) -> CommandSender {
        self.queue.sender()
    }

    async fn wait_exited(&'static self) {
        self.exited.wait().await;
    }
}

pub(crate) static BLUE: LedChannels = LedChannels::new();
pub(crate) static RED: LedChannels = LedChannels::new();
pub(crate) static YELLOW: LedChannels = LedChannels::new();

#[embassy_executor::task(pool_size = 3)]
pub(crate) async fn blink_worker_task(
    name: &'static str,
    pin: Output<'static>,
    channels: &'static LedChannels,
) {
    let mut worker = BlinkWorker::new(name, pin, channels.receiver());
    // The GPIO output is infallible, so run() only returns on exit.
    worker.run().await.ok();
    channels.exited.signal(());
}

/// Queue a command, reporting a rejected pattern instead of sending it.
async fn send(channels: &'static LedChannels, command: Result<Command, PatternError>) {
    match command {
        Ok(command) => channels.sender().send(command).await,
        Err(err) => warn!("showcase: command rejected: {}", err),
    }
}

/// Scripted walkthrough of the scheduler features, then a clean shutdown.
#[embassy_executor::task]
pub(crate) async fn showcase_task() {
    info!("showcase: saving and restoring a blink pattern");
    send(&BLUE, Command::run(200, "10", 2)).await;
    Timer::after(config::SAVE_RESTORE_STEP).await;
    // A 50ms strobe over 400ms, repeated 8 times, saving the blink above.
    send(&BLUE, Command::save(50, "10000000", 8)).await;
    Timer::after(config::SAVE_RESTORE_STEP).await;
    send(&BLUE, Ok(Command::restore())).await;
    Timer::after(config::SAVE_RESTORE_STEP).await;
    // The slot is read non-destructively, so a second restore replays it.
    send(&BLUE, Ok(Command::restore())).await;
    Timer::after(config::SAVE_RESTORE_STEP).await;

    info!("showcase: three LEDs blinking concurrently");
    send(&BLUE, Command::run(500, "10", -1)).await;
    send(&RED, Command::run(500, "10", 3)).await;
    send(&YELLOW, Command::run(500, "10", -1)).await;
    Timer::after(config::CONCURRENT_HOLD).await;

    info!("showcase: interrupting and replacing all three patterns");
    // Each replacement is noticed after the current 500ms bit hold.
    send(&BLUE, Command::run(150, "1000", -1)).await;
    send(&RED, Command::run(50, "10", 10)).await;
    send(&YELLOW, Command::run(50, "1010000000", 10)).await;
    Timer::after(config::REPLACE_HOLD).await;

    info!("showcase: solid red, inverse-phase blue and yellow");
    send(&BLUE, Command::run(500, "10", -1)).await;
    send(&RED, Command::run(0, "1", 1)).await;
    send(&YELLOW, Command::run(500, "01", -1)).await;
    Timer::after(config::FINALE_HOLD).await;

    info!("showcase: shutting down");
    send(&RED, Command::exit(0, "0", 1)).await;
    send(&YELLOW, Command::exit(0, "0", 1)).await;
    send(&BLUE, Ok(Command::restore())).await;
    Timer::after(config::EXIT_DRAIN).await;
    send(&BLUE, Command::exit(0, "0", 1)).await;

    BLUE.wait_exited().await;
    RED.wait_exited().await;
    YELLOW.wait_exited().await;
    info!("showcase: demo complete");
}
