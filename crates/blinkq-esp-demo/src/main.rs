//! blinkq demo firmware for ESP32.
//!
//! Spawns one blink worker per LED (blue, red, yellow) and a showcase task
//! that walks the scheduler through finite blinks, save/restore, concurrent
//! heartbeats, pattern replacement and graceful exit.
//!
//! Set `ESP_LOG=debug` at flash time to see each worker's command trace.

#![no_std]
#![no_main]

mod config;
mod tasks;

use embassy_executor::Spawner;
use embassy_time::Duration;

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let blue = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());
    let red = Output::new(peripherals.GPIO16, Level::Low, OutputConfig::default());
    let yellow = Output::new(peripherals.GPIO17, Level::Low, OutputConfig::default());

    spawner
        .spawn(tasks::blink_worker_task(config::BLUE_NAME, blue, &tasks::BLUE))
        .ok();
    spawner
        .spawn(tasks::blink_worker_task(config::RED_NAME, red, &tasks::RED))
        .ok();
    spawner
        .spawn(tasks::blink_worker_task(
            config::YELLOW_NAME,
            yellow,
            &tasks::YELLOW,
        ))
        .ok();

    spawner.spawn(tasks::showcase_task()).ok();

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
