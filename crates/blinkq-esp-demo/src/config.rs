//! Demo wiring and showcase script timings.
//!
//! The three LEDs live on GPIO4 (blue), GPIO16 (red) and GPIO17 (yellow);
//! the pins themselves are claimed in `main` where the peripherals are split.

use embassy_time::Duration;

pub(crate) const BLUE_NAME: &str = "blue";
pub(crate) const RED_NAME: &str = "red";
pub(crate) const YELLOW_NAME: &str = "yellow";

/// Hold between the save/restore script steps.
pub(crate) const SAVE_RESTORE_STEP: Duration = Duration::from_secs(3);
/// How long the three concurrent heartbeats run.
pub(crate) const CONCURRENT_HOLD: Duration = Duration::from_secs(5);
/// How long the interrupting replacement patterns run.
pub(crate) const REPLACE_HOLD: Duration = Duration::from_secs(2);
/// Hold on the final solid/inverse-phase tableau.
pub(crate) const FINALE_HOLD: Duration = Duration::from_millis(500);
/// Drain time for the restored blue pattern before its exit command.
pub(crate) const EXIT_DRAIN: Duration = Duration::from_millis(1500);
