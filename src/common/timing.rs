// src/common/timing.rs

use core::time::Duration;

// Device timings are minimums. Waiting longer is always safe; polling the
// device earlier is not.

// === Bus Transactions ===

/// Default upper bound for one complete transaction (start to stop).
pub const TRANSACTION_TIMEOUT: Duration = Duration::from_millis(1000);
/// Budget for issuing the stop condition after a transaction body has ended.
/// Separate from the transaction bound so a timed-out transaction still frees the bus.
pub const STOP_TIMEOUT: Duration = Duration::from_millis(10);
/// Bound used when probing an address during a bus scan.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(50);
/// Back-off between polls of a primitive that reported `WouldBlock`.
pub const POLL_BACKOFF_US: u32 = 100;

// === AHT10 ===

/// Datasheet minimum after power-up before the device answers is 40 ms.
pub const POWER_ON_SETTLE: Duration = Duration::from_millis(50);
/// Wait after the initialization command for calibration to load.
pub const CALIBRATION_SETTLE: Duration = Duration::from_millis(100);
/// Internal conversion time after a trigger-measurement command.
pub const CONVERSION_TIME: Duration = Duration::from_millis(100);
/// Time for the device to come back after a soft reset.
pub const SOFT_RESET_SETTLE: Duration = Duration::from_millis(20);

// === Polling ===

/// Interval between readings taken by the periodic poller.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Converts a device wait into the millisecond count the delay traits take.
#[inline]
pub(crate) fn as_millis_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
