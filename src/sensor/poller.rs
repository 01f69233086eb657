// src/sensor/poller.rs

use super::{error::Aht10Error, reading::Reading, sync_sensor::Aht10};
use crate::common::hal_traits::Transport;
use core::fmt::Debug;
use log::{info, warn};

/// Consecutive failures after which each further failure is logged as a warning.
pub const FAILURE_WARN_THRESHOLD: u32 = 3;

/// Periodic caller of the sensor engine.
///
/// Call [`Poller::poll`] every [`crate::common::timing::POLL_INTERVAL`]. The
/// poller initializes the sensor on demand, so a sensor that was absent or
/// failed to calibrate is retried on the next tick. The last good reading
/// survives any number of failures.
#[derive(Debug, Clone, Default)]
pub struct Poller {
    sensor: Aht10,
    latest: Option<Reading>,
    consecutive_failures: u32,
}

impl Poller {
    pub fn new(sensor: Aht10) -> Self {
        Poller {
            sensor,
            latest: None,
            consecutive_failures: 0,
        }
    }

    /// Takes one reading, initializing the sensor first if needed.
    pub fn poll<B: Transport>(&mut self, bus: &mut B) -> Result<Reading, Aht10Error<B::Error>> {
        let result = self.try_poll(bus);
        self.record(result)
    }

    /// The most recent successful reading, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.latest
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn sensor(&self) -> &Aht10 {
        &self.sensor
    }

    pub fn into_sensor(self) -> Aht10 {
        self.sensor
    }

    fn try_poll<B: Transport>(&mut self, bus: &mut B) -> Result<Reading, Aht10Error<B::Error>> {
        if !self.sensor.is_calibrated() {
            self.sensor.init(bus)?;
        }
        self.sensor.read_measurement(bus)
    }

    fn record<E: Debug>(
        &mut self,
        result: Result<Reading, Aht10Error<E>>,
    ) -> Result<Reading, Aht10Error<E>> {
        match &result {
            Ok(reading) => {
                if self.consecutive_failures > 0 {
                    info!(
                        "aht10 {}: recovered after {} failed poll(s)",
                        self.sensor.address(),
                        self.consecutive_failures
                    );
                }
                self.latest = Some(*reading);
                self.consecutive_failures = 0;
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.consecutive_failures >= FAILURE_WARN_THRESHOLD {
                    warn!(
                        "aht10 {}: {} consecutive failed polls, last: {}",
                        self.sensor.address(),
                        self.consecutive_failures,
                        e
                    );
                }
            }
        }
        result
    }
}

#[cfg(feature = "async")]
impl Poller {
    /// Async version of [`Poller::poll`].
    pub async fn poll_async<B: crate::common::hal_traits::AsyncTransport>(
        &mut self,
        bus: &mut B,
    ) -> Result<Reading, Aht10Error<B::Error>> {
        let result = self.try_poll_async(bus).await;
        self.record(result)
    }

    async fn try_poll_async<B: crate::common::hal_traits::AsyncTransport>(
        &mut self,
        bus: &mut B,
    ) -> Result<Reading, Aht10Error<B::Error>> {
        if !self.sensor.is_calibrated() {
            self.sensor.init_async(bus).await?;
        }
        self.sensor.read_measurement_async(bus).await
    }
}
