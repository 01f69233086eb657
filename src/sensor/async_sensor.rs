// src/sensor/async_sensor.rs

//! Async engine methods. Every device wait is an `await` on the transport's
//! delay, so other tasks run while the sensor settles or converts.
//!
//! Dropping one of these futures abandons the operation between
//! transactions; the engine then reports whatever state it last reached.

use super::{
    command::Command,
    error::{Aht10Error, Phase},
    reading::{RawPayload, Reading, PAYLOAD_LEN},
    status::SensorStatus,
    sync_sensor::{Aht10, SensorState},
};
use crate::common::{hal_traits::AsyncTransport, timing};
use log::{debug, error, info};

impl Aht10 {
    /// Async version of [`Aht10::init`].
    pub async fn init_async<B: AsyncTransport>(
        &mut self,
        bus: &mut B,
    ) -> Result<(), Aht10Error<B::Error>> {
        self.set_state(SensorState::Uninitialized);
        bus.delay_ms(timing::as_millis_u32(timing::POWER_ON_SETTLE)).await;

        let status = self.read_status_async(bus).await?;
        if self.needs_calibration(status) {
            bus.write(self.address(), Command::Initialize.as_bytes())
                .await
                .map_err(Aht10Error::protocol(Phase::Calibration))
                .inspect_err(|e| error!("aht10 {}: {}", self.address(), e))?;
            bus.delay_ms(timing::as_millis_u32(timing::CALIBRATION_SETTLE)).await;
        }

        self.mark_calibrated();
        Ok(())
    }

    /// Async version of [`Aht10::read_measurement`].
    pub async fn read_measurement_async<B: AsyncTransport>(
        &mut self,
        bus: &mut B,
    ) -> Result<Reading, Aht10Error<B::Error>> {
        self.ensure_calibrated::<B::Error>()?;

        let result = self.measure_async(bus).await;
        if let Err(e) = &result {
            self.measurement_failed(e);
        }
        result
    }

    /// Async version of [`Aht10::read_status`].
    pub async fn read_status_async<B: AsyncTransport>(
        &self,
        bus: &mut B,
    ) -> Result<SensorStatus, Aht10Error<B::Error>> {
        let mut status = [0u8; 1];
        bus.read(self.address(), &mut status)
            .await
            .map_err(Aht10Error::protocol(Phase::StatusRead))
            .inspect_err(|e| error!("aht10 {}: {}", self.address(), e))?;
        debug!("aht10 {}: status {:#04x}", self.address(), status[0]);
        Ok(SensorStatus::new(status[0]))
    }

    /// Async version of [`Aht10::soft_reset`].
    pub async fn soft_reset_async<B: AsyncTransport>(
        &mut self,
        bus: &mut B,
    ) -> Result<(), Aht10Error<B::Error>> {
        self.set_state(SensorState::Uninitialized);
        bus.write(self.address(), Command::SoftReset.as_bytes())
            .await
            .map_err(Aht10Error::protocol(Phase::SoftReset))
            .inspect_err(|e| error!("aht10 {}: {}", self.address(), e))?;
        bus.delay_ms(timing::as_millis_u32(timing::SOFT_RESET_SETTLE)).await;
        info!("aht10 {}: soft reset", self.address());
        Ok(())
    }

    async fn measure_async<B: AsyncTransport>(
        &mut self,
        bus: &mut B,
    ) -> Result<Reading, Aht10Error<B::Error>> {
        bus.write(self.address(), Command::TriggerMeasurement.as_bytes())
            .await
            .map_err(Aht10Error::protocol(Phase::Trigger))?;
        self.set_state(SensorState::Measuring);

        bus.delay_ms(timing::as_millis_u32(timing::CONVERSION_TIME)).await;

        let mut payload = [0u8; PAYLOAD_LEN];
        bus.read(self.address(), &mut payload)
            .await
            .map_err(Aht10Error::protocol(Phase::Poll))?;
        self.accept_payload(RawPayload(payload))
    }
}
