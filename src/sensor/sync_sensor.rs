// src/sensor/sync_sensor.rs

use super::{
    command::Command,
    error::{Aht10Error, Phase},
    reading::{RawPayload, Reading, PAYLOAD_LEN},
    status::SensorStatus,
};
use crate::common::{address::BusAddr, hal_traits::Transport, timing};
use core::fmt::Debug;
use log::{debug, error, info, warn};

/// Where the engine is in the init / measure cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SensorState {
    /// Calibration has not been confirmed since construction or reset.
    #[default]
    Uninitialized,
    /// Calibrated and idle.
    Calibrated,
    /// Trigger sent, waiting for the conversion to finish.
    Measuring,
    /// The last measurement was decoded successfully.
    Ready,
}

/// AHT10 protocol engine.
///
/// Holds only protocol state; the bus is passed to every call, so one bus
/// can serve several devices and stays usable between sensor operations.
#[derive(Debug, Clone)]
pub struct Aht10 {
    address: BusAddr,
    state: SensorState,
}

impl Aht10 {
    /// Engine for a sensor at the fixed address `0x38`.
    pub const fn new() -> Self {
        Self::with_address(BusAddr::AHT10)
    }

    pub const fn with_address(address: BusAddr) -> Self {
        Aht10 {
            address,
            state: SensorState::Uninitialized,
        }
    }

    pub fn address(&self) -> BusAddr {
        self.address
    }

    pub fn state(&self) -> SensorState {
        self.state
    }

    pub fn is_calibrated(&self) -> bool {
        self.state != SensorState::Uninitialized
    }

    /// Brings the sensor to the calibrated state.
    ///
    /// Waits out the power-on time, reads the status byte and sends the
    /// initialization command only if the calibration bit is clear. On any
    /// failure the engine is left `Uninitialized`.
    pub fn init<B: Transport>(&mut self, bus: &mut B) -> Result<(), Aht10Error<B::Error>> {
        self.set_state(SensorState::Uninitialized);
        bus.delay_ms(timing::as_millis_u32(timing::POWER_ON_SETTLE));

        let status = self.read_status(bus)?;
        if self.needs_calibration(status) {
            bus.write(self.address, Command::Initialize.as_bytes())
                .map_err(Aht10Error::protocol(Phase::Calibration))
                .inspect_err(|e| error!("aht10 {}: {}", self.address, e))?;
            bus.delay_ms(timing::as_millis_u32(timing::CALIBRATION_SETTLE));
        }

        self.mark_calibrated();
        Ok(())
    }

    /// Triggers one conversion, waits for it and decodes the result.
    ///
    /// The wait is a fixed [`timing::CONVERSION_TIME`]; a payload that still
    /// has the busy bit set is reported as [`Aht10Error::DataNotReady`] rather
    /// than polled again.
    pub fn read_measurement<B: Transport>(
        &mut self,
        bus: &mut B,
    ) -> Result<Reading, Aht10Error<B::Error>> {
        self.ensure_calibrated::<B::Error>()?;

        let result = self.measure(bus);
        if let Err(e) = &result {
            self.measurement_failed(e);
        }
        result
    }

    /// Reads the status byte on its own.
    pub fn read_status<B: Transport>(
        &self,
        bus: &mut B,
    ) -> Result<SensorStatus, Aht10Error<B::Error>> {
        let mut status = [0u8; 1];
        bus.read(self.address, &mut status)
            .map_err(Aht10Error::protocol(Phase::StatusRead))
            .inspect_err(|e| error!("aht10 {}: {}", self.address, e))?;
        debug!("aht10 {}: status {:#04x}", self.address, status[0]);
        Ok(SensorStatus::new(status[0]))
    }

    /// Restarts the sensor. Calibration must be confirmed again with `init`.
    pub fn soft_reset<B: Transport>(&mut self, bus: &mut B) -> Result<(), Aht10Error<B::Error>> {
        self.set_state(SensorState::Uninitialized);
        bus.write(self.address, Command::SoftReset.as_bytes())
            .map_err(Aht10Error::protocol(Phase::SoftReset))
            .inspect_err(|e| error!("aht10 {}: {}", self.address, e))?;
        bus.delay_ms(timing::as_millis_u32(timing::SOFT_RESET_SETTLE));
        info!("aht10 {}: soft reset", self.address);
        Ok(())
    }

    fn measure<B: Transport>(&mut self, bus: &mut B) -> Result<Reading, Aht10Error<B::Error>> {
        bus.write(self.address, Command::TriggerMeasurement.as_bytes())
            .map_err(Aht10Error::protocol(Phase::Trigger))?;
        self.state = SensorState::Measuring;

        bus.delay_ms(timing::as_millis_u32(timing::CONVERSION_TIME));

        let mut payload = [0u8; PAYLOAD_LEN];
        bus.read(self.address, &mut payload)
            .map_err(Aht10Error::protocol(Phase::Poll))?;
        self.accept_payload(RawPayload(payload))
    }

    // --- State helpers shared with the async engine ---

    pub(super) fn set_state(&mut self, state: SensorState) {
        self.state = state;
    }

    pub(super) fn needs_calibration(&self, status: SensorStatus) -> bool {
        if status.is_calibrated() {
            debug!("aht10 {}: calibration already loaded", self.address);
            false
        } else {
            info!("aht10 {}: loading calibration", self.address);
            true
        }
    }

    pub(super) fn mark_calibrated(&mut self) {
        self.state = SensorState::Calibrated;
        info!("aht10 {}: initialized", self.address);
    }

    pub(super) fn ensure_calibrated<E: Debug>(&self) -> Result<(), Aht10Error<E>> {
        if self.state == SensorState::Uninitialized {
            return Err(Aht10Error::NotCalibrated);
        }
        Ok(())
    }

    pub(super) fn accept_payload<E: Debug>(
        &mut self,
        payload: RawPayload,
    ) -> Result<Reading, Aht10Error<E>> {
        debug!("aht10 {}: payload {:02x?}", self.address, payload.0);
        let Some(reading) = payload.decode() else {
            return Err(Aht10Error::DataNotReady {
                status: payload.status().bits(),
            });
        };
        self.state = SensorState::Ready;
        debug!(
            "aht10 {}: {:.2} C, {:.2} %RH",
            self.address, reading.temperature, reading.humidity
        );
        Ok(reading)
    }

    pub(super) fn measurement_failed<E: Debug>(&mut self, e: &Aht10Error<E>) {
        self.state = SensorState::Calibrated;
        match e {
            Aht10Error::DataNotReady { .. } => warn!("aht10 {}: {}", self.address, e),
            _ => error!("aht10 {}: {}", self.address, e),
        }
    }
}

impl Default for Aht10 {
    fn default() -> Self {
        Self::new()
    }
}
