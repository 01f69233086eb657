// src/sensor/error.rs

use crate::common::error::BusError;
use core::fmt::{self, Debug};

/// Step of the sensor protocol a bus failure happened in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Status byte read during initialization.
    StatusRead,
    /// Writing the initialization command.
    Calibration,
    /// Writing the trigger-measurement command.
    Trigger,
    /// Reading the measurement payload.
    Poll,
    /// Writing the soft-reset command.
    SoftReset,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::StatusRead => "status read",
            Phase::Calibration => "calibration",
            Phase::Trigger => "trigger",
            Phase::Poll => "poll",
            Phase::SoftReset => "soft reset",
        })
    }
}

/// Errors returned by the AHT10 protocol engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Aht10Error<E = ()>
where
    E: Debug,
{
    /// A bus transaction failed. The underlying cause is kept as is.
    #[error("{phase} failed: {error}")]
    Protocol { phase: Phase, error: BusError<E> },

    /// The busy bit was still set when the payload was read.
    #[error("measurement not ready (status {status:#04x})")]
    DataNotReady { status: u8 },

    /// A measurement was requested before a successful `init`.
    #[error("sensor is not calibrated, call init first")]
    NotCalibrated,
}

impl<E: Debug> Aht10Error<E> {
    pub(crate) fn protocol(phase: Phase) -> impl FnOnce(BusError<E>) -> Self {
        move |error| Aht10Error::Protocol { phase, error }
    }

    /// The bus error behind a protocol failure, if any.
    pub fn bus_error(&self) -> Option<&BusError<E>> {
        match self {
            Aht10Error::Protocol { error, .. } => Some(error),
            _ => None,
        }
    }
}
