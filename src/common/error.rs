// src/common/error.rs

use core::fmt::Debug;

/// Errors produced by the bus transaction layer.
///
/// `E` is the error type of the underlying controller and is only reported
/// through [`BusError::Io`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError<E = ()>
where
    E: Debug,
{
    /// The bus could not be installed with the requested configuration.
    #[error("bus configuration error: {0}")]
    Config(ConfigError),

    /// The addressed device did not acknowledge.
    #[error("no acknowledge from device ({0})")]
    NoAck(NoAckSource),

    /// The transaction did not complete within its bound.
    #[error("bus transaction timed out")]
    Timeout,

    /// Empty payload or zero-length read. Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Value does not fit in a 7-bit address.
    #[error("invalid 7-bit bus address: {0:#04x}")]
    InvalidAddress(u8),

    /// Any other fault reported by the controller (bus error, arbitration loss, ...).
    #[error("controller error: {0:?}")]
    Io(E),
}

impl<E: Debug> BusError<E> {
    /// True for failures where the device simply did not answer.
    #[inline]
    pub const fn is_no_ack(&self) -> bool {
        matches!(self, BusError::NoAck(_))
    }
}

impl<E: Debug> From<ConfigError> for BusError<E> {
    fn from(e: ConfigError) -> Self {
        BusError::Config(e)
    }
}

/// Which part of a frame was not acknowledged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoAckSource {
    /// The address byte.
    Address,
    /// A data byte after the address.
    Data,
    /// The controller could not tell.
    Unknown,
}

impl core::fmt::Display for NoAckSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NoAckSource::Address => f.write_str("address"),
            NoAckSource::Data => f.write_str("data"),
            NoAckSource::Unknown => f.write_str("unknown"),
        }
    }
}

/// Invalid or conflicting bus configuration. Fatal to that bus instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("bus {0} does not exist")]
    UnknownBus(u8),

    #[error("pin {0} is out of range")]
    InvalidPin(u8),

    /// SDA and SCL were assigned the same pin.
    #[error("SDA and SCL both assigned to pin {0}")]
    PinConflict(u8),

    #[error("clock rate {0} Hz is not supported")]
    InvalidClock(u32),

    #[error("transaction timeout must be non-zero")]
    ZeroTimeout,

    #[error("bus {0} is already installed")]
    AlreadyInstalled(u8),

    /// The controller refused the (otherwise valid) configuration.
    #[error("controller rejected configuration for bus {0}")]
    Rejected(u8),
}
