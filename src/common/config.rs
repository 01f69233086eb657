// src/common/config.rs

use super::error::ConfigError;
use super::timing;
use core::time::Duration;

/// Number of bus controllers available on the target.
pub const MAX_BUSES: u8 = 2;
/// Highest pin number a bus line can be routed to.
pub const MAX_PIN: u8 = 48;
/// Highest supported clock rate (Fast-mode Plus).
pub const MAX_CLOCK_HZ: u32 = 1_000_000;

/// Standard mode clock rate.
pub const STANDARD_MODE_HZ: u32 = 100_000;
/// Fast mode clock rate.
pub const FAST_MODE_HZ: u32 = 400_000;

/// Configuration for one bus controller, supplied by the code that owns the board setup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Controller index, `0..MAX_BUSES`.
    pub bus_id: u8,
    pub sda_pin: u8,
    pub scl_pin: u8,
    /// Enable the internal pull-up on SDA.
    pub sda_pullup: bool,
    /// Enable the internal pull-up on SCL.
    pub scl_pullup: bool,
    /// Bus clock in Hz.
    pub clock_hz: u32,
    /// Upper bound for a single transaction.
    pub timeout: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bus_id: 0,
            sda_pin: 3,
            scl_pin: 2,
            sda_pullup: true,
            scl_pullup: true,
            clock_hz: FAST_MODE_HZ,
            timeout: timing::TRANSACTION_TIMEOUT,
        }
    }
}

impl BusConfig {
    pub fn with_bus_id(mut self, bus_id: u8) -> Self {
        self.bus_id = bus_id;
        self
    }

    pub fn with_pins(mut self, sda_pin: u8, scl_pin: u8) -> Self {
        self.sda_pin = sda_pin;
        self.scl_pin = scl_pin;
        self
    }

    pub fn with_pullups(mut self, sda_pullup: bool, scl_pullup: bool) -> Self {
        self.sda_pullup = sda_pullup;
        self.scl_pullup = scl_pullup;
        self
    }

    pub fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the configuration for values no controller can accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus_id >= MAX_BUSES {
            return Err(ConfigError::UnknownBus(self.bus_id));
        }
        if self.sda_pin > MAX_PIN {
            return Err(ConfigError::InvalidPin(self.sda_pin));
        }
        if self.scl_pin > MAX_PIN {
            return Err(ConfigError::InvalidPin(self.scl_pin));
        }
        if self.sda_pin == self.scl_pin {
            return Err(ConfigError::PinConflict(self.sda_pin));
        }
        if self.clock_hz == 0 || self.clock_hz > MAX_CLOCK_HZ {
            return Err(ConfigError::InvalidClock(self.clock_hz));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
