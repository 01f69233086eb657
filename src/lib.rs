// src/lib.rs

//! Driver for the AHT10 temperature and humidity sensor.
//!
//! Two layers:
//!
//! * [`bus`] installs an I2C controller and runs complete, time-bounded
//!   write and read transactions on it.
//! * [`sensor`] drives the AHT10 protocol (calibration check, trigger, poll,
//!   decode) on top of any [`Transport`].
//!
//! ```ignore
//! static BUSES: BusRegistry = BusRegistry::new();
//!
//! let mut bus = BUSES.initialize(BusConfig::default(), controller, timer)?;
//! let mut sensor = Aht10::new();
//! sensor.init(&mut bus)?;
//! let reading = sensor.read_measurement(&mut bus)?;
//! log::info!("{:.1} C {:.1} %RH", reading.temperature, reading.humidity);
//! ```

#![cfg_attr(not(test), no_std)] // std only for the unit tests

pub mod bus;
pub mod common;
pub mod sensor;

// Re-export key types for convenience
pub use bus::{BusHandle, BusRegistry};
pub use common::{BusAddr, BusConfig, BusError, ConfigError, NoAckSource, Transport};
pub use sensor::{Aht10, Aht10Error, Poller, Reading, SensorState, SensorStatus};

#[cfg(feature = "async")]
pub use common::AsyncTransport;

#[cfg(feature = "impl-native")]
pub use bus::native::HalBus;
#[cfg(feature = "async")]
pub use bus::native::HalBusAsync;
