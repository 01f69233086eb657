// src/sensor/mod.rs

// AHT10 protocol engine. Talks to the device only through the `Transport`
// traits, so it runs unchanged over a `BusHandle`, the embedded-hal adapter
// or a test double.

mod command;
mod error;
mod reading;
mod status;

pub mod poller;
pub mod sync_sensor;

#[cfg(feature = "async")]
pub mod async_sensor;

// --- Public Re-exports ---

pub use command::Command;
pub use error::{Aht10Error, Phase};
pub use poller::Poller;
pub use reading::{RawPayload, Reading, PAYLOAD_LEN};
pub use status::SensorStatus;
pub use sync_sensor::{Aht10, SensorState};
