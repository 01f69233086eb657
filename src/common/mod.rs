// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod timing;

#[cfg(test)]
pub mod mock;

// --- Re-export key types/traits for easier access ---

pub use address::BusAddr;
pub use config::BusConfig;
pub use error::{BusError, ConfigError, NoAckSource};
pub use hal_traits::{Ack, BusController, BusInstant, BusTimer, Transport};

#[cfg(feature = "async")]
pub use hal_traits::AsyncTransport;
