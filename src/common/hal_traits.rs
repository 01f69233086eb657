// src/common/hal_traits.rs

use super::address::BusAddr;
use super::config::BusConfig;
use super::error::BusError;
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Point in time as reported by a [`BusTimer`].
pub trait BusInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> BusInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the clock and delay operations the bus layer needs.
pub trait BusTimer {
    type Instant: BusInstant;

    /// Current time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Acknowledge bit driven (on reads) or observed (on writes) after a byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ack {
    Ack,
    Nack,
}

/// Non-blocking framing primitives of one bus controller.
///
/// Every method returns `Err(nb::Error::WouldBlock)` while the controller is
/// still shifting bits; the bus layer polls it against the transaction deadline.
pub trait BusController {
    /// Associated error type for controller faults.
    type Error: Debug;

    /// Applies pin, pull-up and clock configuration. Called once at installation.
    fn configure(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Generates a start condition.
    fn start(&mut self) -> nb::Result<(), Self::Error>;

    /// Shifts out one byte and samples the acknowledge bit.
    fn write_byte(&mut self, byte: u8) -> nb::Result<Ack, Self::Error>;

    /// Shifts in one byte, then drives `ack`.
    fn read_byte(&mut self, ack: Ack) -> nb::Result<u8, Self::Error>;

    /// Generates a stop condition, releasing both lines.
    fn stop(&mut self) -> nb::Result<(), Self::Error>;
}

/// Addressed transactions plus the delays a device protocol needs between them.
///
/// This is the contract the sensor engine is written against. It is
/// implemented by [`crate::bus::BusHandle`] and, with `impl-native`, by the
/// embedded-hal adapter.
pub trait Transport {
    type Error: Debug;

    /// Writes `payload` to `address` as one complete transaction.
    fn write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<Self::Error>>;

    /// Fills `buffer` from `address` as one complete transaction.
    fn read(&mut self, address: BusAddr, buffer: &mut [u8]) -> Result<(), BusError<Self::Error>>;

    /// Blocks for at least `ms` milliseconds without touching the bus.
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<Self::Error>> {
        (**self).write(address, payload)
    }

    fn read(&mut self, address: BusAddr, buffer: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        (**self).read(address, buffer)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Async version of [`Transport`] (requires the `async` feature).
///
/// `delay_ms` is a suspension point: the executor may run other tasks,
/// including traffic to other devices on the same bus, while it is pending.
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncTransport {
    type Error: Debug;

    async fn write(&mut self, address: BusAddr, payload: &[u8])
        -> Result<(), BusError<Self::Error>>;

    async fn read(&mut self, address: BusAddr, buffer: &mut [u8])
        -> Result<(), BusError<Self::Error>>;

    async fn delay_ms(&mut self, ms: u32);
}
