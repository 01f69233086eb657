// src/bus/native.rs

//! [`Transport`] on top of an `embedded-hal` 1.0 I2C peripheral.
//!
//! Use this when the HAL already owns the controller and enforces its own
//! timeouts; the sensor engine then talks to the peripheral directly instead
//! of going through [`crate::bus::BusHandle`].

use crate::common::{
    address::BusAddr,
    error::{BusError, NoAckSource},
    hal_traits::Transport,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Wraps an `embedded_hal::i2c::I2c` bus and a delay provider.
#[derive(Debug)]
pub struct HalBus<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> HalBus<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        HalBus { i2c, delay }
    }

    /// Releases the peripheral and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

/// Maps an embedded-hal error onto the bus taxonomy, keeping the HAL error for
/// anything that isn't a missing acknowledge.
pub(crate) fn map_hal_error<E: embedded_hal::i2c::Error>(e: E) -> BusError<E> {
    match e.kind() {
        ErrorKind::NoAcknowledge(source) => BusError::NoAck(match source {
            embedded_hal::i2c::NoAcknowledgeSource::Address => NoAckSource::Address,
            embedded_hal::i2c::NoAcknowledgeSource::Data => NoAckSource::Data,
            embedded_hal::i2c::NoAcknowledgeSource::Unknown => NoAckSource::Unknown,
        }),
        _ => BusError::Io(e),
    }
}

impl<I2C, D> Transport for HalBus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<Self::Error>> {
        if payload.is_empty() {
            return Err(BusError::InvalidArgument("write payload is empty"));
        }
        self.i2c.write(address.get(), payload).map_err(map_hal_error)
    }

    fn read(&mut self, address: BusAddr, buffer: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        if buffer.is_empty() {
            return Err(BusError::InvalidArgument("read length is zero"));
        }
        self.i2c.read(address.get(), buffer).map_err(|e| {
            buffer.fill(0);
            map_hal_error(e)
        })
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

/// Async counterpart of [`HalBus`] over `embedded-hal-async` (requires `async`).
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct HalBusAsync<I2C, D> {
    i2c: I2C,
    delay: D,
}

#[cfg(feature = "async")]
impl<I2C, D> HalBusAsync<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        HalBusAsync { i2c, delay }
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[cfg(feature = "async")]
impl<I2C, D> crate::common::hal_traits::AsyncTransport for HalBusAsync<I2C, D>
where
    I2C: embedded_hal_async::i2c::I2c,
    D: embedded_hal_async::delay::DelayNs,
{
    type Error = I2C::Error;

    async fn write(
        &mut self,
        address: BusAddr,
        payload: &[u8],
    ) -> Result<(), BusError<Self::Error>> {
        if payload.is_empty() {
            return Err(BusError::InvalidArgument("write payload is empty"));
        }
        self.i2c
            .write(address.get(), payload)
            .await
            .map_err(map_hal_error)
    }

    async fn read(
        &mut self,
        address: BusAddr,
        buffer: &mut [u8],
    ) -> Result<(), BusError<Self::Error>> {
        if buffer.is_empty() {
            return Err(BusError::InvalidArgument("read length is zero"));
        }
        match self.i2c.read(address.get(), buffer).await {
            Ok(()) => Ok(()),
            Err(e) => {
                buffer.fill(0);
                Err(map_hal_error(e))
            }
        }
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }
}
