// src/common/address.rs

use super::error::BusError;
use core::convert::TryFrom;
use core::fmt;

/// A validated 7-bit bus address.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct BusAddr(u8);

impl BusAddr {
    /// Factory address of the AHT10.
    pub const AHT10: BusAddr = BusAddr(0x38);

    /// Creates a new `BusAddr` if `address` fits in 7 bits.
    /// Returns `BusError<()>` because validation cannot cause an I/O error.
    pub fn new(address: u8) -> Result<Self, BusError<()>> {
        if address <= 0x7F {
            Ok(BusAddr(address))
        } else {
            Err(BusError::InvalidAddress(address))
        }
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Address byte for a write frame (direction bit clear).
    #[inline]
    pub const fn write_byte(&self) -> u8 {
        self.0 << 1
    }

    /// Address byte for a read frame (direction bit set).
    #[inline]
    pub const fn read_byte(&self) -> u8 {
        (self.0 << 1) | 1
    }

    /// Addresses reserved by the I2C standard (`0x00..=0x07`, `0x78..=0x7F`).
    #[inline]
    pub const fn is_reserved(&self) -> bool {
        matches!(self.0, 0x00..=0x07 | 0x78..=0x7F)
    }
}

impl TryFrom<u8> for BusAddr {
    type Error = BusError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BusAddr> for u8 {
    fn from(value: BusAddr) -> Self {
        value.0
    }
}

impl fmt::Display for BusAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
