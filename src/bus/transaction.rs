// src/bus/transaction.rs

use super::io_helpers::Direction;
use super::BusHandle;
use crate::common::{
    address::BusAddr,
    error::{BusError, NoAckSource},
    hal_traits::{Ack, BusController, BusTimer, Transport},
    timing,
};
use log::{debug, error, info, warn};

/// Capacity of a scan result: every non-general-call 7-bit address.
pub const SCAN_CAPACITY: usize = 127;

impl<IF, T> BusHandle<IF, T>
where
    IF: BusController,
    T: BusTimer,
{
    /// Writes `payload` to `address` in one transaction:
    /// START - ADDR(W) - DATA... - STOP, every byte expecting an acknowledge.
    pub fn write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<IF::Error>> {
        if payload.is_empty() {
            return Err(BusError::InvalidArgument("write payload is empty"));
        }

        let timeout = self.config.timeout;
        self.framed(address, Direction::Write, timeout, |bus, deadline| {
            for byte in payload {
                match bus.execute_blocking_io_until(deadline, |c| c.write_byte(*byte))? {
                    Ack::Ack => {}
                    Ack::Nack => return Err(BusError::NoAck(NoAckSource::Data)),
                }
            }
            Ok(())
        })
        .inspect_err(|e| error!("bus {} write to {} failed: {}", self.config.bus_id, address, e))
    }

    /// Fills `buffer` from `address` in one transaction:
    /// START - ADDR(R) - DATA... - STOP. Every byte but the last is
    /// acknowledged; the last gets a NACK to end the read.
    ///
    /// On failure `buffer` is zeroed, so a partial transfer can't be mistaken
    /// for data.
    pub fn read(&mut self, address: BusAddr, buffer: &mut [u8]) -> Result<(), BusError<IF::Error>> {
        if buffer.is_empty() {
            return Err(BusError::InvalidArgument("read length is zero"));
        }

        let timeout = self.config.timeout;
        let last = buffer.len() - 1;
        let result = self.framed(address, Direction::Read, timeout, |bus, deadline| {
            for (i, slot) in buffer.iter_mut().enumerate() {
                let ack = if i == last { Ack::Nack } else { Ack::Ack };
                *slot = bus.execute_blocking_io_until(deadline, |c| c.read_byte(ack))?;
            }
            Ok(())
        });

        if let Err(e) = &result {
            buffer.fill(0);
            error!("bus {} read from {} failed: {}", self.config.bus_id, address, e);
        }
        result
    }

    /// Checks whether a device acknowledges `address`, using an empty write frame.
    pub fn probe(&mut self, address: BusAddr) -> Result<bool, BusError<IF::Error>> {
        match self.framed(address, Direction::Write, timing::PROBE_TIMEOUT, |_, _| Ok(())) {
            Ok(()) => Ok(true),
            Err(e) if e.is_no_ack() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Probes `0x01..0x7F` and returns the addresses that answered.
    ///
    /// A probe that times out counts as absent, so a stuck or unwired bus
    /// still finishes the sweep and reports an empty result. Stops at the
    /// first controller fault.
    pub fn scan(&mut self) -> Result<heapless::Vec<BusAddr, SCAN_CAPACITY>, BusError<IF::Error>> {
        let mut found = heapless::Vec::new();
        for raw in 0x01..0x7F {
            let address = BusAddr::new(raw).map_err(|_| BusError::InvalidAddress(raw))?;
            match self.probe(address) {
                Ok(true) => {
                    info!("bus {}: device found at {}", self.config.bus_id, address);
                    // Capacity covers the whole range, so this cannot fail.
                    let _ = found.push(address);
                }
                Ok(false) => {}
                Err(BusError::Timeout) => {
                    debug!("bus {}: probe of {} timed out", self.config.bus_id, address);
                }
                Err(e) => return Err(e),
            }
        }

        if found.is_empty() {
            warn!("bus {}: no devices found, check wiring", self.config.bus_id);
        } else {
            info!("bus {}: {} device(s) found", self.config.bus_id, found.len());
        }
        Ok(found)
    }
}

impl<IF, T> Transport for BusHandle<IF, T>
where
    IF: BusController,
    T: BusTimer,
{
    type Error = IF::Error;

    fn write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<Self::Error>> {
        BusHandle::write(self, address, payload)
    }

    fn read(&mut self, address: BusAddr, buffer: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        BusHandle::read(self, address, buffer)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms);
    }
}
