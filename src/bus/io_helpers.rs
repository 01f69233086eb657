// src/bus/io_helpers.rs

use super::BusHandle;
use crate::common::{
    address::BusAddr,
    error::{BusError, NoAckSource},
    hal_traits::{Ack, BusController, BusTimer},
    timing,
};
use nb::Result as NbResult;

/// Direction bit of the address byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Direction {
    Write,
    Read,
}

impl<IF, T> BusHandle<IF, T>
where
    IF: BusController,
    T: BusTimer,
{
    /// Executes a non-blocking controller primitive (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning its result or `Timeout` once
    /// `deadline` has passed.
    pub(super) fn execute_blocking_io_until<FN, R>(
        &mut self,
        deadline: T::Instant,
        mut f: FN,
    ) -> Result<R, BusError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<R, IF::Error>,
    {
        loop {
            match f(&mut self.controller) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.timer.now() >= deadline {
                        return Err(BusError::Timeout);
                    }
                    self.timer.delay_us(timing::POLL_BACKOFF_US);
                }
                Err(nb::Error::Other(e)) => return Err(BusError::Io(e)),
            }
        }
    }

    /// Start condition followed by the address byte.
    pub(super) fn open_frame(
        &mut self,
        address: BusAddr,
        direction: Direction,
        deadline: T::Instant,
    ) -> Result<(), BusError<IF::Error>> {
        self.execute_blocking_io_until(deadline, |c| c.start())?;

        let address_byte = match direction {
            Direction::Write => address.write_byte(),
            Direction::Read => address.read_byte(),
        };
        match self.execute_blocking_io_until(deadline, |c| c.write_byte(address_byte))? {
            Ack::Ack => Ok(()),
            Ack::Nack => Err(BusError::NoAck(NoAckSource::Address)),
        }
    }

    /// Issues the stop condition with its own budget.
    pub(super) fn close_frame(&mut self) -> Result<(), BusError<IF::Error>> {
        let deadline = self.timer.now() + timing::STOP_TIMEOUT;
        self.execute_blocking_io_until(deadline, |c| c.stop())
    }

    /// Runs `body` inside a start/address ... stop frame.
    ///
    /// The stop condition is issued on every exit path. If the body failed,
    /// that error wins over a failure to stop.
    pub(super) fn framed<R, FN>(
        &mut self,
        address: BusAddr,
        direction: Direction,
        timeout: core::time::Duration,
        body: FN,
    ) -> Result<R, BusError<IF::Error>>
    where
        FN: FnOnce(&mut Self, T::Instant) -> Result<R, BusError<IF::Error>>,
    {
        let deadline = self.timer.now() + timeout;

        let result = self
            .open_frame(address, direction, deadline)
            .and_then(|()| body(self, deadline));
        let stopped = self.close_frame();

        match (result, stopped) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
        }
    }
}
