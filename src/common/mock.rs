// src/common/mock.rs
//
// Test doubles shared by the unit tests: a clock that only moves when
// someone delays, a controller with a tiny device model, and a transport
// that records every call.

use super::{
    address::BusAddr,
    config::BusConfig,
    error::BusError,
    hal_traits::{Ack, BusController, BusTimer, Transport},
};
use core::time::Duration;
use std::collections::VecDeque;
use std::vec::Vec;

// --- Mock Instant / Timer ---

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

#[derive(Debug, Default)]
pub struct MockTimer {
    pub now_us: u64,
    /// Every `delay_ms` call, in order.
    pub delays_ms: Vec<u32>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BusTimer for MockTimer {
    type Instant = MockInstant;

    fn now(&self) -> Self::Instant {
        MockInstant(self.now_us)
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us = self.now_us.saturating_add(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.now_us = self.now_us.saturating_add(ms as u64 * 1000);
    }
}

// --- Mock Controller ---

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockIoError;

/// Everything the controller was asked to put on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Byte(u8),
    Read(Ack),
    Stop,
}

/// Primitive that never completes, to exercise timeouts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stall {
    Start,
    ReadByte,
}

#[derive(Debug, Default)]
pub struct Frame {
    pub address_byte: Option<u8>,
    pub data_written: usize,
    pub response: VecDeque<u8>,
}

/// Controller with a device model: listed addresses acknowledge, read frames
/// are served from `responses` in order.
#[derive(Debug, Default)]
pub struct MockController {
    pub present: Vec<u8>,
    pub responses: VecDeque<Vec<u8>>,
    pub events: Vec<BusEvent>,
    /// Completed write frames: (7-bit address, payload).
    pub writes: Vec<(u8, Vec<u8>)>,
    pub configured: Option<BusConfig>,
    pub reject_config: bool,
    /// NACK the data byte at this index within a write frame.
    pub nack_data_at: Option<usize>,
    /// Fail the read of the byte at this index with a controller error.
    pub fail_read_at: Option<usize>,
    pub stall: Option<Stall>,
    pub frame: Option<Frame>,
    pub pending_write: Vec<u8>,
}

impl MockController {
    pub fn with_device(address: u8) -> Self {
        MockController {
            present: std::vec![address],
            ..Default::default()
        }
    }

    pub fn queue_response(&mut self, bytes: &[u8]) {
        self.responses.push_back(bytes.to_vec());
    }

    pub fn stop_count(&self) -> usize {
        self.events.iter().filter(|e| **e == BusEvent::Stop).count()
    }

    pub fn last_event(&self) -> Option<BusEvent> {
        self.events.last().copied()
    }
}

impl BusController for MockController {
    type Error = MockIoError;

    fn configure(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        if self.reject_config {
            return Err(MockIoError);
        }
        self.configured = Some(*config);
        Ok(())
    }

    fn start(&mut self) -> nb::Result<(), Self::Error> {
        if self.stall == Some(Stall::Start) {
            return Err(nb::Error::WouldBlock);
        }
        self.events.push(BusEvent::Start);
        self.frame = Some(Frame::default());
        self.pending_write.clear();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<Ack, Self::Error> {
        self.events.push(BusEvent::Byte(byte));
        let frame = self.frame.as_mut().ok_or(nb::Error::Other(MockIoError))?;

        match frame.address_byte {
            None => {
                frame.address_byte = Some(byte);
                if !self.present.contains(&(byte >> 1)) {
                    return Ok(Ack::Nack);
                }
                if byte & 1 == 1 {
                    frame.response = self.responses.pop_front().unwrap_or_default().into();
                }
                Ok(Ack::Ack)
            }
            Some(_) => {
                let index = frame.data_written;
                frame.data_written += 1;
                if self.nack_data_at == Some(index) {
                    return Ok(Ack::Nack);
                }
                self.pending_write.push(byte);
                Ok(Ack::Ack)
            }
        }
    }

    fn read_byte(&mut self, ack: Ack) -> nb::Result<u8, Self::Error> {
        if self.stall == Some(Stall::ReadByte) {
            return Err(nb::Error::WouldBlock);
        }
        let frame = self.frame.as_mut().ok_or(nb::Error::Other(MockIoError))?;
        let index = frame.data_written;
        if self.fail_read_at == Some(index) {
            return Err(nb::Error::Other(MockIoError));
        }
        frame.data_written += 1;
        self.events.push(BusEvent::Read(ack));
        // An idle line reads as all ones.
        Ok(frame.response.pop_front().unwrap_or(0xFF))
    }

    fn stop(&mut self) -> nb::Result<(), Self::Error> {
        self.events.push(BusEvent::Stop);
        if let Some(frame) = self.frame.take() {
            if let Some(address_byte) = frame.address_byte {
                if address_byte & 1 == 0 && !self.pending_write.is_empty() {
                    self.writes
                        .push((address_byte >> 1, core::mem::take(&mut self.pending_write)));
                }
            }
        }
        Ok(())
    }
}

// --- Mock Transport ---

/// One call observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Write { addr: u8, data: Vec<u8> },
    Read { addr: u8, len: usize },
    Delay(u32),
}

/// Transport that records calls and answers reads from a script.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub calls: Vec<Call>,
    pub reads: VecDeque<Result<Vec<u8>, BusError<MockIoError>>>,
    pub write_results: VecDeque<Result<(), BusError<MockIoError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_read(&mut self, bytes: &[u8]) {
        self.reads.push_back(Ok(bytes.to_vec()));
    }

    pub fn queue_read_error(&mut self, error: BusError<MockIoError>) {
        self.reads.push_back(Err(error));
    }

    pub fn queue_write_result(&mut self, result: Result<(), BusError<MockIoError>>) {
        self.write_results.push_back(result);
    }

    /// Bus traffic only, without the delays.
    pub fn transactions(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Delay(_)))
            .cloned()
            .collect()
    }

    fn do_write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<MockIoError>> {
        self.calls.push(Call::Write {
            addr: address.get(),
            data: payload.to_vec(),
        });
        self.write_results.pop_front().unwrap_or(Ok(()))
    }

    fn do_read(
        &mut self,
        address: BusAddr,
        buffer: &mut [u8],
    ) -> Result<(), BusError<MockIoError>> {
        self.calls.push(Call::Read {
            addr: address.get(),
            len: buffer.len(),
        });
        match self.reads.pop_front() {
            Some(Ok(bytes)) => {
                assert_eq!(bytes.len(), buffer.len(), "scripted read has wrong length");
                buffer.copy_from_slice(&bytes);
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => Err(BusError::NoAck(super::error::NoAckSource::Address)),
        }
    }
}

impl Transport for MockTransport {
    type Error = MockIoError;

    fn write(&mut self, address: BusAddr, payload: &[u8]) -> Result<(), BusError<Self::Error>> {
        self.do_write(address, payload)
    }

    fn read(&mut self, address: BusAddr, buffer: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        self.do_read(address, buffer)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(Call::Delay(ms));
    }
}

#[cfg(feature = "async")]
impl super::hal_traits::AsyncTransport for MockTransport {
    type Error = MockIoError;

    async fn write(
        &mut self,
        address: BusAddr,
        payload: &[u8],
    ) -> Result<(), BusError<Self::Error>> {
        self.do_write(address, payload)
    }

    async fn read(
        &mut self,
        address: BusAddr,
        buffer: &mut [u8],
    ) -> Result<(), BusError<Self::Error>> {
        self.do_read(address, buffer)
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls.push(Call::Delay(ms));
    }
}
