// src/sensor/reading.rs

use super::status::SensorStatus;

/// Length of the measurement response.
pub const PAYLOAD_LEN: usize = 6;

/// Full scale of a 20-bit raw fraction (2^20).
const FULL_SCALE: u32 = 1 << 20;
const RAW_MASK: u32 = FULL_SCALE - 1;

/// The six bytes returned by a measurement poll.
///
/// ```text
/// byte:   0        1        2        3        4        5
///       status | HHHHHHHH HHHHHHHH HHHH TTTT | TTTTTTTT TTTTTTTT
/// ```
///
/// Humidity and temperature are 20-bit big-endian fractions of full scale,
/// sharing byte 3.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RawPayload(pub [u8; PAYLOAD_LEN]);

impl RawPayload {
    #[inline]
    pub const fn status(&self) -> SensorStatus {
        SensorStatus::new(self.0[0])
    }

    /// 20-bit humidity fraction: byte1, byte2, top nibble of byte3.
    #[inline]
    pub const fn humidity_raw(&self) -> u32 {
        ((self.0[1] as u32) << 12) | ((self.0[2] as u32) << 4) | ((self.0[3] as u32) >> 4)
    }

    /// 20-bit temperature fraction: bottom nibble of byte3, byte4, byte5.
    #[inline]
    pub const fn temperature_raw(&self) -> u32 {
        (((self.0[3] as u32) & 0x0F) << 16) | ((self.0[4] as u32) << 8) | (self.0[5] as u32)
    }

    /// Decodes the payload, or `None` while the busy bit is set.
    pub fn decode(&self) -> Option<Reading> {
        if self.status().is_busy() {
            return None;
        }
        Some(Reading::from_raw(self.humidity_raw(), self.temperature_raw()))
    }
}

impl From<[u8; PAYLOAD_LEN]> for RawPayload {
    fn from(bytes: [u8; PAYLOAD_LEN]) -> Self {
        RawPayload(bytes)
    }
}

/// One decoded measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
    humidity_raw: u32,
    temperature_raw: u32,
}

impl Reading {
    /// Converts raw fractions to physical units:
    /// `RH% = raw * 100 / 2^20`, `T°C = raw * 200 / 2^20 - 50`.
    ///
    /// Bits above the low 20 are ignored.
    pub fn from_raw(humidity_raw: u32, temperature_raw: u32) -> Self {
        let humidity_raw = humidity_raw & RAW_MASK;
        let temperature_raw = temperature_raw & RAW_MASK;
        Reading {
            humidity: (humidity_raw as f32 * 100.0) / FULL_SCALE as f32,
            temperature: (temperature_raw as f32 * 200.0) / FULL_SCALE as f32 - 50.0,
            humidity_raw,
            temperature_raw,
        }
    }

    pub const fn humidity_raw(&self) -> u32 {
        self.humidity_raw
    }

    pub const fn temperature_raw(&self) -> u32 {
        self.temperature_raw
    }

    /// Temperature in thousandths of a degree, computed without floats.
    pub const fn temperature_milli_celsius(&self) -> i32 {
        ((self.temperature_raw as u64 * 200_000) >> 20) as i32 - 50_000
    }

    /// Relative humidity in thousandths of a percent, computed without floats.
    pub const fn humidity_milli_percent(&self) -> i32 {
        ((self.humidity_raw as u64 * 100_000) >> 20) as i32
    }
}
