// src/sensor/status.rs

/// The AHT10 status byte.
///
/// Returned by a 1-byte read and as the first byte of every measurement payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SensorStatus(pub u8);

impl SensorStatus {
    /// Bit 7: a conversion is in progress, the data bytes are not valid.
    pub const BUSY: u8 = 0b1000_0000;
    /// Bit 3: calibration coefficients are loaded.
    pub const CALIBRATED: u8 = 0b0000_1000;

    #[inline]
    pub const fn new(status: u8) -> Self {
        SensorStatus(status)
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_busy(&self) -> bool {
        self.0 & Self::BUSY != 0
    }

    #[inline]
    pub const fn is_calibrated(&self) -> bool {
        self.0 & Self::CALIBRATED != 0
    }
}

impl From<u8> for SensorStatus {
    fn from(value: u8) -> Self {
        SensorStatus(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let idle_uncalibrated = SensorStatus::new(0x00);
        assert!(!idle_uncalibrated.is_busy());
        assert!(!idle_uncalibrated.is_calibrated());

        let idle_calibrated = SensorStatus::new(0x08);
        assert!(!idle_calibrated.is_busy());
        assert!(idle_calibrated.is_calibrated());

        let busy = SensorStatus::new(0x88);
        assert!(busy.is_busy());
        assert!(busy.is_calibrated());

        // Bits the driver doesn't interpret are ignored.
        assert!(SensorStatus::new(0x1C).is_calibrated());
        assert!(!SensorStatus::new(0x77).is_calibrated());
    }
}
