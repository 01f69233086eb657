//! AHT10 command set.
//!
//! The parameter bytes that follow the init and trigger opcodes are fixed by
//! the device; treat each command as one opaque byte sequence.

use core::fmt;

/// A command understood by the AHT10.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load calibration coefficients (`0xE1 0x08 0x00`).
    Initialize,
    /// Start one humidity + temperature conversion (`0xAC 0x33 0x00`).
    TriggerMeasurement,
    /// Restart the device without cycling power (`0xBA`).
    SoftReset,
}

impl Command {
    pub const INITIALIZE_OPCODE: u8 = 0xE1;
    pub const TRIGGER_MEASUREMENT_OPCODE: u8 = 0xAC;
    pub const SOFT_RESET_OPCODE: u8 = 0xBA;

    #[inline]
    pub const fn opcode(&self) -> u8 {
        match self {
            Command::Initialize => Self::INITIALIZE_OPCODE,
            Command::TriggerMeasurement => Self::TRIGGER_MEASUREMENT_OPCODE,
            Command::SoftReset => Self::SOFT_RESET_OPCODE,
        }
    }

    /// The exact bytes written to the device for this command.
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Command::Initialize => &[Self::INITIALIZE_OPCODE, 0x08, 0x00],
            Command::TriggerMeasurement => &[Self::TRIGGER_MEASUREMENT_OPCODE, 0x33, 0x00],
            Command::SoftReset => &[Self::SOFT_RESET_OPCODE],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Initialize => write!(f, "initialize ({:#04x})", self.opcode()),
            Command::TriggerMeasurement => write!(f, "trigger measurement ({:#04x})", self.opcode()),
            Command::SoftReset => write!(f, "soft reset ({:#04x})", self.opcode()),
        }
    }
}
