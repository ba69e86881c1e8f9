//! Sht30 device definitions
//!
//! Copyright 2019 Ryan Kurte

/// Sht30 I2C address with the ADDR pin pulled low
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// Sht30 I2C address with the ADDR pin pulled high
pub const ALTERNATE_ADDRESS: u8 = 0x45;

pub const CRC_POLY: u8 = 0x31;
pub const CRC_INIT: u8 = 0xff;
pub const CRC_XOR: u8 = 0x00;

/// Settle time following a soft reset
pub const RESET_DELAY_MS: u16 = 20;

/// Maximum conversion time for a high repeatability measurement.
/// With clock stretching disabled there is no ready signal, so this must elapse in full before reading.
pub const MEASUREMENT_DELAY_MS: u16 = 30;

/// Sht30 I2C addresses, selected by the state of the ADDR pin
#[derive(PartialEq, Clone, Copy, Debug)]
#[repr(u8)]
pub enum Address {
    /// ADDR pin connected to VSS
    Primary = DEFAULT_ADDRESS,
    /// ADDR pin connected to VDD
    Alternate = ALTERNATE_ADDRESS,
}

impl Default for Address {
    fn default() -> Self {
        Address::Primary
    }
}

/// Sht30 I2C Command
/// Commands are big endian 16-bit unsigned integers, responses are 16-bit words each followed by a CRC-8 checksum
#[derive(PartialEq, Clone, Copy, Debug)]
#[repr(u16)]
pub enum Command {
    /// Single shot measurement, high repeatability, clock stretching disabled
    /// Responds with temperature and humidity words after `MEASUREMENT_DELAY_MS`
    MeasureHighRepeatability = 0x2400,

    /// Soft Reset the device
    /// No associated data or CRC
    SoftReset = 0x30A2,

    /// Read the status register
    /// Responds with a single status word
    ReadStatus = 0xF32D,

    /// Enable the internal heater
    HeaterOn = 0x306D,

    /// Disable the internal heater
    HeaterOff = 0x3066,
}

impl Command {
    /// Encode the command for transmission (MSB first)
    pub fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

/// Status register bit definitions
pub mod status {
    /// At least one pending alert
    pub const ALERT_PENDING: u16 = 1 << 15;
    /// Heater on
    pub const HEATER_ON: u16 = 1 << 13;
    /// RH tracking alert
    pub const RH_TRACKING_ALERT: u16 = 1 << 11;
    /// T tracking alert
    pub const T_TRACKING_ALERT: u16 = 1 << 10;
    /// Reset detected since last clear status command
    pub const RESET_DETECTED: u16 = 1 << 4;
    /// Last command was not processed
    pub const COMMAND_FAILED: u16 = 1 << 1;
    /// Checksum of last write transfer failed
    pub const WRITE_CRC_FAILED: u16 = 1 << 0;
}
