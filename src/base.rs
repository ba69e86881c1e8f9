//! Base communication implementation for interacting with Sht30 device
//!
//! Copyright 2019 Ryan Kurte

use core::fmt::Debug;

use embedded_hal::blocking::i2c;

use crate::{Error};
use crate::device::*;

/// Base API for reading and writing to the device
/// This should not be required by consumers, but is exposed to support alternate use
pub trait Base<Err> {
    /// Write a command to the device at the provided address
    fn write_command(&mut self, address: u8, command: Command) -> Result<(), Error<Err>>;
    /// Read a response from the device, the caller is responsible for any delay required after the command
    fn read_response(&mut self, address: u8, data: &mut [u8]) -> Result<(), Error<Err>>;
    /// Check a device acknowledges the provided address
    fn probe(&mut self, address: u8) -> Result<(), Error<Err>>;
}

/// Helper for device CRC-8 calculation
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = CRC_INIT;

    // For each byte
    for v in data {
        // XOR with current byte
        crc ^= v;

        // For each bit, MSB first
        for _bit in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ CRC_POLY;
            } else {
                crc = crc << 1;
            }
        }
    }

    // Apply final xor
    crc ^ CRC_XOR
}

/// Check a 2-byte response word against the CRC transmitted with it
pub fn check_crc<Err>(word: &[u8], expected: u8) -> Result<(), Error<Err>> {
    let crc = crc8(&word[..2]);
    if crc != expected {
        return Err(Error::Crc(crc, expected));
    }

    Ok(())
}

/// Base implementation for I2C devices
impl <Conn, Err> Base<Err> for Conn where
    Conn: i2c::Read<Error=Err> + i2c::Write<Error=Err>,
    Err: Debug,
{
    fn write_command(&mut self, address: u8, command: Command) -> Result<(), Error<Err>> {
        let buff = command.to_bytes();

        trace!("Writing command: {:?} ({:x?}) to 0x{:02x}", command, buff, address);

        self.write(address, &buff).map_err(|e| Error::Conn(e) )
    }

    fn read_response(&mut self, address: u8, data: &mut [u8]) -> Result<(), Error<Err>> {
        self.read(address, data)
            .map_err(|e| Error::Conn(e) )?;

        trace!("Read data: {:x?}", data);

        Ok(())
    }

    fn probe(&mut self, address: u8) -> Result<(), Error<Err>> {
        // An empty write only addresses the device, succeeding if it ACKs
        trace!("Probing address: 0x{:02x}", address);

        self.write(address, &[]).map_err(|e| Error::Conn(e) )
    }
}
