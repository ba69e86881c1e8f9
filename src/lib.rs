//! Sht30 temperature and humidity sensor driver
//!
//! Copyright 2019 Ryan Kurte

#![cfg_attr(not(test), no_std)]

use core::fmt::Debug;
use core::marker::PhantomData;

extern crate embedded_hal;
use embedded_hal::blocking::i2c;
use embedded_hal::blocking::delay::DelayMs;

#[macro_use] extern crate log;

pub mod device;
use device::*;

pub mod base;
use base::*;

/// Sht30 sensor object
/// This is generic over an I2C connector, a blocking delay provider, and the associated I2C error type
pub struct Sht30<Conn, Delay, Err> {
    conn: Conn,
    delay: Delay,
    address: u8,
    _err: PhantomData<Err>,
}

/// Sht30 error object
#[derive(Debug)]
pub enum Error<ConnErr> {
    /// Underlying I2C transport error
    Conn(ConnErr),
    /// Checksum mismatch (computed, received)
    Crc(u8, u8),
}

impl <ConnErr> From<ConnErr> for Error<ConnErr> {
    fn from(conn_err: ConnErr) -> Self {
        Error::Conn(conn_err)
    }
}

/// Sht30 measurement object
#[derive(PartialEq, Clone, Debug)]
pub struct Measurement {
    /// Temperature in degrees celsius
    /// Range: -40 - 125 C
    pub temp: f32,
    /// Relative Humidity (%)
    /// Range: 0 - 100, not clamped
    pub rh: f32,
}

/// Sht30 status register snapshot
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Status(pub u16);

impl Status {
    /// Raw status word
    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn alert_pending(&self) -> bool {
        self.0 & status::ALERT_PENDING != 0
    }

    pub fn heater_on(&self) -> bool {
        self.0 & status::HEATER_ON != 0
    }

    pub fn rh_tracking_alert(&self) -> bool {
        self.0 & status::RH_TRACKING_ALERT != 0
    }

    pub fn t_tracking_alert(&self) -> bool {
        self.0 & status::T_TRACKING_ALERT != 0
    }

    /// Set following power-up or any reset, until the status is cleared
    pub fn reset_detected(&self) -> bool {
        self.0 & status::RESET_DETECTED != 0
    }

    pub fn command_failed(&self) -> bool {
        self.0 & status::COMMAND_FAILED != 0
    }

    pub fn write_crc_failed(&self) -> bool {
        self.0 & status::WRITE_CRC_FAILED != 0
    }
}

/// Convert a raw temperature code into degrees celsius
pub fn convert_temperature(raw: u16) -> f32 {
    -45.0 + 175.0 * (raw as f32 / 65535.0)
}

/// Convert a raw humidity code into relative humidity (%)
pub fn convert_humidity(raw: u16) -> f32 {
    100.0 * (raw as f32 / 65535.0)
}

impl <Conn, Delay, Err> Sht30 <Conn, Delay, Err> where
    Conn: i2c::Read<Error=Err> + i2c::Write<Error=Err>,
    Delay: DelayMs<u16>,
    Err: Debug,
{
    /// Create and initialise a new Sht30 sensor instance on an already opened I2C bus.
    /// This fails if the device does not respond at the provided address,
    /// however a failed soft reset is only logged as the device remains usable.
    pub fn new(conn: Conn, delay: Delay, address: Address) -> Result<Self, Error<Err>> {
        // Create sensor object
        let mut s = Sht30{ conn, delay, address: address as u8, _err: PhantomData };

        // Check the device is present
        s.probe()?;

        debug!("Sht30 detected at 0x{:02x}", s.address);

        // Reset into a known state
        if let Err(e) = s.reset() {
            warn!("Sht30 soft reset failed: {:?}", e);
        }

        // Return sensor
        Ok(s)
    }

    /// Fetch the I2C address of the device
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Check the device acknowledges its address
    pub fn probe(&mut self) -> Result<(), Error<Err>> {
        self.conn.probe(self.address)
    }

    /// Soft reset the underlying device
    /// The settle delay is always applied, the result of the command write is returned
    pub fn reset(&mut self) -> Result<(), Error<Err>> {
        let res = self.conn.write_command(self.address, Command::SoftReset);

        self.delay.delay_ms(RESET_DELAY_MS);

        res
    }

    /// Read the device status register
    pub fn read_status(&mut self) -> Result<Status, Error<Err>> {
        let mut buff = [0u8; 3];

        self.conn.write_command(self.address, Command::ReadStatus)?;
        self.conn.read_response(self.address, &mut buff)?;

        check_crc::<Err>(&buff[..2], buff[2])?;

        let v = u16::from_be_bytes([buff[0], buff[1]]);

        Ok(Status(v))
    }

    /// Enable or disable the internal heater
    pub fn set_heater(&mut self, enabled: bool) -> Result<(), Error<Err>> {
        let c = match enabled {
            true => Command::HeaterOn,
            false => Command::HeaterOff,
        };

        self.conn.write_command(self.address, c)
    }

    /// Perform a single shot measurement
    /// This blocks for the maximum conversion time between issuing the command and reading the result
    pub fn measure(&mut self) -> Result<Measurement, Error<Err>> {
        let mut buff = [0u8; 6];

        self.conn.write_command(self.address, Command::MeasureHighRepeatability)?;

        self.delay.delay_ms(MEASUREMENT_DELAY_MS);

        self.conn.read_response(self.address, &mut buff)?;

        Self::convert(&buff)
    }

    /// Release the underlying I2C connection and delay provider
    pub fn release(self) -> (Conn, Delay) {
        (self.conn, self.delay)
    }

    /// Convert from a 6-byte measurement frame into a measurement
    fn convert(frame: &[u8; 6]) -> Result<Measurement, Error<Err>> {
        // Frames are (TMSB, TLSB, CRC, HMSB, HLSB, CRC), both words must be valid
        check_crc::<Err>(&frame[0..2], frame[2])?;
        check_crc::<Err>(&frame[3..5], frame[5])?;

        // Note the returned data is _big endian_
        let raw_temp = u16::from_be_bytes([frame[0], frame[1]]);
        let raw_hum = u16::from_be_bytes([frame[3], frame[4]]);

        Ok(Measurement{
            temp: convert_temperature(raw_temp),
            rh: convert_humidity(raw_hum),
        })
    }
}
