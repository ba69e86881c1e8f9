//! Sht30 command-line utility
//!
//! Copyright 2019 Ryan Kurte

use std::fmt::Debug;

extern crate embedded_hal;
use embedded_hal::blocking::i2c;
use embedded_hal::blocking::delay::DelayMs;

extern crate linux_embedded_hal;
use linux_embedded_hal::{I2cdev, Delay};

extern crate structopt;
use structopt::StructOpt;

extern crate humantime;
use humantime::{Duration as HumanDuration};

#[macro_use] extern crate log;
extern crate simplelog;
use simplelog::{TermLogger, LevelFilter};

extern crate sensor_sht30;
use sensor_sht30::Sht30;
use sensor_sht30::device::Address;

#[derive(StructOpt)]
#[structopt(name = "sht30-util")]
/// A Command Line Interface (CLI) for interacting with a local Sht30 temperature and humidity sensor over I2C
pub struct Options {

    /// Specify the i2c interface to use to connect to the sht30 device
    #[structopt(short="d", long = "i2c", default_value = "/dev/i2c-1", env = "SHT30_I2C")]
    i2c: String,

    /// Use the alternate device address (0x45, ADDR pin pulled high)
    #[structopt(long = "alternate-address")]
    alternate_address: bool,

    /// Enable verbose logging
    #[structopt(long = "log-level", default_value = "info")]
    level: LevelFilter,

    #[structopt(subcommand)]
    operation: Operation,
}

#[derive(StructOpt)]
pub enum Operation {
    /// Poll the sensor for measurements until interrupted
    #[structopt(name = "measure")]
    Measure {
        /// Specify period for taking measurements
        #[structopt(short = "p", long = "sample-period", default_value="2s")]
        period: HumanDuration,
    },

    /// Read and decode the status register
    #[structopt(name = "status")]
    Status,

    /// Enable or disable the internal heater
    #[structopt(name = "heater")]
    Heater {
        /// Heater state (on or off)
        state: HeaterState,
    },

    /// Soft reset the sensor
    #[structopt(name = "reset")]
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaterState {
    On,
    Off,
}

impl std::str::FromStr for HeaterState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(HeaterState::On),
            "off" => Ok(HeaterState::Off),
            _ => Err(format!("Invalid heater state '{}' (expected on or off)", s)),
        }
    }
}

fn main() {
    // Load options
    let opts = Options::from_args();

    // Setup logging
    if let Err(e) = TermLogger::init(opts.level, simplelog::Config::default()) {
        eprintln!("Error initialising logger: {:?}", e);
        std::process::exit(-1);
    }

    debug!("Connecting to I2C device");
    let i2c = match I2cdev::new(&opts.i2c) {
        Ok(v) => v,
        Err(e) => {
            error!("Error opening I2C device '{}': {:?}", &opts.i2c, e);
            std::process::exit(-1);
        }
    };

    let address = match opts.alternate_address {
        true => Address::Alternate,
        false => Address::Primary,
    };

    debug!("Connecting to SHT30");
    let mut sensor = match Sht30::new(i2c, Delay, address) {
        Ok(v) => v,
        Err(e) => {
            error!("Error connecting to SHT30: {:?}", e);
            std::process::exit(-2);
        }
    };

    info!("SHT30 initialised at 0x{:02x}", sensor.address());

    let res = match opts.operation {
        Operation::Measure{ period } => poll(&mut sensor, *period),
        Operation::Status => sensor.read_status().map(|s| {
            info!("Status: 0x{:04x}", s.bits());
            info!("  alert pending: {}, heater on: {}", s.alert_pending(), s.heater_on());
            info!("  RH tracking alert: {}, T tracking alert: {}", s.rh_tracking_alert(), s.t_tracking_alert());
            info!("  reset detected: {}, command failed: {}, write CRC failed: {}",
                s.reset_detected(), s.command_failed(), s.write_crc_failed());
        }),
        Operation::Heater{ state } => sensor.set_heater(state == HeaterState::On)
            .map(|_| info!("Heater {:?}", state) ),
        Operation::Reset => sensor.reset().map(|_| info!("Reset complete") ),
    };

    if let Err(e) = res {
        error!("Error executing operation: {:?}", e);
        std::process::exit(-3);
    }
}

/// Measure on a fixed period, logging each result.
/// Failures are logged and polling continues regardless.
fn poll<Conn, D, Err>(sensor: &mut Sht30<Conn, D, Err>, period: std::time::Duration) -> ! where
    Conn: i2c::Read<Error=Err> + i2c::Write<Error=Err>,
    D: DelayMs<u16>,
    Err: Debug,
{
    debug!("Starting sensor polling (period: {:?})", period);

    loop {
        match sensor.measure() {
            Ok(m) => {
                info!("Temperature: {:.2} C, Humidity: {:.2} %", m.temp, m.rh);
            },
            Err(e) => {
                error!("Error reading sensor data: {:?}", e);
            },
        }

        // Wait for the next sample period
        std::thread::sleep(period);
    }
}
