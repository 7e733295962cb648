//! Bus transaction sequencing for the BMP180.
//!
//! The driver is generic over the `embedded-hal` blocking I2C and delay
//! traits, so the same code runs against the Raspberry Pi bus (`rppal`
//! with the `hal` feature) and against a mock in tests.

use std::fmt;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use log::debug;

use crate::compensation::compensate;
use crate::structs::{CalibParams, Measurement, Oversampling};

// BMP180 I2C slave address (7 bit).
pub const ADDR_BMP180: u8 = 0x77;

// BMP180 register addresses.
// cf. https://cdn-shop.adafruit.com/datasheets/BST-BMP180-DS000-09.pdf
const REG_ID: u8 = 0xD0;
const REG_CALIB_00: u8 = 0xAA;
const REG_CTRL_MEAS: u8 = 0xF4;
const REG_OUT_MSB: u8 = 0xF6;
const REG_CALIB_LEN: usize = 22;

const CHIP_ID_BMP180: u8 = 0x55;
const CMD_READ_TEMP: u8 = 0x2E;
const TEMP_CONVERSION_MS: u16 = 5;

/// Driver failure, generic over the bus transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Transport failure reported by the underlying bus.
    Bus(E),
    /// A measurement was requested before a successful calibration load.
    Uncalibrated,
    /// The id register did not identify a BMP180.
    InvalidChipId(u8),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(err) => write!(f, "bus error: {:?}", err),
            Error::Uncalibrated => write!(f, "calibration data has not been read"),
            Error::InvalidChipId(id) => write!(f, "unexpected chip id {:#04x}", id),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}

/// BMP180 barometric pressure/temperature sensor driver.
///
/// Every bus-facing method takes `&mut self`, so one measurement cycle has
/// exclusive use of the bus; overlapping writes to the measurement control
/// register would corrupt an in-flight conversion. To share a sensor
/// between threads, wrap the driver in a `Mutex` held across whole cycles.
pub struct Bmp180<I2C, D> {
    i2c: I2C,
    delay: D,
    calib: Option<CalibParams>,
}

impl<I2C, D, E> Bmp180<I2C, D>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    D: DelayMs<u16>,
{
    /// Creates a driver on the given bus. No bus traffic happens here;
    /// call [`read_calibration`](Bmp180::read_calibration) before measuring.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Bmp180 {
            i2c,
            delay,
            calib: None,
        }
    }

    /// Verifies that the device at the sensor address is a BMP180.
    pub fn check_connection(&mut self) -> Result<(), Error<E>> {
        let mut id = [0u8; 1];
        self.i2c.write_read(ADDR_BMP180, &[REG_ID], &mut id)?;
        debug!("Got chip id: {:#04x}", id[0]);
        if id[0] != CHIP_ID_BMP180 {
            return Err(Error::InvalidChipId(id[0]));
        }
        Ok(())
    }

    /// Reads and decodes the factory calibration block.
    ///
    /// Single attempt; on a bus failure no coefficients are stored and a
    /// previously loaded set stays untouched. The decoded coefficients are
    /// retained for subsequent [`measure`](Bmp180::measure) calls and also
    /// returned to the caller.
    pub fn read_calibration(&mut self) -> Result<CalibParams, Error<E>> {
        let mut block = [0u8; REG_CALIB_LEN];
        self.i2c.write_read(ADDR_BMP180, &[REG_CALIB_00], &mut block)?;
        let calib = CalibParams::from_bytes(&block);
        debug!("Got calibration data: {:?}", calib);
        self.calib = Some(calib);
        Ok(calib)
    }

    /// Triggers a temperature conversion and reads the raw result (UT).
    pub fn read_raw_temperature(&mut self) -> Result<u16, Error<E>> {
        self.i2c
            .write(ADDR_BMP180, &[REG_CTRL_MEAS, CMD_READ_TEMP])?;
        self.delay.delay_ms(TEMP_CONVERSION_MS);
        let mut data = [0u8; 2];
        self.i2c.write_read(ADDR_BMP180, &[REG_OUT_MSB], &mut data)?;
        let ut = u16::from(data[0]) * 256 + u16::from(data[1]);
        debug!("Read raw temperature: {}", ut);
        Ok(ut)
    }

    /// Triggers a pressure conversion at the given oversampling setting and
    /// reads the raw result (UP).
    pub fn read_raw_pressure(&mut self, oss: Oversampling) -> Result<u32, Error<E>> {
        self.i2c
            .write(ADDR_BMP180, &[REG_CTRL_MEAS, oss.control_byte()])?;
        self.delay.delay_ms(oss.conversion_ms());
        let mut data = [0u8; 3];
        self.i2c.write_read(ADDR_BMP180, &[REG_OUT_MSB], &mut data)?;
        let up = ((u32::from(data[0]) << 16) | (u32::from(data[1]) << 8) | u32::from(data[2]))
            >> (8 - oss.value());
        debug!("Read raw pressure: {} (oss {})", up, oss.value());
        Ok(up)
    }

    /// Runs one full measurement cycle: temperature conversion, pressure
    /// conversion, compensation.
    ///
    /// Fails with [`Error::Uncalibrated`] if no calibration load has
    /// succeeded yet. Any bus failure aborts the cycle; partial raw
    /// readings are discarded, never compensated.
    pub fn measure(&mut self, oss: Oversampling) -> Result<Measurement, Error<E>> {
        let calib = self.calib.ok_or(Error::Uncalibrated)?;
        let ut = self.read_raw_temperature()?;
        let up = self.read_raw_pressure(oss)?;
        Ok(compensate(ut, up, oss, &calib))
    }

    /// Releases the bus and delay, consuming the driver.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}
