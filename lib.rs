//! Driver for the Bosch BMP180 barometric pressure/temperature sensor.
//!
//! The sensor is read over I2C (register-based, SMBus subset): the factory
//! calibration block is fetched once per session, then each measurement
//! cycle triggers a temperature and a pressure conversion and runs the
//! datasheet's compensation algorithm over the raw results.
//!
//! The driver is generic over the `embedded-hal` blocking I2C and delay
//! traits; on a Raspberry Pi use `rppal` with its `hal` feature:
//!
//! ```no_run
//! use rppal::hal::Delay;
//! use rppal::i2c::I2c;
//! use rpbmp180::{Bmp180, Oversampling};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sensor = Bmp180::new(I2c::new()?, Delay::new());
//! sensor.read_calibration()?;
//! let measurement = sensor.measure(Oversampling::UltraHighResolution)?;
//! println!("{:.1} C, {:.2} hPa", measurement.temperature, measurement.pressure);
//! # Ok(())
//! # }
//! ```

mod bmp180;
mod compensation;
mod structs;

pub use crate::bmp180::{Bmp180, Error, ADDR_BMP180};
pub use crate::compensation::{compensate, compute_pressure, compute_temperature};
pub use crate::structs::{CalibParams, Measurement, Oversampling};
