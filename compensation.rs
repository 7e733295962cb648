//! Calibration compensation for the BMP180.
//!
//! The formulas below are the sensor's published calibration model
//! (datasheet page 15). They are pure functions over the raw readings and
//! the factory coefficients, so they can be tested without any bus.
//! Intermediate terms keep the datasheet names (b5, b6, b3, b4, b7).

use crate::structs::{CalibParams, Measurement, Oversampling};

/// Computes the true temperature from a raw reading.
///
/// Returns the temperature in degrees Celsius together with the
/// intermediate `b5` term, which the pressure compensation needs as input.
pub fn compute_temperature(ut: u16, calib: &CalibParams) -> (f32, f32) {
    let x1 = (ut as f32 - calib.ac6 as f32) * calib.ac5 as f32 / 32768.0;
    let x2 = calib.mc as f32 * 2048.0 / (x1 + calib.md as f32);
    let b5 = x1 + x2;
    let temperature = (b5 + 8.0) / 160.0;
    (temperature, b5)
}

/// Computes the true pressure in hectopascal from a raw reading.
///
/// `b5` is the intermediate term returned by [`compute_temperature`] for
/// the same cycle; `oss` must be the setting the raw pressure was
/// converted with.
pub fn compute_pressure(up: u32, b5: f32, oss: Oversampling, calib: &CalibParams) -> f32 {
    let oss_scale = (1u32 << oss.value()) as f32;
    let b6 = b5 - 4000.0;
    let x1 = calib.b2 as f32 * (b6 * b6 / 4096.0) / 2048.0;
    let x2 = calib.ac2 as f32 * b6 / 2048.0;
    let x3 = x1 + x2;
    let b3 = ((4.0 * calib.ac1 as f32 + x3) * oss_scale + 2.0) / 4.0;
    let x1 = calib.ac3 as f32 * b6 / 8192.0;
    let x2 = calib.b1 as f32 * (b6 * b6 / 4096.0) / 65536.0;
    let x3 = (x1 + x2 + 2.0) / 4.0;
    let b4 = calib.ac4 as f32 * (x3 + 32768.0) / 32768.0;
    let b7 = (up as f32 - b3) * (50000.0 / oss_scale);
    let p = (b7 / b4) * 2.0;
    let x1 = (p * p / 65536.0) * 3038.0 / 65536.0;
    let x2 = (-7357.0 * p) / 65536.0;
    (p + (x1 + x2 + 3791.0) / 16.0) / 100.0
}

/// Runs both compensation steps for one cycle of raw readings.
pub fn compensate(ut: u16, up: u32, oss: Oversampling, calib: &CalibParams) -> Measurement {
    let (temperature, b5) = compute_temperature(ut, calib);
    let pressure = compute_pressure(up, b5, oss, calib);
    Measurement {
        temperature,
        pressure,
    }
}
