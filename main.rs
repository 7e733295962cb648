use std::error::Error;
use std::process;

use rppal::hal::Delay;
use rppal::i2c::I2c;

use rpbmp180::{Bmp180, Oversampling};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // /dev/i2c-1 on current Raspberry Pi models
    let i2c = I2c::new()?;
    let mut sensor = Bmp180::new(i2c, Delay::new());

    sensor.check_connection()?;
    sensor.read_calibration()?;
    let measurement = sensor.measure(Oversampling::UltraHighResolution)?;

    println!("Temperature: {:.1} C", measurement.temperature);
    println!("Pressure: {:.2} hPa", measurement.pressure);
    Ok(())
}
