use clap::Args;
use serialport::SerialPort;
use simple_eyre::{eyre::eyre, Result};
use spek_c12880::Spectrometer;
use std::time::Duration;

/// Baud rate of the device's serial bridge, fixed by the firmware
const BAUD_RATE: u32 = 115_200;

#[derive(Args)]
pub struct SerialConf {
    /// Name of serial port that should be used
    #[clap(short, long, value_parser)]
    pub serial: String,
}

pub type SerialSpectrometer = Spectrometer<Box<dyn SerialPort>>;

impl SerialConf {
    pub fn open_spectrometer(&self) -> Result<SerialSpectrometer> {
        log::debug!("Opening {} at {} baud", self.serial, BAUD_RATE);
        // 8N1 with no flow control is the serialport default
        let port = serialport::new(&self.serial, BAUD_RATE)
            .timeout(Duration::from_secs(5))
            .open()
            .map_err(|_| eyre!("Could not open serial port"))?;
        Ok(Spectrometer::new(port))
    }
}
