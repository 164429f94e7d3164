//! Serial device access.
//!
//! The emulator firmware listens on a USB CDC serial port at 8N1 with no flow
//! control. Opening the port is the only place a device path is touched.

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::config::LinkConfig;
use crate::transport::TransportError;

/// Open the device named in `config`.
pub fn open_port(config: &LinkConfig) -> Result<Box<dyn SerialPort>, TransportError> {
    serialport::new(&config.device, config.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(config.write_timeout)
        .open()
        .map_err(|source| TransportError::Open {
            path: config.device.clone(),
            source,
        })
}

/// Paths of the serial ports the OS reports.
pub fn list_ports() -> Result<Vec<String>, serialport::Error> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}
