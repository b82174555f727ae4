use std::{io::Write, time::Duration};

use log::{error, info};
use serialport::SerialPort;

use super::{Transport, TransportError};

const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct SerialTransport {
    port_name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn open(port_name: &str, baud_rate: u32) -> Result<SerialTransport, TransportError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(WRITE_TIMEOUT)
            .open()?;
        info!("Opened serial port {port_name} at {baud_rate} baud");
        Ok(SerialTransport {
            port_name: port_name.to_string(),
            port: Some(port),
        })
    }

    /// Opens the port, or logs the failure and returns a transport whose
    /// writes fail with [`TransportError::NotOpen`]. Keeps the menu usable
    /// without the device plugged in.
    pub fn open_or_detached(port_name: &str, baud_rate: u32) -> SerialTransport {
        match Self::open(port_name, baud_rate) {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to open serial port {port_name}: {e}");
                Self::detached(port_name)
            }
        }
    }

    pub fn detached(port_name: &str) -> SerialTransport {
        SerialTransport {
            port_name: port_name.to_string(),
            port: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| TransportError::NotOpen(self.port_name.clone()))?;
        port.write_all(bytes)?;
        port.flush()?;
        Ok(())
    }

    fn close(self) -> Result<(), TransportError> {
        if let Some(port) = self.port {
            drop(port);
            info!("Closed serial port {}", self.port_name);
        }
        Ok(())
    }
}
