mod serial;

pub use serial::SerialTransport;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("serial port {0} is not open")]
    NotOpen(String),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte sink in front of the LED display.
pub trait Transport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Releases the device. Consumes the transport so it can only happen once.
    fn close(self) -> Result<(), TransportError>
    where
        Self: Sized;
}
