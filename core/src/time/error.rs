//! Calibration error types

#[cfg(feature = "defmt")]
use defmt::Format;

/// Clock calibration errors
///
/// None of these are fatal: the calibrator stays uncalibrated and the
/// caller may retry on a later call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum CalibrationError {
    /// Connection to the time service could not be established
    ConnectFailed,
    /// Transport error while waiting for or reading the reply
    ReadFailed,
    /// Peer closed the connection before the full payload arrived
    ConnectionClosed,
    /// Reply did not arrive within the configured timeout
    TimedOut,
}

impl core::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "Time service connection failed"),
            Self::ReadFailed => write!(f, "Time service read error"),
            Self::ConnectionClosed => write!(f, "Time service closed connection"),
            Self::TimedOut => write!(f, "Time service reply timeout"),
        }
    }
}

impl core::error::Error for CalibrationError {}

impl embedded_io::Error for CalibrationError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Self::ConnectFailed => embedded_io::ErrorKind::ConnectionRefused,
            Self::ConnectionClosed => embedded_io::ErrorKind::BrokenPipe,
            Self::TimedOut => embedded_io::ErrorKind::TimedOut,
            Self::ReadFailed => embedded_io::ErrorKind::Other,
        }
    }
}
