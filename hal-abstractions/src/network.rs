//! Time service transport
//!
//! The calibration exchange only needs a stream that can be opened,
//! polled for readiness and read from. Closing happens when the
//! connection value is dropped.

use embedded_io::{ErrorType, Read, ReadReady};

/// Stream connection to the configured time service
///
/// The BSP owns the address/port configuration and the socket buffers;
/// the caller only ever sees an opened connection.
///
/// # Example Implementation
/// ```ignore
/// impl TimeServiceLink for WifiTimeLink {
///     type Error = WifiError;
///     type Connection<'a> = WifiClient<'a> where Self: 'a;
///
///     fn connect(&mut self) -> Result<Self::Connection<'_>, Self::Error> {
///         WifiClient::connect(&mut self.stack, CLOCK_IP, CLOCK_PORT)
///     }
/// }
/// ```
pub trait TimeServiceLink {
    /// Transport error shared by connect and read operations
    type Error: embedded_io::Error;

    /// An open connection; dropping it closes the stream
    type Connection<'a>: Read + ReadReady + ErrorType<Error = Self::Error>
    where
        Self: 'a;

    /// Open a connection to the time service
    ///
    /// # Errors
    ///
    /// Returns the transport error if the connection cannot be established.
    fn connect(&mut self) -> Result<Self::Connection<'_>, Self::Error>;
}
