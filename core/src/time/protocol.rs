//! Time service wire protocol
//!
//! The client opens a stream connection and sends nothing. The server
//! replies with its current time-base milliseconds as a little-endian
//! `u64` in the first [`PAYLOAD_LEN`] bytes. The reference server follows
//! it with a big-endian copy, which is never read and is discarded when
//! the connection is dropped.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady};
use hal_abstractions::UptimeClock;

use super::config::TimeSyncConfig;
use super::error::CalibrationError;

/// Size of the time payload in bytes
pub const PAYLOAD_LEN: usize = 8;

/// Interpret a reply payload as server time-base milliseconds
///
/// The wire order is little-endian on every host.
pub fn decode_server_time(payload: &[u8; PAYLOAD_LEN]) -> u64 {
    u64::from_le_bytes(*payload)
}

/// Wait for and read the full reply payload
///
/// Partial reads are accumulated. Between readiness polls the caller is
/// blocked on `delay` for `poll_interval_ms`. Gives up with
/// [`CalibrationError::TimedOut`] once `timeout_ms` has elapsed on `clock`
/// without the payload being complete.
pub fn read_payload<R, C, D>(
    conn: &mut R,
    clock: &C,
    delay: &mut D,
    config: &TimeSyncConfig,
) -> Result<[u8; PAYLOAD_LEN], CalibrationError>
where
    R: Read + ReadReady,
    C: UptimeClock,
    D: DelayNs,
{
    let mut payload = [0u8; PAYLOAD_LEN];
    let mut filled = 0;
    let started = clock.uptime_ms();

    while filled < PAYLOAD_LEN {
        let ready = conn
            .read_ready()
            .map_err(|_| CalibrationError::ReadFailed)?;

        if ready {
            let n = conn
                .read(&mut payload[filled..])
                .map_err(|_| CalibrationError::ReadFailed)?;
            if n == 0 {
                warn!("Time service closed after {} of {} bytes", filled, PAYLOAD_LEN);
                return Err(CalibrationError::ConnectionClosed);
            }
            filled += n;
            trace!("Received {} of {} payload bytes", filled, PAYLOAD_LEN);
            continue;
        }

        if clock.uptime_ms().saturating_sub(started) >= config.timeout_ms {
            warn!(
                "Time service reply timeout ({} ms, {} bytes received)",
                config.timeout_ms, filled
            );
            return Err(CalibrationError::TimedOut);
        }
        delay.delay_ms(config.poll_interval_ms);
    }

    Ok(payload)
}
