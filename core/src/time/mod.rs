//! Time-Base Synchronization and Calendar Module
//!
//! Derives wall-clock time on boards without a battery-backed RTC and
//! renders it as fixed-width calendar text.
//!
//! ## Architecture
//! - One-shot calibration against the time service over a stream connection
//! - Time-base milliseconds are `uptime + offset` afterwards (no I/O)
//! - RTT/2 correction for one-way network latency
//! - Calendar decomposition relative to the time-base epoch
//!   (2024-01-01 00:00:00.000 local civil time, no time zones)
//! - Fixed-width rendering: `MM/DD/YYYY`, `HH:MM:SS`, `HH:MM:SS:mmm`
//!
//! ## Features
//! - Explicit calibration state (`Uninitialized` / `Calibrated`)
//! - Bounded reply wait with `TimedOut` error instead of an endless spin
//! - Host-independent little-endian payload decoding
//! - Full Gregorian leap year rule (2100 is NOT a leap year)
//! - On-demand `recalibrate()` for drift correction
//! - `SharedClock` for reading time from interrupt context
//!
//! **Limitations:**
//! - ⚠️ Calibration is not persisted across power cycles
//! - ⚠️ No periodic resync; call `recalibrate()` when needed
//! - ⚠️ The exchange blocks the calling context (bounded by `timeout_ms`)
//! - ✅ Years render modulo 10000 to keep the date 10 characters wide
//!
//! ## Usage
//! ```ignore
//! let mut clock = ClockCalibrator::new(uptime, time_link, delay);
//!
//! // First call performs the network exchange
//! match clock.now_ms() {
//!     Ok(ms) => info!("Now: {}", format_full(&decompose(ms)).as_str()),
//!     Err(e) => warn!("Clock calibration failed: {:?}", e),
//! }
//!
//! // Share calibrated time with other contexts
//! CLOCK.publish(clock.state());
//! ```

mod calendar;
mod calibrator;
mod config;
mod error;
mod format;
mod protocol;
mod shared;

#[cfg(test)]
mod mock;

// Re-export public API
pub use calendar::{
    days_in_month, days_in_year, decompose, elapsed_ms_to_unix_secs, is_leap_year,
    unix_secs_to_elapsed_ms, CalendarTime, BASE_YEAR, EPOCH_UNIX_MS, EPOCH_UNIX_SECS,
};
pub use calibrator::{CalibrationState, ClockCalibrator};
pub use config::TimeSyncConfig;
pub use error::CalibrationError;
pub use format::{
    format_date, format_full, format_time, format_time_ms, DATE_STR_LEN, FULL_STR_LEN,
    TIME_MS_STR_LEN, TIME_STR_LEN,
};
pub use protocol::{decode_server_time, read_payload, PAYLOAD_LEN};
pub use shared::SharedClock;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::mock::{Reply, VirtualClock, VirtualDelay, VirtualLink};

    #[test]
    fn test_calibrated_time_renders() {
        // Server reports 2025-05-12 20:04:04.250 on the time base
        let server_ms = unix_secs_to_elapsed_ms(1_747_076_644) + 250;

        let clock = VirtualClock::new(12_345);
        let link = VirtualLink::new(&clock, [Reply::payload(server_ms, 20)]);
        let mut cal = ClockCalibrator::new(&clock, link, VirtualDelay::new(&clock));

        let now = cal.now_ms().unwrap();
        assert_eq!(now, server_ms + 10);
        assert_eq!(
            format_full(&decompose(now)).as_str(),
            "05/12/2025 20:04:04:260"
        );

        clock.advance(1_000);
        let later = decompose(cal.now_ms().unwrap());
        assert_eq!(format_time(&later).as_str(), "20:04:05");
        assert_eq!(format_date(&later).as_str(), "05/12/2025");
        assert_eq!(elapsed_ms_to_unix_secs(cal.now_ms().unwrap()), 1_747_076_645);
    }
}
