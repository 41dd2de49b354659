//! Monotonic uptime counter
//!
//! Boards without a battery-backed RTC only have a free-running counter
//! that starts at zero on reset. Wall-clock time is derived from it by
//! `iot-core` after a network calibration.

/// Millisecond uptime counter provided by the board
///
/// Implementations must be non-decreasing for the lifetime of the
/// process. The counter only goes back to zero on a device restart.
pub trait UptimeClock {
    /// Milliseconds elapsed since boot
    fn uptime_ms(&self) -> u64;
}

impl<T: UptimeClock + ?Sized> UptimeClock for &T {
    fn uptime_ms(&self) -> u64 {
        (**self).uptime_ms()
    }
}
