//! Time synchronization configuration

/// Clock calibration configuration
///
/// The time service address lives with the board's
/// [`TimeServiceLink`](hal_abstractions::TimeServiceLink) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSyncConfig {
    /// Maximum time to wait for the full reply, in milliseconds
    pub timeout_ms: u64,
    /// Delay between readiness polls while waiting for the reply
    pub poll_interval_ms: u32,
    /// Upper bound for the RTT/2 correction in milliseconds
    ///
    /// Unbounded by default. An RTT above 2 s usually means a stalled
    /// link, so boards on flaky uplinks may clamp this to 1000.
    pub max_rtt_correction_ms: u64,
}

impl Default for TimeSyncConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            poll_interval_ms: 10,
            max_rtt_correction_ms: u64::MAX,
        }
    }
}
