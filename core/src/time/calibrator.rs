//! One-shot wall-clock calibration against the time service
//!
//! The device has no battery-backed RTC. Time-base milliseconds are
//! derived as `uptime + offset`, where the offset is measured once by a
//! network exchange:
//!
//! ```text
//! offset = (server_ms + min(rtt / 2, max_rtt_correction_ms)) - uptime
//! ```
//!
//! One-way latency is modelled as half the measured round trip. That
//! approximation is the main source of calibration error.

use embedded_hal::delay::DelayNs;
use hal_abstractions::{TimeServiceLink, UptimeClock};

use super::config::TimeSyncConfig;
use super::error::CalibrationError;
use super::protocol::{decode_server_time, read_payload};

/// Calibration lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// No successful exchange yet
    #[default]
    Uninitialized,
    /// Time-base milliseconds at uptime zero
    Calibrated { offset_ms: i64 },
}

impl CalibrationState {
    /// Time-base milliseconds for the given uptime, if calibrated
    ///
    /// Results before the time-base epoch saturate to 0.
    pub fn apply(&self, uptime_ms: u64) -> Option<u64> {
        match *self {
            Self::Uninitialized => None,
            Self::Calibrated { offset_ms } => Some(uptime_ms.saturating_add_signed(offset_ms)),
        }
    }
}

/// Owned calibration state plus the board handles it needs
///
/// `now_ms` takes `&mut self`, so a single owner serializes calibration
/// by construction. Contexts that only read time should use
/// [`SharedClock`](super::SharedClock) fed from this calibrator.
///
/// # Example
/// ```ignore
/// let mut clock = ClockCalibrator::new(board.uptime, board.time_link, board.delay);
/// let now = clock.now_ms()?; // first call blocks on the exchange
/// info!("{}", decompose(now));
/// ```
pub struct ClockCalibrator<C, L, D> {
    clock: C,
    link: L,
    delay: D,
    config: TimeSyncConfig,
    state: CalibrationState,
}

impl<C, L, D> ClockCalibrator<C, L, D>
where
    C: UptimeClock,
    L: TimeServiceLink,
    D: DelayNs,
{
    /// Create an uncalibrated clock with default configuration
    pub fn new(clock: C, link: L, delay: D) -> Self {
        Self::with_config(clock, link, delay, TimeSyncConfig::default())
    }

    /// Create an uncalibrated clock with custom configuration
    pub fn with_config(clock: C, link: L, delay: D, config: TimeSyncConfig) -> Self {
        Self {
            clock,
            link,
            delay,
            config,
            state: CalibrationState::Uninitialized,
        }
    }

    pub fn config(&self) -> &TimeSyncConfig {
        &self.config
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrated { .. })
    }

    /// Current time-base milliseconds without any I/O
    ///
    /// Returns `None` until a calibration has succeeded.
    pub fn try_now_ms(&self) -> Option<u64> {
        self.state.apply(self.clock.uptime_ms())
    }

    /// Current time-base milliseconds, calibrating first if needed
    ///
    /// Once calibrated this is an addition and never touches the network.
    /// The first call blocks for the duration of the exchange.
    ///
    /// # Errors
    ///
    /// Any [`CalibrationError`] from the exchange. The clock stays
    /// uncalibrated and a later call retries.
    pub fn now_ms(&mut self) -> Result<u64, CalibrationError> {
        if let Some(now) = self.try_now_ms() {
            return Ok(now);
        }
        let offset_ms = self.calibrate()?;
        Ok(self.clock.uptime_ms().saturating_add_signed(offset_ms))
    }

    /// Run the exchange unless already calibrated
    ///
    /// Returns the offset in effect.
    pub fn calibrate(&mut self) -> Result<i64, CalibrationError> {
        if let CalibrationState::Calibrated { offset_ms } = self.state {
            debug!("Clock already calibrated (offset {} ms), skipping", offset_ms);
            return Ok(offset_ms);
        }
        let offset_ms = self.exchange()?;
        self.state = CalibrationState::Calibrated { offset_ms };
        Ok(offset_ms)
    }

    /// Measure a fresh offset even if already calibrated
    ///
    /// Corrects drift over long uptimes. On failure the previous offset
    /// is kept.
    pub fn recalibrate(&mut self) -> Result<i64, CalibrationError> {
        info!("Recalibrating clock");
        let offset_ms = self.exchange()?;
        if let CalibrationState::Calibrated { offset_ms: previous } = self.state {
            info!("Clock offset moved by {} ms", offset_ms.saturating_sub(previous));
        }
        self.state = CalibrationState::Calibrated { offset_ms };
        Ok(offset_ms)
    }

    /// Forget the calibration; the next `now_ms` performs a new exchange
    pub fn reset(&mut self) {
        self.state = CalibrationState::Uninitialized;
    }

    /// Give back the board handles
    pub fn into_parts(self) -> (C, L, D) {
        (self.clock, self.link, self.delay)
    }

    fn exchange(&mut self) -> Result<i64, CalibrationError> {
        info!("Starting time service calibration");

        let mut conn = self.link.connect().map_err(|_| {
            warn!("Time service connection failed");
            CalibrationError::ConnectFailed
        })?;

        let t0 = self.clock.uptime_ms();
        let payload = read_payload(&mut conn, &self.clock, &mut self.delay, &self.config)?;
        let rtt = self.clock.uptime_ms().saturating_sub(t0);

        let server_ms = decode_server_time(&payload);
        let correction = (rtt / 2).min(self.config.max_rtt_correction_ms);
        let offset_ms = offset_between(server_ms.saturating_add(correction), self.clock.uptime_ms());
        drop(conn);

        info!(
            "Time service reply: {} ms (RTT {} ms, correction {} ms), offset {} ms",
            server_ms, rtt, correction, offset_ms
        );
        Ok(offset_ms)
    }
}

/// `epoch_ms - uptime_ms`, saturated to the `i64` range
fn offset_between(epoch_ms: u64, uptime_ms: u64) -> i64 {
    let diff = i128::from(epoch_ms) - i128::from(uptime_ms);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}
