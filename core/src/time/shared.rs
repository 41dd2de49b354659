//! Read-only wall clock shared across execution contexts
//!
//! The calibration exchange blocks, so it must not run inside a critical
//! section. One task owns the [`ClockCalibrator`](super::ClockCalibrator)
//! and publishes its state here; interrupt handlers and other tasks read
//! time through [`SharedClock::now_ms`] without I/O.

use core::cell::Cell;

use critical_section::Mutex;
use hal_abstractions::UptimeClock;

use super::calibrator::CalibrationState;

/// Wall clock derived from a published calibration
///
/// Suitable for a `static`:
/// ```ignore
/// static CLOCK: SharedClock<BoardUptime> = SharedClock::new(BoardUptime);
/// ```
pub struct SharedClock<C> {
    clock: C,
    state: Mutex<Cell<CalibrationState>>,
}

impl<C: UptimeClock> SharedClock<C> {
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            state: Mutex::new(Cell::new(CalibrationState::Uninitialized)),
        }
    }

    /// Replace the published calibration
    pub fn publish(&self, state: CalibrationState) {
        critical_section::with(|cs| self.state.borrow(cs).set(state));
        debug!("Published calibration state");
    }

    pub fn state(&self) -> CalibrationState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self.state(), CalibrationState::Calibrated { .. })
    }

    /// Current time-base milliseconds, or `None` before calibration
    pub fn now_ms(&self) -> Option<u64> {
        self.state().apply(self.clock.uptime_ms())
    }
}
