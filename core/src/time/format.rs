//! Fixed-width text rendering of [`CalendarTime`]
//!
//! Every field is zero-padded by decimal digit extraction, so output width
//! never depends on the value. Years are rendered modulo 10000.
//!
//! | Form       | Layout                    | Width |
//! |------------|---------------------------|-------|
//! | date       | `MM/DD/YYYY`              | 10    |
//! | time       | `HH:MM:SS`                | 8     |
//! | time + ms  | `HH:MM:SS:mmm`            | 12    |
//! | full       | `MM/DD/YYYY HH:MM:SS:mmm` | 23    |

use core::fmt;

use heapless::String;

use super::calendar::CalendarTime;

/// Width of [`format_date`] output
pub const DATE_STR_LEN: usize = 10;
/// Width of [`format_time`] output
pub const TIME_STR_LEN: usize = 8;
/// Width of [`format_time_ms`] output
pub const TIME_MS_STR_LEN: usize = TIME_STR_LEN + 4;
/// Width of [`format_full`] output
pub const FULL_STR_LEN: usize = DATE_STR_LEN + 1 + TIME_MS_STR_LEN;

/// Write the lowest `out.len()` decimal digits of `value`
fn put_digits(out: &mut [u8], mut value: u32) {
    for slot in out.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

fn write_date(out: &mut [u8], t: &CalendarTime) {
    put_digits(&mut out[0..2], u32::from(t.month));
    out[2] = b'/';
    put_digits(&mut out[3..5], u32::from(t.day));
    out[5] = b'/';
    put_digits(&mut out[6..10], t.year);
}

fn write_time(out: &mut [u8], t: &CalendarTime) {
    put_digits(&mut out[0..2], u32::from(t.hour));
    out[2] = b':';
    put_digits(&mut out[3..5], u32::from(t.minute));
    out[5] = b':';
    put_digits(&mut out[6..8], u32::from(t.second));
}

fn write_time_ms(out: &mut [u8], t: &CalendarTime) {
    write_time(&mut out[..TIME_STR_LEN], t);
    out[TIME_STR_LEN] = b':';
    put_digits(&mut out[TIME_STR_LEN + 1..TIME_MS_STR_LEN], u32::from(t.millisecond));
}

fn write_full(out: &mut [u8], t: &CalendarTime) {
    write_date(&mut out[..DATE_STR_LEN], t);
    out[DATE_STR_LEN] = b' ';
    write_time_ms(&mut out[DATE_STR_LEN + 1..], t);
}

/// Buffers only ever hold ASCII digits and separators of exactly `N` bytes
fn ascii_string<const N: usize>(buf: [u8; N]) -> String<N> {
    buf.iter().map(|&b| char::from(b)).collect()
}

/// Render the date as `MM/DD/YYYY`
pub fn format_date(t: &CalendarTime) -> String<DATE_STR_LEN> {
    let mut buf = [0u8; DATE_STR_LEN];
    write_date(&mut buf, t);
    ascii_string(buf)
}

/// Render the time of day as `HH:MM:SS`
pub fn format_time(t: &CalendarTime) -> String<TIME_STR_LEN> {
    let mut buf = [0u8; TIME_STR_LEN];
    write_time(&mut buf, t);
    ascii_string(buf)
}

/// Render the time of day as `HH:MM:SS:mmm`
pub fn format_time_ms(t: &CalendarTime) -> String<TIME_MS_STR_LEN> {
    let mut buf = [0u8; TIME_MS_STR_LEN];
    write_time_ms(&mut buf, t);
    ascii_string(buf)
}

/// Render date and time as `MM/DD/YYYY HH:MM:SS:mmm`
pub fn format_full(t: &CalendarTime) -> String<FULL_STR_LEN> {
    let mut buf = [0u8; FULL_STR_LEN];
    write_full(&mut buf, t);
    ascii_string(buf)
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_full(self))
    }
}
