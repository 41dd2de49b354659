//! Calendar decomposition of time-base milliseconds
//!
//! All values handled here are milliseconds elapsed since the time-base
//! epoch, 2024-01-01 00:00:00.000 local civil time. There is no time zone
//! math: the device displays a single fixed civil calendar.
//!
//! `decompose` walks years and months from the base year, which keeps the
//! code obviously correct on small targets. Whole 400-year Gregorian
//! cycles are skipped first, so the year walk never takes more than 400
//! iterations regardless of input.
//!
//! The inverse (`CalendarTime::to_elapsed_ms`) uses Howard Hinnant's
//! `days_from_civil` algorithm.
//! Reference: http://howardhinnant.github.io/date_algorithms.html

/// First year of the time base
pub const BASE_YEAR: u32 = 2024;

/// Unix timestamp (seconds) of the time-base epoch
///
/// 2024-01-01 00:00 local civil time on the reference time server.
pub const EPOCH_UNIX_SECS: u64 = 1_704_063_600;

/// Unix timestamp (milliseconds) of the time-base epoch
pub const EPOCH_UNIX_MS: u64 = EPOCH_UNIX_SECS * 1000;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_DAY: u64 = 86_400_000;

/// Days in a full Gregorian cycle of 400 years
const DAYS_PER_400_YEARS: u64 = 146_097;

/// Month lengths for a common year, January first
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Structured calendar time
///
/// Always produced fresh from a millisecond count by [`decompose`] or
/// validated by [`CalendarTime::from_civil`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarTime {
    /// Milliseconds (0-999)
    pub millisecond: u16,
    /// Seconds (0-59)
    pub second: u8,
    /// Minutes (0-59)
    pub minute: u8,
    /// Hours (0-23)
    pub hour: u8,
    /// Zero-based day of the year (0-365)
    pub day_of_year: u16,
    /// Day of the month (1-31)
    pub day: u8,
    /// Month (1-12)
    pub month: u8,
    /// Calendar year (2024 and later)
    pub year: u32,
}

impl CalendarTime {
    /// Build a calendar time from civil fields
    ///
    /// Returns `None` if any field is out of range or the date lies
    /// before the time-base epoch. `day_of_year` is derived.
    pub fn from_civil(
        year: u32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Option<Self> {
        if year < BASE_YEAR
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
            || millisecond > 999
        {
            return None;
        }

        let day_of_year = (1..month)
            .map(|m| u16::from(days_in_month(year, m)))
            .sum::<u16>()
            + u16::from(day)
            - 1;

        Some(Self {
            millisecond,
            second,
            minute,
            hour,
            day_of_year,
            day,
            month,
            year,
        })
    }

    /// Reconstruct milliseconds since the time-base epoch
    ///
    /// Inverse of [`decompose`]. Returns `None` for dates before the epoch
    /// or results that do not fit in `u64`.
    pub fn to_elapsed_ms(&self) -> Option<u64> {
        let days = days_from_civil(self.year, self.month, self.day)
            - days_from_civil(BASE_YEAR, 1, 1);
        let days = u64::try_from(days).ok()?;

        let ms_of_day = ((u64::from(self.hour) * 60 + u64::from(self.minute)) * 60
            + u64::from(self.second))
            * MS_PER_SECOND
            + u64::from(self.millisecond);

        days.checked_mul(MS_PER_DAY)?.checked_add(ms_of_day)
    }
}

/// Check if year is a leap year (Gregorian calendar)
///
/// Correctly implements standard leap year rules:
/// - Divisible by 4: leap year
/// - EXCEPT divisible by 100: not a leap year
/// - EXCEPT divisible by 400: leap year
///
/// Examples:
/// - 2000: leap (divisible by 400)
/// - 2024: leap (divisible by 4, not by 100)
/// - 2100: NOT leap (divisible by 100 but not 400)
pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`
pub fn days_in_year(year: u32) -> u64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in `month` (1-12) of `year`
///
/// Returns 0 for an out-of-range month.
pub fn days_in_month(year: u32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[usize::from(month - 1)],
        _ => 0,
    }
}

/// Decompose milliseconds since the time-base epoch into calendar fields
///
/// Pure and total over `u64`.
pub fn decompose(elapsed_ms: u64) -> CalendarTime {
    let millisecond = (elapsed_ms % 1000) as u16;
    let secs = elapsed_ms / 1000;
    let second = (secs % 60) as u8;
    let mins = secs / 60;
    let minute = (mins % 60) as u8;
    let hours = mins / 60;
    let hour = (hours % 24) as u8;
    let mut days = hours / 24;

    // Any 400 consecutive Gregorian years have the same length
    let mut year = BASE_YEAR + ((days / DAYS_PER_400_YEARS) * 400) as u32;
    days %= DAYS_PER_400_YEARS;

    loop {
        let year_len = days_in_year(year);
        if days < year_len {
            break;
        }
        days -= year_len;
        year += 1;
    }

    let day_of_year = days as u16;

    let mut rem = day_of_year;
    let mut month = 1u8;
    while month < 12 {
        let month_len = u16::from(days_in_month(year, month));
        if rem < month_len {
            break;
        }
        rem -= month_len;
        month += 1;
    }

    CalendarTime {
        millisecond,
        second,
        minute,
        hour,
        day_of_year,
        day: (rem + 1) as u8,
        month,
        year,
    }
}

/// Convert Unix seconds to milliseconds since the time-base epoch
///
/// Instants before the epoch saturate to 0.
pub fn unix_secs_to_elapsed_ms(unix_secs: u64) -> u64 {
    unix_secs
        .saturating_sub(EPOCH_UNIX_SECS)
        .saturating_mul(MS_PER_SECOND)
}

/// Convert milliseconds since the time-base epoch to Unix seconds
///
/// Sub-second precision is truncated.
pub fn elapsed_ms_to_unix_secs(elapsed_ms: u64) -> u64 {
    (elapsed_ms / MS_PER_SECOND).saturating_add(EPOCH_UNIX_SECS)
}

/// Convert civil date (year, month, day) to days since 1970-01-01
///
/// Howard Hinnant's days_from_civil algorithm.
/// Reference: http://howardhinnant.github.io/date_algorithms.html
///
/// Only differences of two results are used, so the reference day does
/// not leak out of this module.
fn days_from_civil(year: u32, month: u8, day: u8) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);
    let d = i64::from(day);

    // Adjust year and month to make March = month 0, February = month 11
    let (y, m) = if m <= 2 { (y - 1, m + 9) } else { (y, m - 3) };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // year of era [0, 399]
    let doy = (153 * m + 2) / 5 + d - 1; // day of year [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era [0, 146096]

    era * 146_097 + doe - 719_468 // 719468 = days from 0000-03-01 to 1970-01-01
}
