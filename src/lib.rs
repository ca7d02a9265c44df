//! Bikram Sambat (BS) calendar with conversion to and from the Gregorian (AD)
//! calendar.
//!
//! The BS calendar has no arithmetic rule for month lengths, so every
//! conversion walks a fixed month-length table starting from one verified
//! AD/BS anchor pair. AD inputs are normalised to the Asia/Kathmandu civil
//! date before any day counting happens.
//!
//! ```
//! use bikram_sambat::{BsDate, convert_ad_to_bs, convert_bs_to_ad};
//! use chrono::NaiveDate;
//!
//! let ad = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let bs = convert_ad_to_bs(ad).unwrap();
//! assert_eq!(bs.to_string(), "2056-09-17");
//! assert_eq!(convert_bs_to_ad(&bs).unwrap(), ad);
//! ```

mod calendar;
mod consts;
mod format;
mod input;
mod prelude;
mod range;
mod stamp;
mod types;

pub use calendar::{Calendar, CalendarConfig, CalendarError};
pub use consts::*;
pub use format::BsFormat;
pub use input::AdInput;
pub use range::{BsDateRange, DateRangeError};
pub use stamp::{DualDate, StampSeed};
pub use types::Month;

use crate::prelude::*;
use chrono::{NaiveDate, Utc};
use std::str::FromStr;

/// A date in the Bikram Sambat calendar.
///
/// Values only exist after validation against a [`Calendar`], so the year
/// is inside the table, the month is `1..=12` and the day fits the month.
/// Ordering is chronological: year, then month, then day.
///
/// The conveniences that need a table (`FromStr`, `Deserialize`, [`succ`],
/// [`pred`], [`last_of_month`] and [`to_ad`]) use [`Calendar::bundled`].
/// Dates from a calendar loaded through [`CalendarConfig`] go through that
/// calendar instead: [`Calendar::parse`], [`Calendar::next_day`],
/// [`Calendar::bs_to_ad`], and `&Calendar` as a
/// [`DeserializeSeed`](serde::de::DeserializeSeed).
///
/// [`succ`]: BsDate::succ
/// [`pred`]: BsDate::pred
/// [`last_of_month`]: BsDate::last_of_month
/// [`to_ad`]: BsDate::to_ad
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct BsDate {
    year:  u16,
    month: u8,
    day:   u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be {}-{})", "_0", BAISAKH, CHAITRA)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "AD date {ad} came back as {back} after a BS round trip")]
    RoundTripMismatch { ad: NaiveDate, back: NaiveDate },
}

impl std::error::Error for ParseError {}

/// Failure of any conversion or validation.
///
/// The two kinds are kept apart so callers can tell "unsupported year" from
/// "invalid date" when rejecting a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The date falls outside the years covered by the calendar table.
    #[error("BS year {year} is outside the supported range {min}-{max}")]
    OutOfRange { year: i32, min: u16, max: u16 },

    /// The input is structurally malformed or not a real calendar date.
    #[error(transparent)]
    Invalid(#[from] ParseError),
}

impl DateError {
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl BsDate {
    /// Builds a date without validation. Callers inside the crate must have
    /// checked it against a calendar first.
    pub(crate) const fn from_parts(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a date validated against the bundled calendar.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the year is not in the table,
    /// `DateError::Invalid` if the month or day is not in the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        Calendar::bundled().date(year, month, day)
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month component (1 = Baisakh)
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        Month::from_valid(self.month)
    }

    /// Converts to database columns: (year, month, day)
    pub const fn to_columns(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Creates from database columns: (year, month, day)
    ///
    /// # Errors
    /// Same as [`BsDate::new`].
    pub fn from_columns(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        Self::new(year, month, day)
    }

    /// The following day, `None` past the end of the bundled table.
    pub fn succ(&self) -> Option<Self> {
        Calendar::bundled().next_day(self)
    }

    /// The preceding day, `None` before the start of the bundled table.
    pub fn pred(&self) -> Option<Self> {
        Calendar::bundled().prev_day(self)
    }

    /// Day 1 of this date's month
    pub const fn first_of_month(&self) -> Self {
        Self::from_parts(self.year, self.month, MIN_DAY)
    }

    /// Last day of this date's month in the bundled table.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the year is not in the bundled table.
    pub fn last_of_month(&self) -> Result<Self, DateError> {
        Calendar::bundled().last_of_month(self)
    }

    /// Converts this date to its AD civil date with the bundled calendar.
    ///
    /// # Errors
    /// See [`convert_bs_to_ad`].
    pub fn to_ad(&self) -> Result<NaiveDate, DateError> {
        Calendar::bundled().bs_to_ad(self)
    }

    /// Splits `YYYY-MM-DD` into numeric components without checking them
    /// against any calendar.
    pub(crate) fn parse_components(s: &str) -> Result<(u16, u8, u8), ParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} part(s) in {trimmed}",
                parts.len()
            )));
        };

        Ok((Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?))
    }

    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for BsDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Calendar::bundled().parse(s)
    }
}

impl TryFrom<(u16, u8, u8)> for BsDate {
    type Error = DateError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_columns(value.0, value.1, value.2)
    }
}

impl serde::Serialize for BsDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for BsDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Converts an AD date or timestamp to its BS date using the bundled
/// calendar. The input is first normalised to the Asia/Kathmandu civil date.
///
/// # Errors
/// `DateError::OutOfRange` when the result would leave the table,
/// `DateError::Invalid` when a string input cannot be parsed.
pub fn convert_ad_to_bs<T: AdInput>(ad: T) -> Result<BsDate, DateError> {
    Calendar::bundled().ad_to_bs(ad)
}

/// Like [`convert_ad_to_bs`], but an absent input yields `Ok(None)`.
///
/// # Errors
/// Same as [`convert_ad_to_bs`].
pub fn convert_ad_to_bs_opt<T: AdInput>(ad: Option<T>) -> Result<Option<BsDate>, DateError> {
    ad.map(convert_ad_to_bs::<T>).transpose()
}

/// Converts a BS date to its AD civil date using the bundled calendar.
///
/// # Errors
/// `DateError::OutOfRange` if the year is not in the table,
/// `DateError::Invalid` if the month or day is not in the calendar.
pub fn convert_bs_to_ad(bs: &BsDate) -> Result<NaiveDate, DateError> {
    Calendar::bundled().bs_to_ad(bs)
}

/// Parses a `YYYY-MM-DD` BS string and converts it to its AD civil date.
///
/// # Errors
/// Same as [`convert_bs_to_ad`], plus `DateError::Invalid` for malformed text.
pub fn convert_bs_str_to_ad(bs: &str) -> Result<NaiveDate, DateError> {
    let calendar = Calendar::bundled();
    calendar.bs_to_ad(&calendar.parse(bs)?)
}

/// Whether `bs` is a well-formed `YYYY-MM-DD` date inside the bundled table.
pub fn is_valid_bs_date(bs: &str) -> bool {
    Calendar::bundled().is_valid_str(bs)
}

/// Whether the components form a date inside the bundled table.
pub fn is_valid_bs_ymd(year: i64, month: i64, day: i64) -> bool {
    Calendar::bundled().is_valid_ymd(year, month, day)
}

/// Today's BS date, taken from the system clock in Nepal time.
///
/// # Errors
/// `DateError::OutOfRange` once the clock passes the end of the table.
pub fn current_bs_date() -> Result<BsDate, DateError> {
    convert_ad_to_bs(Utc::now())
}

/// Nepali rendering, e.g. `2056 साल 09 महिना 17 गते`.
pub fn format_bs_date(bs: &BsDate) -> String {
    bs.format(BsFormat::Nepali)
}

/// Like [`format_bs_date`], rendering an absent date as an empty string.
pub fn format_bs_date_opt(bs: Option<&BsDate>) -> String {
    bs.map(format_bs_date).unwrap_or_default()
}
