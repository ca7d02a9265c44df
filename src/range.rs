use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AdInput, BsDate, Calendar, DateError, RANGE_SEPARATOR, prelude::*};

/// An inclusive range of BS dates, e.g. the bounds of a ledger statement.
/// The start date must be less than or equal to the end date.
///
/// `FromStr`, `Deserialize`, [`BsDateRange::to_ad`] and
/// [`BsDateRange::len_days`] use the bundled calendar; the `_in` variants
/// take a specific one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct BsDateRange {
    start: BsDate,
    end:   BsDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    Inverted { start: BsDate, end: BsDate },

    /// One of the bounds failed to convert or validate.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl BsDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `DateRangeError::Inverted` if start > end.
    pub fn new(start: BsDate, end: BsDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Converts AD query bounds to BS bounds with the bundled calendar.
    ///
    /// # Errors
    /// `DateRangeError::Date` if either bound cannot be converted,
    /// `DateRangeError::Inverted` if the end falls before the start.
    pub fn from_ad<S: AdInput, E: AdInput>(start: S, end: E) -> Result<Self, DateRangeError> {
        Self::from_ad_in(Calendar::bundled(), start, end)
    }

    /// Converts AD query bounds to BS bounds with `calendar`.
    ///
    /// # Errors
    /// Same as [`BsDateRange::from_ad`].
    pub fn from_ad_in<S: AdInput, E: AdInput>(
        calendar: &Calendar,
        start: S,
        end: E,
    ) -> Result<Self, DateRangeError> {
        let start = calendar.ad_to_bs(start)?;
        let end = calendar.ad_to_bs(end)?;
        Self::new(start, end)
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> BsDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> BsDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (BsDate, BsDate) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &BsDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range overlaps with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Parses `START/END` with both bounds validated against `calendar`.
    ///
    /// # Errors
    /// `DateRangeError::InvalidFormat` unless there is exactly one separator,
    /// `DateRangeError::Date` for a bad bound, `DateRangeError::Inverted`
    /// if the end falls before the start.
    pub fn parse_in(calendar: &Calendar, s: &str) -> Result<Self, DateRangeError> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(DateRangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    DateRangeError::InvalidFormat(format!(
                        "Separator '{RANGE_SEPARATOR}' not found despite count == 1"
                    ))
                })?;

                let start = calendar.parse(start_str)?;
                let end = calendar.parse(end_str)?;

                Self::new(start, end)
            },
            _ => Err(DateRangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }

    /// The AD civil dates of both bounds with the bundled calendar.
    ///
    /// # Errors
    /// See [`crate::convert_bs_to_ad`].
    pub fn to_ad(&self) -> Result<(NaiveDate, NaiveDate), DateError> {
        self.to_ad_in(Calendar::bundled())
    }

    /// The AD civil dates of both bounds with `calendar`.
    ///
    /// # Errors
    /// See [`Calendar::bs_to_ad`].
    pub fn to_ad_in(&self, calendar: &Calendar) -> Result<(NaiveDate, NaiveDate), DateError> {
        Ok((calendar.bs_to_ad(&self.start)?, calendar.bs_to_ad(&self.end)?))
    }

    /// Number of days in the range, counting both ends.
    ///
    /// # Errors
    /// See [`crate::convert_bs_to_ad`].
    pub fn len_days(&self) -> Result<i64, DateError> {
        self.len_days_in(Calendar::bundled())
    }

    /// Number of days in the range under `calendar`, counting both ends.
    ///
    /// # Errors
    /// See [`Calendar::bs_to_ad`].
    pub fn len_days_in(&self, calendar: &Calendar) -> Result<i64, DateError> {
        let (start, end) = self.to_ad_in(calendar)?;
        Ok(end.signed_duration_since(start).num_days() + 1)
    }

    /// Bounds as `YYYY-MM-DD` strings, for filtering a BS date column with
    /// `BETWEEN`. Zero padding keeps string order chronological.
    pub fn to_columns(&self) -> (String, String) {
        (self.start.to_string(), self.end.to_string())
    }
}

impl FromStr for BsDateRange {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_in(Calendar::bundled(), s)
    }
}

impl Serialize for BsDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BsDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
