use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::{ParseError, consts::NEPAL_TZ};

/// Formats accepted for zone-less timestamps, tried in order
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Format accepted for bare civil dates
const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// An AD value that can be pinned to a calendar day in Nepal.
///
/// Zoned timestamps are moved to Asia/Kathmandu before their date is taken.
/// Zone-less values are read as Nepal wall-clock time, so a `NaiveDate` is
/// used as-is.
pub trait AdInput {
    /// The Asia/Kathmandu civil date of this value.
    ///
    /// # Errors
    /// Returns `ParseError` when the value cannot be read as a date.
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError>;
}

impl AdInput for NaiveDate {
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError> {
        Ok(*self)
    }
}

impl AdInput for NaiveDateTime {
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> AdInput for DateTime<Tz> {
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError> {
        Ok(self.with_timezone(&NEPAL_TZ).date_naive())
    }
}

/// RFC 3339 timestamps, zone-less `YYYY-MM-DD HH:MM:SS` timestamps, or
/// `YYYY-MM-DD` dates.
impl AdInput for str {
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
            return zoned.to_nepal_date();
        }

        if let Some(naive) = NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        {
            return naive.to_nepal_date();
        }

        NaiveDate::parse_from_str(trimmed, NAIVE_DATE_FORMAT)
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))
    }
}

impl AdInput for String {
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError> {
        self.as_str().to_nepal_date()
    }
}

impl<T: AdInput + ?Sized> AdInput for &T {
    fn to_nepal_date(&self) -> Result<NaiveDate, ParseError> {
        (**self).to_nepal_date()
    }
}
