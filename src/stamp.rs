use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeSeed};

use crate::{BsDate, Calendar, DateError};

/// A record timestamp in both calendars: the instant in Nepal time and the
/// BS date it falls on. Stored next to transactions so they can be queried
/// by either column.
///
/// `Deserialize` checks the pair against the bundled calendar; use
/// [`Calendar::stamp_seed`] for stamps written by another calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDualDate")]
pub struct DualDate {
    ad: DateTime<FixedOffset>,
    bs: BsDate,
}

#[derive(Deserialize)]
struct RawDualDate {
    ad: DateTime<FixedOffset>,
    bs: String,
}

/// Deserializes a [`DualDate`] against a specific calendar.
#[derive(Debug, Clone, Copy)]
pub struct StampSeed<'a> {
    calendar: &'a Calendar,
}

impl<'a> StampSeed<'a> {
    pub(crate) const fn new(calendar: &'a Calendar) -> Self {
        Self { calendar }
    }
}

impl<'de> DeserializeSeed<'de> for StampSeed<'_> {
    type Value = DualDate;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawDualDate::deserialize(deserializer)?;
        self.calendar
            .parse_stamp(&raw.ad, &raw.bs)
            .map_err(serde::de::Error::custom)
    }
}

impl DualDate {
    pub(crate) const fn new(ad: DateTime<FixedOffset>, bs: BsDate) -> Self {
        Self { ad, bs }
    }

    /// Stamps the current instant.
    ///
    /// # Errors
    /// `DateError::OutOfRange` once the clock passes the end of the table.
    pub fn now() -> Result<Self, DateError> {
        Self::from_ad(&Utc::now())
    }

    /// Stamps `at` with the bundled calendar.
    ///
    /// # Errors
    /// `DateError::OutOfRange` when `at` falls outside the table.
    pub fn from_ad<Tz: TimeZone>(at: &DateTime<Tz>) -> Result<Self, DateError> {
        Calendar::bundled().stamp(at)
    }

    /// The instant, expressed in Nepal time
    pub const fn ad(&self) -> DateTime<FixedOffset> {
        self.ad
    }

    /// The BS date of the instant
    pub const fn bs(&self) -> BsDate {
        self.bs
    }
}

impl TryFrom<RawDualDate> for DualDate {
    type Error = DateError;

    fn try_from(raw: RawDualDate) -> Result<Self, Self::Error> {
        Calendar::bundled().parse_stamp(&raw.ad, &raw.bs)
    }
}
