use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeSeed};

use crate::{
    AdInput, BsDate, DateError, DualDate, ParseError, StampSeed,
    consts::{
        ANCHOR_AD, ANCHOR_BS, BAISAKH, BS_MONTH_DAYS, BS_TABLE_FIRST_YEAR, CHAITRA, MAX_MONTH_DAYS,
        MIN_DAY, MONTHS_PER_YEAR, NEPAL_TZ,
    },
};

type MonthRow = [u8; MONTHS_PER_YEAR];

const BUNDLED_ANCHOR_AD: NaiveDate = match NaiveDate::from_ymd_opt(
    ANCHOR_AD.0,
    ANCHOR_AD.1,
    ANCHOR_AD.2,
) {
    Some(date) => date,
    None => panic!("bundled AD anchor is not a Gregorian date"),
};

static BUNDLED: Calendar = Calendar {
    first_year: BS_TABLE_FIRST_YEAR,
    months:     Cow::Borrowed(&BS_MONTH_DAYS),
    anchor_ad:  BUNDLED_ANCHOR_AD,
    anchor_bs:  BsDate::from_parts(ANCHOR_BS.0, ANCHOR_BS.1, ANCHOR_BS.2),
};

/// A Bikram Sambat calendar: a contiguous table of month lengths plus one
/// AD/BS anchor pair inside it.
///
/// The supported year range is derived from the table. [`Calendar::bundled`]
/// covers 2056-2090 BS; longer tables can be loaded from configuration
/// through [`CalendarConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CalendarConfig", into = "CalendarConfig")]
pub struct Calendar {
    first_year: u16,
    months:     Cow<'static, [MonthRow]>,
    anchor_ad:  NaiveDate,
    anchor_bs:  BsDate,
}

/// Serialized form of a [`Calendar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// BS year of the first table row
    pub first_year: u16,
    /// Month lengths, one row of twelve per year
    pub months:     Vec<MonthRow>,
    /// AD half of the anchor pair
    #[serde(default = "default_anchor_ad")]
    pub anchor_ad:  NaiveDate,
    /// BS half of the anchor pair, `YYYY-MM-DD`
    #[serde(default = "default_anchor_bs")]
    pub anchor_bs:  String,
}

const fn default_anchor_ad() -> NaiveDate {
    BUNDLED_ANCHOR_AD
}

fn default_anchor_bs() -> String {
    BUNDLED.anchor_bs.to_string()
}

/// Error building a [`Calendar`] from table data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Calendar table has no years")]
    EmptyTable,

    #[error(
        "Calendar table starting at {first_year} with {years} years runs past year {}",
        u16::MAX
    )]
    YearOverflow { first_year: u16, years: usize },

    #[error("Month length {days} for {year}-{month:02} must be 1-{}", MAX_MONTH_DAYS)]
    InvalidMonthLength { year: u16, month: u8, days: u8 },

    #[error("Invalid anchor: {0}")]
    InvalidAnchor(#[source] DateError),
}

impl Calendar {
    /// The embedded 2056-2090 BS table anchored at 2000-01-01 = 2056-09-17.
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Builds a calendar from a table and anchor pair.
    ///
    /// # Errors
    /// Returns `CalendarError` if the table is empty, runs past `u16::MAX`,
    /// holds a month length outside `1..=32`, or the BS anchor is not a
    /// valid date in the table.
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        let CalendarConfig {
            first_year,
            months,
            anchor_ad,
            anchor_bs,
        } = config;

        if months.is_empty() {
            return Err(CalendarError::EmptyTable);
        }

        let years = months.len();
        let last_year = u16::try_from(years - 1)
            .ok()
            .and_then(|span| first_year.checked_add(span))
            .ok_or(CalendarError::YearOverflow { first_year, years })?;

        for (year, row) in (first_year..=last_year).zip(&months) {
            for (month, &days) in (BAISAKH..=CHAITRA).zip(row) {
                if days == 0 || days > MAX_MONTH_DAYS {
                    return Err(CalendarError::InvalidMonthLength { year, month, days });
                }
            }
        }

        let (year, month, day) = BsDate::parse_components(&anchor_bs)
            .map_err(|err| CalendarError::InvalidAnchor(err.into()))?;

        let mut calendar = Self {
            first_year,
            months: Cow::Owned(months),
            anchor_ad,
            anchor_bs: BsDate::from_parts(year, month, day),
        };
        calendar.anchor_bs = calendar
            .date(year, month, day)
            .map_err(CalendarError::InvalidAnchor)?;

        Ok(calendar)
    }

    /// First BS year in the table
    pub const fn min_year(&self) -> u16 {
        self.first_year
    }

    /// Last BS year in the table (inclusive)
    pub fn max_year(&self) -> u16 {
        // Construction guarantees the span fits in u16.
        let span = u16::try_from(self.months.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.first_year.saturating_add(span)
    }

    pub fn contains_year(&self, year: u16) -> bool {
        (self.min_year()..=self.max_year()).contains(&year)
    }

    /// The AD half of the anchor pair
    pub const fn anchor_ad(&self) -> NaiveDate {
        self.anchor_ad
    }

    /// The BS half of the anchor pair
    pub const fn anchor_bs(&self) -> BsDate {
        self.anchor_bs
    }

    /// Baisakh 1 of the first table year
    pub const fn first_date(&self) -> BsDate {
        BsDate::from_parts(self.first_year, BAISAKH, MIN_DAY)
    }

    /// Last day of Chaitra in the last table year
    pub fn last_date(&self) -> BsDate {
        let year = self.max_year();
        let days = self.row(year).map_or(MIN_DAY, |row| row[usize::from(CHAITRA - 1)]);
        BsDate::from_parts(year, CHAITRA, days)
    }

    /// Earliest AD date this calendar can convert
    ///
    /// # Errors
    /// Only if the table spans more days than `NaiveDate` can represent.
    pub fn first_ad_date(&self) -> Result<NaiveDate, DateError> {
        self.bs_to_ad(&self.first_date())
    }

    /// Latest AD date this calendar can convert
    ///
    /// # Errors
    /// Only if the table spans more days than `NaiveDate` can represent.
    pub fn last_ad_date(&self) -> Result<NaiveDate, DateError> {
        self.bs_to_ad(&self.last_date())
    }

    fn out_of_range(&self, year: i32) -> DateError {
        DateError::OutOfRange {
            year,
            min: self.min_year(),
            max: self.max_year(),
        }
    }

    fn row(&self, year: u16) -> Result<&MonthRow, DateError> {
        year.checked_sub(self.first_year)
            .and_then(|index| self.months.get(usize::from(index)))
            .ok_or_else(|| self.out_of_range(i32::from(year)))
    }

    /// Number of days in a BS month.
    ///
    /// # Errors
    /// `DateError::OutOfRange` for years outside the table,
    /// `DateError::Invalid` for months outside `1..=12`.
    pub fn days_in_month(&self, year: u16, month: u8) -> Result<u8, DateError> {
        let row = self.row(year)?;
        if !(BAISAKH..=CHAITRA).contains(&month) {
            return Err(ParseError::InvalidMonth(month).into());
        }
        Ok(row[usize::from(month - BAISAKH)])
    }

    /// Number of days in a BS year.
    ///
    /// # Errors
    /// `DateError::OutOfRange` for years outside the table.
    pub fn days_in_year(&self, year: u16) -> Result<u16, DateError> {
        Ok(self.row(year)?.iter().map(|&days| u16::from(days)).sum())
    }

    /// Validates the components and builds a date.
    ///
    /// The year is checked first, so an unsupported year is always reported
    /// as `OutOfRange` even when the month or day is also wrong.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the year is not in the table,
    /// `DateError::Invalid` if the month or day is not in the calendar.
    pub fn date(&self, year: u16, month: u8, day: u8) -> Result<BsDate, DateError> {
        let max_day = self.days_in_month(year, month)?;
        if day < MIN_DAY || day > max_day {
            return Err(ParseError::InvalidDay { year, month, day }.into());
        }
        Ok(BsDate::from_parts(year, month, day))
    }

    /// Parses and validates a `YYYY-MM-DD` BS date.
    ///
    /// # Errors
    /// `DateError::Invalid` for malformed text, otherwise as [`Calendar::date`].
    pub fn parse(&self, s: &str) -> Result<BsDate, DateError> {
        let (year, month, day) = BsDate::parse_components(s)?;
        self.date(year, month, day)
    }

    /// Whether `s` is a well-formed `YYYY-MM-DD` date inside this table.
    pub fn is_valid_str(&self, s: &str) -> bool {
        self.parse(s).is_ok()
    }

    /// Whether the components form a date inside this table. Values that do
    /// not fit the component types are simply invalid.
    pub fn is_valid_ymd(&self, year: i64, month: i64, day: i64) -> bool {
        match (u16::try_from(year), u8::try_from(month), u8::try_from(day)) {
            (Ok(year), Ok(month), Ok(day)) => self.date(year, month, day).is_ok(),
            _ => false,
        }
    }

    /// Next BS month, failing past the last table year.
    fn next_month(&self, year: u16, month: u8) -> Result<(u16, u8), DateError> {
        if month < CHAITRA {
            return Ok((year, month + 1));
        }
        if year >= self.max_year() {
            return Err(self.out_of_range(i32::from(year) + 1));
        }
        Ok((year + 1, BAISAKH))
    }

    /// Previous BS month, failing before the first table year.
    fn prev_month(&self, year: u16, month: u8) -> Result<(u16, u8), DateError> {
        if month > BAISAKH {
            return Ok((year, month - 1));
        }
        if year <= self.min_year() {
            return Err(self.out_of_range(i32::from(year) - 1));
        }
        Ok((year - 1, CHAITRA))
    }

    /// The following day, `None` past the end of the table.
    pub fn next_day(&self, date: &BsDate) -> Option<BsDate> {
        let max = self.days_in_month(date.year(), date.month()).ok()?;
        if date.day() < max {
            return Some(BsDate::from_parts(date.year(), date.month(), date.day() + 1));
        }
        let (year, month) = self.next_month(date.year(), date.month()).ok()?;
        Some(BsDate::from_parts(year, month, MIN_DAY))
    }

    /// The preceding day, `None` before the start of the table.
    pub fn prev_day(&self, date: &BsDate) -> Option<BsDate> {
        if date.day() > MIN_DAY {
            return Some(BsDate::from_parts(date.year(), date.month(), date.day() - 1));
        }
        let (year, month) = self.prev_month(date.year(), date.month()).ok()?;
        let day = self.days_in_month(year, month).ok()?;
        Some(BsDate::from_parts(year, month, day))
    }

    /// Last day of the month `date` falls in.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the year is not in the table.
    pub fn last_of_month(&self, date: &BsDate) -> Result<BsDate, DateError> {
        let day = self.days_in_month(date.year(), date.month())?;
        Ok(BsDate::from_parts(date.year(), date.month(), day))
    }

    /// Days from Baisakh 1 of the first table year to `date`.
    /// `date` must already be valid for this calendar.
    fn ordinal(&self, date: &BsDate) -> i64 {
        let index = usize::from(date.year() - self.first_year);
        let years: i64 = self.months[..index]
            .iter()
            .flat_map(|row| row.iter())
            .map(|&days| i64::from(days))
            .sum();
        let months: i64 = self.months[index][..usize::from(date.month() - BAISAKH)]
            .iter()
            .map(|&days| i64::from(days))
            .sum();
        years + months + i64::from(date.day() - MIN_DAY)
    }

    /// Converts an AD input to its BS date. The input is normalised to the
    /// Asia/Kathmandu civil date first.
    ///
    /// # Errors
    /// `DateError::OutOfRange` when the result would leave the table,
    /// `DateError::Invalid` when the input cannot be read as a date.
    pub fn ad_to_bs<T: AdInput>(&self, ad: T) -> Result<BsDate, DateError> {
        let civil = ad.to_nepal_date()?;
        self.civil_to_bs(civil)
    }

    /// Converts a Nepal civil date to BS by walking months away from the
    /// anchor, forward or backward.
    pub(crate) fn civil_to_bs(&self, civil: NaiveDate) -> Result<BsDate, DateError> {
        let diff_days = civil.signed_duration_since(self.anchor_ad).num_days();
        tracing::trace!(%civil, diff_days, "converting AD to BS");

        self.walk_from_anchor(diff_days).inspect_err(|err| {
            tracing::debug!(%civil, %err, "AD date has no BS equivalent in the table");
        })
    }

    fn walk_from_anchor(&self, mut diff_days: i64) -> Result<BsDate, DateError> {
        let mut year = self.anchor_bs.year();
        let mut month = self.anchor_bs.month();
        let mut day = i64::from(self.anchor_bs.day());

        while diff_days > 0 {
            let remaining = i64::from(self.days_in_month(year, month)?) - day + 1;
            if diff_days >= remaining {
                diff_days -= remaining;
                (year, month) = self.next_month(year, month)?;
                day = i64::from(MIN_DAY);
            } else {
                day += diff_days;
                diff_days = 0;
            }
        }

        while diff_days < 0 {
            if -diff_days < day {
                day += diff_days;
                diff_days = 0;
            } else {
                diff_days += day;
                (year, month) = self.prev_month(year, month)?;
                day = i64::from(self.days_in_month(year, month)?);
            }
        }

        let day = u8::try_from(day).map_err(|_| ParseError::InvalidFormat(format!("day {day}")))?;
        self.date(year, month, day)
    }

    /// Converts a BS date to its AD civil date.
    ///
    /// The date is re-validated against this calendar, year first, so a date
    /// built from another table cannot produce a silent wrong answer.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the year is not in the table,
    /// `DateError::Invalid` if the month or day is not in the calendar.
    pub fn bs_to_ad(&self, bs: &BsDate) -> Result<NaiveDate, DateError> {
        let date = self.date(bs.year(), bs.month(), bs.day())?;
        let offset = self.ordinal(&date) - self.ordinal(&self.anchor_bs);
        tracing::trace!(%date, offset, "converting BS to AD");

        self.anchor_ad
            .checked_add_signed(TimeDelta::days(offset))
            .ok_or_else(|| self.out_of_range(i32::from(date.year())))
    }

    /// Converts an AD input to BS and back, failing if the calendar day does
    /// not survive. Used before persisting a transaction date.
    ///
    /// # Errors
    /// As [`Calendar::ad_to_bs`], plus `ParseError::RoundTripMismatch`.
    pub fn check_round_trip<T: AdInput>(&self, ad: T) -> Result<BsDate, DateError> {
        let civil = ad.to_nepal_date()?;
        let bs = self.civil_to_bs(civil)?;
        let back = self.bs_to_ad(&bs)?;
        if back != civil {
            tracing::debug!(%civil, %back, "BS round trip changed the calendar day");
            return Err(ParseError::RoundTripMismatch { ad: civil, back }.into());
        }
        Ok(bs)
    }

    /// Stamps an instant with its Nepal-time timestamp and BS date.
    ///
    /// # Errors
    /// `DateError::OutOfRange` when the instant is outside the table.
    pub fn stamp<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Result<DualDate, DateError> {
        let local = at.with_timezone(&NEPAL_TZ);
        let bs = self.civil_to_bs(local.date_naive())?;
        Ok(DualDate::new(local.fixed_offset(), bs))
    }

    /// Rebuilds a stored stamp, checking that `bs` is the BS date of `ad`
    /// in this calendar. The timestamp comes back in Nepal time whatever
    /// offset it was stored with.
    ///
    /// # Errors
    /// As [`Calendar::parse`] and [`Calendar::stamp`], plus
    /// `DateError::Invalid` when the two halves disagree.
    pub fn parse_stamp(&self, ad: &DateTime<FixedOffset>, bs: &str) -> Result<DualDate, DateError> {
        let bs = self.parse(bs)?;
        let stamped = self.stamp(ad)?;
        if stamped.bs() != bs {
            return Err(ParseError::InvalidFormat(format!(
                "BS date {bs} does not match AD timestamp {ad}"
            ))
            .into());
        }
        Ok(stamped)
    }

    /// Deserializes a [`DualDate`] against this calendar instead of the
    /// bundled one.
    pub const fn stamp_seed(&self) -> StampSeed<'_> {
        StampSeed::new(self)
    }
}

/// Deserializes a `YYYY-MM-DD` [`BsDate`] validated against this calendar.
impl<'de> DeserializeSeed<'de> for &Calendar {
    type Value = BsDate;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        self.parse(&s).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<CalendarConfig> for Calendar {
    type Error = CalendarError;

    fn try_from(config: CalendarConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl From<Calendar> for CalendarConfig {
    fn from(calendar: Calendar) -> Self {
        Self {
            first_year: calendar.first_year,
            months:     calendar.months.into_owned(),
            anchor_ad:  calendar.anchor_ad,
            anchor_bs:  calendar.anchor_bs.to_string(),
        }
    }
}

impl Default for Calendar {
    fn default() -> Self {
        BUNDLED.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ad, bs};

    fn config(first_year: u16, months: Vec<MonthRow>, anchor_bs: &str) -> CalendarConfig {
        CalendarConfig {
            first_year,
            months,
            anchor_ad: ad(2000, 1, 1),
            anchor_bs: anchor_bs.to_owned(),
        }
    }

    #[test]
    fn test_bundled_range_derived_from_table() {
        let calendar = Calendar::bundled();
        assert_eq!(calendar.min_year(), 2056);
        assert_eq!(calendar.max_year(), 2090);
        assert!(calendar.contains_year(2056));
        assert!(calendar.contains_year(2090));
        assert!(!calendar.contains_year(2055));
        assert!(!calendar.contains_year(2091));
        assert_eq!(calendar.first_date(), bs(2056, 1, 1));
        assert_eq!(calendar.last_date(), bs(2090, 12, 31));
        assert_eq!(calendar.first_ad_date(), Ok(ad(1999, 4, 14)));
        assert_eq!(calendar.last_ad_date(), Ok(ad(2034, 4, 13)));
    }

    #[test]
    fn test_anchor() {
        let calendar = Calendar::bundled();
        assert_eq!(calendar.anchor_ad(), ad(2000, 1, 1));
        assert_eq!(calendar.anchor_bs(), bs(2056, 9, 17));
    }

    #[test]
    fn test_days_in_month_and_year() {
        let calendar = Calendar::bundled();
        assert_eq!(calendar.days_in_month(2056, 9), Ok(30));
        assert_eq!(calendar.days_in_month(2070, 4), Ok(32));
        assert_eq!(
            calendar.days_in_month(2056, 13),
            Err(DateError::Invalid(ParseError::InvalidMonth(13)))
        );
        assert!(calendar.days_in_month(2091, 1).expect_err("out of table").is_out_of_range());

        assert_eq!(calendar.days_in_year(2056), Ok(365));
        assert_eq!(calendar.days_in_year(2058), Ok(366));
        assert!(calendar.days_in_year(2000).expect_err("out of table").is_out_of_range());
    }

    #[test]
    fn test_year_checked_before_month_and_day() {
        let err = Calendar::bundled()
            .date(2200, 13, 40)
            .expect_err("every component is wrong");
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_forward_walk_crosses_years() {
        let calendar = Calendar::bundled();
        // 2056 Poush 17 + 365 days
        let date = calendar.civil_to_bs(ad(2000, 12, 31)).expect("converts");
        assert_eq!(date.to_ad(), Ok(ad(2000, 12, 31)));
        assert_eq!(date.year(), 2057);
    }

    #[test]
    fn test_backward_walk() {
        struct TestCase {
            ad: NaiveDate,
            bs: BsDate,
        }

        let cases = [
            TestCase {
                ad: ad(1999, 12, 31),
                bs: bs(2056, 9, 16),
            },
            TestCase {
                ad: ad(1999, 12, 16),
                bs: bs(2056, 9, 1),
            },
            TestCase {
                ad: ad(1999, 12, 15),
                bs: bs(2056, 8, 29),
            },
            TestCase {
                ad: ad(1999, 4, 14),
                bs: bs(2056, 1, 1),
            },
        ];

        for case in &cases {
            assert_eq!(Calendar::bundled().civil_to_bs(case.ad), Ok(case.bs), "{}", case.ad);
        }

        let err = Calendar::bundled()
            .civil_to_bs(ad(1999, 4, 13))
            .expect_err("before Baisakh 2056");
        assert_eq!(
            err,
            DateError::OutOfRange {
                year: 2055,
                min: 2056,
                max: 2090
            }
        );
    }

    #[test]
    fn test_forward_walk_reports_year_past_table() {
        let err = Calendar::bundled()
            .civil_to_bs(ad(2034, 4, 14))
            .expect_err("after Chaitra 2090");
        assert_eq!(
            err,
            DateError::OutOfRange {
                year: 2091,
                min: 2056,
                max: 2090
            }
        );
    }

    #[test]
    fn test_round_trip_check() {
        let calendar = Calendar::bundled();
        assert_eq!(calendar.check_round_trip(ad(2024, 10, 1)), Ok(bs(2081, 6, 15)));
        assert!(calendar.check_round_trip(ad(2040, 1, 1)).expect_err("outside").is_out_of_range());
        assert!(calendar.check_round_trip("not a date").expect_err("garbage").is_invalid());
    }

    #[test]
    fn test_next_and_prev_day() {
        let calendar = Calendar::bundled();
        assert_eq!(calendar.next_day(&bs(2056, 9, 30)), Some(bs(2056, 10, 1)));
        assert_eq!(calendar.prev_day(&bs(2056, 10, 1)), Some(bs(2056, 9, 30)));
        assert_eq!(calendar.next_day(&calendar.last_date()), None);
        assert_eq!(calendar.prev_day(&calendar.first_date()), None);
    }

    #[test]
    fn test_custom_table() {
        let months = vec![[30; MONTHS_PER_YEAR], [31; MONTHS_PER_YEAR]];
        let calendar = Calendar::new(config(3000, months, "3000-01-01")).expect("valid table");
        assert_eq!(calendar.min_year(), 3000);
        assert_eq!(calendar.max_year(), 3001);
        assert_eq!(calendar.days_in_year(3000), Ok(360));

        assert_eq!(calendar.ad_to_bs(ad(2000, 1, 31)), calendar.date(3000, 2, 1));
        assert_eq!(calendar.ad_to_bs(ad(2000, 12, 26)), calendar.date(3001, 1, 1));
        assert_eq!(
            calendar.date(3001, 1, 1).and_then(|date| calendar.bs_to_ad(&date)),
            Ok(ad(2000, 12, 26))
        );
        assert!(calendar.ad_to_bs(ad(1999, 12, 31)).expect_err("before").is_out_of_range());

        // Dates validated against the bundled table are rechecked here
        assert!(calendar.bs_to_ad(&bs(2056, 9, 17)).expect_err("foreign year").is_out_of_range());
    }

    #[test]
    fn test_last_of_month() {
        let calendar = Calendar::bundled();
        assert_eq!(calendar.last_of_month(&bs(2070, 4, 12)), Ok(bs(2070, 4, 32)));
        assert_eq!(calendar.last_of_month(&bs(2090, 12, 1)), Ok(bs(2090, 12, 31)));

        let extended = extended_calendar();
        let beyond = extended.date(2091, 3, 5).expect("inside the extended table");
        assert_eq!(extended.last_of_month(&beyond), extended.date(2091, 3, 32));
        assert!(calendar.last_of_month(&beyond).expect_err("2091 not bundled").is_out_of_range());
    }

    /// The bundled table plus one more year.
    fn extended_calendar() -> Calendar {
        let mut months = BS_MONTH_DAYS.to_vec();
        months.push([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30]);
        Calendar::new(config(2056, months, "2056-09-17")).expect("valid table")
    }

    #[test]
    fn test_extended_table_conversions() {
        let calendar = extended_calendar();
        assert_eq!(calendar.max_year(), 2091);

        let date = calendar.date(2091, 3, 5).expect("inside the extended table");
        assert_eq!(calendar.bs_to_ad(&date), Ok(ad(2034, 6, 19)));
        assert_eq!(calendar.ad_to_bs(ad(2034, 6, 19)), Ok(date));
        assert_eq!(calendar.next_day(&date), calendar.date(2091, 3, 6).ok());
        assert_eq!(calendar.prev_day(&date), calendar.date(2091, 3, 4).ok());
        assert_eq!(
            calendar.next_day(&bs(2090, 12, 31)),
            calendar.date(2091, 1, 1).ok()
        );

        // Anything built from the extended table still converts identically
        // inside the bundled range
        assert_eq!(calendar.bs_to_ad(&bs(2081, 6, 15)), Ok(ad(2024, 10, 1)));
    }

    #[test]
    fn test_deserialize_date_with_calendar() {
        let calendar = extended_calendar();
        let date = calendar.date(2091, 3, 5).expect("inside the extended table");
        let json = serde_json::to_string(&date).expect("serialize");
        assert_eq!(json, r#""2091-03-05""#);

        let mut de = serde_json::Deserializer::from_str(&json);
        let parsed = DeserializeSeed::deserialize(&calendar, &mut de).expect("deserialize");
        assert_eq!(parsed, date);

        // The bundled table does not reach 2091
        assert!(serde_json::from_str::<BsDate>(&json).is_err());

        let mut de = serde_json::Deserializer::from_str(r#""2092-01-01""#);
        assert!(DeserializeSeed::deserialize(&calendar, &mut de).is_err());
    }

    #[test]
    fn test_parse_stamp() {
        let calendar = extended_calendar();
        let at: DateTime<FixedOffset> = "2034-06-01T00:00:00Z".parse().expect("valid instant");
        let stamp = calendar.parse_stamp(&at, "2091-02-18").expect("matching pair");
        assert_eq!(stamp.bs(), calendar.date(2091, 2, 18).expect("valid"));
        assert_eq!(stamp.ad().to_rfc3339(), "2034-06-01T05:45:00+05:45");

        assert!(calendar.parse_stamp(&at, "2091-02-19").expect_err("mismatch").is_invalid());
        assert!(calendar.parse_stamp(&at, "2091-02").expect_err("malformed").is_invalid());
        assert!(Calendar::bundled()
            .parse_stamp(&at, "2091-02-18")
            .expect_err("2091 not bundled")
            .is_out_of_range());
    }

    #[test]
    fn test_invalid_tables() {
        assert_eq!(
            Calendar::new(config(2056, Vec::new(), "2056-01-01")),
            Err(CalendarError::EmptyTable)
        );

        let mut row = [30; MONTHS_PER_YEAR];
        row[3] = 33;
        assert_eq!(
            Calendar::new(config(2056, vec![row], "2056-01-01")),
            Err(CalendarError::InvalidMonthLength {
                year:  2056,
                month: 4,
                days:  33,
            })
        );

        row[3] = 0;
        assert!(matches!(
            Calendar::new(config(2056, vec![row], "2056-01-01")),
            Err(CalendarError::InvalidMonthLength { days: 0, .. })
        ));

        assert!(matches!(
            Calendar::new(config(u16::MAX, vec![[30; MONTHS_PER_YEAR]; 2], "2056-01-01")),
            Err(CalendarError::YearOverflow { .. })
        ));
    }

    #[test]
    fn test_anchor_must_be_inside_table() {
        let months = vec![[30; MONTHS_PER_YEAR]];
        let outside = Calendar::new(config(2056, months.clone(), "2057-01-01"));
        assert!(matches!(
            outside,
            Err(CalendarError::InvalidAnchor(DateError::OutOfRange { year: 2057, .. }))
        ));

        let bad_day = Calendar::new(config(2056, months.clone(), "2056-01-31"));
        assert!(matches!(bad_day, Err(CalendarError::InvalidAnchor(DateError::Invalid(_)))));

        let garbage = Calendar::new(config(2056, months, "anchor"));
        assert!(matches!(garbage, Err(CalendarError::InvalidAnchor(DateError::Invalid(_)))));
    }

    #[test]
    fn test_deserialize_config() {
        let json = r#"{
            "first_year": 2080,
            "months": [
                [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
                [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30]
            ],
            "anchor_ad": "2024-04-13",
            "anchor_bs": "2081-01-01"
        }"#;
        let calendar: Calendar = serde_json::from_str(json).expect("valid config");
        assert_eq!(calendar.min_year(), 2080);
        assert_eq!(calendar.max_year(), 2081);
        assert_eq!(calendar.ad_to_bs(ad(2024, 10, 1)), calendar.date(2081, 6, 15));
        assert_eq!(calendar.ad_to_bs(ad(2024, 4, 12)), calendar.date(2080, 12, 30));
    }

    #[test]
    fn test_deserialize_defaults_to_bundled_anchor() {
        let json = r#"{
            "first_year": 2056,
            "months": [[31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30]]
        }"#;
        let calendar: Calendar = serde_json::from_str(json).expect("valid config");
        assert_eq!(calendar.anchor_ad(), ad(2000, 1, 1));
        assert_eq!(calendar.anchor_bs().to_string(), "2056-09-17");
    }

    #[test]
    fn test_deserialize_rejects_bad_config() {
        let bad_anchor = r#"{"first_year": 2056, "months": [[30,30,30,30,30,30,30,30,30,30,30,30]], "anchor_bs": "2056-13-01"}"#;
        assert!(serde_json::from_str::<Calendar>(bad_anchor).is_err());

        let short_row = r#"{"first_year": 2056, "months": [[30,30,30]]}"#;
        assert!(serde_json::from_str::<Calendar>(short_row).is_err());

        let unknown_field = r#"{"first_year": 2056, "months": [], "extra": 1}"#;
        assert!(serde_json::from_str::<Calendar>(unknown_field).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let calendar = Calendar::default();
        let json = serde_json::to_string(&calendar).expect("serialize");
        let restored: Calendar = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.min_year(), calendar.min_year());
        assert_eq!(restored.max_year(), calendar.max_year());
        assert_eq!(restored.anchor_bs(), calendar.anchor_bs());
        assert_eq!(restored, calendar);
    }
}
