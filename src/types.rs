use crate::ParseError;
use crate::consts::{BAISAKH, CHAITRA, MONTH_NAMES, MONTH_NAMES_NEPALI};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A BS month guaranteed to be in the range `BAISAKH..=CHAITRA` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `CHAITRA`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `CHAITRA`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > CHAITRA {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Wraps a month already checked by a calendar.
    pub(crate) const fn from_valid(value: u8) -> Self {
        debug_assert!(value >= BAISAKH && value <= CHAITRA);
        match NonZeroU8::new(value) {
            Some(month) => Self(month),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position, for indexing table rows
    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - BAISAKH) as usize
    }

    /// Romanised name, e.g. `Poush`
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.index()]
    }

    /// Devanagari name, e.g. `पुस`
    pub const fn nepali_name(self) -> &'static str {
        MONTH_NAMES_NEPALI[self.index()]
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
