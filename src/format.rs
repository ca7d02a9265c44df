//! Human-readable renderings of [`BsDate`]. Purely presentational: every
//! style assumes the date has already been validated.

use serde::{Deserialize, Serialize};

use crate::{BsDate, consts::NEPALI_DIGITS};

/// Display style for a BS date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BsFormat {
    /// `2056-09-17`
    Iso,
    /// `2056 साल 09 महिना 17 गते`
    #[default]
    Nepali,
    /// `17 Poush 2056`
    Romanized,
    /// `२०५६-०९-१७`
    Devanagari,
    /// `१७ पुस २०५६`
    DevanagariLong,
}

impl BsDate {
    /// Renders this date in the given style.
    pub fn format(&self, style: BsFormat) -> String {
        match style {
            BsFormat::Iso => self.to_string(),
            BsFormat::Nepali => format!(
                "{:04} साल {:02} महिना {:02} गते",
                self.year(),
                self.month(),
                self.day()
            ),
            BsFormat::Romanized => {
                format!("{} {} {}", self.day(), self.month_typed().name(), self.year())
            }
            BsFormat::Devanagari => to_nepali_digits(&self.to_string()),
            BsFormat::DevanagariLong => format!(
                "{} {} {}",
                to_nepali_digits(&self.day().to_string()),
                self.month_typed().nepali_name(),
                to_nepali_digits(&self.year().to_string())
            ),
        }
    }
}

/// Replaces ASCII digits with Devanagari digits, leaving everything else.
pub(crate) fn to_nepali_digits(s: &str) -> String {
    s.chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|digit| NEPALI_DIGITS.get(digit as usize).copied())
                .unwrap_or(c)
        })
        .collect()
}
