//! Edition validity windows and integer date keys.
//!
//! Dates cross the public boundary as `YYYY-MM-DD` strings and are stored
//! as `YYYYMMDD` integers so that range predicates compare numerically.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{validate_date, OPEN_ENDED};
use crate::error::{HarvesterError, Result};

/// Convert a `YYYY-MM-DD` date into its `YYYYMMDD` key.
///
/// # Examples
/// ```
/// use statute_harvester::window::date_key;
///
/// assert_eq!(date_key("2020-07-01").unwrap(), 20200701);
/// assert!(date_key("2020-07-32").is_err());
/// ```
pub fn date_key(date: &str) -> Result<u32> {
    validate_date(date)?;
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| HarvesterError::InvalidDate(date.to_string()))?;
    Ok(key_of(parsed))
}

/// Format a `YYYYMMDD` key as `YYYY-MM-DD`.
///
/// The open-ended sentinel formats as `3000-00-00`.
#[must_use]
pub fn format_date_key(key: u32) -> String {
    format!("{:04}-{:02}-{:02}", key / 10_000, key / 100 % 100, key % 100)
}

/// Key of the calendar day before `key`, if `key` is a real date.
#[must_use]
pub fn previous_day(key: u32) -> Option<u32> {
    let date = NaiveDate::from_ymd_opt((key / 10_000) as i32, key / 100 % 100, key % 100)?;
    date.pred_opt().map(key_of)
}

fn key_of(date: NaiveDate) -> u32 {
    // Years before 1 CE never occur in edition preambles.
    let year = u32::try_from(date.year()).unwrap_or(0);
    year * 10_000 + date.month() * 100 + date.day()
}

/// The dates between which one edition of a statute is in force.
///
/// Both bounds are inclusive. An edition still in force has
/// `effective_to == OPEN_ENDED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EditionWindow {
    pub effective_from: u32,
    pub effective_to: u32,
}

impl EditionWindow {
    /// Build a window from two date keys.
    ///
    /// # Errors
    /// Returns `InvalidDate` when `effective_from` is after `effective_to`.
    pub fn new(effective_from: u32, effective_to: u32) -> Result<Self> {
        if effective_from > effective_to {
            return Err(HarvesterError::InvalidDate(format!(
                "{} is after {}",
                format_date_key(effective_from),
                format_date_key(effective_to)
            )));
        }
        Ok(Self {
            effective_from,
            effective_to,
        })
    }

    /// Window of an edition that is still in force.
    #[must_use]
    pub fn open_ended(effective_from: u32) -> Self {
        Self {
            effective_from,
            effective_to: OPEN_ENDED,
        }
    }

    /// Parse a window from preamble dates; a missing end date means open-ended.
    pub fn parse(from: &str, to: Option<&str>) -> Result<Self> {
        let from = date_key(from)?;
        match to {
            Some(to) => Self::new(from, date_key(to)?),
            None => Ok(Self::open_ended(from)),
        }
    }

    /// Whether the edition is in force on the given date key.
    #[must_use]
    pub fn contains(&self, date: u32) -> bool {
        self.effective_from <= date && date <= self.effective_to
    }

    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.effective_to == OPEN_ENDED
    }

    #[must_use]
    pub fn from_date(&self) -> String {
        format_date_key(self.effective_from)
    }

    #[must_use]
    pub fn to_date(&self) -> String {
        format_date_key(self.effective_to)
    }

    /// Human title of the edition, as printed in the page preamble.
    ///
    /// # Examples
    /// ```
    /// use statute_harvester::window::EditionWindow;
    ///
    /// let window = EditionWindow::parse("2020-01-01", Some("2020-06-30")).unwrap();
    /// assert_eq!(window.title(), "Suvestinė redakcija nuo 2020-01-01 iki 2020-06-30");
    ///
    /// let current = EditionWindow::parse("2020-07-01", None).unwrap();
    /// assert_eq!(current.title(), "Suvestinė redakcija nuo 2020-07-01");
    /// ```
    #[must_use]
    pub fn title(&self) -> String {
        if self.is_open_ended() {
            format!("Suvestinė redakcija nuo {}", self.from_date())
        } else {
            format!(
                "Suvestinė redakcija nuo {} iki {}",
                self.from_date(),
                self.to_date()
            )
        }
    }
}

impl fmt::Display for EditionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from_date(), self.to_date())
    }
}
