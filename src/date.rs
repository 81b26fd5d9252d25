//! Publication date model.
//!
//! [`PublicationDate`] is a validated year with optional month and day. The
//! free functions in this module implement the calendar rules and the
//! heuristics used to pull a date out of free-form BibTeX text.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConversionError, Result};

/// Years further than this past the current year are reported, not rejected.
pub const FUTURE_YEAR_WARNING_WINDOW: i32 = 5;

lazy_static! {
    static ref BARE_YEAR: Regex = Regex::new(r"^\s*([0-9]{4})\s*$").unwrap();
    static ref ISO_DATE: Regex = Regex::new(r"([0-9]{4})-[0-9]{1,2}-[0-9]{1,2}").unwrap();
    static ref US_DATE: Regex = Regex::new(r"[0-9]{1,2}/[0-9]{1,2}/([0-9]{4})").unwrap();
    static ref CIRCA_YEAR: Regex =
        Regex::new(r"(?i)(?:\bcirca|\bca\.|\bc\.|~)\s*([0-9]{4})").unwrap();
    static ref ANY_YEAR: Regex = Regex::new(r"\b([0-9]{4})\b").unwrap();

    static ref YEAR_MONTH: Regex = Regex::new(r"^([0-9]{4})-([0-9]{1,2})$").unwrap();
    static ref MONTH_NAME_YEAR: Regex = Regex::new(r"^([A-Za-z]+)\.?\s+([0-9]{4})$").unwrap();

    /// Month names, abbreviations and BibTeX month macros.
    static ref MONTHS: HashMap<&'static str, u32> = {
        let names = [
            ("january", "jan"), ("february", "feb"), ("march", "mar"),
            ("april", "apr"), ("may", "may"), ("june", "jun"),
            ("july", "jul"), ("august", "aug"), ("september", "sep"),
            ("october", "oct"), ("november", "nov"), ("december", "dec"),
        ];
        let mut map = HashMap::new();
        for (month, (long, short)) in (1u32..).zip(names) {
            map.insert(long, month);
            map.insert(short, month);
        }
        map.insert("sept", 9);
        map
    };
}

/// Fixed-format date patterns tried by [`parse_date`], in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

/// A publication date: year, optionally month, optionally day.
///
/// A day is only allowed when a month is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicationDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
}

impl PublicationDate {
    /// Create a date, enforcing the structural invariants.
    ///
    /// These checks do not look at the calendar (`2023-02-30` passes); use
    /// [`is_valid_date`] or [`PublicationDate::validate`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidDate`] if the year is not positive,
    /// the month is outside 1–12, the day is outside 1–31, or a day is given
    /// without a month.
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Result<Self> {
        let invalid = || ConversionError::InvalidDate { year, month, day };

        if year <= 0 {
            return Err(invalid());
        }
        if month.is_some_and(|m| !(1..=12).contains(&m)) {
            return Err(invalid());
        }
        match (month, day) {
            (None, Some(_)) => return Err(invalid()),
            (_, Some(d)) if !(1..=31).contains(&d) => return Err(invalid()),
            _ => {},
        }

        Ok(Self { year, month, day })
    }

    /// A year-only date.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidDate`] if the year is not positive.
    pub fn from_year(year: i32) -> Result<Self> {
        Self::new(year, None, None)
    }

    /// Year component.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1–12).
    #[must_use]
    pub const fn month(&self) -> Option<u32> {
        self.month
    }

    /// Day component (1–31).
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        self.day
    }

    /// Calendar check plus future-year policy.
    ///
    /// With `allow_future`, a far-future year only logs a warning; without
    /// it, any year after the current one is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidDate`] when the date is not on the
    /// calendar or violates the future-year policy.
    pub fn validate(&self, allow_future: bool) -> Result<()> {
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        validate_with_future_check(self.year, month, day, allow_future).map_err(|_| {
            ConversionError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            }
        })
    }

    /// XSD datatype local name matching this date's precision.
    #[must_use]
    pub const fn xsd_datatype(&self) -> &'static str {
        match (self.month, self.day) {
            (Some(_), Some(_)) => "date",
            (Some(_), None) => "gYearMonth",
            _ => "gYear",
        }
    }

    /// Parse the lexical form written by [`fmt::Display`]
    /// (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnparsableDate`] for any other shape and
    /// [`ConversionError::InvalidDate`] for out-of-range components.
    pub fn from_lexical(text: &str) -> Result<Self> {
        let unparsable = || ConversionError::UnparsableDate(text.to_string());
        let mut parts = text.trim().splitn(3, '-');

        let year = parts
            .next()
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(unparsable)?;
        let month = parts
            .next()
            .map(|m| m.parse::<u32>().map_err(|_| unparsable()))
            .transpose()?;
        let day = parts
            .next()
            .map(|d| d.parse::<u32>().map_err(|_| unparsable()))
            .transpose()?;

        Self::new(year, month, day)
    }
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
            if let Some(day) = self.day {
                write!(f, "-{day:02}")?;
            }
        }
        Ok(())
    }
}

/// Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, or `None` for a month outside 1–12.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Whether `year-month-day` exists on the calendar.
///
/// # Examples
///
/// ```
/// use bibo_bridge::date::is_valid_date;
///
/// assert!(is_valid_date(2024, 2, 29));
/// assert!(!is_valid_date(1900, 2, 29));
/// assert!(is_valid_date(2000, 2, 29));
/// ```
#[must_use]
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    days_in_month(year, month).is_some_and(|max| day >= 1 && day <= max)
}

/// The current calendar year (UTC).
#[must_use]
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Reject impossible dates; warn about implausibly far-future years.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidDate`] if [`is_valid_date`] is false.
pub fn validate_or_throw(year: i32, month: u32, day: u32) -> Result<()> {
    if !is_valid_date(year, month, day) {
        return Err(ConversionError::InvalidDate {
            year,
            month: Some(month),
            day: Some(day),
        });
    }

    let now = current_year();
    if year > now + FUTURE_YEAR_WARNING_WINDOW {
        warn!(year, current_year = now, "publication year is far in the future");
    }
    Ok(())
}

/// Like [`validate_or_throw`], additionally rejecting any future year when
/// `allow_future` is false.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidDate`] for impossible dates, or for a
/// year after the current one in strict mode.
pub fn validate_with_future_check(year: i32, month: u32, day: u32, allow_future: bool) -> Result<()> {
    validate_or_throw(year, month, day)?;
    if !allow_future && year > current_year() {
        return Err(ConversionError::InvalidDate {
            year,
            month: Some(month),
            day: Some(day),
        });
    }
    Ok(())
}

/// Pull a four-digit year out of free-form text.
///
/// Tried in order: a bare year, an ISO date, a US date, a circa marker
/// (`circa`, `ca.`, `c.`, `~`), then any standalone four-digit number.
///
/// # Errors
///
/// Returns [`ConversionError::UnparsableDate`] if no year is found.
pub fn extract_year_from_free_form(text: &str) -> Result<i32> {
    [&*BARE_YEAR, &*ISO_DATE, &*US_DATE, &*CIRCA_YEAR, &*ANY_YEAR]
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .ok_or_else(|| ConversionError::UnparsableDate(text.to_string()))
}

/// Parse a month given as a number, a name, an abbreviation or a BibTeX
/// month macro.
#[must_use]
pub fn parse_month(text: &str) -> Option<u32> {
    let cleaned = text
        .trim()
        .trim_matches(|c| c == '{' || c == '}')
        .trim_end_matches('.')
        .to_lowercase();

    if let Ok(number) = cleaned.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    MONTHS.get(cleaned.as_str()).copied()
}

/// Parse a date from free text.
///
/// `YYYY-MM` and `Month YYYY` are recognized first. Then the fixed formats
/// are tried (ISO, `MM/DD/YYYY`, `dd-Mon-yyyy`, long month-name forms,
/// `yyyy/MM/dd`); a match only counts when its year is written out with four
/// digits. If all fail, the year is extracted with
/// [`extract_year_from_free_form`] and the date becomes January 1 of that
/// year.
///
/// # Errors
///
/// Returns [`ConversionError::UnparsableDate`] only when no year can be
/// extracted at all.
pub fn parse_date(text: &str) -> Result<PublicationDate> {
    let trimmed = text.trim();

    if let Some(caps) = YEAR_MONTH.captures(trimmed) {
        if let (Ok(year), Ok(month)) = (caps[1].parse::<i32>(), caps[2].parse::<u32>()) {
            if let Ok(date) = PublicationDate::new(year, Some(month), None) {
                return Ok(date);
            }
        }
    }

    if let Some(caps) = MONTH_NAME_YEAR.captures(trimmed) {
        if let (Some(month), Ok(year)) = (parse_month(&caps[1]), caps[2].parse::<i32>()) {
            return PublicationDate::new(year, Some(month), None);
        }
    }

    let four_digit_years: Vec<i32> = ANY_YEAR
        .captures_iter(trimmed)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    let parsed = DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .find(|date| four_digit_years.contains(&date.year()));
    if let Some(date) = parsed {
        return PublicationDate::new(date.year(), Some(date.month()), Some(date.day()));
    }

    let year = extract_year_from_free_form(trimmed)?;
    PublicationDate::new(year, Some(1), Some(1))
}
