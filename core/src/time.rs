use std::cmp::Ordering;
use std::fmt;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DukeError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H%M",
    "%d/%m/%Y %H%M",
    "%d/%m/%Y %H:%M",
];

const STORAGE_DATE: &str = "%Y-%m-%d";
const STORAGE_DATE_TIME: &str = "%Y-%m-%d %H:%M";
const DISPLAY_DATE: &str = "%b %d %Y";
const DISPLAY_DATE_TIME: &str = "%b %d %Y %H:%M";

/// A normalized point in time as typed by the user: either a whole day or a
/// day with a wall-clock time. No timezone is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalDateTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CanonicalDateTime {
    /// The instant used for ordering. A bare date counts as its midnight.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            CanonicalDateTime::Date(d) => d.and_time(NaiveTime::MIN),
            CanonicalDateTime::DateTime(dt) => *dt,
        }
    }

    pub fn has_time(&self) -> bool {
        matches!(self, CanonicalDateTime::DateTime(_))
    }

    /// Form written to storage; `parse_storage` reads it back to an equal value.
    pub fn to_storage_string(&self) -> String {
        match self {
            CanonicalDateTime::Date(d) => d.format(STORAGE_DATE).to_string(),
            CanonicalDateTime::DateTime(dt) => dt.format(STORAGE_DATE_TIME).to_string(),
        }
    }
}

impl Ord for CanonicalDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant()
            .cmp(&other.instant())
            .then(self.has_time().cmp(&other.has_time()))
    }
}

impl PartialOrd for CanonicalDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CanonicalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalDateTime::Date(d) => write!(f, "{}", d.format(DISPLAY_DATE)),
            CanonicalDateTime::DateTime(dt) => write!(f, "{}", dt.format(DISPLAY_DATE_TIME)),
        }
    }
}

pub fn normalize(input: &str) -> Result<CanonicalDateTime, DukeError> {
    normalize_relative_to(input, Local::now().date_naive())
}

pub fn normalize_relative_to(
    input: &str,
    today: NaiveDate,
) -> Result<CanonicalDateTime, DukeError> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" => return Ok(CanonicalDateTime::Date(today)),
        "tomorrow" => return Ok(CanonicalDateTime::Date(today + Duration::days(1))),
        _ => {}
    }

    // 2. Date with time, tried first so "2019-12-01 1800" is not cut short
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(CanonicalDateTime::DateTime(dt));
        }
    }

    // 3. Date only
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(input, format) {
            return Ok(CanonicalDateTime::Date(d));
        }
    }

    Err(DukeError::date_format(format!(
        "I can't read the date '{}'. Try yyyy-mm-dd, yyyy-mm-dd HH:MM or d/m/yyyy HHMM.",
        input
    )))
}

/// True when `start` is not after `end`. A bare date and a timed value at
/// its midnight are the same moment here, unlike in `Ord`.
pub fn is_ordered(start: &CanonicalDateTime, end: &CanonicalDateTime) -> bool {
    start.instant() <= end.instant()
}

/// Reads a value written by `to_storage_string`. Only the two storage
/// forms are accepted; no keywords, no surrounding whitespace.
pub fn parse_storage(input: &str) -> Result<CanonicalDateTime, DukeError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, STORAGE_DATE_TIME) {
        return Ok(CanonicalDateTime::DateTime(dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, STORAGE_DATE) {
        return Ok(CanonicalDateTime::Date(d));
    }
    Err(DukeError::Record(format!("bad stored date '{}'", input)))
}
