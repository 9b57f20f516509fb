//! Deadline and date parsing.
//!
//! Deadlines are wall-clock values with no zone attached: `YYYY-MM-DD HH:MM`.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::ValidationError;

pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono accepts single-digit fields for %m/%d/%H/%M; the text format is fixed-width.
fn deadline_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("static regex"))
}

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"))
}

/// Parse a deadline like "2023-11-15 16:00".
pub fn parse_deadline(text: &str) -> Result<NaiveDateTime, ValidationError> {
    let text = text.trim();
    let malformed = || ValidationError::MalformedDeadline {
        input: text.to_string(),
    };

    if !deadline_shape().is_match(text) {
        return Err(malformed());
    }
    NaiveDateTime::parse_from_str(text, DEADLINE_FORMAT).map_err(|_| malformed())
}

/// Parse a calendar date like "2023-11-15".
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    let malformed = || ValidationError::MalformedDate {
        input: text.to_string(),
    };

    if !date_shape().is_match(text) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| malformed())
}

pub fn format_deadline(dt: NaiveDateTime) -> String {
    dt.format(DEADLINE_FORMAT).to_string()
}

/// serde adapter keeping deadlines in their input format.
pub(crate) fn serialize_deadline<S: serde::Serializer>(
    dt: &NaiveDateTime,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_deadline(*dt))
}
