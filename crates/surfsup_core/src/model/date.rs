//! Strict ISO calendar dates.

use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATE_LEN: usize = 10;

/// Error returned when a date string is not a strict `YYYY-MM-DD` day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date `{}`; expected format YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for DateParseError {}

/// A calendar day rendered as `YYYY-MM-DD`.
///
/// Ordering matches both chronological order and the lexicographic order of
/// the stored text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationDate(NaiveDate);

impl ObservationDate {
    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// Rejects unpadded fields (`2017-1-1`), other separators (`2017/01/01`)
    /// and impossible days (`2017-02-30`).
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        if !has_iso_shape(input) {
            return Err(DateParseError {
                input: input.to_string(),
            });
        }
        NaiveDate::parse_from_str(input, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError {
                input: input.to_string(),
            })
    }

    /// Returns the date `days` days earlier.
    ///
    /// Saturates at the earliest representable date.
    pub fn days_before(self, days: i64) -> Self {
        Self(
            self.0
                .checked_sub_signed(Duration::days(days))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    /// Canonical text form used in SQL filters.
    pub fn to_iso_string(self) -> String {
        self.0.format(ISO_DATE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for ObservationDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for ObservationDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl Serialize for ObservationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn has_iso_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == ISO_DATE_LEN
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::ObservationDate;

    #[test]
    fn parse_accepts_iso_dates() {
        let date = ObservationDate::parse("2017-08-23").unwrap();
        assert_eq!(date.to_iso_string(), "2017-08-23");
        assert_eq!(date.to_string(), "2017-08-23");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in [
            "2013/01/01",
            "not-a-date",
            "2017-1-01",
            "17-01-01",
            "2017-02-30",
            "2017-13-01",
            " 2017-01-01",
            "",
        ] {
            let err = ObservationDate::parse(input).expect_err("input must be rejected");
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn days_before_crosses_leap_year() {
        let date = ObservationDate::parse("2017-08-23").unwrap();
        assert_eq!(date.days_before(365).to_string(), "2016-08-23");

        let leap = ObservationDate::parse("2016-03-01").unwrap();
        assert_eq!(leap.days_before(365).to_string(), "2015-03-02");
    }

    #[test]
    fn ordering_matches_text_ordering() {
        let earlier = ObservationDate::parse("2016-12-31").unwrap();
        let later = ObservationDate::parse("2017-01-01").unwrap();
        assert!(earlier < later);
        assert!(earlier.to_iso_string() < later.to_iso_string());
    }
}
