// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Preferred training weekdays.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekdays trained when neither the request nor the profile says otherwise.
///
/// 0 = Monday ... 6 = Sunday.
pub const DEFAULT_PREFERRED_WEEKDAYS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Non-empty, sorted, de-duplicated set of weekday indices (0 = Monday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct PreferredWeekdays(Vec<u8>);

impl PreferredWeekdays {
    pub fn new(days: impl IntoIterator<Item = u8>) -> Result<Self, WeekdayError> {
        let mut days: Vec<u8> = days.into_iter().collect();
        if let Some(&bad) = days.iter().find(|&&d| d > 6) {
            return Err(WeekdayError::OutOfRange(bad));
        }
        days.sort_unstable();
        days.dedup();
        if days.is_empty() {
            return Err(WeekdayError::Empty);
        }
        Ok(Self(days))
    }

    /// Parse a comma separated list such as `"0,1,2,4,5,6"`.
    pub fn parse_list(raw: &str) -> Result<Self, WeekdayError> {
        let days = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u8>().map_err(|_| WeekdayError::Invalid(s.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days)
    }

    pub fn days(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, weekday: u8) -> bool {
        self.0.binary_search(&weekday).is_ok()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(weekday_index(date))
    }
}

impl Default for PreferredWeekdays {
    fn default() -> Self {
        Self(DEFAULT_PREFERRED_WEEKDAYS.to_vec())
    }
}

impl TryFrom<Vec<u8>> for PreferredWeekdays {
    type Error = WeekdayError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<PreferredWeekdays> for Vec<u8> {
    fn from(days: PreferredWeekdays) -> Self {
        days.0
    }
}

/// Weekday index of a date, 0 = Monday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Errors building a weekday set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeekdayError {
    #[error("Preferred weekday set is empty")]
    Empty,

    #[error("Weekday index out of range (expected 0-6): {0}")]
    OutOfRange(u8),

    #[error("Invalid weekday value: {0}")]
    Invalid(String),
}

impl fmt::Display for PreferredWeekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_dedups() {
        let days = PreferredWeekdays::new([6, 0, 4, 0]).unwrap();
        assert_eq!(days.days(), &[0, 4, 6]);
        assert!(days.contains(4));
        assert!(!days.contains(3));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(PreferredWeekdays::new([]), Err(WeekdayError::Empty));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            PreferredWeekdays::new([1, 7]),
            Err(WeekdayError::OutOfRange(7))
        );
    }

    #[test]
    fn test_parse_list() {
        let days = PreferredWeekdays::parse_list("0, 1,2,4,5,6").unwrap();
        assert_eq!(days.days(), &[0, 1, 2, 4, 5, 6]);
        assert_eq!(days.to_string(), "0,1,2,4,5,6");

        assert!(matches!(
            PreferredWeekdays::parse_list("mon"),
            Err(WeekdayError::Invalid(_))
        ));
        assert_eq!(PreferredWeekdays::parse_list(""), Err(WeekdayError::Empty));
    }

    #[test]
    fn test_deserialize_validates() {
        let days: PreferredWeekdays = serde_json::from_str("[2,1]").unwrap();
        assert_eq!(days.days(), &[1, 2]);
        assert!(serde_json::from_str::<PreferredWeekdays>("[]").is_err());
    }

    #[test]
    fn test_weekday_index() {
        // 2026-10-19 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(weekday_index(monday), 0);
        assert_eq!(weekday_index(monday + chrono::Duration::days(6)), 6);
    }
}
