use chrono::Weekday;
use num_traits::FromPrimitive;

use crate::error::{Error, ErrorKind, Result};

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year` in the proleptic Gregorian calendar.
///
/// `month` is expected to be validated by the caller, see [`validate_month`].
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        MONTH_LENGTHS[(month - 1) as usize]
    }
}

/// Day of the week for the given date, `0` being Sunday and `6` Saturday.
///
/// January and February count as months 13 and 14 of the previous year so the
/// leap day lands at the end of the cycle. The congruence yields `0` for
/// Saturday, which is shifted to a Sunday-first index.
pub fn weekday_of(year: i32, month: u32, day: u32) -> u32 {
    let (y, m) = if month < 3 {
        (i64::from(year) - 1, i64::from(month) + 12)
    } else {
        (i64::from(year), i64::from(month))
    };

    let h = (i64::from(day) + (13 * (m + 1)).div_euclid(5) + y + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400))
    .rem_euclid(7);

    ((h + 6) % 7) as u32
}

/// Converts a Sunday-first index as returned by [`weekday_of`] into a `chrono::Weekday`.
pub fn weekday_name(index: u32) -> Option<Weekday> {
    if index > 6 {
        return None;
    }
    // chrono numbers from Monday
    Weekday::from_u32((index + 6) % 7)
}

/// Two letter English weekday abbreviations, Sunday first.
pub fn default_weekday_labels() -> [String; 7] {
    [0, 1, 2, 3, 4, 5, 6].map(|index| {
        weekday_name(index)
            .map(|weekday| weekday.to_string().chars().take(2).collect())
            .unwrap_or_default()
    })
}

pub fn validate_month(month: i64) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month as u32)
    } else {
        Err(Error::new(
            ErrorKind::InvalidInput,
            "month must be between 1 and 12",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn known_weekdays() {
        assert_eq!(weekday_of(2000, 1, 1), 6);
        assert_eq!(weekday_of(2025, 1, 1), 3);
        assert_eq!(weekday_of(1900, 1, 1), 1);
        assert_eq!(weekday_of(2024, 2, 29), 4);
        assert_eq!(weekday_of(2100, 12, 31), 5);
    }

    #[test]
    fn weekday_matches_chrono_for_supported_range() {
        let mut date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();

        while date <= last {
            assert_eq!(
                weekday_of(date.year(), date.month(), date.day()),
                date.weekday().num_days_from_sunday(),
                "{}",
                date
            );
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn weekday_outside_supported_range() {
        for &(y, m, d) in &[(1, 1, 1), (1582, 10, 15), (1600, 2, 29), (2400, 3, 1), (9999, 12, 31)] {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(weekday_of(y, m, d), date.weekday().num_days_from_sunday());
        }
    }

    #[test]
    fn february_lengths() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn month_lengths_match_chrono() {
        for year in 1900..=2100 {
            for month in 1..=12u32 {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
                };
                assert_eq!(
                    days_in_month(year, month) as i64,
                    next.signed_duration_since(first).num_days()
                );
            }
        }
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(0), Some(Weekday::Sun));
        assert_eq!(weekday_name(3), Some(Weekday::Wed));
        assert_eq!(weekday_name(6), Some(Weekday::Sat));
        assert_eq!(weekday_name(7), None);
    }

    #[test]
    fn default_labels() {
        assert_eq!(
            default_weekday_labels(),
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].map(String::from)
        );
    }

    #[test]
    fn month_validation() {
        assert_eq!(validate_month(1).unwrap(), 1);
        assert_eq!(validate_month(12).unwrap(), 12);
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
        assert!(validate_month(-3).is_err());
    }
}
