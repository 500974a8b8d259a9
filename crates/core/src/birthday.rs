//! Birthday-countdown arithmetic for the annotated people listing.
//!
//! A birthday counts as "already passed" only when its month/day is
//! strictly before today's, so a birthday falling on today yields 0 days
//! rather than a full year.

use chrono::{Datelike, NaiveDate};

/// Days from `today` until the next occurrence of `birth_date`'s
/// month/day.
///
/// Feb 29 birthdays are celebrated on Mar 1 in non-leap years.
pub fn days_to_birthday(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let this_year = birthday_in_year(birth_date, today.year());
    let next = if this_year < today {
        birthday_in_year(birth_date, today.year() + 1)
    } else {
        this_year
    };
    (next - today).num_days()
}

/// The calendar date the birthday falls on in `year`.
fn birthday_in_year(birth_date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        // Only Feb 29 can fail to exist; roll over to Mar 1.
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).expect("Mar 1 always exists"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_today_is_zero_days() {
        let birth = date(1990, 6, 15);
        let today = date(2026, 6, 15);
        assert_eq!(days_to_birthday(birth, today), 0);
    }

    #[test]
    fn test_upcoming_birthday_this_year() {
        let birth = date(1990, 6, 20);
        let today = date(2026, 6, 15);
        assert_eq!(days_to_birthday(birth, today), 5);
    }

    #[test]
    fn test_passed_birthday_rolls_to_next_year() {
        let birth = date(1990, 6, 10);
        let today = date(2026, 6, 15);
        // Jun 10 2027 is 360 days after Jun 15 2026.
        assert_eq!(days_to_birthday(birth, today), 360);
    }

    #[test]
    fn test_year_boundary() {
        let birth = date(1985, 1, 2);
        let today = date(2026, 12, 31);
        assert_eq!(days_to_birthday(birth, today), 2);
    }

    #[test]
    fn test_feb_29_in_non_leap_year_counts_as_mar_1() {
        let birth = date(1992, 2, 29);
        let today = date(2026, 2, 28);
        // 2026 is not a leap year, so the birthday falls on Mar 1.
        assert_eq!(days_to_birthday(birth, today), 1);
    }

    #[test]
    fn test_feb_29_in_leap_year() {
        let birth = date(1992, 2, 29);
        let today = date(2028, 2, 29);
        assert_eq!(days_to_birthday(birth, today), 0);
    }

    #[test]
    fn test_passed_sorts_after_upcoming() {
        let today = date(2026, 6, 15);
        let upcoming = days_to_birthday(date(1990, 7, 1), today);
        let passed = days_to_birthday(date(1990, 5, 1), today);
        assert!(upcoming < passed);
    }
}
