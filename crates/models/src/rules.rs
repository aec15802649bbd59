//! Cross-field and range rules
//!
//! Date rules take the reference date as a parameter instead of reading the clock.

use crate::error::FieldError;
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::ops::RangeInclusive;

pub const MINIMUM_AGE: u32 = 15;
pub const GRADE_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const UNIT_RANGE: RangeInclusive<i16> = 1..=3;

/// Age on `today` must be at least [`MINIMUM_AGE`] full years
pub fn minimum_age(birth_date: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    match today.years_since(birth_date) {
        Some(age) if age >= MINIMUM_AGE => Ok(()),
        Some(age) => Err(FieldError::range(
            "birth_date",
            format!("age must be at least {MINIMUM_AGE}, got {age}"),
        )),
        None => Err(FieldError::range("birth_date", "must not be in the future")),
    }
}

/// A date that has to have already happened by `today`
pub fn not_in_future(field: &'static str, date: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    if date > today {
        Err(FieldError::range(field, format!("must not be after {today}")))
    } else {
        Ok(())
    }
}

pub fn hire_date(hire_date: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    not_in_future("hire_date", hire_date, today)
}

/// Last promotion falls between the hire date and `today`
pub fn last_promotion(
    promoted_on: Option<NaiveDate>,
    hire_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), FieldError> {
    let Some(promoted_on) = promoted_on else {
        return Ok(());
    };

    if promoted_on < hire_date {
        return Err(FieldError::range(
            "last_promotion_date",
            "must not precede the hire date",
        ));
    }
    not_in_future("last_promotion_date", promoted_on, today)
}

pub fn contract_end(ends_on: Option<NaiveDate>, hire_date: NaiveDate) -> Result<(), FieldError> {
    match ends_on {
        Some(ends_on) if ends_on <= hire_date => Err(FieldError::range(
            "contract_end_date",
            "must be after the hire date",
        )),
        _ => Ok(()),
    }
}

pub fn entry_year(year: i32, today: NaiveDate) -> Result<(), FieldError> {
    if year > today.year() {
        Err(FieldError::range(
            "entry_year",
            format!("must not exceed {}", today.year()),
        ))
    } else {
        Ok(())
    }
}

/// Class start strictly precedes its end
pub fn time_slot(start: NaiveTime, end: NaiveTime) -> Result<(), FieldError> {
    if start < end {
        Ok(())
    } else {
        Err(FieldError::range(
            "start_time",
            format!("must be before end time {end}"),
        ))
    }
}

pub fn capacity(capacity: i32) -> Result<(), FieldError> {
    if capacity >= 1 {
        Ok(())
    } else {
        Err(FieldError::range("capacity", "must be at least 1"))
    }
}

fn score(field: &'static str, value: Option<f64>) -> Result<(), FieldError> {
    match value {
        None => Ok(()),
        Some(value) if value.is_finite() && GRADE_RANGE.contains(&value) => Ok(()),
        Some(_) => Err(FieldError::range(
            field,
            format!(
                "must be within [{}, {}]",
                GRADE_RANGE.start(),
                GRADE_RANGE.end()
            ),
        )),
    }
}

/// An absent grade is allowed; a present one lies in [0, 20]
pub fn grade(value: Option<f64>) -> Result<(), FieldError> {
    score("grade", value)
}

/// GPA shares the grading scale
pub fn gpa(value: Option<f64>) -> Result<(), FieldError> {
    score("gpa", value)
}

pub fn units(units: i16) -> Result<(), FieldError> {
    if UNIT_RANGE.contains(&units) {
        Ok(())
    } else {
        Err(FieldError::range(
            "units",
            format!(
                "must be within {}..={}",
                UNIT_RANGE.start(),
                UNIT_RANGE.end()
            ),
        ))
    }
}

pub fn salary(amount: i64) -> Result<(), FieldError> {
    if amount < 0 {
        Err(FieldError::range("salary", "must not be negative"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_minimum_age_uses_given_date() {
        let today = date(2024, 6, 1);
        assert!(minimum_age(date(2009, 6, 1), today).is_ok());
        assert!(minimum_age(date(2009, 6, 2), today).is_err());
        assert!(minimum_age(date(1970, 1, 1), today).is_ok());
        assert!(minimum_age(date(2030, 1, 1), today).is_err());

        // The same birth date passes once the reference date moves on
        assert!(minimum_age(date(2009, 6, 2), date(2024, 6, 2)).is_ok());
    }

    #[test]
    fn test_hire_and_promotion_dates() {
        let today = date(2024, 1, 1);
        assert!(hire_date(date(2023, 12, 31), today).is_ok());
        assert!(hire_date(today, today).is_ok());
        assert!(hire_date(date(2024, 1, 2), today).is_err());

        let hired = date(2010, 9, 1);
        assert!(last_promotion(None, hired, today).is_ok());
        assert!(last_promotion(Some(date(2015, 3, 1)), hired, today).is_ok());
        assert!(last_promotion(Some(date(2009, 3, 1)), hired, today).is_err());
        assert!(last_promotion(Some(date(2025, 3, 1)), hired, today).is_err());

        assert!(contract_end(None, hired).is_ok());
        assert!(contract_end(Some(date(2030, 1, 1)), hired).is_ok());
        assert!(contract_end(Some(hired), hired).is_err());
    }

    #[test]
    fn test_entry_year() {
        let today = date(2024, 3, 1);
        assert!(entry_year(2024, today).is_ok());
        assert!(entry_year(2019, today).is_ok());
        assert!(entry_year(2025, today).is_err());
    }

    #[test]
    fn test_time_slot() {
        assert!(time_slot(time(10, 30), time(12, 0)).is_ok());
        assert!(time_slot(time(12, 0), time(10, 30)).is_err());
        assert!(time_slot(time(9, 0), time(9, 0)).is_err());
    }

    #[test]
    fn test_grade_bounds() {
        assert!(grade(None).is_ok());
        assert!(grade(Some(0.0)).is_ok());
        assert!(grade(Some(20.0)).is_ok());
        assert!(grade(Some(17.75)).is_ok());
        assert!(grade(Some(20.5)).is_err());
        assert!(grade(Some(-1.0)).is_err());
        assert!(grade(Some(f64::NAN)).is_err());

        let err = grade(Some(21.0)).unwrap_err();
        assert_eq!(err.field(), "grade");
    }

    #[test]
    fn test_units_and_capacity() {
        assert!(units(1).is_ok());
        assert!(units(3).is_ok());
        assert!(units(0).is_err());
        assert!(units(4).is_err());
        assert!(capacity(30).is_ok());
        assert!(capacity(0).is_err());
        assert!(salary(0).is_ok());
        assert!(salary(-5).is_err());
    }
}
