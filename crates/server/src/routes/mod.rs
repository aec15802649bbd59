use chrono::{Local, NaiveDate};

pub mod class_schedule;
pub mod course;
pub mod department;
pub mod employee;
pub mod enrollment;
pub mod faculty;
pub mod health;
pub mod person;
pub mod professor;
pub mod semester;
pub mod student;

/// Reference date for date rules, read once per request
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
