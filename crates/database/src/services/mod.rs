pub mod class_schedule;
pub mod contact;
pub mod course;
pub mod department;
pub mod employee;
pub mod enrollment;
pub mod faculty;
pub mod member;
pub mod person;
pub mod professor;
pub mod semester;
pub mod student;
mod support;

pub use support::{DEFAULT_PER_PAGE, MAX_PER_PAGE, page_number, page_size};
