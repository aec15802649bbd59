//! Input shapes for creating and updating records, with their validation

use crate::{
    academic::{AcademicRank, Degree, EmploymentStatus, Term, Weekday},
    error::{FieldError, ValidationErrors, Violations},
    person::PersonInfo,
    rules, validate,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewFaculty {
    pub name: String,
    pub code: String,
    pub established_on: Option<NaiveDate>,
    pub website: Option<String>,
}

impl NewFaculty {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations
            .check(validate::not_blank("name", &self.name))
            .check(validate::not_blank("code", &self.code));
        if let Some(established_on) = self.established_on {
            violations.check(rules::not_in_future("established_on", established_on, today));
        }
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewDepartment {
    pub name: String,
    pub code: String,
    pub faculty_id: i32,
    pub established_on: Option<NaiveDate>,
}

impl NewDepartment {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations
            .check(validate::not_blank("name", &self.name))
            .check(validate::not_blank("code", &self.code));
        if let Some(established_on) = self.established_on {
            violations.check(rules::not_in_future("established_on", established_on, today));
        }
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewStudent {
    #[serde(flatten)]
    pub person: PersonInfo,
    pub student_number: String,
    pub department_id: i32,
    pub entry_year: i32,
    pub enrollment_date: NaiveDate,
    pub degree: Degree,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub major: String,
    pub minor: Option<String>,
    pub gpa: Option<f64>,
}

fn default_active() -> bool {
    true
}

impl NewStudent {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut violations = self.person.violations(today);
        violations
            .check(validate::student_id(&self.student_number))
            .check(rules::entry_year(self.entry_year, today))
            .check(rules::not_in_future("enrollment_date", self.enrollment_date, today))
            .check(validate::not_blank("major", &self.major))
            .check(rules::gpa(self.gpa));
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewProfessor {
    #[serde(flatten)]
    pub person: PersonInfo,
    pub personnel_code: String,
    pub faculty_id: i32,
    pub academic_rank: AcademicRank,
    pub salary: i64,
    pub employment_status: EmploymentStatus,
    pub hire_date: NaiveDate,
    pub last_promotion_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
}

impl NewProfessor {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut violations = self.person.violations(today);
        violations
            .check(validate::personnel_code(&self.personnel_code))
            .check(rules::salary(self.salary))
            .check(rules::hire_date(self.hire_date, today))
            .check(rules::last_promotion(
                self.last_promotion_date,
                self.hire_date,
                today,
            ))
            .check(rules::contract_end(self.contract_end_date, self.hire_date));
        violations.finish()
    }
}

/// An employee's contract record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewEmployee {
    #[serde(flatten)]
    pub person: PersonInfo,
    pub personnel_code: String,
    pub title: String,
    pub contract_date: NaiveDate,
}

impl NewEmployee {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut violations = self.person.violations(today);
        violations
            .check(validate::personnel_code(&self.personnel_code))
            .check(validate::not_blank("title", &self.title))
            .check(rules::not_in_future("contract_date", self.contract_date, today));
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub units: i16,
    pub department_id: i32,
    #[serde(default)]
    pub prerequisites: Vec<i32>,
}

impl NewCourse {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations
            .check(validate::not_blank("name", &self.name))
            .check(validate::course_code(&self.code))
            .check(rules::units(self.units));
        violations.finish()
    }

    /// A course may not require itself
    pub fn check_prerequisites(&self, course_id: i32) -> Result<(), FieldError> {
        if self.prerequisites.contains(&course_id) {
            Err(FieldError::range(
                "prerequisites",
                "a course cannot be its own prerequisite",
            ))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewSemester {
    pub year: i32,
    #[schema(value_type = i16, minimum = 1, maximum = 3)]
    pub term: Term,
    #[serde(default)]
    pub is_active: bool,
}

impl NewSemester {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        if self.year <= 0 {
            violations.check(Err(FieldError::range("year", "must be positive")));
        }
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewClassSchedule {
    pub course_id: i32,
    pub professor_id: i32,
    pub semester_id: i32,
    #[schema(value_type = i16, minimum = 0, maximum = 5)]
    pub day: Weekday,
    #[schema(value_type = String, example = "10:30:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "12:00:00")]
    pub end_time: NaiveTime,
    pub capacity: i32,
}

impl NewClassSchedule {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations
            .check(rules::time_slot(self.start_time, self.end_time))
            .check(rules::capacity(self.capacity));
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub class_schedule_id: i32,
    pub grade: Option<f64>,
}

impl NewEnrollment {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations.check(rules::grade(self.grade));
        violations.finish()
    }
}

/// Sets or clears the grade of an existing enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GradeUpdate {
    pub grade: Option<f64>,
}

impl GradeUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        rules::grade(self.grade).map_err(ValidationErrors::from)
    }
}
