use super::pagination::{default_page, default_per_page};
use chrono::{NaiveDateTime, NaiveTime};
use database::{
    entities::{courses, semesters},
    services::{
        class_schedule::ClassScheduleRecord, course::CourseRecord, enrollment::EnrollmentRecord,
    },
};
use models::academic::{Term, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSummary {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<courses::Model> for CourseSummary {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub units: i16,
    pub department_id: i32,
    pub prerequisites: Vec<CourseSummary>,
}

impl From<CourseRecord> for CourseResponse {
    fn from(record: CourseRecord) -> Self {
        let course = record.course;
        Self {
            id: course.id,
            name: course.name,
            code: course.code,
            units: course.units,
            department_id: course.department_id,
            prerequisites: record.prerequisites.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub department_id: Option<i32>,
    pub units: Option<i16>,

    /// Matches name or code
    pub search: Option<String>,

    /// Sort by `name` or `code`; prefix with `-` for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SemesterResponse {
    pub id: i32,
    pub year: i32,
    #[schema(value_type = i16)]
    pub term: Term,
    pub is_active: bool,
    /// e.g. "first half 1402"
    pub display: String,
}

impl From<semesters::Model> for SemesterResponse {
    fn from(semester: semesters::Model) -> Self {
        Self {
            display: semester.display(),
            id: semester.id,
            year: semester.year,
            term: semester.term,
            is_active: semester.is_active,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SemesterQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub year: Option<i32>,
    #[param(value_type = Option<i16>, minimum = 1, maximum = 3)]
    pub term: Option<Term>,
    pub is_active: Option<bool>,

    /// Sort by `year` or `term`; prefix with `-` for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassScheduleResponse {
    pub id: i32,
    pub course_id: i32,
    pub course_code: String,
    pub course_name: String,
    pub professor_id: i32,
    pub professor_name: String,
    pub semester_id: i32,
    pub semester: String,
    #[schema(value_type = i16)]
    pub day: Weekday,
    pub day_name: String,
    #[schema(value_type = String, example = "10:30:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "12:00:00")]
    pub end_time: NaiveTime,
    pub capacity: i32,
}

impl From<ClassScheduleRecord> for ClassScheduleResponse {
    fn from(record: ClassScheduleRecord) -> Self {
        let schedule = record.schedule;
        Self {
            id: schedule.id,
            course_id: schedule.course_id,
            course_code: record.course.code,
            course_name: record.course.name,
            professor_id: schedule.professor_id,
            professor_name: record.professor_name,
            semester_id: schedule.semester_id,
            semester: record.semester.display(),
            day: schedule.day,
            day_name: schedule.day.to_string(),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            capacity: schedule.capacity,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClassScheduleQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub course_id: Option<i32>,
    pub professor_id: Option<i32>,
    pub semester_id: Option<i32>,
    /// 0 (Saturday) to 5 (Thursday)
    #[param(value_type = Option<i16>, minimum = 0, maximum = 5)]
    pub day: Option<Weekday>,

    /// Matches course name or professor last name
    pub search: Option<String>,

    /// Sort by `course_name` or `start_time`; prefix with `-` for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: i32,
    pub student_id: i32,
    pub student_number: String,
    pub student_name: String,
    pub class_schedule_id: i32,
    pub course_name: String,
    pub semester: String,
    pub grade: Option<f64>,
    pub enrolled_at: NaiveDateTime,
}

impl From<EnrollmentRecord> for EnrollmentResponse {
    fn from(record: EnrollmentRecord) -> Self {
        let enrollment = record.enrollment;
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            student_number: record.student.student_number,
            student_name: record.student_name,
            class_schedule_id: enrollment.class_schedule_id,
            course_name: record.class.course.name,
            semester: record.class.semester.display(),
            grade: enrollment.grade,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EnrollmentQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub student_id: Option<i32>,
    pub class_schedule_id: Option<i32>,
    pub grade: Option<f64>,

    /// Sort by `enrolled_at` or `grade`; prefix with `-` for descending
    pub ordering: Option<String>,
}
