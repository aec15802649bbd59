use super::{
    pagination::{default_page, default_per_page},
    person::PersonResponse,
};
use chrono::NaiveDate;
use database::services::{
    employee::EmployeeRecord, professor::ProfessorRecord, student::StudentRecord,
};
use models::academic::{AcademicRank, Degree, EmploymentStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub person: PersonResponse,
    pub student_number: String,
    pub department_id: i32,
    pub department_name: String,
    pub faculty_name: String,
    pub entry_year: i32,
    pub enrollment_date: NaiveDate,
    pub degree: Degree,
    pub is_active: bool,
    pub major: String,
    pub minor: Option<String>,
    pub gpa: Option<f64>,
}

impl From<StudentRecord> for StudentResponse {
    fn from(record: StudentRecord) -> Self {
        let student = record.student;
        Self {
            id: student.id,
            person: record.person.into(),
            student_number: student.student_number,
            department_id: student.department_id,
            department_name: record.department.name,
            faculty_name: record.faculty.name,
            entry_year: student.entry_year,
            enrollment_date: student.enrollment_date,
            degree: student.degree,
            is_active: student.is_active,
            major: student.major,
            minor: student.minor,
            gpa: student.gpa,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub department_id: Option<i32>,
    pub degree: Option<Degree>,
    pub is_active: Option<bool>,
    pub entry_year: Option<i32>,

    /// Matches student number, national ID or name
    pub search: Option<String>,

    /// Sort by `last_name` or `entry_year`; prefix with `-` for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfessorResponse {
    pub id: i32,
    pub person: PersonResponse,
    pub personnel_code: String,
    pub faculty_id: i32,
    pub faculty_name: String,
    pub academic_rank: AcademicRank,
    pub salary: i64,
    pub employment_status: EmploymentStatus,
    pub hire_date: NaiveDate,
    pub last_promotion_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
    pub department_ids: Vec<i32>,
    pub course_ids: Vec<i32>,
}

impl From<ProfessorRecord> for ProfessorResponse {
    fn from(record: ProfessorRecord) -> Self {
        let professor = record.professor;
        Self {
            id: professor.id,
            person: record.person.into(),
            personnel_code: professor.personnel_code,
            faculty_id: professor.faculty_id,
            faculty_name: record.faculty.name,
            academic_rank: professor.academic_rank,
            salary: professor.salary,
            employment_status: professor.employment_status,
            hire_date: professor.hire_date,
            last_promotion_date: professor.last_promotion_date,
            contract_end_date: professor.contract_end_date,
            department_ids: record.department_ids,
            course_ids: record.course_ids,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProfessorQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub faculty_id: Option<i32>,
    pub academic_rank: Option<AcademicRank>,

    /// Matches personnel code or name
    pub search: Option<String>,

    /// Sort by `last_name` or `hire_date`; prefix with `-` for descending
    pub ordering: Option<String>,
}

/// The complete set of ids an association should hold
#[derive(Debug, Deserialize, ToSchema)]
pub struct IdSet {
    pub ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub person: PersonResponse,
    pub personnel_code: String,
    pub title: String,
    pub contract_date: NaiveDate,
}

impl From<EmployeeRecord> for EmployeeResponse {
    fn from(record: EmployeeRecord) -> Self {
        let employee = record.employee;
        Self {
            id: employee.id,
            person: record.person.into(),
            personnel_code: employee.personnel_code,
            title: employee.title,
            contract_date: employee.contract_date,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Matches personnel code, title or name
    pub search: Option<String>,
}
