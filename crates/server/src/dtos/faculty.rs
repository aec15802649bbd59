use super::pagination::{default_page, default_per_page};
use chrono::NaiveDate;
use database::entities::{departments, faculties};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyResponse {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub established_on: Option<NaiveDate>,
    pub website: Option<String>,
}

impl From<faculties::Model> for FacultyResponse {
    fn from(faculty: faculties::Model) -> Self {
        Self {
            id: faculty.id,
            name: faculty.name,
            code: faculty.code,
            established_on: faculty.established_on,
            website: faculty.website,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FacultyQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Matches name or code
    pub search: Option<String>,

    /// Sort by `name` or `code`; prefix with `-` for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub faculty_id: i32,
    pub established_on: Option<NaiveDate>,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(department: departments::Model) -> Self {
        Self {
            id: department.id,
            name: department.name,
            code: department.code,
            faculty_id: department.faculty_id,
            established_on: department.established_on,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DepartmentQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub faculty_id: Option<i32>,

    /// Matches name or code
    pub search: Option<String>,
}
