use super::today;
use crate::{
    dtos::{
        academic::EnrollmentResponse,
        member::{StudentQueryParams, StudentResponse},
        pagination::Page,
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use database::services::student::{StudentFilter, StudentService};
use models::records::NewStudent;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_students, create_student))
        .routes(routes!(get_student, update_student, delete_student))
        .routes(routes!(get_student_enrollments))
}

/// Get paginated list of students
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Students retrieved successfully", body = Page<StudentResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<StudentQueryParams>, ApiError>,
) -> Result<Json<Page<StudentResponse>>, ApiError> {
    let filter = StudentFilter {
        department_id: params.department_id,
        degree: params.degree,
        is_active: params.is_active,
        entry_year: params.entry_year,
        search: params.search,
        ordering: params.ordering,
    };
    let (students, total_items) =
        StudentService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        students,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Register a student; an existing person with the same national ID is refreshed
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = NewStudent,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 409, description = "Unknown department or student number already taken"),
        (status = 422, description = "Invalid student")
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewStudent>, ApiError>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let student = StudentService::create(&state.db, input, today()).await?;
    Ok((StatusCode::CREATED, Json(student.into())))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentService::get(&state.db, id).await?;
    Ok(Json(student.into()))
}

/// Replace a student's attributes; the national ID is fixed
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = NewStudent,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Unknown department or student number already taken"),
        (status = 422, description = "Invalid student")
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewStudent>, ApiError>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentService::update(&state.db, id, input, today()).await?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "The student still has enrollments")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    StudentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get every enrollment of a student
#[utoipa::path(
    get,
    path = "/api/students/{id}/enrollments",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Enrollments retrieved successfully", body = Vec<EnrollmentResponse>),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student_enrollments(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let enrollments = StudentService::enrollments(&state.db, id).await?;
    Ok(Json(enrollments.into_iter().map(Into::into).collect()))
}
