use crate::{
    dtos::{
        academic::{EnrollmentQueryParams, EnrollmentResponse},
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
use database::services::enrollment::{EnrollmentFilter, EnrollmentService};
use models::records::{GradeUpdate, NewEnrollment};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_enrollments, create_enrollment))
        .routes(routes!(get_enrollment, update_enrollment_grade, delete_enrollment))
}

/// Get paginated list of enrollments
#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(EnrollmentQueryParams),
    responses(
        (status = 200, description = "Enrollments retrieved successfully", body = Page<EnrollmentResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<EnrollmentQueryParams>, ApiError>,
) -> Result<Json<Page<EnrollmentResponse>>, ApiError> {
    let filter = EnrollmentFilter {
        student_id: params.student_id,
        class_schedule_id: params.class_schedule_id,
        grade: params.grade,
        ordering: params.ordering,
    };
    let (enrollments, total_items) =
        EnrollmentService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        enrollments,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Enroll a student in a class schedule
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = NewEnrollment,
    responses(
        (status = 201, description = "Student enrolled", body = EnrollmentResponse),
        (status = 409, description = "Unknown student or class, or already enrolled"),
        (status = 422, description = "Grade out of range")
    ),
    tag = "Enrollments"
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewEnrollment>, ApiError>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let enrollment = EnrollmentService::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment found", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments"
)]
pub async fn get_enrollment(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let enrollment = EnrollmentService::get(&state.db, id).await?;
    Ok(Json(enrollment.into()))
}

/// Set or clear the grade of an enrollment
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    request_body = GradeUpdate,
    responses(
        (status = 200, description = "Grade updated", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found"),
        (status = 422, description = "Grade out of range")
    ),
    tag = "Enrollments"
)]
pub async fn update_enrollment_grade(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<GradeUpdate>, ApiError>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let enrollment = EnrollmentService::update_grade(&state.db, id, input).await?;
    Ok(Json(enrollment.into()))
}

#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment removed"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments"
)]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    EnrollmentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
