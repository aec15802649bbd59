use crate::{
    dtos::{
        academic::{SemesterQueryParams, SemesterResponse},
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
use database::services::semester::{SemesterFilter, SemesterService};
use models::records::NewSemester;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_semesters, create_semester))
        .routes(routes!(get_semester, update_semester, delete_semester))
        .routes(routes!(activate_semester))
}

/// Get paginated list of semesters, newest first
#[utoipa::path(
    get,
    path = "/api/semesters",
    params(SemesterQueryParams),
    responses(
        (status = 200, description = "Semesters retrieved successfully", body = Page<SemesterResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Semesters"
)]
pub async fn list_semesters(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<SemesterQueryParams>, ApiError>,
) -> Result<Json<Page<SemesterResponse>>, ApiError> {
    let filter = SemesterFilter {
        year: params.year,
        term: params.term,
        is_active: params.is_active,
        ordering: params.ordering,
    };
    let (semesters, total_items) =
        SemesterService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        semesters,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Create a semester; creating it active deactivates all others
#[utoipa::path(
    post,
    path = "/api/semesters",
    request_body = NewSemester,
    responses(
        (status = 201, description = "Semester created", body = SemesterResponse),
        (status = 409, description = "The term already exists for that year"),
        (status = 422, description = "Invalid semester")
    ),
    tag = "Semesters"
)]
pub async fn create_semester(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewSemester>, ApiError>,
) -> Result<(StatusCode, Json<SemesterResponse>), ApiError> {
    let semester = SemesterService::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(semester.into())))
}

#[utoipa::path(
    get,
    path = "/api/semesters/{id}",
    params(("id" = i32, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester found", body = SemesterResponse),
        (status = 404, description = "Semester not found")
    ),
    tag = "Semesters"
)]
pub async fn get_semester(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<SemesterResponse>, ApiError> {
    let semester = SemesterService::get(&state.db, id).await?;
    Ok(Json(semester.into()))
}

#[utoipa::path(
    put,
    path = "/api/semesters/{id}",
    params(("id" = i32, Path, description = "Semester ID")),
    request_body = NewSemester,
    responses(
        (status = 200, description = "Semester updated", body = SemesterResponse),
        (status = 404, description = "Semester not found"),
        (status = 409, description = "The term already exists for that year"),
        (status = 422, description = "Invalid semester")
    ),
    tag = "Semesters"
)]
pub async fn update_semester(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewSemester>, ApiError>,
) -> Result<Json<SemesterResponse>, ApiError> {
    let semester = SemesterService::update(&state.db, id, input).await?;
    Ok(Json(semester.into()))
}

#[utoipa::path(
    delete,
    path = "/api/semesters/{id}",
    params(("id" = i32, Path, description = "Semester ID")),
    responses(
        (status = 204, description = "Semester deleted"),
        (status = 404, description = "Semester not found"),
        (status = 409, description = "The semester still has class schedules")
    ),
    tag = "Semesters"
)]
pub async fn delete_semester(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    SemesterService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Make a semester the only active one
#[utoipa::path(
    post,
    path = "/api/semesters/{id}/activate",
    params(("id" = i32, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester activated", body = SemesterResponse),
        (status = 404, description = "Semester not found")
    ),
    tag = "Semesters"
)]
pub async fn activate_semester(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<SemesterResponse>, ApiError> {
    let semester = SemesterService::activate(&state.db, id).await?;
    Ok(Json(semester.into()))
}
