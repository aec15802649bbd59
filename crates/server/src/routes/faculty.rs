use super::today;
use crate::{
    dtos::{
        faculty::{FacultyQueryParams, FacultyResponse},
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
use database::services::faculty::{FacultyFilter, FacultyService};
use models::records::NewFaculty;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_faculties, create_faculty))
        .routes(routes!(get_faculty, update_faculty, delete_faculty))
}

/// Get paginated list of faculties
#[utoipa::path(
    get,
    path = "/api/faculties",
    params(FacultyQueryParams),
    responses(
        (status = 200, description = "Faculties retrieved successfully", body = Page<FacultyResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faculties"
)]
pub async fn list_faculties(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<FacultyQueryParams>, ApiError>,
) -> Result<Json<Page<FacultyResponse>>, ApiError> {
    let filter = FacultyFilter {
        search: params.search,
        ordering: params.ordering,
    };
    let (faculties, total_items) =
        FacultyService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        faculties,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Create a faculty
#[utoipa::path(
    post,
    path = "/api/faculties",
    request_body = NewFaculty,
    responses(
        (status = 201, description = "Faculty created", body = FacultyResponse),
        (status = 409, description = "Faculty code already taken"),
        (status = 422, description = "Invalid faculty")
    ),
    tag = "Faculties"
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewFaculty>, ApiError>,
) -> Result<(StatusCode, Json<FacultyResponse>), ApiError> {
    let faculty = FacultyService::create(&state.db, input, today()).await?;
    Ok((StatusCode::CREATED, Json(faculty.into())))
}

/// Get a specific faculty by ID
#[utoipa::path(
    get,
    path = "/api/faculties/{id}",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty found", body = FacultyResponse),
        (status = 404, description = "Faculty not found")
    ),
    tag = "Faculties"
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<FacultyResponse>, ApiError> {
    let faculty = FacultyService::get(&state.db, id).await?;
    Ok(Json(faculty.into()))
}

/// Replace a faculty's attributes
#[utoipa::path(
    put,
    path = "/api/faculties/{id}",
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = NewFaculty,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyResponse),
        (status = 404, description = "Faculty not found"),
        (status = 409, description = "Faculty code already taken"),
        (status = 422, description = "Invalid faculty")
    ),
    tag = "Faculties"
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewFaculty>, ApiError>,
) -> Result<Json<FacultyResponse>, ApiError> {
    let faculty = FacultyService::update(&state.db, id, input, today()).await?;
    Ok(Json(faculty.into()))
}

/// Delete a faculty with no departments or professors
#[utoipa::path(
    delete,
    path = "/api/faculties/{id}",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 204, description = "Faculty deleted"),
        (status = 404, description = "Faculty not found"),
        (status = 409, description = "Departments or professors still belong to the faculty")
    ),
    tag = "Faculties"
)]
pub async fn delete_faculty(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    FacultyService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
