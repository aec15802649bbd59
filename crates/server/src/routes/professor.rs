use super::today;
use crate::{
    dtos::{
        academic::ClassScheduleResponse,
        member::{IdSet, ProfessorQueryParams, ProfessorResponse},
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
use database::services::professor::{ProfessorFilter, ProfessorService};
use models::records::NewProfessor;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_professors, create_professor))
        .routes(routes!(get_professor, update_professor, delete_professor))
        .routes(routes!(get_professor_classes))
        .routes(routes!(set_professor_departments))
        .routes(routes!(set_professor_courses))
}

/// Get paginated list of professors
#[utoipa::path(
    get,
    path = "/api/professors",
    params(ProfessorQueryParams),
    responses(
        (status = 200, description = "Professors retrieved successfully", body = Page<ProfessorResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Professors"
)]
pub async fn list_professors(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ProfessorQueryParams>, ApiError>,
) -> Result<Json<Page<ProfessorResponse>>, ApiError> {
    let filter = ProfessorFilter {
        faculty_id: params.faculty_id,
        academic_rank: params.academic_rank,
        search: params.search,
        ordering: params.ordering,
    };
    let (professors, total_items) =
        ProfessorService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        professors,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Hire a professor; an existing person with the same national ID is refreshed
#[utoipa::path(
    post,
    path = "/api/professors",
    request_body = NewProfessor,
    responses(
        (status = 201, description = "Professor created", body = ProfessorResponse),
        (status = 409, description = "Unknown faculty or personnel code already taken"),
        (status = 422, description = "Invalid professor")
    ),
    tag = "Professors"
)]
pub async fn create_professor(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewProfessor>, ApiError>,
) -> Result<(StatusCode, Json<ProfessorResponse>), ApiError> {
    let professor = ProfessorService::create(&state.db, input, today()).await?;
    Ok((StatusCode::CREATED, Json(professor.into())))
}

#[utoipa::path(
    get,
    path = "/api/professors/{id}",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor found", body = ProfessorResponse),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors"
)]
pub async fn get_professor(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let professor = ProfessorService::get(&state.db, id).await?;
    Ok(Json(professor.into()))
}

/// Replace a professor's attributes; the national ID is fixed
#[utoipa::path(
    put,
    path = "/api/professors/{id}",
    params(("id" = i32, Path, description = "Professor ID")),
    request_body = NewProfessor,
    responses(
        (status = 200, description = "Professor updated", body = ProfessorResponse),
        (status = 404, description = "Professor not found"),
        (status = 409, description = "Unknown faculty or personnel code already taken"),
        (status = 422, description = "Invalid professor")
    ),
    tag = "Professors"
)]
pub async fn update_professor(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewProfessor>, ApiError>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let professor = ProfessorService::update(&state.db, id, input, today()).await?;
    Ok(Json(professor.into()))
}

#[utoipa::path(
    delete,
    path = "/api/professors/{id}",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 204, description = "Professor deleted"),
        (status = 404, description = "Professor not found"),
        (status = 409, description = "The professor still teaches class schedules")
    ),
    tag = "Professors"
)]
pub async fn delete_professor(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    ProfessorService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the class schedules a professor teaches
#[utoipa::path(
    get,
    path = "/api/professors/{id}/classes",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Classes retrieved successfully", body = Vec<ClassScheduleResponse>),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors"
)]
pub async fn get_professor_classes(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Vec<ClassScheduleResponse>>, ApiError> {
    let classes = ProfessorService::classes(&state.db, id).await?;
    Ok(Json(classes.into_iter().map(Into::into).collect()))
}

/// Replace the departments a professor belongs to
#[utoipa::path(
    put,
    path = "/api/professors/{id}/departments",
    params(("id" = i32, Path, description = "Professor ID")),
    request_body = IdSet,
    responses(
        (status = 200, description = "Departments replaced", body = ProfessorResponse),
        (status = 404, description = "Professor not found"),
        (status = 409, description = "Unknown department")
    ),
    tag = "Professors"
)]
pub async fn set_professor_departments(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<IdSet>, ApiError>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let professor = ProfessorService::set_departments(&state.db, id, input.ids).await?;
    Ok(Json(professor.into()))
}

/// Replace the courses a professor teaches
#[utoipa::path(
    put,
    path = "/api/professors/{id}/courses",
    params(("id" = i32, Path, description = "Professor ID")),
    request_body = IdSet,
    responses(
        (status = 200, description = "Courses replaced", body = ProfessorResponse),
        (status = 404, description = "Professor not found"),
        (status = 409, description = "Unknown course")
    ),
    tag = "Professors"
)]
pub async fn set_professor_courses(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<IdSet>, ApiError>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let professor = ProfessorService::set_courses(&state.db, id, input.ids).await?;
    Ok(Json(professor.into()))
}
