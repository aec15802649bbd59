use super::today;
use crate::{
    dtos::{
        faculty::{DepartmentQueryParams, DepartmentResponse},
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
use database::services::department::{DepartmentFilter, DepartmentService};
use models::records::NewDepartment;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_departments, create_department))
        .routes(routes!(get_department, update_department, delete_department))
}

/// Get paginated list of departments
#[utoipa::path(
    get,
    path = "/api/departments",
    params(DepartmentQueryParams),
    responses(
        (status = 200, description = "Departments retrieved successfully", body = Page<DepartmentResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Departments"
)]
pub async fn list_departments(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<DepartmentQueryParams>, ApiError>,
) -> Result<Json<Page<DepartmentResponse>>, ApiError> {
    let filter = DepartmentFilter {
        faculty_id: params.faculty_id,
        search: params.search,
    };
    let (departments, total_items) =
        DepartmentService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        departments,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Create a department in an existing faculty
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = NewDepartment,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 409, description = "Unknown faculty or department code already taken"),
        (status = 422, description = "Invalid department")
    ),
    tag = "Departments"
)]
pub async fn create_department(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewDepartment>, ApiError>,
) -> Result<(StatusCode, Json<DepartmentResponse>), ApiError> {
    let department = DepartmentService::create(&state.db, input, today()).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department found", body = DepartmentResponse),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments"
)]
pub async fn get_department(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let department = DepartmentService::get(&state.db, id).await?;
    Ok(Json(department.into()))
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(("id" = i32, Path, description = "Department ID")),
    request_body = NewDepartment,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Unknown faculty or department code already taken"),
        (status = 422, description = "Invalid department")
    ),
    tag = "Departments"
)]
pub async fn update_department(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewDepartment>, ApiError>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let department = DepartmentService::update(&state.db, id, input, today()).await?;
    Ok(Json(department.into()))
}

/// Delete a department with no courses or students
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Courses or students still belong to the department")
    ),
    tag = "Departments"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    DepartmentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
