use super::today;
use crate::{
    dtos::{
        member::{EmployeeQueryParams, EmployeeResponse},
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
use database::services::employee::{EmployeeFilter, EmployeeService};
use models::records::NewEmployee;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_employees, create_employee))
        .routes(routes!(get_employee, delete_employee))
}

/// Get paginated list of employee contracts
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQueryParams),
    responses(
        (status = 200, description = "Employees retrieved successfully", body = Page<EmployeeResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<EmployeeQueryParams>, ApiError>,
) -> Result<Json<Page<EmployeeResponse>>, ApiError> {
    let filter = EmployeeFilter {
        search: params.search,
    };
    let (employees, total_items) =
        EmployeeService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        employees,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Record an employment contract
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Contract recorded", body = EmployeeResponse),
        (status = 409, description = "Personnel code already taken"),
        (status = 422, description = "Invalid contract")
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewEmployee>, ApiError>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    let employee = EmployeeService::create(&state.db, input, today()).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee contract ID")),
    responses(
        (status = 200, description = "Contract found", body = EmployeeResponse),
        (status = 404, description = "Contract not found")
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = EmployeeService::get(&state.db, id).await?;
    Ok(Json(employee.into()))
}

/// End a contract; the person remains
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee contract ID")),
    responses(
        (status = 204, description = "Contract deleted"),
        (status = 404, description = "Contract not found")
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    EmployeeService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
