use crate::{
    dtos::{
        academic::{ClassScheduleQueryParams, ClassScheduleResponse, EnrollmentResponse},
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
use database::services::class_schedule::{ClassScheduleFilter, ClassScheduleService};
use models::records::NewClassSchedule;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_class_schedules, create_class_schedule))
        .routes(routes!(
            get_class_schedule,
            update_class_schedule,
            delete_class_schedule
        ))
        .routes(routes!(get_class_schedule_enrollments))
}

/// Get paginated list of class schedules
#[utoipa::path(
    get,
    path = "/api/class-schedules",
    params(ClassScheduleQueryParams),
    responses(
        (status = 200, description = "Class schedules retrieved successfully", body = Page<ClassScheduleResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Class Schedules"
)]
pub async fn list_class_schedules(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ClassScheduleQueryParams>, ApiError>,
) -> Result<Json<Page<ClassScheduleResponse>>, ApiError> {
    let filter = ClassScheduleFilter {
        course_id: params.course_id,
        professor_id: params.professor_id,
        semester_id: params.semester_id,
        day: params.day,
        search: params.search,
        ordering: params.ordering,
    };
    let (schedules, total_items) =
        ClassScheduleService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        schedules,
        params.page,
        params.per_page,
        total_items,
    )))
}

#[utoipa::path(
    post,
    path = "/api/class-schedules",
    request_body = NewClassSchedule,
    responses(
        (status = 201, description = "Class schedule created", body = ClassScheduleResponse),
        (status = 409, description = "Unknown course, professor or semester"),
        (status = 422, description = "Invalid class schedule")
    ),
    tag = "Class Schedules"
)]
pub async fn create_class_schedule(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewClassSchedule>, ApiError>,
) -> Result<(StatusCode, Json<ClassScheduleResponse>), ApiError> {
    let schedule = ClassScheduleService::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(schedule.into())))
}

#[utoipa::path(
    get,
    path = "/api/class-schedules/{id}",
    params(("id" = i32, Path, description = "Class schedule ID")),
    responses(
        (status = 200, description = "Class schedule found", body = ClassScheduleResponse),
        (status = 404, description = "Class schedule not found")
    ),
    tag = "Class Schedules"
)]
pub async fn get_class_schedule(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<ClassScheduleResponse>, ApiError> {
    let schedule = ClassScheduleService::get(&state.db, id).await?;
    Ok(Json(schedule.into()))
}

#[utoipa::path(
    put,
    path = "/api/class-schedules/{id}",
    params(("id" = i32, Path, description = "Class schedule ID")),
    request_body = NewClassSchedule,
    responses(
        (status = 200, description = "Class schedule updated", body = ClassScheduleResponse),
        (status = 404, description = "Class schedule not found"),
        (status = 409, description = "Unknown course, professor or semester"),
        (status = 422, description = "Invalid class schedule")
    ),
    tag = "Class Schedules"
)]
pub async fn update_class_schedule(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewClassSchedule>, ApiError>,
) -> Result<Json<ClassScheduleResponse>, ApiError> {
    let schedule = ClassScheduleService::update(&state.db, id, input).await?;
    Ok(Json(schedule.into()))
}

#[utoipa::path(
    delete,
    path = "/api/class-schedules/{id}",
    params(("id" = i32, Path, description = "Class schedule ID")),
    responses(
        (status = 204, description = "Class schedule deleted"),
        (status = 404, description = "Class schedule not found"),
        (status = 409, description = "Students are still enrolled")
    ),
    tag = "Class Schedules"
)]
pub async fn delete_class_schedule(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    ClassScheduleService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the roster of a class schedule
#[utoipa::path(
    get,
    path = "/api/class-schedules/{id}/enrollments",
    params(("id" = i32, Path, description = "Class schedule ID")),
    responses(
        (status = 200, description = "Roster retrieved successfully", body = Vec<EnrollmentResponse>),
        (status = 404, description = "Class schedule not found")
    ),
    tag = "Class Schedules"
)]
pub async fn get_class_schedule_enrollments(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let roster = ClassScheduleService::enrollments(&state.db, id).await?;
    Ok(Json(roster.into_iter().map(Into::into).collect()))
}
