use crate::{
    dtos::{
        academic::{ClassScheduleResponse, CourseQueryParams, CourseResponse},
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
use database::services::course::{CourseFilter, CourseService};
use models::records::NewCourse;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_courses, create_course))
        .routes(routes!(get_course_by_id, update_course, delete_course))
        .routes(routes!(get_course_classes))
}

/// Get paginated list of courses
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = Page<CourseResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<CourseQueryParams>, ApiError>,
) -> Result<Json<Page<CourseResponse>>, ApiError> {
    let filter = CourseFilter {
        department_id: params.department_id,
        units: params.units,
        search: params.search,
        ordering: params.ordering,
    };
    let (courses, total_items) =
        CourseService::list(&state.db, &filter, params.page, params.per_page).await?;

    Ok(Json(Page::from_items(
        courses,
        params.page,
        params.per_page,
        total_items,
    )))
}

/// Create a course together with its prerequisite set
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = NewCourse,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 409, description = "Unknown department or prerequisite, or course code already taken"),
        (status = 422, description = "Invalid course")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewCourse>, ApiError>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = CourseService::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = CourseService::get(&state.db, id).await?;
    Ok(Json(course.into()))
}

/// Replace a course's attributes and prerequisite set
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = NewCourse,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Unknown department or prerequisite, or course code already taken"),
        (status = 422, description = "Invalid course")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewCourse>, ApiError>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = CourseService::update(&state.db, id, input).await?;
    Ok(Json(course.into()))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "The course still has class schedules")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    CourseService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the class schedules offered for a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/classes",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Classes retrieved successfully", body = Vec<ClassScheduleResponse>),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course_classes(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Vec<ClassScheduleResponse>>, ApiError> {
    let classes = CourseService::classes(&state.db, id).await?;
    Ok(Json(classes.into_iter().map(Into::into).collect()))
}
