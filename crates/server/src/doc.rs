use utoipa::OpenApi;

/// API Documentation
///
/// Paths are collected from the routers in [`crate::app`].
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Faculties", description = "Faculty records"),
        (name = "Departments", description = "Departments within faculties"),
        (name = "People", description = "People and their contact details"),
        (name = "Students", description = "Student records and transcripts"),
        (name = "Professors", description = "Professors, their departments and courses"),
        (name = "Employees", description = "Staff records"),
        (name = "Courses", description = "Courses and prerequisites"),
        (name = "Semesters", description = "Academic terms"),
        (name = "Class Schedules", description = "Course offerings per semester"),
        (name = "Enrollments", description = "Student enrollments and grades"),
    ),
    info(
        title = "University Records API",
        version = "1.0.0",
        description = "Validated records of a university's people and academic structure",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
