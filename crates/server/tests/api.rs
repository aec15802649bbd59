use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use server::{app, state::AppState};
use tower::ServiceExt;

async fn test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    app(AppState { db })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|body| body.to_string())).await
}

/// Sends `body` verbatim as JSON, so malformed payloads reach the router
async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn faculty(code: &str) -> Value {
    json!({
        "name": "Faculty of Engineering",
        "code": code,
        "established_on": "1934-03-21",
        "website": null
    })
}

/// Creates a resource and returns its id
async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, created) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {created}");
    created["id"].as_i64().unwrap()
}

fn person(national_id: &str) -> Value {
    json!({
        "national_id": national_id,
        "first_name": "Sara",
        "last_name": "Karimi",
        "father_name": "Hassan",
        "birth_date": "1990-05-17",
        "gender": "female",
        "marital_status": "single",
        "blood_type": "O+",
        "nationality": "national"
    })
}

fn with_person(national_id: &str, role: Value) -> Value {
    let mut body = person(national_id);
    if let (Some(body), Value::Object(role)) = (body.as_object_mut(), role) {
        body.extend(role);
    }
    body
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_faculty_lifecycle() {
    let app = test_app().await;

    let (status, created) = send(&app, Method::POST, "/api/faculties", Some(faculty("ENG"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, page) = send(&app, Method::GET, "/api/faculties?search=eng", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["pagination"]["total_items"], 1);

    let (status, body) = send(&app, Method::POST, "/api/faculties", Some(faculty("ENG"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "uniqueness_violation");
    assert_eq!(body["fields"], json!(["code"]));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/faculties/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/faculties/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_invalid_input_lists_fields() {
    let app = test_app().await;
    let mut input = faculty("ENG");
    input["name"] = json!("  ");
    input["established_on"] = json!("2999-01-01");

    let (status, body) = send(&app, Method::POST, "/api/faculties", Some(input)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|field| field["field"].as_str())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"established_on"));
}

#[tokio::test]
async fn test_referenced_faculty_delete_conflicts() {
    let app = test_app().await;
    let (_, created) = send(&app, Method::POST, "/api/faculties", Some(faculty("ENG"))).await;
    let faculty_id = created["id"].as_i64().unwrap();

    let department = json!({
        "name": "Computer Engineering",
        "code": "CE",
        "faculty_id": faculty_id,
        "established_on": null
    });
    let (status, _) = send(&app, Method::POST, "/api/departments", Some(department.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send(&app, Method::DELETE, &format!("/api/faculties/{faculty_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "reference_violation");

    let mut orphan = department;
    orphan["code"] = json!("EE");
    orphan["faculty_id"] = json!(999);
    let (status, body) = send(&app, Method::POST, "/api/departments", Some(orphan)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "reference_violation");
}

#[tokio::test]
async fn test_openapi_document_lists_resources() {
    let app = test_app().await;
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "University Records API");
    for path in [
        "/api/faculties",
        "/api/students/{id}/enrollments",
        "/api/semesters/{id}/activate",
        "/api/enrollments/{id}",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
}

#[tokio::test]
async fn test_semester_activation_is_exclusive() {
    let app = test_app().await;
    let first = create(
        &app,
        "/api/semesters",
        json!({ "year": 1402, "term": 1, "is_active": true }),
    )
    .await;
    let second = create(&app, "/api/semesters", json!({ "year": 1402, "term": 2 })).await;

    let (status, activated) = send(
        &app,
        Method::POST,
        &format!("/api/semesters/{second}/activate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activated["id"], second);
    assert_eq!(activated["is_active"], true);

    let (_, previous) = send(&app, Method::GET, &format!("/api/semesters/{first}"), None).await;
    assert_eq!(previous["is_active"], false);

    let (status, body) = send(&app, Method::POST, "/api/semesters/999/activate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_student_enrollments_route() {
    let app = test_app().await;
    let faculty_id = create(&app, "/api/faculties", faculty("ENG")).await;
    let department_id = create(
        &app,
        "/api/departments",
        json!({ "name": "Computer Engineering", "code": "CE", "faculty_id": faculty_id }),
    )
    .await;
    let student_id = create(
        &app,
        "/api/students",
        with_person(
            "0012345678",
            json!({
                "student_number": "14020000000001",
                "department_id": department_id,
                "entry_year": 2022,
                "enrollment_date": "2022-09-01",
                "degree": "bachelor",
                "major": "Computer Engineering"
            }),
        ),
    )
    .await;
    let professor_id = create(
        &app,
        "/api/professors",
        with_person(
            "0087654321",
            json!({
                "personnel_code": "1000000001",
                "faculty_id": faculty_id,
                "academic_rank": "associate",
                "salary": 90000000,
                "employment_status": "full-time",
                "hire_date": "2010-09-01"
            }),
        ),
    )
    .await;
    let course_id = create(
        &app,
        "/api/courses",
        json!({ "name": "Compilers", "code": "4010101", "units": 3, "department_id": department_id }),
    )
    .await;
    let semester_id = create(&app, "/api/semesters", json!({ "year": 1402, "term": 1 })).await;
    let class_id = create(
        &app,
        "/api/class-schedules",
        json!({
            "course_id": course_id,
            "professor_id": professor_id,
            "semester_id": semester_id,
            "day": 1,
            "start_time": "10:30:00",
            "end_time": "12:00:00",
            "capacity": 30
        }),
    )
    .await;

    let uri = format!("/api/students/{student_id}/enrollments");
    let (status, enrollments) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrollments, json!([]));

    create(
        &app,
        "/api/enrollments",
        json!({ "student_id": student_id, "class_schedule_id": class_id }),
    )
    .await;
    let (status, enrollments) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let enrollments = enrollments.as_array().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["course_name"], "Compilers");
    assert_eq!(enrollments[0]["student_number"], "14020000000001");

    let (status, body) = send(&app, Method::GET, "/api/students/999/enrollments", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_malformed_requests_use_error_body() {
    let app = test_app().await;

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/faculties",
        Some("{\"name\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_request");
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/faculties",
        Some(json!({ "name": "Faculty of Science" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "malformed_request");

    let (status, body) = send(&app, Method::GET, "/api/faculties?page=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_request");

    let (status, body) = send(&app, Method::GET, "/api/faculties/first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_request");

    let (status, body) = send(&app, Method::GET, "/api/faculties?ordering=website", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "ordering");
}
