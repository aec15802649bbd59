mod common;

use common::*;
use database::{
    error::ServiceError,
    services::{
        course::CourseService,
        department::{DepartmentFilter, DepartmentService},
        employee::EmployeeService,
        faculty::{FacultyFilter, FacultyService},
        member::{MemberRecord, MemberService},
        person::PersonService,
        professor::{ProfessorFilter, ProfessorService},
        student::{StudentFilter, StudentService},
    },
};
use models::{
    integrity::Table,
    person::Member,
    records::{NewCourse, NewEmployee},
};

fn new_course(code: &str, department_id: i32, prerequisites: Vec<i32>) -> NewCourse {
    NewCourse {
        name: format!("Course {code}"),
        code: code.to_string(),
        units: 3,
        department_id,
        prerequisites,
    }
}

#[tokio::test]
async fn test_faculty_crud_and_search() {
    let db = setup_test_db().await;
    let engineering = FacultyService::create(&db, new_faculty("ENG"), today())
        .await
        .unwrap();
    FacultyService::create(&db, new_faculty("SCI"), today())
        .await
        .unwrap();

    let filter = FacultyFilter {
        search: Some(" eng ".to_string()),
        ..Default::default()
    };
    let (found, total) = FacultyService::list(&db, &filter, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].id, engineering.id);

    let by_code = FacultyFilter {
        ordering: Some("-code".to_string()),
        ..Default::default()
    };
    let (found, _) = FacultyService::list(&db, &by_code, 1, 10).await.unwrap();
    let codes: Vec<&str> = found.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, ["SCI", "ENG"]);

    let unknown = FacultyFilter {
        ordering: Some("website".to_string()),
        ..Default::default()
    };
    match FacultyService::list(&db, &unknown, 1, 10).await.unwrap_err() {
        ServiceError::Validation(errors) => assert!(errors.has_field("ordering")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut renamed = new_faculty("ENG");
    renamed.name = "School of Engineering".to_string();
    let updated = FacultyService::update(&db, engineering.id, renamed, today())
        .await
        .unwrap();
    assert_eq!(updated.name, "School of Engineering");

    let missing = FacultyService::get(&db, 999).await.unwrap_err();
    assert!(matches!(
        missing,
        ServiceError::NotFound {
            entity: Table::Faculty,
            ..
        }
    ));
}

#[tokio::test]
async fn test_faculty_founded_in_future_is_rejected() {
    let db = setup_test_db().await;
    let mut faculty = new_faculty("ENG");
    faculty.established_on = Some(date(2030, 1, 1));

    let err = FacultyService::create(&db, faculty, today()).await.unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("established_on")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_department_requires_existing_faculty() {
    let db = setup_test_db().await;
    let err = DepartmentService::create(&db, new_department("CE", 42), today())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ReferenceViolation {
            entity: Table::Department,
            ..
        }
    ));

    let (departments, total) =
        DepartmentService::list(&db, &DepartmentFilter::default(), 1, 20)
            .await
            .unwrap();
    assert!(departments.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_duplicate_department_code() {
    let db = setup_test_db().await;
    let (faculty_id, _) = faculty_with_department(&db).await;

    let err = DepartmentService::create(&db, new_department("CE", faculty_id), today())
        .await
        .unwrap_err();
    match err {
        ServiceError::UniquenessViolation { entity, fields } => {
            assert_eq!(entity, Table::Department);
            assert_eq!(fields, vec!["code".to_string()]);
        }
        other => panic!("expected uniqueness violation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_student_number() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    create_student(&db, department_id).await;

    let err = StudentService::create(
        &db,
        new_student("0099999999", "14020000000001", department_id),
        today(),
    )
    .await
    .unwrap_err();
    match err {
        ServiceError::UniquenessViolation { entity, fields } => {
            assert_eq!(entity, Table::Student);
            assert_eq!(fields, vec!["student_number".to_string()]);
        }
        other => panic!("expected uniqueness violation, got {other:?}"),
    }

    // The rejected registration left no person behind
    assert!(PersonService::find(&db, "0099999999").await.is_err());
}

#[tokio::test]
async fn test_student_validation_reports_every_field() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;

    let mut student = new_student("12345", "1402", department_id);
    student.gpa = Some(21.0);
    student.entry_year = 2030;

    let err = StudentService::create(&db, student, today()).await.unwrap_err();
    let ServiceError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    for field in ["national_id", "student_number", "gpa", "entry_year"] {
        assert!(errors.has_field(field), "missing {field}");
    }
}

#[tokio::test]
async fn test_student_update_keeps_national_id() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    let id = create_student(&db, department_id).await;

    let mut changed = new_student("0012345678", "14020000000001", department_id);
    changed.gpa = Some(18.5);
    changed.person.last_name = "Ahmadi".to_string();
    let record = StudentService::update(&db, id, changed, today())
        .await
        .unwrap();
    assert_eq!(record.student.gpa, Some(18.5));
    assert_eq!(record.person.last_name, "Ahmadi");

    let moved = new_student("0099999999", "14020000000001", department_id);
    let err = StudentService::update(&db, id, moved, today())
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("national_id")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_student_list_filters_and_paginates() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    for i in 0..5 {
        let mut student = new_student(
            &format!("00000000{i:02}"),
            &format!("140200000000{i:02}"),
            department_id,
        );
        student.person.first_name = if i == 3 { "Narges" } else { "Ali" }.to_string();
        student.person.last_name =
            ["Moradi", "Ahmadi", "Sadeghi", "Karimi", "Jafari"][i].to_string();
        student.is_active = i % 2 == 0;
        StudentService::create(&db, student, today()).await.unwrap();
    }

    let (page, total) = StudentService::list(&db, &StudentFilter::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);

    // Oversized page parameters are capped instead of overflowing the offset
    let (page, total) = StudentService::list(&db, &StudentFilter::default(), 3, u64::MAX)
        .await
        .unwrap();
    assert_eq!(total, 5);
    assert!(page.is_empty());
    let (page, _) = StudentService::list(&db, &StudentFilter::default(), u64::MAX, u64::MAX)
        .await
        .unwrap();
    assert!(page.is_empty());

    let active = StudentFilter {
        is_active: Some(true),
        ..Default::default()
    };
    let (_, total) = StudentService::list(&db, &active, 1, 20).await.unwrap();
    assert_eq!(total, 3);

    let search = StudentFilter {
        search: Some("narges".to_string()),
        ..Default::default()
    };
    let (found, total) = StudentService::list(&db, &search, 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].person.first_name, "Narges");
    assert_eq!(found[0].department.id, department_id);

    let by_name = StudentFilter {
        ordering: Some("last_name".to_string()),
        ..Default::default()
    };
    let (found, _) = StudentService::list(&db, &by_name, 1, 20).await.unwrap();
    let names: Vec<&str> = found.iter().map(|s| s.person.last_name.as_str()).collect();
    assert_eq!(names, ["Ahmadi", "Jafari", "Karimi", "Moradi", "Sadeghi"]);

    // Searching and sorting on the person both need its row, joined once
    let searched = StudentFilter {
        search: Some("ali".to_string()),
        ordering: Some("-last_name".to_string()),
        ..Default::default()
    };
    let (found, total) = StudentService::list(&db, &searched, 1, 20).await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(found[0].person.last_name, "Sadeghi");
}

#[tokio::test]
async fn test_professor_associations() {
    let db = setup_test_db().await;
    let (faculty_id, department_id) = faculty_with_department(&db).await;
    let professor_id = create_professor(&db, faculty_id).await;
    let course = CourseService::create(&db, new_course("4010101", department_id, vec![]))
        .await
        .unwrap();

    let record = ProfessorService::set_departments(&db, professor_id, vec![department_id])
        .await
        .unwrap();
    assert_eq!(record.department_ids, vec![department_id]);

    let record = ProfessorService::set_courses(
        &db,
        professor_id,
        vec![course.course.id, course.course.id],
    )
    .await
    .unwrap();
    assert_eq!(record.course_ids, vec![course.course.id]);

    let err = ProfessorService::set_courses(&db, professor_id, vec![course.course.id, 999])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ReferenceViolation { .. }));
    let unchanged = ProfessorService::get(&db, professor_id).await.unwrap();
    assert_eq!(unchanged.course_ids, vec![course.course.id]);

    let cleared = ProfessorService::set_departments(&db, professor_id, vec![])
        .await
        .unwrap();
    assert!(cleared.department_ids.is_empty());

    let filter = ProfessorFilter {
        faculty_id: Some(faculty_id),
        ..Default::default()
    };
    let (professors, total) = ProfessorService::list(&db, &filter, 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(professors[0].faculty.id, faculty_id);
}

#[tokio::test]
async fn test_professor_promotion_before_hire_is_rejected() {
    let db = setup_test_db().await;
    let (faculty_id, _) = faculty_with_department(&db).await;
    let mut professor = new_professor("0087654321", "1000000001", faculty_id);
    professor.last_promotion_date = Some(date(2005, 1, 1));

    let err = ProfessorService::create(&db, professor, today())
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("last_promotion_date")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_member_roles_share_one_person() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;

    let student = MemberService::register(
        &db,
        Member::Student(new_student("0012345678", "14020000000001", department_id)),
        today(),
    )
    .await
    .unwrap();
    assert!(matches!(student, MemberRecord::Student(_)));

    let employee = MemberService::register(
        &db,
        Member::Employee(NewEmployee {
            person: person("0012345678"),
            personnel_code: "2000000001".to_string(),
            title: "Teaching assistant".to_string(),
            contract_date: date(2023, 10, 1),
        }),
        today(),
    )
    .await
    .unwrap();
    assert_eq!(employee.national_id(), student.national_id());

    let MemberRecord::Employee(employee) = employee else {
        panic!("expected an employee record");
    };
    let fetched = EmployeeService::get(&db, employee.employee.id).await.unwrap();
    assert_eq!(fetched.person.national_id, "0012345678");
}

#[tokio::test]
async fn test_second_role_with_different_details_is_rejected() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;

    EmployeeService::create(
        &db,
        NewEmployee {
            person: person("0012345678"),
            personnel_code: "2000000001".to_string(),
            title: "Registrar".to_string(),
            contract_date: date(2020, 1, 1),
        },
        today(),
    )
    .await
    .unwrap();

    let mut student = new_student("0012345678", "14020000000001", department_id);
    student.person.first_name = "Maryam".to_string();
    let err = StudentService::create(&db, student, today())
        .await
        .unwrap_err();
    match err {
        ServiceError::UniquenessViolation { entity, fields } => {
            assert_eq!(entity, Table::Person);
            assert_eq!(fields, vec!["national_id"]);
        }
        other => panic!("expected uniqueness violation, got {other:?}"),
    }

    let stored = PersonService::find(&db, "0012345678").await.unwrap();
    assert_eq!(stored.first_name, "Sara");
    let (_, total) = StudentService::list(&db, &StudentFilter::default(), 1, 20)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_course_cannot_require_itself() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    let basics = CourseService::create(&db, new_course("4010101", department_id, vec![]))
        .await
        .unwrap();
    let advanced = CourseService::create(
        &db,
        new_course("4010102", department_id, vec![basics.course.id]),
    )
    .await
    .unwrap();
    assert_eq!(advanced.prerequisites.len(), 1);
    assert_eq!(advanced.prerequisites[0].id, basics.course.id);

    let own_id = advanced.course.id;
    let err = CourseService::update(
        &db,
        own_id,
        new_course("4010102", department_id, vec![basics.course.id, own_id]),
    )
    .await
    .unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("prerequisites")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let unchanged = CourseService::get(&db, own_id).await.unwrap();
    assert_eq!(unchanged.prerequisites.len(), 1);
}

#[tokio::test]
async fn test_course_code_format() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    let err = CourseService::create(&db, new_course("CE101", department_id, vec![]))
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("code")),
        other => panic!("expected validation error, got {other:?}"),
    }
}
