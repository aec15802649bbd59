mod common;

use common::*;
use database::{
    entities::students,
    error::{ServiceError, StorageResultExt},
    services::{
        class_schedule::ClassScheduleService,
        contact::ContactService,
        course::CourseService,
        department::DepartmentService,
        employee::EmployeeService,
        enrollment::EnrollmentService,
        faculty::FacultyService,
        person::PersonService,
        professor::ProfessorService,
        student::StudentService,
    },
};
use models::{
    academic::Term,
    contact::{EmailType, NewAddress, NewEmailAddress, NewPhoneNumber, PhoneType},
    integrity::Table,
    records::{NewCourse, NewEmployee, NewEnrollment},
};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait};

fn address(post_code: &str) -> NewAddress {
    NewAddress {
        post_code: post_code.to_string(),
        country: "Iran".to_string(),
        province: "Tehran".to_string(),
        city: "Tehran".to_string(),
        district: "6".to_string(),
        street: "Enghelab".to_string(),
        alley: "Azar".to_string(),
        plaque: 12,
        floor: 2,
    }
}

#[tokio::test]
async fn test_faculty_with_department_cannot_be_deleted() {
    let db = setup_test_db().await;
    let (faculty_id, department_id) = faculty_with_department(&db).await;

    let err = FacultyService::delete(&db, faculty_id).await.unwrap_err();
    match err {
        ServiceError::ReferenceViolation { entity, reason } => {
            assert_eq!(entity, Table::Faculty);
            assert!(reason.contains("department"), "{reason}");
        }
        other => panic!("expected reference violation, got {other:?}"),
    }

    // Nothing was removed
    assert!(FacultyService::get(&db, faculty_id).await.is_ok());
    assert!(DepartmentService::get(&db, department_id).await.is_ok());

    DepartmentService::delete(&db, department_id).await.unwrap();
    FacultyService::delete(&db, faculty_id).await.unwrap();
    assert!(matches!(
        FacultyService::get(&db, faculty_id).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_missing_record() {
    let db = setup_test_db().await;
    assert!(matches!(
        FacultyService::delete(&db, 7).await,
        Err(ServiceError::NotFound {
            entity: Table::Faculty,
            ..
        })
    ));
    assert!(matches!(
        PersonService::delete(&db, "0012345678").await,
        Err(ServiceError::NotFound {
            entity: Table::Person,
            ..
        })
    ));
    assert!(matches!(
        EnrollmentService::delete(&db, 3).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_person_delete_cascades_owned_records() {
    let db = setup_test_db().await;
    let national_id = "0012345678";

    EmployeeService::create(
        &db,
        NewEmployee {
            person: person(national_id),
            personnel_code: "2000000001".to_string(),
            title: "Registrar".to_string(),
            contract_date: date(2020, 1, 1),
        },
        today(),
    )
    .await
    .unwrap();
    ContactService::add_phone(
        &db,
        national_id,
        NewPhoneNumber {
            phone_type: PhoneType::Mobile,
            number: "09123456789".to_string(),
        },
    )
    .await
    .unwrap();
    ContactService::add_email(
        &db,
        national_id,
        NewEmailAddress {
            email_type: EmailType::Work,
            email: "s.karimi@ut.ac.ir".to_string(),
        },
    )
    .await
    .unwrap();
    ContactService::add_address(&db, national_id, address("1417614411"))
        .await
        .unwrap();

    let record = PersonService::get(&db, national_id).await.unwrap();
    assert_eq!(record.phones.len(), 1);
    assert_eq!(record.emails.len(), 1);
    assert_eq!(record.addresses.len(), 1);

    PersonService::delete(&db, national_id).await.unwrap();

    assert!(PersonService::get(&db, national_id).await.is_err());
    let (employees, total) = EmployeeService::list(&db, &Default::default(), 1, 20)
        .await
        .unwrap();
    assert!(employees.is_empty());
    assert_eq!(total, 0);

    // The post code is free again
    let other = "0087654321";
    EmployeeService::create(
        &db,
        NewEmployee {
            person: person(other),
            personnel_code: "2000000002".to_string(),
            title: "Librarian".to_string(),
            contract_date: date(2021, 1, 1),
        },
        today(),
    )
    .await
    .unwrap();
    ContactService::add_address(&db, other, address("1417614411"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_contacts_are_unique() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    create_student(&db, department_id).await;
    let phone = NewPhoneNumber {
        phone_type: PhoneType::Home,
        number: "021664199".to_string(),
    };

    ContactService::add_phone(&db, "0012345678", phone.clone())
        .await
        .unwrap();
    let err = ContactService::add_phone(&db, "0012345678", phone)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::UniquenessViolation {
            entity: Table::PhoneNumber,
            ..
        }
    ));

    let err = ContactService::add_phone(
        &db,
        "0099999999",
        NewPhoneNumber {
            phone_type: PhoneType::Mobile,
            number: "09121111111".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: Table::Person,
            ..
        }
    ));
}

#[tokio::test]
async fn test_person_with_enrolled_student_cannot_be_deleted() {
    let db = setup_test_db().await;
    let (faculty_id, department_id) = faculty_with_department(&db).await;
    let student_id = create_student(&db, department_id).await;
    let professor_id = create_professor(&db, faculty_id).await;
    let semester_id = create_semester(&db, 1402, Term::First, true).await;
    let course = CourseService::create(
        &db,
        NewCourse {
            name: "Data Structures".to_string(),
            code: "4010203".to_string(),
            units: 3,
            department_id,
            prerequisites: vec![],
        },
    )
    .await
    .unwrap();
    let class = ClassScheduleService::create(
        &db,
        new_schedule(course.course.id, professor_id, semester_id),
    )
    .await
    .unwrap();
    EnrollmentService::create(
        &db,
        NewEnrollment {
            student_id,
            class_schedule_id: class.schedule.id,
            grade: None,
        },
    )
    .await
    .unwrap();

    // The cascade to the student row would orphan the enrollment
    let err = PersonService::delete(&db, "0012345678").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ReferenceViolation {
            entity: Table::Student,
            ..
        }
    ));
    assert!(StudentService::get(&db, student_id).await.is_ok());

    // Teaching a class blocks deleting the professor and the course
    assert!(matches!(
        ProfessorService::delete(&db, professor_id).await,
        Err(ServiceError::ReferenceViolation { .. })
    ));
    assert!(matches!(
        CourseService::delete(&db, course.course.id).await,
        Err(ServiceError::ReferenceViolation { .. })
    ));
    assert!(matches!(
        ClassScheduleService::delete(&db, class.schedule.id).await,
        Err(ServiceError::ReferenceViolation { .. })
    ));
}

#[tokio::test]
async fn test_course_delete_removes_prerequisite_links() {
    let db = setup_test_db().await;
    let (faculty_id, department_id) = faculty_with_department(&db).await;
    let course = |code: &str, prerequisites| NewCourse {
        name: format!("Course {code}"),
        code: code.to_string(),
        units: 2,
        department_id,
        prerequisites,
    };
    let basics = CourseService::create(&db, course("4010101", vec![]))
        .await
        .unwrap();
    let advanced = CourseService::create(&db, course("4010102", vec![basics.course.id]))
        .await
        .unwrap();
    let professor_id = create_professor(&db, faculty_id).await;
    ProfessorService::set_courses(&db, professor_id, vec![basics.course.id])
        .await
        .unwrap();

    CourseService::delete(&db, basics.course.id).await.unwrap();

    let advanced = CourseService::get(&db, advanced.course.id).await.unwrap();
    assert!(advanced.prerequisites.is_empty());
    let professor = ProfessorService::get(&db, professor_id).await.unwrap();
    assert!(professor.course_ids.is_empty());
}

#[tokio::test]
async fn test_unique_index_backs_direct_writes() {
    let db = setup_test_db().await;
    let (_, department_id) = faculty_with_department(&db).await;
    let student_id = create_student(&db, department_id).await;

    // A write that skips the service checks still hits the unique index
    let existing = students::Entity::find_by_id(student_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut duplicate: students::ActiveModel = existing.into();
    duplicate.id = NotSet;
    let err = duplicate
        .insert(&db)
        .await
        .or_violation(Table::Student)
        .unwrap_err();
    match err {
        ServiceError::UniquenessViolation { entity, fields } => {
            assert_eq!(entity, Table::Student);
            assert!(fields.contains(&"student_number".to_string()));
        }
        other => panic!("expected uniqueness violation, got {other:?}"),
    }
}
