mod common;

use common::*;
use database::{
    error::ServiceError,
    services::{
        class_schedule::{ClassScheduleFilter, ClassScheduleService},
        course::CourseService,
        enrollment::{EnrollmentFilter, EnrollmentService},
        professor::ProfessorService,
        semester::{SemesterFilter, SemesterService},
        student::StudentService,
    },
};
use models::{
    academic::{Term, Weekday},
    integrity::Table,
    records::{GradeUpdate, NewCourse, NewEnrollment, NewSemester},
};
use sea_orm::DatabaseConnection;

/// A class schedule in an active semester and a student who can take it
async fn class_and_student(db: &DatabaseConnection) -> (i32, i32) {
    let (faculty_id, department_id) = faculty_with_department(db).await;
    let student_id = create_student(db, department_id).await;
    let professor_id = create_professor(db, faculty_id).await;
    let semester_id = create_semester(db, 1402, Term::First, true).await;
    let course = CourseService::create(
        db,
        NewCourse {
            name: "Operating Systems".to_string(),
            code: "4010310".to_string(),
            units: 3,
            department_id,
            prerequisites: vec![],
        },
    )
    .await
    .unwrap();
    let class = ClassScheduleService::create(
        db,
        new_schedule(course.course.id, professor_id, semester_id),
    )
    .await
    .unwrap();
    (class.schedule.id, student_id)
}

async fn active_count(db: &DatabaseConnection) -> u64 {
    let filter = SemesterFilter {
        is_active: Some(true),
        ..Default::default()
    };
    SemesterService::list(db, &filter, 1, 20).await.unwrap().1
}

#[tokio::test]
async fn test_activation_leaves_one_active_semester() {
    let db = setup_test_db().await;
    let first = create_semester(&db, 1401, Term::First, true).await;
    let second = create_semester(&db, 1401, Term::Second, true).await;
    let summer = create_semester(&db, 1401, Term::Summer, false).await;

    assert_eq!(active_count(&db).await, 1);
    assert_eq!(SemesterService::active(&db).await.unwrap().unwrap().id, second);

    let activated = SemesterService::activate(&db, first).await.unwrap();
    assert!(activated.is_active);
    assert_eq!(active_count(&db).await, 1);
    assert!(!SemesterService::get(&db, second).await.unwrap().is_active);

    SemesterService::update(
        &db,
        summer,
        NewSemester {
            year: 1401,
            term: Term::Summer,
            is_active: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(active_count(&db).await, 1);
    assert_eq!(SemesterService::active(&db).await.unwrap().unwrap().id, summer);

    assert!(matches!(
        SemesterService::activate(&db, 999).await,
        Err(ServiceError::NotFound {
            entity: Table::Semester,
            ..
        })
    ));
    assert_eq!(active_count(&db).await, 1);
}

#[tokio::test]
async fn test_semester_term_is_unique_per_year() {
    let db = setup_test_db().await;
    create_semester(&db, 1402, Term::First, false).await;

    let err = SemesterService::create(
        &db,
        NewSemester {
            year: 1402,
            term: Term::First,
            is_active: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::UniquenessViolation {
            entity: Table::Semester,
            ..
        }
    ));
    // The rejected create did not deactivate anything
    assert_eq!(active_count(&db).await, 0);

    let semester = SemesterService::create(
        &db,
        NewSemester {
            year: 1402,
            term: Term::Second,
            is_active: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(semester.display(), "second half 1402");
}

#[tokio::test]
async fn test_class_schedule_checks() {
    let db = setup_test_db().await;
    let (class_id, _) = class_and_student(&db).await;
    let class = ClassScheduleService::get(&db, class_id).await.unwrap();
    assert_eq!(class.course.code, "4010310");
    assert_eq!(class.professor_name, "Sara Karimi");
    assert_eq!(class.semester.display(), "first half 1402");

    let mut backwards = new_schedule(class.course.id, class.schedule.professor_id, class.semester.id);
    backwards.start_time = time(12, 0);
    backwards.end_time = time(10, 30);
    backwards.capacity = 0;
    let err = ClassScheduleService::create(&db, backwards).await.unwrap_err();
    let ServiceError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("start_time"));
    assert!(errors.has_field("capacity"));

    let orphan = new_schedule(class.course.id, 999, class.semester.id);
    assert!(matches!(
        ClassScheduleService::create(&db, orphan).await,
        Err(ServiceError::ReferenceViolation {
            entity: Table::ClassSchedule,
            ..
        })
    ));

    let mut moved = new_schedule(class.course.id, class.schedule.professor_id, class.semester.id);
    moved.day = Weekday::Wednesday;
    ClassScheduleService::update(&db, class_id, moved).await.unwrap();

    let filter = ClassScheduleFilter {
        day: Some(Weekday::Wednesday),
        ..Default::default()
    };
    let (found, total) = ClassScheduleService::list(&db, &filter, 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].schedule.id, class_id);

    // Search covers the course name and the professor's last name
    for (term, expected) in [("operating", 1), ("Karimi", 1), ("Compilers", 0)] {
        let filter = ClassScheduleFilter {
            search: Some(term.to_string()),
            ordering: Some("-course_name".to_string()),
            ..Default::default()
        };
        let (_, total) = ClassScheduleService::list(&db, &filter, 1, 20).await.unwrap();
        assert_eq!(total, expected, "search {term}");
    }

    let taught = ProfessorService::classes(&db, class.schedule.professor_id)
        .await
        .unwrap();
    assert_eq!(taught.len(), 1);
    let offered = CourseService::classes(&db, class.course.id).await.unwrap();
    assert_eq!(offered.len(), 1);
}

#[tokio::test]
async fn test_enrollment_lifecycle() {
    let db = setup_test_db().await;
    let (class_id, student_id) = class_and_student(&db).await;

    let enrollment = EnrollmentService::create(
        &db,
        NewEnrollment {
            student_id,
            class_schedule_id: class_id,
            grade: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(enrollment.enrollment.grade, None);
    assert_eq!(enrollment.student_name, "Sara Karimi");
    assert_eq!(enrollment.class.course.name, "Operating Systems");

    let duplicate = EnrollmentService::create(
        &db,
        NewEnrollment {
            student_id,
            class_schedule_id: class_id,
            grade: Some(15.0),
        },
    )
    .await
    .unwrap_err();
    match duplicate {
        ServiceError::UniquenessViolation { entity, fields } => {
            assert_eq!(entity, Table::Enrollment);
            assert_eq!(fields, vec!["student_id", "class_schedule_id"]);
        }
        other => panic!("expected uniqueness violation, got {other:?}"),
    }

    let id = enrollment.enrollment.id;
    let graded = EnrollmentService::update_grade(&db, id, GradeUpdate { grade: Some(18.75) })
        .await
        .unwrap();
    assert_eq!(graded.enrollment.grade, Some(18.75));
    assert_eq!(graded.enrollment.enrolled_at, enrollment.enrollment.enrolled_at);

    let err = EnrollmentService::update_grade(&db, id, GradeUpdate { grade: Some(20.25) })
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("grade")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let graded_filter = EnrollmentFilter {
        grade: Some(18.75),
        ordering: Some("-grade".to_string()),
        ..Default::default()
    };
    let (found, total) = EnrollmentService::list(&db, &graded_filter, 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].enrollment.id, id);

    let cleared = EnrollmentService::update_grade(&db, id, GradeUpdate { grade: None })
        .await
        .unwrap();
    assert_eq!(cleared.enrollment.grade, None);

    let transcript = StudentService::enrollments(&db, student_id).await.unwrap();
    assert_eq!(transcript.len(), 1);
    let roster = ClassScheduleService::enrollments(&db, class_id).await.unwrap();
    assert_eq!(roster[0].student.id, student_id);

    let filter = EnrollmentFilter {
        class_schedule_id: Some(class_id),
        ..Default::default()
    };
    let (_, total) = EnrollmentService::list(&db, &filter, 1, 20).await.unwrap();
    assert_eq!(total, 1);
    let (_, total) = EnrollmentService::list(&db, &graded_filter, 1, 20).await.unwrap();
    assert_eq!(total, 0);

    EnrollmentService::delete(&db, id).await.unwrap();
    ClassScheduleService::delete(&db, class_id).await.unwrap();
    StudentService::delete(&db, student_id).await.unwrap();
}

#[tokio::test]
async fn test_enrollment_references() {
    let db = setup_test_db().await;
    let (class_id, student_id) = class_and_student(&db).await;

    for (student_id, class_schedule_id) in [(999, class_id), (student_id, 999)] {
        let err = EnrollmentService::create(
            &db,
            NewEnrollment {
                student_id,
                class_schedule_id,
                grade: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ReferenceViolation {
                entity: Table::Enrollment,
                ..
            }
        ));
    }
}
