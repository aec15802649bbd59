mod common;

use common::{setup_test_db, today};
use database::{
    sample::{self, COURSES, PROFESSORS, SCHEDULED_SEMESTERS, STUDENTS},
    services::{
        enrollment::{EnrollmentFilter, EnrollmentService},
        semester::SemesterService,
        student::StudentService,
    },
};
use models::academic::Term;
use sea_orm::TransactionTrait;

#[tokio::test]
async fn test_generate_sample_data() {
    let db = setup_test_db().await;

    let txn = db.begin().await.unwrap();
    let summary = sample::generate(&txn, today()).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(summary.faculties, 5);
    assert_eq!(summary.professors, PROFESSORS);
    assert_eq!(summary.students, STUDENTS);
    assert_eq!(summary.courses, COURSES);
    assert_eq!(summary.class_schedules, COURSES * SCHEDULED_SEMESTERS);
    assert!((3 * STUDENTS..=5 * STUDENTS).contains(&summary.enrollments));

    let active = SemesterService::active(&db).await.unwrap().unwrap();
    assert_eq!((active.year, active.term), (1402, Term::First));

    let (_, total) = EnrollmentService::list(&db, &EnrollmentFilter::default(), 1, 1)
        .await
        .unwrap();
    assert_eq!(total as usize, summary.enrollments);

    let first = StudentService::get(&db, 1).await.unwrap();
    let transcript = StudentService::enrollments(&db, first.student.id).await.unwrap();
    assert!((3..=5).contains(&transcript.len()));
}

#[tokio::test]
async fn test_failed_generation_rolls_back() {
    let db = setup_test_db().await;
    let summary = sample::generate(&db, today()).await.unwrap();

    // A second run collides with the first on natural keys
    let txn = db.begin().await.unwrap();
    assert!(sample::generate(&txn, today()).await.is_err());
    txn.rollback().await.unwrap();

    let (_, total) = EnrollmentService::list(&db, &EnrollmentFilter::default(), 1, 1)
        .await
        .unwrap();
    assert_eq!(total as usize, summary.enrollments);
}
