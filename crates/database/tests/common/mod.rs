#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use database::services::{
    department::DepartmentService, faculty::FacultyService, professor::ProfessorService,
    semester::SemesterService, student::StudentService,
};
use migration::{Migrator, MigratorTrait};
use models::{
    academic::{AcademicRank, Degree, EmploymentStatus, Term, Weekday},
    person::{BloodType, Gender, MaritalStatus, Nationality, PersonInfo},
    records::{
        NewClassSchedule, NewDepartment, NewFaculty, NewProfessor, NewSemester, NewStudent,
    },
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A migrated in-memory database; one connection so every query sees the same data
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn person(national_id: &str) -> PersonInfo {
    PersonInfo {
        national_id: national_id.to_string(),
        first_name: "Sara".to_string(),
        last_name: "Karimi".to_string(),
        father_name: "Hassan".to_string(),
        birth_date: date(1990, 5, 17),
        gender: Gender::Female,
        marital_status: MaritalStatus::Single,
        blood_type: BloodType::OPositive,
        nationality: Nationality::National,
    }
}

pub fn new_faculty(code: &str) -> NewFaculty {
    NewFaculty {
        name: format!("Faculty {code}"),
        code: code.to_string(),
        established_on: Some(date(1960, 1, 1)),
        website: None,
    }
}

pub fn new_department(code: &str, faculty_id: i32) -> NewDepartment {
    NewDepartment {
        name: format!("Department {code}"),
        code: code.to_string(),
        faculty_id,
        established_on: None,
    }
}

pub fn new_student(national_id: &str, student_number: &str, department_id: i32) -> NewStudent {
    NewStudent {
        person: person(national_id),
        student_number: student_number.to_string(),
        department_id,
        entry_year: 2022,
        enrollment_date: date(2022, 9, 1),
        degree: Degree::Bachelor,
        is_active: true,
        major: "Computer Engineering".to_string(),
        minor: None,
        gpa: Some(17.25),
    }
}

pub fn new_professor(national_id: &str, personnel_code: &str, faculty_id: i32) -> NewProfessor {
    NewProfessor {
        person: person(national_id),
        personnel_code: personnel_code.to_string(),
        faculty_id,
        academic_rank: AcademicRank::Associate,
        salary: 120_000_000,
        employment_status: EmploymentStatus::FullTime,
        hire_date: date(2010, 9, 1),
        last_promotion_date: Some(date(2018, 3, 1)),
        contract_end_date: None,
    }
}

pub fn new_schedule(course_id: i32, professor_id: i32, semester_id: i32) -> NewClassSchedule {
    NewClassSchedule {
        course_id,
        professor_id,
        semester_id,
        day: Weekday::Monday,
        start_time: time(10, 30),
        end_time: time(12, 0),
        capacity: 30,
    }
}

/// Ids of a faculty and one of its departments
pub async fn faculty_with_department(db: &DatabaseConnection) -> (i32, i32) {
    let faculty = FacultyService::create(db, new_faculty("ENG"), today())
        .await
        .unwrap();
    let department = DepartmentService::create(db, new_department("CE", faculty.id), today())
        .await
        .unwrap();
    (faculty.id, department.id)
}

pub async fn create_student(db: &DatabaseConnection, department_id: i32) -> i32 {
    StudentService::create(
        db,
        new_student("0012345678", "14020000000001", department_id),
        today(),
    )
    .await
    .unwrap()
    .student
    .id
}

pub async fn create_professor(db: &DatabaseConnection, faculty_id: i32) -> i32 {
    ProfessorService::create(
        db,
        new_professor("0087654321", "1000000001", faculty_id),
        today(),
    )
    .await
    .unwrap()
    .professor
    .id
}

pub async fn create_semester(db: &DatabaseConnection, year: i32, term: Term, is_active: bool) -> i32 {
    SemesterService::create(
        db,
        NewSemester {
            year,
            term,
            is_active,
        },
    )
    .await
    .unwrap()
    .id
}
