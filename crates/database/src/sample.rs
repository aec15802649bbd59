//! Deterministic sample data for development databases
//!
//! Every record goes through the regular services, so the generated data
//! passes the same validation and integrity checks as API writes.

use crate::{
    error::ServiceError,
    services::{
        class_schedule::ClassScheduleService, course::CourseService,
        department::DepartmentService, enrollment::EnrollmentService, faculty::FacultyService,
        professor::ProfessorService, semester::SemesterService, student::StudentService,
    },
};
use chrono::{Datelike, Months, NaiveDate, NaiveTime};
use log::info;
use models::{
    academic::{AcademicRank, Degree, EmploymentStatus, Term, Weekday},
    person::{BloodType, Gender, MaritalStatus, Nationality, PersonInfo},
    records::{
        NewClassSchedule, NewCourse, NewDepartment, NewEnrollment, NewFaculty, NewProfessor,
        NewSemester, NewStudent,
    },
};
use sea_orm::{ConnectionTrait, TransactionTrait};

pub const PROFESSORS: usize = 20;
pub const STUDENTS: usize = 50;
pub const COURSES: usize = 10;
pub const SCHEDULED_SEMESTERS: usize = 3;

const FACULTIES: [(&str, &str); 5] = [
    ("Faculty of Engineering", "ENG"),
    ("Faculty of Science", "SCI"),
    ("Faculty of Humanities", "HUM"),
    ("Faculty of Medicine", "MED"),
    ("Faculty of Fine Arts", "ART"),
];

const DEPARTMENTS: [(&str, &str, usize); 10] = [
    ("Computer Engineering", "CE", 0),
    ("Electrical Engineering", "EE", 0),
    ("Mathematics", "MATH", 1),
    ("Physics", "PHYS", 1),
    ("History", "HIST", 2),
    ("Persian Literature", "LIT", 2),
    ("Anatomy", "ANAT", 3),
    ("Pharmacology", "PHAR", 3),
    ("Painting", "PAINT", 4),
    ("Architecture", "ARCH", 4),
];

const COURSE_NAMES: [&str; COURSES] = [
    "Fundamentals of Programming",
    "Advanced Programming",
    "Data Structures",
    "Calculus I",
    "Calculus II",
    "General Physics",
    "History of Iran",
    "Human Anatomy",
    "Principles of Drawing",
    "Architectural Design",
];

const FIRST_NAMES: [&str; 10] = [
    "Ali", "Sara", "Reza", "Maryam", "Hossein", "Zahra", "Mohammad", "Fatemeh", "Amir", "Narges",
];

const LAST_NAMES: [&str; 10] = [
    "Ahmadi", "Mohammadi", "Hosseini", "Karimi", "Rezaei", "Moradi", "Jafari", "Rahimi", "Kazemi",
    "Sadeghi",
];

const RANKS: [AcademicRank; 5] = [
    AcademicRank::Assistant,
    AcademicRank::Associate,
    AcademicRank::FullProfessor,
    AcademicRank::Lecturer,
    AcademicRank::Instructor,
];

const BLOOD_TYPES: [BloodType; 4] = [
    BloodType::APositive,
    BloodType::BPositive,
    BloodType::OPositive,
    BloodType::AbNegative,
];

/// Row counts written by [`generate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleSummary {
    pub faculties: usize,
    pub departments: usize,
    pub professors: usize,
    pub students: usize,
    pub courses: usize,
    pub semesters: usize,
    pub class_schedules: usize,
    pub enrollments: usize,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn person(national_id: String, i: usize, birth_year: i32) -> PersonInfo {
    PersonInfo {
        national_id,
        first_name: FIRST_NAMES[i % FIRST_NAMES.len()].to_string(),
        last_name: LAST_NAMES[(i / FIRST_NAMES.len() + i) % LAST_NAMES.len()].to_string(),
        father_name: FIRST_NAMES[(i + 3) % FIRST_NAMES.len()].to_string(),
        birth_date: date(birth_year, (i % 12) as u32 + 1, (i % 28) as u32 + 1),
        gender: if i % 2 == 0 {
            Gender::Male
        } else {
            Gender::Female
        },
        marital_status: if i % 3 == 0 {
            MaritalStatus::Married
        } else {
            MaritalStatus::Single
        },
        blood_type: BLOOD_TYPES[i % BLOOD_TYPES.len()],
        nationality: if i % 10 == 9 {
            Nationality::Foreign
        } else {
            Nationality::National
        },
    }
}

/// Writes the sample university into `db`
///
/// Pass a transaction to make the whole run atomic. `today` anchors every
/// date so the data stays valid whenever it is generated.
pub async fn generate<C>(db: &C, today: NaiveDate) -> Result<SampleSummary, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut summary = SampleSummary::default();

    let mut faculty_ids = Vec::with_capacity(FACULTIES.len());
    for (i, (name, code)) in FACULTIES.iter().enumerate() {
        let faculty = FacultyService::create(
            db,
            NewFaculty {
                name: name.to_string(),
                code: code.to_string(),
                established_on: Some(date(1934 + 10 * i as i32, 3, 21)),
                website: Some(format!("https://{}.example.ac.ir", code.to_lowercase())),
            },
            today,
        )
        .await?;
        faculty_ids.push(faculty.id);
    }
    summary.faculties = faculty_ids.len();

    let mut departments = Vec::with_capacity(DEPARTMENTS.len());
    for (name, code, faculty) in DEPARTMENTS {
        let department = DepartmentService::create(
            db,
            NewDepartment {
                name: name.to_string(),
                code: code.to_string(),
                faculty_id: faculty_ids[faculty],
                established_on: None,
            },
            today,
        )
        .await?;
        departments.push(department);
    }
    summary.departments = departments.len();

    let mut course_ids = Vec::with_capacity(COURSES);
    for (i, name) in COURSE_NAMES.iter().enumerate() {
        // Every third course builds on the one before it
        let prerequisites = if i % 3 == 1 {
            vec![course_ids[i - 1]]
        } else {
            vec![]
        };
        let course = CourseService::create(
            db,
            NewCourse {
                name: name.to_string(),
                code: format!("{:07}", 4_010_100 + i),
                units: (i % 3) as i16 + 1,
                department_id: departments[i % departments.len()].id,
                prerequisites,
            },
        )
        .await?;
        course_ids.push(course.course.id);
    }
    summary.courses = course_ids.len();

    let mut professor_ids = Vec::with_capacity(PROFESSORS);
    for i in 0..PROFESSORS {
        let department = &departments[i % departments.len()];
        let hire_date = date(2000 + (i % 15) as i32, 9, 1);
        let employment_status = match i % 4 {
            3 => EmploymentStatus::Contract,
            2 => EmploymentStatus::PartTime,
            _ => EmploymentStatus::FullTime,
        };
        let professor = ProfessorService::create(
            db,
            NewProfessor {
                person: person(format!("00{:08}", i + 1), i, 1960 + (i % 20) as i32),
                personnel_code: format!("1{:09}", i + 1),
                faculty_id: department.faculty_id,
                academic_rank: RANKS[i % RANKS.len()],
                salary: 80_000_000 + 2_500_000 * i as i64,
                employment_status,
                hire_date,
                last_promotion_date: (i % 3 == 0)
                    .then(|| hire_date.checked_add_months(Months::new(60)))
                    .flatten(),
                contract_end_date: (employment_status == EmploymentStatus::Contract)
                    .then(|| date(today.year() + 2, 8, 31)),
            },
            today,
        )
        .await?;

        let id = professor.professor.id;
        ProfessorService::set_departments(db, id, vec![department.id]).await?;
        ProfessorService::set_courses(
            db,
            id,
            vec![course_ids[i % COURSES], course_ids[(i + 3) % COURSES]],
        )
        .await?;
        professor_ids.push(id);
    }
    summary.professors = professor_ids.len();

    let mut semesters = Vec::new();
    for year in 1400..=1402 {
        for term in [Term::First, Term::Second] {
            let semester = SemesterService::create(
                db,
                NewSemester {
                    year,
                    term,
                    is_active: year == 1402 && term == Term::First,
                },
            )
            .await?;
            semesters.push(semester);
        }
    }
    summary.semesters = semesters.len();

    let scheduled = &semesters[semesters.len() - SCHEDULED_SEMESTERS..];
    let mut schedules = Vec::new();
    for (s, semester) in scheduled.iter().enumerate() {
        for c in 0..COURSES {
            // Professor c and c + 10 both teach course c
            let professor = professor_ids[(c + 10 * (s % 2)) % PROFESSORS];
            let start = time(8 + 2 * (c % 4) as u32, 0);
            let schedule = ClassScheduleService::create(
                db,
                NewClassSchedule {
                    course_id: course_ids[c],
                    professor_id: professor,
                    semester_id: semester.id,
                    day: Weekday::from_number((c % 6) as i16).unwrap_or(Weekday::Saturday),
                    start_time: start,
                    end_time: start + chrono::Duration::minutes(90),
                    capacity: 40,
                },
            )
            .await?;
            schedules.push((schedule.schedule.id, s));
        }
    }
    summary.class_schedules = schedules.len();

    // Only terms before the active one carry grades
    let graded = scheduled
        .iter()
        .position(|semester| semester.is_active)
        .unwrap_or(0);

    for i in 0..STUDENTS {
        let department = &departments[i % departments.len()];
        let entry_year = today.year() - 1 - (i % 4) as i32;
        let student = StudentService::create(
            db,
            NewStudent {
                person: person(format!("01{:08}", i + 1), i + 7, today.year() - 19 - (i % 5) as i32),
                student_number: format!("{entry_year:04}{:010}", i + 1),
                department_id: department.id,
                entry_year,
                enrollment_date: date(entry_year, 9, 1),
                degree: match i % 10 {
                    8 => Degree::Master,
                    9 => Degree::Phd,
                    _ => Degree::Bachelor,
                },
                is_active: true,
                major: department.name.clone(),
                minor: None,
                gpa: None,
            },
            today,
        )
        .await?;

        for k in 0..3 + i % 3 {
            let (class_schedule_id, s) = schedules[(i * 7 + k * 5) % schedules.len()];
            let grade = (s < graded).then(|| 10.0 + ((i + k) % 11) as f64);
            EnrollmentService::create(
                db,
                NewEnrollment {
                    student_id: student.student.id,
                    class_schedule_id,
                    grade,
                },
            )
            .await?;
            summary.enrollments += 1;
        }
        summary.students += 1;
    }

    info!("Generated sample data: {summary:?}");
    Ok(summary)
}
