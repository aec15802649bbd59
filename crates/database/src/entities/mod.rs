pub mod addresses;
pub mod class_schedules;
pub mod course_prerequisites;
pub mod courses;
pub mod departments;
pub mod email_addresses;
pub mod employees;
pub mod enrollments;
pub mod faculties;
pub mod people;
pub mod phone_numbers;
pub mod professor_courses;
pub mod professor_departments;
pub mod professors;
pub mod semesters;
pub mod students;

use models::integrity::Table;

/// Storage table backing each record kind
pub fn table_name(table: Table) -> &'static str {
    match table {
        Table::Person => "people",
        Table::Faculty => "faculties",
        Table::Department => "departments",
        Table::Professor => "professors",
        Table::Student => "students",
        Table::Employee => "employees",
        Table::Course => "courses",
        Table::Semester => "semesters",
        Table::ClassSchedule => "class_schedules",
        Table::Enrollment => "enrollments",
        Table::PhoneNumber => "phone_numbers",
        Table::EmailAddress => "email_addresses",
        Table::Address => "addresses",
        Table::ProfessorDepartment => "professor_departments",
        Table::ProfessorCourse => "professor_courses",
        Table::CoursePrerequisite => "course_prerequisites",
    }
}

/// Primary key column of each table
pub fn primary_key(table: Table) -> &'static str {
    match table {
        Table::Person => "national_id",
        Table::Address => "post_code",
        _ => "id",
    }
}
