use crate::idens::*;
use models::integrity::{self, DeletePolicy, Table as Record};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Delete action for `record.column`, taken from the shared policy table
fn on_delete(record: Record, column: &str) -> ForeignKeyAction {
    match integrity::policy(record, column) {
        DeletePolicy::Restrict => ForeignKeyAction::Restrict,
        DeletePolicy::Cascade => ForeignKeyAction::Cascade,
    }
}

fn id<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create people table
        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(People::NationalId)
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(People::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(People::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(People::FatherName).string_len(100).not_null())
                    .col(ColumnDef::new(People::BirthDate).date().not_null())
                    .col(ColumnDef::new(People::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(People::MaritalStatus).string_len(1).not_null())
                    .col(ColumnDef::new(People::BloodType).string_len(3).not_null())
                    .col(ColumnDef::new(People::Nationality).string_len(16).not_null())
                    .col(
                        ColumnDef::new(People::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(People::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create faculties table
        manager
            .create_table(
                Table::create()
                    .table(Faculties::Table)
                    .if_not_exists()
                    .col(id(Faculties::Id))
                    .col(ColumnDef::new(Faculties::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Faculties::Code).string_len(10).not_null())
                    .col(ColumnDef::new(Faculties::EstablishedOn).date())
                    .col(ColumnDef::new(Faculties::Website).string())
                    .to_owned(),
            )
            .await?;

        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(id(Departments::Id))
                    .col(ColumnDef::new(Departments::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Departments::Code).string_len(10).not_null())
                    .col(ColumnDef::new(Departments::FacultyId).integer().not_null())
                    .col(ColumnDef::new(Departments::EstablishedOn).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-departments-faculty_id")
                            .from(Departments::Table, Departments::FacultyId)
                            .to(Faculties::Table, Faculties::Id)
                            .on_delete(on_delete(Record::Department, "faculty_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create professors table
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(id(Professors::Id))
                    .col(ColumnDef::new(Professors::NationalId).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Professors::PersonnelCode)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Professors::FacultyId).integer().not_null())
                    .col(
                        ColumnDef::new(Professors::AcademicRank)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Professors::Salary).big_integer().not_null())
                    .col(
                        ColumnDef::new(Professors::EmploymentStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Professors::HireDate).date().not_null())
                    .col(ColumnDef::new(Professors::LastPromotionDate).date())
                    .col(ColumnDef::new(Professors::ContractEndDate).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professors-national_id")
                            .from(Professors::Table, Professors::NationalId)
                            .to(People::Table, People::NationalId)
                            .on_delete(on_delete(Record::Professor, "national_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professors-faculty_id")
                            .from(Professors::Table, Professors::FacultyId)
                            .to(Faculties::Table, Faculties::Id)
                            .on_delete(on_delete(Record::Professor, "faculty_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(id(Students::Id))
                    .col(ColumnDef::new(Students::NationalId).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Students::StudentNumber)
                            .string_len(14)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Students::EntryYear).integer().not_null())
                    .col(ColumnDef::new(Students::EnrollmentDate).date().not_null())
                    .col(ColumnDef::new(Students::Degree).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Students::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Students::Major).string_len(100).not_null())
                    .col(ColumnDef::new(Students::Minor).string_len(100))
                    .col(ColumnDef::new(Students::Gpa).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-national_id")
                            .from(Students::Table, Students::NationalId)
                            .to(People::Table, People::NationalId)
                            .on_delete(on_delete(Record::Student, "national_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-department_id")
                            .from(Students::Table, Students::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(on_delete(Record::Student, "department_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employees table (the contract record of a person)
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(id(Employees::Id))
                    .col(ColumnDef::new(Employees::NationalId).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Employees::PersonnelCode)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Title).string_len(25).not_null())
                    .col(ColumnDef::new(Employees::ContractDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employees-national_id")
                            .from(Employees::Table, Employees::NationalId)
                            .to(People::Table, People::NationalId)
                            .on_delete(on_delete(Record::Employee, "national_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(id(Courses::Id))
                    .col(ColumnDef::new(Courses::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Code).string_len(7).not_null())
                    .col(ColumnDef::new(Courses::Units).small_integer().not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-department_id")
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(on_delete(Record::Course, "department_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_prerequisites junction table (course -> required course)
        manager
            .create_table(
                Table::create()
                    .table(CoursePrerequisites::Table)
                    .if_not_exists()
                    .col(id(CoursePrerequisites::Id))
                    .col(
                        ColumnDef::new(CoursePrerequisites::CourseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::PrerequisiteId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_prerequisites-course_id")
                            .from(CoursePrerequisites::Table, CoursePrerequisites::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(on_delete(Record::CoursePrerequisite, "course_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_prerequisites-prerequisite_id")
                            .from(
                                CoursePrerequisites::Table,
                                CoursePrerequisites::PrerequisiteId,
                            )
                            .to(Courses::Table, Courses::Id)
                            .on_delete(on_delete(
                                Record::CoursePrerequisite,
                                "prerequisite_id",
                            )),
                    )
                    .to_owned(),
            )
            .await?;

        // Create professor_departments junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(ProfessorDepartments::Table)
                    .if_not_exists()
                    .col(id(ProfessorDepartments::Id))
                    .col(
                        ColumnDef::new(ProfessorDepartments::ProfessorId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessorDepartments::DepartmentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor_departments-professor_id")
                            .from(ProfessorDepartments::Table, ProfessorDepartments::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(on_delete(Record::ProfessorDepartment, "professor_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor_departments-department_id")
                            .from(
                                ProfessorDepartments::Table,
                                ProfessorDepartments::DepartmentId,
                            )
                            .to(Departments::Table, Departments::Id)
                            .on_delete(on_delete(Record::ProfessorDepartment, "department_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create professor_courses junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(ProfessorCourses::Table)
                    .if_not_exists()
                    .col(id(ProfessorCourses::Id))
                    .col(
                        ColumnDef::new(ProfessorCourses::ProfessorId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProfessorCourses::CourseId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor_courses-professor_id")
                            .from(ProfessorCourses::Table, ProfessorCourses::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(on_delete(Record::ProfessorCourse, "professor_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor_courses-course_id")
                            .from(ProfessorCourses::Table, ProfessorCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(on_delete(Record::ProfessorCourse, "course_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create semesters table
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(id(Semesters::Id))
                    .col(ColumnDef::new(Semesters::Year).integer().not_null())
                    .col(ColumnDef::new(Semesters::Term).small_integer().not_null())
                    .col(
                        ColumnDef::new(Semesters::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Create class_schedules table
        manager
            .create_table(
                Table::create()
                    .table(ClassSchedules::Table)
                    .if_not_exists()
                    .col(id(ClassSchedules::Id))
                    .col(ColumnDef::new(ClassSchedules::CourseId).integer().not_null())
                    .col(ColumnDef::new(ClassSchedules::ProfessorId).integer().not_null())
                    .col(ColumnDef::new(ClassSchedules::SemesterId).integer().not_null())
                    .col(ColumnDef::new(ClassSchedules::Day).small_integer().not_null())
                    .col(ColumnDef::new(ClassSchedules::StartTime).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::EndTime).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::Capacity).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_schedules-course_id")
                            .from(ClassSchedules::Table, ClassSchedules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(on_delete(Record::ClassSchedule, "course_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_schedules-professor_id")
                            .from(ClassSchedules::Table, ClassSchedules::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(on_delete(Record::ClassSchedule, "professor_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_schedules-semester_id")
                            .from(ClassSchedules::Table, ClassSchedules::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(on_delete(Record::ClassSchedule, "semester_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments table
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(id(Enrollments::Id))
                    .col(ColumnDef::new(Enrollments::StudentId).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::ClassScheduleId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::Grade).double())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(on_delete(Record::Enrollment, "student_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-class_schedule_id")
                            .from(Enrollments::Table, Enrollments::ClassScheduleId)
                            .to(ClassSchedules::Table, ClassSchedules::Id)
                            .on_delete(on_delete(Record::Enrollment, "class_schedule_id")),
                    )
                    .to_owned(),
            )
            .await?;

        // Create contact tables, all owned by a person
        manager
            .create_table(
                Table::create()
                    .table(PhoneNumbers::Table)
                    .if_not_exists()
                    .col(id(PhoneNumbers::Id))
                    .col(
                        ColumnDef::new(PhoneNumbers::NationalId)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PhoneNumbers::PhoneType).string_len(10).not_null())
                    .col(ColumnDef::new(PhoneNumbers::Number).string_len(15).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-phone_numbers-national_id")
                            .from(PhoneNumbers::Table, PhoneNumbers::NationalId)
                            .to(People::Table, People::NationalId)
                            .on_delete(on_delete(Record::PhoneNumber, "national_id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmailAddresses::Table)
                    .if_not_exists()
                    .col(id(EmailAddresses::Id))
                    .col(
                        ColumnDef::new(EmailAddresses::NationalId)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailAddresses::EmailType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmailAddresses::Email).string_len(254).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-email_addresses-national_id")
                            .from(EmailAddresses::Table, EmailAddresses::NationalId)
                            .to(People::Table, People::NationalId)
                            .on_delete(on_delete(Record::EmailAddress, "national_id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Addresses::PostCode)
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Addresses::NationalId).string_len(10).not_null())
                    .col(ColumnDef::new(Addresses::Country).string_len(50).not_null())
                    .col(ColumnDef::new(Addresses::Province).string_len(50).not_null())
                    .col(ColumnDef::new(Addresses::City).string_len(50).not_null())
                    .col(ColumnDef::new(Addresses::District).string_len(50).not_null())
                    .col(ColumnDef::new(Addresses::Street).string_len(100).not_null())
                    .col(ColumnDef::new(Addresses::Alley).string_len(100).not_null())
                    .col(ColumnDef::new(Addresses::Plaque).integer().not_null())
                    .col(ColumnDef::new(Addresses::Floor).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-addresses-national_id")
                            .from(Addresses::Table, Addresses::NationalId)
                            .to(People::Table, People::NationalId)
                            .on_delete(on_delete(Record::Address, "national_id")),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EmailAddresses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PhoneNumbers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClassSchedules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProfessorCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProfessorDepartments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CoursePrerequisites::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Faculties::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;

        Ok(())
    }
}
