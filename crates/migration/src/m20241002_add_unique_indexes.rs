use crate::idens::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn unique<T, C>(
    name: &'static str,
    table: T,
    columns: impl IntoIterator<Item = C>,
) -> (&'static str, IndexCreateStatement)
where
    T: IntoIden + 'static,
    C: IntoIden,
{
    let mut index = Index::create();
    index.name(name).table(table).unique();
    for column in columns {
        index.col(column);
    }
    (name, index.to_owned())
}

fn indexes() -> Vec<(&'static str, IndexCreateStatement)> {
    vec![
        // Natural keys
        unique("idx_faculties_code", Faculties::Table, [Faculties::Code]),
        unique("idx_departments_code", Departments::Table, [Departments::Code]),
        unique("idx_courses_code", Courses::Table, [Courses::Code]),
        unique(
            "idx_professors_personnel_code",
            Professors::Table,
            [Professors::PersonnelCode],
        ),
        unique(
            "idx_employees_personnel_code",
            Employees::Table,
            [Employees::PersonnelCode],
        ),
        unique(
            "idx_students_student_number",
            Students::Table,
            [Students::StudentNumber],
        ),
        // Composite keys
        unique(
            "idx_students_student_number_national_id",
            Students::Table,
            [Students::StudentNumber, Students::NationalId],
        ),
        unique(
            "idx_professors_national_id_personnel_code",
            Professors::Table,
            [Professors::NationalId, Professors::PersonnelCode],
        ),
        unique(
            "idx_employees_national_id_personnel_code",
            Employees::Table,
            [Employees::NationalId, Employees::PersonnelCode],
        ),
        unique(
            "idx_semesters_year_term",
            Semesters::Table,
            [Semesters::Year, Semesters::Term],
        ),
        unique(
            "idx_enrollments_student_id_class_schedule_id",
            Enrollments::Table,
            [Enrollments::StudentId, Enrollments::ClassScheduleId],
        ),
        unique(
            "idx_phone_numbers_national_id_number",
            PhoneNumbers::Table,
            [PhoneNumbers::NationalId, PhoneNumbers::Number],
        ),
        unique(
            "idx_email_addresses_national_id_email",
            EmailAddresses::Table,
            [EmailAddresses::NationalId, EmailAddresses::Email],
        ),
        // Association sets
        unique(
            "idx_professor_departments_professor_id_department_id",
            ProfessorDepartments::Table,
            [
                ProfessorDepartments::ProfessorId,
                ProfessorDepartments::DepartmentId,
            ],
        ),
        unique(
            "idx_professor_courses_professor_id_course_id",
            ProfessorCourses::Table,
            [ProfessorCourses::ProfessorId, ProfessorCourses::CourseId],
        ),
        unique(
            "idx_course_prerequisites_course_id_prerequisite_id",
            CoursePrerequisites::Table,
            [
                CoursePrerequisites::CourseId,
                CoursePrerequisites::PrerequisiteId,
            ],
        ),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (_, index) in indexes() {
            manager.create_index(index).await?;
        }

        // Lookup indexes on foreign keys used by list filters
        manager
            .create_index(
                Index::create()
                    .name("idx_class_schedules_semester_id")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::SemesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_class_schedule_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassScheduleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_class_schedule_id")
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_semester_id")
                    .table(ClassSchedules::Table)
                    .to_owned(),
            )
            .await?;

        for (name, _) in indexes().into_iter().rev() {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
