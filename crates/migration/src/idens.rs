use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum People {
    Table,
    NationalId,
    FirstName,
    LastName,
    FatherName,
    BirthDate,
    Gender,
    MaritalStatus,
    BloodType,
    Nationality,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Faculties {
    Table,
    Id,
    Name,
    Code,
    EstablishedOn,
    Website,
}

#[derive(DeriveIden)]
pub enum Departments {
    Table,
    Id,
    Name,
    Code,
    FacultyId,
    EstablishedOn,
}

#[derive(DeriveIden)]
pub enum Professors {
    Table,
    Id,
    NationalId,
    PersonnelCode,
    FacultyId,
    AcademicRank,
    Salary,
    EmploymentStatus,
    HireDate,
    LastPromotionDate,
    ContractEndDate,
}

#[derive(DeriveIden)]
pub enum Students {
    Table,
    Id,
    NationalId,
    StudentNumber,
    DepartmentId,
    EntryYear,
    EnrollmentDate,
    Degree,
    IsActive,
    Major,
    Minor,
    Gpa,
}

#[derive(DeriveIden)]
pub enum Employees {
    Table,
    Id,
    NationalId,
    PersonnelCode,
    Title,
    ContractDate,
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    Id,
    Name,
    Code,
    Units,
    DepartmentId,
}

#[derive(DeriveIden)]
pub enum CoursePrerequisites {
    Table,
    Id,
    CourseId,
    PrerequisiteId,
}

#[derive(DeriveIden)]
pub enum ProfessorDepartments {
    Table,
    Id,
    ProfessorId,
    DepartmentId,
}

#[derive(DeriveIden)]
pub enum ProfessorCourses {
    Table,
    Id,
    ProfessorId,
    CourseId,
}

#[derive(DeriveIden)]
pub enum Semesters {
    Table,
    Id,
    Year,
    Term,
    IsActive,
}

#[derive(DeriveIden)]
pub enum ClassSchedules {
    Table,
    Id,
    CourseId,
    ProfessorId,
    SemesterId,
    Day,
    StartTime,
    EndTime,
    Capacity,
}

#[derive(DeriveIden)]
pub enum Enrollments {
    Table,
    Id,
    StudentId,
    ClassScheduleId,
    Grade,
    EnrolledAt,
}

#[derive(DeriveIden)]
pub enum PhoneNumbers {
    Table,
    Id,
    NationalId,
    PhoneType,
    Number,
}

#[derive(DeriveIden)]
pub enum EmailAddresses {
    Table,
    Id,
    NationalId,
    EmailType,
    Email,
}

#[derive(DeriveIden)]
pub enum Addresses {
    Table,
    PostCode,
    NationalId,
    Country,
    Province,
    City,
    District,
    Street,
    Alley,
    Plaque,
    Floor,
}
