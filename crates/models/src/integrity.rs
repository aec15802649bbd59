//! Ownership and deletion policy between record kinds

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Person,
    Faculty,
    Department,
    Professor,
    Student,
    Employee,
    Course,
    Semester,
    ClassSchedule,
    Enrollment,
    PhoneNumber,
    EmailAddress,
    Address,
    ProfessorDepartment,
    ProfessorCourse,
    CoursePrerequisite,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Faculty => "faculty",
            Self::Department => "department",
            Self::Professor => "professor",
            Self::Student => "student",
            Self::Employee => "employee",
            Self::Course => "course",
            Self::Semester => "semester",
            Self::ClassSchedule => "class schedule",
            Self::Enrollment => "enrollment",
            Self::PhoneNumber => "phone number",
            Self::EmailAddress => "email address",
            Self::Address => "address",
            Self::ProfessorDepartment => "professor department",
            Self::ProfessorCourse => "professor course",
            Self::CoursePrerequisite => "course prerequisite",
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// What happens to dependents when their parent row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// The delete is blocked while dependents exist
    Restrict,
    /// Dependents are removed with the parent
    Cascade,
}

/// A foreign key from `child.column` to `parent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub parent: Table,
    pub child: Table,
    pub column: &'static str,
    pub on_delete: DeletePolicy,
}

const fn restrict(parent: Table, child: Table, column: &'static str) -> Relationship {
    Relationship {
        parent,
        child,
        column,
        on_delete: DeletePolicy::Restrict,
    }
}

const fn cascade(parent: Table, child: Table, column: &'static str) -> Relationship {
    Relationship {
        parent,
        child,
        column,
        on_delete: DeletePolicy::Cascade,
    }
}

pub const RELATIONSHIPS: &[Relationship] = &[
    restrict(Table::Faculty, Table::Department, "faculty_id"),
    restrict(Table::Faculty, Table::Professor, "faculty_id"),
    restrict(Table::Department, Table::Course, "department_id"),
    restrict(Table::Department, Table::Student, "department_id"),
    restrict(Table::Course, Table::ClassSchedule, "course_id"),
    restrict(Table::Professor, Table::ClassSchedule, "professor_id"),
    restrict(Table::Semester, Table::ClassSchedule, "semester_id"),
    restrict(Table::Student, Table::Enrollment, "student_id"),
    restrict(Table::ClassSchedule, Table::Enrollment, "class_schedule_id"),
    cascade(Table::Person, Table::PhoneNumber, "national_id"),
    cascade(Table::Person, Table::EmailAddress, "national_id"),
    cascade(Table::Person, Table::Address, "national_id"),
    cascade(Table::Person, Table::Employee, "national_id"),
    cascade(Table::Person, Table::Student, "national_id"),
    cascade(Table::Person, Table::Professor, "national_id"),
    // Association rows never outlive either side
    cascade(Table::Professor, Table::ProfessorDepartment, "professor_id"),
    cascade(Table::Department, Table::ProfessorDepartment, "department_id"),
    cascade(Table::Professor, Table::ProfessorCourse, "professor_id"),
    cascade(Table::Course, Table::ProfessorCourse, "course_id"),
    cascade(Table::Course, Table::CoursePrerequisite, "course_id"),
    cascade(Table::Course, Table::CoursePrerequisite, "prerequisite_id"),
];

/// The policy for the foreign key `child.column`
///
/// # Panics
/// If no such relationship is declared; the table above is the single source
/// the schema is built from, so a miss is a programming error.
pub fn policy(child: Table, column: &str) -> DeletePolicy {
    RELATIONSHIPS
        .iter()
        .find(|r| r.child == child && r.column == column)
        .map(|r| r.on_delete)
        .unwrap_or_else(|| panic!("no relationship declared for {child}.{column}"))
}

/// Children that block deleting a `parent` row
pub fn restricting(parent: Table) -> impl Iterator<Item = &'static Relationship> {
    RELATIONSHIPS
        .iter()
        .filter(move |r| r.parent == parent && r.on_delete == DeletePolicy::Restrict)
}

/// Children removed along with a `parent` row
pub fn cascading(parent: Table) -> impl Iterator<Item = &'static Relationship> {
    RELATIONSHIPS
        .iter()
        .filter(move |r| r.parent == parent && r.on_delete == DeletePolicy::Cascade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrict_relationships() {
        let faculty_children: Vec<Table> = restricting(Table::Faculty).map(|r| r.child).collect();
        assert_eq!(faculty_children, vec![Table::Department, Table::Professor]);

        let schedule_parents: Vec<Table> = RELATIONSHIPS
            .iter()
            .filter(|r| r.child == Table::ClassSchedule)
            .map(|r| r.parent)
            .collect();
        assert_eq!(
            schedule_parents,
            vec![Table::Course, Table::Professor, Table::Semester]
        );
    }

    #[test]
    fn test_person_cascades_to_contacts() {
        let children: Vec<Table> = cascading(Table::Person).map(|r| r.child).collect();
        for table in [
            Table::PhoneNumber,
            Table::EmailAddress,
            Table::Address,
            Table::Employee,
        ] {
            assert!(children.contains(&table), "{table} should cascade");
        }
        assert_eq!(restricting(Table::Person).count(), 0);
    }

    #[test]
    fn test_associations_never_restrict() {
        for table in [
            Table::ProfessorDepartment,
            Table::ProfessorCourse,
            Table::CoursePrerequisite,
        ] {
            assert!(
                RELATIONSHIPS
                    .iter()
                    .filter(|r| r.child == table)
                    .all(|r| r.on_delete == DeletePolicy::Cascade)
            );
        }
    }

    #[test]
    fn test_policy_lookup() {
        assert_eq!(
            policy(Table::Enrollment, "student_id"),
            DeletePolicy::Restrict
        );
        assert_eq!(
            policy(Table::Address, "national_id"),
            DeletePolicy::Cascade
        );
    }
}
