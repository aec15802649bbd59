use crate::{
    error::ServiceError,
    services::{
        employee::{EmployeeRecord, EmployeeService},
        professor::{ProfessorRecord, ProfessorService},
        student::{StudentRecord, StudentService},
    },
};
use chrono::NaiveDate;
use models::person::Member;
use sea_orm::{ConnectionTrait, TransactionTrait};

/// The stored form of a registered member
#[derive(Debug, Clone)]
pub enum MemberRecord {
    Student(StudentRecord),
    Professor(ProfessorRecord),
    Employee(EmployeeRecord),
}

impl MemberRecord {
    pub fn national_id(&self) -> &str {
        match self {
            Self::Student(record) => &record.person.national_id,
            Self::Professor(record) => &record.person.national_id,
            Self::Employee(record) => &record.person.national_id,
        }
    }
}

pub struct MemberService;

impl MemberService {
    /// Stores a member in their role
    ///
    /// The person row is shared between roles: registering someone who already
    /// exists adds the new role row, provided their personal details match.
    pub async fn register<C>(
        db: &C,
        member: Member,
        today: NaiveDate,
    ) -> Result<MemberRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        match member {
            Member::Student(student) => StudentService::create(db, student, today)
                .await
                .map(MemberRecord::Student),
            Member::Professor(professor) => ProfessorService::create(db, professor, today)
                .await
                .map(MemberRecord::Professor),
            Member::Employee(employee) => EmployeeService::create(db, employee, today)
                .await
                .map(MemberRecord::Employee),
        }
    }
}
