use crate::{
    error::{ValidationErrors, Violations},
    records::{NewEmployee, NewProfessor, NewStudent},
    rules, validate,
};
use chrono::NaiveDate;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "M")]
    Male,
    #[sea_orm(string_value = "F")]
    Female,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    #[sea_orm(string_value = "S")]
    Single,
    #[sea_orm(string_value = "M")]
    Married,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum BloodType {
    #[sea_orm(string_value = "AB")]
    #[serde(rename = "AB")]
    Ab,
    #[sea_orm(string_value = "AB+")]
    #[serde(rename = "AB+")]
    AbPositive,
    #[sea_orm(string_value = "AB-")]
    #[serde(rename = "AB-")]
    AbNegative,
    #[sea_orm(string_value = "A")]
    #[serde(rename = "A")]
    A,
    #[sea_orm(string_value = "A+")]
    #[serde(rename = "A+")]
    APositive,
    #[sea_orm(string_value = "A-")]
    #[serde(rename = "A-")]
    ANegative,
    #[sea_orm(string_value = "B")]
    #[serde(rename = "B")]
    B,
    #[sea_orm(string_value = "B+")]
    #[serde(rename = "B+")]
    BPositive,
    #[sea_orm(string_value = "B-")]
    #[serde(rename = "B-")]
    BNegative,
    #[sea_orm(string_value = "O")]
    #[serde(rename = "O")]
    O,
    #[sea_orm(string_value = "O+")]
    #[serde(rename = "O+")]
    OPositive,
    #[sea_orm(string_value = "O-")]
    #[serde(rename = "O-")]
    ONegative,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Nationality {
    #[sea_orm(string_value = "national")]
    National,
    #[sea_orm(string_value = "foreign")]
    Foreign,
}

/// Attributes every member of the university carries, keyed by national ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonInfo {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub blood_type: BloodType,
    pub nationality: Nationality,
}

impl PersonInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn violations(&self, today: NaiveDate) -> Violations {
        let mut violations = Violations::new();
        violations
            .check(validate::national_id(&self.national_id))
            .check(validate::not_blank("first_name", &self.first_name))
            .check(validate::not_blank("last_name", &self.last_name))
            .check(validate::not_blank("father_name", &self.father_name))
            .check(rules::minimum_age(self.birth_date, today));
        violations
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        self.violations(today).finish()
    }
}

/// A person in one of their university roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Member {
    Student(NewStudent),
    Professor(NewProfessor),
    Employee(NewEmployee),
}

impl Member {
    pub fn person(&self) -> &PersonInfo {
        match self {
            Self::Student(student) => &student.person,
            Self::Professor(professor) => &professor.person,
            Self::Employee(employee) => &employee.person,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Self::Student(_) => "student",
            Self::Professor(_) => "professor",
            Self::Employee(_) => "employee",
        }
    }

    /// Runs the shared person checks plus the role's own rules
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        match self {
            Self::Student(student) => student.validate(today),
            Self::Professor(professor) => professor.validate(today),
            Self::Employee(employee) => employee.validate(today),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn person(national_id: &str) -> PersonInfo {
        PersonInfo {
            national_id: national_id.to_string(),
            first_name: "Reza".to_string(),
            last_name: "Karimi".to_string(),
            father_name: "Hossein".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2001, 3, 21).unwrap(),
            gender: Gender::Male,
            marital_status: MaritalStatus::Single,
            blood_type: BloodType::OPositive,
            nationality: Nationality::National,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::person, *};
    use crate::academic::Degree;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_valid_person() {
        assert!(person("0012345678").validate(today()).is_ok());
    }

    #[test]
    fn test_person_reports_all_violations() {
        let mut info = person("12345");
        info.first_name = " ".to_string();
        info.birth_date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();

        let errors = info.validate(today()).unwrap_err();
        assert!(errors.has_field("national_id"));
        assert!(errors.has_field("first_name"));
        assert!(errors.has_field("birth_date"));
        assert_eq!(errors.errors().len(), 3);
    }

    #[test]
    fn test_member_exposes_embedded_person() {
        let member = Member::Student(NewStudent {
            person: person("0012345678"),
            student_number: "14020000000001".to_string(),
            department_id: 1,
            entry_year: 2023,
            enrollment_date: NaiveDate::from_ymd_opt(2023, 9, 23).unwrap(),
            degree: Degree::Bachelor,
            is_active: true,
            major: "Computer Engineering".to_string(),
            minor: None,
            gpa: None,
        });

        assert_eq!(member.role(), "student");
        assert_eq!(member.person().full_name(), "Reza Karimi");
        assert!(member.validate(today()).is_ok());
    }

    #[test]
    fn test_vocabulary_wire_names() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert_eq!(serde_json::to_string(&BloodType::AbNegative).unwrap(), "\"AB-\"");
        assert_eq!(
            serde_json::from_str::<BloodType>("\"O+\"").unwrap(),
            BloodType::OPositive
        );
        assert!(serde_json::from_str::<MaritalStatus>("\"widowed\"").is_err());
    }
}
