use sea_orm::{DeriveActiveEnum, EnumIter, Iterable};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "kebab-case")]
pub enum AcademicRank {
    #[sea_orm(string_value = "assistant")]
    Assistant,
    #[sea_orm(string_value = "associate")]
    Associate,
    #[sea_orm(string_value = "full-professor")]
    FullProfessor,
    #[sea_orm(string_value = "lecturer")]
    Lecturer,
    #[sea_orm(string_value = "instructor")]
    Instructor,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    #[sea_orm(string_value = "associate")]
    Associate,
    #[sea_orm(string_value = "bachelor")]
    Bachelor,
    #[sea_orm(string_value = "master")]
    Master,
    #[sea_orm(string_value = "phd")]
    Phd,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    #[sea_orm(string_value = "full-time")]
    FullTime,
    #[sea_orm(string_value = "part-time")]
    PartTime,
    #[sea_orm(string_value = "temporary")]
    Temporary,
    #[sea_orm(string_value = "contract")]
    Contract,
}

/// Academic term within a year, stored and sent as 1, 2 or 3
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(try_from = "i16", into = "i16")]
pub enum Term {
    #[sea_orm(num_value = 1)]
    First,
    #[sea_orm(num_value = 2)]
    Second,
    #[sea_orm(num_value = 3)]
    Summer,
}

impl Term {
    pub fn number(self) -> i16 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Summer => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::First => "first half",
            Self::Second => "second half",
            Self::Summer => "summer",
        }
    }

    pub fn all() -> Vec<Term> {
        Term::iter().collect()
    }
}

impl TryFrom<i16> for Term {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Term::iter()
            .find(|term| term.number() == value)
            .ok_or_else(|| format!("term must be 1, 2 or 3, got {value}"))
    }
}

impl From<Term> for i16 {
    fn from(term: Term) -> Self {
        term.number()
    }
}

/// Teaching day, numbered from Saturday (0) to Thursday (5)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(try_from = "i16", into = "i16")]
pub enum Weekday {
    #[sea_orm(num_value = 0)]
    Saturday,
    #[sea_orm(num_value = 1)]
    Sunday,
    #[sea_orm(num_value = 2)]
    Monday,
    #[sea_orm(num_value = 3)]
    Tuesday,
    #[sea_orm(num_value = 4)]
    Wednesday,
    #[sea_orm(num_value = 5)]
    Thursday,
}

impl Weekday {
    pub fn number(self) -> i16 {
        self as i16
    }

    pub fn from_number(value: i16) -> Option<Self> {
        Weekday::iter().find(|day| day.number() == value)
    }
}

impl TryFrom<i16> for Weekday {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("day must be within 0..=5, got {value}"))
    }
}

impl From<Weekday> for i16 {
    fn from(day: Weekday) -> Self {
        day.number()
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_numbers() {
        assert_eq!(Term::try_from(1), Ok(Term::First));
        assert_eq!(Term::try_from(3), Ok(Term::Summer));
        assert!(Term::try_from(4).is_err());
        assert_eq!(i16::from(Term::Second), 2);
        assert_eq!(Term::all().len(), 3);
        assert_eq!(Term::Summer.label(), "summer");
    }

    #[test]
    fn test_term_wire_format() {
        assert_eq!(serde_json::to_string(&Term::First).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Term>("2").unwrap(), Term::Second);
        assert!(serde_json::from_str::<Term>("0").is_err());
    }

    #[test]
    fn test_weekday_range() {
        assert_eq!(Weekday::from_number(0), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_number(5), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_number(6), None);
        assert_eq!(Weekday::Monday.to_string(), "Monday");
        assert_eq!(serde_json::to_string(&Weekday::Tuesday).unwrap(), "3");
    }

    #[test]
    fn test_kebab_case_vocabularies() {
        assert_eq!(
            serde_json::to_string(&AcademicRank::FullProfessor).unwrap(),
            "\"full-professor\""
        );
        assert_eq!(
            serde_json::from_str::<EmploymentStatus>("\"part-time\"").unwrap(),
            EmploymentStatus::PartTime
        );
        assert_eq!(serde_json::to_string(&Degree::Phd).unwrap(), "\"phd\"");
    }
}
