use log::{error, warn};
use models::{error::ValidationErrors, integrity::Table};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure of a service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The input broke one or more field rules
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A reference does not resolve, or dependents block a delete
    #[error("{entity}: {reason}")]
    ReferenceViolation { entity: Table, reason: String },

    /// A natural key or composite unique key is already taken
    #[error("{entity} already exists with the same {}", .fields.join(", "))]
    UniquenessViolation { entity: Table, fields: Vec<String> },

    #[error("{entity} {key} not found")]
    NotFound { entity: Table, key: String },

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: Table, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: Table, fields: &[&str]) -> Self {
        Self::UniquenessViolation {
            entity,
            fields: fields.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn reference(entity: Table, reason: impl Into<String>) -> Self {
        Self::ReferenceViolation {
            entity,
            reason: reason.into(),
        }
    }

    /// Maps a storage failure on a write to `entity` into the error taxonomy
    pub fn from_storage(entity: Table, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                warn!("Unique constraint rejected {entity} write: {detail}");
                Self::UniquenessViolation {
                    entity,
                    fields: conflicting_fields(&detail),
                }
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                warn!("Foreign key rejected {entity} write: {detail}");
                Self::ReferenceViolation {
                    entity,
                    reason: "the write conflicts with a related record".to_string(),
                }
            }
            _ => {
                error!("Database error while writing {entity}: {err}");
                Self::Database(err)
            }
        }
    }
}

/// Column names named in a unique constraint message
///
/// SQLite reports `UNIQUE constraint failed: students.student_number`;
/// PostgreSQL reports the index name, e.g. `idx_students_student_number`.
fn conflicting_fields(detail: &str) -> Vec<String> {
    if let Some((_, columns)) = detail.split_once("failed: ") {
        return columns
            .split(", ")
            .filter_map(|column| column.split_once('.').map(|(_, name)| name.trim().to_string()))
            .collect();
    }
    detail
        .split('"')
        .find(|part| part.starts_with("idx_"))
        .map(|index| vec![index.to_string()])
        .unwrap_or_default()
}

/// Classifies storage errors of a write against the record being written
pub trait StorageResultExt<T> {
    fn or_violation(self, entity: Table) -> Result<T, ServiceError>;
}

impl<T> StorageResultExt<T> for Result<T, DbErr> {
    fn or_violation(self, entity: Table) -> Result<T, ServiceError> {
        self.map_err(|err| ServiceError::from_storage(entity, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_unique_message_fields() {
        assert_eq!(
            conflicting_fields("UNIQUE constraint failed: students.student_number"),
            vec!["student_number"]
        );
        assert_eq!(
            conflicting_fields("UNIQUE constraint failed: semesters.year, semesters.term"),
            vec!["year", "term"]
        );
    }

    #[test]
    fn test_postgres_unique_message_fields() {
        let detail = r#"duplicate key value violates unique constraint "idx_courses_code""#;
        assert_eq!(conflicting_fields(detail), vec!["idx_courses_code"]);
        assert!(conflicting_fields("something else").is_empty());
    }

    #[test]
    fn test_messages() {
        let err = ServiceError::duplicate(Table::Semester, &["year", "term"]);
        assert_eq!(
            err.to_string(),
            "semester already exists with the same year, term"
        );

        let err = ServiceError::not_found(Table::ClassSchedule, 7);
        assert_eq!(err.to_string(), "class schedule 7 not found");
    }
}
