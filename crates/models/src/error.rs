use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// A single rejected field value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    /// The value does not match the field's pattern or length rule
    #[error("{field}: expected {expected}")]
    Format {
        field: &'static str,
        expected: String,
    },
    /// A numeric or date value lies outside its allowed bounds
    #[error("{field}: {reason}")]
    InvalidRange {
        field: &'static str,
        reason: String,
    },
}

impl FieldError {
    pub fn format(field: &'static str, expected: impl Into<String>) -> Self {
        Self::Format {
            field,
            expected: expected.into(),
        }
    }

    pub fn range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::Format { field, .. } | Self::InvalidRange { field, .. } => field,
        }
    }
}

/// Every rule a record violated, never empty
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Collects the outcome of every check run against a record
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, result: Result<(), FieldError>) -> &mut Self {
        if let Err(error) = result {
            self.0.push(error);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_collect_every_failure() {
        let mut violations = Violations::new();
        violations
            .check(Ok(()))
            .check(Err(FieldError::format("national_id", "10 digits")))
            .check(Err(FieldError::range("grade", "must be within [0, 20]")));

        let errors = violations.finish().unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert!(errors.has_field("national_id"));
        assert!(errors.has_field("grade"));
        assert_eq!(
            errors.to_string(),
            "national_id: expected 10 digits; grade: must be within [0, 20]"
        );
    }

    #[test]
    fn test_empty_violations_pass() {
        let mut violations = Violations::new();
        violations.check(Ok(()));
        assert!(violations.finish().is_ok());
    }
}
