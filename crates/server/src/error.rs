use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use models::error::FieldError;
use serde::Serialize;

/// Offending fields: rule failures for invalid input, column names for conflicts
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorFields {
    Invalid(Vec<FieldError>),
    Conflicting(Vec<String>),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ErrorFields>,
}

/// A failed request, rendered as a JSON error body
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// A body, query string or path segment the extractor could not parse
    Malformed { status: StatusCode, message: String },
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

macro_rules! from_rejection {
    ($rejection:ty) => {
        impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                Self::Malformed {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            }
        }
    };
}

from_rejection!(JsonRejection);
from_rejection!(QueryRejection);
from_rejection!(PathRejection);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Service(
                ServiceError::UniquenessViolation { .. } | ServiceError::ReferenceViolation { .. },
            ) => StatusCode::CONFLICT,
            Self::Service(ServiceError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Malformed { status, .. } => *status,
        }
    }

    fn body(self) -> ErrorBody {
        let err = match self {
            Self::Service(err) => err,
            Self::Malformed { message, .. } => {
                return ErrorBody {
                    error: "malformed_request",
                    message,
                    fields: None,
                };
            }
        };
        let message = err.to_string();
        match err {
            ServiceError::Validation(errors) => ErrorBody {
                error: "validation",
                message,
                fields: Some(ErrorFields::Invalid(errors.into_inner())),
            },
            ServiceError::UniquenessViolation { fields, .. } => ErrorBody {
                error: "uniqueness_violation",
                message,
                fields: Some(ErrorFields::Conflicting(fields)),
            },
            ServiceError::ReferenceViolation { .. } => ErrorBody {
                error: "reference_violation",
                message,
                fields: None,
            },
            ServiceError::NotFound { .. } => ErrorBody {
                error: "not_found",
                message,
                fields: None,
            },
            ServiceError::Database(err) => {
                error!("Request failed on a database error: {err}");
                ErrorBody {
                    error: "internal",
                    message: "internal server error".to_string(),
                    fields: None,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}
