use std::fmt;

use actix_web::{
    HttpResponse,
    error::ResponseError,
    http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    /// Schema constraint violated; carries every violated field in a
    /// deterministic order.
    ValidationError(Vec<FieldError>),
    NotFound(String),
    /// No bearer token supplied.
    MissingCredentials,
    /// Token supplied but does not match the server secret.
    InvalidCredentials,
    /// Store or query failure; detail is logged, never sent to the caller.
    InternalError(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::MissingCredentials => write!(f, "Access denied. No token provided."),
            AppError::InvalidCredentials => write!(f, "Invalid or expired token"),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                serde_json::json!({ "error": messages })
            }
            AppError::NotFound(msg) => serde_json::json!({ "error": msg }),
            AppError::MissingCredentials | AppError::InvalidCredentials => {
                serde_json::json!({ "error": self.to_string() })
            }
            AppError::InternalError(msg) => {
                tracing::error!("internal error: {}", msg);
                serde_json::json!({ "error": "Internal server error" })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredentials => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // ValidationErrors iterates a map; sort so callers always see
        // the same list for the same payload.
        field_errors.sort_by(|a, b| (&a.field, &a.message).cmp(&(&b.field, &b.message)));

        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(min = 1, message = "Description is required"))]
        description: String,
    }

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::validation("title", "Title is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MissingCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InternalError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_collect_in_deterministic_order() {
        let probe = Probe {
            title: String::new(),
            description: String::new(),
        };
        let err = AppError::from(probe.validate().unwrap_err());
        match err {
            AppError::ValidationError(fields) => {
                let messages: Vec<&str> = fields.iter().map(|f| f.message.as_str()).collect();
                assert_eq!(messages, vec!["Description is required", "Title is required"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
