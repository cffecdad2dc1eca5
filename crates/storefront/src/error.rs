//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`, rendered as a JSON error body.
//! Sentry is reached through breadcrumbs here and through the cart store,
//! which reports storage failures itself.
//!
//! Cart mutations never produce an `AppError`: storage failures are absorbed
//! by the cart store, and the catalog is loaded before the server starts.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::forms::FieldError;

/// Application-level error type for the storefront.
///
/// Every variant is a client error; none is reported to Sentry.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Submitted form failed validation.
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Request rejected");

        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let body = match self {
            Self::Validation(fields) => ErrorBody {
                error: "Validation failed".to_string(),
                fields,
            },
            other => ErrorBody {
                error: other.to_string(),
                fields: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, String)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb
            .data
            .insert((*key).to_string(), serde_json::Value::String(value.clone()));
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Validation(Vec::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_not_found_body_has_no_fields() {
        let response = AppError::NotFound("product 404".to_string()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not found: product 404");
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let response = AppError::Validation(vec![FieldError {
            field: "email",
            message: "Please provide a valid email",
        }])
        .into_response();
        let body = body_json(response).await;

        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["fields"][0]["field"], "email");
    }
}
