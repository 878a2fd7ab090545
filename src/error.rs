//! Error type shared by every handler.
//!
//! Each variant maps to one HTTP status; the body is always `{"error": message}`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Username or email already taken.
    #[error("{0}")]
    Conflict(String),

    /// Wrong email/password pair, or wrong current password.
    #[error("{0}")]
    InvalidCredentials(String),

    /// No bearer token on a protected route.
    #[error("Access denied")]
    MissingToken,

    /// Bad signature, wrong issuer/audience, or expired.
    #[error("Invalid token")]
    InvalidToken,

    #[error("{0}")]
    NotFound(String),

    /// Upstream API key not configured.
    #[error("{0}")]
    Config(String),

    /// Third-party recipe API failed.
    #[error("{0}")]
    Upstream(String),

    /// Unexpected database or runtime failure. Cause is logged, never returned.
    #[error("{0}")]
    Server(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::InvalidCredentials(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Upstream(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Logs `source` and returns a `Server` error carrying only `message`.
    pub fn server(message: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
        move |source| {
            tracing::error!(error = %source, "{}", message);
            AppError::Server(message.into())
        }
    }

    /// Same as [`AppError::server`] for upstream failures.
    pub fn upstream(message: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
        move |source| {
            tracing::error!(error = %source, "{}", message);
            AppError::Upstream(message.into())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidCredentials("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Config("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Upstream("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn query_rejection_becomes_json_validation_error() {
        let uri: axum::http::Uri = "/recipes/search?ingredients=a&ingredients=b".parse().unwrap();
        #[derive(Debug, serde::Deserialize)]
        struct Params {
            #[allow(dead_code)]
            ingredients: Option<String>,
        }
        let rejection = axum::extract::Query::<Params>::try_from_uri(&uri).unwrap_err();
        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::Validation(_)));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            res.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn server_helper_hides_source() {
        let err = AppError::server("Failed to login")(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Failed to login");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
