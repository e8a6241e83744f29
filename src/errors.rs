//! Error types for the gateway.
//!
//! Three layers: `RepositoryError` for the node store, `JenkinsError` for
//! upstream Jenkins calls, and `AppError` as the handler-facing type that
//! knows how to render itself as an HTTP response.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Application-level errors returned from handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Node not found: {0}")]
    NodeNotFound(i64),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Jenkins upstream error: {0}")]
    Jenkins(#[from] JenkinsError),

    #[error("Authentication failed")]
    AuthenticationError,

    #[error("Internal server error")]
    InternalError,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NodeNotFound(_) => HttpResponse::NotFound().json(ErrorBody {
                success: false,
                message: self.to_string(),
                code: "NODE_NOT_FOUND",
            }),
            AppError::ValidationError(_) => HttpResponse::BadRequest().json(ErrorBody {
                success: false,
                message: self.to_string(),
                code: "VALIDATION_ERROR",
            }),
            AppError::AuthenticationError => HttpResponse::Unauthorized().json(ErrorBody {
                success: false,
                message: self.to_string(),
                code: "AUTH_ERROR",
            }),
            AppError::Jenkins(err) => HttpResponse::BadGateway().json(ErrorBody {
                success: false,
                message: err.to_string(),
                code: "JENKINS_ERROR",
            }),
            _ => HttpResponse::InternalServerError().json(ErrorBody {
                success: false,
                message: "Internal server error".to_string(),
                code: "INTERNAL_ERROR",
            }),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    code: &'static str,
}

/// Node-store errors.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Query error: {0}")]
    QueryError(#[from] sqlx::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::InternalError,
            RepositoryError::QueryError(e) => AppError::DatabaseError(e),
        }
    }
}

/// Errors talking to the remote Jenkins server.
#[derive(Error, Debug)]
pub enum JenkinsError {
    #[error("Request to Jenkins failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Jenkins returned status {0}")]
    UpstreamStatus(u16),

    #[error("Failed to decode Jenkins response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Job {0} has no builds")]
    NoBuilds(String),
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for the node store.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Result type alias for Jenkins calls.
pub type JenkinsResult<T> = Result<T, JenkinsError>;
