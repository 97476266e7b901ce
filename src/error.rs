//! Error types for the playlist synthesis pipeline.
//!
//! Every failure that aborts a synthesis request is a variant here. A track that
//! simply has no catalog match is not an error; see
//! [`Resolution::NoMatch`](crate::pipeline::Resolution::NoMatch).

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The credential refresh against the authorization endpoint failed.
    #[error("authorization failure: {0}")]
    Authorization(String),

    /// The catalog search could not be performed.
    #[error("search failure: {0}")]
    Search(String),

    /// The generative text service answered with text that is not the expected JSON.
    #[error("invalid generation response: {0}")]
    InvalidGenerationResponse(String),

    /// The generative text service could not be reached.
    #[error("generation failure: {0}")]
    Generation(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl Error {
    /// Stable machine-readable code surfaced at the web boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Authorization(_) => "AUTHORIZATION_FAILURE",
            Error::Search(_) => "SEARCH_FAILURE",
            Error::InvalidGenerationResponse(_) => "INVALID_GENERATION_RESPONSE",
            Error::Generation(_) => "GENERATION_FAILURE",
            Error::BadRequest(_) => "BAD_REQUEST",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::Authorization(_)
            | Error::Search(_)
            | Error::InvalidGenerationResponse(_)
            | Error::Generation(_) => StatusCode::BAD_GATEWAY,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Config(_) | Error::Database(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
