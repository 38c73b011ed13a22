use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug)]
pub enum ServiceError {
    InvalidJsonPayload(String),
    InvalidParameter { name: String, found: &'static str },
    InvalidConfig(String),
    MetricsError(String),
}

#[derive(Serialize)]
struct JsonError {
    error: String,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ServiceError::InvalidJsonPayload(msg) => write!(f, "Invalid JSON payload: {}", msg),
            ServiceError::InvalidParameter { name, found } => write!(
                f,
                "Invalid work item parameter '{}': expected string or null, found {}",
                name, found
            ),
            ServiceError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            ServiceError::MetricsError(_) => write!(f, "Failed to encode metrics"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidJsonPayload(_) | ServiceError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::InvalidConfig(_) | ServiceError::MetricsError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let err = JsonError {
            error: self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidJsonPayload(err.to_string())
    }
}
