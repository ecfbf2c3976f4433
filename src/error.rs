use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::Serialize;

use thiserror::Error;

pub type RestResult<T> = Result<T, RestError>;

/// Reasons an inbound RSVP payload is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid request format")]
    MalformedPayload,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid format for field: {0}")]
    InvalidFormat(&'static str),
}

#[derive(Debug, Error)]
pub enum RestError {
    #[error(transparent)]
    BadRequest(#[from] ValidationError),

    #[error("Failed to process your RSVP")]
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::BadRequest(e) => tracing::info!("Rejected RSVP: {}", e),
            Self::Internal(e) => tracing::error!("Failed to process RSVP: {:?}", e),
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
