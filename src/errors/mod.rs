use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DuplicateEmail,
    InvalidCredentials,
    NotFound(String),
    NoData,
    Unauthorized(String),
    Conflict(String),
    InternalServerError(String),
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "Invalid email or password"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::NoData => write!(f, "No workouts found"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg) => msg.clone(),
            // Details stay in the log.
            AppError::InternalServerError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse { error: self.message() };
        match self {
            AppError::DuplicateEmail | AppError::Conflict(_) => HttpResponse::Conflict().json(body),
            AppError::InvalidCredentials | AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
            AppError::NotFound(_) | AppError::NoData => HttpResponse::NotFound().json(body),
            AppError::InternalServerError(_) => HttpResponse::InternalServerError().json(body),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(body),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("Database error: {}", err);
        AppError::InternalServerError(format!("Database error: {}", err))
    }
}
