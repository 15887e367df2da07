use actix_web::rt::task::spawn_blocking;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Hashes `password` with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|_| AppError::InternalServerError("Hashing failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}
