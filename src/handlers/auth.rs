use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::AppConfig;
use crate::db::WorkoutStore;
use crate::errors::AppError;
use crate::models::user::User;
use crate::utils::jwt::generate_token;
use crate::utils::password::hash_password;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "Username must be between 1 and 80 characters"))]
    username: String,

    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, max = 32, message = "Password must be between 8 and 32 characters"))]
    password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    id: i64,
    username: String,
    email: String,
    token: String,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            token,
        }
    }
}

// POST /v1/register
pub async fn register(
    req: web::Json<RegisterRequest>,
    store: web::Data<WorkoutStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let req = req.into_inner();

    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username cannot be blank".to_string()));
    }

    // Hash password, then insert; the store rejects a taken email
    let password_hash = hash_password(req.password, config.bcrypt_cost).await?;
    let user = store.create_user(&req.username, &req.email, &password_hash).await?;
    let token = generate_token(&user, &config.jwt_secret, config.token_ttl_hours)?;

    Ok(HttpResponse::Created().json(AuthResponse::new(user, token)))
}

// POST /v1/login
pub async fn login(
    req: web::Json<LoginRequest>,
    store: web::Data<WorkoutStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    let user = store.authenticate(&req.email, &req.password).await?;
    let token = generate_token(&user, &config.jwt_secret, config.token_ttl_hours)?;
    log::info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse::new(user, token)))
}
