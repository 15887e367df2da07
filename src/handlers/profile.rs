use actix_web::{web, HttpResponse};

use crate::db::WorkoutStore;
use crate::errors::AppError;
use crate::utils::jwt::AuthenticatedUser;

// GET /v1/user
pub async fn get_profile(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
) -> Result<HttpResponse, AppError> {
    let user = store.find_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
