use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::WorkoutStore;
use crate::errors::AppError;
use crate::stats::{compute_achievements, compute_progress, compute_streak, duration_series, Badge};
use crate::utils::jwt::AuthenticatedUser;

#[derive(Serialize)]
struct BadgeView {
    badge: Badge,
    description: String,
}

// GET /v1/stats/streak
pub async fn get_streak(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
) -> Result<HttpResponse, AppError> {
    let workouts = store.list_workouts(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(compute_streak(&workouts)?))
}

// GET /v1/stats/achievements
pub async fn get_achievements(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
) -> Result<HttpResponse, AppError> {
    let workouts = store.list_workouts(auth.user_id).await?;

    // Attach display text to each badge
    let view: BTreeMap<String, Vec<BadgeView>> = compute_achievements(&workouts)?
        .into_iter()
        .map(|(exercise, badges)| {
            let badges: Vec<BadgeView> = badges
                .into_iter()
                .map(|badge| BadgeView {
                    badge,
                    description: badge.describe(&exercise),
                })
                .collect();
            (exercise, badges)
        })
        .collect();

    Ok(HttpResponse::Ok().json(view))
}

// GET /v1/stats/progress
pub async fn get_progress(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
) -> Result<HttpResponse, AppError> {
    let workouts = store.list_workouts(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(compute_progress(&workouts)?))
}

// GET /v1/stats/durations
pub async fn get_durations(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
) -> Result<HttpResponse, AppError> {
    let workouts = store.list_workouts(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(duration_series(&workouts)?))
}
