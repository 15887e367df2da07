use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::db::WorkoutStore;
use crate::errors::AppError;
use crate::models::workout::{Workout, WorkoutChanges, WorkoutFilter};
use crate::utils::jwt::AuthenticatedUser;
use crate::utils::validation::{parse_optional_date, parse_workout_date, validate_payload};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    date: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Exercise must be between 1 and 100 characters"))]
    exercise: Option<String>,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    duration_minutes: Option<i32>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkoutsQuery {
    exercise: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,

    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    offset: Option<i64>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

// POST /v1/workout
pub async fn create_workout(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
    payload: web::Json<WorkoutRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let payload = payload.into_inner();

    // Check required fields
    let date = parse_workout_date(&required(payload.date, "date")?)?;
    let exercise = required(payload.exercise, "exercise")?;
    let duration_minutes = required(payload.duration_minutes, "durationMinutes")?;

    // Insert workout into database
    let workout = store
        .create_workout(auth.user_id, date, &exercise, duration_minutes)
        .await?;
    Ok(HttpResponse::Created().json(workout))
}

// GET /v1/workout
pub async fn get_workouts(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
    query: web::Query<ListWorkoutsQuery>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*query)?;
    let query = query.into_inner();

    let filter = WorkoutFilter {
        exercise: query.exercise,
        date_from: parse_optional_date(query.date_from.as_deref())?,
        date_to: parse_optional_date(query.date_to.as_deref())?,
        limit: query.limit,
        offset: query.offset,
    };

    let workouts = store.search_workouts(auth.user_id, &filter).await?;
    Ok(HttpResponse::Ok().json(workouts))
}

// PATCH /v1/workout/{workoutId}
pub async fn update_workout(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
    workout_id: web::Path<i64>,
    payload: web::Json<WorkoutRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let payload = payload.into_inner();

    let changes = WorkoutChanges {
        date: parse_optional_date(payload.date.as_deref())?,
        exercise: payload.exercise,
        duration_minutes: payload.duration_minutes,
    };

    let workout = store
        .update_workout(auth.user_id, workout_id.into_inner(), changes)
        .await?;
    Ok(HttpResponse::Ok().json(workout))
}

// DELETE /v1/workout/{workoutId}
pub async fn delete_workout(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
    workout_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_workout(auth.user_id, workout_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Workout deleted successfully" })))
}

// GET /v1/workout/export
pub async fn export_workouts(
    auth: AuthenticatedUser,
    store: web::Data<WorkoutStore>,
) -> Result<HttpResponse, AppError> {
    // Fetch workouts from database
    let workouts = store.list_workouts(auth.user_id).await?;
    let body = workouts_to_csv(&workouts)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((header::CONTENT_DISPOSITION, "attachment;filename=workouts.csv"))
        .body(body))
}

fn workouts_to_csv(workouts: &[Workout]) -> Result<Vec<u8>, AppError> {
    let csv_error = |e: csv::Error| AppError::InternalServerError(format!("CSV export failed: {}", e));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Exercise", "Duration"]).map_err(csv_error)?;
    for workout in workouts {
        writer
            .write_record([
                workout.date.format("%Y-%m-%d").to_string(),
                workout.exercise.clone(),
                workout.duration_minutes.to_string(),
            ])
            .map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(format!("CSV export failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let workouts = vec![Workout {
            id: 1,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            exercise: "Row, erg".to_string(),
            duration_minutes: 25,
        }];
        let csv = String::from_utf8(workouts_to_csv(&workouts).unwrap()).unwrap();
        assert_eq!(csv, "Date,Exercise,Duration\n2024-01-02,\"Row, erg\",25\n");
    }

    #[test]
    fn empty_export_is_header_only() {
        let csv = String::from_utf8(workouts_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Date,Exercise,Duration\n");
    }
}
