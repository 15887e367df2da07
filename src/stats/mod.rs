// Derived summaries; each one reports `AppError::NoData` on no workouts.

pub mod achievements;
pub mod streak;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::workout::Workout;

pub use achievements::{compute_achievements, Achievements, Badge};
pub use streak::{compute_streak, Streak};

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total_workouts: usize,
    pub total_duration_minutes: i64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DurationPoint {
    pub date: NaiveDate,
    pub duration_minutes: i32,
}

pub fn compute_progress(workouts: &[Workout]) -> Result<Progress, AppError> {
    if workouts.is_empty() {
        return Err(AppError::NoData);
    }
    Ok(Progress {
        total_workouts: workouts.len(),
        total_duration_minutes: workouts.iter().map(|w| i64::from(w.duration_minutes)).sum(),
    })
}

/// One point per workout in date order, ties kept in id order.
pub fn duration_series(workouts: &[Workout]) -> Result<Vec<DurationPoint>, AppError> {
    if workouts.is_empty() {
        return Err(AppError::NoData);
    }
    let mut ordered: Vec<&Workout> = workouts.iter().collect();
    ordered.sort_by_key(|w| (w.date, w.id));
    Ok(ordered
        .into_iter()
        .map(|w| DurationPoint {
            date: w.date,
            duration_minutes: w.duration_minutes,
        })
        .collect())
}

#[cfg(test)]
pub(crate) fn workout(id: i64, date: &str, exercise: &str, duration_minutes: i32) -> Workout {
    Workout {
        id,
        user_id: 1,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        exercise: exercise.to_string(),
        duration_minutes,
    }
}
