use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub exercise: String,
    pub duration_minutes: i32,
}

/// Fields of a workout that may be edited; `None` leaves the stored value.
#[derive(Debug, Default, Clone)]
pub struct WorkoutChanges {
    pub date: Option<NaiveDate>,
    pub exercise: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Default, Clone)]
pub struct WorkoutFilter {
    pub exercise: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
