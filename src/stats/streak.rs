use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::workout::Workout;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Streak {
    /// Consecutive days ending at the most recent logged day.
    pub current: u32,
    pub max: u32,
}

/// Scans the distinct workout dates in ascending order. A one-day step extends
/// the run, anything longer starts a new run of 1. Several sessions on the same
/// day count once.
pub fn compute_streak(workouts: &[Workout]) -> Result<Streak, AppError> {
    let days: BTreeSet<NaiveDate> = workouts.iter().map(|w| w.date).collect();
    if days.is_empty() {
        return Err(AppError::NoData);
    }

    let mut streak: u32 = 0;
    let mut max_streak: u32 = 0;
    let mut prev: Option<NaiveDate> = None;

    for day in days {
        match prev {
            Some(p) if (day - p).num_days() == 1 => streak += 1,
            _ => streak = 1,
        }
        max_streak = max_streak.max(streak);
        prev = Some(day);
    }

    Ok(Streak {
        current: streak,
        max: max_streak,
    })
}
