use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::workout::Workout;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Badge {
    Beginner,
    Intermediate,
    Pro,
}

impl Badge {
    /// Tiers in the order they are earned.
    pub const ALL: [Badge; 3] = [Badge::Beginner, Badge::Intermediate, Badge::Pro];

    /// Sessions of one exercise needed to earn the badge.
    pub fn threshold(self) -> usize {
        match self {
            Badge::Beginner => 5,
            Badge::Intermediate => 10,
            Badge::Pro => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::Beginner => "Beginner",
            Badge::Intermediate => "Intermediate",
            Badge::Pro => "Pro",
        }
    }

    pub fn describe(self, exercise: &str) -> String {
        format!("Completed {} {} workouts", self.threshold(), exercise)
    }

    /// Every tier unlocked by `count` sessions.
    pub fn earned(count: usize) -> Vec<Badge> {
        Badge::ALL.into_iter().filter(|b| count >= b.threshold()).collect()
    }
}

/// Exercise name to badges earned, keyed in name order.
pub type Achievements = BTreeMap<String, Vec<Badge>>;

/// Counts sessions per exercise (exact, case-sensitive names) and awards the
/// cumulative tiers. Exercises below every threshold are kept with no badges.
pub fn compute_achievements(workouts: &[Workout]) -> Result<Achievements, AppError> {
    if workouts.is_empty() {
        return Err(AppError::NoData);
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for workout in workouts {
        *counts.entry(workout.exercise.as_str()).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(exercise, count)| (exercise.to_string(), Badge::earned(count)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::workout;

    fn repeated(exercise: &str, times: usize) -> Vec<Workout> {
        (0..times)
            .map(|i| workout(i as i64, "2024-01-01", exercise, 20))
            .collect()
    }

    #[test]
    fn five_sessions_earn_beginner() {
        let achievements = compute_achievements(&repeated("Push-up", 5)).unwrap();
        assert_eq!(achievements.len(), 1);
        assert_eq!(achievements["Push-up"], vec![Badge::Beginner]);
    }

    #[test]
    fn twenty_sessions_earn_every_tier() {
        let achievements = compute_achievements(&repeated("Squat", 20)).unwrap();
        assert_eq!(
            achievements["Squat"],
            vec![Badge::Beginner, Badge::Intermediate, Badge::Pro]
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert!(Badge::earned(4).is_empty());
        assert_eq!(Badge::earned(9), vec![Badge::Beginner]);
        assert_eq!(Badge::earned(10), vec![Badge::Beginner, Badge::Intermediate]);
        assert_eq!(Badge::earned(19), vec![Badge::Beginner, Badge::Intermediate]);
    }

    #[test]
    fn low_counts_keep_an_empty_entry() {
        let mut workouts = repeated("Squat", 3);
        workouts.extend(repeated("Run", 10));
        let achievements = compute_achievements(&workouts).unwrap();
        assert_eq!(achievements["Squat"], Vec::<Badge>::new());
        assert_eq!(achievements["Run"], vec![Badge::Beginner, Badge::Intermediate]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut workouts = repeated("squat", 5);
        workouts.extend(repeated("Squat", 4));
        let achievements = compute_achievements(&workouts).unwrap();
        assert_eq!(achievements["squat"], vec![Badge::Beginner]);
        assert!(achievements["Squat"].is_empty());
    }

    #[test]
    fn empty_is_no_data() {
        assert!(matches!(compute_achievements(&[]), Err(AppError::NoData)));
    }

    #[test]
    fn describes_badges() {
        assert_eq!(Badge::Pro.describe("Plank"), "Completed 20 Plank workouts");
        assert_eq!(Badge::Intermediate.label(), "Intermediate");
    }
}
