//! Weekly rep progression for prescribed exercises.
//!
//! Progression is linear and goal-specific:
//! - Build Muscle: base reps + week number
//! - Lose Fat: base reps + week number, never below 12
//! - Maintain: fixed at 8 reps
//!
//! Sets are taken from the library (default 3) and never progressed.

use crate::{Exercise, GoalType, PrescribedExercise};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const LOSE_FAT_MIN_REPS: u32 = 12;
pub const MAINTAIN_REPS: u32 = 8;

/// Reps for `base` reps in a given 1-based week
pub fn progressed_reps(goal_type: GoalType, base: u32, week: u32) -> u32 {
    match goal_type {
        GoalType::BuildMuscle => base + week,
        GoalType::LoseFat => (base + week).max(LOSE_FAT_MIN_REPS),
        GoalType::Maintain => MAINTAIN_REPS,
    }
}

/// Resolve sets and reps of one exercise for a week
pub fn prescribe(exercise: &Exercise, goal_type: GoalType, week: u32) -> PrescribedExercise {
    let sets = exercise.sets.unwrap_or(DEFAULT_SETS);
    let base = exercise.reps.unwrap_or(DEFAULT_REPS);

    PrescribedExercise {
        exercise: exercise.clone(),
        sets,
        reps: progressed_reps(goal_type, base, week),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::exercise;
    use rstest::rstest;

    #[rstest]
    #[case::build_muscle_week_1(GoalType::BuildMuscle, 10, 1, 11)]
    #[case::build_muscle_week_4(GoalType::BuildMuscle, 10, 4, 14)]
    #[case::lose_fat_floor(GoalType::LoseFat, 8, 1, 12)]
    #[case::lose_fat_above_floor(GoalType::LoseFat, 10, 3, 13)]
    #[case::maintain_week_1(GoalType::Maintain, 10, 1, 8)]
    #[case::maintain_week_12(GoalType::Maintain, 15, 12, 8)]
    fn test_progressed_reps(
        #[case] goal_type: GoalType,
        #[case] base: u32,
        #[case] week: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(progressed_reps(goal_type, base, week), expected);
    }

    #[test]
    fn test_build_muscle_increases_by_one_per_week() {
        for week in 1..8 {
            assert_eq!(
                progressed_reps(GoalType::BuildMuscle, 10, week + 1),
                progressed_reps(GoalType::BuildMuscle, 10, week) + 1
            );
        }
    }

    #[test]
    fn test_prescribe_defaults() {
        let ex = exercise("goblet_squat").build();
        let prescribed = prescribe(&ex, GoalType::BuildMuscle, 2);

        assert_eq!(prescribed.sets, DEFAULT_SETS);
        assert_eq!(prescribed.reps, 12);
    }

    #[test]
    fn test_prescribe_keeps_library_sets() {
        let ex = exercise("deadlift").sets_reps(5, 5).build();
        let prescribed = prescribe(&ex, GoalType::Maintain, 3);

        assert_eq!(prescribed.sets, 5);
        assert_eq!(prescribed.reps, MAINTAIN_REPS);
    }
}
