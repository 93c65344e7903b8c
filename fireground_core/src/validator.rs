//! Post-build program checks.
//!
//! Findings are advisory; nothing here rejects or changes a program.

use crate::ProgramDay;
use std::collections::HashSet;

/// Flag empty days and exercise names repeated within a day
pub fn validate_program(days: &[ProgramDay]) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, day) in days.iter().enumerate() {
        if day.exercises.is_empty() {
            errors.push(format!("Day {} ({}) has no exercises", i + 1, day.title));
            continue;
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for prescribed in &day.exercises {
            let name = prescribed.exercise.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                errors.push(format!(
                    "Day {} ({}) lists '{}' more than once",
                    i + 1,
                    day.title,
                    name
                ));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::prescribe;
    use crate::test_utils::exercise;
    use crate::GoalType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(title: &str, names: &[&str]) -> ProgramDay {
        ProgramDay {
            title: title.into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            week: 1,
            exercises: names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    prescribe(
                        &exercise(&format!("ex{}", i)).name(name).build(),
                        GoalType::Maintain,
                        1,
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_program_has_no_findings() {
        let days = vec![day("Week 1: Push", &["Push-Up", "Dip"])];
        assert!(validate_program(&days).is_empty());
    }

    #[test]
    fn test_flags_empty_and_duplicate_days() {
        let days = vec![
            day("Week 1: Push", &["Push-Up", "Dip", "Push-Up", "Push-Up"]),
            day("Week 1: Legs", &[]),
        ];

        assert_eq!(
            validate_program(&days),
            vec![
                "Day 1 (Week 1: Push) lists 'Push-Up' more than once".to_string(),
                "Day 2 (Week 1: Legs) has no exercises".to_string(),
            ]
        );
    }
}
