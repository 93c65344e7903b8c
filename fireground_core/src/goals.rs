//! Program goals and their validation.
//!
//! `GoalsRequest` is what a caller collects from the user; the builder
//! only ever sees a validated [`Goals`].

use crate::{Error, ExperienceLevel, GoalType, Result, UserContext};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted training frequencies
pub const DAYS_PER_WEEK: RangeInclusive<u32> = 2..=7;

/// Accepted block lengths
pub const DURATION_WEEKS: RangeInclusive<u32> = 1..=52;

/// Loosely typed goals as collected from a form or config file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalsRequest {
    pub goal_type: Option<String>,
    pub experience_level: Option<String>,
    pub duration_weeks: Option<u32>,
    pub days_per_week: Option<u32>,
    pub include_fireground: bool,
    pub equipment: Vec<String>,
    pub start_date: Option<NaiveDate>,
}

/// Validated inputs for a program build
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub goal_type: GoalType,
    pub experience_level: ExperienceLevel,
    pub duration_weeks: u32,
    pub days_per_week: u32,
    pub include_fireground: bool,
    pub equipment: Vec<String>,
    pub start_date: NaiveDate,
}

impl Goals {
    /// Validate a request, using `today` when it carries no start date
    pub fn from_request(request: GoalsRequest, today: NaiveDate) -> Result<Self> {
        let goal_type = request
            .goal_type
            .as_deref()
            .ok_or_else(|| Error::InvalidGoals("goal type is required".into()))?
            .parse::<GoalType>()
            .map_err(Error::InvalidGoals)?;

        let experience_level = request
            .experience_level
            .as_deref()
            .ok_or_else(|| Error::InvalidGoals("experience level is required".into()))?
            .parse::<ExperienceLevel>()
            .map_err(Error::InvalidGoals)?;

        let days_per_week = request
            .days_per_week
            .ok_or_else(|| Error::InvalidGoals("days per week is required".into()))?;
        if !DAYS_PER_WEEK.contains(&days_per_week) {
            return Err(Error::InvalidGoals(format!(
                "days per week must be between {} and {}, got {}",
                DAYS_PER_WEEK.start(),
                DAYS_PER_WEEK.end(),
                days_per_week
            )));
        }

        let duration_weeks = request
            .duration_weeks
            .ok_or_else(|| Error::InvalidGoals("duration in weeks is required".into()))?;
        if !DURATION_WEEKS.contains(&duration_weeks) {
            return Err(Error::InvalidGoals(format!(
                "duration must be between {} and {} weeks, got {}",
                DURATION_WEEKS.start(),
                DURATION_WEEKS.end(),
                duration_weeks
            )));
        }

        Ok(Self {
            goal_type,
            experience_level,
            duration_weeks,
            days_per_week,
            include_fireground: request.include_fireground,
            equipment: request.equipment,
            start_date: request.start_date.unwrap_or(today),
        })
    }

    /// Selection context derived from these goals
    pub fn user_context(&self) -> UserContext {
        UserContext::new(
            self.goal_type.goal(),
            self.experience_level.skill_level(),
            &self.equipment,
        )
    }

    pub fn total_days(&self) -> usize {
        (self.duration_weeks * self.days_per_week) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Equipment, Goal, SkillLevel};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn request() -> GoalsRequest {
        GoalsRequest {
            goal_type: Some("Build Muscle".into()),
            experience_level: Some("beginner".into()),
            duration_weeks: Some(4),
            days_per_week: Some(5),
            include_fireground: true,
            equipment: vec!["Dumbbells".into(), "Bodyweight".into()],
            start_date: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let goals = Goals::from_request(request(), today()).unwrap();

        assert_eq!(goals.goal_type, GoalType::BuildMuscle);
        assert_eq!(goals.experience_level, ExperienceLevel::Beginner);
        assert_eq!(goals.start_date, today());
        assert_eq!(goals.total_days(), 20);
    }

    #[test]
    fn test_user_context_includes_bodyweight() {
        let ctx = Goals::from_request(request(), today()).unwrap().user_context();

        assert_eq!(ctx.goal, Goal::Hypertrophy);
        assert_eq!(ctx.level, SkillLevel::Beginner);
        assert!(ctx.equipment.contains(&Equipment::Db));
        assert!(ctx.equipment.contains(&Equipment::Bodyweight));
    }

    #[rstest]
    #[case::missing_goal(GoalsRequest { goal_type: None, ..request() })]
    #[case::unknown_goal(GoalsRequest { goal_type: Some("Get Shredded".into()), ..request() })]
    #[case::missing_experience(GoalsRequest { experience_level: None, ..request() })]
    #[case::missing_days(GoalsRequest { days_per_week: None, ..request() })]
    #[case::too_many_days(GoalsRequest { days_per_week: Some(8), ..request() })]
    #[case::too_few_days(GoalsRequest { days_per_week: Some(1), ..request() })]
    #[case::missing_duration(GoalsRequest { duration_weeks: None, ..request() })]
    #[case::zero_weeks(GoalsRequest { duration_weeks: Some(0), ..request() })]
    fn test_invalid_requests_rejected(#[case] request: GoalsRequest) {
        assert!(matches!(
            Goals::from_request(request, today()),
            Err(Error::InvalidGoals(_))
        ));
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "goalType": "Lose Fat",
            "experienceLevel": "Advanced",
            "durationWeeks": 2,
            "daysPerWeek": 3,
            "startDate": "2026-03-02"
        }"#;
        let request: GoalsRequest = serde_json::from_str(json).unwrap();

        let goals = Goals::from_request(request, today()).unwrap();
        assert_eq!(goals.goal_type, GoalType::LoseFat);
        assert!(!goals.include_fireground);
        assert_eq!(goals.start_date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }
}
