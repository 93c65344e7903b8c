//! Test utilities shared by the unit tests.
//!
//! Factories for exercises, contexts, goals and small libraries.

use crate::{
    CoreSet, Equipment, Exercise, ExperienceLevel, Goal, GoalType, Goals, Library, Lifecycle,
    Pattern, SkillLevel, UserContext,
};
use chrono::NaiveDate;

/// Builder for a bare exercise: no tags, no equipment, unflagged
pub struct ExerciseBuilder(Exercise);

pub fn exercise(id: &str) -> ExerciseBuilder {
    ExerciseBuilder(Exercise {
        id: id.into(),
        name: id.into(),
        category: String::new(),
        tags: Vec::new(),
        goal_tags: Vec::new(),
        patterns: Vec::new(),
        equipment: Vec::new(),
        level: None,
        core_set: CoreSet::Unflagged,
        status: Lifecycle::Unknown,
        replacements: Vec::new(),
        sets: None,
        reps: None,
    })
}

impl ExerciseBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.0.name = name.into();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.0.category = category.into();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.0.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn goals(mut self, goals: &[Goal]) -> Self {
        self.0.goal_tags = goals.to_vec();
        self
    }

    pub fn patterns(mut self, patterns: &[Pattern]) -> Self {
        self.0.patterns = patterns.to_vec();
        self
    }

    pub fn equipment(mut self, equipment: &[Equipment]) -> Self {
        self.0.equipment = equipment.to_vec();
        self
    }

    pub fn level(mut self, level: SkillLevel) -> Self {
        self.0.level = Some(level);
        self
    }

    pub fn core_set(mut self, flag: Option<bool>) -> Self {
        self.0.core_set = CoreSet::from(flag);
        self
    }

    pub fn status(mut self, status: Lifecycle) -> Self {
        self.0.status = status;
        self
    }

    pub fn replacements(mut self, ids: &[&str]) -> Self {
        self.0.replacements = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn sets_reps(mut self, sets: u32, reps: u32) -> Self {
        self.0.sets = Some(sets);
        self.0.reps = Some(reps);
        self
    }

    pub fn build(self) -> Exercise {
        self.0
    }
}

pub fn context(goal: Goal, level: SkillLevel, equipment: &[&str]) -> UserContext {
    let equipment: Vec<String> = equipment.iter().map(|e| e.to_string()).collect();
    UserContext::new(goal, level, &equipment)
}

/// Validated goals starting 2026-01-05 with bodyweight and dumbbells
pub fn goals(goal_type: GoalType, experience: ExperienceLevel, weeks: u32, days: u32) -> Goals {
    Goals {
        goal_type,
        experience_level: experience,
        duration_weeks: weeks,
        days_per_week: days,
        include_fireground: false,
        equipment: vec!["Bodyweight".into(), "Dumbbells".into()],
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    }
}

/// One exercise per goal, all carrying `tag`
pub fn tagged_library(tag: &str, goals: &[Goal]) -> Library {
    Library::new(
        goals
            .iter()
            .enumerate()
            .map(|(i, goal)| {
                exercise(&format!("{}{}", tag, i))
                    .tags(&[tag])
                    .goals(&[*goal])
                    .build()
            })
            .collect(),
    )
}
