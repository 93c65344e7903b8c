//! Exercise scoring against a slot rule.
//!
//! A score is either a hard rejection or an integer number of points.
//! Hard rejections are checked first, in a fixed order; the first that
//! applies is reported.

use crate::{CoreSet, Exercise, Goal, Lifecycle, SlotRule, UserContext};

pub const PATTERN_MATCH_POINTS: i32 = 3;
pub const TAG_MATCH_POINTS: i32 = 2;
pub const EXCLUDED_TAG_PENALTY: i32 = 2;
pub const GOAL_MATCH_POINTS: i32 = 2;
pub const PREFERRED_EQUIPMENT_POINTS: i32 = 1;
pub const AVOIDED_EQUIPMENT_PENALTY: i32 = 1;
pub const OVER_SKILL_CAP_PENALTY: i32 = 3;
pub const RECENT_PENALTY: i32 = 5;

/// Why an exercise can never fill a slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Deprecated,
    NotCoreSet,
    MissingPattern,
    ExcludedPattern,
    EquipmentUnavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Score {
    Rejected(Rejection),
    Points(i32),
}

impl Score {
    /// Points for a finite score, `None` for a rejection
    pub fn points(&self) -> Option<i32> {
        match self {
            Score::Points(p) => Some(*p),
            Score::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Score::Rejected(_))
    }
}

/// Score one exercise for a slot.
///
/// `recent` is the recency window already cut to the length the caller
/// wants consulted; any id in it costs [`RECENT_PENALTY`].
pub fn score(exercise: &Exercise, ctx: &UserContext, rule: &SlotRule, recent: &[String]) -> Score {
    if let Some(rejection) = hard_rejection(exercise, ctx, rule) {
        return Score::Rejected(rejection);
    }

    let mut points = 0;

    let patterns = rule
        .include_patterns
        .iter()
        .filter(|p| exercise.has_pattern(**p))
        .count() as i32;
    points += patterns * PATTERN_MATCH_POINTS;

    let tags = rule
        .include_tags
        .iter()
        .filter(|t| exercise.has_tag(t))
        .count() as i32;
    points += tags * TAG_MATCH_POINTS;

    let excluded = rule
        .exclude_tags
        .iter()
        .filter(|t| exercise.has_tag(t))
        .count() as i32;
    points -= excluded * EXCLUDED_TAG_PENALTY;

    if ctx.goal != Goal::Balanced && exercise.goal_tags.contains(&ctx.goal) {
        points += GOAL_MATCH_POINTS;
    }

    let preferred = rule
        .prefer_equipment
        .iter()
        .filter(|e| exercise.equipment.contains(e))
        .count() as i32;
    points += preferred * PREFERRED_EQUIPMENT_POINTS;

    let avoided = rule
        .avoid_equipment
        .iter()
        .filter(|e| exercise.equipment.contains(e))
        .count() as i32;
    points -= avoided * AVOIDED_EQUIPMENT_PENALTY;

    if let (Some(level), Some(cap)) = (exercise.level, rule.skill_cap) {
        if level > cap {
            points -= OVER_SKILL_CAP_PENALTY;
        }
    }

    if recent.iter().any(|id| *id == exercise.id) {
        points -= RECENT_PENALTY;
    }

    Score::Points(points)
}

fn hard_rejection(exercise: &Exercise, ctx: &UserContext, rule: &SlotRule) -> Option<Rejection> {
    if exercise.status == Lifecycle::Deprecated {
        return Some(Rejection::Deprecated);
    }

    if rule.require_core_set && exercise.core_set == CoreSet::Excluded {
        return Some(Rejection::NotCoreSet);
    }

    if !rule.include_patterns.is_empty()
        && !rule.include_patterns.iter().any(|p| exercise.has_pattern(*p))
    {
        return Some(Rejection::MissingPattern);
    }

    if rule.exclude_patterns.iter().any(|p| exercise.has_pattern(*p)) {
        return Some(Rejection::ExcludedPattern);
    }

    if !exercise.equipment_satisfied_by(&ctx.equipment) {
        return Some(Rejection::EquipmentUnavailable);
    }

    None
}
