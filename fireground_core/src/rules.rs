//! Rule catalog: fixed slot rules and bias tags per day title.
//!
//! Both tables are closed. Unknown titles get the Full Body rule and the
//! `["full"]` tag set.

use crate::{Equipment, Pattern, SkillLevel, SlotRule};

pub const FULL_BODY: &str = "Full Body";
pub const PUSH: &str = "Push";
pub const PULL: &str = "Pull";
pub const LEGS: &str = "Legs";
pub const UPPER: &str = "Upper";
pub const LOWER: &str = "Lower";
pub const PUSH_CORE: &str = "Push + Core";
pub const PULL_CORE: &str = "Pull + Core";
pub const CORE_MOBILITY: &str = "Core + Mobility";
pub const MOBILITY: &str = "Mobility";
pub const RECOVERY: &str = "Mobility & Recovery";
pub const CONDITIONING: &str = "Conditioning";
pub const FIREGROUND: &str = "Fireground";

/// Every title the catalog knows about
pub const KNOWN_TITLES: [&str; 13] = [
    FULL_BODY,
    PUSH,
    PULL,
    LEGS,
    UPPER,
    LOWER,
    PUSH_CORE,
    PULL_CORE,
    CORE_MOBILITY,
    MOBILITY,
    RECOVERY,
    CONDITIONING,
    FIREGROUND,
];

/// Bias tags for a day title
pub fn day_tags(title: &str) -> &'static [&'static str] {
    match title {
        FULL_BODY => &["full"],
        PUSH => &["push", "upper"],
        PULL => &["pull", "upper"],
        LEGS => &["legs", "lower"],
        UPPER => &["upper", "push", "pull"],
        LOWER => &["lower", "legs"],
        PUSH_CORE => &["push", "upper", "core"],
        PULL_CORE => &["pull", "upper", "core"],
        CORE_MOBILITY => &["core", "mobility"],
        MOBILITY => &["mobility"],
        RECOVERY => &["mobility", "recovery"],
        CONDITIONING => &["conditioning", "full"],
        FIREGROUND => &["fireground", "conditioning", "full"],
        _ => &["full"],
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// Slot rule for a day title
pub fn slot_rule(title: &str) -> SlotRule {
    match title {
        PUSH => SlotRule {
            include_tags: tags(&["push", "upper"]),
            include_patterns: vec![Pattern::PushH, Pattern::PushV],
            exclude_patterns: vec![Pattern::PullH, Pattern::PullV],
            ..SlotRule::default()
        },
        PULL => SlotRule {
            include_tags: tags(&["pull", "upper"]),
            include_patterns: vec![Pattern::PullH, Pattern::PullV],
            exclude_patterns: vec![Pattern::PushH, Pattern::PushV],
            prefer_equipment: vec![Equipment::PullupBar, Equipment::Rings],
            ..SlotRule::default()
        },
        LEGS => SlotRule {
            include_tags: tags(&["lower", "legs"]),
            include_patterns: vec![Pattern::Squat, Pattern::Hinge],
            ..SlotRule::default()
        },
        UPPER => SlotRule {
            include_tags: tags(&["upper"]),
            exclude_tags: tags(&["lower"]),
            include_patterns: vec![Pattern::PushH, Pattern::PushV, Pattern::PullH, Pattern::PullV],
            ..SlotRule::default()
        },
        LOWER => SlotRule {
            include_tags: tags(&["lower", "legs"]),
            exclude_tags: tags(&["upper"]),
            include_patterns: vec![Pattern::Squat, Pattern::Hinge],
            ..SlotRule::default()
        },
        PUSH_CORE => SlotRule {
            include_tags: tags(&["push", "core"]),
            include_patterns: vec![Pattern::PushH, Pattern::PushV, Pattern::Core],
            ..SlotRule::default()
        },
        PULL_CORE => SlotRule {
            include_tags: tags(&["pull", "core"]),
            include_patterns: vec![Pattern::PullH, Pattern::PullV, Pattern::Core],
            ..SlotRule::default()
        },
        CORE_MOBILITY => SlotRule {
            include_tags: tags(&["core", "mobility"]),
            exclude_tags: tags(&["conditioning"]),
            skill_cap: Some(SkillLevel::Intermediate),
            ..SlotRule::default()
        },
        MOBILITY | RECOVERY => SlotRule {
            include_tags: tags(&["mobility", "recovery"]),
            exclude_tags: tags(&["conditioning", "power"]),
            avoid_equipment: vec![Equipment::Barbell, Equipment::Sled],
            skill_cap: Some(SkillLevel::Beginner),
            ..SlotRule::default()
        },
        CONDITIONING => SlotRule {
            include_tags: tags(&["conditioning"]),
            prefer_equipment: vec![Equipment::Jumprope, Equipment::Kb, Equipment::Sled],
            ..SlotRule::default()
        },
        FIREGROUND => fireground_rule(),
        _ => SlotRule {
            include_tags: tags(&["full"]),
            ..SlotRule::default()
        },
    }
}

/// Permissive rule for the Fireground readiness pool
pub fn fireground_rule() -> SlotRule {
    SlotRule {
        include_tags: tags(&["full", "conditioning", "strength"]),
        require_core_set: false,
        ..SlotRule::default()
    }
}
