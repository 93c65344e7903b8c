//! Core domain types for the Fireground program builder.
//!
//! This module defines the fundamental types used throughout the system:
//! - Vocabularies (goals, movement patterns, equipment, skill levels)
//! - Exercise library records
//! - Selection context and slot rules
//! - Program output (days and prescribed exercises)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Lowercase a free-form token and drop spaces, hyphens and underscores.
///
/// `"Build Muscle"`, `"build-muscle"` and `"build_muscle"` all normalize to
/// `"buildmuscle"`.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Vocabularies
// ============================================================================

/// Training goal an exercise serves, and the goal a user trains toward
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Strength,
    Hypertrophy,
    Conditioning,
    Balanced,
}

impl Goal {
    pub fn from_token(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "strength" => Some(Self::Strength),
            "hypertrophy" => Some(Self::Hypertrophy),
            "conditioning" => Some(Self::Conditioning),
            "balanced" => Some(Self::Balanced),
            _ => None,
        }
    }
}

/// Movement pattern used for balanced composition
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Squat,
    Hinge,
    PushV,
    PushH,
    PullV,
    PullH,
    Carry,
    Core,
    Mono,
}

impl Pattern {
    pub fn from_token(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "squat" => Some(Self::Squat),
            "hinge" => Some(Self::Hinge),
            "pushv" => Some(Self::PushV),
            "pushh" => Some(Self::PushH),
            "pullv" => Some(Self::PullV),
            "pullh" => Some(Self::PullH),
            "carry" => Some(Self::Carry),
            "core" => Some(Self::Core),
            "mono" => Some(Self::Mono),
            _ => None,
        }
    }
}

/// Equipment token
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Db,
    Kb,
    PullupBar,
    Rings,
    Jumprope,
    Medball,
    Sled,
    Ghd,
    /// No equipment required
    #[serde(rename = "none")]
    Bodyweight,
}

impl Equipment {
    /// Parse a library token or a user-facing equipment name
    pub fn from_token(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "barbell" | "barbells" => Some(Self::Barbell),
            "db" | "dumbbell" | "dumbbells" => Some(Self::Db),
            "kb" | "kettlebell" | "kettlebells" => Some(Self::Kb),
            "pullupbar" | "pullupbars" => Some(Self::PullupBar),
            "rings" | "gymnasticrings" => Some(Self::Rings),
            "jumprope" | "jumpropes" => Some(Self::Jumprope),
            "medball" | "medicineball" | "medicineballs" => Some(Self::Medball),
            "sled" | "sleds" => Some(Self::Sled),
            "ghd" => Some(Self::Ghd),
            "none" | "bodyweight" => Some(Self::Bodyweight),
            _ => None,
        }
    }
}

/// Skill level, ordered beginner < intermediate < advanced
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn from_token(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Library lifecycle of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Unknown,
    Core,
    Extended,
    Deprecated,
}

impl Lifecycle {
    pub fn from_token(raw: &str) -> Self {
        match normalize_token(raw).as_str() {
            "core" => Self::Core,
            "extended" => Self::Extended,
            "deprecated" => Self::Deprecated,
            _ => Self::Unknown,
        }
    }
}

/// Whether an exercise is whitelisted for automatic program generation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoreSet {
    /// The record says nothing either way
    #[default]
    Unflagged,
    Included,
    Excluded,
}

impl From<Option<bool>> for CoreSet {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Included,
            Some(false) => Self::Excluded,
            None => Self::Unflagged,
        }
    }
}

// ============================================================================
// Program Goal Types
// ============================================================================

/// Goal type chosen by the user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GoalType {
    #[serde(rename = "Build Muscle")]
    BuildMuscle,
    #[serde(rename = "Lose Fat")]
    LoseFat,
    #[serde(rename = "Maintain")]
    Maintain,
}

impl GoalType {
    /// The exercise goal this goal type selects for
    pub fn goal(self) -> Goal {
        match self {
            Self::BuildMuscle => Goal::Hypertrophy,
            Self::LoseFat => Goal::Conditioning,
            Self::Maintain => Goal::Balanced,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BuildMuscle => "Build Muscle",
            Self::LoseFat => "Lose Fat",
            Self::Maintain => "Maintain",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "buildmuscle" => Ok(Self::BuildMuscle),
            "losefat" => Ok(Self::LoseFat),
            "maintain" => Ok(Self::Maintain),
            _ => Err(format!("Unknown goal type: {}", s)),
        }
    }
}

/// Self-reported training experience
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn skill_level(self) -> SkillLevel {
        match self {
            Self::Beginner => SkillLevel::Beginner,
            Self::Intermediate => SkillLevel::Intermediate,
            Self::Advanced => SkillLevel::Advanced,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("Unknown experience level: {}", s)),
        }
    }
}

// ============================================================================
// Exercise Library Types
// ============================================================================

/// An exercise from the shared library
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub goal_tags: Vec<Goal>,
    #[serde(default)]
    pub patterns: Vec<Pattern>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub level: Option<SkillLevel>,
    #[serde(default)]
    pub core_set: CoreSet,
    #[serde(default)]
    pub status: Lifecycle,
    #[serde(default)]
    pub replacements: Vec<String>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
}

impl Exercise {
    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn has_pattern(&self, pattern: Pattern) -> bool {
        self.patterns.contains(&pattern)
    }

    /// True when every declared equipment token is available.
    ///
    /// Bodyweight is always available, so an exercise that only needs
    /// `none` is satisfiable with an empty equipment set.
    pub fn equipment_satisfied_by(&self, available: &BTreeSet<Equipment>) -> bool {
        self.equipment
            .iter()
            .all(|e| *e == Equipment::Bodyweight || available.contains(e))
    }
}

// ============================================================================
// Selection Types
// ============================================================================

/// Per-build context the scorer evaluates exercises against
#[derive(Clone, Debug, PartialEq)]
pub struct UserContext {
    pub goal: Goal,
    pub level: SkillLevel,
    pub equipment: BTreeSet<Equipment>,
}

impl UserContext {
    /// Build a context from user-facing equipment names.
    ///
    /// Unrecognized names are ignored here; they still take part in
    /// category gating, which works on the raw strings.
    pub fn new(goal: Goal, level: SkillLevel, equipment: &[String]) -> Self {
        let equipment = equipment
            .iter()
            .filter_map(|name| Equipment::from_token(name))
            .collect();
        Self {
            goal,
            level,
            equipment,
        }
    }
}

/// Declarative filter and bias for one scheduling slot
#[derive(Clone, Debug, PartialEq)]
pub struct SlotRule {
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub include_patterns: Vec<Pattern>,
    pub exclude_patterns: Vec<Pattern>,
    pub prefer_equipment: Vec<Equipment>,
    pub avoid_equipment: Vec<Equipment>,
    pub skill_cap: Option<SkillLevel>,
    pub require_core_set: bool,
}

impl Default for SlotRule {
    fn default() -> Self {
        Self {
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            prefer_equipment: Vec::new(),
            avoid_equipment: Vec::new(),
            skill_cap: None,
            require_core_set: true,
        }
    }
}

impl SlotRule {
    /// Add include tags that are not already present (case-insensitive)
    pub fn with_include_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref();
            if !self.include_tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                self.include_tags.push(tag.to_string());
            }
        }
        self
    }
}

// ============================================================================
// Program Output Types
// ============================================================================

/// An exercise with sets and reps resolved for its week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrescribedExercise {
    pub exercise: Exercise,
    pub sets: u32,
    pub reps: u32,
}

/// One calendar day of a program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgramDay {
    pub title: String,
    pub date: NaiveDate,
    pub week: u32,
    pub exercises: Vec<PrescribedExercise>,
}
