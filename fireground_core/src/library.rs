//! Exercise library: loading, normalization and the built-in default set.
//!
//! Library stores hand us loosely typed records. Conversion into
//! [`Exercise`] is total: ids are derived from names when missing, patterns
//! are inferred from tags and equipment from the category when a record
//! leaves them out, and unknown vocabulary is dropped.

use crate::types::normalize_token;
use crate::{
    CoreSet, Equipment, Error, Exercise, Goal, Lifecycle, Pattern, Result, SkillLevel,
};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Category that marks Fireground readiness drills
pub const FIREGROUND_CATEGORY: &str = "Fireground Readiness";

/// Cached default library - built once and reused across all operations
static DEFAULT_LIBRARY: Lazy<Library> = Lazy::new(build_default_library);

/// Get a reference to the cached default library
pub fn default_library() -> &'static Library {
    &DEFAULT_LIBRARY
}

/// Ordered collection of exercises
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Library {
    pub exercises: Vec<Exercise>,
}

/// A raw record as stored by the library backend
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExerciseRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(alias = "goalTags")]
    pub goal_tags: Vec<String>,
    pub patterns: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
    #[serde(alias = "skill", alias = "skillLevel")]
    pub level: Option<String>,
    #[serde(alias = "coreSet", alias = "isCoreSet")]
    pub core_set: Option<bool>,
    pub status: Option<String>,
    #[serde(alias = "replacementIds")]
    pub replacements: Vec<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
}

/// Library files hold either an id-keyed object or a plain list
#[derive(Deserialize)]
#[serde(untagged)]
enum LibraryFile {
    Keyed(BTreeMap<String, ExerciseRecord>),
    List(Vec<ExerciseRecord>),
}

/// Derive a stable id from an exercise name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-` and strips separators at both ends.
pub fn derive_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if separator && !id.is_empty() {
                id.push('-');
            }
            separator = false;
            id.extend(c.to_lowercase());
        } else {
            separator = true;
        }
    }

    id
}

const TAG_PATTERNS: &[(&str, Pattern)] = &[
    ("squat", Pattern::Squat),
    ("lunge", Pattern::Squat),
    ("hinge", Pattern::Hinge),
    ("deadlift", Pattern::Hinge),
    ("press", Pattern::PushH),
    ("pushup", Pattern::PushH),
    ("chest", Pattern::PushH),
    ("overhead", Pattern::PushV),
    ("shoulders", Pattern::PushV),
    ("row", Pattern::PullH),
    ("pullup", Pattern::PullV),
    ("chinup", Pattern::PullV),
    ("carry", Pattern::Carry),
    ("core", Pattern::Core),
    ("abs", Pattern::Core),
    ("cardio", Pattern::Mono),
    ("run", Pattern::Mono),
    ("jumprope", Pattern::Mono),
];

const CATEGORY_EQUIPMENT: &[(&str, Equipment)] = &[
    ("barbell", Equipment::Barbell),
    ("dumbbell", Equipment::Db),
    ("kettlebell", Equipment::Kb),
    ("pull-up", Equipment::PullupBar),
    ("pullup", Equipment::PullupBar),
    ("rings", Equipment::Rings),
    ("jump rope", Equipment::Jumprope),
    ("medicine ball", Equipment::Medball),
    ("med ball", Equipment::Medball),
    ("sled", Equipment::Sled),
    ("ghd", Equipment::Ghd),
    ("bodyweight", Equipment::Bodyweight),
];

/// Movement patterns implied by free-form tags
pub fn infer_patterns(tags: &[String]) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for tag in tags {
        let tag = normalize_token(tag);
        for (key, pattern) in TAG_PATTERNS {
            if tag == *key && !patterns.contains(pattern) {
                patterns.push(*pattern);
            }
        }
    }
    patterns
}

/// Equipment implied by a category string
pub fn infer_equipment(category: &str) -> Vec<Equipment> {
    let category = category.to_lowercase();
    let mut equipment = Vec::new();
    for (key, token) in CATEGORY_EQUIPMENT {
        if category.contains(key) && !equipment.contains(token) {
            equipment.push(*token);
        }
    }
    equipment
}

fn parse_tokens<T>(raw: &[String], what: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T>
where
    T: PartialEq,
{
    let mut parsed = Vec::new();
    for token in raw {
        match parse(token) {
            Some(value) if !parsed.contains(&value) => parsed.push(value),
            Some(_) => {}
            None => tracing::debug!("Ignoring unknown {} token '{}'", what, token),
        }
    }
    parsed
}

impl ExerciseRecord {
    /// Normalize into an [`Exercise`].
    ///
    /// `key` is the record's key in an id-keyed library and only serves as
    /// a display name of last resort. Returns `None` when the record has
    /// neither an id nor a name.
    pub fn into_exercise(self, key: Option<&str>) -> Option<Exercise> {
        let id = match (&self.id, &self.name) {
            (Some(id), _) if !id.trim().is_empty() => id.trim().to_string(),
            (_, Some(name)) => derive_id(name),
            _ => String::new(),
        };
        let name = self
            .name
            .clone()
            .or_else(|| key.map(str::to_string))
            .or_else(|| self.id.clone())
            .unwrap_or_default();

        if id.is_empty() && name.is_empty() {
            tracing::warn!("Skipping library record with neither id nor name");
            return None;
        }

        let category = self.category.unwrap_or_default();
        let patterns = match &self.patterns {
            Some(raw) => parse_tokens(raw, "pattern", Pattern::from_token),
            None => infer_patterns(&self.tags),
        };
        let equipment = match &self.equipment {
            Some(raw) => parse_tokens(raw, "equipment", Equipment::from_token),
            None => infer_equipment(&category),
        };

        Some(Exercise {
            id,
            name,
            category,
            goal_tags: parse_tokens(&self.goal_tags, "goal", Goal::from_token),
            patterns,
            equipment,
            level: self.level.as_deref().and_then(SkillLevel::from_token),
            core_set: CoreSet::from(self.core_set),
            status: self
                .status
                .as_deref()
                .map(Lifecycle::from_token)
                .unwrap_or_default(),
            replacements: self.replacements,
            sets: self.sets,
            reps: self.reps,
            tags: self.tags,
        })
    }
}

impl Library {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Normalize raw records, keeping their order
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, ExerciseRecord)>,
    {
        let exercises = records
            .into_iter()
            .filter_map(|(key, record)| record.into_exercise(key.as_deref()))
            .collect();
        Self { exercises }
    }

    /// Parse a JSON library (id-keyed object or list of records)
    pub fn from_json(json: &str) -> Result<Self> {
        let library = match serde_json::from_str::<LibraryFile>(json)? {
            LibraryFile::Keyed(map) => {
                Self::from_records(map.into_iter().map(|(k, r)| (Some(k), r)))
            }
            LibraryFile::List(list) => Self::from_records(list.into_iter().map(|r| (None, r))),
        };
        Ok(library)
    }

    /// Load a JSON library from disk
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let library = Self::from_json(&contents)?;
        if library.is_empty() {
            return Err(Error::Library(format!(
                "No usable exercises in {:?}",
                path
            )));
        }
        tracing::info!("Loaded {} exercises from {:?}", library.len(), path);
        Ok(library)
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Validate the library for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for ex in &self.exercises {
            if ex.id.is_empty() {
                errors.push(format!("Exercise '{}' has empty ID", ex.name));
            }
            if ex.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", ex.id));
            }
            if !seen.insert(ex.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", ex.id));
            }
        }

        for ex in &self.exercises {
            for replacement in &ex.replacements {
                if self.get(replacement).is_none() {
                    errors.push(format!(
                        "Exercise '{}' lists non-existent replacement '{}'",
                        ex.id, replacement
                    ));
                }
            }
        }

        errors
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Exercise;
    type IntoIter = std::slice::Iter<'a, Exercise>;

    fn into_iter(self) -> Self::IntoIter {
        self.exercises.iter()
    }
}

// ============================================================================
// Default Library
// ============================================================================

fn entry(
    name: &str,
    category: &str,
    tags: &[&str],
    goals: &[Goal],
    patterns: &[Pattern],
    equipment: &[Equipment],
    level: SkillLevel,
) -> Exercise {
    Exercise {
        id: derive_id(name),
        name: name.into(),
        category: category.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        goal_tags: goals.to_vec(),
        patterns: patterns.to_vec(),
        equipment: equipment.to_vec(),
        level: Some(level),
        core_set: CoreSet::Included,
        status: Lifecycle::Core,
        replacements: Vec::new(),
        sets: None,
        reps: None,
    }
}

/// Fireground drills are extended-library entries without a core-set flag
fn readiness(
    name: &str,
    tags: &[&str],
    goals: &[Goal],
    patterns: &[Pattern],
    equipment: &[Equipment],
    level: SkillLevel,
) -> Exercise {
    Exercise {
        core_set: CoreSet::Unflagged,
        status: Lifecycle::Extended,
        ..entry(name, FIREGROUND_CATEGORY, tags, goals, patterns, equipment, level)
    }
}

fn with_volume(exercise: Exercise, sets: u32, reps: u32) -> Exercise {
    Exercise {
        sets: Some(sets),
        reps: Some(reps),
        ..exercise
    }
}

fn with_replacements(exercise: Exercise, ids: &[&str]) -> Exercise {
    Exercise {
        replacements: ids.iter().map(|id| id.to_string()).collect(),
        ..exercise
    }
}

/// Builds the default library
///
/// **Note**: For production use, prefer `default_library()` which returns a
/// cached reference.
pub fn build_default_library() -> Library {
    use Equipment as E;
    use Goal::*;
    use Pattern as P;
    use SkillLevel::*;

    let exercises = vec![
        // Lower body
        with_volume(
            entry(
                "Barbell Back Squat",
                "Barbell",
                &["legs", "lower", "strength", "full"],
                &[Strength, Hypertrophy],
                &[P::Squat],
                &[E::Barbell],
                Intermediate,
            ),
            5,
            5,
        ),
        with_replacements(
            entry(
                "Goblet Squat",
                "Dumbbell",
                &["legs", "lower", "full"],
                &[Hypertrophy, Balanced],
                &[P::Squat],
                &[E::Db],
                Beginner,
            ),
            &["bodyweight-squat"],
        ),
        entry(
            "Bodyweight Squat",
            "Bodyweight",
            &["legs", "lower", "full", "conditioning"],
            &[Conditioning, Balanced],
            &[P::Squat],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Romanian Deadlift",
            "Barbell",
            &["legs", "lower", "posterior"],
            &[Strength, Hypertrophy],
            &[P::Hinge],
            &[E::Barbell],
            Intermediate,
        ),
        entry(
            "Dumbbell Romanian Deadlift",
            "Dumbbell",
            &["legs", "lower"],
            &[Hypertrophy],
            &[P::Hinge],
            &[E::Db],
            Beginner,
        ),
        entry(
            "Kettlebell Swing",
            "Kettlebell",
            &["conditioning", "full", "lower", "power"],
            &[Conditioning],
            &[P::Hinge],
            &[E::Kb],
            Intermediate,
        ),
        entry(
            "Walking Lunge",
            "Bodyweight",
            &["legs", "lower"],
            &[Hypertrophy, Balanced],
            &[P::Squat],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Bulgarian Split Squat",
            "Dumbbell Only",
            &["legs", "lower"],
            &[Hypertrophy],
            &[P::Squat],
            &[E::Db],
            Intermediate,
        ),
        entry(
            "Glute Bridge",
            "Bodyweight",
            &["legs", "lower", "mobility"],
            &[Balanced],
            &[P::Hinge],
            &[E::Bodyweight],
            Beginner,
        ),
        // Push
        with_replacements(
            entry(
                "Push-Up",
                "Bodyweight",
                &["push", "upper", "full"],
                &[Hypertrophy, Conditioning, Balanced],
                &[P::PushH],
                &[E::Bodyweight],
                Beginner,
            ),
            &["dumbbell-bench-press"],
        ),
        with_volume(
            entry(
                "Barbell Bench Press",
                "Barbell",
                &["push", "upper", "chest", "strength"],
                &[Strength, Hypertrophy],
                &[P::PushH],
                &[E::Barbell],
                Intermediate,
            ),
            4,
            8,
        ),
        entry(
            "Dumbbell Bench Press",
            "Dumbbell",
            &["push", "upper", "chest"],
            &[Hypertrophy],
            &[P::PushH],
            &[E::Db],
            Beginner,
        ),
        entry(
            "Overhead Press",
            "Barbell",
            &["push", "upper", "shoulders", "strength"],
            &[Strength],
            &[P::PushV],
            &[E::Barbell],
            Intermediate,
        ),
        entry(
            "Dumbbell Shoulder Press",
            "Dumbbell",
            &["push", "upper", "shoulders"],
            &[Hypertrophy],
            &[P::PushV],
            &[E::Db],
            Beginner,
        ),
        entry(
            "Pike Push-Up",
            "Bodyweight",
            &["push", "upper"],
            &[Balanced],
            &[P::PushV],
            &[E::Bodyweight],
            Intermediate,
        ),
        entry(
            "Ring Dip",
            "Rings",
            &["push", "upper"],
            &[Strength, Hypertrophy],
            &[P::PushV],
            &[E::Rings],
            Advanced,
        ),
        entry(
            "Dumbbell Thruster",
            "Dumbbell Only",
            &["full", "conditioning", "push"],
            &[Conditioning, Hypertrophy],
            &[P::Squat, P::PushV],
            &[E::Db],
            Intermediate,
        ),
        // Pull
        with_replacements(
            entry(
                "Pull-Up",
                "Pull-up Bar",
                &["pull", "upper", "strength"],
                &[Strength, Hypertrophy],
                &[P::PullV],
                &[E::PullupBar],
                Intermediate,
            ),
            &["inverted-row", "ring-row"],
        ),
        entry(
            "Chin-Up",
            "Pull-up Bar",
            &["pull", "upper"],
            &[Hypertrophy],
            &[P::PullV],
            &[E::PullupBar],
            Intermediate,
        ),
        entry(
            "Inverted Row",
            "Bodyweight",
            &["pull", "upper"],
            &[Balanced, Hypertrophy],
            &[P::PullH],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Dumbbell Row",
            "Dumbbell",
            &["pull", "upper", "back"],
            &[Hypertrophy],
            &[P::PullH],
            &[E::Db],
            Beginner,
        ),
        entry(
            "Barbell Bent-Over Row",
            "Barbell",
            &["pull", "upper", "back", "strength"],
            &[Strength, Hypertrophy],
            &[P::PullH],
            &[E::Barbell],
            Intermediate,
        ),
        entry(
            "Ring Row",
            "Rings",
            &["pull", "upper"],
            &[Balanced],
            &[P::PullH],
            &[E::Rings],
            Beginner,
        ),
        Exercise {
            core_set: CoreSet::Excluded,
            ..entry(
                "Muscle-Up",
                "Rings",
                &["pull", "upper", "power"],
                &[Strength],
                &[P::PullV],
                &[E::Rings],
                Advanced,
            )
        },
        // Core
        entry(
            "Plank",
            "Bodyweight",
            &["core", "full"],
            &[Balanced],
            &[P::Core],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Dead Bug",
            "Bodyweight",
            &["core", "mobility"],
            &[Balanced],
            &[P::Core],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Hanging Knee Raise",
            "Pull-up Bar",
            &["core"],
            &[Hypertrophy],
            &[P::Core],
            &[E::PullupBar],
            Intermediate,
        ),
        entry("GHD Sit-Up", "GHD", &["core"], &[Conditioning], &[P::Core], &[E::Ghd], Advanced),
        entry(
            "Russian Twist",
            "Medicine Ball",
            &["core", "conditioning"],
            &[Conditioning],
            &[P::Core],
            &[E::Medball],
            Beginner,
        ),
        Exercise {
            status: Lifecycle::Deprecated,
            ..entry(
                "Sit-Up",
                "Bodyweight",
                &["core"],
                &[Balanced],
                &[P::Core],
                &[E::Bodyweight],
                Beginner,
            )
        },
        // Mobility and recovery
        entry(
            "World's Greatest Stretch",
            "Mobility",
            &["mobility", "recovery", "full"],
            &[Balanced],
            &[],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Cat-Cow",
            "Mobility",
            &["mobility", "recovery"],
            &[Balanced],
            &[],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Hip 90/90 Switch",
            "Mobility",
            &["mobility", "recovery", "lower"],
            &[Balanced],
            &[],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Thoracic Rotation",
            "Mobility",
            &["mobility", "recovery", "upper"],
            &[Balanced],
            &[],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Couch Stretch",
            "Mobility",
            &["mobility", "recovery", "legs"],
            &[Balanced],
            &[],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Child's Pose Breathing",
            "Recovery",
            &["recovery", "mobility"],
            &[Balanced],
            &[],
            &[E::Bodyweight],
            Beginner,
        ),
        // Conditioning
        entry(
            "Jump Rope",
            "Jump Rope",
            &["conditioning", "full"],
            &[Conditioning],
            &[P::Mono],
            &[E::Jumprope],
            Beginner,
        ),
        entry(
            "Burpee",
            "Bodyweight",
            &["conditioning", "full"],
            &[Conditioning],
            &[P::Squat, P::PushH],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Mountain Climber",
            "Bodyweight",
            &["conditioning", "core"],
            &[Conditioning],
            &[P::Core],
            &[E::Bodyweight],
            Beginner,
        ),
        entry(
            "Sled Push",
            "Sled",
            &["conditioning", "legs", "lower"],
            &[Conditioning, Strength],
            &[P::Mono],
            &[E::Sled],
            Intermediate,
        ),
        entry(
            "Medicine Ball Slam",
            "Medicine Ball",
            &["conditioning", "full", "power"],
            &[Conditioning],
            &[P::Hinge],
            &[E::Medball],
            Beginner,
        ),
        entry(
            "Farmer's Carry",
            "Kettlebell",
            &["full", "conditioning", "carry"],
            &[Strength, Conditioning],
            &[P::Carry],
            &[E::Kb],
            Beginner,
        ),
        // Fireground readiness
        readiness(
            "Hose Drag",
            &["fireground", "conditioning", "full"],
            &[Conditioning],
            &[P::Carry],
            &[E::Bodyweight],
            Beginner,
        ),
        readiness(
            "Stair Climb with Pack",
            &["fireground", "conditioning", "legs"],
            &[Conditioning],
            &[P::Mono],
            &[E::Bodyweight],
            Intermediate,
        ),
        readiness(
            "Dummy Drag",
            &["fireground", "strength", "full"],
            &[Strength],
            &[P::Hinge, P::Carry],
            &[E::Bodyweight],
            Intermediate,
        ),
        readiness(
            "Ladder Raise",
            &["fireground", "strength", "upper"],
            &[Strength],
            &[P::PushV],
            &[E::Bodyweight],
            Intermediate,
        ),
        readiness(
            "Sledgehammer Strikes",
            &["fireground", "conditioning", "core", "power"],
            &[Conditioning],
            &[P::Core],
            &[E::Bodyweight],
            Beginner,
        ),
        readiness(
            "Equipment Carry",
            &["fireground", "carry", "full", "strength"],
            &[Strength, Conditioning],
            &[P::Carry],
            &[E::Kb],
            Beginner,
        ),
    ];

    Library { exercises }
}
