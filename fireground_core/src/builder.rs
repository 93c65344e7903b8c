//! Program builder: lays out a multi-week block and fills every day.
//!
//! The builder is deterministic. Given the same goals, library and seed
//! history it always produces the same program.

use crate::history::RecencyHistory;
use crate::library::FIREGROUND_CATEGORY;
use crate::progression::prescribe;
use crate::rules::{self, day_tags, fireground_rule, slot_rule};
use crate::selector::pick_many;
use crate::{
    Exercise, ExperienceLevel, GoalType, Goals, Library, ProgramDay, SlotRule, UserContext,
};

/// Upper bound on exercises in one day
pub const MAX_EXERCISES_PER_DAY: usize = 8;

/// Minimum size for the goal-strict pool to be preferred over the base pool.
///
/// Tunable; nothing in the domain fixes it at 3.
pub const GOAL_STRICT_MIN_POOL: usize = 3;

/// Recency entries consulted while building a program
pub const PROGRAM_RECENT_WINDOW: usize = 12;

/// Frequencies at or below this get a recovery day at the end of each week
pub const RECOVERY_OVERRIDE_MAX_DAYS: u32 = 4;

/// One week's split for a goal type and experience level
pub fn track_template(
    goal_type: GoalType,
    experience: ExperienceLevel,
) -> &'static [&'static str] {
    use rules::*;
    use ExperienceLevel::*;
    use GoalType::*;

    match (goal_type, experience) {
        (BuildMuscle, Beginner) => &[FULL_BODY, PUSH, PULL, LEGS, CORE_MOBILITY],
        (BuildMuscle, Intermediate) => &[PUSH, PULL, LEGS, UPPER, LOWER, CORE_MOBILITY],
        (BuildMuscle, Advanced) => &[PUSH, PULL, LEGS, PUSH_CORE, PULL_CORE, LEGS, MOBILITY],
        (LoseFat, Beginner) => &[FULL_BODY, CONDITIONING, CORE_MOBILITY, FULL_BODY, MOBILITY],
        (LoseFat, Intermediate) => &[
            FULL_BODY,
            CONDITIONING,
            UPPER,
            LOWER,
            CONDITIONING,
            MOBILITY,
        ],
        (LoseFat, Advanced) => &[
            FULL_BODY,
            CONDITIONING,
            PUSH_CORE,
            LEGS,
            PULL_CORE,
            CONDITIONING,
            MOBILITY,
        ],
        (Maintain, Beginner) => &[FULL_BODY, CORE_MOBILITY, MOBILITY],
        (Maintain, Intermediate) => &[FULL_BODY, UPPER, LOWER, CORE_MOBILITY, MOBILITY],
        (Maintain, Advanced) => &[FULL_BODY, PUSH, PULL, LEGS, CONDITIONING, MOBILITY],
    }
}

/// The weekly split after Fireground injection and trimming to frequency
pub fn weekly_split(goals: &Goals) -> Vec<&'static str> {
    let mut split = track_template(goals.goal_type, goals.experience_level).to_vec();

    if goals.include_fireground && !split.contains(&rules::FIREGROUND) {
        let at = split.len().min(1);
        split.insert(at, rules::FIREGROUND);
    }

    split.truncate(goals.days_per_week as usize);
    split
}

/// Title for a 0-based day of the block
///
/// Low-frequency programs always end their week on a recovery day.
pub fn day_title(
    split: &[&'static str],
    day_index: usize,
    days_per_week: u32,
) -> &'static str {
    let days = days_per_week.max(1) as usize;
    let within_week = day_index % days;

    if days_per_week <= RECOVERY_OVERRIDE_MAX_DAYS && within_week == days - 1 {
        return rules::RECOVERY;
    }

    if split.is_empty() {
        return rules::FULL_BODY;
    }
    split[within_week % split.len()]
}

/// Category gate applied to the base and last-resort pools.
///
/// A category containing "only" (e.g. "Dumbbell Only") needs a matching
/// user equipment name; everything else passes regardless of declared
/// equipment.
pub fn equipment_allows(exercise: &Exercise, equipment: &[String]) -> bool {
    let category = exercise.category.to_lowercase();
    if !category.contains("only") {
        return true;
    }

    equipment.iter().any(|name| {
        let name = name.trim().to_lowercase();
        let singular = name.strip_suffix('s').unwrap_or(&name);
        !singular.is_empty() && category.contains(singular)
    })
}

/// "Week {n}: {label}" for a day title
pub fn format_title(week: u32, title: &str, goal_type: GoalType) -> String {
    let label = if title.contains("Mobility") || title.contains("Recovery") {
        rules::RECOVERY.to_string()
    } else if goal_type == GoalType::LoseFat {
        title.to_string()
    } else {
        format!("{} – {}", title, goal_type)
    };

    format!("Week {}: {}", week, label)
}

/// Rule used to fill a regular (non-Fireground) day: biased toward the
/// day's tags, with no pattern constraints and no skill cap.
pub fn day_rule(title: &str) -> SlotRule {
    SlotRule::default().with_include_tags(day_tags(title))
}

/// Catalog rule for a title plus its day tags, capped at the user's level
/// unless the catalog sets a cap.
///
/// Stricter than [`day_rule`]; used when swapping single exercises.
pub fn catalog_rule(title: &str, ctx: &UserContext) -> SlotRule {
    let mut rule = slot_rule(title).with_include_tags(day_tags(title));
    if rule.skill_cap.is_none() {
        rule.skill_cap = Some(ctx.level);
    }
    rule
}

/// Split title and swap rule for a 0-based day of the block
///
/// Recomputed from the goals, so a stored program can be re-scored
/// without keeping the raw titles around.
pub fn rule_for_day(goals: &Goals, day_index: usize) -> (&'static str, SlotRule) {
    let title = day_title(&weekly_split(goals), day_index, goals.days_per_week);
    let rule = if title == rules::FIREGROUND {
        fireground_rule()
    } else {
        catalog_rule(title, &goals.user_context())
    };
    (title, rule)
}

/// Where a day's candidates came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolSource {
    Fireground,
    GoalStrict,
    Base,
    LastResort,
}

/// A candidate pool together with the rule it is scored under
#[derive(Clone, Debug)]
pub struct DayPool<'a> {
    pub source: PoolSource,
    pub exercises: Vec<&'a Exercise>,
    pub rule: SlotRule,
}

/// Candidate pools for a day, in the order they should be tried
pub fn candidate_pools<'a>(
    title: &str,
    library: &'a Library,
    goals: &Goals,
    ctx: &UserContext,
) -> Vec<DayPool<'a>> {
    let tags = day_tags(title);
    let mut pools = Vec::new();

    if title == rules::FIREGROUND {
        let readiness: Vec<_> = library
            .iter()
            .filter(|ex| ex.category == FIREGROUND_CATEGORY)
            .filter(|ex| ex.equipment_satisfied_by(&ctx.equipment))
            .collect();
        if !readiness.is_empty() {
            pools.push(DayPool {
                source: PoolSource::Fireground,
                exercises: readiness,
                rule: fireground_rule(),
            });
        }
    }

    let rule = day_rule(title);

    let base: Vec<_> = library
        .iter()
        .filter(|ex| tags.iter().any(|t| ex.has_tag(t)))
        .filter(|ex| equipment_allows(ex, &goals.equipment))
        .collect();
    let strict: Vec<_> = base
        .iter()
        .copied()
        .filter(|ex| ex.goal_tags.contains(&ctx.goal))
        .collect();

    if strict.len() >= GOAL_STRICT_MIN_POOL {
        pools.push(DayPool {
            source: PoolSource::GoalStrict,
            exercises: strict,
            rule: rule.clone(),
        });
    } else if !base.is_empty() {
        pools.push(DayPool {
            source: PoolSource::Base,
            exercises: base,
            rule: rule.clone(),
        });
    }

    let last_resort: Vec<_> = library
        .iter()
        .filter(|ex| equipment_allows(ex, &goals.equipment))
        .filter(|ex| {
            let name = ex.name.to_lowercase();
            ex.has_tag("full") || tags.iter().any(|t| name.contains(t))
        })
        .collect();
    if !last_resort.is_empty() {
        pools.push(DayPool {
            source: PoolSource::LastResort,
            exercises: last_resort,
            rule,
        });
    }

    pools
}

/// Fill one day: the first pool that yields any pick wins.
fn fill_day<'a>(
    title: &str,
    library: &'a Library,
    goals: &Goals,
    ctx: &UserContext,
    history: &RecencyHistory,
) -> Vec<&'a Exercise> {
    for pool in candidate_pools(title, library, goals, ctx) {
        let count = MAX_EXERCISES_PER_DAY.min(pool.exercises.len());
        let picked = pick_many(
            &pool.exercises,
            ctx,
            &pool.rule,
            count,
            history.as_slice(),
            PROGRAM_RECENT_WINDOW,
        );

        if !picked.is_empty() {
            tracing::debug!(
                "{}: picked {} of {} candidates from {:?} pool",
                title,
                picked.len(),
                pool.exercises.len(),
                pool.source
            );
            return picked;
        }

        tracing::debug!(
            "{}: {:?} pool yielded nothing, falling back",
            title,
            pool.source
        );
    }

    Vec::new()
}

/// Build a program with an empty starting history
///
/// Always returns exactly `duration_weeks × days_per_week` days.
pub fn build_program(goals: &Goals, library: &Library) -> Vec<ProgramDay> {
    build_program_with_history(goals, library, RecencyHistory::new()).0
}

/// Build a program, threading a recency history through the block
///
/// ## Layout
///
/// 1. Look up the weekly split for (goal type, experience level)
/// 2. Insert a Fireground day second in the week if requested
/// 3. Trim the split to the training frequency
/// 4. Cycle through the split, ending low-frequency weeks on recovery
///
/// ## Per day
///
/// - Try the candidate pools in order (Fireground, goal-strict or base,
///   last resort) and pick up to eight distinct exercises
/// - Apply the goal's rep progression for the week
/// - Feed the picks into the history used for the following days
///
/// Returns the program and the updated history.
pub fn build_program_with_history(
    goals: &Goals,
    library: &Library,
    seed: RecencyHistory,
) -> (Vec<ProgramDay>, RecencyHistory) {
    let ctx = goals.user_context();
    let split = weekly_split(goals);
    let mut history = seed;

    tracing::info!(
        "Building {}-week {} program, {} days/week, split {:?}",
        goals.duration_weeks,
        goals.goal_type,
        goals.days_per_week,
        split
    );

    let mut days = Vec::with_capacity(goals.total_days());
    let mut date = goals.start_date;

    for day_index in 0..goals.total_days() {
        let week = (day_index / goals.days_per_week as usize) as u32 + 1;
        let title = day_title(&split, day_index, goals.days_per_week);

        let picked = fill_day(title, library, goals, &ctx, &history);
        if picked.is_empty() {
            tracing::warn!("Week {} day {} ({}) has no exercises", week, day_index + 1, title);
        }

        history.extend(picked.iter().map(|ex| ex.id.clone()));

        days.push(ProgramDay {
            title: format_title(week, title, goals.goal_type),
            date,
            week,
            exercises: picked
                .into_iter()
                .map(|ex| prescribe(ex, goals.goal_type, week))
                .collect(),
        });

        date = date.succ_opt().unwrap_or(date);
    }

    tracing::info!("Built program with {} days", days.len());
    (days, history)
}
