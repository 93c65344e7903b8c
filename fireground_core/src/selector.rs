//! Deterministic exercise selection.
//!
//! Selection is a pure function of its inputs: exercises are ranked by
//! score (highest first) with ties broken by ascending id, rejected
//! exercises are dropped, and the top of the ranking is returned.

use crate::history::recent_window;
use crate::scorer::score;
use crate::{Exercise, SlotRule, UserContext};

/// Recency entries consulted when a caller does not say otherwise
pub const DEFAULT_MAX_RECENT: usize = 10;

/// Options for [`select`]
#[derive(Clone, Copy, Debug)]
pub struct SelectOptions<'a> {
    /// Maximum number of exercises returned
    pub limit: usize,
    /// How many of the most recent history entries are penalized
    pub max_recent: usize,
    /// Recently picked ids, oldest first
    pub history: &'a [String],
}

impl Default for SelectOptions<'_> {
    fn default() -> Self {
        Self {
            limit: 1,
            max_recent: DEFAULT_MAX_RECENT,
            history: &[],
        }
    }
}

/// Rank `pool` for a slot and return at most `options.limit` exercises
pub fn select<'a>(
    pool: &[&'a Exercise],
    ctx: &UserContext,
    rule: &SlotRule,
    options: &SelectOptions<'_>,
) -> Vec<&'a Exercise> {
    let recent = recent_window(options.history, options.max_recent);

    let mut ranked: Vec<(i32, &'a Exercise)> = pool
        .iter()
        .filter_map(|ex| score(ex, ctx, rule, recent).points().map(|p| (p, *ex)))
        .collect();

    ranked.sort_by(|(pa, a), (pb, b)| pb.cmp(pa).then_with(|| a.id.cmp(&b.id)));

    ranked
        .into_iter()
        .take(options.limit)
        .map(|(_, ex)| ex)
        .collect()
}

/// Pick up to `count` distinct exercises for one slot.
///
/// Each round selects a single exercise, appends it to a local copy of
/// `history` and removes it from the local pool. Stops early once a round
/// finds nothing selectable.
pub fn pick_many<'a>(
    pool: &[&'a Exercise],
    ctx: &UserContext,
    rule: &SlotRule,
    count: usize,
    history: &[String],
    max_recent: usize,
) -> Vec<&'a Exercise> {
    let mut remaining: Vec<&'a Exercise> = pool.to_vec();
    let mut local_history: Vec<String> = history.to_vec();
    let mut picked = Vec::with_capacity(count);

    while picked.len() < count {
        let options = SelectOptions {
            limit: 1,
            max_recent,
            history: &local_history,
        };
        let Some(choice) = select(&remaining, ctx, rule, &options).into_iter().next() else {
            tracing::debug!(
                "Pool exhausted after {} of {} picks",
                picked.len(),
                count
            );
            break;
        };

        local_history.push(choice.id.clone());
        remaining.retain(|ex| ex.id != choice.id);
        picked.push(choice);
    }

    picked
}
