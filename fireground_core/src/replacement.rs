//! Single-exercise swaps outside the full build loop.

use crate::history::recent_window;
use crate::scorer::score;
use crate::selector::{select, SelectOptions};
use crate::{Exercise, SlotRule, UserContext};

pub const DEFAULT_REPLACEMENT_LIMIT: usize = 6;
pub const DEFAULT_REPLACEMENT_RECENT: usize = 6;

/// Options for [`suggest_replacements`]
#[derive(Clone, Copy, Debug)]
pub struct ReplaceOptions<'a> {
    pub limit: usize,
    pub max_recent: usize,
    pub history: &'a [String],
    /// List the exercise's curated replacements ahead of the ranked picks
    pub curated_first: bool,
}

impl Default for ReplaceOptions<'_> {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REPLACEMENT_LIMIT,
            max_recent: DEFAULT_REPLACEMENT_RECENT,
            history: &[],
            curated_first: false,
        }
    }
}

/// Rule biased toward the exercise being replaced
pub fn replacement_rule(current: &Exercise, base: &SlotRule) -> SlotRule {
    let mut rule = base.clone().with_include_tags(&current.tags);
    if !current.patterns.is_empty() {
        rule.include_patterns = current.patterns.clone();
    }
    rule
}

/// Suggest substitutes for `current`.
///
/// The result is the selector ranking of the pool (minus `current`) under
/// [`replacement_rule`]. With `curated_first`, the exercise's curated
/// replacements that are in the pool and not rejected move to the front in
/// their listed order, and the ranking fills the remaining places.
pub fn suggest_replacements<'a>(
    current: &Exercise,
    pool: &[&'a Exercise],
    ctx: &UserContext,
    base: &SlotRule,
    options: &ReplaceOptions<'_>,
) -> Vec<&'a Exercise> {
    let rule = replacement_rule(current, base);
    let candidates: Vec<&'a Exercise> = pool
        .iter()
        .copied()
        .filter(|ex| ex.id != current.id)
        .collect();

    let ranked = select(
        &candidates,
        ctx,
        &rule,
        &SelectOptions {
            limit: options.limit,
            max_recent: options.max_recent,
            history: options.history,
        },
    );
    if !options.curated_first {
        tracing::debug!("Suggested {} replacements for {}", ranked.len(), current.id);
        return ranked;
    }

    let recent = recent_window(options.history, options.max_recent);
    let mut suggestions: Vec<&'a Exercise> = Vec::new();
    let curated = current
        .replacements
        .iter()
        .filter_map(|id| candidates.iter().copied().find(|ex| ex.id == *id))
        .filter(|ex| !score(ex, ctx, &rule, recent).is_rejected());
    for ex in curated.chain(ranked) {
        if suggestions.len() >= options.limit {
            break;
        }
        if !suggestions.iter().any(|s| s.id == ex.id) {
            suggestions.push(ex);
        }
    }

    tracing::debug!(
        "Suggested {} replacements for {} (curated first)",
        suggestions.len(),
        current.id
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{context, exercise};
    use crate::{Goal, Lifecycle, Pattern, SkillLevel};
    use pretty_assertions::assert_eq;

    fn ids(list: &[&Exercise]) -> Vec<String> {
        list.iter().map(|ex| ex.id.clone()).collect()
    }

    fn suggest<'a>(
        current: &Exercise,
        pool: &[&'a Exercise],
        options: &ReplaceOptions<'_>,
    ) -> Vec<&'a Exercise> {
        let ctx = context(Goal::Balanced, SkillLevel::Beginner, &[]);
        suggest_replacements(current, pool, &ctx, &SlotRule::default(), options)
    }

    #[test]
    fn test_current_exercise_never_suggested() {
        let current = exercise("pushup").tags(&["push"]).build();
        let other = exercise("dip").tags(&["push"]).build();
        let pool = vec![&current, &other];

        let suggestions = suggest(&current, &pool, &ReplaceOptions::default());
        assert_eq!(ids(&suggestions), vec!["dip"]);
    }

    #[test]
    fn test_biased_toward_own_tags_and_patterns() {
        let current = exercise("goblet_squat")
            .tags(&["legs"])
            .patterns(&[Pattern::Squat])
            .build();
        let lunge = exercise("lunge")
            .tags(&["legs"])
            .patterns(&[Pattern::Squat])
            .build();
        let front_squat = exercise("front_squat").patterns(&[Pattern::Squat]).build();
        let curl = exercise("curl").tags(&["legs"]).build();
        let pool = vec![&curl, &front_squat, &lunge];

        let suggestions = suggest(&current, &pool, &ReplaceOptions::default());
        // curl lacks the squat pattern and is rejected outright
        assert_eq!(ids(&suggestions), vec!["lunge", "front_squat"]);
    }

    #[test]
    fn test_default_order_is_selector_ranking() {
        let current = exercise("pullup")
            .tags(&["pull"])
            .replacements(&["zz_band"])
            .build();
        let chin = exercise("chinup").tags(&["pull"]).build();
        let band = exercise("zz_band").build();
        let pool = vec![&band, &chin];
        let ctx = context(Goal::Balanced, SkillLevel::Beginner, &[]);
        let options = ReplaceOptions::default();

        let suggestions =
            suggest_replacements(&current, &pool, &ctx, &SlotRule::default(), &options);
        assert_eq!(ids(&suggestions), vec!["chinup", "zz_band"]);

        let rule = replacement_rule(&current, &SlotRule::default());
        let ranked = select(
            &[&band, &chin],
            &ctx,
            &rule,
            &SelectOptions {
                limit: options.limit,
                max_recent: options.max_recent,
                history: options.history,
            },
        );
        assert_eq!(ids(&suggestions), ids(&ranked));
    }

    #[test]
    fn test_curated_replacements_first_when_requested() {
        let current = exercise("pullup")
            .tags(&["pull"])
            .replacements(&["ring_row", "missing", "old_row"])
            .build();
        let chin = exercise("chinup").tags(&["pull", "upper"]).build();
        let ring = exercise("ring_row").build();
        let old = exercise("old_row").status(Lifecycle::Deprecated).build();
        let pool = vec![&chin, &ring, &old];
        let options = ReplaceOptions {
            curated_first: true,
            ..ReplaceOptions::default()
        };

        let suggestions = suggest(&current, &pool, &options);
        assert_eq!(ids(&suggestions), vec!["ring_row", "chinup"]);

        let default_order = suggest(&current, &pool, &ReplaceOptions::default());
        assert_eq!(ids(&default_order), vec!["chinup", "ring_row"]);
    }

    #[test]
    fn test_curated_first_respects_limit() {
        let current = exercise("pullup")
            .tags(&["pull"])
            .replacements(&["band_row", "ring_row"])
            .build();
        let chin = exercise("chinup").tags(&["pull"]).build();
        let band = exercise("band_row").build();
        let ring = exercise("ring_row").build();
        let pool = vec![&chin, &band, &ring];
        let options = ReplaceOptions {
            limit: 1,
            curated_first: true,
            ..ReplaceOptions::default()
        };

        let suggestions = suggest(&current, &pool, &options);
        assert_eq!(ids(&suggestions), vec!["band_row"]);
    }

    #[test]
    fn test_limit_and_recency() {
        let current = exercise("plank").tags(&["core"]).build();
        let others: Vec<_> = (0..10)
            .map(|i| exercise(&format!("core{}", i)).tags(&["core"]).build())
            .collect();
        let pool: Vec<_> = others.iter().collect();
        let history = vec!["core0".to_string()];
        let options = ReplaceOptions {
            limit: 3,
            history: &history,
            ..ReplaceOptions::default()
        };

        let suggestions = suggest(&current, &pool, &options);
        assert_eq!(ids(&suggestions), vec!["core1", "core2", "core3"]);
    }
}
