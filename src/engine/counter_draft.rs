//! Counter-draft generator.

use crate::models::CounterPick;

use super::composition::Archetype;
use super::tables::{counter_table, CounterPickEntry, GENERIC_COUNTERS};

/// Suggestions returned per request.
pub const MAX_COUNTER_PICKS: usize = 3;

fn to_counter_pick(entry: &CounterPickEntry) -> CounterPick {
    CounterPick {
        hero_name: entry.hero.to_string(),
        role: entry.role.to_string(),
        win_rate_vs_comp: entry.win_rate_vs_comp,
        counter_score: entry.counter_score,
        reasoning: entry.reasoning.to_string(),
    }
}

/// Ranked counter picks against `opponent`, skipping heroes in `unavailable`
/// (case-insensitive). Falls back to the first available generic suggestion
/// when the opponent is balanced or every tabled counter is already taken;
/// empty when those are taken too.
pub fn counter_picks(opponent: Option<Archetype>, unavailable: &[&str]) -> Vec<CounterPick> {
    let taken: Vec<String> = unavailable.iter().map(|h| h.trim().to_lowercase()).collect();
    let is_free = |p: &&CounterPickEntry| !taken.contains(&p.hero.to_lowercase());

    let mut picks: Vec<&CounterPickEntry> = opponent
        .and_then(counter_table)
        .map(|t| {
            t.picks
                .iter()
                .filter(is_free)
                .collect()
        })
        .unwrap_or_default();

    // Stable sort keeps table order for equal scores.
    picks.sort_by(|a, b| {
        b.counter_score
            .partial_cmp(&a.counter_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    picks.truncate(MAX_COUNTER_PICKS);

    if picks.is_empty() {
        return GENERIC_COUNTERS
            .iter()
            .find(is_free)
            .map(to_counter_pick)
            .into_iter()
            .collect();
    }
    picks.into_iter().map(to_counter_pick).collect()
}
