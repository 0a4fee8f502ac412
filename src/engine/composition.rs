//! Composition classifier: labels a side's picks with its dominant archetype.

use crate::models::DraftPick;

use super::tables::ARCHETYPE_ROSTERS;

/// Minimum number of on-archetype picks before a side earns a "Heavy" label.
const HEAVY_THRESHOLD: usize = 2;

/// Tactical composition patterns, in table declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Dive,
    Poke,
    Engage,
    Disengage,
    SplitPush,
    Scaling,
    EarlyGame,
}

impl Archetype {
    /// Display name used in labels, e.g. `"Split-Push"`.
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Dive => "Dive",
            Archetype::Poke => "Poke",
            Archetype::Engage => "Engage",
            Archetype::Disengage => "Disengage",
            Archetype::SplitPush => "Split-Push",
            Archetype::Scaling => "Scaling",
            Archetype::EarlyGame => "Early-Game",
        }
    }

    /// Lowercase key used in matchup wording, e.g. `"dive"`.
    pub fn key(&self) -> &'static str {
        match self {
            Archetype::Dive => "dive",
            Archetype::Poke => "poke",
            Archetype::Engage => "engage",
            Archetype::Disengage => "disengage",
            Archetype::SplitPush => "split-push",
            Archetype::Scaling => "scaling",
            Archetype::EarlyGame => "early-game",
        }
    }
}

/// Result of classifying one side's picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `None` means "Balanced"
    pub archetype: Option<Archetype>,
    /// Picks matching the best-scoring archetype (even when below threshold)
    pub count: usize,
}

impl Classification {
    pub fn label(&self) -> String {
        match self.archetype {
            Some(a) => format!("{} Heavy", a.name()),
            None => "Balanced".to_string(),
        }
    }
}

/// Case-insensitive substring match in either direction. Empty names never match.
fn fuzzy_match(hero_name: &str, roster_entry: &str) -> bool {
    let hero = hero_name.trim().to_lowercase();
    if hero.is_empty() {
        return false;
    }
    let entry = roster_entry.to_lowercase();
    hero.contains(&entry) || entry.contains(&hero)
}

/// Count the picks whose names match any hero in `roster`.
fn roster_hits(picks: &[DraftPick], roster: &[&str]) -> usize {
    picks
        .iter()
        .filter(|p| roster.iter().any(|entry| fuzzy_match(&p.hero_name, entry)))
        .count()
}

/// Classify a side's picks. Ties go to the archetype declared first in
/// `ARCHETYPE_ROSTERS`.
pub fn classify(picks: &[DraftPick]) -> Classification {
    let mut best: Option<(Archetype, usize)> = None;
    for roster in ARCHETYPE_ROSTERS.iter() {
        let hits = roster_hits(picks, roster.heroes);
        // Strictly greater: an equal count never displaces an earlier archetype.
        if best.map_or(true, |(_, n)| hits > n) {
            best = Some((roster.archetype, hits));
        }
    }

    let (archetype, count) = best.unwrap_or((Archetype::Dive, 0));
    Classification {
        archetype: (count >= HEAVY_THRESHOLD).then_some(archetype),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picks(names: &[&str]) -> Vec<DraftPick> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| DraftPick {
                hero_id: n.to_lowercase(),
                hero_name: n.to_string(),
                team_id: "blue".into(),
                player_id: None,
                player_name: None,
                role: None,
                order: i as u32 + 1,
            })
            .collect()
    }

    #[test]
    fn full_dive_roster_is_dive_heavy() {
        let c = classify(&picks(&["Camille", "Diana", "Irelia", "Nocturne", "Akali"]));
        assert_eq!(c.archetype, Some(Archetype::Dive));
        assert_eq!(c.count, 5);
        assert_eq!(c.label(), "Dive Heavy");
    }

    #[test]
    fn full_poke_roster_is_poke_heavy() {
        let c = classify(&picks(&["Xerath", "Jayce", "Ziggs", "Varus", "Lux"]));
        assert_eq!(c.label(), "Poke Heavy");
    }

    #[test]
    fn one_match_each_for_two_archetypes_is_balanced() {
        let c = classify(&picks(&["Camille", "Xerath"]));
        assert_eq!(c.archetype, None);
        assert_eq!(c.count, 1);
        assert_eq!(c.label(), "Balanced");
    }

    #[test]
    fn tie_at_threshold_goes_to_first_declared_archetype() {
        // Two dive and two poke picks: Dive is declared before Poke.
        let c = classify(&picks(&["Camille", "Diana", "Xerath", "Ziggs"]));
        assert_eq!(c.label(), "Dive Heavy");

        // Two engage and two scaling picks: Engage is declared first.
        let c = classify(&picks(&["Kassadin", "Jinx", "Leona", "Ornn"]));
        assert_eq!(c.label(), "Engage Heavy");
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let c = classify(&picks(&["jarvan iv", "KHA'ZIX", "Camille "]));
        assert_eq!(c.archetype, Some(Archetype::Dive));
        assert_eq!(c.count, 3);

        // Partial names still match the roster entry they are part of.
        let c = classify(&picks(&["Jarvan", "Lee"]));
        assert_eq!(c.archetype, None);
        assert_eq!(c.count, 1);
    }

    #[test]
    fn empty_and_unknown_picks_are_balanced() {
        assert_eq!(classify(&[]).label(), "Balanced");
        assert_eq!(classify(&picks(&["", "Teemo"])).count, 0);
    }

    #[test]
    fn split_push_label_uses_display_name() {
        let c = classify(&picks(&["Fiora", "Jax", "Tryndamere"]));
        assert_eq!(c.label(), "Split-Push Heavy");
    }
}
