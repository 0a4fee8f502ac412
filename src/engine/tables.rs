//! Hand-authored lookup data shared by every evaluation.
//!
//! Nothing here is computed: the rosters, weights, matchup edges and counter
//! picks are fixed configuration. Scoring code only reads them, so they can be
//! tuned and tested without touching the scorers.

use super::composition::Archetype;

// ── Archetype rosters ────────────────────────────────────────────────────────

pub struct ArchetypeRoster {
    pub archetype: Archetype,
    pub heroes: &'static [&'static str],
}

/// Declaration order is the classifier's tie-break order.
pub const ARCHETYPE_ROSTERS: [ArchetypeRoster; 7] = [
    ArchetypeRoster {
        archetype: Archetype::Dive,
        heroes: &[
            "Camille", "Diana", "Irelia", "Jarvan IV", "Nocturne", "Rengar", "Akali", "Kha'Zix",
        ],
    },
    ArchetypeRoster {
        archetype: Archetype::Poke,
        heroes: &[
            "Xerath", "Jayce", "Ziggs", "Varus", "Zoe", "Lux", "Ezreal", "Caitlyn",
        ],
    },
    ArchetypeRoster {
        archetype: Archetype::Engage,
        heroes: &[
            "Malphite", "Leona", "Amumu", "Sejuani", "Ornn", "Rell", "Nautilus", "Rakan",
        ],
    },
    ArchetypeRoster {
        archetype: Archetype::Disengage,
        heroes: &[
            "Janna", "Braum", "Gragas", "Poppy", "Taliyah", "Trundle", "Renata Glasc", "Anivia",
        ],
    },
    ArchetypeRoster {
        archetype: Archetype::SplitPush,
        heroes: &[
            "Fiora", "Jax", "Tryndamere", "Yorick", "Nasus", "Gwen", "Shen", "Sion",
        ],
    },
    ArchetypeRoster {
        archetype: Archetype::Scaling,
        heroes: &[
            "Kassadin", "Kayle", "Vayne", "Azir", "Jinx", "Smolder", "Veigar", "Aphelios",
        ],
    },
    ArchetypeRoster {
        archetype: Archetype::EarlyGame,
        heroes: &[
            "Lee Sin", "Renekton", "Draven", "Lucian", "Pantheon", "Elise", "Xin Zhao", "Olaf",
        ],
    },
];

// ── Factor weights ───────────────────────────────────────────────────────────

/// Game-state variables scored by the factor scorer, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    GoldAdvantage,
    DragonControl,
    TowerControl,
    BaronControl,
    KillAdvantage,
    DraftAdvantage,
    PlayerFatigue,
}

pub struct FactorWeight {
    pub kind: FactorKind,
    pub variable: &'static str,
    /// Reported weight, 0.0–1.0
    pub weight: f64,
}

/// A factor contributes `impact × weight × WEIGHT_SCALE` points. A weight of
/// 0.1 therefore passes the raw impact through unchanged and 0.4 quadruples it.
pub const WEIGHT_SCALE: f64 = 10.0;

/// Indexed by `FactorKind as usize`.
pub const FACTOR_WEIGHTS: [FactorWeight; 7] = [
    FactorWeight {
        kind: FactorKind::GoldAdvantage,
        variable: "Gold Advantage",
        weight: 0.4,
    },
    FactorWeight {
        kind: FactorKind::DragonControl,
        variable: "Dragon Control",
        weight: 0.1,
    },
    FactorWeight {
        kind: FactorKind::TowerControl,
        variable: "Tower Control",
        weight: 0.1,
    },
    FactorWeight {
        kind: FactorKind::BaronControl,
        variable: "Baron Control",
        weight: 0.1,
    },
    FactorWeight {
        kind: FactorKind::KillAdvantage,
        variable: "Kill Advantage",
        weight: 0.4,
    },
    FactorWeight {
        kind: FactorKind::DraftAdvantage,
        variable: "Draft Advantage",
        weight: 0.1,
    },
    FactorWeight {
        kind: FactorKind::PlayerFatigue,
        variable: "Player Fatigue",
        weight: 0.1,
    },
];

pub fn factor_weight(kind: FactorKind) -> &'static FactorWeight {
    &FACTOR_WEIGHTS[kind as usize]
}

// ── Composition matchups ─────────────────────────────────────────────────────

/// `favored` holds a structural edge of `bonus` win-rate points over `against`.
pub struct MatchupEdge {
    pub favored: Archetype,
    pub against: Archetype,
    pub bonus: f64,
    pub note: &'static str,
}

pub const MATCHUP_EDGES: [MatchupEdge; 7] = [
    MatchupEdge {
        favored: Archetype::Dive,
        against: Archetype::Poke,
        bonus: 8.0,
        note: "divers collapse onto poke carriers before the siege starts",
    },
    MatchupEdge {
        favored: Archetype::Engage,
        against: Archetype::Poke,
        bonus: 6.0,
        note: "hard engage forces the fight before poke can whittle anyone down",
    },
    MatchupEdge {
        favored: Archetype::Disengage,
        against: Archetype::Dive,
        bonus: 7.0,
        note: "peel and knock-backs strand divers inside the backline",
    },
    MatchupEdge {
        favored: Archetype::Disengage,
        against: Archetype::Engage,
        bonus: 6.0,
        note: "every engage gets reversed or walked away from",
    },
    MatchupEdge {
        favored: Archetype::Poke,
        against: Archetype::Disengage,
        bonus: 6.0,
        note: "disengage has nothing to answer a long-range siege",
    },
    MatchupEdge {
        favored: Archetype::SplitPush,
        against: Archetype::Engage,
        bonus: 5.0,
        note: "side-lane pressure denies the 5v5 the engage team needs",
    },
    MatchupEdge {
        favored: Archetype::EarlyGame,
        against: Archetype::Scaling,
        bonus: 5.0,
        note: "early tempo can end the game before the carries come online",
    },
];

/// Edge between two archetypes, in either direction.
pub fn matchup_edge(a: Archetype, b: Archetype) -> Option<&'static MatchupEdge> {
    MATCHUP_EDGES
        .iter()
        .find(|e| (e.favored == a && e.against == b) || (e.favored == b && e.against == a))
}

// ── Counter picks ────────────────────────────────────────────────────────────

pub struct CounterPickEntry {
    pub hero: &'static str,
    pub role: &'static str,
    pub win_rate_vs_comp: f64,
    pub counter_score: f64,
    pub reasoning: &'static str,
}

pub struct CounterTable {
    pub against: Archetype,
    pub picks: &'static [CounterPickEntry],
}

pub const COUNTER_TABLES: [CounterTable; 7] = [
    CounterTable {
        against: Archetype::Dive,
        picks: &[
            CounterPickEntry {
                hero: "Janna",
                role: "Support",
                win_rate_vs_comp: 56.0,
                counter_score: 0.92,
                reasoning: "Tornado and shields peel divers off the carry",
            },
            CounterPickEntry {
                hero: "Poppy",
                role: "Top",
                win_rate_vs_comp: 55.0,
                counter_score: 0.88,
                reasoning: "Steadfast Presence grounds dashes and gap closers",
            },
            CounterPickEntry {
                hero: "Gragas",
                role: "Jungle",
                win_rate_vs_comp: 54.0,
                counter_score: 0.81,
                reasoning: "Body Slam and Explosive Cask split divers from their targets",
            },
        ],
    },
    CounterTable {
        against: Archetype::Poke,
        picks: &[
            CounterPickEntry {
                hero: "Malphite",
                role: "Top",
                win_rate_vs_comp: 57.0,
                counter_score: 0.90,
                reasoning: "Unstoppable Force engages through poke before the siege starts",
            },
            CounterPickEntry {
                hero: "Nocturne",
                role: "Jungle",
                win_rate_vs_comp: 55.0,
                counter_score: 0.85,
                reasoning: "Paranoia reaches the backline poke carriers from fog",
            },
            CounterPickEntry {
                hero: "Leona",
                role: "Support",
                win_rate_vs_comp: 54.0,
                counter_score: 0.80,
                reasoning: "Point-blank engage punishes immobile poke mages",
            },
        ],
    },
    CounterTable {
        against: Archetype::Engage,
        picks: &[
            CounterPickEntry {
                hero: "Braum",
                role: "Support",
                win_rate_vs_comp: 56.0,
                counter_score: 0.90,
                reasoning: "Unbreakable soaks the engage wave and Glacial Fissure answers it",
            },
            CounterPickEntry {
                hero: "Xerath",
                role: "Mid",
                win_rate_vs_comp: 54.0,
                counter_score: 0.82,
                reasoning: "Out-ranges the engage and forces them to commit at low health",
            },
            CounterPickEntry {
                hero: "Trundle",
                role: "Jungle",
                win_rate_vs_comp: 53.0,
                counter_score: 0.78,
                reasoning: "Pillar cuts off engage follow-up and Subjugate shreds tanks",
            },
        ],
    },
    CounterTable {
        against: Archetype::Disengage,
        picks: &[
            CounterPickEntry {
                hero: "Ziggs",
                role: "Mid",
                win_rate_vs_comp: 56.0,
                counter_score: 0.88,
                reasoning: "Sieges from a range the disengage team cannot contest",
            },
            CounterPickEntry {
                hero: "Jayce",
                role: "Top",
                win_rate_vs_comp: 55.0,
                counter_score: 0.84,
                reasoning: "Shock Blast poke punishes passive peel setups",
            },
            CounterPickEntry {
                hero: "Caitlyn",
                role: "Bot",
                win_rate_vs_comp: 54.0,
                counter_score: 0.80,
                reasoning: "Long-range lane pressure and traps zone the siege line",
            },
        ],
    },
    CounterTable {
        against: Archetype::SplitPush,
        picks: &[
            CounterPickEntry {
                hero: "Twisted Fate",
                role: "Mid",
                win_rate_vs_comp: 55.0,
                counter_score: 0.86,
                reasoning: "Destiny answers side-lane pressure with global map presence",
            },
            CounterPickEntry {
                hero: "Renekton",
                role: "Top",
                win_rate_vs_comp: 54.0,
                counter_score: 0.80,
                reasoning: "Matches the split-pusher one on one in the early and mid game",
            },
            CounterPickEntry {
                hero: "Camille",
                role: "Top",
                win_rate_vs_comp: 53.0,
                counter_score: 0.77,
                reasoning: "Hookshot and Hextech Ultimatum catch split-pushers alone",
            },
        ],
    },
    CounterTable {
        against: Archetype::Scaling,
        picks: &[
            CounterPickEntry {
                hero: "Draven",
                role: "Bot",
                win_rate_vs_comp: 56.0,
                counter_score: 0.88,
                reasoning: "Snowballs lane before the scaling carries reach their items",
            },
            CounterPickEntry {
                hero: "Lee Sin",
                role: "Jungle",
                win_rate_vs_comp: 55.0,
                counter_score: 0.85,
                reasoning: "Early invades starve the scaling jungle of farm",
            },
            CounterPickEntry {
                hero: "Renekton",
                role: "Top",
                win_rate_vs_comp: 54.0,
                counter_score: 0.80,
                reasoning: "Dominates weak early laners and enables dives",
            },
        ],
    },
    CounterTable {
        against: Archetype::EarlyGame,
        picks: &[
            CounterPickEntry {
                hero: "Janna",
                role: "Support",
                win_rate_vs_comp: 55.0,
                counter_score: 0.86,
                reasoning: "Disengage blunts early all-ins and tower dives",
            },
            CounterPickEntry {
                hero: "Ornn",
                role: "Top",
                win_rate_vs_comp: 54.0,
                counter_score: 0.82,
                reasoning: "Holds lane safely and scales into team-wide item upgrades",
            },
            CounterPickEntry {
                hero: "Azir",
                role: "Mid",
                win_rate_vs_comp: 54.0,
                counter_score: 0.80,
                reasoning: "Safe wave clear stalls the early tempo",
            },
        ],
    },
];

/// Fallbacks when no archetype-specific table applies, in preference order.
pub const GENERIC_COUNTERS: [CounterPickEntry; 2] = [
    CounterPickEntry {
        hero: "Orianna",
        role: "Mid",
        win_rate_vs_comp: 52.0,
        counter_score: 0.50,
        reasoning: "Flexible teamfight control and safe wave clear that fit any composition",
    },
    CounterPickEntry {
        hero: "Ahri",
        role: "Mid",
        win_rate_vs_comp: 51.0,
        counter_score: 0.48,
        reasoning: "Mobile pick threat that slots into any composition",
    },
];

pub fn counter_table(against: Archetype) -> Option<&'static CounterTable> {
    COUNTER_TABLES.iter().find(|t| t.against == against)
}
