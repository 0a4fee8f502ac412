//! Linear additive factor model and phase amplification.
//!
//! Each game-state variable yields a signed raw impact; its contribution to
//! the running total is `impact × weight × WEIGHT_SCALE`. There are no
//! interaction terms between factors.

use crate::models::{Direction, Factor, GamePhase, ScenarioInput};

use super::tables::{factor_weight, FactorKind, WEIGHT_SCALE};

/// Even-match starting point, in percent.
pub const BASELINE: f64 = 50.0;
/// Hard floor and ceiling for the reported win probability.
pub const PROBABILITY_FLOOR: f64 = 15.0;
pub const PROBABILITY_CEILING: f64 = 85.0;
/// Factors with smaller absolute impact are scored but not reported.
pub const REPORT_THRESHOLD: f64 = 0.5;

const GOLD_POINTS_PER_1000: f64 = 2.5;
const DRAGON_POINTS: f64 = 3.0;
const TOWER_POINTS: f64 = 2.5;
const BARON_GAINED: f64 = 15.0;
const BARON_LOST: f64 = -12.0;
const KILL_POINTS: f64 = 1.5;
const DRAFT_POINTS: f64 = 20.0;
const FATIGUE_PENALTY: f64 = -5.0;

/// A scored factor together with the points it added to the total.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFactor {
    pub factor: Factor,
    pub contribution: f64,
}

/// Output of the factor scorer before phase amplification.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorScore {
    /// Baseline plus every contribution, unclamped
    pub raw_probability: f64,
    pub factors: Vec<ScoredFactor>,
}

impl FactorScore {
    /// Factors worth showing a coach: `|impact| >= REPORT_THRESHOLD`.
    pub fn reported(&self) -> Vec<Factor> {
        self.factors
            .iter()
            .filter(|f| f.factor.impact.abs() >= REPORT_THRESHOLD)
            .map(|f| f.factor.clone())
            .collect()
    }
}

fn scored(kind: FactorKind, impact: f64) -> ScoredFactor {
    let w = factor_weight(kind);
    ScoredFactor {
        factor: Factor {
            variable: w.variable.to_string(),
            weight: w.weight,
            impact,
            direction: Direction::of(impact),
        },
        contribution: impact * w.weight * WEIGHT_SCALE,
    }
}

fn baron_impact(scenario: &ScenarioInput) -> f64 {
    // Blue's own Baron takes precedence if both flags are somehow set.
    if scenario.baron_secured.blue {
        BARON_GAINED
    } else if scenario.baron_secured.red {
        BARON_LOST
    } else {
        0.0
    }
}

/// Score every game-state variable for the blue side.
pub fn score_factors(scenario: &ScenarioInput) -> FactorScore {
    let factors = vec![
        scored(
            FactorKind::GoldAdvantage,
            scenario.gold_advantage as f64 / 1000.0 * GOLD_POINTS_PER_1000,
        ),
        scored(
            FactorKind::DragonControl,
            scenario.dragon_count.diff() as f64 * DRAGON_POINTS,
        ),
        scored(
            FactorKind::TowerControl,
            scenario.tower_count.diff() as f64 * TOWER_POINTS,
        ),
        scored(FactorKind::BaronControl, baron_impact(scenario)),
        scored(
            FactorKind::KillAdvantage,
            scenario.team_kills.diff() as f64 * KILL_POINTS,
        ),
        scored(
            FactorKind::DraftAdvantage,
            (scenario.draft_advantage - 0.5) * DRAFT_POINTS,
        ),
        scored(
            FactorKind::PlayerFatigue,
            if scenario.player_fatigue {
                FATIGUE_PENALTY
            } else {
                0.0
            },
        ),
    ];

    let raw_probability = BASELINE + factors.iter().map(|f| f.contribution).sum::<f64>();
    FactorScore {
        raw_probability,
        factors,
    }
}

/// Early leads are less decisive than late ones.
pub fn phase_multiplier(phase: GamePhase) -> f64 {
    match phase {
        GamePhase::Early => 0.7,
        GamePhase::Mid => 1.0,
        GamePhase::Late => 1.3,
    }
}

/// Rescale the deviation from 50 by phase, then clamp to [15, 85].
pub fn amplify(raw_probability: f64, phase: GamePhase) -> f64 {
    let deviation = raw_probability - BASELINE;
    (BASELINE + deviation * phase_multiplier(phase)).clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
}
