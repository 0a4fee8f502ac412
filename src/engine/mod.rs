//! Deterministic, rule-based match-outcome prediction.
//!
//! Every entry point is a pure function of its inputs: no I/O, no shared
//! state, identical inputs give identical outputs.

pub mod composition;
pub mod confidence;
pub mod counter_draft;
pub mod draft;
pub mod factors;
pub mod objectives;
pub mod recommendations;
pub mod tables;
pub mod tactics;

pub use draft::evaluate_draft;

use tracing::debug;

use crate::models::{PredictionResult, ScenarioInput, WinProbability};

/// Source tag carried by every scenario prediction.
pub const SCENARIO_SOURCE: &str = "rule-engine";

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Turn a game-state snapshot into a full prediction for the blue side.
pub fn predict_scenario(scenario: &ScenarioInput) -> PredictionResult {
    let score = factors::score_factors(scenario);
    let probability = round1(factors::amplify(score.raw_probability, scenario.game_phase));
    let confidence_interval = confidence::interval(probability, scenario.game_phase);

    debug!(
        "Scenario scored: phase={:?} raw={:.2} final={:.1} objective_rule={}",
        scenario.game_phase,
        score.raw_probability,
        probability,
        objectives::matching_rule(scenario)
    );

    PredictionResult {
        win_probability: WinProbability {
            team_id: "blue".to_string(),
            probability,
            confidence_interval,
            factors: score.reported(),
        },
        teamfight_win_rate: tactics::teamfight_win_rate(scenario),
        split_push_efficiency: tactics::split_push_efficiency(scenario),
        objective_priority: objectives::plan_objective(scenario),
        strategic_recommendations: recommendations::compose(scenario, probability),
        source: SCENARIO_SOURCE.to_string(),
    }
}
