use crate::models::{ConfidenceInterval, GamePhase};

use super::{round1, round2};

const INTERVAL_FLOOR: f64 = 5.0;
const INTERVAL_CEILING: f64 = 95.0;

/// Half-width of the interval: the band tightens as the game state settles.
pub fn half_width(phase: GamePhase) -> f64 {
    match phase {
        GamePhase::Early => 15.0,
        GamePhase::Mid => 10.0,
        GamePhase::Late => 7.0,
    }
}

/// Interval around an already-rounded probability.
pub fn interval(probability: f64, phase: GamePhase) -> ConfidenceInterval {
    let width = half_width(phase);
    ConfidenceInterval {
        low: round1((probability - width).max(INTERVAL_FLOOR)),
        high: round1((probability + width).min(INTERVAL_CEILING)),
    }
}

/// Draft confidence (0.2–0.9) from how much of the pick/ban phase is known.
pub fn draft_confidence(picks: usize, bans: usize) -> f64 {
    let pick_share = picks.min(10) as f64 / 10.0;
    let ban_share = bans.min(10) as f64 / 10.0;
    round2(0.2 + 0.6 * pick_share + 0.1 * ban_share)
}
