//! Recommendation composer: rule-triggered directives in fixed priority order.

use crate::models::{GamePhase, ScenarioInput};

/// At most this many directives are returned.
pub const MAX_RECOMMENDATIONS: usize = 4;

pub const FALLBACK_RECOMMENDATION: &str =
    "Even game state: contest vision around the next objective and play to your composition's strengths";

/// State a recommendation rule can look at.
pub struct RecommendationContext<'a> {
    pub scenario: &'a ScenarioInput,
    /// Final, clamped win probability
    pub probability: f64,
}

pub struct RecommendationRule {
    pub applies: fn(&RecommendationContext) -> bool,
    pub text: &'static str,
}

fn gold_deficit(ctx: &RecommendationContext) -> bool {
    ctx.scenario.gold_advantage < -3000
}

fn gold_lead(ctx: &RecommendationContext) -> bool {
    ctx.scenario.gold_advantage > 3000
}

fn fatigued(ctx: &RecommendationContext) -> bool {
    ctx.scenario.player_fatigue
}

fn unfavoured(ctx: &RecommendationContext) -> bool {
    ctx.probability < 40.0
}

fn favoured(ctx: &RecommendationContext) -> bool {
    ctx.probability > 60.0
}

fn late_game(ctx: &RecommendationContext) -> bool {
    ctx.scenario.game_phase == GamePhase::Late
}

pub const RECOMMENDATION_RULES: [RecommendationRule; 6] = [
    RecommendationRule {
        applies: gold_deficit,
        text: "Over 3k gold behind: play for picks and wave control, avoid even 5v5 teamfights",
    },
    RecommendationRule {
        applies: gold_lead,
        text: "Over 3k gold ahead: group and force objectives before the enemy composition scales",
    },
    RecommendationRule {
        applies: fatigued,
        text: "Fatigue flagged: simplify calls and stick to rehearsed setups",
    },
    RecommendationRule {
        applies: unfavoured,
        text: "Win probability under 40%: invest in defensive vision and avoid coin-flip fights",
    },
    RecommendationRule {
        applies: favoured,
        text: "Win probability over 60%: convert the lead into towers and Baron before it evaporates",
    },
    RecommendationRule {
        applies: late_game,
        text: "Late game: one lost fight can end the match, never face-check without vision",
    },
];

/// Between one and `MAX_RECOMMENDATIONS` directives, highest priority first.
pub fn compose(scenario: &ScenarioInput, probability: f64) -> Vec<String> {
    let ctx = RecommendationContext {
        scenario,
        probability,
    };
    let mut out: Vec<String> = RECOMMENDATION_RULES
        .iter()
        .filter(|r| (r.applies)(&ctx))
        .take(MAX_RECOMMENDATIONS)
        .map(|r| r.text.to_string())
        .collect();
    if out.is_empty() {
        out.push(FALLBACK_RECOMMENDATION.to_string());
    }
    out
}
