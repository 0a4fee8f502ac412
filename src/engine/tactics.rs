//! Teamfight and split-push estimators.

use crate::models::{
    GamePhase, Rating, ScenarioInput, SplitPushEfficiency, TeamfightConditions, TeamfightWinRate,
};

use super::round1;

/// Gold lead that roughly equals one completed item component.
const ITEM_ADVANTAGE_GOLD: i64 = 1000;

pub fn teamfight_win_rate(scenario: &ScenarioInput) -> TeamfightWinRate {
    let mut p = 50.0;
    p += scenario.gold_advantage as f64 / 1000.0 * 5.0;
    p += scenario.team_kills.diff() as f64 * 2.0;
    p += (scenario.draft_advantage - 0.5) * 30.0;
    if scenario.player_fatigue {
        p -= 8.0;
    }
    let probability = round1(p.clamp(20.0, 80.0));

    let rating = if probability >= 60.0 {
        Rating::High
    } else if probability < 45.0 {
        Rating::Low
    } else {
        Rating::Medium
    };

    let positioning = match rating {
        Rating::High => "Force 5v5s around objectives; front-line can engage first",
        Rating::Medium => "Fight only with vision and numbers; avoid choke points",
        Rating::Low => "Hold wide, clear waves and wait for a pick before grouping",
    };

    TeamfightWinRate {
        probability,
        rating,
        conditions: TeamfightConditions {
            gold_diff: scenario.gold_advantage,
            item_advantage: scenario.gold_advantage > ITEM_ADVANTAGE_GOLD,
            positioning: positioning.to_string(),
        },
    }
}

/// Branches are checked in order; the first one that applies decides.
pub fn split_push_efficiency(scenario: &ScenarioInput) -> SplitPushEfficiency {
    let gold = scenario.gold_advantage;
    let tower_diff = scenario.tower_count.diff();

    let (rating, probability, reasoning) = if gold < -1500 && tower_diff >= 0 {
        (
            Rating::High,
            65.0,
            "Behind in gold but level on towers: side-lane pressure trades well against a stronger 5-man",
        )
    } else if gold > 3000 {
        (
            Rating::Low,
            30.0,
            "Gold lead is large enough to force fights; splitting up wastes the advantage",
        )
    } else if scenario.game_phase == GamePhase::Late {
        let probability = (55.0 + tower_diff as f64 * 5.0).clamp(40.0, 80.0);
        if tower_diff > 0 {
            (
                Rating::High,
                probability,
                "Late game with a tower lead: side waves pull the enemy apart while Baron threat holds them",
            )
        } else {
            (
                Rating::Medium,
                probability,
                "Late game split pressure works only with a teleport or a safe escape route",
            )
        }
    } else {
        (
            Rating::Medium,
            50.0,
            "No structural reason to split: match side waves and group for objectives",
        )
    };

    SplitPushEfficiency {
        rating,
        probability,
        reasoning: reasoning.to_string(),
    }
}
