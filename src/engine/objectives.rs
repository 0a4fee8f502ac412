//! Objective planner: an ordered decision table, first matching rule wins.

use crate::models::{GamePhase, ObjectivePriority, RiskLevel, ScenarioInput};

/// What a rule recommends when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectivePlan {
    pub objective: &'static str,
    pub timing: &'static str,
    pub win_rate_if_secured: f64,
    pub risk: RiskLevel,
}

impl ObjectivePlan {
    fn to_priority(self) -> ObjectivePriority {
        ObjectivePriority {
            next_objective: self.objective.to_string(),
            timing: self.timing.to_string(),
            win_rate_if_secured: self.win_rate_if_secured,
            risk_level: self.risk,
        }
    }
}

pub struct ObjectiveRule {
    pub name: &'static str,
    pub applies: fn(&ScenarioInput) -> bool,
    pub plan: ObjectivePlan,
}

// Herald only while blue still has fewer than two towers.
fn early_herald(s: &ScenarioInput) -> bool {
    s.game_phase == GamePhase::Early && s.tower_count.blue < 2
}

fn own_soul_point(s: &ScenarioInput) -> bool {
    s.dragon_count.blue >= 3
}

fn enemy_soul_point(s: &ScenarioInput) -> bool {
    s.dragon_count.red >= 3
}

fn baron_window(s: &ScenarioInput) -> bool {
    s.gold_advantage > 2000 && s.game_phase != GamePhase::Early
}

pub const OBJECTIVE_RULES: [ObjectiveRule; 4] = [
    ObjectiveRule {
        name: "early-herald",
        applies: early_herald,
        plan: ObjectivePlan {
            objective: "Rift Herald",
            timing: "8–12 minutes",
            win_rate_if_secured: 58.0,
            risk: RiskLevel::Low,
        },
    },
    ObjectiveRule {
        name: "own-soul-point",
        applies: own_soul_point,
        plan: ObjectivePlan {
            objective: "Dragon Soul",
            timing: "contest immediately",
            win_rate_if_secured: 80.0,
            risk: RiskLevel::High,
        },
    },
    ObjectiveRule {
        name: "enemy-soul-point",
        applies: enemy_soul_point,
        plan: ObjectivePlan {
            objective: "Dragon (Deny Soul)",
            timing: "set up vision before the next spawn",
            win_rate_if_secured: 65.0,
            risk: RiskLevel::High,
        },
    },
    ObjectiveRule {
        name: "baron-window",
        applies: baron_window,
        plan: ObjectivePlan {
            objective: "Baron",
            timing: "after the next won fight or enemy jungler sighting",
            win_rate_if_secured: 75.0,
            risk: RiskLevel::Medium,
        },
    },
];

pub const DEFAULT_PLAN: ObjectivePlan = ObjectivePlan {
    objective: "Dragon",
    timing: "when available",
    win_rate_if_secured: 55.0,
    risk: RiskLevel::Medium,
};

/// Name of the rule that fires for `scenario`, or `"default"`.
pub fn matching_rule(scenario: &ScenarioInput) -> &'static str {
    OBJECTIVE_RULES
        .iter()
        .find(|r| (r.applies)(scenario))
        .map_or("default", |r| r.name)
}

pub fn plan_objective(scenario: &ScenarioInput) -> ObjectivePriority {
    OBJECTIVE_RULES
        .iter()
        .find(|r| (r.applies)(scenario))
        .map_or(DEFAULT_PLAN, |r| r.plan)
        .to_priority()
}
