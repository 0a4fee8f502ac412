use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::ApiError;

// ── Draft ────────────────────────────────────────────────────────────────────

/// A single drafted hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPick {
    pub hero_id: String,
    pub hero_name: String,
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Pick sequence index, unique per team within a game
    pub order: u32,
}

/// A single banned hero. Bans and picks draw from disjoint pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBan {
    pub hero_id: String,
    pub hero_name: String,
    pub team_id: String,
    pub order: u32,
}

/// Body of `POST /draft-analysis`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub title_id: u32,
    #[serde(default)]
    pub series_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub opponent_id: Option<String>,
    #[serde(default)]
    pub blue_picks: Vec<DraftPick>,
    #[serde(default)]
    pub red_picks: Vec<DraftPick>,
    #[serde(default)]
    pub blue_bans: Vec<DraftBan>,
    #[serde(default)]
    pub red_bans: Vec<DraftBan>,
}

impl DraftRequest {
    /// Reject drafts that cannot describe a real game: repeated order indices
    /// for one team, or a hero that is both picked and banned.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut pick_orders = HashSet::new();
        for p in self.blue_picks.iter().chain(&self.red_picks) {
            if !pick_orders.insert((p.team_id.as_str(), p.order)) {
                return Err(ApiError::Validation(format!(
                    "duplicate pick order {} for team {}",
                    p.order, p.team_id
                )));
            }
        }

        let mut ban_orders = HashSet::new();
        for b in self.blue_bans.iter().chain(&self.red_bans) {
            if !ban_orders.insert((b.team_id.as_str(), b.order)) {
                return Err(ApiError::Validation(format!(
                    "duplicate ban order {} for team {}",
                    b.order, b.team_id
                )));
            }
        }

        let banned: HashSet<String> = self
            .blue_bans
            .iter()
            .chain(&self.red_bans)
            .map(|b| b.hero_name.to_lowercase())
            .collect();
        if let Some(p) = self
            .blue_picks
            .iter()
            .chain(&self.red_picks)
            .find(|p| banned.contains(&p.hero_name.to_lowercase()))
        {
            return Err(ApiError::Validation(format!(
                "hero {} is both picked and banned",
                p.hero_name
            )));
        }
        Ok(())
    }
}

/// Where the evaluated draft came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftSourceTag {
    #[serde(rename = "grid-central")]
    GridCentral,
    #[serde(rename = "simulation")]
    Simulation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideDraft {
    pub team_id: Option<String>,
    pub picks: Vec<DraftPick>,
    pub bans: Vec<DraftBan>,
    pub recent_priority_picks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftWinProbability {
    pub blue_win_rate: f64,
    pub red_win_rate: f64,
    /// 0.0–1.0, driven by how much of the draft is known
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvantageTeam {
    Blue,
    Red,
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAdvantage {
    pub advantage_team: AdvantageTeam,
    /// Signed win-rate points in blue's favour
    pub delta: f64,
    /// `delta` mapped onto [0, 1] (0.5 = even), ready to feed a scenario request
    pub normalized: f64,
    pub reasoning: String,
}

/// A ranked counter-pick suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterPick {
    pub hero_name: String,
    pub role: String,
    pub win_rate_vs_comp: f64,
    pub counter_score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionAnalysis {
    pub blue_archetype: String,
    pub red_archetype: String,
    pub matchup_notes: Vec<String>,
}

/// Engine output for one draft, before the HTTP envelope is added.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftAssessment {
    pub win_probability: DraftWinProbability,
    pub draft_advantage: DraftAdvantage,
    pub recommended_picks: Vec<CounterPick>,
    pub composition_analysis: CompositionAnalysis,
}

/// Response of `POST /draft-analysis`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEvaluation {
    pub series_id: Option<String>,
    pub title_id: u32,
    pub blue_side: SideDraft,
    pub red_side: SideDraft,
    pub win_probability: DraftWinProbability,
    pub draft_advantage: DraftAdvantage,
    pub recommended_picks: Vec<CounterPick>,
    pub composition_analysis: CompositionAnalysis,
    pub source: DraftSourceTag,
}

// ── Scenario ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GamePhase {
    #[serde(rename = "EARLY")]
    Early,
    #[default]
    #[serde(rename = "MID")]
    Mid,
    #[serde(rename = "LATE")]
    Late,
}

const GAME_PHASES: &[&str] = &["EARLY", "MID", "LATE"];

// Phase names are matched case-insensitively; anything else is rejected.
impl<'de> Deserialize<'de> for GamePhase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_uppercase().as_str() {
            "EARLY" => Ok(GamePhase::Early),
            "MID" => Ok(GamePhase::Mid),
            "LATE" => Ok(GamePhase::Late),
            _ => Err(serde::de::Error::unknown_variant(&raw, GAME_PHASES)),
        }
    }
}

/// Per-side integer tally. Blue is the evaluated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SideCounts {
    pub blue: u32,
    pub red: u32,
}

impl SideCounts {
    /// Blue minus red.
    pub fn diff(&self) -> i64 {
        i64::from(self.blue) - i64::from(self.red)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SideFlags {
    pub blue: bool,
    pub red: bool,
}

/// Fully-resolved game-state snapshot. Constructed once per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    pub game_phase: GamePhase,
    /// Positive favours blue
    pub gold_advantage: i64,
    pub objectives_secured: BTreeSet<String>,
    pub player_fatigue: bool,
    /// 0.0–1.0, 0.5 = even draft
    pub draft_advantage: f64,
    pub tower_count: SideCounts,
    pub dragon_count: SideCounts,
    pub baron_secured: SideFlags,
    pub team_kills: SideCounts,
    pub team_deaths: SideCounts,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        ScenarioInput {
            game_phase: GamePhase::Mid,
            gold_advantage: 0,
            objectives_secured: BTreeSet::new(),
            player_fatigue: false,
            draft_advantage: 0.5,
            tower_count: SideCounts::default(),
            dragon_count: SideCounts::default(),
            baron_secured: SideFlags::default(),
            team_kills: SideCounts::default(),
            team_deaths: SideCounts::default(),
        }
    }
}

/// Body of `POST /scenario-prediction`. Every field may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    #[serde(default)]
    pub game_phase: Option<GamePhase>,
    #[serde(default)]
    pub gold_advantage: Option<i64>,
    #[serde(default)]
    pub objectives_secured: Option<BTreeSet<String>>,
    #[serde(default)]
    pub player_fatigue: Option<bool>,
    #[serde(default)]
    pub draft_advantage: Option<f64>,
    #[serde(default)]
    pub tower_count: Option<SideCounts>,
    #[serde(default)]
    pub dragon_count: Option<SideCounts>,
    #[serde(default)]
    pub baron_secured: Option<SideFlags>,
    #[serde(default)]
    pub team_kills: Option<SideCounts>,
    #[serde(default)]
    pub team_deaths: Option<SideCounts>,
}

impl ScenarioRequest {
    /// Fill defaults for absent fields and range-check the rest.
    pub fn into_input(self) -> Result<ScenarioInput, ApiError> {
        let defaults = ScenarioInput::default();
        let draft_advantage = self.draft_advantage.unwrap_or(defaults.draft_advantage);
        if !(0.0..=1.0).contains(&draft_advantage) {
            return Err(ApiError::Validation(format!(
                "draftAdvantage must be between 0 and 1, got {}",
                draft_advantage
            )));
        }
        Ok(ScenarioInput {
            game_phase: self.game_phase.unwrap_or(defaults.game_phase),
            gold_advantage: self.gold_advantage.unwrap_or(defaults.gold_advantage),
            objectives_secured: self.objectives_secured.unwrap_or_default(),
            player_fatigue: self.player_fatigue.unwrap_or(defaults.player_fatigue),
            draft_advantage,
            tower_count: self.tower_count.unwrap_or_default(),
            dragon_count: self.dragon_count.unwrap_or_default(),
            baron_secured: self.baron_secured.unwrap_or_default(),
            team_kills: self.team_kills.unwrap_or_default(),
            team_deaths: self.team_deaths.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl Direction {
    pub fn of(impact: f64) -> Self {
        if impact > 0.0 {
            Direction::Positive
        } else if impact < 0.0 {
            Direction::Negative
        } else {
            Direction::Neutral
        }
    }
}

/// One scored game-state variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub variable: String,
    pub weight: f64,
    pub impact: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinProbability {
    pub team_id: String,
    /// 15.0–85.0, one decimal
    pub probability: f64,
    pub confidence_interval: ConfidenceInterval,
    pub factors: Vec<Factor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamfightConditions {
    pub gold_diff: i64,
    pub item_advantage: bool,
    pub positioning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamfightWinRate {
    pub probability: f64,
    pub rating: Rating,
    pub conditions: TeamfightConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitPushEfficiency {
    pub rating: Rating,
    pub probability: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectivePriority {
    pub next_objective: String,
    pub timing: String,
    pub win_rate_if_secured: f64,
    pub risk_level: RiskLevel,
}

/// Response of `POST /scenario-prediction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub win_probability: WinProbability,
    pub teamfight_win_rate: TeamfightWinRate,
    pub split_push_efficiency: SplitPushEfficiency,
    pub objective_priority: ObjectivePriority,
    /// 1–4 entries
    pub strategic_recommendations: Vec<String>,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(name: &str, team: &str, order: u32) -> DraftPick {
        DraftPick {
            hero_id: name.to_lowercase(),
            hero_name: name.into(),
            team_id: team.into(),
            player_id: None,
            player_name: None,
            role: None,
            order,
        }
    }

    fn ban(name: &str, team: &str, order: u32) -> DraftBan {
        DraftBan {
            hero_id: name.to_lowercase(),
            hero_name: name.into(),
            team_id: team.into(),
            order,
        }
    }

    fn request() -> DraftRequest {
        DraftRequest {
            title_id: 3,
            series_id: None,
            team_id: None,
            opponent_id: None,
            blue_picks: vec![],
            red_picks: vec![],
            blue_bans: vec![],
            red_bans: vec![],
        }
    }

    #[test]
    fn empty_scenario_request_gets_documented_defaults() {
        let req: ScenarioRequest = serde_json::from_str("{}").unwrap();
        let input = req.into_input().unwrap();
        assert_eq!(input, ScenarioInput::default());
        assert_eq!(input.game_phase, GamePhase::Mid);
        assert_eq!(input.draft_advantage, 0.5);
    }

    #[test]
    fn null_fields_are_defaulted() {
        let req: ScenarioRequest =
            serde_json::from_str(r#"{"gamePhase":null,"goldAdvantage":null,"towerCount":null}"#)
                .unwrap();
        let input = req.into_input().unwrap();
        assert_eq!(input.game_phase, GamePhase::Mid);
        assert_eq!(input.gold_advantage, 0);
        assert_eq!(input.tower_count, SideCounts::default());
    }

    #[test]
    fn partial_side_counts_default_missing_side() {
        let req: ScenarioRequest =
            serde_json::from_str(r#"{"dragonCount":{"blue":2},"gamePhase":"late"}"#).unwrap();
        let input = req.into_input().unwrap();
        assert_eq!(input.dragon_count, SideCounts { blue: 2, red: 0 });
        assert_eq!(input.game_phase, GamePhase::Late);
    }

    #[test]
    fn phase_names_ignore_case() {
        for (raw, phase) in [
            ("lATE", GamePhase::Late),
            ("mID", GamePhase::Mid),
            ("Early", GamePhase::Early),
            ("EARLY", GamePhase::Early),
        ] {
            let body = format!(r#"{{"gamePhase":"{}"}}"#, raw);
            let req: ScenarioRequest = serde_json::from_str(&body).unwrap();
            assert_eq!(req.game_phase, Some(phase), "{}", raw);
        }
        assert!(serde_json::from_str::<ScenarioRequest>(r#"{"gamePhase":"lat"}"#).is_err());
        assert!(serde_json::from_str::<ScenarioRequest>(r#"{"gamePhase":3}"#).is_err());
        assert_eq!(serde_json::to_string(&GamePhase::Late).unwrap(), r#""LATE""#);
    }

    #[test]
    fn wrong_types_fail_to_parse() {
        assert!(serde_json::from_str::<ScenarioRequest>(r#"{"goldAdvantage":"lots"}"#).is_err());
        assert!(serde_json::from_str::<ScenarioRequest>(r#"{"gamePhase":"OVERTIME"}"#).is_err());
        assert!(serde_json::from_str::<ScenarioRequest>(r#"{"towerCount":{"blue":-1}}"#).is_err());
    }

    #[test]
    fn out_of_range_draft_advantage_is_a_validation_error() {
        let req = ScenarioRequest {
            draft_advantage: Some(1.5),
            ..Default::default()
        };
        assert!(matches!(req.into_input(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn draft_request_requires_title_id() {
        let err = serde_json::from_str::<DraftRequest>(r#"{"bluePicks":[]}"#).unwrap_err();
        assert!(err.to_string().contains("titleId"));
    }

    #[test]
    fn duplicate_pick_order_is_rejected() {
        let mut req = request();
        req.blue_picks = vec![pick("Camille", "t1", 1), pick("Diana", "t1", 1)];
        assert!(matches!(req.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn same_order_on_different_teams_is_fine() {
        let mut req = request();
        req.blue_picks = vec![pick("Camille", "t1", 1)];
        req.red_picks = vec![pick("Xerath", "t2", 1)];
        req.blue_bans = vec![ban("Azir", "t1", 1)];
        req.red_bans = vec![ban("Jinx", "t2", 1)];
        assert!(req.validate().is_ok());
    }

    #[test]
    fn picked_and_banned_hero_is_rejected() {
        let mut req = request();
        req.blue_picks = vec![pick("Camille", "t1", 1)];
        req.red_bans = vec![ban("camille", "t2", 1)];
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Camille"));
    }

    #[test]
    fn direction_follows_sign() {
        assert_eq!(Direction::of(2.5), Direction::Positive);
        assert_eq!(Direction::of(-0.1), Direction::Negative);
        assert_eq!(Direction::of(0.0), Direction::Neutral);
    }

    #[test]
    fn source_tags_serialize_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&DraftSourceTag::GridCentral).unwrap(),
            r#""grid-central""#
        );
        assert_eq!(
            serde_json::to_string(&DraftSourceTag::Simulation).unwrap(),
            r#""simulation""#
        );
    }
}
