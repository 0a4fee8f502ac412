//! Draft evaluation: composition matchup, coherence and counter picks.

use tracing::debug;

use crate::models::{
    AdvantageTeam, CompositionAnalysis, DraftAdvantage, DraftAssessment, DraftBan, DraftPick,
    DraftWinProbability,
};

use super::composition::{classify, Classification};
use super::confidence::draft_confidence;
use super::counter_draft::counter_picks;
use super::factors::{BASELINE, PROBABILITY_CEILING, PROBABILITY_FLOOR};
use super::tables::matchup_edge;
use super::{round1, round2};

/// Win-rate points per extra on-archetype pick relative to the other side.
const COHERENCE_POINTS: f64 = 1.5;
/// Deltas smaller than this call the draft even.
const EVEN_MARGIN: f64 = 3.0;
/// Delta that maps to a normalized draft advantage of 0 or 1.
const NORMALIZATION_SPAN: f64 = 20.0;

struct MatchupRead {
    /// Signed, in blue's favour
    bonus: f64,
    note: Option<String>,
}

fn read_matchup(blue: &Classification, red: &Classification) -> MatchupRead {
    let (Some(b), Some(r)) = (blue.archetype, red.archetype) else {
        return MatchupRead {
            bonus: 0.0,
            note: None,
        };
    };
    let Some(edge) = matchup_edge(b, r) else {
        return MatchupRead {
            bonus: 0.0,
            note: None,
        };
    };

    let (side, label, sign) = if edge.favored == b {
        ("Blue", blue.label(), 1.0)
    } else {
        ("Red", red.label(), -1.0)
    };
    MatchupRead {
        bonus: sign * edge.bonus,
        note: Some(format!(
            "{} {} holds the {}-vs-{} matchup bonus (+{:.0}): {}",
            side,
            label,
            edge.favored.key(),
            edge.against.key(),
            edge.bonus,
            edge.note
        )),
    }
}

fn side_note(side: &str, c: &Classification) -> String {
    format!("{}: {} ({} picks on archetype)", side, c.label(), c.count)
}

/// Score a draft from blue's point of view.
pub fn evaluate_draft(
    blue_picks: &[DraftPick],
    red_picks: &[DraftPick],
    blue_bans: &[DraftBan],
    red_bans: &[DraftBan],
) -> DraftAssessment {
    let blue = classify(blue_picks);
    let red = classify(red_picks);
    let matchup = read_matchup(&blue, &red);

    let coherence = COHERENCE_POINTS * (blue.count as f64 - red.count as f64);
    let delta = round1(matchup.bonus + coherence);

    let advantage_team = if delta >= EVEN_MARGIN {
        AdvantageTeam::Blue
    } else if delta <= -EVEN_MARGIN {
        AdvantageTeam::Red
    } else {
        AdvantageTeam::Even
    };

    let reasoning = match (&matchup.note, advantage_team) {
        (Some(note), _) => note.clone(),
        (None, AdvantageTeam::Even) => {
            "Neither draft holds a structural edge; execution decides the game".to_string()
        }
        (None, team) => {
            let (side, c) = if team == AdvantageTeam::Blue {
                ("Blue", &blue)
            } else {
                ("Red", &red)
            };
            format!(
                "{} drafted the more coherent composition ({}, {} picks on archetype)",
                side,
                c.label(),
                c.count
            )
        }
    };

    let mut matchup_notes = vec![side_note("Blue", &blue), side_note("Red", &red)];
    matchup_notes.extend(matchup.note);

    let blue_win_rate = round1((BASELINE + delta).clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING));
    let red_win_rate = round1(100.0 - blue_win_rate);

    let unavailable: Vec<&str> = blue_picks
        .iter()
        .chain(red_picks)
        .map(|p| p.hero_name.as_str())
        .chain(blue_bans.iter().chain(red_bans).map(|b| b.hero_name.as_str()))
        .collect();
    let recommended_picks = counter_picks(red.archetype, &unavailable);

    debug!(
        "Draft evaluated: blue={} red={} delta={:+.1}",
        blue.label(),
        red.label(),
        delta
    );

    DraftAssessment {
        win_probability: DraftWinProbability {
            blue_win_rate,
            red_win_rate,
            confidence: draft_confidence(
                blue_picks.len() + red_picks.len(),
                blue_bans.len() + red_bans.len(),
            ),
        },
        draft_advantage: DraftAdvantage {
            advantage_team,
            delta,
            normalized: round2((0.5 + delta / (2.0 * NORMALIZATION_SPAN)).clamp(0.0, 1.0)),
            reasoning,
        },
        recommended_picks,
        composition_analysis: CompositionAnalysis {
            blue_archetype: blue.label(),
            red_archetype: red.label(),
            matchup_notes,
        },
    }
}
