use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::engine::{evaluate_draft, predict_scenario};
use crate::error::ApiError;
use crate::grid::{DraftSource, SeriesDraft};
use crate::models::{
    DraftEvaluation, DraftRequest, DraftSourceTag, PredictionResult, ScenarioRequest, SideDraft,
};

#[derive(Clone, Default)]
pub struct AppState {
    /// Match-data source for series lookups. `None` runs simulation-only.
    pub draft_source: Option<Arc<dyn DraftSource>>,
}

/// Build the Axum router for the prediction API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/draft-analysis",
            post(draft_analysis_handler).options(preflight_handler),
        )
        .route(
            "/scenario-prediction",
            post(scenario_prediction_handler).options(preflight_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// OPTIONS without CORS request headers; real preflights are answered by the CORS layer.
async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// POST /scenario-prediction
async fn scenario_prediction_handler(body: Bytes) -> Result<Json<PredictionResult>, ApiError> {
    let request: Option<ScenarioRequest> = serde_json::from_slice(&body)?;
    let scenario = request.unwrap_or_default().into_input()?;
    Ok(Json(predict_scenario(&scenario)))
}

/// POST /draft-analysis
async fn draft_analysis_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DraftEvaluation>, ApiError> {
    let request: DraftRequest = serde_json::from_slice(&body)?;

    let (draft, source) = resolve_draft(&state, &request).await;
    // The request's own arrays only matter when they are the draft evaluated.
    if source == DraftSourceTag::Simulation {
        request.validate()?;
    }

    let blue_team_id = request.team_id.clone().or(draft.blue_team_id);
    let red_team_id = request.opponent_id.clone().or(draft.red_team_id);

    let history_source = state.draft_source.as_ref();
    let (blue_history, red_history) = tokio::join!(
        priority_picks(history_source, blue_team_id.as_deref(), request.title_id),
        priority_picks(history_source, red_team_id.as_deref(), request.title_id),
    );

    let assessment = evaluate_draft(
        &draft.blue_picks,
        &draft.red_picks,
        &draft.blue_bans,
        &draft.red_bans,
    );

    Ok(Json(DraftEvaluation {
        series_id: request.series_id,
        title_id: request.title_id,
        blue_side: SideDraft {
            team_id: blue_team_id,
            picks: draft.blue_picks,
            bans: draft.blue_bans,
            recent_priority_picks: blue_history,
        },
        red_side: SideDraft {
            team_id: red_team_id,
            picks: draft.red_picks,
            bans: draft.red_bans,
            recent_priority_picks: red_history,
        },
        win_probability: assessment.win_probability,
        draft_advantage: assessment.draft_advantage,
        recommended_picks: assessment.recommended_picks,
        composition_analysis: assessment.composition_analysis,
        source,
    }))
}

/// Use the series' recorded draft when it can be fetched, otherwise the
/// picks and bans the caller sent.
async fn resolve_draft(state: &AppState, request: &DraftRequest) -> (SeriesDraft, DraftSourceTag) {
    let simulated = || SeriesDraft {
        blue_team_id: None,
        red_team_id: None,
        blue_picks: request.blue_picks.clone(),
        red_picks: request.red_picks.clone(),
        blue_bans: request.blue_bans.clone(),
        red_bans: request.red_bans.clone(),
    };

    let (Some(series_id), Some(source)) = (request.series_id.as_deref(), &state.draft_source)
    else {
        return (simulated(), DraftSourceTag::Simulation);
    };

    match source.fetch_series_draft(series_id, request.title_id).await {
        Ok(draft) => {
            info!("Series {} draft resolved via {}", series_id, source.name());
            (draft, DraftSourceTag::GridCentral)
        }
        Err(e) => {
            warn!(
                "Series {} lookup via {} failed, using simulation: {}",
                series_id,
                source.name(),
                e
            );
            (simulated(), DraftSourceTag::Simulation)
        }
    }
}

async fn priority_picks(
    source: Option<&Arc<dyn DraftSource>>,
    team_id: Option<&str>,
    title_id: u32,
) -> Vec<String> {
    let (Some(source), Some(team_id)) = (source, team_id) else {
        return Vec::new();
    };
    match source.fetch_priority_picks(team_id, title_id).await {
        Ok(picks) => picks,
        Err(e) => {
            warn!("Pick history for team {} unavailable: {}", team_id, e);
            Vec::new()
        }
    }
}
