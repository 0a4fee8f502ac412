use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::GridError;
use crate::models::{DraftBan, DraftPick};

use super::source::{DraftSource, SeriesDraft};

/// Heroes reported per team in the pick history.
const PRIORITY_PICKS: usize = 5;

const SERIES_DRAFT_QUERY: &str = r#"
query SeriesDraft($id: ID!) {
  series(id: $id) {
    id
    teams { baseInfo { id name } }
    games {
      sequenceNumber
      draft {
        picks { hero { id name } team { id } player { id nickname } order }
        bans { hero { id name } team { id } order }
      }
    }
  }
}
"#;

const TEAM_HISTORY_QUERY: &str = r#"
query TeamHistory($teamId: ID!, $titleId: Int!, $limit: Int!) {
  series(
    filter: {
      titleId: { equals: $titleId }
      teams: { baseInfo: { id: { equals: $teamId } } }
      status: { equals: ENDED }
    }
    first: $limit
    orderBy: { startTime: DESC }
  ) {
    edges {
      node {
        games {
          draft { picks { hero { name } team { id } order } }
        }
      }
    }
  }
}
"#;

/// Client for the GRID central-data GraphQL API.
#[derive(Clone)]
pub struct GridClient {
    http: Client,
    url: String,
    api_key: String,
    max_retries: u32,
    history_limit: u32,
}

impl GridClient {
    pub fn new(
        url: &str,
        api_key: String,
        timeout: Duration,
        max_retries: u32,
        history_limit: u32,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(GridClient {
            http,
            url: url.to_string(),
            api_key,
            max_retries,
            history_limit,
        })
    }

    /// POST a GraphQL query, retrying transient failures with backoff.
    async fn post_graphql(
        &self,
        query: &str,
        variables: Value,
        title_id: u32,
    ) -> Result<Value, GridError> {
        let mut attempt = 0u32;
        loop {
            match self.post_once(query, &variables, title_id).await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        "GRID request failed ({}), retry {}/{} in {:?}",
                        e,
                        attempt + 1,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post_once(
        &self,
        query: &str,
        variables: &Value,
        title_id: u32,
    ) -> Result<Value, GridError> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let resp = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("x-title-id", title_id.to_string())
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GridError::Status { status, body });
        }

        let raw: Value = resp.json().await?;
        check_graphql_errors(&raw)?;
        Ok(raw)
    }
}

#[async_trait]
impl DraftSource for GridClient {
    fn name(&self) -> &str {
        "grid-central"
    }

    async fn fetch_series_draft(
        &self,
        series_id: &str,
        title_id: u32,
    ) -> Result<SeriesDraft, GridError> {
        debug!("Fetching draft for series {} from {}", series_id, self.url);
        let raw = self
            .post_graphql(
                SERIES_DRAFT_QUERY,
                serde_json::json!({ "id": series_id }),
                title_id,
            )
            .await?;
        let draft = parse_series_draft(&raw, series_id)?;
        info!(
            "Resolved series {} draft: {} blue / {} red picks",
            series_id,
            draft.blue_picks.len(),
            draft.red_picks.len()
        );
        Ok(draft)
    }

    async fn fetch_priority_picks(
        &self,
        team_id: &str,
        title_id: u32,
    ) -> Result<Vec<String>, GridError> {
        let raw = self
            .post_graphql(
                TEAM_HISTORY_QUERY,
                serde_json::json!({
                    "teamId": team_id,
                    "titleId": title_id,
                    "limit": self.history_limit,
                }),
                title_id,
            )
            .await?;
        Ok(tally_priority_picks(&raw, team_id))
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let base_ms = 200u64 * 2u64.pow(attempt.min(5));
    let jitter_ms = rand::thread_rng().gen_range(0..100);
    Duration::from_millis(base_ms + jitter_ms)
}

// ── Parsing helpers ──────────────────────────────────────────────────────────

fn check_graphql_errors(raw: &Value) -> Result<(), GridError> {
    match raw["errors"].as_array() {
        Some(errors) if !errors.is_empty() => {
            let messages: Vec<&str> = errors
                .iter()
                .map(|e| e["message"].as_str().unwrap_or("unknown error"))
                .collect();
            Err(GridError::GraphQl(messages.join("; ")))
        }
        _ => Ok(()),
    }
}

/// GRID ids come back as strings, but older payloads use numbers.
fn id_of(v: &Value) -> Option<String> {
    v.as_str()
        .map(str::to_string)
        .or_else(|| v.as_u64().map(|n| n.to_string()))
}

fn parse_pick(item: &Value) -> Option<DraftPick> {
    Some(DraftPick {
        hero_id: id_of(&item["hero"]["id"]).unwrap_or_default(),
        hero_name: item["hero"]["name"].as_str()?.to_string(),
        team_id: id_of(&item["team"]["id"])?,
        player_id: id_of(&item["player"]["id"]),
        player_name: item["player"]["nickname"].as_str().map(str::to_string),
        role: None,
        order: u32::try_from(item["order"].as_u64()?).ok()?,
    })
}

fn parse_ban(item: &Value) -> Option<DraftBan> {
    Some(DraftBan {
        hero_id: id_of(&item["hero"]["id"]).unwrap_or_default(),
        hero_name: item["hero"]["name"].as_str()?.to_string(),
        team_id: id_of(&item["team"]["id"])?,
        order: u32::try_from(item["order"].as_u64()?).ok()?,
    })
}

fn parse_series_draft(raw: &Value, series_id: &str) -> Result<SeriesDraft, GridError> {
    let series = &raw["data"]["series"];
    if series.is_null() {
        return Err(GridError::NotFound(series_id.to_string()));
    }

    // Latest game that actually has picks.
    let game = series["games"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|g| {
            g["draft"]["picks"]
                .as_array()
                .is_some_and(|p| !p.is_empty())
        })
        .max_by_key(|g| g["sequenceNumber"].as_u64().unwrap_or(0))
        .ok_or_else(|| GridError::NotFound(series_id.to_string()))?;

    let mut picks: Vec<DraftPick> = game["draft"]["picks"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(parse_pick)
        .collect();
    picks.sort_by_key(|p| p.order);
    let mut bans: Vec<DraftBan> = game["draft"]["bans"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(parse_ban)
        .collect();
    bans.sort_by_key(|b| b.order);

    // The first listed team plays blue. Without a team list, fall back to
    // the order in which teams first pick.
    let mut team_ids: Vec<String> = series["teams"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|t| id_of(&t["baseInfo"]["id"]))
        .collect();
    if team_ids.len() < 2 {
        team_ids.clear();
        for p in &picks {
            if !team_ids.contains(&p.team_id) {
                team_ids.push(p.team_id.clone());
            }
        }
    }
    let blue_team_id = team_ids.first().cloned();
    let red_team_id = team_ids.get(1).cloned();
    if blue_team_id.is_none() {
        return Err(GridError::Decode(format!(
            "series {} draft has no identifiable teams",
            series_id
        )));
    }

    let is_blue = |team: &str| blue_team_id.as_deref() == Some(team);
    let is_red = |team: &str| red_team_id.as_deref() == Some(team);

    Ok(SeriesDraft {
        blue_picks: picks.iter().filter(|p| is_blue(&p.team_id)).cloned().collect(),
        red_picks: picks.iter().filter(|p| is_red(&p.team_id)).cloned().collect(),
        blue_bans: bans.iter().filter(|b| is_blue(&b.team_id)).cloned().collect(),
        red_bans: bans.iter().filter(|b| is_red(&b.team_id)).cloned().collect(),
        blue_team_id,
        red_team_id,
    })
}

fn tally_priority_picks(raw: &Value, team_id: &str) -> Vec<String> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let edges = raw["data"]["series"]["edges"].as_array().into_iter().flatten();
    for edge in edges {
        let games = edge["node"]["games"].as_array().into_iter().flatten();
        for game in games {
            let picks = game["draft"]["picks"].as_array().into_iter().flatten();
            for pick in picks {
                let Some(name) = pick["hero"]["name"].as_str() else {
                    continue;
                };
                if id_of(&pick["team"]["id"]).as_deref() == Some(team_id) {
                    *counts.entry(name.to_string()).or_default() += 1;
                }
            }
        }
    }

    let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
    // Most picked first; names break ties so output does not depend on hash order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(PRIORITY_PICKS)
        .map(|(name, n)| format!("{} ({} games)", name, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn pick(hero: &str, team: &str, order: u32) -> Value {
        json!({
            "hero": { "id": hero.to_lowercase(), "name": hero },
            "team": { "id": team },
            "player": { "id": format!("p-{}", order), "nickname": format!("player{}", order) },
            "order": order
        })
    }

    fn ban(hero: &str, team: &str, order: u32) -> Value {
        json!({ "hero": { "id": hero.to_lowercase(), "name": hero }, "team": { "id": team }, "order": order })
    }

    #[test]
    fn parses_latest_game_draft_by_team() {
        let raw = json!({
            "data": { "series": {
                "id": "s1",
                "teams": [ { "baseInfo": { "id": "t1", "name": "Blue" } },
                           { "baseInfo": { "id": "t2", "name": "Red" } } ],
                "games": [
                    { "sequenceNumber": 1, "draft": { "picks": [pick("Azir", "t1", 1)], "bans": [] } },
                    { "sequenceNumber": 2, "draft": {
                        "picks": [pick("Xerath", "t2", 2), pick("Camille", "t1", 1), pick("Diana", "t1", 3)],
                        "bans": [ban("Janna", "t2", 1), ban("Poppy", "t1", 1)]
                    } },
                    { "sequenceNumber": 3, "draft": { "picks": [], "bans": [] } }
                ]
            } }
        });
        let d = parse_series_draft(&raw, "s1").unwrap();
        assert_eq!(d.blue_team_id.as_deref(), Some("t1"));
        assert_eq!(d.red_team_id.as_deref(), Some("t2"));
        let blue: Vec<&str> = d.blue_picks.iter().map(|p| p.hero_name.as_str()).collect();
        assert_eq!(blue, vec!["Camille", "Diana"]);
        assert_eq!(d.red_picks.len(), 1);
        assert_eq!(d.red_picks[0].player_name.as_deref(), Some("player2"));
        assert_eq!(d.blue_bans[0].hero_name, "Poppy");
        assert_eq!(d.red_bans[0].hero_name, "Janna");
    }

    #[test]
    fn missing_team_list_uses_pick_order() {
        let raw = json!({
            "data": { "series": {
                "games": [ { "sequenceNumber": 1, "draft": {
                    "picks": [
                        { "hero": { "id": 7, "name": "Xerath" }, "team": { "id": 22 }, "order": 2 },
                        { "hero": { "id": 9, "name": "Camille" }, "team": { "id": 11 }, "order": 1 }
                    ]
                } } ]
            } }
        });
        let d = parse_series_draft(&raw, "s1").unwrap();
        assert_eq!(d.blue_team_id.as_deref(), Some("11"));
        assert_eq!(d.blue_picks[0].hero_name, "Camille");
        assert_eq!(d.red_picks[0].hero_name, "Xerath");
        assert!(d.blue_bans.is_empty());
    }

    #[test]
    fn null_series_is_not_found() {
        let raw = json!({ "data": { "series": null } });
        assert!(matches!(
            parse_series_draft(&raw, "missing"),
            Err(GridError::NotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn series_without_drafts_is_not_found() {
        let raw = json!({ "data": { "series": { "games": [ { "sequenceNumber": 1, "draft": null } ] } } });
        assert!(matches!(parse_series_draft(&raw, "s1"), Err(GridError::NotFound(_))));
    }

    #[test]
    fn graphql_errors_are_surfaced() {
        let raw = json!({ "errors": [ { "message": "unauthorized" }, { "message": "bad id" } ] });
        match check_graphql_errors(&raw) {
            Err(GridError::GraphQl(msg)) => assert_eq!(msg, "unauthorized; bad id"),
            other => panic!("expected GraphQl error, got {:?}", other),
        }
        assert!(check_graphql_errors(&json!({ "data": {}, "errors": [] })).is_ok());
    }

    #[test]
    fn priority_picks_counts_only_the_team() {
        let game = |picks: Vec<Value>| json!({ "draft": { "picks": picks } });
        let raw = json!({
            "data": { "series": { "edges": [
                { "node": { "games": [
                    game(vec![pick("Azir", "t1", 1), pick("Jinx", "t1", 2), pick("Azir", "t2", 1)]),
                    game(vec![pick("Azir", "t1", 1), pick("Lee Sin", "t1", 2)])
                ] } },
                { "node": { "games": [ game(vec![pick("Jinx", "t1", 1), pick("Ahri", "t1", 2)]) ] } }
            ] } }
        });
        let top = tally_priority_picks(&raw, "t1");
        assert_eq!(
            top,
            vec!["Azir (2 games)", "Jinx (2 games)", "Ahri (1 games)", "Lee Sin (1 games)"]
        );
    }

    #[test]
    fn priority_picks_are_capped_at_five() {
        let picks: Vec<Value> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .enumerate()
            .map(|(i, h)| pick(h, "t1", i as u32))
            .collect();
        let raw = json!({ "data": { "series": { "edges": [ { "node": { "games": [ { "draft": { "picks": picks } } ] } } ] } } });
        assert_eq!(tally_priority_picks(&raw, "t1").len(), PRIORITY_PICKS);
    }

    #[test]
    fn backoff_grows_with_attempts() {
        assert!(backoff_delay(0) < Duration::from_millis(300));
        assert!(backoff_delay(2) >= Duration::from_millis(800));
        assert!(backoff_delay(9) < Duration::from_millis(6500));
    }

    #[test]
    fn out_of_range_order_is_dropped() {
        let mut bad = pick("Azir", "t1", 2);
        bad["order"] = json!(u64::from(u32::MAX) + 1);
        assert!(parse_pick(&bad).is_none());
        assert_eq!(parse_pick(&pick("Azir", "t1", 2)).map(|p| p.order), Some(2));
    }

    // ── Retry behaviour against an in-process upstream ──

    struct Upstream {
        hits: AtomicUsize,
        /// Requests answered with `fail_status` before the body is served
        failures: usize,
        fail_status: StatusCode,
        body: Value,
        headers: Mutex<Vec<(String, String)>>,
    }

    impl Upstream {
        fn new(failures: usize, fail_status: StatusCode, body: Value) -> Arc<Self> {
            Arc::new(Upstream {
                hits: AtomicUsize::new(0),
                failures,
                fail_status,
                body,
                headers: Mutex::new(Vec::new()),
            })
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    async fn upstream_handler(
        State(up): State<Arc<Upstream>>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        let n = up.hits.fetch_add(1, Ordering::SeqCst);
        let seen = ["x-api-key", "x-title-id"].map(|name| {
            let value = headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            (name.to_string(), value.to_string())
        });
        up.headers.lock().unwrap().extend(seen);
        if n < up.failures {
            (up.fail_status, Json(json!({ "message": "upstream unavailable" })))
        } else {
            (StatusCode::OK, Json(up.body.clone()))
        }
    }

    async fn spawn_upstream(up: Arc<Upstream>) -> String {
        let app = Router::new()
            .route("/graphql", post(upstream_handler))
            .with_state(up);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/graphql", addr)
    }

    fn client(url: &str, max_retries: u32) -> GridClient {
        GridClient::new(url, "test-key".into(), Duration::from_secs(5), max_retries, 10).unwrap()
    }

    fn series_body() -> Value {
        json!({
            "data": { "series": {
                "teams": [ { "baseInfo": { "id": "t1" } }, { "baseInfo": { "id": "t2" } } ],
                "games": [ { "sequenceNumber": 1, "draft": {
                    "picks": [pick("Camille", "t1", 1), pick("Xerath", "t2", 2)],
                    "bans": []
                } } ]
            } }
        })
    }

    #[tokio::test]
    async fn unavailable_upstream_is_retried_until_success() {
        let up = Upstream::new(1, StatusCode::SERVICE_UNAVAILABLE, series_body());
        let url = spawn_upstream(up.clone()).await;

        let draft = client(&url, 2).fetch_series_draft("s1", 3).await.unwrap();
        assert_eq!(up.hits(), 2);
        assert_eq!(draft.blue_picks[0].hero_name, "Camille");

        let headers = up.headers.lock().unwrap().clone();
        assert!(headers.contains(&("x-api-key".to_string(), "test-key".to_string())));
        assert!(headers.contains(&("x-title-id".to_string(), "3".to_string())));
    }

    #[tokio::test]
    async fn rate_limit_retries_stop_at_configured_count() {
        let up = Upstream::new(usize::MAX, StatusCode::TOO_MANY_REQUESTS, series_body());
        let url = spawn_upstream(up.clone()).await;

        let err = client(&url, 2).fetch_series_draft("s1", 3).await.unwrap_err();
        assert!(matches!(err, GridError::Status { status: 429, .. }));
        assert_eq!(up.hits(), 3);
    }

    #[tokio::test]
    async fn unauthorized_is_not_retried() {
        let up = Upstream::new(usize::MAX, StatusCode::UNAUTHORIZED, series_body());
        let url = spawn_upstream(up.clone()).await;

        let err = client(&url, 2).fetch_series_draft("s1", 3).await.unwrap_err();
        assert!(matches!(err, GridError::Status { status: 401, .. }));
        assert_eq!(up.hits(), 1);
    }

    #[tokio::test]
    async fn zero_retries_makes_one_attempt() {
        let up = Upstream::new(usize::MAX, StatusCode::SERVICE_UNAVAILABLE, series_body());
        let url = spawn_upstream(up.clone()).await;

        let err = client(&url, 0).fetch_series_draft("s1", 3).await.unwrap_err();
        assert!(matches!(err, GridError::Status { status: 503, .. }));
        assert_eq!(up.hits(), 1);
    }

    #[tokio::test]
    async fn graphql_errors_over_http_are_not_retried() {
        let body = json!({ "data": null, "errors": [ { "message": "series not visible" } ] });
        let up = Upstream::new(0, StatusCode::OK, body);
        let url = spawn_upstream(up.clone()).await;

        let err = client(&url, 2).fetch_series_draft("s1", 3).await.unwrap_err();
        match err {
            GridError::GraphQl(msg) => assert_eq!(msg, "series not visible"),
            other => panic!("expected GraphQl error, got {:?}", other),
        }
        assert_eq!(up.hits(), 1);
    }

    #[tokio::test]
    async fn priority_picks_use_team_history_over_http() {
        let body = json!({ "data": { "series": { "edges": [
            { "node": { "games": [ { "draft": { "picks": [pick("Azir", "t1", 1), pick("Azir", "t2", 1)] } } ] } }
        ] } } });
        let up = Upstream::new(0, StatusCode::OK, body);
        let url = spawn_upstream(up.clone()).await;

        let picks = client(&url, 0).fetch_priority_picks("t1", 3).await.unwrap();
        assert_eq!(picks, vec!["Azir (1 games)"]);
        assert_eq!(up.hits(), 1);
    }
}
