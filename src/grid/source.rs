use async_trait::async_trait;

use crate::error::GridError;
use crate::models::{DraftBan, DraftPick};

/// Picks and bans of one game, already split by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesDraft {
    pub blue_team_id: Option<String>,
    pub red_team_id: Option<String>,
    pub blue_picks: Vec<DraftPick>,
    pub red_picks: Vec<DraftPick>,
    pub blue_bans: Vec<DraftBan>,
    pub red_bans: Vec<DraftBan>,
}

/// Trait that every external draft-data provider must implement.
#[async_trait]
pub trait DraftSource: Send + Sync {
    /// Draft of the most recent game in the series that has one.
    async fn fetch_series_draft(&self, series_id: &str, title_id: u32)
        -> Result<SeriesDraft, GridError>;

    /// The team's most-picked heroes over its recent ended series, formatted
    /// as `"<hero> (<n> games)"`, most frequent first.
    async fn fetch_priority_picks(&self, team_id: &str, title_id: u32)
        -> Result<Vec<String>, GridError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
