use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Rule-based esports match-outcome prediction service
#[derive(Parser, Debug, Clone)]
#[command(name = "draft-oracle", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// GRID central-data GraphQL endpoint
    #[arg(
        long,
        env = "GRID_CENTRAL_URL",
        default_value = "https://api.grid.gg/central-data/graphql"
    )]
    pub grid_central_url: String,

    /// GRID API key. Without it, series lookups are skipped (simulation only)
    #[arg(long, env = "GRID_API_KEY")]
    pub grid_api_key: Option<String>,

    /// Per-request timeout for GRID calls in seconds
    #[arg(long, env = "GRID_TIMEOUT_SECS", default_value = "10")]
    pub grid_timeout_secs: u64,

    /// Retries for transient GRID failures (0-5)
    #[arg(long, env = "GRID_MAX_RETRIES", default_value = "2")]
    pub grid_max_retries: u32,

    /// Ended series scanned when building a team's pick history (1-50)
    #[arg(long, env = "HISTORY_LIMIT", default_value = "10")]
    pub history_limit: u32,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr must be a socket address, got {}", self.listen_addr);
        }
        match url::Url::parse(&self.grid_central_url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            Ok(u) => anyhow::bail!("grid_central_url must use http or https, got {}", u.scheme()),
            Err(e) => anyhow::bail!("grid_central_url is not a valid URL: {}", e),
        }
        if self.grid_timeout_secs == 0 {
            anyhow::bail!("grid_timeout_secs must be positive");
        }
        if self.grid_max_retries > 5 {
            anyhow::bail!("grid_max_retries must be between 0 and 5");
        }
        if !(1..=50).contains(&self.history_limit) {
            anyhow::bail!("history_limit must be between 1 and 50");
        }
        Ok(())
    }

    pub fn grid_timeout(&self) -> Duration {
        Duration::from_secs(self.grid_timeout_secs)
    }

    /// API key, treating an empty value as absent.
    pub fn grid_api_key(&self) -> Option<&str> {
        self.grid_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}
