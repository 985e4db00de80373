use serde::Deserialize;

use crate::services::title_matcher::DEFAULT_CUTOFF;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV file with one row per game
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Minimum fuzzy-match ratio for a title to be accepted
    #[serde(default = "default_match_cutoff")]
    pub match_cutoff: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_dataset_path() -> String {
    "imdb-videogames.csv".to_string()
}

fn default_match_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.match_cutoff) {
            anyhow::bail!(
                "MATCH_CUTOFF must be between 0 and 1, got {}",
                self.match_cutoff
            );
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
