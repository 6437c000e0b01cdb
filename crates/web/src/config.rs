use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    /// Comma-separated participant ids allowed to submit results.
    /// Built once at startup; there is no lazily cached group lookup.
    pub member_ids: String,
    pub leaderboard_top_n: usize,
    pub promote_on_first: bool,
    pub minor_bucket: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            member_ids: std::env::var("MEMBER_IDS").unwrap_or_default(),
            leaderboard_top_n: std::env::var("LEADERBOARD_TOP_N")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .context("LEADERBOARD_TOP_N must be a number")?,
            promote_on_first: std::env::var("PROMOTE_ON_FIRST")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            minor_bucket: std::env::var("MINOR_BUCKET")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
