//! Process configuration, read from flags or the environment.
//!
//! `ALLOTMENT_MODE`, `SUPABASE_URL` and `SUPABASE_KEY` are required: the
//! process refuses to start without a store to talk to.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use db::{pool::create_pool, DbError, Gateway, PgGateway, RestGateway};
use reqwest::Url;
use tracing::info;

/// Execution mode; selects the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Development,
    Production,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production  => write!(f, "production"),
        }
    }
}

#[derive(Debug, Args)]
pub struct Config {
    /// Execution mode.
    #[arg(long, env = "ALLOTMENT_MODE", value_enum)]
    pub mode: Mode,

    /// Base URL of the hosted store project.
    #[arg(long, env = "SUPABASE_URL")]
    pub store_url: Url,

    /// Access key for the hosted store.
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub store_key: String,

    /// Connect to the store's Postgres database directly instead of the
    /// REST API.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Pool ceiling when `--database-url` is in use.
    #[arg(long, env = "ALLOTMENT_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,
}

impl Config {
    /// Build the process-wide gateway.
    pub async fn gateway(&self) -> Result<Arc<dyn Gateway>, DbError> {
        match &self.database_url {
            Some(url) => {
                info!("Using direct Postgres gateway");
                let pool = create_pool(url, self.max_connections).await?;
                Ok(Arc::new(PgGateway::new(pool)))
            }
            None => {
                info!(url = %self.store_url, "Using REST gateway");
                Ok(Arc::new(RestGateway::new(self.store_url.clone(), self.store_key.clone())?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn flags_populate_config() {
        let h = Harness::try_parse_from([
            "allotment",
            "--mode", "production",
            "--store-url", "https://abc.supabase.co",
            "--store-key", "anon",
        ])
        .unwrap();

        assert_eq!(h.config.mode, Mode::Production);
        assert_eq!(h.config.store_url.host_str(), Some("abc.supabase.co"));
        assert_eq!(h.config.max_connections, 10);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let res = Harness::try_parse_from([
            "allotment",
            "--mode", "staging",
            "--store-url", "https://abc.supabase.co",
            "--store-key", "anon",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn store_url_must_be_a_url() {
        let res = Harness::try_parse_from([
            "allotment",
            "--mode", "development",
            "--store-url", "not a url",
            "--store-key", "anon",
        ]);
        assert!(res.is_err());
    }

    /// Parse a full flag set minus `flag` (and its value), with the matching
    /// environment variable cleared.
    fn parse_without(flag: &str, env_var: &str) -> Result<Harness, clap::Error> {
        std::env::remove_var(env_var);
        let full = [
            ("--mode", "development"),
            ("--store-url", "https://abc.supabase.co"),
            ("--store-key", "anon"),
        ];
        let args = std::iter::once("allotment").chain(
            full.into_iter()
                .filter(|(name, _)| *name != flag)
                .flat_map(|(name, value)| [name, value]),
        );
        Harness::try_parse_from(args)
    }

    #[test]
    fn missing_mode_fails_startup() {
        let err = parse_without("--mode", "ALLOTMENT_MODE").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_store_url_fails_startup() {
        let err = parse_without("--store-url", "SUPABASE_URL").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_store_key_fails_startup() {
        let err = parse_without("--store-key", "SUPABASE_KEY").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[tokio::test]
    async fn rest_gateway_is_the_default() {
        let config = Config {
            mode: Mode::Development,
            store_url: Url::parse("https://abc.supabase.co").unwrap(),
            store_key: "anon".into(),
            database_url: None,
            max_connections: 10,
        };
        assert!(config.gateway().await.is_ok());
    }
}
