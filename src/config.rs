/// Command line and environment configuration
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::background::SelectionPolicy;
use crate::constants::{AWS_ASSETS_PATH, DEFAULT_API_URL};

#[derive(Parser, Debug, Clone)]
#[command(name = "moonstream-product", version, about = "Moonstream product page and subscriptions")]
pub struct Cli {
    /// Moonstream API server
    #[arg(long, env = "MOONSTREAM_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token for the subscriptions API
    #[arg(long, env = "MOONSTREAM_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Base URL of the static assets bucket
    #[arg(long, default_value = AWS_ASSETS_PATH)]
    pub assets_url: String,

    /// How the product page background picks its resolution
    #[arg(long, value_enum, default_value_t = SelectionPolicy::HighestLoaded)]
    pub policy: SelectionPolicy,

    /// Never call the API, show only the local snapshot
    #[arg(long)]
    pub offline: bool,

    /// Location of the subscriptions snapshot database
    #[arg(long)]
    pub cache_db: Option<PathBuf>,

    /// Request timeout in seconds for API calls and image downloads
    #[arg(long, env = "MOONSTREAM_TIMEOUT")]
    pub timeout: Option<f64>,
}

impl Cli {
    /// Snapshot database path, defaulting to the user's data directory:
    /// - Linux: ~/.local/share/moonstream-product/subscriptions.db
    /// - macOS: ~/Library/Application Support/moonstream-product/subscriptions.db
    /// - Windows: %APPDATA%\moonstream-product\subscriptions.db
    /// `--timeout` as a duration; zero, negative or non-finite means none
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
    }

    pub fn cache_db_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cache_db {
            return Some(path.clone());
        }
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("moonstream-product");
        path.push("subscriptions.db");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["moonstream-product"]);
        assert_eq!(cli.assets_url, AWS_ASSETS_PATH);
        assert_eq!(cli.policy, SelectionPolicy::HighestLoaded);
        assert!(!cli.offline);
    }

    #[test]
    fn test_policy_flag() {
        let cli = Cli::parse_from(["moonstream-product", "--policy", "viewport-capped", "--offline"]);
        assert_eq!(cli.policy, SelectionPolicy::ViewportCapped);
        assert!(cli.offline);
    }

    #[test]
    fn test_timeout_flag() {
        let cli = Cli::parse_from(["moonstream-product", "--timeout", "2.5"]);
        assert_eq!(cli.request_timeout(), Some(Duration::from_millis(2500)));

        let cli = Cli::parse_from(["moonstream-product", "--timeout", "0"]);
        assert_eq!(cli.request_timeout(), None);
    }

    #[test]
    fn test_explicit_cache_path_wins() {
        let cli = Cli::parse_from(["moonstream-product", "--cache-db", "/tmp/snapshot.db"]);
        assert_eq!(cli.cache_db_path(), Some(PathBuf::from("/tmp/snapshot.db")));
    }
}
