//! Process configuration sourced from the environment

use std::path::PathBuf;
use std::time::Duration;

pub const PLACEHOLDER_VERIFY_TOKEN: &str = "your_verify_token";
pub const PLACEHOLDER_GRAPH_API_TOKEN: &str = "your_graph_api_token";

const DEFAULT_GRAPH_API_BASE_URL: &str = "https://graph.facebook.com";
const DEFAULT_GRAPH_API_VERSION: &str = "v18.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PAYMENT_LINK: &str = "https://dummy-payment.com/order123";

/// Bot configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Secret the platform echoes back during webhook verification
    pub verify_token: String,
    /// Bearer credential for the Graph API
    pub graph_api_token: String,
    pub graph_api_base_url: String,
    pub graph_api_version: String,
    pub port: u16,
    /// Link included in the order confirmation
    pub payment_link: String,
    /// Idle sessions older than this are dropped. `None` keeps them forever.
    pub session_ttl: Option<Duration>,
    /// JSON catalog to use instead of the built-in one
    pub catalog_path: Option<PathBuf>,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            verify_token: or_default("WEBHOOK_VERIFY_TOKEN", PLACEHOLDER_VERIFY_TOKEN),
            graph_api_token: or_default("GRAPH_API_TOKEN", PLACEHOLDER_GRAPH_API_TOKEN),
            graph_api_base_url: or_default("GRAPH_API_BASE_URL", DEFAULT_GRAPH_API_BASE_URL),
            graph_api_version: or_default("GRAPH_API_VERSION", DEFAULT_GRAPH_API_VERSION),
            port: lookup("ORDERBOT_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            payment_link: or_default("ORDERBOT_PAYMENT_LINK", DEFAULT_PAYMENT_LINK),
            session_ttl: lookup("ORDERBOT_SESSION_TTL_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            catalog_path: lookup("ORDERBOT_CATALOG_PATH").map(PathBuf::from),
        }
    }

    /// Names of secrets still set to their shipped placeholder
    pub fn placeholder_secrets(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.verify_token == PLACEHOLDER_VERIFY_TOKEN {
            names.push("WEBHOOK_VERIFY_TOKEN");
        }
        if self.graph_api_token == PLACEHOLDER_GRAPH_API_TOKEN {
            names.push("GRAPH_API_TOKEN");
        }
        names
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
