// Process configuration loaded from the environment (and .env)

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got '{value}'")]
    InvalidDuration { name: &'static str, value: String },

    #[error("BIND_ADDR is not a socket address: '{0}'")]
    InvalidBindAddr(String),

    #[error("Unknown routing strategy '{0}' (expected 'keyword' or 'delegated')")]
    UnknownStrategy(String),

    #[error("AGENT_URLS does not name any agent")]
    NoAgents,

    #[error("SELECTOR_API_KEY is required when ROUTING_STRATEGY=delegated")]
    MissingSelectorKey,
}

/// Which routing strategy the orchestrator runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Keyword,
    Delegated,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "keyword" => Ok(StrategyKind::Keyword),
            "delegated" => Ok(StrategyKind::Delegated),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Settings for the delegated selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub agent_urls: Vec<String>,
    pub bind_addr: SocketAddr,
    pub strategy: StrategyKind,
    pub fetch_timeout: Duration,
    pub dispatch_timeout: Duration,
    pub session_id: String,
    pub work_items_path: String,
    pub selector: SelectorSettings,
}

const DEFAULT_AGENT_URLS: &str = "http://localhost:8001,http://localhost:8002";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8003";

impl Config {
    /// Reads configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for unset
    /// variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let agent_urls = parse_agent_urls(&get("AGENT_URLS", DEFAULT_AGENT_URLS));
        if agent_urls.is_empty() {
            return Err(ConfigError::NoAgents);
        }

        let bind_addr = get("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        let strategy: StrategyKind = get("ROUTING_STRATEGY", "keyword").parse()?;

        let selector = SelectorSettings {
            base_url: get("SELECTOR_BASE_URL", "https://api.openai.com/v1"),
            model: get("SELECTOR_MODEL", "gpt-4o-mini"),
            api_key: lookup("SELECTOR_API_KEY").filter(|key| !key.trim().is_empty()),
            timeout: seconds("SELECTOR_TIMEOUT_SECS", &get("SELECTOR_TIMEOUT_SECS", "30"))?,
        };

        if strategy == StrategyKind::Delegated && selector.api_key.is_none() {
            return Err(ConfigError::MissingSelectorKey);
        }

        Ok(Self {
            agent_urls,
            bind_addr,
            strategy,
            fetch_timeout: seconds("FETCH_TIMEOUT_SECS", &get("FETCH_TIMEOUT_SECS", "10"))?,
            dispatch_timeout: seconds(
                "DISPATCH_TIMEOUT_SECS",
                &get("DISPATCH_TIMEOUT_SECS", "30"),
            )?,
            session_id: get("SESSION_ID", "session-xyz"),
            work_items_path: get("WORK_ITEMS_PATH", "data/test_cases.json"),
            selector,
        })
    }
}

fn parse_agent_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

fn seconds(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidDuration {
            name,
            value: value.to_string(),
        }),
    }
}
