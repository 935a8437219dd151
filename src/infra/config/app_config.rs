use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8717";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_CHAT_LIST_INTERVAL_MS: u64 = 3_000;
const DEFAULT_MESSAGES_INTERVAL_MS: u64 = 2_000;

/// Fully resolved configuration: built-in defaults with the optional
/// config file overlaid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Tracing filter directive, e.g. "info" or "pchat=debug".
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL the endpoint paths are joined onto.
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

/// Fixed refresh intervals for the two background pollers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingConfig {
    pub chat_list_interval_ms: u64,
    pub messages_interval_ms: u64,
}

impl PollingConfig {
    pub fn chat_list_interval(&self) -> Duration {
        Duration::from_millis(self.chat_list_interval_ms)
    }

    pub fn messages_interval(&self) -> Duration {
        Duration::from_millis(self.messages_interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            chat_list_interval_ms: DEFAULT_CHAT_LIST_INTERVAL_MS,
            messages_interval_ms: DEFAULT_MESSAGES_INTERVAL_MS,
        }
    }
}
