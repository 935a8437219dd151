use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, PollingConfig, ServerConfig};

/// Shape of `config.toml`: every section and every field is optional.
/// Anything absent resolves to its built-in default.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigOverlay {
    logging: Option<LogOverlay>,
    server: Option<ServerOverlay>,
    polling: Option<PollingOverlay>,
}

#[derive(Debug, Deserialize, Default)]
struct LogOverlay {
    level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ServerOverlay {
    base_url: Option<String>,
    request_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct PollingOverlay {
    chat_list_interval_ms: Option<u64>,
    messages_interval_ms: Option<u64>,
}

impl ConfigOverlay {
    pub fn into_config(self) -> AppConfig {
        let base = AppConfig::default();
        AppConfig {
            logging: resolve_logging(self.logging, base.logging),
            server: resolve_server(self.server, base.server),
            polling: resolve_polling(self.polling, base.polling),
        }
    }
}

fn resolve_logging(overlay: Option<LogOverlay>, base: LogConfig) -> LogConfig {
    let Some(overlay) = overlay else {
        return base;
    };

    LogConfig {
        level: overlay.level.unwrap_or(base.level),
    }
}

fn resolve_server(overlay: Option<ServerOverlay>, base: ServerConfig) -> ServerConfig {
    let Some(overlay) = overlay else {
        return base;
    };

    ServerConfig {
        base_url: overlay.base_url.unwrap_or(base.base_url),
        request_timeout_ms: overlay.request_timeout_ms.unwrap_or(base.request_timeout_ms),
    }
}

fn resolve_polling(overlay: Option<PollingOverlay>, base: PollingConfig) -> PollingConfig {
    let Some(overlay) = overlay else {
        return base;
    };

    PollingConfig {
        chat_list_interval_ms: overlay
            .chat_list_interval_ms
            .unwrap_or(base.chat_list_interval_ms),
        messages_interval_ms: overlay
            .messages_interval_ms
            .unwrap_or(base.messages_interval_ms),
    }
}
