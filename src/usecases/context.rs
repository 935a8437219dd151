use crate::{gateway::HttpGateway, infra::config::AppConfig};

/// Long-lived process context: the resolved configuration and the gateway
/// that owns the async runtime. Built once by bootstrap and borrowed by the
/// shell for its whole run.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub gateway: HttpGateway,
}

impl AppContext {
    pub fn new(config: AppConfig, gateway: HttpGateway) -> Self {
        Self { config, gateway }
    }
}
