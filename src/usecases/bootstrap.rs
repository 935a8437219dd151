use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    gateway::{GatewayPollerSpawner, HttpGateway},
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::{ConfigAdapter, SessionStoreAdapter},
        error::AppError,
        session_store::{acquire_instance_lock, FileSessionStore, InstanceLock},
        storage_layout::StorageLayout,
    },
    ui,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::DefaultShellOrchestrator,
    },
};

/// Everything `run` needs, with the guards that must live as long as the
/// process: the single-instance lock and the log writer.
pub struct Bootstrap {
    pub context: AppContext,
    pub layout: StorageLayout,
    _instance_lock: InstanceLock,
    _log_guard: WorkerGuard,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<Bootstrap, AppError> {
    let config = load_config(config_path)?;

    let layout = StorageLayout::resolve()?;
    layout.ensure_dirs()?;

    let log_guard = infra::logging::init(&config.logging, &layout.log_dir())?;
    let instance_lock = acquire_instance_lock(&layout)?;
    let gateway = HttpGateway::new(&config.server)?;

    Ok(Bootstrap {
        context: AppContext::new(config, gateway),
        layout,
        _instance_lock: instance_lock,
        _log_guard: log_guard,
    })
}

fn load_config(config_path: Option<&Path>) -> Result<AppConfig, AppError> {
    FileConfigAdapter::new(config_path)
        .load()
        .map_err(AppError::Other)
}

pub struct ComposedShell {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

/// Wires the orchestrator to the gateway, the session store and the poll
/// update channel drained by the event source.
pub fn compose_shell(context: &AppContext, layout: &StorageLayout) -> ComposedShell {
    let sessions = FileSessionStore::new(layout);
    let restored = sessions.load();

    let (updates_tx, updates_rx) = std::sync::mpsc::channel();
    let spawner = GatewayPollerSpawner::new(
        context.gateway.handle(),
        updates_tx,
        context.config.polling.clone(),
    );

    let orchestrator =
        DefaultShellOrchestrator::new(context.gateway.handle(), spawner, sessions, restored);
    let event_source = ui::CompositeEventSource::new(ui::ChannelPollSource::new(updates_rx));

    ComposedShell {
        event_source: Box::new(event_source),
        orchestrator: Box::new(orchestrator),
    }
}
