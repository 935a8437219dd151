use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain, gateway, infra,
    infra::{session_store::FileSessionStore, storage_layout::StorageLayout},
    ui,
    usecases::{self, bootstrap},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_default() {
        Command::Run => {
            let bootstrap = bootstrap::bootstrap(cli.config.as_deref())?;

            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                gateway = gateway::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let mut shell = bootstrap::compose_shell(&bootstrap.context, &bootstrap.layout);
            ui::shell::run(
                &bootstrap.context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )?
        }
        Command::Logout => {
            let layout = StorageLayout::resolve()?;
            layout.ensure_dirs()?;

            let mut sessions = FileSessionStore::new(&layout);
            let outcome = usecases::logout::logout(&mut sessions)?;

            tracing::info!(
                session_removed = outcome.session_removed,
                "logout completed"
            );
            if outcome.session_removed {
                println!("Logged out. The saved session was removed.");
            } else {
                println!("No saved session found. Nothing to remove.");
            }
        }
    }

    Ok(())
}
