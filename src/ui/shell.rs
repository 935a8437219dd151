use anyhow::Result;

use crate::{
    domain::events::AppEvent,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
    },
};

use super::{terminal::TerminalGuard, view};

/// Upper bound on events applied between two draws. Poll results arrive in
/// bursts; a bounded batch keeps the UI current without starving the
/// renderer.
const MAX_EVENTS_PER_FRAME: usize = 16;

pub fn run(
    context: &AppContext,
    events: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        server = %context.config.server.base_url,
        log_level = %context.config.logging.level,
        "entering TUI shell"
    );

    let mut terminal = TerminalGuard::acquire()?;

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state_mut()))?;

        // A Tick means the queue ran dry for this frame.
        for _ in 0..MAX_EVENTS_PER_FRAME {
            match events.next_event()? {
                None => break,
                Some(event) => {
                    let drained = matches!(event, AppEvent::Tick);
                    orchestrator.handle_event(event)?;
                    if drained || !orchestrator.state().is_running() {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::events::AppEvent,
        infra::stubs::MemorySessionStore,
        ui::event_source::MockEventSource,
        usecases::shell::testing::{inert_orchestrator, InertOrchestrator},
    };

    fn drain(
        events: &mut dyn AppEventSource,
        orchestrator: &mut dyn ShellOrchestrator,
    ) -> Result<()> {
        while let Some(event) = events.next_event()? {
            orchestrator.handle_event(event)?;
        }
        Ok(())
    }

    #[test]
    fn quit_event_stops_the_orchestrator() {
        let mut events = MockEventSource::from(vec![AppEvent::Tick, AppEvent::QuitRequested]);
        let mut orchestrator: InertOrchestrator = inert_orchestrator(MemorySessionStore::default());
        assert!(orchestrator.state().is_running());

        drain(&mut events, &mut orchestrator).expect("events must apply");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn exhausted_mock_source_returns_none() {
        let mut events = MockEventSource::from(vec![AppEvent::Tick]);

        assert_eq!(
            events.next_event().expect("must read"),
            Some(AppEvent::Tick)
        );
        assert_eq!(events.next_event().expect("must read"), None);
    }
}
