//! UI layer: terminal rendering and event sources.

mod auth_view;
mod compose_input;
mod dialog_view;
mod event_source;
mod message_rendering;
pub mod shell;
mod styles;
mod terminal;
mod view;

pub(crate) use event_source::{ChannelPollSource, CompositeEventSource};

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
