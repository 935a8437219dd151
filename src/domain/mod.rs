//! Domain layer: core entities and view-model state.

pub mod auth_state;
pub mod chat;
pub mod chat_list_state;
pub mod dialog_state;
pub mod events;
pub mod message;
pub mod open_chat_state;
pub mod remote;
pub mod session;
pub mod shell_state;
pub mod text_field;
pub mod user;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
