//! Use case layer: application workflows and orchestration.

pub mod authenticate;
pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod create_group;
pub mod logout;
pub mod send_message;
pub mod shell;
pub mod start_private_chat;
pub mod update_profile;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
