//! Remote gateway: typed HTTP operations against the chat backend and the
//! polling primitive that keeps views fresh.

mod client;
pub mod poller;
mod wire;

pub use client::{GatewayHandle, HttpGateway};
pub use poller::{GatewayPollerSpawner, Poller};

/// Returns the gateway module name for smoke checks.
pub fn module_name() -> &'static str {
    "gateway"
}
