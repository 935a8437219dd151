use anyhow::Result;

use crate::{
    domain::session::SessionRecord,
    infra::{config::AppConfig, error::AppError},
};

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig>;
}

/// Access to the single persisted session record.
///
/// Only the root controller goes through this seam; no other component
/// touches the session directly.
pub trait SessionStoreAdapter {
    /// Returns the persisted session if present and well-formed.
    /// Malformed or unreadable data is treated as absent, never an error.
    fn load(&self) -> Option<SessionRecord>;

    /// Writes the session, replacing any prior value.
    fn save(&mut self, record: &SessionRecord) -> Result<(), AppError>;

    /// Removes the persisted session. Returns whether a record existed.
    fn clear(&mut self) -> Result<bool, AppError>;
}
