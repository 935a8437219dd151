use crate::infra::{contracts::SessionStoreAdapter, error::AppError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub session_removed: bool,
}

/// Clears the persisted session. Idempotent: logging out without a session
/// succeeds and reports that nothing was removed.
pub fn logout(sessions: &mut dyn SessionStoreAdapter) -> Result<LogoutOutcome, AppError> {
    let session_removed = sessions.clear()?;

    Ok(LogoutOutcome { session_removed })
}
