//! Use case for partial profile updates from the settings dialog.
//!
//! Edits are optimistic-on-confirm: the caller applies the change locally
//! only after the backend acknowledged it.

use crate::domain::{
    remote::{RemoteError, RemoteResult},
    user::Theme,
};

/// Fields to change; `None` means "leave untouched".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<Theme>,
    pub hide_online_status: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none()
            && self.avatar_url.is_none()
            && self.theme.is_none()
            && self.hide_online_status.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateProfileError {
    /// Nothing to change; no request is issued.
    NoChanges,
    /// A nickname was provided but is empty after trimming.
    EmptyNickname,
    Rejected(String),
    Unreachable,
}

impl UpdateProfileError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NoChanges => "Nothing to update".to_owned(),
            Self::EmptyNickname => "Nickname cannot be empty".to_owned(),
            Self::Rejected(reason) => reason.clone(),
            Self::Unreachable => "Could not reach the server".to_owned(),
        }
    }
}

pub trait ProfileUpdater {
    fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> RemoteResult<()>;
}

/// Validates and dispatches the update. Returns the update that was applied
/// (nickname trimmed) so the caller can mirror it into local state.
pub fn update_profile(
    updater: &dyn ProfileUpdater,
    user_id: i64,
    mut update: ProfileUpdate,
) -> Result<ProfileUpdate, UpdateProfileError> {
    if update.is_empty() {
        return Err(UpdateProfileError::NoChanges);
    }

    if let Some(nickname) = update.nickname.as_deref() {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Err(UpdateProfileError::EmptyNickname);
        }
        update.nickname = Some(trimmed.to_owned());
    }

    updater
        .update_profile(user_id, &update)
        .map_err(map_remote_error)?;

    Ok(update)
}

fn map_remote_error(error: RemoteError) -> UpdateProfileError {
    match error {
        RemoteError::Rejected(reason) => UpdateProfileError::Rejected(reason),
        RemoteError::Unreachable => UpdateProfileError::Unreachable,
    }
}
