//! Use case for creating a named group chat.

use crate::domain::{
    chat::ChatKind,
    remote::{RemoteError, RemoteResult},
};

use super::start_private_chat::{ChatCreator, NewChat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateGroupError {
    /// Group name is empty after trimming.
    EmptyName,
    Rejected(String),
    Unreachable,
}

impl CreateGroupError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyName => "Enter a group name".to_owned(),
            Self::Rejected(reason) => reason.clone(),
            Self::Unreachable => "Could not reach the server".to_owned(),
        }
    }
}

/// Validates the group name and dispatches the creation request.
/// Returns the trimmed name for the confirmation notice.
pub fn create_group(
    creator: &dyn ChatCreator,
    creator_id: i64,
    name: &str,
) -> Result<String, CreateGroupError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CreateGroupError::EmptyName);
    }

    creator
        .create_chat(&NewChat {
            kind: ChatKind::Group,
            creator_id,
            member_ids: vec![],
            name: Some(name.to_owned()),
        })
        .map_err(map_remote_error)?;

    Ok(name.to_owned())
}

fn map_remote_error(error: RemoteError) -> CreateGroupError {
    match error {
        RemoteError::Rejected(reason) => CreateGroupError::Rejected(reason),
        RemoteError::Unreachable => CreateGroupError::Unreachable,
    }
}
