//! Use case for starting a private chat with another user.
//!
//! The peer username is resolved to an id through a directory lookup first;
//! when the peer does not exist no chat-creation request is issued.

use crate::domain::{
    chat::{ChatKind, PeerSummary},
    remote::{RemoteError, RemoteResult},
};

/// Chat-creation request as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub kind: ChatKind,
    pub creator_id: i64,
    pub member_ids: Vec<i64>,
    pub name: Option<String>,
}

/// Resolves usernames to user summaries. A miss is `Ok(None)`, not a fault.
pub trait UserDirectory {
    fn lookup_user(&self, username: &str) -> RemoteResult<Option<PeerSummary>>;
}

pub trait ChatCreator {
    fn create_chat(&self, new_chat: &NewChat) -> RemoteResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPrivateChatError {
    EmptyUsername,
    PeerNotFound,
    Rejected(String),
    Unreachable,
}

impl StartPrivateChatError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyUsername => "Enter a username".to_owned(),
            Self::PeerNotFound => "User not found".to_owned(),
            Self::Rejected(reason) => reason.clone(),
            Self::Unreachable => "Could not reach the server".to_owned(),
        }
    }
}

/// Looks up the peer and creates the private chat.
/// Returns the resolved peer so the caller can name it in a notice.
pub fn start_private_chat(
    directory: &dyn UserDirectory,
    creator: &dyn ChatCreator,
    creator_id: i64,
    peer_username: &str,
) -> Result<PeerSummary, StartPrivateChatError> {
    let peer_username = peer_username.trim();
    if peer_username.is_empty() {
        return Err(StartPrivateChatError::EmptyUsername);
    }

    let peer = directory
        .lookup_user(peer_username)
        .map_err(map_remote_error)?
        .ok_or(StartPrivateChatError::PeerNotFound)?;

    creator
        .create_chat(&NewChat {
            kind: ChatKind::Private,
            creator_id,
            member_ids: vec![peer.id],
            name: None,
        })
        .map_err(map_remote_error)?;

    Ok(peer)
}

fn map_remote_error(error: RemoteError) -> StartPrivateChatError {
    match error {
        RemoteError::Rejected(reason) => StartPrivateChatError::Rejected(reason),
        RemoteError::Unreachable => StartPrivateChatError::Unreachable,
    }
}
