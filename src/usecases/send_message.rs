//! Use case for sending a text message to a chat.

use crate::domain::remote::{RemoteError, RemoteResult};

/// Command to send a message to a specific chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    Rejected(String),
    Unreachable,
}

impl SendMessageError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyMessage => "Message is empty".to_owned(),
            Self::Rejected(reason) => reason.clone(),
            Self::Unreachable => "Could not reach the server".to_owned(),
        }
    }
}

pub trait MessageSender {
    fn send_message(&self, chat_id: i64, sender_id: i64, content: &str) -> RemoteResult<()>;
}

impl<T: MessageSender + ?Sized> MessageSender for &T {
    fn send_message(&self, chat_id: i64, sender_id: i64, content: &str) -> RemoteResult<()> {
        (*self).send_message(chat_id, sender_id, content)
    }
}

/// Validates the message text (non-empty after trimming) and dispatches it.
pub fn send_message(
    sender: &dyn MessageSender,
    command: SendMessageCommand,
) -> Result<(), SendMessageError> {
    let content = command.content.trim();
    if content.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    sender
        .send_message(command.chat_id, command.sender_id, content)
        .map_err(map_remote_error)
}

fn map_remote_error(error: RemoteError) -> SendMessageError {
    match error {
        RemoteError::Rejected(reason) => SendMessageError::Rejected(reason),
        RemoteError::Unreachable => SendMessageError::Unreachable,
    }
}
