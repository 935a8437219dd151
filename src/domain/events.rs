use super::{chat::ChatSummary, message::Message, remote::RemoteResult};

/// Result of one poller fetch, tagged with the identity it was fetched for.
///
/// The tag lets the orchestrator discard results that arrive after the view
/// has moved on (chat switched, user logged out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollUpdate {
    ChatList {
        user_id: i64,
        result: RemoteResult<Vec<ChatSummary>>,
    },
    Messages {
        chat_id: i64,
        result: RemoteResult<Vec<Message>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    Poll(PollUpdate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Lowercase key name: single characters as-is, named keys as
    /// "enter", "esc", "backspace", "tab", "up", "down", "left", "right",
    /// "delete", "home", "end".
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }

    /// Returns the printable character carried by this key, if any.
    pub fn as_char(&self) -> Option<char> {
        if self.ctrl {
            return None;
        }

        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}
