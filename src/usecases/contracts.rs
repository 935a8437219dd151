use anyhow::Result;

use crate::{
    domain::{
        chat::ChatSummary, events::AppEvent, message::Message, remote::RemoteResult,
        shell_state::ShellState,
    },
    gateway::Poller,
    usecases::{
        authenticate::AuthBackend,
        send_message::MessageSender,
        start_private_chat::{ChatCreator, UserDirectory},
        update_profile::ProfileUpdater,
    },
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn state_mut(&mut self) -> &mut ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Fetches the chat list for a user. One poll or manual refresh replaces the
/// displayed collection wholesale.
pub trait ChatsSource {
    fn list_chats(&self, user_id: i64) -> RemoteResult<Vec<ChatSummary>>;
}

/// Fetches the full message history of a chat.
pub trait MessagesSource {
    fn load_messages(&self, chat_id: i64) -> RemoteResult<Vec<Message>>;
}

/// Starts the repeating background fetches a view attaches to. Dropping the
/// returned handle stops the poller.
pub trait PollerSpawner {
    fn start_chat_list_poller(&self, user_id: i64) -> Poller;
    fn start_message_poller(&self, chat_id: i64) -> Poller;
}

/// Everything the shell needs from the remote backend, one trait per
/// capability.
pub trait ChatBackend:
    AuthBackend
    + ChatsSource
    + MessagesSource
    + MessageSender
    + UserDirectory
    + ChatCreator
    + ProfileUpdater
{
}

impl<T> ChatBackend for T where
    T: AuthBackend
        + ChatsSource
        + MessagesSource
        + MessageSender
        + UserDirectory
        + ChatCreator
        + ProfileUpdater
{
}
