/// Kind of chat for rendering and behavior decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatKind {
    /// Private 1-to-1 conversation with another user.
    #[default]
    Private,
    /// Named group chat.
    Group,
}

impl ChatKind {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
        }
    }
}

/// Summary of the other party in a private chat, embedded by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSummary {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
}

impl PeerSummary {
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

/// One entry of the chat list as fetched from the backend.
///
/// The whole collection is replaced on every successful poll; entries are
/// never mutated field-by-field on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub chat_id: i64,
    pub kind: ChatKind,
    /// Display name for group chats.
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub owner_id: Option<i64>,
    pub last_message_preview: Option<String>,
    pub last_message_unix_ms: Option<i64>,
    /// The other party, present for private chats.
    pub peer: Option<PeerSummary>,
}

impl ChatSummary {
    /// Title shown in the chat list and the conversation header.
    pub fn title(&self) -> String {
        match self.kind {
            ChatKind::Private => self
                .peer
                .as_ref()
                .map(|peer| peer.display_name().to_owned())
                .unwrap_or_else(|| "Unknown user".to_owned()),
            ChatKind::Group => self
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Group".to_owned()),
        }
    }
}
