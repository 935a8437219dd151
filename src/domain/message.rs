/// Type tag carried by every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Text,
    File,
    /// Tag the client does not recognize; rendered as plain text.
    Unknown,
}

impl MessageKind {
    /// Returns a display label prepended to the content, or None for plain text.
    pub fn display_label(&self) -> Option<&'static str> {
        match self {
            MessageKind::Text | MessageKind::Unknown => None,
            MessageKind::File => Some("[File]"),
        }
    }
}

/// Sender identity embedded in every fetched message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSummary {
    pub username: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
}

impl SenderSummary {
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

/// One message of a conversation, immutable from the client's perspective.
///
/// `read_by` is advisory display data maintained by the backend; the client
/// renders it but never writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub kind: MessageKind,
    pub is_system: bool,
    pub read_by: Vec<i64>,
    pub sent_at_unix_ms: i64,
    pub sender: SenderSummary,
}

impl Message {
    /// Returns the display content: kind label + text, or just text.
    pub fn display_content(&self) -> String {
        match (self.kind.display_label(), self.content.is_empty()) {
            (Some(label), true) => label.to_owned(),
            (Some(label), false) => format!("{} {}", label, self.content),
            (None, _) => self.content.clone(),
        }
    }

    /// True when anyone besides the sender appears in the read-by set.
    pub fn read_by_someone_else(&self) -> bool {
        self.read_by.iter().any(|id| *id != self.sender_id)
    }
}
