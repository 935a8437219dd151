use super::{chat::ChatKind, message::Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenChatUiState {
    Empty,
    Loading,
    Ready,
    Error,
}

/// Rows kept visible above and below the cursor before the view scrolls.
const SCROLL_MARGIN: usize = 5;

/// View state of the open conversation, keyed by chat id.
///
/// The key decides whether a poll result still belongs here: updates tagged
/// with another chat id are dropped by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenChatState {
    chat_id: Option<i64>,
    chat_title: String,
    chat_kind: ChatKind,
    messages: Vec<Message>,
    ui_state: OpenChatUiState,
    selected_index: Option<usize>,
    scroll_offset: usize,
}

impl Default for OpenChatState {
    fn default() -> Self {
        Self {
            chat_id: None,
            chat_title: String::new(),
            chat_kind: ChatKind::Private,
            messages: Vec::new(),
            ui_state: OpenChatUiState::Empty,
            selected_index: None,
            scroll_offset: 0,
        }
    }
}

impl OpenChatState {
    pub fn chat_id(&self) -> Option<i64> {
        self.chat_id
    }

    pub fn chat_title(&self) -> &str {
        &self.chat_title
    }

    pub fn chat_kind(&self) -> ChatKind {
        self.chat_kind
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn ui_state(&self) -> OpenChatUiState {
        self.ui_state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_open(&self) -> bool {
        self.chat_id.is_some()
    }

    pub fn set_loading(&mut self, chat_id: i64, chat_title: String, chat_kind: ChatKind) {
        *self = Self {
            chat_id: Some(chat_id),
            chat_title,
            chat_kind,
            ui_state: OpenChatUiState::Loading,
            ..Self::default()
        };
    }

    /// Replaces the conversation wholesale; the cursor lands on the newest
    /// message.
    pub fn set_ready(&mut self, messages: Vec<Message>) {
        self.selected_index = messages.len().checked_sub(1);
        self.messages = messages;
        self.ui_state = OpenChatUiState::Ready;
    }

    /// Marks the view errored. Messages already on screen stay.
    pub fn set_error(&mut self) {
        self.ui_state = OpenChatUiState::Error;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn select_next(&mut self) {
        let Some(last) = self.messages.len().checked_sub(1) else {
            return;
        };

        self.selected_index = Some(match self.selected_index {
            None => 0,
            Some(index) => (index + 1).min(last),
        });
    }

    pub fn select_previous(&mut self) {
        let Some(last) = self.messages.len().checked_sub(1) else {
            return;
        };

        self.selected_index = Some(match self.selected_index {
            None => last,
            Some(index) => index.saturating_sub(1),
        });
    }

    /// Keeps the cursor visible with SCROLL_MARGIN rows of context.
    ///
    /// `element_index` is the visual row in the rendered list (date
    /// separators included), `viewport_height` the visible row count.
    pub fn update_scroll_offset(&mut self, element_index: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        let margin = SCROLL_MARGIN.min(viewport_height / 2);
        let first_comfortable = self.scroll_offset + margin;
        let last_comfortable = (self.scroll_offset + viewport_height)
            .saturating_sub(margin + 1);

        if element_index < first_comfortable {
            self.scroll_offset = element_index.saturating_sub(margin);
        } else if element_index > last_comfortable {
            self.scroll_offset = (element_index + margin + 1).saturating_sub(viewport_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::{MessageKind, SenderSummary};

    fn message(id: i64, content: &str) -> Message {
        Message {
            id,
            chat_id: 1,
            sender_id: 2,
            content: content.to_owned(),
            kind: MessageKind::Text,
            is_system: false,
            read_by: vec![],
            sent_at_unix_ms: 1_700_000_000_000,
            sender: SenderSummary {
                username: "bob".to_owned(),
                nickname: "Bob".to_owned(),
                avatar_url: None,
            },
        }
    }

    fn open(state: &mut OpenChatState, messages: Vec<Message>) {
        state.set_loading(1, "Chat".to_owned(), ChatKind::Group);
        state.set_ready(messages);
    }

    #[test]
    fn default_state_is_closed() {
        let state = OpenChatState::default();

        assert_eq!(state.ui_state(), OpenChatUiState::Empty);
        assert!(!state.is_open());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn set_loading_records_the_chat_identity() {
        let mut state = OpenChatState::default();

        state.set_loading(42, "Bob".to_owned(), ChatKind::Private);

        assert_eq!(state.chat_id(), Some(42));
        assert_eq!(state.chat_title(), "Bob");
        assert_eq!(state.chat_kind(), ChatKind::Private);
        assert_eq!(state.ui_state(), OpenChatUiState::Loading);
    }

    #[test]
    fn switching_chats_drops_the_previous_conversation() {
        let mut state = OpenChatState::default();
        open(&mut state, vec![message(1, "Hello")]);

        state.set_loading(2, "Ops".to_owned(), ChatKind::Group);

        assert_eq!(state.chat_id(), Some(2));
        assert!(state.messages().is_empty());
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn ready_puts_the_cursor_on_the_newest_message() {
        let mut state = OpenChatState::default();

        open(&mut state, vec![message(1, "Hello"), message(2, "World")]);

        assert_eq!(state.ui_state(), OpenChatUiState::Ready);
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn ready_with_no_messages_leaves_no_selection() {
        let mut state = OpenChatState::default();

        open(&mut state, vec![]);

        assert_eq!(state.ui_state(), OpenChatUiState::Ready);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn error_keeps_messages_already_on_screen() {
        let mut state = OpenChatState::default();
        open(&mut state, vec![message(1, "Hello")]);

        state.set_error();

        assert_eq!(state.ui_state(), OpenChatUiState::Error);
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn clear_closes_the_conversation() {
        let mut state = OpenChatState::default();
        open(&mut state, vec![message(1, "Hi")]);

        state.clear();

        assert!(!state.is_open());
        assert!(state.messages().is_empty());
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn cursor_is_clamped_to_the_message_range() {
        let mut state = OpenChatState::default();
        open(&mut state, vec![message(1, "A"), message(2, "B")]);

        state.select_next();
        assert_eq!(state.selected_index(), Some(1));

        state.select_previous();
        state.select_previous();
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn cursor_moves_are_ignored_on_an_empty_conversation() {
        let mut state = OpenChatState::default();
        open(&mut state, vec![]);

        state.select_next();
        state.select_previous();

        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn scroll_follows_the_cursor_near_the_bottom() {
        let mut state = OpenChatState::default();

        state.update_scroll_offset(18, 20);

        assert!(state.scroll_offset() > 0);
    }

    #[test]
    fn scroll_follows_the_cursor_near_the_top() {
        let mut state = OpenChatState::default();
        state.scroll_offset = 10;

        state.update_scroll_offset(12, 20);

        assert!(state.scroll_offset() < 10);
    }

    #[test]
    fn scroll_stays_put_inside_the_comfort_zone() {
        let mut state = OpenChatState::default();
        state.scroll_offset = 5;

        state.update_scroll_offset(10, 20);

        assert_eq!(state.scroll_offset(), 5);
    }

    #[test]
    fn zero_height_viewport_changes_nothing() {
        let mut state = OpenChatState::default();
        state.scroll_offset = 5;

        state.update_scroll_offset(10, 0);

        assert_eq!(state.scroll_offset(), 5);
    }
}
