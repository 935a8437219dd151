use super::chat::ChatSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatListUiState {
    Loading,
    Ready,
    Empty,
    Error,
}

/// View state of the chat list panel.
///
/// Every successful poll replaces the collection wholesale. Selection is
/// tracked by chat id, not by position, so a refresh that reorders the list
/// keeps the cursor on the same conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatListState {
    ui_state: ChatListUiState,
    chats: Vec<ChatSummary>,
    selected_chat_id: Option<i64>,
}

impl Default for ChatListState {
    fn default() -> Self {
        Self {
            ui_state: ChatListUiState::Loading,
            chats: Vec::new(),
            selected_chat_id: None,
        }
    }
}

impl ChatListState {
    pub fn ui_state(&self) -> ChatListUiState {
        self.ui_state
    }

    pub fn chats(&self) -> &[ChatSummary] {
        &self.chats
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected_chat_id?;
        self.chats.iter().position(|chat| chat.chat_id == selected)
    }

    pub fn selected_chat(&self) -> Option<&ChatSummary> {
        let selected = self.selected_chat_id?;
        self.chats.iter().find(|chat| chat.chat_id == selected)
    }

    pub fn has_loaded(&self) -> bool {
        !matches!(self.ui_state, ChatListUiState::Loading)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_loading(&mut self) {
        self.ui_state = ChatListUiState::Loading;
        self.chats.clear();
        self.selected_chat_id = None;
    }

    pub fn set_ready(&mut self, chats: Vec<ChatSummary>) {
        if chats.is_empty() {
            self.ui_state = ChatListUiState::Empty;
            self.chats.clear();
            self.selected_chat_id = None;
            return;
        }

        self.ui_state = ChatListUiState::Ready;
        self.chats = chats;

        let still_listed = self
            .selected_chat_id
            .is_some_and(|id| self.chats.iter().any(|chat| chat.chat_id == id));
        if !still_listed {
            self.selected_chat_id = Some(self.chats[0].chat_id);
        }
    }

    pub fn set_error(&mut self) {
        self.ui_state = ChatListUiState::Error;
        self.chats.clear();
        self.selected_chat_id = None;
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(index) = self.selected_index() else {
            return;
        };

        let last = self.chats.len() - 1;
        let target = index.saturating_add_signed(delta).min(last);
        self.selected_chat_id = Some(self.chats[target].chat_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatKind;

    fn chat(chat_id: i64, name: &str) -> ChatSummary {
        ChatSummary {
            chat_id,
            kind: ChatKind::Group,
            name: Some(name.to_owned()),
            avatar_url: None,
            owner_id: None,
            last_message_preview: None,
            last_message_unix_ms: None,
            peer: None,
        }
    }

    #[test]
    fn starts_loading_with_nothing_selected() {
        let state = ChatListState::default();

        assert_eq!(state.ui_state(), ChatListUiState::Loading);
        assert!(state.chats().is_empty());
        assert_eq!(state.selected_chat(), None);
        assert!(!state.has_loaded());
    }

    #[test]
    fn first_ready_result_selects_the_top_chat() {
        let mut state = ChatListState::default();

        state.set_ready(vec![chat(1, "Standup"), chat(2, "Release")]);

        assert_eq!(state.ui_state(), ChatListUiState::Ready);
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(state.selected_chat().map(|item| item.chat_id), Some(1));
        assert!(state.has_loaded());
    }

    #[test]
    fn empty_result_transitions_to_empty() {
        let mut state = ChatListState::default();

        state.set_ready(vec![]);

        assert_eq!(state.ui_state(), ChatListUiState::Empty);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn error_clears_entries_and_selection() {
        let mut state = ChatListState::default();
        state.set_ready(vec![chat(1, "Standup")]);

        state.set_error();

        assert_eq!(state.ui_state(), ChatListUiState::Error);
        assert!(state.chats().is_empty());
        assert_eq!(state.selected_chat(), None);
    }

    #[test]
    fn selection_stays_within_the_list_bounds() {
        let mut state = ChatListState::default();
        state.set_ready(vec![chat(1, "Standup"), chat(2, "Release")]);

        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), Some(1));

        state.select_previous();
        state.select_previous();
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn refresh_keeps_the_cursor_on_the_same_chat_id() {
        let mut state = ChatListState::default();
        state.set_ready(vec![chat(1, "Standup"), chat(2, "Release"), chat(3, "Incidents")]);
        state.select_next();

        // The refresh reorders the list and drops two entries.
        state.set_ready(vec![chat(8, "Watercooler"), chat(2, "Release"), chat(9, "Archive")]);

        assert_eq!(state.selected_chat().map(|item| item.chat_id), Some(2));
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn refresh_falls_back_to_the_top_when_the_selected_chat_is_gone() {
        let mut state = ChatListState::default();
        state.set_ready(vec![chat(1, "Standup"), chat(2, "Release")]);
        state.select_next();

        state.set_ready(vec![chat(10, "Watercooler"), chat(11, "Archive")]);

        assert_eq!(state.selected_chat().map(|item| item.chat_id), Some(10));
    }
}
