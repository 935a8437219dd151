use super::{
    auth_state::AuthScreenState, chat_list_state::ChatListState, dialog_state::DialogState,
    open_chat_state::OpenChatState, text_field::TextFieldState, user::Theme, user::User,
};

/// Which panel of the chat screen owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePane {
    #[default]
    ChatList,
    Messages,
    Compose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line user-visible notification shown in the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

/// State of the authenticated chat screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatScreenState {
    pub user: User,
    pub active_pane: ActivePane,
    pub chat_list: ChatListState,
    pub open_chat: OpenChatState,
    pub compose: TextFieldState,
    pub dialog: Option<DialogState>,
}

impl ChatScreenState {
    pub fn new(user: User) -> Self {
        Self {
            user,
            active_pane: ActivePane::default(),
            chat_list: ChatListState::default(),
            open_chat: OpenChatState::default(),
            compose: TextFieldState::default(),
            dialog: None,
        }
    }
}

/// Which top-level view is shown. No session means the auth screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Auth(AuthScreenState),
    Chat(Box<ChatScreenState>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    theme: Theme,
    pub screen: Screen,
    notice: Option<Notice>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            theme: Theme::default(),
            screen: Screen::Auth(AuthScreenState::default()),
            notice: None,
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_info_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind: NoticeKind::Info,
        });
    }

    pub fn set_error_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind: NoticeKind::Error,
        });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Switches to the chat screen for an authenticated user.
    pub fn enter_chat(&mut self, user: User) {
        if let Some(theme) = user.theme {
            self.theme = theme;
        }
        self.screen = Screen::Chat(Box::new(ChatScreenState::new(user)));
    }

    /// Returns to a fresh authentication screen.
    pub fn enter_auth(&mut self) {
        self.screen = Screen::Auth(AuthScreenState::default());
    }

    pub fn chat_screen(&self) -> Option<&ChatScreenState> {
        match &self.screen {
            Screen::Chat(chat) => Some(chat),
            Screen::Auth(_) => None,
        }
    }

    pub fn chat_screen_mut(&mut self) -> Option<&mut ChatScreenState> {
        match &mut self.screen {
            Screen::Chat(chat) => Some(chat),
            Screen::Auth(_) => None,
        }
    }
}
