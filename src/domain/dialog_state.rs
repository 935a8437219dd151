use super::{text_field::TextFieldState, user::Theme};

/// Modal dialog for starting a private chat by peer username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateChatDialog {
    pub username: TextFieldState,
    pub submitting: bool,
}

/// Modal dialog for creating a named group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateGroupDialog {
    pub name: TextFieldState,
    pub submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsFocus {
    #[default]
    Nickname,
    Theme,
}

/// Settings modal: profile summary, nickname edit and theme selection.
///
/// Edits are optimistic-on-confirm: local state changes only after the
/// backend acknowledged the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialog {
    pub nickname: TextFieldState,
    pub theme: Theme,
    pub focus: SettingsFocus,
    pub submitting: bool,
}

impl SettingsDialog {
    pub fn new(current_nickname: &str, current_theme: Theme) -> Self {
        Self {
            nickname: TextFieldState::with_text(current_nickname),
            theme: current_theme,
            focus: SettingsFocus::default(),
            submitting: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            SettingsFocus::Nickname => SettingsFocus::Theme,
            SettingsFocus::Theme => SettingsFocus::Nickname,
        };
    }
}

/// At most one modal is open at a time; input is routed to it while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    CreateChat(CreateChatDialog),
    CreateGroup(CreateGroupDialog),
    Settings(SettingsDialog),
}
