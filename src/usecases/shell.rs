//! The shell orchestrator: routes events to the active view, issues gateway
//! calls, owns the pollers and is the only writer of the persisted session.

use anyhow::Result;

use crate::{
    domain::{
        auth_state::AuthMode,
        dialog_state::{
            CreateChatDialog, CreateGroupDialog, DialogState, SettingsDialog, SettingsFocus,
        },
        events::{AppEvent, KeyInput, PollUpdate},
        open_chat_state::OpenChatUiState,
        session::SessionRecord,
        shell_state::{ActivePane, Screen, ShellState},
        text_field::TextFieldState,
        user::Theme,
    },
    gateway::Poller,
    infra::contracts::SessionStoreAdapter,
    usecases::{
        authenticate::{authenticate, AuthAction},
        contracts::{ChatBackend, PollerSpawner, ShellOrchestrator},
        create_group::create_group,
        logout,
        send_message::{send_message, SendMessageCommand, SendMessageError},
        start_private_chat::start_private_chat,
        update_profile::{update_profile, ProfileUpdate},
    },
};

const SESSION_PERSIST_FAILED: &str = "SESSION_PERSIST_FAILED";
const SESSION_CLEAR_FAILED: &str = "SESSION_CLEAR_FAILED";
const CHAT_LIST_POLL_FAILED: &str = "CHAT_LIST_POLL_FAILED";
const MESSAGES_POLL_FAILED: &str = "MESSAGES_POLL_FAILED";
const MESSAGES_REFRESH_FAILED: &str = "MESSAGES_REFRESH_FAILED";
const STALE_POLL_DISCARDED: &str = "STALE_POLL_DISCARDED";
const LOGOUT_COMPLETED: &str = "LOGOUT_COMPLETED";

pub struct DefaultShellOrchestrator<B, P, S>
where
    B: ChatBackend,
    P: PollerSpawner,
    S: SessionStoreAdapter,
{
    state: ShellState,
    backend: B,
    pollers: P,
    sessions: S,
    chat_list_poller: Option<Poller>,
    message_poller: Option<Poller>,
}

impl<B, P, S> DefaultShellOrchestrator<B, P, S>
where
    B: ChatBackend,
    P: PollerSpawner,
    S: SessionStoreAdapter,
{
    /// Builds the orchestrator, resuming a restored session directly on the
    /// chat screen when one is present.
    pub fn new(backend: B, pollers: P, sessions: S, restored: Option<SessionRecord>) -> Self {
        let mut orchestrator = Self {
            state: ShellState::default(),
            backend,
            pollers,
            sessions,
            chat_list_poller: None,
            message_poller: None,
        };

        if let Some(record) = restored {
            orchestrator.state.enter_chat(record.user);
            orchestrator.state.set_theme(record.theme);
            orchestrator.start_chat_list_poller();
        }

        orchestrator
    }

    fn start_chat_list_poller(&mut self) {
        if let Some(chat) = self.state.chat_screen() {
            self.chat_list_poller = Some(self.pollers.start_chat_list_poller(chat.user.id));
        }
    }

    fn quit(&mut self) {
        self.chat_list_poller = None;
        self.message_poller = None;
        self.state.stop();
    }

    // =========================================================================
    // Poll application
    // =========================================================================

    fn apply_poll(&mut self, update: PollUpdate) {
        match update {
            PollUpdate::ChatList { user_id, result } => {
                let Some(chat) = self.state.chat_screen_mut() else {
                    return;
                };
                if chat.user.id != user_id {
                    tracing::debug!(code = STALE_POLL_DISCARDED, user_id, "chat list update ignored");
                    return;
                }

                match result {
                    Ok(chats) => chat.chat_list.set_ready(chats),
                    Err(error) => {
                        tracing::warn!(
                            code = CHAT_LIST_POLL_FAILED,
                            error = ?error,
                            "chat list poll failed"
                        );
                        if !chat.chat_list.has_loaded() {
                            chat.chat_list.set_error();
                        }
                    }
                }
            }
            PollUpdate::Messages { chat_id, result } => {
                let Some(chat) = self.state.chat_screen_mut() else {
                    return;
                };
                if chat.open_chat.chat_id() != Some(chat_id) {
                    tracing::debug!(code = STALE_POLL_DISCARDED, chat_id, "message update ignored");
                    return;
                }

                match result {
                    Ok(messages) => chat.open_chat.set_ready(messages),
                    Err(error) => {
                        tracing::warn!(
                            code = MESSAGES_POLL_FAILED,
                            error = ?error,
                            "message poll failed"
                        );
                        if chat.open_chat.ui_state() == OpenChatUiState::Loading {
                            chat.open_chat.set_error();
                        }
                    }
                }
            }
        }
    }

    // =========================================================================
    // Key routing
    // =========================================================================

    fn handle_key(&mut self, key: KeyInput) {
        if matches!(self.state.screen, Screen::Auth(_)) {
            self.handle_auth_key(key);
        } else {
            self.handle_chat_key(key);
        }
    }

    fn handle_auth_key(&mut self, key: KeyInput) {
        if !key.ctrl && key.key == "enter" {
            self.submit_auth();
            return;
        }

        let Screen::Auth(auth) = &mut self.state.screen else {
            return;
        };

        if key.ctrl {
            match key.key.as_str() {
                "r" => auth.set_mode(AuthMode::Register),
                "f" => auth.set_mode(AuthMode::Reset),
                _ => {}
            }
            return;
        }

        match key.key.as_str() {
            "esc" => auth.set_mode(AuthMode::Login),
            "tab" => auth.focus_next(),
            _ => edit_text_field(auth.focused_field_mut(), &key),
        }
    }

    fn submit_auth(&mut self) {
        let (mode, username, password) = {
            let Screen::Auth(auth) = &mut self.state.screen else {
                return;
            };
            if auth.is_submitting() {
                return;
            }
            auth.begin_submit();
            (
                auth.mode(),
                auth.username().to_owned(),
                auth.password().to_owned(),
            )
        };

        let action = match mode {
            AuthMode::Login => AuthAction::Login,
            AuthMode::Register => AuthAction::Register,
            AuthMode::Reset => {
                // No wired backend call for password reset.
                self.end_auth_submit();
                self.state
                    .set_info_notice("Password reset is not available yet");
                return;
            }
        };

        match authenticate(&self.backend, action, &username, &password) {
            Ok(user) => {
                let display_name = user.display_name().to_owned();
                self.state.enter_chat(user);
                self.persist_session();
                self.start_chat_list_poller();
                self.state
                    .set_info_notice(format!("Welcome, {display_name}!"));
            }
            Err(error) => {
                self.end_auth_submit();
                self.state.set_error_notice(error.user_message());
            }
        }
    }

    fn end_auth_submit(&mut self) {
        if let Screen::Auth(auth) = &mut self.state.screen {
            auth.end_submit();
        }
    }

    fn handle_chat_key(&mut self, key: KeyInput) {
        let (pane, has_dialog) = match self.state.chat_screen() {
            Some(chat) => (chat.active_pane, chat.dialog.is_some()),
            None => return,
        };

        if has_dialog {
            self.handle_dialog_key(key);
            return;
        }

        match pane {
            ActivePane::ChatList => self.handle_chat_list_key(key),
            ActivePane::Messages => self.handle_messages_key(key),
            ActivePane::Compose => self.handle_compose_key(key),
        }
    }

    fn handle_chat_list_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "q" => {
                self.quit();
                return;
            }
            "enter" | "l" => {
                self.open_selected_chat();
                return;
            }
            "r" => {
                self.refresh_chat_list();
                return;
            }
            _ => {}
        }

        let theme = self.state.theme();
        let Some(chat) = self.state.chat_screen_mut() else {
            return;
        };

        match key.key.as_str() {
            "j" | "down" => chat.chat_list.select_next(),
            "k" | "up" => chat.chat_list.select_previous(),
            "n" => chat.dialog = Some(DialogState::CreateChat(CreateChatDialog::default())),
            "g" => chat.dialog = Some(DialogState::CreateGroup(CreateGroupDialog::default())),
            "s" => {
                chat.dialog = Some(DialogState::Settings(SettingsDialog::new(
                    &chat.user.nickname,
                    theme,
                )));
            }
            _ => {}
        }
    }

    fn open_selected_chat(&mut self) {
        let Some(chat) = self.state.chat_screen_mut() else {
            return;
        };
        let Some(selected) = chat.chat_list.selected_chat() else {
            return;
        };

        let chat_id = selected.chat_id;
        let title = selected.title();
        let kind = selected.kind;

        chat.open_chat.set_loading(chat_id, title, kind);
        chat.active_pane = ActivePane::Messages;
        chat.compose.clear();

        // Replacing the handle stops any poller scoped to the previous chat.
        self.message_poller = Some(self.pollers.start_message_poller(chat_id));
    }

    fn close_open_chat(&mut self) {
        self.message_poller = None;
        if let Some(chat) = self.state.chat_screen_mut() {
            chat.open_chat.clear();
            chat.compose.clear();
            chat.active_pane = ActivePane::ChatList;
        }
    }

    fn refresh_chat_list(&mut self) {
        let Some(user_id) = self.state.chat_screen().map(|chat| chat.user.id) else {
            return;
        };

        match self.backend.list_chats(user_id) {
            Ok(chats) => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.chat_list.set_ready(chats);
                }
            }
            Err(error) => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    if !chat.chat_list.has_loaded() {
                        chat.chat_list.set_error();
                    }
                }
                self.state.set_error_notice(error.user_message());
            }
        }
    }

    fn handle_messages_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "q" => self.quit(),
            "h" | "esc" => self.close_open_chat(),
            "i" => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.active_pane = ActivePane::Compose;
                }
            }
            "j" | "down" => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.open_chat.select_next();
                }
            }
            "k" | "up" => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.open_chat.select_previous();
                }
            }
            _ => {}
        }
    }

    fn handle_compose_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "esc" => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.active_pane = ActivePane::Messages;
                }
            }
            "enter" => self.submit_message(),
            _ => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    edit_text_field(&mut chat.compose, &key);
                }
            }
        }
    }

    fn submit_message(&mut self) {
        let Some((chat_id, sender_id, content)) = self.state.chat_screen().and_then(|chat| {
            chat.open_chat
                .chat_id()
                .map(|chat_id| (chat_id, chat.user.id, chat.compose.text().to_owned()))
        }) else {
            return;
        };

        let command = SendMessageCommand {
            chat_id,
            sender_id,
            content,
        };

        match send_message(&self.backend, command) {
            Ok(()) => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.compose.clear();
                }
                self.refresh_open_chat();
            }
            // Nothing to send; mirrors the disabled send button.
            Err(SendMessageError::EmptyMessage) => {}
            Err(error) => self.state.set_error_notice(error.user_message()),
        }
    }

    fn refresh_open_chat(&mut self) {
        let Some(chat_id) = self
            .state
            .chat_screen()
            .and_then(|chat| chat.open_chat.chat_id())
        else {
            return;
        };

        match self.backend.load_messages(chat_id) {
            Ok(messages) => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    if chat.open_chat.chat_id() == Some(chat_id) {
                        chat.open_chat.set_ready(messages);
                    }
                }
            }
            Err(error) => {
                // The poller retries on its next tick.
                tracing::warn!(
                    code = MESSAGES_REFRESH_FAILED,
                    error = ?error,
                    "message refresh after send failed"
                );
            }
        }
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    fn handle_dialog_key(&mut self, key: KeyInput) {
        if key.ctrl {
            let settings_open = matches!(
                self.state.chat_screen().and_then(|chat| chat.dialog.as_ref()),
                Some(DialogState::Settings(_))
            );
            if key.key == "l" && settings_open {
                self.sign_out();
            }
            return;
        }

        match key.key.as_str() {
            "esc" => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    chat.dialog = None;
                }
                return;
            }
            "enter" => {
                self.submit_dialog();
                return;
            }
            _ => {}
        }

        let Some(chat) = self.state.chat_screen_mut() else {
            return;
        };
        let Some(dialog) = chat.dialog.as_mut() else {
            return;
        };

        match dialog {
            DialogState::CreateChat(dialog) => edit_text_field(&mut dialog.username, &key),
            DialogState::CreateGroup(dialog) => edit_text_field(&mut dialog.name, &key),
            DialogState::Settings(dialog) => match key.key.as_str() {
                "tab" => dialog.focus_next(),
                _ => match dialog.focus {
                    SettingsFocus::Nickname => edit_text_field(&mut dialog.nickname, &key),
                    SettingsFocus::Theme => {
                        if matches!(key.key.as_str(), "left" | "right" | "up" | "down" | " ") {
                            dialog.theme = dialog.theme.next();
                        }
                    }
                },
            },
        }
    }

    fn submit_dialog(&mut self) {
        enum Pending {
            Chat { username: String },
            Group { name: String },
            Settings { nickname: String, theme: Theme },
        }

        let pending = {
            let Some(chat) = self.state.chat_screen() else {
                return;
            };
            match chat.dialog.as_ref() {
                Some(DialogState::CreateChat(dialog)) => Pending::Chat {
                    username: dialog.username.text().to_owned(),
                },
                Some(DialogState::CreateGroup(dialog)) => Pending::Group {
                    name: dialog.name.text().to_owned(),
                },
                Some(DialogState::Settings(dialog)) => Pending::Settings {
                    nickname: dialog.nickname.text().to_owned(),
                    theme: dialog.theme,
                },
                None => return,
            }
        };

        let Some(user_id) = self.state.chat_screen().map(|chat| chat.user.id) else {
            return;
        };

        match pending {
            Pending::Chat { username } => self.submit_create_chat(user_id, username),
            Pending::Group { name } => self.submit_create_group(user_id, name),
            Pending::Settings { nickname, theme } => {
                self.submit_settings(user_id, nickname, theme)
            }
        }
    }

    fn submit_create_chat(&mut self, user_id: i64, username: String) {
        // Mirrors the disabled confirm button on an empty field.
        if username.trim().is_empty() {
            return;
        }

        self.set_dialog_submitting(true);
        let result = start_private_chat(&self.backend, &self.backend, user_id, &username);
        self.set_dialog_submitting(false);

        match result {
            Ok(peer) => {
                self.close_dialog();
                self.state
                    .set_info_notice(format!("You can now chat with {}", peer.display_name()));
                self.refresh_chat_list();
            }
            Err(error) => self.state.set_error_notice(error.user_message()),
        }
    }

    fn submit_create_group(&mut self, user_id: i64, name: String) {
        if name.trim().is_empty() {
            return;
        }

        self.set_dialog_submitting(true);
        let result = create_group(&self.backend, user_id, &name);
        self.set_dialog_submitting(false);

        match result {
            Ok(name) => {
                self.close_dialog();
                self.state
                    .set_info_notice(format!("Group \"{name}\" created"));
                self.refresh_chat_list();
            }
            Err(error) => self.state.set_error_notice(error.user_message()),
        }
    }

    fn submit_settings(&mut self, user_id: i64, nickname: String, theme: Theme) {
        let Some(current_nickname) = self
            .state
            .chat_screen()
            .map(|chat| chat.user.nickname.clone())
        else {
            return;
        };
        let current_theme = self.state.theme();

        let trimmed = nickname.trim();
        let update = ProfileUpdate {
            nickname: (trimmed != current_nickname).then(|| trimmed.to_owned()),
            theme: (theme != current_theme).then_some(theme),
            ..ProfileUpdate::default()
        };

        if update.is_empty() {
            self.close_dialog();
            return;
        }

        self.set_dialog_submitting(true);
        let result = update_profile(&self.backend, user_id, update);
        self.set_dialog_submitting(false);

        match result {
            Ok(applied) => {
                if let Some(chat) = self.state.chat_screen_mut() {
                    if let Some(nickname) = applied.nickname.clone() {
                        chat.user.nickname = nickname;
                    }
                    if let Some(theme) = applied.theme {
                        chat.user.theme = Some(theme);
                    }
                }
                if let Some(theme) = applied.theme {
                    self.state.set_theme(theme);
                }
                self.close_dialog();
                self.persist_session();
                self.state.set_info_notice("Profile updated");
            }
            Err(error) => self.state.set_error_notice(error.user_message()),
        }
    }

    fn close_dialog(&mut self) {
        if let Some(chat) = self.state.chat_screen_mut() {
            chat.dialog = None;
        }
    }

    fn set_dialog_submitting(&mut self, submitting: bool) {
        let Some(chat) = self.state.chat_screen_mut() else {
            return;
        };
        match chat.dialog.as_mut() {
            Some(DialogState::CreateChat(dialog)) => dialog.submitting = submitting,
            Some(DialogState::CreateGroup(dialog)) => dialog.submitting = submitting,
            Some(DialogState::Settings(dialog)) => dialog.submitting = submitting,
            None => {}
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    fn persist_session(&mut self) {
        let Some(user) = self.state.chat_screen().map(|chat| chat.user.clone()) else {
            return;
        };
        let record = SessionRecord {
            user,
            theme: self.state.theme(),
        };

        if let Err(error) = self.sessions.save(&record) {
            tracing::warn!(
                code = SESSION_PERSIST_FAILED,
                error = %error,
                "session could not be persisted"
            );
        }
    }

    fn sign_out(&mut self) {
        self.chat_list_poller = None;
        self.message_poller = None;

        match logout::logout(&mut self.sessions) {
            Ok(outcome) => tracing::info!(
                code = LOGOUT_COMPLETED,
                session_removed = outcome.session_removed,
                "signed out"
            ),
            Err(error) => tracing::warn!(
                code = SESSION_CLEAR_FAILED,
                error = %error,
                "session could not be cleared on sign-out"
            ),
        }

        self.state.enter_auth();
        self.state.set_info_notice("Signed out");
    }
}

/// Shared single-line editing behavior for every text input.
fn edit_text_field(field: &mut TextFieldState, key: &KeyInput) {
    match key.key.as_str() {
        "backspace" => field.delete_char_before(),
        "delete" => field.delete_char_at(),
        "left" => field.move_cursor_left(),
        "right" => field.move_cursor_right(),
        "home" => field.move_cursor_home(),
        "end" => field.move_cursor_end(),
        _ => {
            if let Some(ch) = key.as_char() {
                field.insert_char(ch);
            }
        }
    }
}

impl<B, P, S> ShellOrchestrator for DefaultShellOrchestrator<B, P, S>
where
    B: ChatBackend,
    P: PollerSpawner,
    S: SessionStoreAdapter,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.quit(),
            AppEvent::Poll(update) => self.apply_poll(update),
            AppEvent::InputKey(key) => {
                self.state.clear_notice();
                self.handle_key(key);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    //! Minimal doubles for tests outside this module.

    use super::DefaultShellOrchestrator;
    use crate::{
        domain::{
            chat::{ChatSummary, PeerSummary},
            message::Message,
            remote::{RemoteError, RemoteResult},
            user::User,
        },
        gateway::Poller,
        infra::stubs::MemorySessionStore,
        usecases::{
            authenticate::{AuthAction, AuthBackend},
            contracts::{ChatsSource, MessagesSource, PollerSpawner},
            send_message::MessageSender,
            start_private_chat::{ChatCreator, NewChat, UserDirectory},
            update_profile::{ProfileUpdate, ProfileUpdater},
        },
    };

    /// Backend whose every operation reports the server as unreachable.
    pub struct InertBackend;

    impl AuthBackend for InertBackend {
        fn authenticate(&self, _: AuthAction, _: &str, _: &str) -> RemoteResult<User> {
            Err(RemoteError::Unreachable)
        }
    }

    impl ChatsSource for InertBackend {
        fn list_chats(&self, _: i64) -> RemoteResult<Vec<ChatSummary>> {
            Err(RemoteError::Unreachable)
        }
    }

    impl MessagesSource for InertBackend {
        fn load_messages(&self, _: i64) -> RemoteResult<Vec<Message>> {
            Err(RemoteError::Unreachable)
        }
    }

    impl MessageSender for InertBackend {
        fn send_message(&self, _: i64, _: i64, _: &str) -> RemoteResult<()> {
            Err(RemoteError::Unreachable)
        }
    }

    impl UserDirectory for InertBackend {
        fn lookup_user(&self, _: &str) -> RemoteResult<Option<PeerSummary>> {
            Err(RemoteError::Unreachable)
        }
    }

    impl ChatCreator for InertBackend {
        fn create_chat(&self, _: &NewChat) -> RemoteResult<()> {
            Err(RemoteError::Unreachable)
        }
    }

    impl ProfileUpdater for InertBackend {
        fn update_profile(&self, _: i64, _: &ProfileUpdate) -> RemoteResult<()> {
            Err(RemoteError::Unreachable)
        }
    }

    pub struct InertSpawner;

    impl PollerSpawner for InertSpawner {
        fn start_chat_list_poller(&self, _: i64) -> Poller {
            Poller::inert()
        }

        fn start_message_poller(&self, _: i64) -> Poller {
            Poller::inert()
        }
    }

    pub type InertOrchestrator =
        DefaultShellOrchestrator<InertBackend, InertSpawner, MemorySessionStore>;

    pub fn inert_orchestrator(sessions: MemorySessionStore) -> InertOrchestrator {
        DefaultShellOrchestrator::new(InertBackend, InertSpawner, sessions, None)
    }
}
