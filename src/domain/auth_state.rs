use super::text_field::TextFieldState;

/// The three mutually exclusive authentication screen modes.
///
/// `Reset` is UI-only: it has no wired backend call and submitting it only
/// shows an informational notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
    Reset,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in to your account",
            Self::Register => "Create a new account",
            Self::Reset => "Password recovery",
        }
    }
}

/// Which input of the auth form owns the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFocus {
    #[default]
    Username,
    Password,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthScreenState {
    mode: AuthMode,
    username: TextFieldState,
    password: TextFieldState,
    email: TextFieldState,
    focus: AuthFocus,
    submitting: bool,
}

impl AuthScreenState {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn focus(&self) -> AuthFocus {
        self.focus
    }

    pub fn username(&self) -> &str {
        self.username.text()
    }

    pub fn password(&self) -> &str {
        self.password.text()
    }

    pub fn email(&self) -> &str {
        self.email.text()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Switches mode and moves focus to the first field of that mode.
    /// Field contents are kept, matching form behavior elsewhere.
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.focus = match mode {
            AuthMode::Login | AuthMode::Register => AuthFocus::Username,
            AuthMode::Reset => AuthFocus::Email,
        };
    }

    /// Cycles focus through the fields of the current mode.
    pub fn focus_next(&mut self) {
        self.focus = match self.mode {
            AuthMode::Login | AuthMode::Register => match self.focus {
                AuthFocus::Username => AuthFocus::Password,
                _ => AuthFocus::Username,
            },
            AuthMode::Reset => AuthFocus::Email,
        };
    }

    pub fn focused_field_mut(&mut self) -> &mut TextFieldState {
        match self.focus {
            AuthFocus::Username => &mut self.username,
            AuthFocus::Password => &mut self.password,
            AuthFocus::Email => &mut self.email,
        }
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub fn end_submit(&mut self) {
        self.submitting = false;
    }
}
