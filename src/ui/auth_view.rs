//! Authentication screen: a centered card with the login / register / reset
//! form.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    auth_state::{AuthFocus, AuthMode, AuthScreenState},
    user::Theme,
};

use super::{styles, view::centered_rect};

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 12;

const USERNAME_LABEL: &str = "Username: ";
const PASSWORD_LABEL: &str = "Password: ";
const EMAIL_LABEL: &str = "Email: ";

pub fn render(frame: &mut Frame<'_>, area: Rect, auth: &AuthScreenState, theme: Theme) {
    let area = centered_rect(area, CARD_WIDTH, CARD_HEIGHT);
    let block = Block::default()
        .title(Span::styled(" pchat ", styles::title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style(theme));
    let inner = block.inner(area);

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(build_card_lines(auth, theme)), inner);

    if let Some((column, row)) = cursor_position(auth, inner) {
        frame.set_cursor_position((column, row));
    }
}

fn build_card_lines(auth: &AuthScreenState, theme: Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            auth.mode().title().to_owned(),
            styles::hint_style(theme),
        ))
        .alignment(Alignment::Center),
        Line::default(),
    ];

    match auth.mode() {
        AuthMode::Login | AuthMode::Register => {
            lines.push(field_line(
                USERNAME_LABEL,
                auth.username().to_owned(),
                auth.focus() == AuthFocus::Username,
                theme,
            ));
            lines.push(field_line(
                PASSWORD_LABEL,
                "*".repeat(auth.password().chars().count()),
                auth.focus() == AuthFocus::Password,
                theme,
            ));
        }
        AuthMode::Reset => {
            lines.push(field_line(
                EMAIL_LABEL,
                auth.email().to_owned(),
                auth.focus() == AuthFocus::Email,
                theme,
            ));
            lines.push(Line::default());
        }
    }

    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(action_hint(auth).to_owned(), styles::hint_style(theme)))
            .alignment(Alignment::Center),
    );
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            mode_hints(auth.mode()).to_owned(),
            styles::hint_style(theme),
        ))
        .alignment(Alignment::Center),
    );

    lines
}

fn field_line(label: &str, value: String, focused: bool, theme: Theme) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };

    Line::from(vec![
        Span::styled(marker.to_owned(), styles::input_prompt_style(theme)),
        Span::styled(label.to_owned(), styles::field_label_style(theme)),
        Span::styled(value, styles::input_text_style(theme)),
    ])
}

fn action_hint(auth: &AuthScreenState) -> &'static str {
    if auth.is_submitting() {
        return "Working...";
    }

    match auth.mode() {
        AuthMode::Login => "Enter: sign in",
        AuthMode::Register => "Enter: create account",
        AuthMode::Reset => "Enter: send code",
    }
}

fn mode_hints(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "Ctrl+R register | Ctrl+F forgot password | Tab switch field",
        AuthMode::Register | AuthMode::Reset => "Esc back to sign-in | Tab switch field",
    }
}

/// Terminal cursor position inside the focused field, if one is focused.
fn cursor_position(auth: &AuthScreenState, inner: Rect) -> Option<(u16, u16)> {
    let (label, field_cursor, row_offset) = match (auth.mode(), auth.focus()) {
        (AuthMode::Login | AuthMode::Register, AuthFocus::Username) => {
            (USERNAME_LABEL, auth.username().chars().count(), 2)
        }
        (AuthMode::Login | AuthMode::Register, AuthFocus::Password) => {
            (PASSWORD_LABEL, auth.password().chars().count(), 3)
        }
        (AuthMode::Reset, AuthFocus::Email) => (EMAIL_LABEL, auth.email().chars().count(), 2),
        _ => return None,
    };

    let column = inner
        .x
        .saturating_add(2)
        .saturating_add(label.len() as u16)
        .saturating_add(field_cursor.min(u16::MAX as usize) as u16);
    Some((column, inner.y.saturating_add(row_offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::text_field::TextFieldState;

    fn lines_to_strings(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    fn auth_with_password(password: &str) -> AuthScreenState {
        let mut auth = AuthScreenState::default();
        auth.focus_next();
        for ch in password.chars() {
            auth.focused_field_mut().insert_char(ch);
        }
        auth
    }

    #[test]
    fn password_is_masked_in_the_card() {
        let auth = auth_with_password("abc1234");

        let text = lines_to_strings(&build_card_lines(&auth, Theme::System)).join("\n");

        assert!(text.contains("*******"));
        assert!(!text.contains("abc1234"));
    }

    #[test]
    fn login_mode_shows_username_and_password_fields() {
        let auth = AuthScreenState::default();

        let text = lines_to_strings(&build_card_lines(&auth, Theme::System)).join("\n");

        assert!(text.contains("Username:"));
        assert!(text.contains("Password:"));
        assert!(!text.contains("Email:"));
    }

    #[test]
    fn reset_mode_shows_only_the_email_field() {
        let mut auth = AuthScreenState::default();
        auth.set_mode(AuthMode::Reset);

        let text = lines_to_strings(&build_card_lines(&auth, Theme::System)).join("\n");

        assert!(text.contains("Email:"));
        assert!(!text.contains("Password:"));
    }

    #[test]
    fn login_hints_point_at_register_and_reset() {
        let text = mode_hints(AuthMode::Login);

        assert!(text.contains("Ctrl+R"));
        assert!(text.contains("Ctrl+F"));
    }

    #[test]
    fn cursor_lands_in_the_password_row_when_focused() {
        let auth = auth_with_password("abc");
        let inner = Rect::new(10, 5, 40, 10);

        let (column, row) = cursor_position(&auth, inner).expect("cursor must be placed");

        assert_eq!(row, 8);
        assert_eq!(
            column,
            10 + 2 + PASSWORD_LABEL.len() as u16 + 3
        );
    }

    #[test]
    fn submitting_state_changes_the_action_hint() {
        let mut auth = AuthScreenState::default();
        auth.begin_submit();

        assert_eq!(action_hint(&auth), "Working...");
    }

    #[test]
    fn field_edits_flow_into_the_rendered_card() {
        let mut field = TextFieldState::default();
        field.insert_char('a');
        let mut auth = AuthScreenState::default();
        auth.focused_field_mut().insert_char('a');

        let text = lines_to_strings(&build_card_lines(&auth, Theme::System)).join("\n");

        assert_eq!(field.text(), "a");
        assert!(text.contains("Username: a"));
    }
}
