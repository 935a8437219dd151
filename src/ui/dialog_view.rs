//! Modal dialogs: create chat, create group, settings.

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{
    dialog_state::{DialogState, SettingsDialog, SettingsFocus},
    text_field::TextFieldState,
    user::{Theme, User},
};

use super::{styles, view::centered_rect};

const INPUT_DIALOG_WIDTH: u16 = 46;
const INPUT_DIALOG_HEIGHT: u16 = 8;
const SETTINGS_WIDTH: u16 = 52;
const SETTINGS_HEIGHT: u16 = 13;

pub fn render_dialog(frame: &mut Frame<'_>, dialog: &DialogState, user: &User, theme: Theme) {
    match dialog {
        DialogState::CreateChat(state) => render_input_dialog(
            frame,
            "New chat",
            "Peer username: ",
            &state.username,
            state.submitting,
            theme,
        ),
        DialogState::CreateGroup(state) => render_input_dialog(
            frame,
            "New group",
            "Group name: ",
            &state.name,
            state.submitting,
            theme,
        ),
        DialogState::Settings(state) => render_settings(frame, state, user, theme),
    }
}

fn render_input_dialog(
    frame: &mut Frame<'_>,
    title: &str,
    label: &str,
    input: &TextFieldState,
    submitting: bool,
    theme: Theme,
) {
    let area = centered_rect(frame.area(), INPUT_DIALOG_WIDTH, INPUT_DIALOG_HEIGHT);
    let block = dialog_block(title, theme);
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let action = if submitting { "Working..." } else { "Enter: create | Esc: close" };
    let lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled(label.to_owned(), styles::field_label_style(theme)),
            Span::styled(input.text().to_owned(), styles::input_text_style(theme)),
        ]),
        Line::default(),
        Line::from(Span::styled(action.to_owned(), styles::hint_style(theme)))
            .alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let cursor_column = inner
        .x
        .saturating_add(label.len() as u16)
        .saturating_add(input.cursor_position().min(u16::MAX as usize) as u16);
    frame.set_cursor_position((cursor_column, inner.y.saturating_add(1)));
}

fn render_settings(frame: &mut Frame<'_>, state: &SettingsDialog, user: &User, theme: Theme) {
    let area = centered_rect(frame.area(), SETTINGS_WIDTH, SETTINGS_HEIGHT);
    let block = dialog_block("Settings", theme);
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(build_settings_lines(state, user, theme)), inner);

    if state.focus == SettingsFocus::Nickname {
        let cursor_column = inner
            .x
            .saturating_add(2 + "Nickname: ".len() as u16)
            .saturating_add(state.nickname.cursor_position().min(u16::MAX as usize) as u16);
        frame.set_cursor_position((cursor_column, inner.y.saturating_add(3)));
    }
}

fn build_settings_lines(state: &SettingsDialog, user: &User, theme: Theme) -> Vec<Line<'static>> {
    let nickname_marker = if state.focus == SettingsFocus::Nickname { "> " } else { "  " };
    let theme_marker = if state.focus == SettingsFocus::Theme { "> " } else { "  " };

    vec![
        Line::from(vec![
            Span::styled("  Account:  ".to_owned(), styles::field_label_style(theme)),
            Span::styled(format!("@{}", user.username), styles::input_text_style(theme)),
        ]),
        Line::default(),
        Line::from(Span::styled("  Profile".to_owned(), styles::title_style(theme))),
        Line::from(vec![
            Span::styled(nickname_marker.to_owned(), styles::input_prompt_style(theme)),
            Span::styled("Nickname: ".to_owned(), styles::field_label_style(theme)),
            Span::styled(state.nickname.text().to_owned(), styles::input_text_style(theme)),
        ]),
        Line::from(vec![
            Span::styled(theme_marker.to_owned(), styles::input_prompt_style(theme)),
            Span::styled("Theme:    ".to_owned(), styles::field_label_style(theme)),
            Span::styled(
                format!("< {} >", state.theme.as_label()),
                styles::input_text_style(theme),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            settings_action_hint(state.submitting).to_owned(),
            styles::hint_style(theme),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "Ctrl+L: sign out".to_owned(),
            styles::hint_style(theme),
        ))
        .alignment(Alignment::Center),
    ]
}

fn settings_action_hint(submitting: bool) -> &'static str {
    if submitting {
        "Working..."
    } else {
        "Tab: switch | Arrows: change theme | Enter: save | Esc: close"
    }
}

fn dialog_block(title: &str, theme: Theme) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), styles::title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style(theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_to_string(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn user() -> User {
        User {
            id: 3,
            username: "alice".to_owned(),
            nickname: "Alice".to_owned(),
            avatar_url: None,
            theme: None,
        }
    }

    #[test]
    fn settings_lines_show_account_nickname_and_theme() {
        let state = SettingsDialog::new("Alice", Theme::Dark);

        let text = lines_to_string(&build_settings_lines(&state, &user(), Theme::Dark));

        assert!(text.contains("@alice"));
        assert!(text.contains("Nickname: Alice"));
        assert!(text.contains("< dark >"));
        assert!(text.contains("Ctrl+L: sign out"));
    }

    #[test]
    fn settings_hint_switches_while_submitting() {
        assert!(settings_action_hint(true).contains("Working"));
        assert!(settings_action_hint(false).contains("Enter: save"));
    }
}
