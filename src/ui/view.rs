use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{
    chat::{ChatKind, ChatSummary},
    chat_list_state::ChatListUiState,
    open_chat_state::OpenChatUiState,
    shell_state::{ActivePane, ChatScreenState, NoticeKind, Screen, ShellState},
    user::Theme,
};

use super::{
    auth_view, compose_input, dialog_view,
    message_rendering::{
        build_message_list_elements, element_to_list_item, message_index_to_element_index,
    },
    styles,
};

pub fn render(frame: &mut Frame<'_>, state: &mut ShellState) {
    let theme = state.theme();
    let status = status_line(state);

    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    match &mut state.screen {
        Screen::Auth(auth) => auth_view::render(frame, content_area, auth, theme),
        Screen::Chat(chat) => render_chat_screen(frame, content_area, chat, theme),
    }

    frame.render_widget(Paragraph::new(status), status_area);
}

fn render_chat_screen(
    frame: &mut Frame<'_>,
    area: Rect,
    chat: &mut ChatScreenState,
    theme: Theme,
) {
    let [chats_area, right_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .areas(area);

    // Messages panel plus a 3-row compose box (border + text + border).
    let [messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(right_area);

    render_chat_list_panel(frame, chats_area, chat, theme);
    render_messages_panel(frame, messages_area, chat, theme);
    compose_input::render_compose_input(
        frame,
        input_area,
        &chat.compose,
        chat.active_pane == ActivePane::Compose,
        theme,
    );

    if let Some(dialog) = &chat.dialog {
        dialog_view::render_dialog(frame, dialog, &chat.user, theme);
    }
}

// =============================================================================
// Chat list panel
// =============================================================================

fn render_chat_list_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    chat: &ChatScreenState,
    theme: Theme,
) {
    let border_style = if chat.active_pane == ActivePane::ChatList && chat.dialog.is_none() {
        styles::active_panel_border_style(theme)
    } else {
        styles::inactive_panel_border_style(theme)
    };

    match chat.chat_list.ui_state() {
        ChatListUiState::Loading => {
            render_chat_list_message(frame, area, "Loading chats...", border_style)
        }
        ChatListUiState::Empty => render_chat_list_message(
            frame,
            area,
            "No chats yet. Press 'n' to start one.",
            border_style,
        ),
        ChatListUiState::Error => render_chat_list_message(
            frame,
            area,
            "Failed to load chats. Check connection and press 'r'.",
            border_style,
        ),
        ChatListUiState::Ready => {
            let chats = chat.chat_list.chats();
            let inner_width = area.width.saturating_sub(2) as usize;
            let now_ms = Local::now().timestamp_millis();
            let items: Vec<ListItem<'static>> = chats
                .iter()
                .map(|summary| ListItem::new(chat_row_line(summary, now_ms, inner_width, theme)))
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!("Chats ({})", chats.len()))
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(
                    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
                );

            let mut list_state = ListState::default();
            list_state.select(chat.chat_list.selected_index());
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_chat_list_message(
    frame: &mut Frame<'_>,
    area: Rect,
    message: &str,
    border_style: Style,
) {
    let panel = Paragraph::new(message).block(
        Block::default()
            .title("Chats")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(panel, area);
}

fn chat_row_line(
    summary: &ChatSummary,
    now_ms: i64,
    width: usize,
    theme: Theme,
) -> Line<'static> {
    let timestamp = summary
        .last_message_unix_ms
        .map(|at_ms| format_relative_time(now_ms, at_ms))
        .unwrap_or_default();

    let title = summary.title();
    let group_tag = if summary.kind == ChatKind::Group { "[G] " } else { "" };

    let raw_preview = summary
        .last_message_preview
        .as_deref()
        .map(normalize_preview)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No messages yet".to_owned());

    let fixed_len = 5 + 3 + group_tag.chars().count() + title.chars().count() + 1;
    let available = width.saturating_sub(fixed_len);
    let preview_chars: Vec<char> = raw_preview.chars().collect();
    let preview = if preview_chars.len() <= available {
        raw_preview
    } else {
        let truncated: String = preview_chars
            .iter()
            .take(available.saturating_sub(3))
            .collect();
        format!("{}...", truncated)
    };

    let mut spans = vec![
        Span::styled(format!("{:>5}", timestamp), styles::timestamp_style(theme)),
        Span::styled(" | ".to_owned(), styles::separator_style(theme)),
    ];
    if !group_tag.is_empty() {
        spans.push(Span::styled(group_tag.to_owned(), styles::group_tag_style(theme)));
    }
    spans.push(Span::styled(title, styles::chat_name_style(theme)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(preview, styles::chat_preview_style(theme)));

    Line::from(spans)
}

/// Relative timestamp in the chat list: minutes, then hours, then a date,
/// matching how recently the last message arrived.
fn format_relative_time(now_ms: i64, at_ms: i64) -> String {
    let diff_minutes = (now_ms - at_ms) / 60_000;

    if diff_minutes < 1 {
        return "now".to_owned();
    }
    if diff_minutes < 60 {
        return format!("{}m", diff_minutes);
    }
    if diff_minutes < 24 * 60 {
        return format!("{}h", diff_minutes / 60);
    }

    match Local.timestamp_millis_opt(at_ms) {
        chrono::LocalResult::Single(datetime) | chrono::LocalResult::Ambiguous(datetime, _) => {
            datetime.format("%d.%m").to_string()
        }
        chrono::LocalResult::None => String::new(),
    }
}

fn normalize_preview(preview: &str) -> String {
    preview.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Messages panel
// =============================================================================

fn render_messages_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    chat: &mut ChatScreenState,
    theme: Theme,
) {
    let border_style = if chat.active_pane == ActivePane::Messages && chat.dialog.is_none() {
        styles::active_panel_border_style(theme)
    } else {
        styles::inactive_panel_border_style(theme)
    };

    let title = open_chat_title(chat);

    let placeholder = match chat.open_chat.ui_state() {
        OpenChatUiState::Empty => Some("Select a chat to start messaging"),
        OpenChatUiState::Loading => Some("Loading messages..."),
        OpenChatUiState::Error => Some("Failed to load messages. They will retry shortly."),
        OpenChatUiState::Ready if chat.open_chat.messages().is_empty() => {
            Some("No messages yet. Press 'i' to write the first one.")
        }
        OpenChatUiState::Ready => None,
    };

    if let Some(text) = placeholder {
        let panel = Paragraph::new(text).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(panel, area);
        return;
    }

    let elements = build_message_list_elements(
        chat.open_chat.messages(),
        chat.user.id,
        chat.open_chat.chat_kind(),
    );
    let items: Vec<ListItem<'static>> = elements
        .iter()
        .map(|element| element_to_list_item(element, theme))
        .collect();

    let viewport_height = area.height.saturating_sub(2) as usize;
    let element_index = chat
        .open_chat
        .selected_index()
        .and_then(|message_index| message_index_to_element_index(&elements, message_index));

    if let Some(index) = element_index {
        chat.open_chat.update_scroll_offset(index, viewport_height);
    }
    let scroll_offset = chat.open_chat.scroll_offset();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

    let mut list_state = ListState::default();
    list_state.select(element_index);
    *list_state.offset_mut() = scroll_offset;
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn open_chat_title(chat: &ChatScreenState) -> String {
    if chat.open_chat.is_open() {
        let kind = match chat.open_chat.chat_kind() {
            ChatKind::Group => " (group)",
            ChatKind::Private => "",
        };
        format!("Messages: {}{}", chat.open_chat.chat_title(), kind)
    } else {
        "Messages".to_owned()
    }
}

// =============================================================================
// Status line
// =============================================================================

fn status_line(state: &ShellState) -> Line<'static> {
    let theme = state.theme();

    if let Some(notice) = state.notice() {
        let style = match notice.kind {
            NoticeKind::Info => styles::info_notice_style(theme),
            NoticeKind::Error => styles::error_notice_style(),
        };
        return Line::from(Span::styled(notice.text.clone(), style));
    }

    let hints = match &state.screen {
        Screen::Auth(_) => "Tab: switch field | Enter: submit | Ctrl+C: quit",
        Screen::Chat(chat) => {
            if chat.dialog.is_some() {
                "Enter: confirm | Esc: close"
            } else {
                match chat.active_pane {
                    ActivePane::ChatList => {
                        "j/k: navigate | Enter: open | n: new chat | g: new group | s: settings | r: refresh | q: quit"
                    }
                    ActivePane::Messages => "j/k: scroll | i: write | Esc: back | q: quit",
                    ActivePane::Compose => "Enter: send | Esc: cancel",
                }
            }
        }
    };

    Line::from(Span::styled(hints.to_owned(), styles::hint_style(theme)))
}

/// Centers a fixed-size box inside the given area, clamped to fit.
pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::PeerSummary;

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn private_chat(preview: Option<&str>, at_ms: Option<i64>) -> ChatSummary {
        ChatSummary {
            chat_id: 1,
            kind: ChatKind::Private,
            name: None,
            avatar_url: None,
            owner_id: None,
            last_message_preview: preview.map(ToOwned::to_owned),
            last_message_unix_ms: at_ms,
            peer: Some(PeerSummary {
                id: 7,
                username: "bob".to_owned(),
                nickname: "Bob".to_owned(),
                avatar_url: None,
            }),
        }
    }

    const TEST_WIDTH: usize = 60;

    #[test]
    fn chat_row_includes_title_and_preview() {
        let now = 1_700_000_000_000;
        let line = chat_row_line(
            &private_chat(Some("Hello"), Some(now - 120_000)),
            now,
            TEST_WIDTH,
            Theme::System,
        );
        let text = line_to_string(&line);

        assert!(text.contains("Bob"));
        assert!(text.contains("Hello"));
        assert!(text.contains("2m"));
    }

    #[test]
    fn chat_row_falls_back_to_placeholder_preview() {
        let line = chat_row_line(
            &private_chat(Some("  \n\t "), None),
            1_700_000_000_000,
            TEST_WIDTH,
            Theme::System,
        );

        assert!(line_to_string(&line).contains("No messages yet"));
    }

    #[test]
    fn chat_row_normalizes_preview_whitespace() {
        let line = chat_row_line(
            &private_chat(Some("  Hello\n\n  from\t\tpchat "), None),
            1_700_000_000_000,
            TEST_WIDTH,
            Theme::System,
        );

        assert!(line_to_string(&line).contains("Hello from pchat"));
    }

    #[test]
    fn group_chats_carry_a_group_tag() {
        let summary = ChatSummary {
            chat_id: 2,
            kind: ChatKind::Group,
            name: Some("Backend".to_owned()),
            avatar_url: None,
            owner_id: None,
            last_message_preview: None,
            last_message_unix_ms: None,
            peer: None,
        };

        let line = chat_row_line(&summary, 1_700_000_000_000, TEST_WIDTH, Theme::System);
        let text = line_to_string(&line);

        assert!(text.contains("[G] Backend"));
    }

    #[test]
    fn long_previews_are_truncated_with_ellipsis() {
        let long = "x".repeat(200);
        let line = chat_row_line(
            &private_chat(Some(&long), None),
            1_700_000_000_000,
            40,
            Theme::System,
        );
        let text = line_to_string(&line);

        assert!(text.contains("..."));
        assert!(text.chars().count() <= 40 + 5);
    }

    #[test]
    fn relative_time_steps_from_minutes_to_hours_to_dates() {
        let now = 1_700_000_000_000;

        assert_eq!(format_relative_time(now, now - 30_000), "now");
        assert_eq!(format_relative_time(now, now - 5 * 60_000), "5m");
        assert_eq!(format_relative_time(now, now - 3 * 60 * 60_000), "3h");
        let date = format_relative_time(now, now - 48 * 60 * 60_000);
        assert!(date.contains('.'));
    }

    #[test]
    fn centered_rect_is_clamped_to_the_area() {
        let area = Rect::new(0, 0, 20, 10);

        let rect = centered_rect(area, 100, 100);

        assert_eq!(rect, area);
    }

    #[test]
    fn centered_rect_centers_smaller_boxes() {
        let area = Rect::new(0, 0, 100, 40);

        let rect = centered_rect(area, 50, 10);

        assert_eq!(rect, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn status_line_shows_the_notice_text_when_present() {
        let mut state = ShellState::default();
        state.set_error_notice("Invalid credentials");

        let text = line_to_string(&status_line(&state));

        assert_eq!(text, "Invalid credentials");
    }

    #[test]
    fn status_line_shows_auth_hints_without_a_notice() {
        let state = ShellState::default();

        let text = line_to_string(&status_line(&state));

        assert!(text.contains("Enter: submit"));
    }
}
