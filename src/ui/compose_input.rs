//! Compose box rendering at the bottom of the conversation panel.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{text_field::TextFieldState, user::Theme};

use super::styles;

/// Placeholder shown while the compose box is not focused and empty.
const PLACEHOLDER_TEXT: &str = "Press 'i' to write a message...";

const PROMPT_SYMBOL: &str = "> ";

pub fn render_compose_input(
    frame: &mut Frame<'_>,
    area: Rect,
    input: &TextFieldState,
    focused: bool,
    theme: Theme,
) {
    let border_style = if focused {
        styles::active_panel_border_style(theme)
    } else {
        styles::inactive_panel_border_style(theme)
    };

    let line = build_input_line(input, focused, theme);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);

    if focused {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.width() as u16)
            .saturating_add(cursor_column(input).min(u16::MAX as usize) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Display column of the cursor: character widths, not character counts,
/// so wide glyphs position correctly.
fn cursor_column(input: &TextFieldState) -> usize {
    let prefix: String = input.text().chars().take(input.cursor_position()).collect();
    prefix.width()
}

fn build_input_line(input: &TextFieldState, focused: bool, theme: Theme) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style(theme));

    if !focused && input.is_empty() {
        return Line::from(vec![
            prompt,
            Span::styled(
                PLACEHOLDER_TEXT.to_owned(),
                styles::input_placeholder_style(theme),
            ),
        ]);
    }

    Line::from(vec![
        prompt,
        Span::styled(input.text().to_owned(), styles::input_text_style(theme)),
    ])
}
