//! Conversation rendering logic.
//!
//! Builds the visual element list for the messages panel: date separators
//! between days, sender labels for incoming group messages (grouped across
//! consecutive messages), centered system lines, and read receipts on the
//! current user's messages in private chats.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::{chat::ChatKind, message::Message, user::Theme};

use super::styles;

/// Read state of an outgoing message, derived from the advisory read-by set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    Sent,
    Read,
}

/// One visual element of the messages list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    /// Date separator line between days.
    DateSeparator(String),
    /// Centered informational line produced by the backend.
    System { time: String, text: String },
    Message {
        time: String,
        sender: Option<String>,
        content: String,
        receipt: Option<Receipt>,
    },
}

/// Builds the element list for a conversation.
pub fn build_message_list_elements(
    messages: &[Message],
    current_user_id: i64,
    chat_kind: ChatKind,
) -> Vec<MessageListElement> {
    let mut elements = Vec::new();
    let mut prev_date: Option<chrono::NaiveDate> = None;
    let mut prev_sender: Option<i64> = None;

    for message in messages {
        let msg_date = timestamp_to_date(message.sent_at_unix_ms);

        if prev_date != Some(msg_date) {
            elements.push(MessageListElement::DateSeparator(format_date(msg_date)));
            // A new day restarts sender grouping.
            prev_sender = None;
        }
        prev_date = Some(msg_date);

        if message.is_system {
            elements.push(MessageListElement::System {
                time: format_time(message.sent_at_unix_ms),
                text: message.display_content(),
            });
            prev_sender = None;
            continue;
        }

        let is_outgoing = message.sender_id == current_user_id;

        // Sender labels only for incoming group messages, once per run.
        let sender = if chat_kind == ChatKind::Group
            && !is_outgoing
            && prev_sender != Some(message.sender_id)
        {
            Some(message.sender.display_name().to_owned())
        } else {
            None
        };

        let receipt = if is_outgoing && chat_kind == ChatKind::Private {
            if message.read_by_someone_else() {
                Some(Receipt::Read)
            } else {
                Some(Receipt::Sent)
            }
        } else {
            None
        };

        elements.push(MessageListElement::Message {
            time: format_time(message.sent_at_unix_ms),
            sender,
            content: message.display_content(),
            receipt,
        });
        prev_sender = Some(message.sender_id);
    }

    elements
}

/// Maps a message index to its element index (separators shift positions).
/// System lines count as messages: they occupy selection slots.
pub fn message_index_to_element_index(
    elements: &[MessageListElement],
    message_index: usize,
) -> Option<usize> {
    let mut seen = 0;

    for (element_index, element) in elements.iter().enumerate() {
        if matches!(
            element,
            MessageListElement::Message { .. } | MessageListElement::System { .. }
        ) {
            if seen == message_index {
                return Some(element_index);
            }
            seen += 1;
        }
    }

    None
}

pub fn element_to_list_item(element: &MessageListElement, theme: Theme) -> ListItem<'static> {
    match element {
        MessageListElement::DateSeparator(date) => {
            let line = Line::from(vec![Span::styled(
                format!("--- {} ---", date),
                styles::date_separator_style(theme),
            )])
            .alignment(Alignment::Center);
            ListItem::new(vec![Line::default(), line])
        }
        MessageListElement::System { time, text } => {
            let line = Line::from(vec![
                Span::styled(format!("{:>5} ", time), styles::message_time_style(theme)),
                Span::styled(text.clone(), styles::system_message_style(theme)),
            ])
            .alignment(Alignment::Center);
            ListItem::new(line)
        }
        MessageListElement::Message {
            time,
            sender,
            content,
            receipt,
        } => message_item(time, sender.as_deref(), content, *receipt, theme),
    }
}

fn message_item(
    time: &str,
    sender: Option<&str>,
    content: &str,
    receipt: Option<Receipt>,
    theme: Theme,
) -> ListItem<'static> {
    let mut lines = Vec::new();
    let indent = "      ";

    // Receipts only appear on outgoing messages, which never carry a sender
    // label, so the two cases cannot overlap.
    let receipt_span = receipt.map(|receipt| match receipt {
        Receipt::Read => Span::styled(" \u{2713}\u{2713}", styles::receipt_read_style(theme)),
        Receipt::Sent => Span::styled(" \u{2713}", styles::receipt_sent_style(theme)),
    });

    if let Some(sender) = sender {
        // Header line, then content indented under it.
        lines.push(Line::from(vec![
            Span::styled(format!("{:>5} ", time), styles::message_time_style(theme)),
            Span::styled(sender.to_owned(), styles::message_sender_style(theme)),
        ]));

        for text_line in content.lines() {
            lines.push(Line::from(vec![
                Span::raw(indent.to_owned()),
                Span::styled(text_line.to_owned(), styles::message_text_style(theme)),
            ]));
        }
    } else {
        let mut content_lines = content.lines();
        let first = content_lines.next().unwrap_or_default();

        let mut spans = vec![
            Span::styled(format!("{:>5} ", time), styles::message_time_style(theme)),
            Span::styled(first.to_owned(), styles::message_text_style(theme)),
        ];
        if let Some(receipt_span) = receipt_span {
            spans.push(receipt_span);
        }
        lines.push(Line::from(spans));

        for text_line in content_lines {
            lines.push(Line::from(vec![
                Span::raw(indent.to_owned()),
                Span::styled(text_line.to_owned(), styles::message_text_style(theme)),
            ]));
        }
    }

    ListItem::new(lines)
}

fn timestamp_to_date(timestamp_ms: i64) -> chrono::NaiveDate {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(datetime) | chrono::LocalResult::Ambiguous(datetime, _) => {
            datetime.date_naive()
        }
        chrono::LocalResult::None => chrono::NaiveDate::default(),
    }
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(datetime) | chrono::LocalResult::Ambiguous(datetime, _) => {
            datetime.format("%H:%M").to_string()
        }
        chrono::LocalResult::None => "     ".to_owned(),
    }
}
