use std::{sync::mpsc::Receiver, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput, PollUpdate},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Keyboard events from the terminal. Quitting by key is contextual (typing
/// 'q' into a field must not exit), so only Ctrl+C maps to a quit here.
#[derive(Default)]
pub struct CrosstermEventSource;

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            if key.code == KeyCode::Char('c') && ctrl {
                return Ok(Some(AppEvent::QuitRequested));
            }

            let name = match key.code {
                KeyCode::Char(ch) => ch.to_string(),
                KeyCode::Enter => "enter".to_owned(),
                KeyCode::Esc => "esc".to_owned(),
                KeyCode::Backspace => "backspace".to_owned(),
                KeyCode::Delete => "delete".to_owned(),
                KeyCode::Tab => "tab".to_owned(),
                KeyCode::Left => "left".to_owned(),
                KeyCode::Right => "right".to_owned(),
                KeyCode::Up => "up".to_owned(),
                KeyCode::Down => "down".to_owned(),
                KeyCode::Home => "home".to_owned(),
                KeyCode::End => "end".to_owned(),
                _ => return Ok(None),
            };

            return Ok(Some(AppEvent::InputKey(KeyInput::new(name, ctrl))));
        }

        Ok(None)
    }
}

/// Poll results delivered by the background pollers.
pub struct ChannelPollSource {
    updates: Receiver<PollUpdate>,
}

impl ChannelPollSource {
    pub fn new(updates: Receiver<PollUpdate>) -> Self {
        Self { updates }
    }
}

impl AppEventSource for ChannelPollSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.updates.try_recv().ok().map(AppEvent::Poll))
    }
}

/// Drains poll updates before blocking on the keyboard so fetched data shows
/// up without waiting for a keypress.
pub struct CompositeEventSource {
    polls: ChannelPollSource,
    keys: CrosstermEventSource,
}

impl CompositeEventSource {
    pub fn new(polls: ChannelPollSource) -> Self {
        Self {
            polls,
            keys: CrosstermEventSource,
        }
    }
}

impl AppEventSource for CompositeEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.polls.next_event()? {
            return Ok(Some(event));
        }

        self.keys.next_event()
    }
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crate::domain::remote::RemoteError;

    #[test]
    fn channel_source_returns_nothing_when_empty() {
        let (_tx, rx) = mpsc::channel();
        let mut source = ChannelPollSource::new(rx);

        let event = source.next_event().expect("source must not fail");

        assert_eq!(event, None);
    }

    #[test]
    fn channel_source_delivers_poll_updates_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut source = ChannelPollSource::new(rx);

        tx.send(PollUpdate::ChatList {
            user_id: 3,
            result: Ok(vec![]),
        })
        .expect("send must succeed");
        tx.send(PollUpdate::Messages {
            chat_id: 1,
            result: Err(RemoteError::Unreachable),
        })
        .expect("send must succeed");

        assert!(matches!(
            source.next_event().expect("must read"),
            Some(AppEvent::Poll(PollUpdate::ChatList { user_id: 3, .. }))
        ));
        assert!(matches!(
            source.next_event().expect("must read"),
            Some(AppEvent::Poll(PollUpdate::Messages { chat_id: 1, .. }))
        ));
        assert_eq!(source.next_event().expect("must read"), None);
    }
}
