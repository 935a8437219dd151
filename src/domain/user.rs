use serde::{Deserialize, Serialize};

/// Theme preference carried in the user profile and the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Returns the next theme in the settings cycle order.
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }
}

/// The authenticated account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub theme: Option<Theme>,
}

impl User {
    /// Display name: nickname when set, username otherwise.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_visits_all_variants() {
        let start = Theme::System;

        assert_eq!(start.next(), Theme::Light);
        assert_eq!(start.next().next(), Theme::Dark);
        assert_eq!(start.next().next().next(), Theme::System);
    }

    #[test]
    fn display_name_prefers_nickname() {
        let user = User {
            id: 1,
            username: "alice".to_owned(),
            nickname: "Alice".to_owned(),
            avatar_url: None,
            theme: None,
        };

        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = User {
            id: 1,
            username: "alice".to_owned(),
            nickname: String::new(),
            avatar_url: None,
            theme: None,
        };

        assert_eq!(user.display_name(), "alice");
    }
}
