use serde::{Deserialize, Serialize};

use super::user::{Theme, User};

/// The single persisted record identifying the logged-in party.
///
/// At most one session exists per install; its absence means the
/// authentication screen is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: User,
    pub theme: Theme,
}

impl SessionRecord {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(user: User) -> Self {
        let theme = user.theme.unwrap_or_default();
        Self { user, theme }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_adopts_the_user_theme() {
        let user = User {
            id: 1,
            username: "alice".to_owned(),
            nickname: "Alice".to_owned(),
            avatar_url: None,
            theme: Some(Theme::Dark),
        };

        let session = SessionRecord::new(user);

        assert_eq!(session.theme, Theme::Dark);
    }

    #[test]
    fn new_session_defaults_to_system_theme() {
        let user = User {
            id: 1,
            username: "alice".to_owned(),
            nickname: "Alice".to_owned(),
            avatar_url: None,
            theme: None,
        };

        let session = SessionRecord::new(user);

        assert_eq!(session.theme, Theme::System);
    }
}
