//! Use case for logging in or registering against the backend.
//!
//! Credentials are validated client-side before any request goes out:
//! validation failures never reach the network.

use crate::domain::{
    remote::{RemoteError, RemoteResult},
    user::User,
};

const MIN_PASSWORD_LENGTH: usize = 7;

/// The two authentication actions the backend knows.
///
/// The auth screen's reset mode has no wired backend call and therefore no
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    pub fn as_wire_action(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticateError {
    EmptyUsername,
    EmptyPassword,
    PasswordTooShort,
    PasswordNeedsDigit,
    Rejected(String),
    Unreachable,
}

impl AuthenticateError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyUsername => "Username is required".to_owned(),
            Self::EmptyPassword => "Password is required".to_owned(),
            Self::PasswordTooShort => {
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters")
            }
            Self::PasswordNeedsDigit => "Password must contain at least one digit".to_owned(),
            Self::Rejected(reason) => reason.clone(),
            Self::Unreachable => "Could not reach the server".to_owned(),
        }
    }
}

/// Performs the authentication request.
pub trait AuthBackend {
    fn authenticate(
        &self,
        action: AuthAction,
        username: &str,
        password: &str,
    ) -> RemoteResult<User>;
}

/// Validates credentials and dispatches the login/register request.
pub fn authenticate(
    backend: &dyn AuthBackend,
    action: AuthAction,
    username: &str,
    password: &str,
) -> Result<User, AuthenticateError> {
    let username = username.trim();
    validate_credentials(username, password)?;

    backend
        .authenticate(action, username, password)
        .map_err(map_remote_error)
}

fn validate_credentials(username: &str, password: &str) -> Result<(), AuthenticateError> {
    if username.is_empty() {
        return Err(AuthenticateError::EmptyUsername);
    }
    if password.is_empty() {
        return Err(AuthenticateError::EmptyPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthenticateError::PasswordTooShort);
    }
    if !password.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(AuthenticateError::PasswordNeedsDigit);
    }

    Ok(())
}

fn map_remote_error(error: RemoteError) -> AuthenticateError {
    match error {
        RemoteError::Rejected(reason) => AuthenticateError::Rejected(reason),
        RemoteError::Unreachable => AuthenticateError::Unreachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct StubBackend {
        result: RemoteResult<User>,
        captured: RefCell<Option<(AuthAction, String, String)>>,
    }

    impl StubBackend {
        fn with_result(result: RemoteResult<User>) -> Self {
            Self {
                result,
                captured: RefCell::new(None),
            }
        }

        fn was_called(&self) -> bool {
            self.captured.borrow().is_some()
        }
    }

    impl AuthBackend for StubBackend {
        fn authenticate(
            &self,
            action: AuthAction,
            username: &str,
            password: &str,
        ) -> RemoteResult<User> {
            *self.captured.borrow_mut() =
                Some((action, username.to_owned(), password.to_owned()));
            self.result.clone()
        }
    }

    fn user() -> User {
        User {
            id: 3,
            username: "alice".to_owned(),
            nickname: "alice".to_owned(),
            avatar_url: None,
            theme: None,
        }
    }

    #[test]
    fn valid_credentials_reach_the_backend() {
        let backend = StubBackend::with_result(Ok(user()));

        let result = authenticate(&backend, AuthAction::Register, "alice", "abc1234");

        assert_eq!(result, Ok(user()));
        let captured = backend.captured.borrow();
        let (action, username, password) = captured.as_ref().expect("backend must be called");
        assert_eq!(*action, AuthAction::Register);
        assert_eq!(username, "alice");
        assert_eq!(password, "abc1234");
    }

    #[test]
    fn username_is_trimmed_before_dispatch() {
        let backend = StubBackend::with_result(Ok(user()));

        let _ = authenticate(&backend, AuthAction::Login, "  alice  ", "abc1234");

        let captured = backend.captured.borrow();
        assert_eq!(captured.as_ref().expect("must be called").1, "alice");
    }

    #[test]
    fn empty_username_short_circuits() {
        let backend = StubBackend::with_result(Ok(user()));

        let result = authenticate(&backend, AuthAction::Login, "   ", "abc1234");

        assert_eq!(result, Err(AuthenticateError::EmptyUsername));
        assert!(!backend.was_called());
    }

    #[test]
    fn empty_password_short_circuits() {
        let backend = StubBackend::with_result(Ok(user()));

        let result = authenticate(&backend, AuthAction::Login, "alice", "");

        assert_eq!(result, Err(AuthenticateError::EmptyPassword));
        assert!(!backend.was_called());
    }

    #[test]
    fn short_password_is_blocked_without_a_request() {
        let backend = StubBackend::with_result(Ok(user()));

        let result = authenticate(&backend, AuthAction::Register, "alice", "abc123");

        assert_eq!(result, Err(AuthenticateError::PasswordTooShort));
        assert!(!backend.was_called());
    }

    #[test]
    fn password_without_digit_is_blocked_without_a_request() {
        let backend = StubBackend::with_result(Ok(user()));

        let result = authenticate(&backend, AuthAction::Register, "alice", "abcdefg");

        assert_eq!(result, Err(AuthenticateError::PasswordNeedsDigit));
        assert!(!backend.was_called());
    }

    #[test]
    fn seven_characters_with_digit_passes_validation() {
        let backend = StubBackend::with_result(Ok(user()));

        let result = authenticate(&backend, AuthAction::Login, "alice", "abcdef1");

        assert!(result.is_ok());
        assert!(backend.was_called());
    }

    #[test]
    fn rejection_carries_the_server_reason() {
        let backend =
            StubBackend::with_result(Err(RemoteError::Rejected("Invalid credentials".to_owned())));

        let result = authenticate(&backend, AuthAction::Login, "alice", "abc1234");

        assert_eq!(
            result,
            Err(AuthenticateError::Rejected("Invalid credentials".to_owned()))
        );
    }

    #[test]
    fn transport_failure_maps_to_unreachable() {
        let backend = StubBackend::with_result(Err(RemoteError::Unreachable));

        let result = authenticate(&backend, AuthAction::Login, "alice", "abc1234");

        assert_eq!(result, Err(AuthenticateError::Unreachable));
    }
}
