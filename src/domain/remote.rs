//! The classified outcome of one backend request.
//!
//! Every gateway operation resolves to exactly one of three results: the
//! payload, an explicit refusal carrying the server's reason, or a transport
//! failure. View models branch on this closed set instead of inspecting
//! response shapes.

/// Failure half of a gateway outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The backend responded but declined the request. The reason is shown
    /// to the user verbatim.
    Rejected(String),
    /// The request never completed: connection refused, timeout, or a
    /// response the client could not parse.
    Unreachable,
}

pub type RemoteResult<T> = Result<T, RemoteError>;

impl RemoteError {
    /// Message rendered in the notice line for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(reason) => reason.clone(),
            Self::Unreachable => "Could not reach the server".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_the_server_reason_verbatim() {
        let error = RemoteError::Rejected("Username already exists".to_owned());

        assert_eq!(error.user_message(), "Username already exists");
    }

    #[test]
    fn unreachable_message_is_generic() {
        assert_eq!(
            RemoteError::Unreachable.user_message(),
            "Could not reach the server"
        );
    }
}
