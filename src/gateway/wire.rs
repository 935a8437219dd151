//! Wire-level request/response shapes and outcome classification.
//!
//! Every decoder follows the same rule: a body that does not parse as JSON
//! is `Unreachable`; a parsed body without the expected payload is
//! `Rejected` carrying the server's `error` string when present.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    chat::{ChatKind, ChatSummary, PeerSummary},
    message::{Message, MessageKind, SenderSummary},
    remote::{RemoteError, RemoteResult},
    user::{Theme, User},
};

/// Fallback reason when the server declines without an `error` string.
const GENERIC_REJECTION: &str = "The server rejected the request";

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Serialize)]
pub(super) struct AuthRequest<'a> {
    pub action: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateChatRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub creator_id: i64,
    pub member_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateProfileRequest<'a> {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_online_status: Option<bool>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    success: bool,
    user: Option<WireUser>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatsResponse {
    chats: Option<Vec<WireChat>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    messages: Option<Vec<WireMessage>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: i64,
    username: String,
    nickname: Option<String>,
    avatar_url: Option<String>,
    theme: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChat {
    id: i64,
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
    owner_id: Option<i64>,
    last_message: Option<String>,
    last_message_time: Option<String>,
    other_user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: i64,
    chat_id: i64,
    sender_id: Option<i64>,
    content: Option<String>,
    message_type: Option<String>,
    file_url: Option<String>,
    #[serde(default)]
    is_system: bool,
    read_by: Option<Vec<i64>>,
    created_at: Option<String>,
    sender: Option<WireSender>,
}

#[derive(Debug, Deserialize)]
struct WireSender {
    username: Option<String>,
    nickname: Option<String>,
    avatar_url: Option<String>,
}

// =============================================================================
// Classification
// =============================================================================

pub(super) fn decode_auth_response(body: &str) -> RemoteResult<User> {
    let response: AuthResponse = parse(body)?;

    match (response.success, response.user) {
        (true, Some(user)) => Ok(user.into_user()),
        _ => Err(rejected(response.error)),
    }
}

pub(super) fn decode_chats_response(body: &str) -> RemoteResult<Vec<ChatSummary>> {
    let response: ChatsResponse = parse(body)?;

    match response.chats {
        Some(chats) => Ok(chats.into_iter().map(WireChat::into_summary).collect()),
        None => Err(rejected(response.error)),
    }
}

pub(super) fn decode_messages_response(body: &str) -> RemoteResult<Vec<Message>> {
    let response: MessagesResponse = parse(body)?;

    match response.messages {
        Some(messages) => Ok(messages.into_iter().map(WireMessage::into_message).collect()),
        None => Err(rejected(response.error)),
    }
}

pub(super) fn decode_ack_response(body: &str) -> RemoteResult<()> {
    let response: AckResponse = parse(body)?;

    if response.success {
        Ok(())
    } else {
        Err(rejected(response.error))
    }
}

/// A parsed body without a `user` field means "no such user", which is a
/// normal lookup outcome rather than a fault.
pub(super) fn decode_lookup_response(body: &str) -> RemoteResult<Option<PeerSummary>> {
    let response: LookupResponse = parse(body)?;

    Ok(response.user.map(WireUser::into_peer))
}

fn parse<'a, T: Deserialize<'a>>(body: &'a str) -> RemoteResult<T> {
    serde_json::from_str(body).map_err(|error| {
        tracing::warn!(error = %error, "response body failed to parse");
        RemoteError::Unreachable
    })
}

fn rejected(reason: Option<String>) -> RemoteError {
    RemoteError::Rejected(reason.unwrap_or_else(|| GENERIC_REJECTION.to_owned()))
}

// =============================================================================
// Conversions
// =============================================================================

impl WireUser {
    fn into_user(self) -> User {
        let theme = self.theme.as_deref().and_then(parse_theme);
        User {
            id: self.id,
            username: self.username,
            nickname: self.nickname.unwrap_or_default(),
            avatar_url: self.avatar_url,
            theme,
        }
    }

    fn into_peer(self) -> PeerSummary {
        PeerSummary {
            id: self.id,
            username: self.username,
            nickname: self.nickname.unwrap_or_default(),
            avatar_url: self.avatar_url,
        }
    }
}

impl WireChat {
    fn into_summary(self) -> ChatSummary {
        let kind = match self.kind.as_deref() {
            Some("group") => ChatKind::Group,
            _ => ChatKind::Private,
        };

        ChatSummary {
            chat_id: self.id,
            kind,
            name: self.name,
            avatar_url: self.avatar_url,
            owner_id: self.owner_id,
            last_message_preview: self.last_message,
            last_message_unix_ms: self.last_message_time.as_deref().and_then(parse_timestamp),
            peer: self.other_user.map(WireUser::into_peer),
        }
    }
}

impl WireMessage {
    fn into_message(self) -> Message {
        let kind = match (self.message_type.as_deref(), self.file_url.as_deref()) {
            (Some("text") | None, None) => MessageKind::Text,
            (Some("file"), _) | (_, Some(_)) => MessageKind::File,
            _ => MessageKind::Unknown,
        };

        let sender = self.sender.map(WireSender::into_summary).unwrap_or_else(|| {
            SenderSummary {
                username: String::new(),
                nickname: String::new(),
                avatar_url: None,
            }
        });

        Message {
            id: self.id,
            chat_id: self.chat_id,
            sender_id: self.sender_id.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            kind,
            is_system: self.is_system,
            read_by: self.read_by.unwrap_or_default(),
            sent_at_unix_ms: self.created_at.as_deref().and_then(parse_timestamp).unwrap_or(0),
            sender,
        }
    }
}

impl WireSender {
    fn into_summary(self) -> SenderSummary {
        SenderSummary {
            username: self.username.unwrap_or_default(),
            nickname: self.nickname.unwrap_or_default(),
            avatar_url: self.avatar_url,
        }
    }
}

fn parse_theme(raw: &str) -> Option<Theme> {
    match raw {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        "system" => Some(Theme::System),
        _ => None,
    }
}

/// Parses a backend timestamp (RFC 3339 or a bare ISO datetime treated as
/// UTC) into unix milliseconds.
fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_success_yields_the_user() {
        let body = r#"{"success": true, "user": {"id": 3, "username": "alice", "nickname": "Alice", "avatar_url": null, "theme": "dark"}}"#;

        let user = decode_auth_response(body).expect("auth should succeed");

        assert_eq!(user.id, 3);
        assert_eq!(user.username, "alice");
        assert_eq!(user.theme, Some(Theme::Dark));
    }

    #[test]
    fn auth_decline_carries_the_server_reason() {
        let body = r#"{"error": "Invalid credentials"}"#;

        let error = decode_auth_response(body).expect_err("auth should be rejected");

        assert_eq!(error, RemoteError::Rejected("Invalid credentials".to_owned()));
    }

    #[test]
    fn auth_decline_without_reason_uses_generic_text() {
        let body = r#"{"success": false}"#;

        let error = decode_auth_response(body).expect_err("auth should be rejected");

        assert_eq!(
            error,
            RemoteError::Rejected(GENERIC_REJECTION.to_owned())
        );
    }

    #[test]
    fn unparseable_body_is_unreachable() {
        let error = decode_auth_response("<html>bad gateway</html>")
            .expect_err("parse failure should surface");

        assert_eq!(error, RemoteError::Unreachable);
    }

    #[test]
    fn chats_payload_maps_private_and_group_entries() {
        let body = r#"{"chats": [
            {"id": 1, "type": "private", "name": null,
             "other_user": {"id": 7, "username": "bob", "nickname": "Bob"},
             "last_message": "hi", "last_message_time": "2026-02-14T10:30:00"},
            {"id": 2, "type": "group", "name": "Backend"}
        ]}"#;

        let chats = decode_chats_response(body).expect("chats should decode");

        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].kind, ChatKind::Private);
        assert_eq!(chats[0].title(), "Bob");
        assert_eq!(chats[0].last_message_preview.as_deref(), Some("hi"));
        assert!(chats[0].last_message_unix_ms.is_some());
        assert_eq!(chats[1].kind, ChatKind::Group);
        assert_eq!(chats[1].title(), "Backend");
    }

    #[test]
    fn chats_error_body_is_rejected() {
        let error = decode_chats_response(r#"{"error": "user_id required"}"#)
            .expect_err("error body should reject");

        assert_eq!(error, RemoteError::Rejected("user_id required".to_owned()));
    }

    #[test]
    fn messages_payload_maps_fields_and_read_by() {
        let body = r#"{"messages": [
            {"id": 10, "chat_id": 1, "sender_id": 3, "content": "hello",
             "message_type": "text", "is_system": false, "read_by": [3, 7],
             "created_at": "2026-02-14T10:30:00.123",
             "sender": {"username": "alice", "nickname": "Alice"}}
        ]}"#;

        let messages = decode_messages_response(body).expect("messages should decode");

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].read_by, vec![3, 7]);
        assert!(messages[0].read_by_someone_else());
        assert_eq!(messages[0].sender.display_name(), "Alice");
    }

    #[test]
    fn message_with_file_url_gets_the_file_kind() {
        let body = r#"{"messages": [
            {"id": 10, "chat_id": 1, "sender_id": 3, "content": "scan.pdf",
             "message_type": "file", "file_url": "https://example.test/scan.pdf"}
        ]}"#;

        let messages = decode_messages_response(body).expect("messages should decode");

        assert_eq!(messages[0].kind, MessageKind::File);
    }

    #[test]
    fn system_message_without_sender_decodes() {
        let body = r#"{"messages": [
            {"id": 10, "chat_id": 1, "sender_id": null, "content": "group created",
             "is_system": true, "sender": {"username": null, "nickname": null}}
        ]}"#;

        let messages = decode_messages_response(body).expect("messages should decode");

        assert!(messages[0].is_system);
        assert_eq!(messages[0].sender_id, 0);
    }

    #[test]
    fn ack_success_is_ok() {
        assert_eq!(decode_ack_response(r#"{"success": true}"#), Ok(()));
    }

    #[test]
    fn ack_failure_is_rejected_with_reason() {
        let error = decode_ack_response(r#"{"success": false, "error": "chat_id required"}"#)
            .expect_err("failed ack should reject");

        assert_eq!(error, RemoteError::Rejected("chat_id required".to_owned()));
    }

    #[test]
    fn lookup_with_user_yields_the_peer() {
        let body = r#"{"user": {"id": 7, "username": "bob", "nickname": "Bob"}}"#;

        let peer = decode_lookup_response(body).expect("lookup should decode");

        assert_eq!(peer.map(|p| p.id), Some(7));
    }

    #[test]
    fn lookup_without_user_is_a_miss_not_a_fault() {
        let peer = decode_lookup_response(r#"{"error": "User not found"}"#)
            .expect("missing user should not be an error");

        assert_eq!(peer, None);
    }

    #[test]
    fn timestamps_parse_with_and_without_offset() {
        assert_eq!(
            parse_timestamp("1970-01-01T00:00:01+00:00"),
            Some(1_000)
        );
        assert_eq!(parse_timestamp("1970-01-01T00:00:01"), Some(1_000));
        assert_eq!(parse_timestamp("1970-01-01T00:00:01.500"), Some(1_500));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn create_chat_request_omits_absent_name() {
        let request = CreateChatRequest {
            kind: "private",
            creator_id: 3,
            member_ids: vec![7],
            name: None,
        };

        let json = serde_json::to_string(&request).expect("request should serialize");

        assert!(json.contains(r#""type":"private""#));
        assert!(!json.contains("name"));
    }

    #[test]
    fn update_profile_request_serializes_only_changed_fields() {
        let request = UpdateProfileRequest {
            user_id: 3,
            nickname: Some("Alice"),
            avatar_url: None,
            theme: Some("dark"),
            hide_online_status: None,
        };

        let json = serde_json::to_string(&request).expect("request should serialize");

        assert!(json.contains(r#""nickname":"Alice""#));
        assert!(json.contains(r#""theme":"dark""#));
        assert!(!json.contains("avatar_url"));
        assert!(!json.contains("hide_online_status"));
    }
}
