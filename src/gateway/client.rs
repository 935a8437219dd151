use std::sync::Arc;

use reqwest::RequestBuilder;
use tokio::runtime::{Builder, Handle, Runtime};

use crate::{
    domain::{
        chat::{ChatSummary, PeerSummary},
        message::Message,
        remote::{RemoteError, RemoteResult},
        user::User,
    },
    infra::{config::ServerConfig, error::AppError},
    usecases::{
        authenticate::{AuthAction, AuthBackend},
        contracts::{ChatsSource, MessagesSource},
        send_message::MessageSender,
        start_private_chat::{ChatCreator, NewChat, UserDirectory},
        update_profile::{ProfileUpdate, ProfileUpdater},
    },
};

use super::wire;

const GATEWAY_TRANSPORT_FAILED: &str = "GATEWAY_TRANSPORT_FAILED";
const GATEWAY_BODY_READ_FAILED: &str = "GATEWAY_BODY_READ_FAILED";

/// Synchronous facade over the async HTTP client.
///
/// Owns the tokio runtime: interactive operations block the UI loop for one
/// round-trip, pollers run as background tasks on the same runtime.
#[derive(Debug)]
pub struct HttpGateway {
    rt: Runtime,
    core: Arc<GatewayCore>,
}

impl HttpGateway {
    pub fn new(server: &ServerConfig) -> Result<Self, AppError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|source| AppError::GatewayInit {
                details: format!("async runtime: {source}"),
            })?;

        let http = reqwest::Client::builder()
            .timeout(server.request_timeout())
            .build()
            .map_err(|source| AppError::GatewayInit {
                details: format!("http client: {source}"),
            })?;

        let core = Arc::new(GatewayCore {
            http,
            endpoints: Endpoints::from_base(&server.base_url),
        });

        Ok(Self { rt, core })
    }

    /// Cheap clonable handle for callers that outlive this borrow. The
    /// gateway itself must stay alive: it owns the runtime.
    pub fn handle(&self) -> GatewayHandle {
        GatewayHandle {
            core: Arc::clone(&self.core),
            runtime: self.rt.handle().clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayHandle {
    core: Arc<GatewayCore>,
    runtime: Handle,
}

impl GatewayHandle {
    pub(super) fn core(&self) -> Arc<GatewayCore> {
        Arc::clone(&self.core)
    }

    pub(super) fn runtime(&self) -> &Handle {
        &self.runtime
    }
}

impl AuthBackend for GatewayHandle {
    fn authenticate(
        &self,
        action: AuthAction,
        username: &str,
        password: &str,
    ) -> RemoteResult<User> {
        self.runtime
            .block_on(self.core.authenticate(action, username, password))
    }
}

impl ChatsSource for GatewayHandle {
    fn list_chats(&self, user_id: i64) -> RemoteResult<Vec<ChatSummary>> {
        self.runtime.block_on(self.core.list_chats(user_id))
    }
}

impl MessagesSource for GatewayHandle {
    fn load_messages(&self, chat_id: i64) -> RemoteResult<Vec<Message>> {
        self.runtime.block_on(self.core.load_messages(chat_id))
    }
}

impl MessageSender for GatewayHandle {
    fn send_message(&self, chat_id: i64, sender_id: i64, content: &str) -> RemoteResult<()> {
        self.runtime
            .block_on(self.core.send_message(chat_id, sender_id, content))
    }
}

impl UserDirectory for GatewayHandle {
    fn lookup_user(&self, username: &str) -> RemoteResult<Option<PeerSummary>> {
        self.runtime.block_on(self.core.lookup_user(username))
    }
}

impl ChatCreator for GatewayHandle {
    fn create_chat(&self, new_chat: &NewChat) -> RemoteResult<()> {
        self.runtime.block_on(self.core.create_chat(new_chat))
    }
}

impl ProfileUpdater for GatewayHandle {
    fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> RemoteResult<()> {
        self.runtime
            .block_on(self.core.update_profile(user_id, update))
    }
}

/// One URL per backend capability, derived from the configured base.
#[derive(Debug, Clone)]
struct Endpoints {
    auth: String,
    chats: String,
    messages: String,
    users: String,
    profile: String,
}

impl Endpoints {
    fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            auth: format!("{base}/auth"),
            chats: format!("{base}/chats"),
            messages: format!("{base}/messages"),
            users: format!("{base}/users"),
            profile: format!("{base}/profile"),
        }
    }
}

#[derive(Debug)]
pub(super) struct GatewayCore {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl GatewayCore {
    pub(super) async fn authenticate(
        &self,
        action: AuthAction,
        username: &str,
        password: &str,
    ) -> RemoteResult<User> {
        let request = self.http.post(&self.endpoints.auth).json(&wire::AuthRequest {
            action: action.as_wire_action(),
            username,
            password,
        });

        let body = self.request_text(request, "authenticate").await?;
        wire::decode_auth_response(&body)
    }

    pub(super) async fn list_chats(&self, user_id: i64) -> RemoteResult<Vec<ChatSummary>> {
        let request = self
            .http
            .get(&self.endpoints.chats)
            .query(&[("user_id", user_id)]);

        let body = self.request_text(request, "list_chats").await?;
        wire::decode_chats_response(&body)
    }

    pub(super) async fn load_messages(&self, chat_id: i64) -> RemoteResult<Vec<Message>> {
        let request = self
            .http
            .get(&self.endpoints.messages)
            .query(&[("chat_id", chat_id)]);

        let body = self.request_text(request, "load_messages").await?;
        wire::decode_messages_response(&body)
    }

    pub(super) async fn send_message(
        &self,
        chat_id: i64,
        sender_id: i64,
        content: &str,
    ) -> RemoteResult<()> {
        let request = self
            .http
            .post(&self.endpoints.messages)
            .json(&wire::SendMessageRequest {
                chat_id,
                sender_id,
                content,
            });

        let body = self.request_text(request, "send_message").await?;
        wire::decode_ack_response(&body)
    }

    pub(super) async fn lookup_user(&self, username: &str) -> RemoteResult<Option<PeerSummary>> {
        let request = self
            .http
            .get(&self.endpoints.users)
            .query(&[("username", username)]);

        let body = self.request_text(request, "lookup_user").await?;
        wire::decode_lookup_response(&body)
    }

    pub(super) async fn create_chat(&self, new_chat: &NewChat) -> RemoteResult<()> {
        let request = self
            .http
            .post(&self.endpoints.chats)
            .json(&wire::CreateChatRequest {
                kind: new_chat.kind.as_label(),
                creator_id: new_chat.creator_id,
                member_ids: new_chat.member_ids.clone(),
                name: new_chat.name.as_deref(),
            });

        let body = self.request_text(request, "create_chat").await?;
        wire::decode_ack_response(&body)
    }

    pub(super) async fn update_profile(
        &self,
        user_id: i64,
        update: &ProfileUpdate,
    ) -> RemoteResult<()> {
        let request = self
            .http
            .put(&self.endpoints.profile)
            .json(&wire::UpdateProfileRequest {
                user_id,
                nickname: update.nickname.as_deref(),
                avatar_url: update.avatar_url.as_deref(),
                theme: update.theme.map(|theme| theme.as_label()),
                hide_online_status: update.hide_online_status,
            });

        let body = self.request_text(request, "update_profile").await?;
        wire::decode_ack_response(&body)
    }

    /// Sends the request and reads the body. Anything that keeps the
    /// response from arriving intact is `Unreachable`.
    async fn request_text(&self, request: RequestBuilder, op: &'static str) -> RemoteResult<String> {
        let response = request.send().await.map_err(|error| {
            tracing::warn!(
                code = GATEWAY_TRANSPORT_FAILED,
                op,
                error = %error,
                "request failed to complete"
            );
            RemoteError::Unreachable
        })?;

        response.text().await.map_err(|error| {
            tracing::warn!(
                code = GATEWAY_BODY_READ_FAILED,
                op,
                error = %error,
                "response body could not be read"
            );
            RemoteError::Unreachable
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_derive_from_base_url() {
        let endpoints = Endpoints::from_base("http://chat.example.test");

        assert_eq!(endpoints.auth, "http://chat.example.test/auth");
        assert_eq!(endpoints.profile, "http://chat.example.test/profile");
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let endpoints = Endpoints::from_base("http://chat.example.test/");

        assert_eq!(endpoints.chats, "http://chat.example.test/chats");
        assert_eq!(endpoints.users, "http://chat.example.test/users");
        assert_eq!(endpoints.messages, "http://chat.example.test/messages");
    }
}
