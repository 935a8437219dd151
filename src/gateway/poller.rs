//! Repeating-fetch primitive behind the near-real-time views.
//!
//! A poller runs its fetch immediately, then at a fixed interval, until its
//! handle is stopped or dropped. In-flight fetches are not cancelled;
//! results are delivered tagged with the identity they were fetched for and
//! the consumer drops the ones that no longer match. Overlapping fetches are
//! not deduplicated: the last completion wins.

use std::{sync::mpsc::Sender, time::Duration};

use tokio::{runtime::Handle, sync::watch};

use crate::{
    domain::events::PollUpdate,
    gateway::client::GatewayHandle,
    infra::config::PollingConfig,
    usecases::contracts::PollerSpawner,
};

const POLLER_STOPPED: &str = "POLLER_STOPPED";
const POLLER_UPDATE_DROPPED: &str = "POLLER_UPDATE_DROPPED";

/// Handle to a running poll loop. Stopping is synchronous: once `stop`
/// returns, no further fetch is started.
#[derive(Debug)]
pub struct Poller {
    stop_tx: Option<watch::Sender<bool>>,
}

impl Poller {
    /// Spawns the poll loop on the given runtime. The fetch future is built
    /// fresh for every invocation.
    pub fn start<F, Fut>(runtime: &Handle, interval: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        runtime.spawn(async move {
            loop {
                if *stop_rx.borrow() {
                    break;
                }

                fetch().await;

                tokio::select! {
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
            }

            tracing::debug!(code = POLLER_STOPPED, "poll loop exited");
        });

        Self {
            stop_tx: Some(stop_tx),
        }
    }

    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }
    }

    #[cfg(test)]
    pub fn inert() -> Self {
        Self { stop_tx: None }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Builds the two pollers the chat screen attaches to, wired to deliver
/// tagged updates into the UI event channel.
#[derive(Debug)]
pub struct GatewayPollerSpawner {
    gateway: GatewayHandle,
    updates: Sender<PollUpdate>,
    polling: PollingConfig,
}

impl GatewayPollerSpawner {
    pub fn new(gateway: GatewayHandle, updates: Sender<PollUpdate>, polling: PollingConfig) -> Self {
        Self {
            gateway,
            updates,
            polling,
        }
    }
}

impl PollerSpawner for GatewayPollerSpawner {
    fn start_chat_list_poller(&self, user_id: i64) -> Poller {
        let core = self.gateway.core();
        let updates = self.updates.clone();
        let interval = self.polling.chat_list_interval();

        Poller::start(self.gateway.runtime(), interval, move || {
            let core = core.clone();
            let updates = updates.clone();
            async move {
                let result = core.list_chats(user_id).await;
                if updates.send(PollUpdate::ChatList { user_id, result }).is_err() {
                    tracing::debug!(
                        code = POLLER_UPDATE_DROPPED,
                        user_id,
                        "chat list update receiver is gone"
                    );
                }
            }
        })
    }

    fn start_message_poller(&self, chat_id: i64) -> Poller {
        let core = self.gateway.core();
        let updates = self.updates.clone();
        let interval = self.polling.messages_interval();

        Poller::start(self.gateway.runtime(), interval, move || {
            let core = core.clone();
            let updates = updates.clone();
            async move {
                let result = core.load_messages(chat_id).await;
                if updates.send(PollUpdate::Messages { chat_id, result }).is_err() {
                    tracing::debug!(
                        code = POLLER_UPDATE_DROPPED,
                        chat_id,
                        "message update receiver is gone"
                    );
                }
            }
        })
    }
}
