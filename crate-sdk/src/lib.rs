//! Client state engine for Concord.
//!
//! One [`Client`] owns one socket, one [`Store`], and one [`ui::UiStore`].
//! Views read through the store's selectors (stable-identity `Arc` snapshots)
//! and mutate only through the typed command methods; everything the server
//! says flows back in through the dispatcher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use common::types::{AttachmentInfo, ClientCommand, CustomEmoji, UserProfile};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

mod commands;
pub mod config;
mod dispatch;
pub mod error;
mod optimistic;
mod rest;
mod storage;
pub mod store;
mod transport;
pub mod ui;

pub use config::ClientConfig;
pub use dispatch::{Dispatcher, TYPING_EXPIRY};
pub use error::{Error, Result};
pub use rest::Rest;
pub use store::{Effects, SearchState, Store, TypingExpiry};

/// bound on commands buffered while the socket is down or still opening
const OUTBOUND_CAPACITY: usize = 256;

pub struct Client {
    config: ClientConfig,
    store: Store,
    ui: ui::UiStore,
    rest: Rest,
    outbound: Mutex<Option<mpsc::Sender<ClientCommand>>>,
    task: Mutex<Option<JoinHandle<()>>>,
    /// bumped on disconnect so in-flight REST results for the old session
    /// never land in a cleared store
    epoch: AtomicU64,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let rest = Rest::new(config.base_url.clone())?;
        let ui = ui::UiStore::load(storage::LocalStorage::new(config.data_dir.clone()));
        Ok(Self {
            config,
            store: Store::new(),
            ui,
            rest,
            outbound: Mutex::new(None),
            task: Mutex::new(None),
            epoch: AtomicU64::new(0),
        })
    }

    /// start the connection loop. idempotent: a second call while the
    /// transport task is alive is a no-op. must be called inside a tokio
    /// runtime.
    pub fn connect(&self, nickname: &str) -> Result<()> {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return Ok(());
        }
        let url = transport::socket_url(&self.config.base_url, nickname)?;
        self.store.set_nickname(nickname);

        let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let dispatcher = Dispatcher::new(self.store.clone(), tx.clone());
        *self.outbound.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        *task = Some(tokio::spawn(transport::run(
            url,
            self.store.clone(),
            dispatcher,
            rx,
        )));
        Ok(())
    }

    /// tear the connection down and clear all server-derived state. the UI
    /// intent store and persisted server folders survive.
    pub fn disconnect(&self) {
        if let Some(task) = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
        *self.outbound.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.store.reset();
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn ui(&self) -> &ui::UiStore {
        &self.ui
    }

    pub fn rest(&self) -> &Rest {
        &self.rest
    }

    /// queue a command for transmission. commands queued while the socket is
    /// reconnecting are flushed on the next open.
    pub(crate) fn send(&self, command: ClientCommand) -> Result<()> {
        let outbound = self.outbound.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = outbound.as_ref() else {
            return Err(Error::NotConnected);
        };
        tx.try_send(command).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => Error::QueueFull,
            mpsc::error::TrySendError::Closed(_) => Error::NotConnected,
        })
    }

    // ── REST collaborators ─────────────────────────────────────────────

    /// upload a file, returning the attachment to reference in a send
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachmentInfo> {
        self.rest.upload(filename, content_type, bytes).await
    }

    /// fetch a public profile over REST (the socket `user_profile` event is
    /// the other source; this one is for lookups before any server is joined)
    pub async fn fetch_user_profile(&self, nickname: &str) -> Result<UserProfile> {
        self.rest.user_profile(nickname).await
    }

    /// fetch a server's custom emoji and merge them into the store
    pub async fn load_custom_emoji(&self, server_id: &str) -> Result<()> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        let emoji: Vec<CustomEmoji> = self.rest.server_emoji(server_id).await?;
        // a disconnect raced the fetch; the result belongs to a dead session
        if self.epoch.load(Ordering::SeqCst) == epoch {
            self.store.set_custom_emoji(server_id, emoji);
        }
        Ok(())
    }
}
