//! Routes decoded server events into the store and carries out the effects
//! reducers ask for: priming commands and typing-indicator expiry timers.

use std::time::Duration;

use common::types::{ClientCommand, ServerEvent};
use tokio::sync::mpsc;
use tracing::warn;

use crate::store::Store;

/// how long a typing indicator lives without a refresh
pub const TYPING_EXPIRY: Duration = Duration::from_secs(8);

/// the event half of the engine: one per connection, shared with the
/// transport task. must run inside a tokio runtime (expiries are spawned).
#[derive(Clone)]
pub struct Dispatcher {
    store: Store,
    outbound: mpsc::Sender<ClientCommand>,
}

impl Dispatcher {
    pub fn new(store: Store, outbound: mpsc::Sender<ClientCommand>) -> Self {
        Self { store, outbound }
    }

    /// apply one inbound event. the state transition is synchronous; effects
    /// are fire-and-forget.
    pub fn dispatch(&self, event: ServerEvent) {
        let effects = self.store.apply(event);

        for command in effects.commands {
            // the outbound queue is drained by the same loop that calls us,
            // so this must never block; a full queue drops the command
            if self.outbound.try_send(command).is_err() {
                warn!("outbound queue full, dropping priming command");
            }
        }

        if let Some(expiry) = effects.typing_expiry {
            let store = self.store.clone();
            tokio::spawn(async move {
                tokio::time::sleep(TYPING_EXPIRY).await;
                store.expire_typing(&expiry.key, &expiry.nickname, expiry.generation);
            });
        }
    }
}
