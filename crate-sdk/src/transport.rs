//! The one socket. Connects, reconnects with backoff, drains the outbound
//! command queue, and feeds decoded frames to the dispatcher.

use std::time::Duration;

use common::types::{ClientCommand, ServerEvent};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, warn};
use url::Url;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::store::Store;

const BACKOFF_INITIAL: Duration = Duration::from_secs(1);
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// build the socket url from the http(s) origin: `{ws(s)}://{host}/ws?nickname=…`
pub(crate) fn socket_url(base_url: &Url, nickname: &str) -> Result<Url> {
    let mut url = base_url.join("/ws")?;
    let scheme = if base_url.scheme() == "https" { "wss" } else { "ws" };
    // infallible for ws/wss on an http(s) base
    let _ = url.set_scheme(scheme);
    url.query_pairs_mut().append_pair("nickname", nickname);
    Ok(url)
}

/// the connection loop. runs until the task is aborted by `disconnect`.
///
/// commands sent while the socket is down sit in the channel and are flushed
/// once a connection opens, so a command issued between `connect` and the
/// socket opening is never lost.
pub(crate) async fn run(
    url: Url,
    store: Store,
    dispatcher: Dispatcher,
    mut outbound: mpsc::Receiver<ClientCommand>,
) {
    let mut backoff = BACKOFF_INITIAL;
    loop {
        let mut socket = match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok((socket, _)) => socket,
            Err(err) => {
                warn!(error = %err, "websocket failed to connect, retrying in {backoff:?}");
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(BACKOFF_CAP);
                continue;
            }
        };
        backoff = BACKOFF_INITIAL;
        store.set_connected(true);

        // on-connect priming; everything else is fetched per server once a
        // channel_list arrives
        let hello = serde_json::to_string(&ClientCommand::ListServers)
            .expect("commands always serialize");
        if socket.send(WsMessage::text(hello)).await.is_err() {
            store.set_connected(false);
            continue;
        }

        loop {
            tokio::select! {
                frame = socket.next() => match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        match serde_json::from_str::<ServerEvent>(&text) {
                            Ok(event) => dispatcher.dispatch(event),
                            Err(err) => warn!(error = %err, "dropping malformed frame"),
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        debug!("websocket closed");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!(error = %err, "websocket read error");
                        break;
                    }
                },
                command = outbound.recv() => match command {
                    Some(command) => {
                        let json = serde_json::to_string(&command)
                            .expect("commands always serialize");
                        if socket.send(WsMessage::text(json)).await.is_err() {
                            break;
                        }
                    }
                    // the sender half is gone: the client was dropped
                    None => {
                        store.set_connected(false);
                        return;
                    }
                },
            }
        }

        store.set_connected(false);
        warn!("websocket disconnected, reconnecting in {backoff:?}");
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(BACKOFF_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_url_picks_scheme_and_encodes_nickname() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let url = socket_url(&base, "alice").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8080/ws?nickname=alice");

        let base = Url::parse("https://chat.example.org").unwrap();
        let url = socket_url(&base, "weird name?&").unwrap();
        assert!(url.as_str().starts_with("wss://chat.example.org/ws?nickname="));
        assert!(!url.as_str().contains("name?&"));
    }
}
