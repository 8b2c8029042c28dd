//! A scripted websocket server: records every command the client transmits
//! and pushes whatever events the test wants delivered.

use std::net::SocketAddr;
use std::time::Duration;

use common::types::{ClientCommand, ServerEvent};
use futures_util::{SinkExt, StreamExt};
use sdk::{Client, ClientConfig};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

pub struct MockServer {
    pub addr: SocketAddr,
    commands: mpsc::UnboundedReceiver<ClientCommand>,
    events: mpsc::UnboundedSender<ServerEvent>,
}

impl MockServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<ServerEvent>();

        tokio::spawn(async move {
            // one connection at a time; a reconnecting client is re-accepted
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let Ok(socket) = tokio_tungstenite::accept_async(stream).await else {
                    continue;
                };
                let (mut sink, mut stream) = socket.split();
                loop {
                    tokio::select! {
                        frame = stream.next() => match frame {
                            Some(Ok(WsMessage::Text(text))) => {
                                if let Ok(command) = serde_json::from_str(&text) {
                                    let _ = cmd_tx.send(command);
                                }
                            }
                            Some(Ok(_)) => {}
                            _ => break,
                        },
                        event = evt_rx.recv() => match event {
                            Some(event) => {
                                let json = serde_json::to_string(&event).unwrap();
                                if sink.send(WsMessage::text(json)).await.is_err() {
                                    break;
                                }
                            }
                            None => return,
                        },
                    }
                }
            }
        });

        Self {
            addr,
            commands: cmd_rx,
            events: evt_tx,
        }
    }

    /// deliver an event to the connected client
    pub fn push(&self, event: ServerEvent) {
        self.events.send(event).unwrap();
    }

    /// next command the client transmitted, or panic after two seconds
    pub async fn recv_command(&mut self) -> ClientCommand {
        tokio::time::timeout(Duration::from_secs(2), self.commands.recv())
            .await
            .expect("timed out waiting for a command")
            .expect("server task gone")
    }
}

/// a client pointed at the mock server, with scratch storage
pub fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig {
        base_url: format!("http://{}", server.addr).parse().unwrap(),
        data_dir: std::env::temp_dir().join(format!("concord-test-{}", uuid::Uuid::new_v4())),
    };
    Client::new(config).unwrap()
}

/// poll until `check` passes; panics after two seconds
pub async fn wait_for(check: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !check() {
        if tokio::time::Instant::now() > deadline {
            panic!("condition not reached in time");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
