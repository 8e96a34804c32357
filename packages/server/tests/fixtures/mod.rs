//! Shared helpers for the integration tests: an in-process server on an
//! ephemeral port and a WebSocket test client.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use madang_server::{
    config::ServerConfig,
    ui::{AppState, Server},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

/// How long to wait for an expected event
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before concluding that no event is coming
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Helper struct to manage the server lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with the default configuration
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    /// Start a server on 127.0.0.1 with an ephemeral port
    pub async fn start_with(config: ServerConfig) -> Self {
        let state = AppState::from_config(&config).expect("valid test configuration");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            Server::new(state)
                .serve(listener, async {
                    let _ = signal.await;
                })
                .await
                .unwrap();
        });

        TestServer {
            addr,
            shutdown: Some(shutdown),
            handle,
        }
    }

    /// Start a server that requires authentication, seeded with `(token, nickname)` sessions
    pub async fn start_with_auth(sessions: &[(&str, &str)]) -> Self {
        Self::start_with(ServerConfig {
            require_auth: true,
            sessions: sessions
                .iter()
                .map(|(token, nickname)| (token.to_string(), nickname.to_string()))
                .collect(),
            ..ServerConfig::default()
        })
        .await
    }

    /// WebSocket URL, optionally carrying a session token
    pub fn ws_url(&self, session: Option<&str>) -> String {
        match session {
            Some(token) => format!("ws://{}/ws?session={}", self.addr, token),
            None => format!("ws://{}/ws", self.addr),
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Connect a WebSocket client
    pub async fn connect(&self, session: Option<&str>) -> TestClient {
        TestClient::connect(&self.ws_url(session)).await
    }

    /// GET a JSON document
    pub async fn get_json(&self, path: &str) -> Value {
        let response = reqwest::get(self.http_url(path)).await.unwrap();
        assert!(
            response.status().is_success(),
            "GET {} failed: {}",
            path,
            response.status()
        );
        response.json().await.unwrap()
    }

    /// Current presence (the `room_users_update` payload)
    pub async fn presence(&self) -> Value {
        self.get_json("/debug/presence").await
    }

    /// Poll the presence endpoint until `condition` holds
    pub async fn wait_for_presence(&self, condition: impl Fn(&Value) -> bool) -> Value {
        let deadline = tokio::time::Instant::now() + EVENT_TIMEOUT;
        loop {
            let presence = self.presence().await;
            if condition(&presence) {
                return presence;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "presence did not converge: {}",
                presence
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

/// WebSocket test client speaking the JSON event protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    pub async fn send_json(&mut self, value: Value) {
        self.stream
            .send(Message::Text(value.to_string().into()))
            .await
            .unwrap();
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .unwrap();
    }

    pub async fn join(&mut self, room: &str, user: &str) {
        self.send_json(json!({"type": "join", "room": room, "user": user}))
            .await;
    }

    pub async fn leave(&mut self, room: &str) {
        self.send_json(json!({"type": "leave", "room": room})).await;
    }

    pub async fn send_message(&mut self, room: &str, msg: &str) {
        self.send_json(json!({"type": "send_message", "room": room, "msg": msg}))
            .await;
    }

    /// Next JSON event; `None` on close or timeout
    pub async fn next_event(&mut self) -> Option<Value> {
        loop {
            let frame = tokio::time::timeout(EVENT_TIMEOUT, self.stream.next())
                .await
                .ok()??;
            match frame {
                Ok(Message::Text(text)) => {
                    return Some(serde_json::from_str(text.as_str()).expect("event is JSON"));
                }
                Ok(Message::Close(_)) | Err(_) => return None,
                Ok(_) => continue,
            }
        }
    }

    /// Next event of the given `type`, skipping others
    pub async fn next_event_of(&mut self, event_type: &str) -> Value {
        loop {
            let event = self
                .next_event()
                .await
                .unwrap_or_else(|| panic!("no '{}' event received", event_type));
            if event["type"] == event_type {
                return event;
            }
        }
    }

    /// Join and consume the events caused by the join itself
    pub async fn join_and_settle(&mut self, room: &str, user: &str) -> Value {
        self.join(room, user).await;
        self.next_event_of("room_users_update").await
    }

    /// Assert that nothing arrives within the quiet period
    pub async fn expect_no_event(&mut self) {
        match tokio::time::timeout(QUIET_PERIOD, self.stream.next()).await {
            Err(_) => {}
            Ok(Some(Ok(Message::Text(text)))) => panic!("unexpected event: {}", text.as_str()),
            Ok(other) => panic!("unexpected frame: {:?}", other),
        }
    }

    /// Assert that the server closes the connection
    pub async fn expect_closed(&mut self) {
        let closed = tokio::time::timeout(EVENT_TIMEOUT, async {
            while let Some(frame) = self.stream.next().await {
                match frame {
                    Ok(Message::Close(_)) | Err(_) => return,
                    Ok(_) => continue,
                }
            }
        })
        .await;
        assert!(closed.is_ok(), "connection was not closed by the server");
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
