//! WebSocket connection handlers.

use std::{ops::ControlFlow, sync::Arc, time::Duration};

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, SessionContext},
    infrastructure::dto::websocket::{ClientEvent, decode_client_event},
    ui::state::AppState,
    usecase::JoinError,
};

/// Time allowed for queued events to be flushed after the connection ends
const FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Session token issued by the login service
    pub session: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let session = SessionContext::new(query.session);
    ws.on_upgrade(move |socket| handle_socket(socket, state, session))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The socket is closed once the channel is closed, i.e. after the connection
/// has been unregistered from the MessagePusher and the queue is drained.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.close().await;
    })
}

/// Wait until either task completes, then make sure the reader has stopped.
///
/// An aborted reader may still be running a dispatch on another worker, so it
/// is awaited before returning. Nothing the reader does can land after this.
async fn wait_for_reader(recv_task: &mut JoinHandle<()>, send_task: &mut JoinHandle<()>) {
    let send_finished = tokio::select! {
        _ = &mut *recv_task => false,
        _ = &mut *send_task => true,
    };

    if send_finished {
        recv_task.abort();
        if let Err(e) = recv_task.await
            && e.is_panic()
        {
            tracing::error!("WebSocket reader panicked: {}", e);
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session: SessionContext) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = state.open_connection_usecase.execute(tx).await;

    // Spawn a task to push events to this connection
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this connection.
    // Events are handled one at a time, so per-connection order is kept.
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on connection '{}': {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if dispatch(&recv_state, connection, &session, text.as_str())
                        .await
                        .is_break()
                    {
                        break;
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection);
                    break;
                }
                _ => {}
            }
        }
    });

    wait_for_reader(&mut recv_task, &mut send_task).await;

    // Disconnect exactly once per socket
    state.disconnect_usecase.execute(connection).await;

    // The channel is now unregistered; let the pusher flush and close the socket
    if !send_task.is_finished()
        && tokio::time::timeout(FLUSH_TIMEOUT, &mut send_task)
            .await
            .is_err()
    {
        send_task.abort();
    }
}

/// Handle one inbound frame. `Break` closes the connection.
async fn dispatch(
    state: &AppState,
    connection: ConnectionId,
    session: &SessionContext,
    text: &str,
) -> ControlFlow<()> {
    let event = match decode_client_event(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring frame from connection '{}': {}", connection, e);
            return ControlFlow::Continue(());
        }
    };

    match event {
        ClientEvent::Join(payload) => {
            match state
                .join_room_usecase
                .execute(
                    connection,
                    session,
                    payload.room.as_deref(),
                    payload.user.as_deref(),
                )
                .await
            {
                Ok(_) => {}
                Err(JoinError::Unauthorized) => {
                    tracing::info!("Closing unauthenticated connection '{}'", connection);
                    return ControlFlow::Break(());
                }
                Err(e) => {
                    tracing::warn!("Join from connection '{}' rejected: {}", connection, e);
                }
            }
        }
        ClientEvent::Leave(payload) => {
            state
                .leave_room_usecase
                .execute(connection, payload.room.as_deref())
                .await;
        }
        ClientEvent::SendMessage(payload) => {
            if let Err(e) = state
                .send_message_usecase
                .execute(
                    connection,
                    session,
                    payload.room.as_deref(),
                    payload.msg.as_deref(),
                    payload.user.as_deref(),
                )
                .await
            {
                tracing::warn!("Message from connection '{}' dropped: {}", connection, e);
            }
        }
    }

    ControlFlow::Continue(())
}
