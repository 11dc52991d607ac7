use crate::switchboard::SwitchboardHandle;
use crate::transport::{OUTBOUND_QUEUE_DEPTH, WsConnection};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Query string of the upgrade request, e.g. `/?role=consumer`.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    pub role: Option<String>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(switchboard): State<SwitchboardHandle>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, params.role, switchboard))
}

async fn handle_socket(socket: WebSocket, role: Option<String>, switchboard: SwitchboardHandle) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel(OUTBOUND_QUEUE_DEPTH);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    let Some(id) = switchboard
        .connect(role, Box::new(WsConnection::new(tx)))
        .await
    else {
        // Refused before registration; the writer flushes the close frame and exits.
        let _ = send_task.await;
        return;
    };
    info!("New WebSocket session: {}", id);

    let mut recv_task = tokio::spawn({
        let switchboard = switchboard.clone();

        async move {
            while let Some(frame) = receiver.next().await {
                let msg = match frame {
                    Ok(msg) => msg,
                    Err(e) => {
                        // Not a closure by itself; the stream ends if the socket is gone.
                        warn!("WebSocket error on session {}: {}", id, e);
                        continue;
                    }
                };

                match msg {
                    Message::Text(text) => switchboard.inbound(id, text.as_str().to_owned()).await,
                    Message::Binary(data) => match String::from_utf8(data.to_vec()) {
                        Ok(text) => switchboard.inbound(id, text).await,
                        Err(_) => warn!("Dropping non UTF-8 binary frame from {}", id),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    switchboard.disconnect(id).await;
    info!("WebSocket session closed: {}", id);
}
