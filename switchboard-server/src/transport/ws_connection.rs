use crate::error::TransportError;
use crate::transport::PeerConnection;
use async_trait::async_trait;
use axum::extract::ws::Message;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Frames a single socket may have waiting for its writer task.
pub const OUTBOUND_QUEUE_DEPTH: usize = 64;

/// Write side of an upgraded WebSocket.
///
/// Frames go through a bounded channel drained by the socket's writer task.
/// `send` never waits: a frame that does not fit is dropped.
pub struct WsConnection {
    tx: mpsc::Sender<Message>,
}

impl WsConnection {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl PeerConnection for WsConnection {
    async fn send(&self, text: String) -> Result<(), TransportError> {
        self.tx
            .try_send(Message::Text(text.into()))
            .map_err(|e| match e {
                TrySendError::Full(_) => TransportError::Full,
                TrySendError::Closed(_) => TransportError::Closed,
            })
    }

    fn is_open(&self) -> bool {
        // The writer task drops the receiver once the socket stops accepting frames.
        !self.tx.is_closed()
    }

    async fn close(&self) {
        let _ = self.tx.try_send(Message::Close(None));
    }
}
