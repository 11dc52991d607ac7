use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use switchboard_server::{PeerConnection, TransportError};
use tokio::sync::{Mutex, mpsc};

/// Fake transport that captures every frame the switchboard sends.
#[derive(Clone)]
pub struct MockConnection {
    /// Channel to send captured frames.
    tx: mpsc::UnboundedSender<Value>,
    /// All captured frames (for verification).
    frames: Arc<Mutex<Vec<Value>>>,
    closed: Arc<AtomicBool>,
}

impl MockConnection {
    /// Create a new MockConnection and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Self {
            tx,
            frames: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        };
        (connection, rx)
    }

    /// Create a MockConnection without a receiver (frames are only stored).
    pub fn new_stored_only() -> Self {
        Self::new().0
    }

    pub fn boxed(&self) -> Box<dyn PeerConnection> {
        Box::new(self.clone())
    }

    /// Simulate the transport going away without a close event.
    pub fn drop_transport(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn frames(&self) -> Vec<Value> {
        self.frames.lock().await.clone()
    }

    /// Frames whose `type` equals `kind`.
    pub async fn frames_of_type(&self, kind: &str) -> Vec<Value> {
        self.frames
            .lock()
            .await
            .iter()
            .filter(|frame| frame["type"] == kind)
            .cloned()
            .collect()
    }
}

impl Default for MockConnection {
    fn default() -> Self {
        Self::new_stored_only()
    }
}

#[async_trait]
impl PeerConnection for MockConnection {
    async fn send(&self, text: String) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        let frame: Value = serde_json::from_str(&text).map_err(|_| TransportError::Closed)?;
        tracing::debug!("[MockConnection] send {}", frame);

        self.frames.lock().await.push(frame.clone());
        let _ = self.tx.send(frame);
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.is_closed()
    }

    async fn close(&self) {
        tracing::debug!("[MockConnection] close");
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_connection_captures_frames() {
        let (connection, mut rx) = MockConnection::new();

        connection
            .send(r#"{"type":"connect","id":1}"#.to_owned())
            .await
            .unwrap();

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame["id"], 1);
        assert_eq!(connection.frames_of_type("connect").await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_connection_refuses_after_close() {
        let connection = MockConnection::new_stored_only();
        connection.close().await;

        assert!(!connection.is_open());
        assert_eq!(
            connection.send("{}".to_owned()).await,
            Err(TransportError::Closed)
        );
        assert!(connection.frames().await.is_empty());
    }
}
