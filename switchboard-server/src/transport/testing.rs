use crate::error::TransportError;
use crate::transport::PeerConnection;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory connection that records every frame it is asked to send.
#[derive(Clone, Default)]
pub(crate) struct RecordingConnection {
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    failure: Arc<Mutex<Option<TransportError>>>,
}

impl RecordingConnection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn boxed(&self) -> Box<dyn PeerConnection> {
        Box::new(self.clone())
    }

    pub(crate) fn sent_raw(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn sent_json(&self) -> Vec<serde_json::Value> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|s| serde_json::from_str(s).unwrap())
            .collect()
    }

    /// Every later `send` fails with `error` while the connection stays open.
    pub(crate) fn fail_sends_with(&self, error: TransportError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn mark_closed(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PeerConnection for RecordingConnection {
    async fn send(&self, text: String) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        if let Some(error) = *self.failure.lock().unwrap() {
            return Err(error);
        }
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.is_closed()
    }

    async fn close(&self) {
        self.mark_closed();
    }
}
