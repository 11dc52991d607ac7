use crate::error::TransportError;
use async_trait::async_trait;

/// The slice of a transport connection the switchboard needs.
///
/// Sends are single attempts: an implementation must not block waiting for the
/// peer and must not retry. A failed send is simply lost.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    /// Queue one text frame for the peer.
    async fn send(&self, text: String) -> Result<(), TransportError>;

    /// Whether the peer can currently be written to.
    fn is_open(&self) -> bool;

    /// Ask the transport to terminate the connection.
    async fn close(&self);
}
