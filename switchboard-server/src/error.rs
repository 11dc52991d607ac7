use switchboard_core::SessionId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two live sessions were handed the same id. Only a broken allocator can cause this.
    #[error("session {0} is already registered")]
    DuplicateIdentifier(SessionId),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection is closed")]
    Closed,

    /// The peer is not draining its outbound queue; the frame was dropped.
    #[error("outbound queue is full")]
    Full,
}
