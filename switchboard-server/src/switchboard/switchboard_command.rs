use crate::transport::PeerConnection;
use switchboard_core::SessionId;
use tokio::sync::oneshot;

/// Events fed to the switchboard by the connection gateway.
pub enum SwitchboardCommand {
    /// A transport connection was accepted and carries this role selector.
    /// The reply is the assigned id, or `None` if the connection was refused.
    Connect {
        role: Option<String>,
        connection: Box<dyn PeerConnection>,
        reply: oneshot::Sender<Option<SessionId>>,
    },

    /// A text frame arrived from an active session.
    Inbound { from: SessionId, text: String },

    /// The transport reported that the connection is gone.
    Disconnect { id: SessionId },
}
