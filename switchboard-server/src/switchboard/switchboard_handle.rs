use crate::switchboard::SwitchboardCommand;
use crate::transport::PeerConnection;
use switchboard_core::SessionId;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

/// Cloneable front door to a running [`Switchboard`](crate::Switchboard).
#[derive(Clone)]
pub struct SwitchboardHandle {
    command_tx: mpsc::Sender<SwitchboardCommand>,
}

impl SwitchboardHandle {
    pub fn new(command_tx: mpsc::Sender<SwitchboardCommand>) -> Self {
        Self { command_tx }
    }

    /// Admits a connection. Returns the session id, or `None` when the role is
    /// refused or the switchboard is gone.
    pub async fn connect(
        &self,
        role: Option<String>,
        connection: Box<dyn PeerConnection>,
    ) -> Option<SessionId> {
        let (reply, reply_rx) = oneshot::channel();
        let cmd = SwitchboardCommand::Connect {
            role,
            connection,
            reply,
        };
        if let Err(e) = self.command_tx.send(cmd).await {
            error!("Switchboard died: {}", e);
            return None;
        }
        reply_rx.await.ok().flatten()
    }

    pub async fn inbound(&self, from: SessionId, text: String) {
        if let Err(e) = self
            .command_tx
            .send(SwitchboardCommand::Inbound { from, text })
            .await
        {
            warn!("Failed to hand message from {} to switchboard: {}", from, e);
        }
    }

    pub async fn disconnect(&self, id: SessionId) {
        if let Err(e) = self
            .command_tx
            .send(SwitchboardCommand::Disconnect { id })
            .await
        {
            // Expected while shutting down.
            debug!("Failed to report disconnect of {} to switchboard: {}", id, e);
        }
    }
}
