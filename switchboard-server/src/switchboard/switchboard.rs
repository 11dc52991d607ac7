use crate::session::{IdAllocator, Session, SessionRegistry};
use crate::switchboard::{
    EnvelopeRouter, PresenceBroadcaster, RouteOutcome, SwitchboardCommand, SwitchboardHandle,
};
use crate::transport::PeerConnection;
use switchboard_core::{Envelope, Role, ServerEvent, SessionId};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The single dispatcher that owns every session.
///
/// Commands are handled strictly one at a time, so registry mutations and the
/// notifications that follow them are never interleaved with other work.
pub struct Switchboard {
    registry: SessionRegistry,
    ids: IdAllocator,
    command_rx: mpsc::Receiver<SwitchboardCommand>,
}

impl Switchboard {
    pub fn new(command_rx: mpsc::Receiver<SwitchboardCommand>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            ids: IdAllocator::new(),
            command_rx,
        }
    }

    /// Starts a switchboard on the current runtime and returns its handle.
    pub fn spawn(command_buffer: usize) -> SwitchboardHandle {
        let (tx, rx) = mpsc::channel(command_buffer);
        tokio::spawn(Switchboard::new(rx).run());
        SwitchboardHandle::new(tx)
    }

    /// Runs until every [`SwitchboardHandle`] has been dropped.
    pub async fn run(mut self) {
        info!("Switchboard event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        for session in self.registry.drain() {
            session.close().await;
        }
        info!("Switchboard event loop finished");
    }

    async fn handle_command(&mut self, cmd: SwitchboardCommand) {
        match cmd {
            SwitchboardCommand::Connect {
                role,
                connection,
                reply,
            } => {
                let admitted = self.admit(role, connection).await;

                if reply.send(admitted).is_err() {
                    // The gateway task vanished before it learned its id.
                    if let Some(id) = admitted {
                        warn!("Gateway for {} went away during admission", id);
                        self.release(id).await;
                    }
                }
            }

            SwitchboardCommand::Inbound { from, text } => {
                self.relay(from, &text).await;
            }

            SwitchboardCommand::Disconnect { id } => {
                self.release(id).await;
            }
        }
    }

    async fn admit(
        &mut self,
        role: Option<String>,
        connection: Box<dyn PeerConnection>,
    ) -> Option<SessionId> {
        let role = match role.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            Some(Err(e)) => {
                warn!("Rejecting connection: {}", e);
                connection.close().await;
                return None;
            }
            None => {
                warn!("Rejecting connection without a role");
                connection.close().await;
                return None;
            }
        };

        let id = self.ids.allocate();
        if let Err(e) = self.registry.insert(Session::new(id, role, connection)) {
            error!("Session registry invariant broken: {}", e);
            return None;
        }
        let session = self.registry.get(id)?;
        info!("Session {} connected as {}", id, role);

        let bootstrap = ServerEvent::Connect {
            id,
            role,
            streamers: (role == Role::Consumer)
                .then(|| self.registry.ids_with_role(Role::Producer)),
        };
        match bootstrap.to_json() {
            Ok(json) => {
                if let Err(e) = session.send(json).await {
                    debug!("Connect bootstrap to {} lost: {}", id, e);
                }
            }
            Err(e) => error!("Failed to serialize connect bootstrap: {}", e),
        }

        PresenceBroadcaster::new(&self.registry).on_join(session).await;
        Some(id)
    }

    async fn relay(&self, from: SessionId, text: &str) {
        if self.registry.get(from).is_none() {
            debug!("Dropping message from unregistered session {}", from);
            return;
        }

        let envelope = match Envelope::parse(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Malformed envelope from {}: {}", from, e);
                return;
            }
        };
        let kind = envelope.kind().to_owned();

        match EnvelopeRouter::new(&self.registry).route(from, envelope).await {
            RouteOutcome::Delivered(target) => {
                debug!("Forwarded {} from {} to {}", kind, from, target)
            }
            RouteOutcome::NoTarget => warn!("Dropping {} from {}: no valid target", kind, from),
            outcome => debug!("Dropping {} from {}: {:?}", kind, from, outcome),
        }
    }

    async fn release(&mut self, id: SessionId) {
        let Some(session) = self.registry.remove(id) else {
            debug!("Session {} already released", id);
            return;
        };
        info!("Session {} ({}) disconnected", id, session.role());

        PresenceBroadcaster::new(&self.registry).on_leave(&session).await;
    }
}
