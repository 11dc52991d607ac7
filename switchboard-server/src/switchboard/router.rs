use crate::session::SessionRegistry;
use crate::error::TransportError;
use switchboard_core::{Envelope, SessionId};
use tracing::warn;

/// What happened to a routed envelope. The sender never learns any of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Delivered(SessionId),
    /// `target` was absent or not a session id.
    NoTarget,
    UnknownTarget(SessionId),
    /// Registered, but the transport no longer accepts frames.
    TargetClosed(SessionId),
    /// `None` when the envelope could not be serialized.
    SendFailed(SessionId, Option<TransportError>),
}

/// Point-to-point delivery of envelopes between registered sessions.
pub struct EnvelopeRouter<'a> {
    registry: &'a SessionRegistry,
}

impl<'a> EnvelopeRouter<'a> {
    pub fn new(registry: &'a SessionRegistry) -> Self {
        Self { registry }
    }

    /// Forwards `envelope` to its target with `sender` stamped to `from`.
    ///
    /// Anything that cannot be delivered on the first attempt is dropped.
    pub async fn route(&self, from: SessionId, mut envelope: Envelope) -> RouteOutcome {
        let Some(target_id) = envelope.target_id() else {
            return RouteOutcome::NoTarget;
        };
        let Some(target) = self.registry.get(target_id) else {
            return RouteOutcome::UnknownTarget(target_id);
        };
        if !target.is_open() {
            return RouteOutcome::TargetClosed(target_id);
        }

        envelope.stamp_sender(from);
        let json = match envelope.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize envelope from {}: {}", from, e);
                return RouteOutcome::SendFailed(target_id, None);
            }
        };

        match target.send(json).await {
            Ok(()) => RouteOutcome::Delivered(target_id),
            Err(e) => RouteOutcome::SendFailed(target_id, Some(e)),
        }
    }
}
