use crate::session::{Session, SessionRegistry};
use switchboard_core::{Role, ServerEvent, SessionId};
use tracing::{debug, warn};

/// Tells the opposite role when a session arrives or leaves.
pub struct PresenceBroadcaster<'a> {
    registry: &'a SessionRegistry,
}

impl<'a> PresenceBroadcaster<'a> {
    pub fn new(registry: &'a SessionRegistry) -> Self {
        Self { registry }
    }

    /// Announces a new producer to every active consumer.
    ///
    /// Consumers learn about producers from their own `connect` bootstrap, so
    /// a joining consumer triggers nothing. Returns the number of deliveries.
    pub async fn on_join(&self, joined: &Session) -> usize {
        match joined.role() {
            Role::Producer => {
                let event = ServerEvent::NewProducer {
                    producer_id: joined.id(),
                };
                self.notify(Role::Consumer, joined.id(), &event).await
            }
            Role::Consumer => 0,
        }
    }

    /// Tells every active session of the opposite role that `left` is gone.
    pub async fn on_leave(&self, left: &Session) -> usize {
        let event = ServerEvent::disconnected(left.role(), left.id());
        self.notify(left.role().opposite(), left.id(), &event).await
    }

    async fn notify(&self, audience: Role, subject: SessionId, event: &ServerEvent) -> usize {
        let text = match event.to_json() {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to serialize presence event {:?}: {}", event, e);
                return 0;
            }
        };

        let mut delivered = 0;
        let recipients = self
            .registry
            .sessions_where(move |s| s.role() == audience && s.id() != subject);

        for recipient in recipients {
            if !recipient.is_open() {
                continue;
            }
            match recipient.send(text.clone()).await {
                Ok(()) => delivered += 1,
                Err(e) => debug!("Presence event to {} lost: {}", recipient.id(), e),
            }
        }

        debug!(
            "Presence {:?} about {} delivered to {} {}(s)",
            event, subject, delivered, audience
        );
        delivered
    }
}
