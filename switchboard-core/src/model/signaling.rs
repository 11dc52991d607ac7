use crate::model::role::Role;
use crate::model::session::SessionId;
use serde::Serialize;

/// Events generated by the relay itself, as opposed to relayed envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// First frame on every accepted connection.
    Connect {
        id: SessionId,
        role: Role,
        /// Active producers at admission time; only sent to consumers.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        streamers: Option<Vec<SessionId>>,
    },
    NewProducer {
        producer_id: SessionId,
    },
    ProducerDisconnected {
        producer_id: SessionId,
    },
    ConsumerDisconnected {
        consumer_id: SessionId,
    },
}

impl ServerEvent {
    /// The presence event announcing that `id`, playing `role`, has left.
    pub fn disconnected(role: Role, id: SessionId) -> Self {
        match role {
            Role::Producer => ServerEvent::ProducerDisconnected { producer_id: id },
            Role::Consumer => ServerEvent::ConsumerDisconnected { consumer_id: id },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
