use crate::model::session::SessionId;
use serde_json::{Map, Value};
use thiserror::Error;

const TYPE: &str = "type";
const TARGET: &str = "target";
const SENDER: &str = "sender";

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid envelope json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("envelope is not a json object")]
    NotAnObject,

    #[error("envelope has no string `type`")]
    MissingType,
}

/// Addressed signaling unit relayed between two sessions.
///
/// The client's object is kept as-is, numbers included, and re-emitted in the
/// order it was sent. Only `sender` is ever rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    pub fn parse(text: &str) -> Result<Self, EnvelopeError> {
        let Value::Object(fields) = serde_json::from_str::<Value>(text)? else {
            return Err(EnvelopeError::NotAnObject);
        };
        if !fields.get(TYPE).is_some_and(Value::is_string) {
            return Err(EnvelopeError::MissingType);
        }
        Ok(Self { fields })
    }

    pub fn kind(&self) -> &str {
        self.fields.get(TYPE).and_then(Value::as_str).unwrap_or_default()
    }

    /// The addressed session, if `target` is a non-negative integer.
    pub fn target_id(&self) -> Option<SessionId> {
        self.fields.get(TARGET)?.as_u64().map(SessionId)
    }

    /// Replaces whatever `sender` the client supplied, keeping its position.
    pub fn stamp_sender(&mut self, sender: SessionId) {
        self.fields.insert(SENDER.to_owned(), Value::from(sender.get()));
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}
