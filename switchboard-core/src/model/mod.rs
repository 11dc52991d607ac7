mod envelope;
mod role;
mod session;
mod signaling;

pub use envelope::{Envelope, EnvelopeError};
pub use role::{Role, UnknownRole};
pub use session::SessionId;
pub use signaling::ServerEvent;
