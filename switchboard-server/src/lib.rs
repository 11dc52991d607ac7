mod config;
mod error;
mod server;
mod session;
mod signaling;
mod switchboard;
mod transport;

pub use config::*;
pub use error::*;
pub use server::*;
pub use session::*;
pub use signaling::*;
pub use switchboard::*;
pub use transport::*;
