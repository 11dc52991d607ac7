mod peer_connection;
mod ws_connection;

pub use peer_connection::*;
pub use ws_connection::*;

#[cfg(test)]
pub(crate) mod testing;
