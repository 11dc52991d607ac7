mod presence;
mod router;
mod switchboard;
mod switchboard_command;
mod switchboard_handle;

pub use presence::*;
pub use router::*;
pub use switchboard::*;
pub use switchboard_command::*;
pub use switchboard_handle::*;
