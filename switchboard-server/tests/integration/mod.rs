
use tracing::Level;

use switchboard_server::{Switchboard, SwitchboardHandle};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_switchboard() -> SwitchboardHandle {
    Switchboard::spawn(100)
}
