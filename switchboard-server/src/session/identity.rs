use std::sync::atomic::{AtomicU64, Ordering};
use switchboard_core::SessionId;

/// Hands out session ids from a monotonically increasing counter.
///
/// Ids are never reused, so an id cannot collide with any live session no
/// matter how close together two connections are admitted.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn allocate(&self) -> SessionId {
        SessionId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
