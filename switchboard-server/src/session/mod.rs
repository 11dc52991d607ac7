mod identity;
mod registry;

pub use identity::*;
pub use registry::*;
