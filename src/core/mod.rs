//! Core state shared by the whole crate: the lifecycle state machine, the
//! error taxonomy and version metadata.

pub mod error;
pub mod lifecycle;
pub mod version;

pub use error::{ArgsError, CreationError, CreationResult};
pub use lifecycle::Lifecycle;
pub use version::{version, Version};
