//! Shared types for gazeproj, the eye-tracking project loader.

mod entry;
mod info;
mod options;
mod selector;

pub use entry::*;
pub use info::*;
pub use options::*;
pub use selector::*;

/// Error type returned by session collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
