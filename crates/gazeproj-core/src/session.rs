//! Session collaborator contracts.
//!
//! Rendering, gaze and fixation extraction live outside this crate. A project
//! only needs something that can describe itself and run the three batch
//! operations, plus a way to build one from a descriptor entry.

use gazeproj_types::{BoxError, DescriptorEntry, ExportOptions, SessionInfo};
use std::path::Path;

/// A recorded session owned by a project.
pub trait Session {
    /// Summary record; must contain an `index` field unique within the project.
    fn session_info(&self) -> Result<SessionInfo, BoxError>;

    /// Export session data into the project's result directory.
    fn export(&mut self, options: &ExportOptions) -> Result<(), BoxError>;

    /// Split the session recording.
    fn split(&mut self) -> Result<(), BoxError>;

    /// Annotate the session recording.
    fn annotate(&mut self) -> Result<(), BoxError>;
}

/// Builds sessions from descriptor entries.
///
/// Any `FnMut(&DescriptorEntry, &Path) -> Result<S, BoxError>` closure is a factory.
pub trait SessionFactory {
    type Session: Session;

    /// Build the session for `entry` in the project rooted at `root`.
    fn construct(&mut self, entry: &DescriptorEntry, root: &Path) -> Result<Self::Session, BoxError>;
}

impl<F, S> SessionFactory for F
where
    F: FnMut(&DescriptorEntry, &Path) -> Result<S, BoxError>,
    S: Session,
{
    type Session = S;

    fn construct(&mut self, entry: &DescriptorEntry, root: &Path) -> Result<S, BoxError> {
        self(entry, root)
    }
}
