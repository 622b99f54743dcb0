//! Metadata-only sessions for inspecting a project without a rendering backend.

use gazeproj_core::{
    BoxError, DescriptorEntry, ExportOptions, INDEX_FIELD, Session, SessionInfo,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raised when a metadata-only session is asked to process recordings.
#[derive(Error, Debug)]
#[error("{operation} needs a recording backend; session {position} only carries descriptor metadata")]
pub struct Unsupported {
    pub operation: &'static str,
    pub position: usize,
}

/// A session described only by its descriptor entry.
///
/// `index` is the session's position in the descriptor; the remaining info
/// fields are the entry's own fields.
#[derive(Debug, Clone)]
pub struct MetadataSession {
    pub position: usize,
    pub entry: DescriptorEntry,
    pub root: PathBuf,
}

impl MetadataSession {
    /// Factory numbering sessions in descriptor order.
    pub fn factory() -> impl FnMut(&DescriptorEntry, &Path) -> Result<MetadataSession, BoxError> {
        let mut next = 0;
        move |entry: &DescriptorEntry, root: &Path| {
            let session = MetadataSession {
                position: next,
                entry: entry.clone(),
                root: root.to_path_buf(),
            };
            next += 1;
            Ok(session)
        }
    }

    fn unsupported(&self, operation: &'static str) -> BoxError {
        Box::new(Unsupported {
            operation,
            position: self.position,
        })
    }
}

impl Session for MetadataSession {
    fn session_info(&self) -> Result<SessionInfo, BoxError> {
        let mut info = SessionInfo::with_index(self.position);
        for (key, value) in self.entry.to_json()? {
            if key != INDEX_FIELD {
                info.insert(key, value);
            }
        }
        Ok(info)
    }

    fn export(&mut self, _options: &ExportOptions) -> Result<(), BoxError> {
        Err(self.unsupported("export"))
    }

    fn split(&mut self) -> Result<(), BoxError> {
        Err(self.unsupported("split"))
    }

    fn annotate(&mut self) -> Result<(), BoxError> {
        Err(self.unsupported("annotate"))
    }
}
