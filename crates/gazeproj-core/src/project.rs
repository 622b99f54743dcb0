//! Project façade: scan, parse and build sessions in one step.

use crate::aggregate::aggregate;
use crate::batch::{self, BatchReport};
use crate::config::ProjectConfig;
use crate::descriptor::DescriptorParser;
use crate::error::IndexingError;
use crate::registry::SessionRegistry;
use crate::scanner::{self, ProjectRoot};
use crate::session::{Session, SessionFactory};
use crate::Result;
use gazeproj_types::{ExportOptions, Selector, SessionsTable};
use std::path::Path;
use tracing::info;

/// A loaded project: its directory layout and one session per descriptor entry.
///
/// A `Project` only exists fully loaded; every failure during [`Project::open`]
/// is returned instead of a partial project.
#[derive(Debug, Clone)]
pub struct Project<S> {
    root: ProjectRoot,
    sessions: SessionRegistry<S>,
}

impl<S: Session> Project<S> {
    /// Open the project at `path` with the default vendor layout.
    pub fn open<F>(path: impl AsRef<Path>, factory: F) -> Result<Self>
    where
        F: SessionFactory<Session = S>,
    {
        Self::open_with(path, &ProjectConfig::default(), factory)
    }

    /// Open the project at `path` using `config`.
    pub fn open_with<F>(path: impl AsRef<Path>, config: &ProjectConfig, mut factory: F) -> Result<Self>
    where
        F: SessionFactory<Session = S>,
    {
        let path = path.as_ref();
        let parser = DescriptorParser::from_format(&config.descriptor)?;
        let root = scanner::scan(path, config)?;
        let entries = parser.read(&root.descriptor_path)?;
        let sessions = SessionRegistry::build(&entries, &root.path, &mut factory)?;

        info!(
            target: "gazeproj::project",
            "Opened project {} with {} sessions",
            root.name,
            sessions.len()
        );

        Ok(Self { root, sessions })
    }

    /// Table of every session's info, keyed by its `index`.
    pub fn get_sessions_info(&self) -> Result<SessionsTable> {
        Ok(aggregate(&self.sessions)?)
    }

    /// Export the selected sessions, in order, with the same options.
    pub fn export_sessions(&mut self, selector: &Selector, options: &ExportOptions) -> Result<BatchReport> {
        batch::export(&mut self.sessions, selector, options)
    }

    pub fn split_sessions(&mut self, selector: &Selector) -> Result<BatchReport> {
        batch::split(&mut self.sessions, selector)
    }

    pub fn annotate_sessions(&mut self, selector: &Selector) -> Result<BatchReport> {
        batch::annotate(&mut self.sessions, selector)
    }
}

impl<S> Project<S> {
    /// Project name (the descriptor's file name).
    pub fn name(&self) -> &str {
        &self.root.name
    }

    pub fn path(&self) -> &Path {
        &self.root.path
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn sessions(&self) -> &SessionRegistry<S> {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, index: usize) -> std::result::Result<&S, IndexingError> {
        self.sessions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> std::result::Result<&mut S, IndexingError> {
        self.sessions.get_mut(index)
    }

    pub fn get_many(&self, indices: &[usize]) -> std::result::Result<Vec<&S>, IndexingError> {
        self.sessions.get_many(indices)
    }

    pub fn select(&self, selector: &Selector) -> std::result::Result<Vec<&S>, IndexingError> {
        self.sessions.select(selector)
    }

    /// Replace the session at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, session: S) -> std::result::Result<S, IndexingError> {
        self.sessions.set(index, session)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.sessions.iter()
    }
}

impl<'a, S> IntoIterator for &'a Project<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}
