//! Ordered, indexable collection of project sessions.

use crate::error::{IndexingError, ProjectError};
use crate::session::SessionFactory;
use gazeproj_types::{DescriptorEntry, Selector};
use std::path::Path;
use tracing::{debug, trace};

/// Sessions in descriptor order: position `i` holds the session built from
/// the `i`-th descriptor entry.
#[derive(Debug, Clone)]
pub struct SessionRegistry<S> {
    sessions: Vec<S>,
}

impl<S> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }
}

impl<S> SessionRegistry<S> {
    pub fn new(sessions: Vec<S>) -> Self {
        Self { sessions }
    }

    /// Build one session per entry, in order. The first factory failure aborts
    /// the whole build.
    pub fn build<F>(
        entries: &[DescriptorEntry],
        root: &Path,
        factory: &mut F,
    ) -> Result<Self, ProjectError>
    where
        F: SessionFactory<Session = S>,
    {
        let sessions = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                trace!(target: "gazeproj::registry", "Constructing session {}", position);
                factory
                    .construct(entry, root)
                    .map_err(|source| ProjectError::SessionConstruction { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            target: "gazeproj::registry",
            "Constructed {} sessions for {}",
            sessions.len(),
            root.display()
        );
        Ok(Self { sessions })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Session at `index`.
    pub fn get(&self, index: usize) -> Result<&S, IndexingError> {
        let len = self.len();
        self.sessions
            .get(index)
            .ok_or(IndexingError::OutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut S, IndexingError> {
        let len = self.len();
        self.sessions
            .get_mut(index)
            .ok_or(IndexingError::OutOfRange { index, len })
    }

    /// Sessions at `indices`, in the requested order. Duplicates resolve
    /// independently; any bad index fails the whole call.
    pub fn get_many(&self, indices: &[usize]) -> Result<Vec<&S>, IndexingError> {
        indices.iter().map(|&index| self.get(index)).collect()
    }

    /// Sessions named by `selector`.
    pub fn select(&self, selector: &Selector) -> Result<Vec<&S>, IndexingError> {
        match selector {
            Selector::All => Ok(self.sessions.iter().collect()),
            Selector::Single(index) => self.get(*index).map(|s| vec![s]),
            Selector::Many(indices) => self.get_many(indices),
        }
    }

    /// Bounds-checked positions named by `selector`.
    pub fn resolve(&self, selector: &Selector) -> Result<Vec<usize>, IndexingError> {
        let len = self.len();
        let positions = selector.positions(len);
        if let Some(&index) = positions.iter().find(|&&i| i >= len) {
            return Err(IndexingError::OutOfRange { index, len });
        }
        Ok(positions)
    }

    /// Replace the session at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, session: S) -> Result<S, IndexingError> {
        let slot = self.get_mut(index)?;
        debug!(target: "gazeproj::registry", "Replacing session {}", index);
        Ok(std::mem::replace(slot, session))
    }

    /// Fresh traversal over the current sessions.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.sessions.iter()
    }
}

impl<'a, S> IntoIterator for &'a SessionRegistry<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}
