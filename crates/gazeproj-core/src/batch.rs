//! Batch export, split and annotate over selected sessions.
//!
//! The selector is resolved against the registry before anything runs, so a
//! bad index fails the batch without touching any session. Sessions are then
//! processed one at a time in selection order. The first failure stops the
//! batch; everything before it has completed.

use crate::error::{Operation, OperationError, ProjectError};
use crate::registry::SessionRegistry;
use crate::session::Session;
use gazeproj_types::{BoxError, ExportOptions, Selector};
use tracing::{debug, info, warn};

/// Outcome of a batch that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub operation: Operation,
    /// Processed positions, in processing order.
    pub positions: Vec<usize>,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.positions.len()
    }
}

/// Export every selected session with the same `options`.
pub fn export<S: Session>(
    registry: &mut SessionRegistry<S>,
    selector: &Selector,
    options: &ExportOptions,
) -> Result<BatchReport, ProjectError> {
    run(registry, selector, Operation::Export, |session| session.export(options))
}

pub fn split<S: Session>(
    registry: &mut SessionRegistry<S>,
    selector: &Selector,
) -> Result<BatchReport, ProjectError> {
    run(registry, selector, Operation::Split, |session| session.split())
}

pub fn annotate<S: Session>(
    registry: &mut SessionRegistry<S>,
    selector: &Selector,
) -> Result<BatchReport, ProjectError> {
    run(registry, selector, Operation::Annotate, |session| session.annotate())
}

fn run<S, F>(
    registry: &mut SessionRegistry<S>,
    selector: &Selector,
    operation: Operation,
    mut call: F,
) -> Result<BatchReport, ProjectError>
where
    S: Session,
    F: FnMut(&mut S) -> Result<(), BoxError>,
{
    let positions = registry.resolve(selector)?;
    info!(
        target: "gazeproj::batch",
        "Starting {} on {} sessions ({})",
        operation,
        positions.len(),
        selector
    );

    for (completed, &position) in positions.iter().enumerate() {
        debug!(target: "gazeproj::batch", "{} session {}", operation, position);
        let session = registry.get_mut(position)?;
        if let Err(source) = call(session) {
            warn!(
                target: "gazeproj::batch",
                "{} failed on session {}: {}",
                operation,
                position,
                source
            );
            return Err(OperationError {
                operation,
                position,
                completed,
                source,
            }
            .into());
        }
    }

    info!(
        target: "gazeproj::batch",
        "Finished {} on {} sessions",
        operation,
        positions.len()
    );
    Ok(BatchReport {
        operation,
        positions,
    })
}
