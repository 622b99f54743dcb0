//! Eye-tracking project loading and batch session operations.
//!
//! ```ignore
//! use gazeproj_core::{Project, Selector};
//!
//! let mut project = Project::open("/data/study", MySession::from_entry)?;
//! println!("{}", project.get_sessions_info()?.to_text());
//! project.export_sessions(&Selector::Many(vec![0, 1]), &ExportOptions::new().screen(true))?;
//! ```

mod aggregate;
mod batch;
mod config;
mod descriptor;
mod error;
mod project;
mod registry;
mod scanner;
mod session;

pub use aggregate::aggregate;
pub use batch::BatchReport;
pub use config::{DescriptorFormat, ProjectConfig};
pub use descriptor::{parse_descriptor, repair_colons, DescriptorParser};
pub use error::{
    AggregationError, ConfigError, IndexingError, Operation, OperationError, ParseError,
    ProjectError, ValidationError,
};
pub use project::Project;
pub use registry::SessionRegistry;
pub use scanner::{scan, ProjectDir, ProjectRoot};
pub use session::{Session, SessionFactory};

pub use gazeproj_types::{
    BoxError, DescriptorEntry, ExportOptions, InvalidSelector, Selector, SessionInfo, SessionRow,
    SessionsTable, INDEX_FIELD,
};

/// Result type for gazeproj operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
