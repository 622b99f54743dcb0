//! Project directory layout discovery.
//!
//! A project root holds up to three well-known subdirectories (`user`, `src`,
//! `result`) next to a single descriptor file. Only immediate children are
//! inspected, in lexicographic order of their names.

use crate::config::ProjectConfig;
use crate::error::ValidationError;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Classified layout of a project root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// Root project path
    pub path: PathBuf,
    /// Project name (the descriptor's file name)
    pub name: String,
    /// Path to the descriptor file
    pub descriptor_path: PathBuf,
    pub user_path: Option<PathBuf>,
    pub src_path: Option<PathBuf>,
    pub result_path: Option<PathBuf>,
    /// Descriptor files overridden by a lexicographically later one.
    pub shadowed_descriptors: Vec<PathBuf>,
}

/// Well-known project subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectDir {
    User,
    Src,
    Result,
}

/// Directory name to subdirectory slot.
const PROJECT_DIRS: [(&str, ProjectDir); 3] = [
    ("user", ProjectDir::User),
    ("src", ProjectDir::Src),
    ("result", ProjectDir::Result),
];

impl ProjectDir {
    pub fn from_name(name: &str) -> Option<Self> {
        PROJECT_DIRS
            .iter()
            .find(|(dir_name, _)| *dir_name == name)
            .map(|(_, dir)| *dir)
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectDir::User => "user",
            ProjectDir::Src => "src",
            ProjectDir::Result => "result",
        }
    }
}

#[derive(Default)]
struct Subdirs {
    user: Option<PathBuf>,
    src: Option<PathBuf>,
    result: Option<PathBuf>,
}

impl Subdirs {
    fn slot(&mut self, dir: ProjectDir) -> &mut Option<PathBuf> {
        match dir {
            ProjectDir::User => &mut self.user,
            ProjectDir::Src => &mut self.src,
            ProjectDir::Result => &mut self.result,
        }
    }
}

impl ProjectRoot {
    /// Path of a well-known subdirectory, if it exists.
    pub fn subdir(&self, dir: ProjectDir) -> Option<&Path> {
        match dir {
            ProjectDir::User => self.user_path.as_deref(),
            ProjectDir::Src => self.src_path.as_deref(),
            ProjectDir::Result => self.result_path.as_deref(),
        }
    }
}

/// Classify the immediate children of `root`.
///
/// Fails if the root cannot be listed, has no entries at all, or holds no
/// descriptor file. Missing subdirectories are left unset.
pub fn scan(root: &Path, config: &ProjectConfig) -> Result<ProjectRoot, ValidationError> {
    let unreadable = |source| ValidationError::Unreadable {
        path: root.to_path_buf(),
        source,
    };

    let mut children = fs::read_dir(root)
        .map_err(unreadable)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(unreadable)?;

    if children.is_empty() {
        return Err(ValidationError::EmptyRoot(root.to_path_buf()));
    }

    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let extension = config.descriptor_extension.trim_start_matches('.');
    let mut subdirs = Subdirs::default();
    let mut descriptor: Option<(String, PathBuf)> = None;
    let mut shadowed = Vec::new();

    for path in children {
        let Some(file_name) = path.file_name() else {
            continue;
        };

        if path.is_dir() {
            if let Some(dir) = file_name.to_str().and_then(ProjectDir::from_name) {
                debug!(target: "gazeproj::scan", "Found {} directory: {}", dir.name(), path.display());
                *subdirs.slot(dir) = Some(path);
            }
        } else if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
            let name = file_name.to_string_lossy().into_owned();
            if let Some((_, previous)) = descriptor.replace((name, path.clone())) {
                warn!(
                    target: "gazeproj::scan",
                    "Multiple descriptor files in {}: using {}, ignoring {}",
                    root.display(),
                    path.display(),
                    previous.display()
                );
                shadowed.push(previous);
            }
        }
    }

    let (name, descriptor_path) = descriptor.ok_or_else(|| ValidationError::MissingDescriptor {
        root: root.to_path_buf(),
        extension: extension.to_string(),
    })?;

    debug!(
        target: "gazeproj::scan",
        "Project {} at {} (user: {}, src: {}, result: {})",
        name,
        root.display(),
        subdirs.user.is_some(),
        subdirs.src.is_some(),
        subdirs.result.is_some()
    );

    Ok(ProjectRoot {
        path: root.to_path_buf(),
        name,
        descriptor_path,
        user_path: subdirs.user,
        src_path: subdirs.src,
        result_path: subdirs.result,
        shadowed_descriptors: shadowed,
    })
}
