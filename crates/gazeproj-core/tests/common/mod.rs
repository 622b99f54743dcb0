//! Common test utilities for integration tests.

#![allow(dead_code)]

use gazeproj_core::{BoxError, DescriptorEntry, ExportOptions, Session, SessionInfo};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Opaque header the vendor writes before the YAML body.
pub const HEADER: &[u8; 14] = b"%YAML:1.0\n---\n";

/// A scalar field value in a test descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Str(String),
    Int(i64),
}

/// Encode entries the way the vendor writes them: header, colon without a
/// following space, windows-1251 text.
pub fn encode_descriptor(entries: &[Vec<(String, Field)>]) -> Vec<u8> {
    if entries.is_empty() {
        return [&HEADER[..], &b"UserData:[]\n"[..]].concat();
    }

    let mut text = String::from("UserData:\n");
    for entry in entries {
        let fields: Vec<String> = entry
            .iter()
            .map(|(key, value)| match value {
                Field::Str(s) => format!(
                    "{}:\"{}\"",
                    key,
                    s.replace('\\', "\\\\").replace('"', "\\\"")
                ),
                Field::Int(n) => format!("{}:{}", key, n),
            })
            .collect();
        text.push_str(&format!("   - {{ {} }}\n", fields.join(", ")));
    }

    let (body, _, had_errors) = encoding_rs::WINDOWS_1251.encode(&text);
    assert!(!had_errors, "test descriptor is not representable in windows-1251");

    let mut bytes = HEADER.to_vec();
    bytes.extend_from_slice(&body);
    bytes
}

/// Fields of a parsed entry in the same shape `encode_descriptor` takes.
pub fn decode_fields(entry: &DescriptorEntry) -> Vec<(String, Field)> {
    entry
        .iter()
        .map(|(key, value)| {
            let key = key.as_str().expect("string key").to_string();
            let value = match value {
                serde_yaml::Value::String(s) => Field::Str(s.clone()),
                serde_yaml::Value::Number(n) => Field::Int(n.as_i64().expect("integer")),
                other => panic!("unexpected value {:?}", other),
            };
            (key, value)
        })
        .collect()
}

/// `n` participant entries with distinct names and ids.
pub fn participants(n: usize) -> Vec<Vec<(String, Field)>> {
    (0..n)
        .map(|i| {
            vec![
                ("Name".to_string(), Field::Str(format!("Участник {}", i))),
                ("Id".to_string(), Field::Int(i as i64)),
                ("Age".to_string(), Field::Int(20 + i as i64)),
            ]
        })
        .collect()
}

/// Builds a project directory in a temp dir.
pub struct ProjectBuilder {
    dir: TempDir,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn with_dirs(self, names: &[&str]) -> Self {
        for name in names {
            fs::create_dir(self.dir.path().join(name)).expect("create dir");
        }
        self
    }

    pub fn with_file(self, name: &str, bytes: &[u8]) -> Self {
        fs::write(self.dir.path().join(name), bytes).expect("write file");
        self
    }

    pub fn with_participants(self, n: usize) -> Self {
        self.with_file("study.prj", &encode_descriptor(&participants(n)))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn build(self) -> TempDir {
        self.dir
    }
}

/// One recorded call on a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub position: usize,
    pub operation: &'static str,
    pub options: Option<ExportOptions>,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Session that records every operation into a shared log.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    pub position: usize,
    pub entry: DescriptorEntry,
    pub root: PathBuf,
    pub log: CallLog,
    pub fail_on: Option<&'static str>,
}

impl RecordingSession {
    fn record(&self, operation: &'static str, options: Option<ExportOptions>) -> Result<(), BoxError> {
        if self.fail_on == Some(operation) {
            return Err(format!("{} failed for session {}", operation, self.position).into());
        }
        self.log.borrow_mut().push(Call {
            position: self.position,
            operation,
            options,
        });
        Ok(())
    }
}

impl Session for RecordingSession {
    fn session_info(&self) -> Result<SessionInfo, BoxError> {
        let mut info = SessionInfo::with_index(self.position);
        if let Some(name) = self.entry.get_str("Name") {
            info.insert("name", name);
        }
        Ok(info)
    }

    fn export(&mut self, options: &ExportOptions) -> Result<(), BoxError> {
        self.record("export", Some(options.clone()))
    }

    fn split(&mut self) -> Result<(), BoxError> {
        self.record("split", None)
    }

    fn annotate(&mut self) -> Result<(), BoxError> {
        self.record("annotate", None)
    }
}

/// Factory that numbers sessions in construction order.
pub fn recording_factory(
    log: CallLog,
) -> impl FnMut(&DescriptorEntry, &Path) -> Result<RecordingSession, BoxError> {
    let mut next = 0;
    move |entry: &DescriptorEntry, root: &Path| {
        let session = RecordingSession {
            position: next,
            entry: entry.clone(),
            root: root.to_path_buf(),
            log: Rc::clone(&log),
            fail_on: None,
        };
        next += 1;
        Ok(session)
    }
}

/// Path to a file under tests/fixtures.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
