//! Indexed access, replacement and iteration over a project's sessions.

mod common;

use common::{recording_factory, CallLog, ProjectBuilder, RecordingSession};
use gazeproj_core::{IndexingError, Project, Selector};
use serde_json::json;
use tempfile::TempDir;

fn five_sessions() -> (Project<RecordingSession>, TempDir) {
    let dir = ProjectBuilder::new()
        .with_dirs(&["user", "src", "result"])
        .with_participants(5)
        .build();
    let project = Project::open(dir.path(), recording_factory(CallLog::default())).unwrap();
    (project, dir)
}

fn positions(sessions: &[&RecordingSession]) -> Vec<usize> {
    sessions.iter().map(|s| s.position).collect()
}

#[test]
fn test_length() {
    let (project, _dir) = five_sessions();
    assert_eq!(project.len(), 5);
    assert!(!project.is_empty());
}

#[test]
fn test_get_single_position() {
    let (project, _dir) = five_sessions();
    let third = project.get(2).unwrap();
    assert_eq!(third.position, 2);
    assert_eq!(third.entry.get_str("Name"), Some("Участник 2"));
}

#[test]
fn test_get_out_of_range() {
    let (project, _dir) = five_sessions();
    assert_eq!(
        project.get(5).unwrap_err(),
        IndexingError::OutOfRange { index: 5, len: 5 }
    );
}

#[test]
fn test_get_many_in_requested_order() {
    let (project, _dir) = five_sessions();
    assert_eq!(positions(&project.get_many(&[0, 2, 4]).unwrap()), vec![0, 2, 4]);
    assert_eq!(positions(&project.get_many(&[4, 0, 4]).unwrap()), vec![4, 0, 4]);
}

#[test]
fn test_get_many_with_bad_index_fails() {
    let (project, _dir) = five_sessions();
    assert!(project.get_many(&[0, 2, 10]).is_err());
}

#[test]
fn test_non_integer_keys_are_rejected() {
    let (project, _dir) = five_sessions();

    for (key, kind) in [(json!(1.5), "float"), (json!("x"), "str")] {
        let err: IndexingError = Selector::try_from(&key).unwrap_err().into();
        let message = err.to_string();
        assert!(message.contains(&key.to_string()), "{message}");
        assert!(message.contains(kind), "{message}");
    }

    let selector = Selector::try_from(&json!([1, 3])).unwrap();
    assert_eq!(positions(&project.select(&selector).unwrap()), vec![1, 3]);
}

#[test]
fn test_set_replaces_single_position() {
    let (mut project, _dir) = five_sessions();
    let mut replacement = project.get(4).unwrap().clone();
    replacement.position = 99;

    let previous = project.set(1, replacement).unwrap();
    assert_eq!(previous.position, 1);
    assert_eq!(project.get(1).unwrap().position, 99);
    assert_eq!(project.len(), 5);
}

#[test]
fn test_set_out_of_range() {
    let (mut project, _dir) = five_sessions();
    let replacement = project.get(0).unwrap().clone();
    assert!(matches!(
        project.set(5, replacement),
        Err(IndexingError::OutOfRange { index: 5, len: 5 })
    ));
}

#[test]
fn test_iteration_reflects_current_contents() {
    let (mut project, _dir) = five_sessions();
    let before: Vec<_> = project.iter().map(|s| s.position).collect();
    assert_eq!(before, vec![0, 1, 2, 3, 4]);

    let mut replacement = project.get(0).unwrap().clone();
    replacement.position = 42;
    project.set(3, replacement).unwrap();

    let after: Vec<_> = (&project).into_iter().map(|s| s.position).collect();
    assert_eq!(after, vec![0, 1, 2, 42, 4]);

    // Each traversal starts from the beginning.
    assert_eq!(project.iter().count(), 5);
    assert_eq!(project.iter().count(), 5);
}
