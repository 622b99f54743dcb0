//! Sessions table aggregation.
//!
//! Rows are keyed by each session's own `index`. Columns are the union of all
//! other fields in first-appearance order; a session lacking a column gets a
//! null cell.

use crate::error::AggregationError;
use crate::session::Session;
use gazeproj_types::{INDEX_FIELD, SessionRow, SessionsTable};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Collect `session_info()` from every session into one table.
pub fn aggregate<'a, S, I>(sessions: I) -> Result<SessionsTable, AggregationError>
where
    S: Session + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut records = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (position, session) in sessions.into_iter().enumerate() {
        let info = session
            .session_info()
            .map_err(|source| AggregationError::Info { position, source })?;

        let index = match info.index() {
            Some(Value::Null) | None => return Err(AggregationError::MissingIndex { position }),
            Some(index) => index.clone(),
        };

        let key = index.to_string();
        if let Some(&first) = seen.get(&key) {
            return Err(AggregationError::DuplicateIndex {
                index: key,
                first,
                second: position,
            });
        }
        seen.insert(key, position);

        records.push((index, info));
    }

    let mut columns: Vec<String> = Vec::new();
    for (_, info) in &records {
        for (name, _) in info.iter() {
            if name != INDEX_FIELD && !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|(index, info)| SessionRow {
            index,
            values: columns
                .iter()
                .map(|column| info.get(column).cloned().unwrap_or(Value::Null))
                .collect(),
        })
        .collect::<Vec<_>>();

    debug!(
        target: "gazeproj::aggregate",
        "Aggregated {} sessions into {} columns",
        rows.len(),
        columns.len()
    );

    Ok(SessionsTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazeproj_types::{BoxError, ExportOptions, SessionInfo};
    use serde_json::json;

    struct Fixed(Result<SessionInfo, String>);

    impl Session for Fixed {
        fn session_info(&self) -> Result<SessionInfo, BoxError> {
            self.0.clone().map_err(Into::into)
        }

        fn export(&mut self, _options: &ExportOptions) -> Result<(), BoxError> {
            Ok(())
        }

        fn split(&mut self) -> Result<(), BoxError> {
            Ok(())
        }

        fn annotate(&mut self) -> Result<(), BoxError> {
            Ok(())
        }
    }

    fn info(index: u64) -> SessionInfo {
        SessionInfo::with_index(index)
    }

    #[test]
    fn test_rows_keyed_by_reported_index() {
        let sessions = vec![
            Fixed(Ok(info(10).field("name", "a"))),
            Fixed(Ok(info(20).field("name", "b"))),
            Fixed(Ok(info(30).field("name", "c"))),
        ];
        let table = aggregate(&sessions).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns(), ["name".to_string()]);
        let indices: Vec<_> = table.rows().iter().map(|r| r.index.clone()).collect();
        assert_eq!(indices, vec![json!(10), json!(20), json!(30)]);
        assert_eq!(table.cell(&json!(20), "name"), Some(&json!("b")));
    }

    #[test]
    fn test_heterogeneous_fields_are_unioned() {
        let sessions = vec![
            Fixed(Ok(info(0).field("name", "a").field("age", 30))),
            Fixed(Ok(info(1).field("duration", 12.5).field("name", "b"))),
        ];
        let table = aggregate(&sessions).unwrap();

        assert_eq!(table.columns(), ["name", "age", "duration"].map(String::from));
        assert_eq!(table.cell(&json!(0), "duration"), Some(&Value::Null));
        assert_eq!(table.cell(&json!(1), "age"), Some(&Value::Null));
        assert_eq!(table.cell(&json!(1), "duration"), Some(&json!(12.5)));
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let sessions = vec![
            Fixed(Ok(info(0))),
            Fixed(Ok(info(1))),
            Fixed(Ok(info(0))),
        ];
        let err = aggregate(&sessions).unwrap_err();
        assert!(matches!(
            err,
            AggregationError::DuplicateIndex { first: 0, second: 2, .. }
        ));
    }

    #[test]
    fn test_missing_index_rejected() {
        let sessions = vec![
            Fixed(Ok(info(0))),
            Fixed(Ok(SessionInfo::new().field("name", "x"))),
        ];
        let err = aggregate(&sessions).unwrap_err();
        assert!(matches!(err, AggregationError::MissingIndex { position: 1 }));
    }

    #[test]
    fn test_null_index_rejected() {
        let sessions = vec![Fixed(Ok(SessionInfo::with_index(Value::Null)))];
        let err = aggregate(&sessions).unwrap_err();
        assert!(matches!(err, AggregationError::MissingIndex { position: 0 }));
    }

    #[test]
    fn test_info_failure_propagates() {
        let sessions = vec![Fixed(Ok(info(0))), Fixed(Err("no metadata".to_string()))];
        let err = aggregate(&sessions).unwrap_err();
        assert!(matches!(err, AggregationError::Info { position: 1, .. }));
    }

    #[test]
    fn test_empty_project() {
        let sessions: Vec<Fixed> = Vec::new();
        let table = aggregate(&sessions).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
