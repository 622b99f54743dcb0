//! Per-session entries recovered from a project descriptor.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// One session entry from the descriptor's `UserData` sequence.
///
/// Field names and values are vendor data and are kept exactly as parsed,
/// in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorEntry(Mapping);

impl DescriptorEntry {
    pub fn new(fields: Mapping) -> Self {
        Self(fields)
    }

    /// Look up a field by its string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a field and return it only if it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in descriptor order.
    pub fn iter(&self) -> serde_yaml::mapping::Iter<'_> {
        self.0.iter()
    }

    /// Convert the entry into a JSON object, keeping field order.
    ///
    /// Fails when a key has no JSON object-key form (a sequence or mapping).
    pub fn to_json(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(&self.0)?)
    }
}

impl From<Mapping> for DescriptorEntry {
    fn from(fields: Mapping) -> Self {
        Self(fields)
    }
}

impl FromIterator<(Value, Value)> for DescriptorEntry {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DescriptorEntry {
    type Item = (&'a Value, &'a Value);
    type IntoIter = serde_yaml::mapping::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DescriptorEntry {
        [
            (Value::from("Name"), Value::from("Иван")),
            (Value::from("Age"), Value::from(31)),
            (Value::from("Gender"), Value::from(0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_field_lookup() {
        let entry = entry();
        assert_eq!(entry.len(), 3);
        assert_eq!(entry.get_str("Name"), Some("Иван"));
        assert_eq!(entry.get("Age").and_then(Value::as_u64), Some(31));
        assert!(entry.get("Missing").is_none());
    }

    #[test]
    fn test_iteration_keeps_order() {
        let keys: Vec<_> = entry()
            .iter()
            .filter_map(|(k, _)| k.as_str().map(String::from))
            .collect();
        assert_eq!(keys, vec!["Name", "Age", "Gender"]);
    }

    #[test]
    fn test_to_json_keeps_order() {
        let json = entry().to_json().unwrap();
        let keys: Vec<_> = json.keys().cloned().collect();
        assert_eq!(keys, vec!["Name", "Age", "Gender"]);
        assert_eq!(json["Age"], serde_json::json!(31));
    }

    #[test]
    fn test_to_json_rejects_structured_key() {
        let entry: DescriptorEntry = [(Value::Sequence(vec![Value::from(1u64)]), Value::from("x"))]
            .into_iter()
            .collect();
        assert!(entry.to_json().is_err());
    }
}
