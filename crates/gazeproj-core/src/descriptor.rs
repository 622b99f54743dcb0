//! Project descriptor (`.prj`) parsing.
//!
//! The descriptor is a YAML-like document behind a fixed-size binary header.
//! The vendor writes `key:value` with no whitespace after the colon and
//! stores text in a legacy single-byte code page, so the body is repaired and
//! decoded before it reaches the YAML parser.
//!
//! YAML is loaded with `serde_yaml` into plain [`Value`] trees. Tags such as
//! `!python/object` never construct host types; they stay inert
//! [`Value::Tagged`] data inside the entry. A key repeated within one mapping
//! keeps its first position and takes the last value.

use crate::config::DescriptorFormat;
use crate::error::{ConfigError, ParseError};
use encoding_rs::Encoding;
use gazeproj_types::DescriptorEntry;
use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Parses descriptor bytes into ordered session entries.
#[derive(Debug, Clone)]
pub struct DescriptorParser {
    header_len: usize,
    encoding: &'static Encoding,
    sessions_key: String,
}

impl Default for DescriptorParser {
    fn default() -> Self {
        Self {
            header_len: 14,
            encoding: encoding_rs::WINDOWS_1251,
            sessions_key: "UserData".to_string(),
        }
    }
}

impl DescriptorParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser for a configured descriptor layout.
    pub fn from_format(format: &DescriptorFormat) -> Result<Self, ConfigError> {
        Ok(Self {
            header_len: format.header_len,
            encoding: format.encoding()?,
            sessions_key: format.sessions_key.clone(),
        })
    }

    /// Read and parse a descriptor file.
    pub fn read(&self, path: &Path) -> Result<Vec<DescriptorEntry>, ParseError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            target: "gazeproj::descriptor",
            "Read {} bytes from {}",
            bytes.len(),
            path.display()
        );
        self.parse(&bytes)
    }

    /// Parse raw descriptor bytes.
    ///
    /// Entries come back in the order they appear in the sessions sequence;
    /// no entry is dropped or reordered.
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<DescriptorEntry>, ParseError> {
        let body = bytes.get(self.header_len..).ok_or(ParseError::Truncated {
            len: bytes.len(),
            header_len: self.header_len,
        })?;

        let repaired = repair_colons(body);
        let text = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(&repaired)
            .ok_or(ParseError::Encoding {
                encoding: self.encoding.name(),
            })?;
        // Single-byte decoders pass unassigned bytes through as C1 controls.
        if self.encoding.is_single_byte() && text.chars().any(|c| ('\u{80}'..='\u{9F}').contains(&c))
        {
            return Err(ParseError::Encoding {
                encoding: self.encoding.name(),
            });
        }
        trace!(target: "gazeproj::descriptor", "Decoded descriptor body:\n{}", text);

        let LastValueWins(document) = serde_yaml::from_str(&text)?;
        let entries = self.extract_entries(document)?;

        debug!(
            target: "gazeproj::descriptor",
            "Parsed {} session entries",
            entries.len()
        );
        Ok(entries)
    }

    fn extract_entries(&self, document: Value) -> Result<Vec<DescriptorEntry>, ParseError> {
        let document = match document {
            Value::Mapping(fields) => fields,
            other => {
                return Err(ParseError::NotAMapping {
                    found: value_kind(&other),
                });
            }
        };

        let sessions = document
            .into_iter()
            .find(|(key, _)| key.as_str() == Some(self.sessions_key.as_str()))
            .map(|(_, value)| value)
            .ok_or_else(|| ParseError::MissingKey {
                key: self.sessions_key.clone(),
            })?;

        let items = match sessions {
            Value::Sequence(items) => items,
            other => {
                return Err(ParseError::NotASequence {
                    key: self.sessions_key.clone(),
                    found: value_kind(&other),
                });
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Mapping(fields) => Ok(DescriptorEntry::new(fields)),
                other => Err(ParseError::EntryNotMapping {
                    position,
                    found: value_kind(&other),
                }),
            })
            .collect()
    }
}

/// Parse descriptor bytes with the default vendor layout.
pub fn parse_descriptor(bytes: &[u8]) -> Result<Vec<DescriptorEntry>, ParseError> {
    DescriptorParser::default().parse(bytes)
}

/// Insert a space after every `:` so `key:value` becomes valid YAML.
pub fn repair_colons(body: &[u8]) -> Vec<u8> {
    let colons = body.iter().filter(|&&b| b == b':').count();
    let mut out = Vec::with_capacity(body.len() + colons);
    for &byte in body {
        out.push(byte);
        if byte == b':' {
            out.push(b' ');
        }
    }
    out
}

/// YAML value whose mappings accept repeated keys, keeping the last value.
struct LastValueWins(Value);

impl<'de> Deserialize<'de> for LastValueWins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LastValueVisitor).map(LastValueWins)
    }
}

struct LastValueVisitor;

impl<'de> Visitor<'de> for LastValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or_else(|_| Value::from(v as f64), Value::from))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        Ok(u64::try_from(v).map_or_else(|_| Value::from(v as f64), Value::from))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        LastValueWins::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(LastValueWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((LastValueWins(key), LastValueWins(value))) = map.next_entry()? {
            if mapping.contains_key(&key) {
                warn!(
                    target: "gazeproj::descriptor",
                    "Repeated key {} in descriptor mapping; keeping the last value",
                    key_label(&key)
                );
            }
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        let (tag, contents) = data.variant::<String>()?;
        if tag.is_empty() {
            return Err(de::Error::custom("empty YAML tag is not allowed"));
        }
        let LastValueWins(value) = contents.newtype_variant()?;
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => format!("\"{}\"", s),
        other => format!("of kind {}", value_kind(other)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
