//! Session selectors for indexed access and batch operations.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which sessions an access or batch operation targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    /// Every session, in stored order.
    #[default]
    All,
    /// A single position.
    Single(usize),
    /// Positions in the requested order; duplicates are allowed.
    Many(Vec<usize>),
}

/// A selector key that is neither a position nor a list of positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Wrong type of {value}: {kind}")]
pub struct InvalidSelector {
    /// The offending value as written.
    pub value: String,
    /// Type name of the offending value.
    pub kind: &'static str,
}

impl Selector {
    /// Positions named by this selector, given a collection of `len` sessions.
    /// Bounds are not checked here.
    pub fn positions(&self, len: usize) -> Vec<usize> {
        match self {
            Selector::All => (0..len).collect(),
            Selector::Single(i) => vec![*i],
            Selector::Many(indices) => indices.clone(),
        }
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Single(index)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(indices: Vec<usize>) -> Self {
        Selector::Many(indices)
    }
}

impl From<Option<Vec<usize>>> for Selector {
    fn from(indices: Option<Vec<usize>>) -> Self {
        indices.map_or(Selector::All, Selector::Many)
    }
}

impl TryFrom<&Value> for Selector {
    type Error = InvalidSelector;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(position_from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Selector::Many),
            other => position_from_value(other).map(Selector::Single),
        }
    }
}

fn position_from_value(value: &Value) -> Result<usize, InvalidSelector> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| InvalidSelector {
            value: value.to_string(),
            kind: value_kind(value),
        })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_u64() => "int",
        Value::Number(n) if n.is_i64() => "negative int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl FromStr for Selector {
    type Err = InvalidSelector;

    /// Accepts `all`, a single position (`3`) or a comma-separated list (`0,2,4`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }

        let parse = |part: &str| {
            part.trim().parse::<usize>().map_err(|_| InvalidSelector {
                value: format!("{:?}", part.trim()),
                kind: "str",
            })
        };

        if s.contains(',') {
            s.split(',')
                .map(parse)
                .collect::<Result<Vec<_>, _>>()
                .map(Selector::Many)
        } else {
            parse(s).map(Selector::Single)
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => write!(f, "all"),
            Selector::Single(i) => write!(f, "{}", i),
            Selector::Many(indices) => {
                let parts: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}
