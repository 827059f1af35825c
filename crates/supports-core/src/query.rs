//! Query shapes and boolean operators understood by [`Registry::select`].
//!
//! A query is one of three explicit shapes: a single feature name, a list of
//! feature names, or a filter mapping feature names to required values. The
//! shape is chosen by the caller; [`Query::from_json`] is the only place a
//! shape is inferred, and the only place a query can be rejected.
//!
//! [`Registry::select`]: crate::registry::Registry::select

use crate::error::RegistryError;
use crate::types::FeatureValue;
use indexmap::IndexMap;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// How the per-feature item sets of a query are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// Items supporting every queried feature.
    #[default]
    And,
    /// Items supporting at least one queried feature.
    Or,
    /// Registered items supporting none of the queried features.
    Not,
}

impl From<&str> for Operator {
    /// Case-insensitive. Unrecognised operators resolve to [`Operator::And`].
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("not") {
            Self::Not
        } else if s.eq_ignore_ascii_case("or") {
            Self::Or
        } else {
            Self::And
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        const VARIANTS: &[&str] = &["AND", "OR", "NOT"];
        let raw = String::deserialize(deserializer)?;
        VARIANTS
            .iter()
            .find(|name| raw.eq_ignore_ascii_case(name))
            .map(|name| Self::from(*name))
            .ok_or_else(|| serde::de::Error::unknown_variant(&raw, VARIANTS))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::And => write!(f, "AND"),
            Operator::Or => write!(f, "OR"),
            Operator::Not => write!(f, "NOT"),
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// The feature side of a registry query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// A single feature name.
    ByName(String),
    /// Several feature names, combined with the operator.
    ByNames(Vec<String>),
    /// Feature name to required value. An item matches a pair when its stored
    /// value for that feature equals the given value.
    ByFilter(IndexMap<String, FeatureValue>),
}

impl Query {
    /// Build a query from a dynamically shaped JSON value.
    ///
    /// A string is a feature name, an array of strings is a list of names, and
    /// an object is a filter whose values go through
    /// [`FeatureValue::from_declared`]. Anything else fails with
    /// [`RegistryError::InvalidArgument`].
    pub fn from_json(value: &serde_json::Value) -> Result<Self, RegistryError> {
        match value {
            serde_json::Value::String(name) => Ok(Self::ByName(name.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(name) => Ok(name.clone()),
                    other => Err(RegistryError::InvalidArgument {
                        found: json_kind(other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::ByNames),
            serde_json::Value::Object(pairs) => Ok(Self::ByFilter(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), FeatureValue::from_declared(v.clone())))
                    .collect(),
            )),
            other => Err(RegistryError::InvalidArgument {
                found: json_kind(other),
            }),
        }
    }

    /// Feature names this query mentions, in query order.
    pub fn feature_names(&self) -> Vec<&str> {
        match self {
            Query::ByName(name) => vec![name.as_str()],
            Query::ByNames(names) => names.iter().map(String::as_str).collect(),
            Query::ByFilter(filter) => filter.keys().map(String::as_str).collect(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl From<&str> for Query {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for Query {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

impl From<Vec<String>> for Query {
    fn from(names: Vec<String>) -> Self {
        Self::ByNames(names)
    }
}

impl From<&[&str]> for Query {
    fn from(names: &[&str]) -> Self {
        Self::ByNames(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Query {
    fn from(names: [&str; N]) -> Self {
        Self::ByNames(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<IndexMap<String, FeatureValue>> for Query {
    fn from(filter: IndexMap<String, FeatureValue>) -> Self {
        Self::ByFilter(filter)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
