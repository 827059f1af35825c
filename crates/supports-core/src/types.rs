//! Core types for supports-core.
//!
//! This module defines the value stored against every support declaration:
//! the bare [`FeatureValue::Marker`] or the ordered extra arguments supplied
//! when the feature was declared.

use serde::{Serialize, Serializer};
use std::sync::Arc;

/// What a registry records for one (item, feature) pair.
///
/// Declaring a feature without extra data stores [`FeatureValue::Marker`],
/// which reads back as `true`. Declaring it with extra data stores the
/// arguments in the order they were given.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// Feature declared with no extra data.
    Marker,
    /// Feature declared with extra arguments. A batch declaration shares one
    /// allocation between every feature name in the batch.
    Args(Arc<[serde_json::Value]>),
}

impl FeatureValue {
    /// Build the value for a declaration. No arguments means [`Self::Marker`].
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let args: Vec<serde_json::Value> = args.into_iter().collect();
        if args.is_empty() {
            Self::Marker
        } else {
            Self::Args(args.into())
        }
    }

    /// Convert a loosely typed declared value (manifest entry, JSON filter).
    ///
    /// `true` is the marker, an array is the argument list (an empty one is
    /// the marker too), and anything else (including `false` and `null`)
    /// becomes a single-element argument list.
    pub fn from_declared(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(true) => Self::Marker,
            serde_json::Value::Array(items) => Self::from_args(items),
            other => Self::Args(Arc::from(vec![other])),
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }

    /// The extra arguments, or `None` for a bare marker.
    pub fn args(&self) -> Option<&[serde_json::Value]> {
        match self {
            Self::Marker => None,
            Self::Args(args) => Some(&args[..]),
        }
    }

    /// JSON rendering: `true` for the marker, an array otherwise.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Marker => serde_json::Value::Bool(true),
            Self::Args(args) => serde_json::Value::Array(args.to_vec()),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Marker => serializer.serialize_bool(true),
            Self::Args(args) => args[..].serialize(serializer),
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Marker => write!(f, "true"),
            FeatureValue::Args(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        Self::from_declared(serde_json::Value::Bool(value))
    }
}

impl From<Vec<serde_json::Value>> for FeatureValue {
    fn from(args: Vec<serde_json::Value>) -> Self {
        Self::from_args(args)
    }
}
