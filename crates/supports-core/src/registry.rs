//! Registry: per-type map from item name to the features it supports.
//!
//! A [`Registry`] is only reachable through a [`Directory`](crate::Directory),
//! which hands out the same `Arc<Registry>` to every caller asking for a type.
//! All methods take `&self`; storage sits behind a read-write lock so the
//! shared handle can be read and written from several threads.
//!
//! # Query engine
//!
//! [`Registry::select`] resolves a [`Query`] against the current declarations.
//! Name and list queries build a transient inverted index (feature → items)
//! on every call; filter queries scan the forward map directly.
//!
//! | Query | `And` | `Or` | `Not` |
//! |-------|-------|------|-------|
//! | `ByName(f)` | items with `f` | items with `f` | keys without `f` |
//! | `ByNames(fs)` | items with all of `fs` | items with any of `fs` | keys with none of `fs` |
//! | `ByFilter(m)` | items matching every pair | items matching a pair | items matching no pair |

use crate::error::RegistryError;
use crate::query::{Operator, Query};
use crate::types::FeatureValue;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

/// Feature name → declared value for a single item.
pub type FeatureMap = IndexMap<String, FeatureValue>;

/// Feature-support declarations for one type (e.g. `"taxonomy"`, `"site"`).
#[derive(Debug)]
pub struct Registry {
    kind: String,
    features: RwLock<IndexMap<String, FeatureMap>>,
}

impl Registry {
    /// Only the directory creates registries.
    pub(crate) fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            features: RwLock::new(IndexMap::new()),
        }
    }

    /// The type name this registry was created for.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Declare `feature` for `item` with no extra data.
    pub fn add(&self, item: &str, feature: &str) {
        self.add_one(item, feature, Vec::new());
    }

    /// Declare `feature` for `item`. Empty `args` stores the marker; otherwise
    /// the arguments are stored in order. Re-declaring overwrites.
    pub fn add_one(&self, item: &str, feature: &str, args: Vec<serde_json::Value>) {
        self.declare(item, feature, FeatureValue::from_args(args));
    }

    /// Declare every feature in `features` for `item`, all sharing the same
    /// argument list.
    pub fn add_many<I, S>(&self, item: &str, features: I, args: Vec<serde_json::Value>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store(item, features, FeatureValue::from_args(args));
    }

    /// Store an already built value for `feature`. Re-declaring overwrites.
    pub fn declare(&self, item: &str, feature: &str, value: FeatureValue) {
        self.store(item, [feature], value);
    }

    fn store<I, S>(&self, item: &str, features: I, value: FeatureValue)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut storage = self.features.write();
        let entry = storage.entry(item.to_string()).or_default();
        for feature in features {
            let feature = feature.into();
            tracing::debug!(kind = %self.kind, item, feature = %feature, value = %value, "support added");
            entry.insert(feature, value.clone());
        }
        // An empty batch must not leave a featureless item behind.
        if entry.is_empty() {
            storage.shift_remove(item);
        }
    }

    /// Withdraw `feature` from `item`. Absent items or features are a no-op.
    /// The item disappears once its last feature is removed.
    pub fn remove(&self, item: &str, feature: &str) {
        let mut storage = self.features.write();
        let Some(entry) = storage.get_mut(item) else {
            return;
        };
        if entry.shift_remove(feature).is_some() {
            tracing::debug!(kind = %self.kind, item, feature, "support removed");
        }
        if entry.is_empty() {
            storage.shift_remove(item);
        }
    }

    // -----------------------------------------------------------------------
    // Point lookup
    // -----------------------------------------------------------------------

    /// Whether `item` declares `feature`, whatever value it carries.
    pub fn has(&self, item: &str, feature: &str) -> bool {
        self.features
            .read()
            .get(item)
            .is_some_and(|entry| entry.contains_key(feature))
    }

    /// The declared value, or `None` when `item` does not declare `feature`.
    pub fn get(&self, item: &str, feature: &str) -> Option<FeatureValue> {
        self.features
            .read()
            .get(item)
            .and_then(|entry| entry.get(feature))
            .cloned()
    }

    /// Snapshot of every feature `item` declares; empty for unknown items.
    /// Changes to the returned map do not reach the registry.
    pub fn all(&self, item: &str) -> FeatureMap {
        self.features.read().get(item).cloned().unwrap_or_default()
    }

    /// Items holding at least one feature, in first-declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.features.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.features.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.read().is_empty()
    }

    // -----------------------------------------------------------------------
    // Query engine
    // -----------------------------------------------------------------------

    /// Items matching `query` under `op`. Filter queries compare values with
    /// `==`.
    pub fn select(&self, query: &Query, op: Operator) -> Vec<String> {
        self.select_with(query, op, |stored, wanted| stored == wanted)
    }

    /// Resolve a dynamically shaped query (see [`Query::from_json`]).
    pub fn select_json(
        &self,
        query: &serde_json::Value,
        op: Operator,
    ) -> Result<Vec<String>, RegistryError> {
        let query = Query::from_json(query)?;
        Ok(self.select(&query, op))
    }

    /// Like [`Registry::select`], with a caller-supplied value matcher for
    /// filter queries. `matches(stored, wanted)` decides whether an item's
    /// stored value satisfies a filter pair.
    pub fn select_with<F>(&self, query: &Query, op: Operator, matches: F) -> Vec<String>
    where
        F: Fn(&FeatureValue, &FeatureValue) -> bool,
    {
        let storage = self.features.read();
        let items = match query {
            Query::ByName(feature) => {
                let index = inverted_index(&storage);
                let supporting = index.get(feature.as_str()).map(Vec::as_slice).unwrap_or(&[]);
                match op {
                    Operator::Not => complement(&storage, supporting.iter().copied()),
                    // A single feature has no sets to combine, so AND and OR agree.
                    Operator::And | Operator::Or => {
                        supporting.iter().map(|item| item.to_string()).collect()
                    }
                }
            }
            Query::ByNames(features) => {
                let index = inverted_index(&storage);
                let sets: Vec<&[&str]> = features
                    .iter()
                    .map(|f| index.get(f.as_str()).map(Vec::as_slice).unwrap_or(&[]))
                    .collect();
                match op {
                    Operator::Or => union(&sets).into_iter().map(str::to_string).collect(),
                    Operator::Not => complement(&storage, union(&sets)),
                    Operator::And => intersection(&sets),
                }
            }
            Query::ByFilter(filter) => filter_items(&storage, filter, op, &matches),
        };
        tracing::debug!(kind = %self.kind, query = ?query, op = %op, hits = items.len(), "query resolved");
        items
    }
}

// ---------------------------------------------------------------------------
// Set construction helpers
// ---------------------------------------------------------------------------

/// Feature name → items declaring it, each list in item order.
fn inverted_index(storage: &IndexMap<String, FeatureMap>) -> IndexMap<&str, Vec<&str>> {
    let mut index: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for (item, entry) in storage {
        for feature in entry.keys() {
            index.entry(feature.as_str()).or_default().push(item.as_str());
        }
    }
    index
}

/// Distinct items across all sets, first-seen order.
fn union<'a>(sets: &[&[&'a str]]) -> IndexSet<&'a str> {
    sets.iter().flat_map(|set| set.iter().copied()).collect()
}

/// Items of the first set present in every other set. No sets, no items.
fn intersection(sets: &[&[&str]]) -> Vec<String> {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|item| rest.iter().all(|set| set.contains(*item)))
        .map(|item| item.to_string())
        .collect()
}

/// Registered items not in `excluded`, registry order.
fn complement<'a, I>(storage: &IndexMap<String, FeatureMap>, excluded: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let excluded: IndexSet<&str> = excluded.into_iter().collect();
    storage
        .keys()
        .filter(|item| !excluded.contains(item.as_str()))
        .cloned()
        .collect()
}

/// Forward scan for filter queries. An empty filter keeps every item.
fn filter_items<F>(
    storage: &IndexMap<String, FeatureMap>,
    filter: &IndexMap<String, FeatureValue>,
    op: Operator,
    matches: &F,
) -> Vec<String>
where
    F: Fn(&FeatureValue, &FeatureValue) -> bool,
{
    if filter.is_empty() {
        return storage.keys().cloned().collect();
    }
    storage
        .iter()
        .filter(|(_, entry)| {
            let matched = filter
                .iter()
                .filter(|(feature, wanted)| {
                    entry
                        .get(feature.as_str())
                        .is_some_and(|stored| matches(stored, *wanted))
                })
                .count();
            match op {
                Operator::And => matched == filter.len(),
                Operator::Or => matched > 0,
                Operator::Not => matched == 0,
            }
        })
        .map(|(item, _)| item.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
