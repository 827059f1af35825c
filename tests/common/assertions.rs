//! Domain-specific assertion macros for supports harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* registry invariant was violated.

use supports::{Operator, Query, Registry};

// ---------------------------------------------------------------------------
// Declaration assertions
// ---------------------------------------------------------------------------

/// Assert that an item declares a feature (any value).
///
/// ```rust
/// assert_supports!(registry, "page", "editor");
/// ```
#[macro_export]
macro_rules! assert_supports {
    ($registry:expr, $item:expr, $feature:expr) => {{
        let registry: &supports::Registry = &$registry;
        let (item, feature): (&str, &str) = ($item, $feature);
        if !registry.has(item, feature) {
            panic!(
                "assert_supports! failed: {:?} does not declare {:?}.\n  declared: {:?}",
                item,
                feature,
                registry.all(item).keys().collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that an item does not declare a feature, and that `get` agrees.
#[macro_export]
macro_rules! assert_not_supports {
    ($registry:expr, $item:expr, $feature:expr) => {{
        let registry: &supports::Registry = &$registry;
        let (item, feature): (&str, &str) = ($item, $feature);
        if registry.has(item, feature) || registry.get(item, feature).is_some() {
            panic!(
                "assert_not_supports! failed: {:?} declares {:?} = {:?}",
                item,
                feature,
                registry.get(item, feature)
            );
        }
    }};
}

/// Assert the JSON form of a declared value.
///
/// ```rust
/// assert_value!(registry, "page", "editor", ["a"]);
/// ```
#[macro_export]
macro_rules! assert_value {
    ($registry:expr, $item:expr, $feature:expr, $value:tt) => {{
        let registry: &supports::Registry = &$registry;
        let expected = serde_json::json!($value);
        match registry.get($item, $feature) {
            Some(actual) if actual.to_json() == expected => {}
            Some(actual) => panic!(
                "assert_value! failed:\n  {:?}[{:?}]\n  expected: {}\n  actual:   {}",
                $item, $feature, expected, actual
            ),
            None => panic!(
                "assert_value! failed: {:?} does not declare {:?}",
                $item, $feature
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Query assertions
// ---------------------------------------------------------------------------

/// Assert the exact, ordered result of a query.
///
/// ```rust
/// assert_selects!(registry, ["thumbnail", "editor"], Operator::And, ["page"]);
/// ```
#[macro_export]
macro_rules! assert_selects {
    ($registry:expr, $query:expr, $op:expr, [$($item:expr),* $(,)?]) => {{
        let registry: &supports::Registry = &$registry;
        let query: supports::Query = $query.into();
        let expected: Vec<String> = vec![$($item.to_string()),*];
        let actual = registry.select(&query, $op);
        pretty_assertions::assert_eq!(
            actual, expected,
            "query {:?} with {} on {:?}", query, $op, registry.kind()
        );
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Items for which `has(item, feature)` is true, in registry order.
pub fn supporting(registry: &Registry, feature: &str) -> Vec<String> {
    registry
        .keys()
        .into_iter()
        .filter(|item| registry.has(item, feature))
        .collect()
}

/// Every item of the registry minus `excluded`, in registry order.
pub fn keys_without(registry: &Registry, excluded: &[String]) -> Vec<String> {
    registry
        .keys()
        .into_iter()
        .filter(|item| !excluded.contains(item))
        .collect()
}

/// Shorthand for a list query.
pub fn names(features: &[&str]) -> Query {
    Query::from(features)
}

/// All three operators, for exhaustive loops.
pub const OPERATORS: [Operator; 3] = [Operator::And, Operator::Or, Operator::Not];
