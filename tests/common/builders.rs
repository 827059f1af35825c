//! Test builders: ergonomic setup for directories and registries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::sync::Arc;
use supports::{Directory, Registry};

// ---------------------------------------------------------------------------
// RegistryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a registry living in its own fresh [`Directory`].
///
/// # Example
///
/// ```rust
/// let registry = RegistryBuilder::new("post_type")
///     .support("post", "thumbnail")
///     .support_with("page", "editor", vec![json!("block")])
///     .build();
/// ```
pub struct RegistryBuilder {
    directory: Directory,
    kind: String,
}

impl RegistryBuilder {
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let directory = Directory::new();
        directory.instance(&kind);
        Self { directory, kind }
    }

    pub fn support(self, item: &str, feature: &str) -> Self {
        self.directory.instance(&self.kind).add(item, feature);
        self
    }

    pub fn support_with(self, item: &str, feature: &str, args: Vec<serde_json::Value>) -> Self {
        self.directory.instance(&self.kind).add_one(item, feature, args);
        self
    }

    pub fn support_many(self, item: &str, features: &[&str], args: Vec<serde_json::Value>) -> Self {
        self.directory
            .instance(&self.kind)
            .add_many(item, features.iter().copied(), args);
        self
    }

    /// The registry; the directory is dropped, the `Arc` keeps it alive.
    pub fn build(self) -> Arc<Registry> {
        self.directory.instance(&self.kind)
    }

    /// The whole directory, for harnesses that need more than one type.
    pub fn build_directory(self) -> Directory {
        self.directory
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// `post: {thumbnail}`, `page: {thumbnail, editor: ["a"]}`.
pub fn post_and_page() -> Arc<Registry> {
    RegistryBuilder::new("post_type")
        .support("post", "thumbnail")
        .support("page", "thumbnail")
        .support_with("page", "editor", vec![serde_json::json!("a")])
        .build()
}

/// A registry of `n` items, `item-0` … `item-{n-1}`. Item `i` supports
/// `f{k}` for every `k` in `0..features` with `i % (k + 1) == 0`.
pub fn build_corpus(n: usize, features: usize) -> Arc<Registry> {
    let registry = RegistryBuilder::new("corpus").build();
    for i in 0..n {
        for k in 0..features {
            if i % (k + 1) == 0 {
                registry.add(&format!("item-{i}"), &format!("f{k}"));
            }
        }
    }
    registry
}
