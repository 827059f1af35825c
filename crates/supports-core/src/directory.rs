//! Directory: keyed collection of registries, one per type.
//!
//! The first request for a type creates its [`Registry`]; later requests get
//! the same `Arc`. Registries are never dropped by the directory.

use crate::registry::Registry;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Directory> = OnceLock::new();

/// Owns every registry handed out for its types.
#[derive(Debug, Default)]
pub struct Directory {
    instances: RwLock<IndexMap<String, Arc<Registry>>>,
}

impl Directory {
    /// An empty directory, independent of [`Directory::global`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide directory.
    pub fn global() -> &'static Directory {
        GLOBAL.get_or_init(Directory::new)
    }

    /// The registry for `kind`, created empty on first use.
    pub fn instance(&self, kind: &str) -> Arc<Registry> {
        if let Some(registry) = self.instances.read().get(kind) {
            return Arc::clone(registry);
        }
        let mut instances = self.instances.write();
        // Another writer may have raced us between the two locks.
        let registry = instances.entry(kind.to_string()).or_insert_with(|| {
            tracing::trace!(kind, "registry created");
            Arc::new(Registry::new(kind))
        });
        Arc::clone(registry)
    }

    /// Every type requested so far, in first-request order.
    pub fn registered_types(&self) -> Vec<String> {
        self.instances.read().keys().cloned().collect()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.instances.read().contains_key(kind)
    }
}

/// [`Directory::instance`] on the global directory.
pub fn instance(kind: &str) -> Arc<Registry> {
    Directory::global().instance(kind)
}

/// [`Directory::registered_types`] on the global directory.
pub fn registered_types() -> Vec<String> {
    Directory::global().registered_types()
}
