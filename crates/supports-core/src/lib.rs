//! supports-core: per-type feature-support registries.
//!
//! A [`Directory`] hands out one [`Registry`] per type name. Callers declare
//! which features an item supports during setup and query the declarations
//! later, either point-wise (`has`, `get`, `all`) or through the query engine
//! ([`Registry::select`]).
//!
//! # Architecture
//!
//! ```text
//! Directory ──► Registry ──► select(Query, Operator)
//!   (per type)    (item → feature → value)
//! ```
//!
//! Everything lives in memory for the life of the process.

pub mod config;
pub mod directory;
pub mod error;
pub mod query;
pub mod registry;
pub mod types;

pub use directory::{instance, registered_types, Directory};
pub use error::RegistryError;
pub use query::{Operator, Query};
pub use registry::{FeatureMap, Registry};
pub use types::FeatureValue;
