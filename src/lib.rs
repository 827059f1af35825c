//! supports: feature-support registries and their command-line front end.
//!
//! This crate re-exports the registry core and the manifest loader so that
//! integration tests and the binary import them from one place.
//!
//! # Architecture
//!
//! ```text
//! Manifest ──► Directory ──► Registry ──► select(Query, Operator)
//!                                │
//!                                └──► has / get / all / keys
//! ```

pub mod cli;

pub use supports_core::{
    config, instance, registered_types, Directory, FeatureMap, FeatureValue, Operator, Query,
    Registry, RegistryError,
};
pub use supports_manifest::{ApplyReport, Format, Manifest, ManifestError};
