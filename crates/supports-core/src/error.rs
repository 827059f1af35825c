//! Error type for the registry query surface.

/// The only failure a registry reports: a dynamic query whose shape is not a
/// feature name, a list of names, or a feature filter. Every other operation
/// resolves unknown items and features to empty or absent results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(
        "invalid query argument: expected a feature name, a list of feature names, \
         or a feature filter, found {found}"
    )]
    InvalidArgument { found: &'static str },
}
