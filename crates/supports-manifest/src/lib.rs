//! supports-manifest: declaration files that populate a [`Directory`].
//!
//! A manifest declares support for any number of types at once:
//!
//! ```toml
//! [post_type.post]
//! thumbnail = true
//!
//! [post_type.page]
//! thumbnail = true
//! editor = ["block", 2]
//! ```
//!
//! `true` declares the bare marker, an array declares extra arguments, and
//! any other value is stored as a single extra argument. TOML, JSON, and YAML
//! are accepted; declaration order is preserved.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use supports_core::{Directory, FeatureValue};

/// Item name → feature name → declared value.
type ItemTable = IndexMap<String, IndexMap<String, serde_json::Value>>;

/// Errors raised while reading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("unsupported manifest format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("failed to load manifest: {0}")]
    Load(#[from] config::ConfigError),
}

/// Manifest syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    fn file_format(self) -> config::FileFormat {
        match self {
            Format::Toml => config::FileFormat::Toml,
            Format::Json => config::FileFormat::Json,
            Format::Yaml => config::FileFormat::Yaml,
        }
    }
}

/// What [`Manifest::apply`] declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub types: usize,
    pub items: usize,
    pub features: usize,
}

impl std::ops::AddAssign for ApplyReport {
    fn add_assign(&mut self, rhs: Self) {
        self.types += rhs.types;
        self.items += rhs.items;
        self.features += rhs.features;
    }
}

/// Parsed declarations, grouped by type.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    types: IndexMap<String, ItemTable>,
}

impl Manifest {
    /// Read a manifest file; the format comes from its extension.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let format = Format::from_path(path)
            .ok_or_else(|| ManifestError::UnsupportedFormat(path.to_path_buf()))?;
        let types = collect_types(&config::File::from(path).format(format.file_format()))?;
        tracing::debug!(path = %path.display(), "manifest loaded");
        Ok(Self { types })
    }

    /// Parse manifest text.
    pub fn parse(text: &str, format: Format) -> Result<Self, ManifestError> {
        let types = collect_types(&config::File::from_str(text, format.file_format()))?;
        Ok(Self { types })
    }

    /// Type names declared by this manifest, in file order.
    pub fn types(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Declare every entry in the matching registries of `directory`.
    /// Items with no features are skipped.
    pub fn apply(&self, directory: &Directory) -> ApplyReport {
        let mut report = ApplyReport::default();
        for (kind, items) in &self.types {
            let registry = directory.instance(kind);
            report.types += 1;
            for (item, features) in items {
                if features.is_empty() {
                    tracing::debug!(kind, item, "skipping item without features");
                    continue;
                }
                report.items += 1;
                for (feature, value) in features {
                    registry.declare(item, feature, FeatureValue::from_declared(value.clone()));
                    report.features += 1;
                }
            }
        }
        tracing::info!(
            types = report.types,
            items = report.items,
            features = report.features,
            "manifest applied"
        );
        report
    }
}

/// Read the top-level tables of `source` as-is.
///
/// `config::Config` treats top-level keys as paths, so `"wp.site"` would
/// become a nested `wp` table. Collecting the source directly keeps type
/// names verbatim.
fn collect_types(
    source: &impl config::Source,
) -> Result<IndexMap<String, ItemTable>, ManifestError> {
    source
        .collect()?
        .into_iter()
        .map(|(kind, items)| -> Result<_, ManifestError> {
            Ok((kind, items.try_deserialize::<ItemTable>()?))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
