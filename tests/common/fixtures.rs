//! Static manifest texts used across harnesses.

/// Two types in TOML: post types and sites.
pub const MANIFEST_TOML: &str = r#"
[post_type.post]
thumbnail = true
comments = true

[post_type.page]
thumbnail = true
editor = ["block", 2]

[post_type.attachment]
comments = false

[site.main]
multisite = true
"#;

/// The same post types in JSON.
pub const MANIFEST_JSON: &str = r#"{
  "post_type": {
    "post": { "thumbnail": true, "comments": true },
    "page": { "thumbnail": true, "editor": ["block", 2] },
    "attachment": { "comments": false }
  }
}"#;

/// The same post types in YAML.
pub const MANIFEST_YAML: &str = r#"
post_type:
  post:
    thumbnail: true
    comments: true
  page:
    thumbnail: true
    editor: ["block", 2]
  attachment:
    comments: false
"#;

/// Write `text` to `name` inside a fresh temp dir. Keep the returned dir
/// alive for as long as the file is needed.
pub fn write_manifest(name: &str, text: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, text).expect("write manifest");
    (dir, path)
}
