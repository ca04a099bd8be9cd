use std::path::{Path, PathBuf};

pub const CATALOGS_DIR: &str = "questions";
pub const WHITELIST_FILE: &str = "config/bannedWhitelist.json";
pub const SUMMARY_FILE: &str = "tmp/content-validation-summary.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub catalogs_dir: PathBuf,
    pub whitelist_path: PathBuf,
    pub summary_path: PathBuf,
    pub require_family_safe: bool,
    pub legacy_extensions: Vec<String>,
}

impl PipelineConfig {
    pub fn from_root(root: &Path) -> Self {
        Self {
            catalogs_dir: root.join(CATALOGS_DIR),
            whitelist_path: root.join(WHITELIST_FILE),
            summary_path: root.join(SUMMARY_FILE),
            require_family_safe: true,
            legacy_extensions: vec!["jsx".to_string(), "js".to_string()],
        }
    }

    pub fn with_summary_path(mut self, path: PathBuf) -> Self {
        self.summary_path = path;
        self
    }

    pub fn with_require_family_safe(mut self, enabled: bool) -> Self {
        self.require_family_safe = enabled;
        self
    }
}

/// Strictness is on unless the toggle is literally `"false"`.
pub fn require_family_safe_from_env(value: Option<&str>) -> bool {
    value != Some("false")
}
