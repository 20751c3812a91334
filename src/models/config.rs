//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::StatusCategory;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where fragments come from and how they are enveloped
    #[serde(default)]
    pub source: SourceConfig,

    /// Page size and pagination controls
    #[serde(default)]
    pub table: TableConfig,

    /// Best-effort local snapshot
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Status to visual category rules, checked in order
    #[serde(default = "defaults::status_rules")]
    pub status_rules: Vec<StatusRule>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.location.trim().is_empty() {
            return Err(AppError::validation("source.location is empty"));
        }
        if self.source.manifest.trim().is_empty() {
            return Err(AppError::validation("source.manifest is empty"));
        }
        if self.source.record_tag.trim().is_empty() {
            return Err(AppError::validation("source.record_tag is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if self.source.max_concurrent == 0 {
            return Err(AppError::validation("source.max_concurrent must be > 0"));
        }
        self.table.validate()?;
        if self.status_rules.iter().any(|r| r.contains.trim().is_empty()) {
            return Err(AppError::validation("status_rules entry has empty pattern"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            table: TableConfig::default(),
            snapshot: SnapshotConfig::default(),
            status_rules: defaults::status_rules(),
        }
    }
}

/// Fragment source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL (`http(s)://…`) or local directory holding the fragments
    #[serde(default = "defaults::location")]
    pub location: String,

    /// Manifest file name, relative to `location`
    #[serde(default = "defaults::manifest")]
    pub manifest: String,

    /// Root element wrapping each fragment
    #[serde(default = "defaults::root_tag")]
    pub root_tag: String,

    /// Element holding one record
    #[serde(default = "defaults::record_tag")]
    pub record_tag: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent fragment fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: defaults::location(),
            manifest: defaults::manifest(),
            root_tag: defaults::root_tag(),
            record_tag: defaults::record_tag(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

impl SourceConfig {
    pub fn is_remote(&self) -> bool {
        let location = self.location.trim_start();
        location.starts_with("http://") || location.starts_with("https://")
    }
}

/// Table presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Initial rows per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Choices offered by the page-size control
    #[serde(default = "defaults::page_size_options")]
    pub page_size_options: Vec<usize>,

    /// Width of the page-number window
    #[serde(default = "defaults::max_page_buttons")]
    pub max_page_buttons: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            page_size_options: defaults::page_size_options(),
            max_page_buttons: defaults::max_page_buttons(),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AppError::validation("table.page_size must be > 0"));
        }
        if self.page_size_options.iter().any(|&size| size == 0) {
            return Err(AppError::validation(
                "table.page_size_options must all be > 0",
            ));
        }
        if self.max_page_buttons == 0 {
            return Err(AppError::validation("table.max_page_buttons must be > 0"));
        }
        Ok(())
    }
}

/// Local snapshot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "defaults::snapshot_enabled")]
    pub enabled: bool,

    /// Snapshot file path
    #[serde(default = "defaults::snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::snapshot_enabled(),
            path: defaults::snapshot_path(),
        }
    }
}

/// Maps statuses containing `contains` to a visual category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRule {
    /// Lowercase substring to look for
    pub contains: String,
    pub category: StatusCategory,
}

impl StatusRule {
    pub fn new(contains: &str, category: StatusCategory) -> Self {
        Self {
            contains: contains.to_lowercase(),
            category,
        }
    }
}

mod defaults {
    use super::StatusRule;
    use crate::models::StatusCategory;

    // Source defaults
    pub fn location() -> String {
        "storage/data".into()
    }
    pub fn manifest() -> String {
        "files.json".into()
    }
    pub fn root_tag() -> String {
        "dataroot".into()
    }
    pub fn record_tag() -> String {
        "record".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; cheque-table/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Table defaults
    pub fn page_size() -> usize {
        10
    }
    pub fn page_size_options() -> Vec<usize> {
        vec![5, 10, 25, 50, 100]
    }
    pub fn max_page_buttons() -> usize {
        5
    }

    // Snapshot defaults
    pub fn snapshot_enabled() -> bool {
        true
    }
    pub fn snapshot_path() -> String {
        "storage/snapshot.json".into()
    }

    // More specific patterns come first.
    pub fn status_rules() -> Vec<StatusRule> {
        use StatusCategory::*;
        vec![
            StatusRule::new("returned", Returned),
            StatusRule::new("undelivered", Returned),
            StatusRule::new("cancel", Cancelled),
            StatusRule::new("stopped", Cancelled),
            StatusRule::new("ready for despatch", Ready),
            StatusRule::new("ready for dispatch", Ready),
            StatusRule::new("despatched through gpo", Dispatched),
            StatusRule::new("despatched through courier", Dispatched),
            StatusRule::new("despatched", Dispatched),
            StatusRule::new("dispatched", Dispatched),
            StatusRule::new("delivered", Delivered),
            StatusRule::new("received", Delivered),
            StatusRule::new("collected", Delivered),
            StatusRule::new("signed", Ready),
            StatusRule::new("prepared", Ready),
            StatusRule::new("under process", Processing),
            StatusRule::new("in process", Processing),
            StatusRule::new("processing", Processing),
            StatusRule::new("pending", Pending),
            StatusRule::new("awaiting", Pending),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.table.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.source.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [source]
            location = "https://example.com/registers/"

            [table]
            page_size = 25

            [[status_rules]]
            contains = "honoured"
            category = "delivered"
            "#,
        )
        .unwrap();

        assert!(config.source.is_remote());
        assert_eq!(config.source.manifest, "files.json");
        assert_eq!(config.table.page_size, 25);
        assert_eq!(config.table.max_page_buttons, 5);
        assert_eq!(config.status_rules.len(), 1);
        assert_eq!(config.status_rules[0].category, StatusCategory::Delivered);
    }

    #[test]
    fn local_location_is_not_remote() {
        assert!(!SourceConfig::default().is_remote());
    }
}
