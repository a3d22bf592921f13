// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for pageauditbot
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock audit: all rules enabled, 4.5:1 contrast threshold, per-rule fault
//! isolation and a true finding count in the summary.

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rule selection
    #[serde(default)]
    pub rules: RulesConfig,

    /// Contrast rule settings
    #[serde(default)]
    pub contrast: ContrastConfig,

    /// How flagged elements are marked up
    #[serde(default)]
    pub annotation: AnnotationConfig,

    /// Rule execution behavior
    #[serde(default)]
    pub engine: EngineConfig,

    /// End-of-run summary settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Directory scanning settings
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Rule selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule ids to skip (e.g. "robots-txt")
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl RulesConfig {
    /// Whether the rule with this id should run
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !self.disabled.iter().any(|d| d == rule_id)
    }
}

/// Contrast rule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Ratios strictly below this are reported
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            min_ratio: default_min_ratio(),
        }
    }
}

fn default_min_ratio() -> f64 {
    4.5
}

/// Annotation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// CSS declaration applied to every flagged element
    #[serde(default = "default_flag_style")]
    pub style: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            style: default_flag_style(),
        }
    }
}

fn default_flag_style() -> String {
    "border: 2px dashed red".to_string()
}

/// Rule execution behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Report a failing rule as a finding and keep going, instead of aborting
    #[serde(default = "default_true")]
    pub isolate_failures: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            isolate_failures: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Summary settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Report the next sequence number (findings + 1) as the total
    #[serde(default)]
    pub legacy_count: bool,
}

/// Directory scanning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory names never descended into
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// File extensions treated as pages
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            extensions: default_extensions(),
        }
    }
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "vendor".to_string(),
        "coverage".to_string(),
    ]
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

impl Config {
    /// Reject values no audit could run with
    pub fn validate(&self) -> Result<()> {
        let ratio = self.contrast.min_ratio;
        if !(1.0..=21.0).contains(&ratio) {
            return Err(AuditError::Config(format!(
                "contrast.min_ratio must be between 1 and 21, got {}",
                ratio
            )));
        }
        if self.annotation.style.trim().is_empty() {
            return Err(AuditError::Config(
                "annotation.style must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a path
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config location, relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".pageauditbot.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content =
        toml::to_string_pretty(&config).map_err(|e| AuditError::Config(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.disabled.is_empty());
        assert!(config.engine.isolate_failures);
        assert!(!config.summary.legacy_count);
        assert_eq!(config.contrast.min_ratio, 4.5);
        assert_eq!(config.annotation.style, "border: 2px dashed red");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            "[rules]\ndisabled = [\"robots-txt\", \"sitemap-xml\"]\n\n[summary]\nlegacy_count = true\n",
        )
        .unwrap();
        assert!(!config.rules.is_enabled("robots-txt"));
        assert!(config.rules.is_enabled("title"));
        assert!(config.summary.legacy_count);
        assert_eq!(config.contrast.min_ratio, 4.5);
        assert!(config.scan.extensions.contains(&"html".to_string()));
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let mut config = Config::default();
        config.contrast.min_ratio = 0.5;
        assert!(matches!(config.validate(), Err(AuditError::Config(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/pageauditbot.toml")).unwrap();
        assert!(config.engine.isolate_failures);
    }

    #[test]
    fn test_write_then_load_default_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pageauditbot.toml");
        write_default_config(&path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.annotation.style, Config::default().annotation.style);
    }
}
