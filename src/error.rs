// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for pageauditbot

use thiserror::Error;

/// Main error type for pageauditbot
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Cannot build a file URL for {0}")]
    FileUrl(std::path::PathBuf),

    #[error("Rule '{rule}' failed: {reason}")]
    Rule { rule: String, reason: String },
}

impl AuditError {
    /// Build a rule fault from anything displayable
    pub fn rule(rule: &str, reason: impl std::fmt::Display) -> Self {
        AuditError::Rule {
            rule: rule.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
