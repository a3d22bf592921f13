// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding types produced by an audit run.

use crate::document::ElementId;
use serde::{Deserialize, Serialize};

/// Broad area a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Search-engine and sharing metadata
    Seo,
    /// Assistive technology and readability
    Accessibility,
    /// Rendering performance
    Performance,
    /// The audit engine itself (failed rules)
    Engine,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Seo => write!(f, "SEO"),
            Category::Accessibility => write!(f, "ACCESSIBILITY"),
            Category::Performance => write!(f, "PERFORMANCE"),
            Category::Engine => write!(f, "ENGINE"),
        }
    }
}

/// One reported issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Position in the run, starting at 1
    pub seq: u64,
    /// Id of the rule that produced it (e.g. "meta-description")
    pub rule_id: String,
    pub category: Category,
    /// Human-readable message
    pub message: String,
    /// Flagged element, if the finding is about one
    pub element: Option<ElementId>,
    /// Opening tag of the flagged element
    pub element_html: Option<String>,
}

impl Finding {
    /// Create a page-level finding
    pub fn new(seq: u64, rule_id: &str, category: Category, message: &str) -> Self {
        Self {
            seq,
            rule_id: rule_id.to_string(),
            category,
            message: message.to_string(),
            element: None,
            element_html: None,
        }
    }

    /// Attach the flagged element
    pub fn with_element(mut self, element: ElementId, html: String) -> Self {
        self.element = Some(element);
        self.element_html = Some(html);
        self
    }

    /// The diagnostic line, `"<seq>: <message>"`
    pub fn log_line(&self) -> String {
        format!("{}: {}", self.seq, self.message)
    }
}

/// Ordered findings of one or more runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingSet {
    /// All findings, in report order
    pub findings: Vec<Finding>,
}

impl FindingSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Get findings by category
    pub fn by_category(&self, category: Category) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.category == category).collect()
    }

    /// Get findings produced by one rule
    pub fn by_rule(&self, rule_id: &str) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule_id == rule_id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl<'a> IntoIterator for &'a FindingSet {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}
