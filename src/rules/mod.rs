// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page rules.
//!
//! Each rule inspects a [`Document`] and returns the issues it found; it never
//! reports directly. The [`Auditor`](crate::auditor::Auditor) runs them in
//! catalog order and hands every issue to the reporter, which is what assigns
//! sequence numbers and flags elements.

pub mod aria;
pub mod contrast;
pub mod forms;
pub mod images;
pub mod keyboard;
pub mod media;
pub mod metadata;
pub mod scripts;
pub mod server_files;
pub mod structure;

use crate::config::Config;
use crate::document::{Document, ElementId};
use crate::error::Result;
use crate::finding::Category;

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Stable identifier used in config and reports (e.g. "canonical")
    fn id(&self) -> &str;

    /// Human-readable name of this rule
    fn name(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    fn category(&self) -> Category;

    /// Inspect the document and return every issue found, in document order
    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>>;
}

/// A problem found by a rule, before the reporter numbers it
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub message: String,
    pub element: Option<ElementId>,
}

impl Issue {
    /// An issue about the page as a whole
    pub fn page(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            element: None,
        }
    }

    /// An issue about one element
    pub fn at(element: ElementId, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            element: Some(element),
        }
    }
}

/// The full rule catalog in execution order
pub fn default_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(metadata::TitleRule),
        Box::new(metadata::RequiredElementRule::meta_description()),
        Box::new(structure::HeadingsRule),
        Box::new(images::ImageRule),
        Box::new(metadata::RequiredElementRule::canonical()),
        Box::new(aria::AriaLabelRule),
        Box::new(keyboard::FocusVisibleRule),
        Box::new(contrast::ContrastRule::new(config.contrast.min_ratio)),
        Box::new(metadata::RequiredTagsRule::open_graph()),
        Box::new(metadata::RequiredTagsRule::twitter_card()),
        Box::new(server_files::ServerFileReminder::robots_txt()),
        Box::new(server_files::ServerFileReminder::sitemap_xml()),
        Box::new(structure::UrlStructureRule),
        Box::new(forms::FormLabelRule),
        Box::new(structure::DuplicateContentRule),
        Box::new(scripts::BlockingScriptRule),
        Box::new(media::MediaTitleRule),
    ]
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers shared by the rule tests

    use super::{Issue, Rule};
    use crate::document::HtmlPage;
    use scraper::Html;

    pub const URL: &str = "https://example.com/page";

    /// Run one rule over an HTML snippet
    pub fn run(rule: &dyn Rule, source: &str) -> Vec<Issue> {
        run_at(rule, source, URL)
    }

    pub fn run_at(rule: &dyn Rule, source: &str, url: &str) -> Vec<Issue> {
        let html = Html::parse_document(source);
        let page = HtmlPage::new(&html, url);
        rule.inspect(&page).expect("rule should not fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_and_unique_ids() {
        let rules = default_rules(&Config::default());
        let ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec![
                "title",
                "meta-description",
                "headings",
                "image-dimensions",
                "canonical",
                "aria-label",
                "focus-visible",
                "contrast",
                "open-graph",
                "twitter-card",
                "robots-txt",
                "sitemap-xml",
                "url-structure",
                "form-labels",
                "duplicate-content",
                "blocking-scripts",
                "media-title",
            ]
        );
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    #[test]
    fn test_every_rule_is_described() {
        for rule in default_rules(&Config::default()) {
            assert!(!rule.name().is_empty(), "{} has no name", rule.id());
            assert!(!rule.description().is_empty(), "{} has no description", rule.id());
        }
    }
}
