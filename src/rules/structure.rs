// SPDX-License-Identifier: PMPL-1.0-or-later
//! Structural rules: heading presence, URL hygiene and duplicated text.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Anything outside the unreserved/URL-delimiter set
static FORBIDDEN_URL_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\-_.~:/?=&%]").expect("valid regex"));

/// Elements whose text is compared for duplicates
const TEXT_ELEMENTS: &str = "p, h1, h2, h3, h4, h5, h6, span, li, div";

/// Page must have at least one heading
pub struct HeadingsRule;

impl Rule for HeadingsRule {
    fn id(&self) -> &str {
        "headings"
    }

    fn name(&self) -> &str {
        "Headings Present"
    }

    fn description(&self) -> &str {
        "Checks that the page has at least one h1-h6 heading"
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        if document.exists("h1, h2, h3, h4, h5, h6")? {
            Ok(Vec::new())
        } else {
            Ok(vec![Issue::page("No headings (h1-h6) found.")])
        }
    }
}

/// Page URL should only use plain URL characters
pub struct UrlStructureRule;

impl Rule for UrlStructureRule {
    fn id(&self) -> &str {
        "url-structure"
    }

    fn name(&self) -> &str {
        "URL Structure"
    }

    fn description(&self) -> &str {
        "Checks the page URL for characters outside [a-zA-Z0-9-_.~:/?=&%]"
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        if FORBIDDEN_URL_CHAR_RE.is_match(document.url()) {
            Ok(vec![Issue::page("The URL contains invalid characters.")])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Flags every repeat of a text block already seen earlier in the page
pub struct DuplicateContentRule;

impl Rule for DuplicateContentRule {
    fn id(&self) -> &str {
        "duplicate-content"
    }

    fn name(&self) -> &str {
        "Duplicate Content"
    }

    fn description(&self) -> &str {
        "Flags text blocks whose trimmed text repeats an earlier block exactly"
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let mut seen = HashSet::new();
        let mut issues = Vec::new();

        for element in document.select(TEXT_ELEMENTS)? {
            let text = document.text_content(element);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if !seen.insert(text.to_string()) {
                issues.push(Issue::at(element, "Duplicated text content."));
            }
        }

        Ok(issues)
    }
}
