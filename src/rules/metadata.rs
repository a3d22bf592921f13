// SPDX-License-Identifier: PMPL-1.0-or-later
//! Head metadata rules: title, description, canonical link, and the Open
//! Graph / Twitter Card sharing tags.
//!
//! All of these are presence checks producing page-level issues.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};

/// Page must have non-empty `<title>` text
pub struct TitleRule;

impl Rule for TitleRule {
    fn id(&self) -> &str {
        "title"
    }

    fn name(&self) -> &str {
        "Page Title"
    }

    fn description(&self) -> &str {
        "Checks that the page has a non-empty <title>"
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        Ok(match document.title() {
            Some(_) => Vec::new(),
            None => vec![Issue::page("The <title> tag is missing.")],
        })
    }
}

/// Page must contain at least one element matching a selector
pub struct RequiredElementRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    selector: &'static str,
    message: &'static str,
}

impl RequiredElementRule {
    pub fn meta_description() -> Self {
        Self {
            id: "meta-description",
            name: "Meta Description",
            description: "Checks for <meta name=\"description\">",
            selector: r#"meta[name="description"]"#,
            message: "The meta description is missing.",
        }
    }

    pub fn canonical() -> Self {
        Self {
            id: "canonical",
            name: "Canonical Link",
            description: "Checks for <link rel=\"canonical\">",
            selector: r#"link[rel="canonical"]"#,
            message: "The canonical link tag is missing.",
        }
    }
}

impl Rule for RequiredElementRule {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        if document.exists(self.selector)? {
            Ok(Vec::new())
        } else {
            Ok(vec![Issue::page(self.message)])
        }
    }
}

/// A family of `<meta>` tags that should all be present
pub struct RequiredTagsRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    /// Attribute carrying the tag name (`property` or `name`)
    attribute: &'static str,
    tags: &'static [&'static str],
}

impl RequiredTagsRule {
    pub fn open_graph() -> Self {
        Self {
            id: "open-graph",
            name: "Open Graph Tags",
            description: "Checks for og:title, og:description and og:image meta tags",
            attribute: "property",
            tags: &["og:title", "og:description", "og:image"],
        }
    }

    pub fn twitter_card() -> Self {
        Self {
            id: "twitter-card",
            name: "Twitter Card Tags",
            description: "Checks for twitter:card, twitter:title, twitter:description and twitter:image meta tags",
            attribute: "name",
            tags: &[
                "twitter:card",
                "twitter:title",
                "twitter:description",
                "twitter:image",
            ],
        }
    }
}

impl Rule for RequiredTagsRule {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let family = self.name.trim_end_matches(" Tags");
        let mut issues = Vec::new();

        for tag in self.tags {
            let selector = format!(r#"meta[{}="{}"]"#, self.attribute, tag);
            if !document.exists(&selector)? {
                issues.push(Issue::page(format!("{} meta tag {} is missing.", family, tag)));
            }
        }

        Ok(issues)
    }
}
