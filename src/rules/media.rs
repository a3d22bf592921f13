// SPDX-License-Identifier: PMPL-1.0-or-later
//! Media element titles.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};

/// `<video>` and `<audio>` need a non-empty `title`
pub struct MediaTitleRule;

impl Rule for MediaTitleRule {
    fn id(&self) -> &str {
        "media-title"
    }

    fn name(&self) -> &str {
        "Media Titles"
    }

    fn description(&self) -> &str {
        "Checks that video and audio elements have a title attribute"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        Ok(document
            .select("video, audio")?
            .into_iter()
            .filter(|&el| document.attr(el, "title").map_or(true, str::is_empty))
            .map(|el| Issue::at(el, "Media element without a title attribute."))
            .collect())
    }
}
