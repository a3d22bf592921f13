// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA labelling of interactive elements.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};

/// Buttons and role-bearing elements need `aria-label` or `aria-labelledby`
pub struct AriaLabelRule;

impl Rule for AriaLabelRule {
    fn id(&self) -> &str {
        "aria-label"
    }

    fn name(&self) -> &str {
        "ARIA Labels"
    }

    fn description(&self) -> &str {
        "Checks that buttons and elements with a role carry aria-label or aria-labelledby"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        Ok(document
            .select("button, [role]")?
            .into_iter()
            .filter(|&el| {
                !document.has_attr(el, "aria-label") && !document.has_attr(el, "aria-labelledby")
            })
            .map(|el| {
                Issue::at(
                    el,
                    "Interactive element without aria-label or aria-labelledby.",
                )
            })
            .collect())
    }
}
