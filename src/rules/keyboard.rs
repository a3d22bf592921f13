// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard focus visibility.

use crate::document::{Document, Pseudo};
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};

const FOCUSABLE: &str = "button, a, input, select, textarea";

/// Focusable elements must resolve a visible outline under `:focus`
pub struct FocusVisibleRule;

impl Rule for FocusVisibleRule {
    fn id(&self) -> &str {
        "focus-visible"
    }

    fn name(&self) -> &str {
        "Visible Focus"
    }

    fn description(&self) -> &str {
        "Checks that focusable elements have an outline when focused"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for el in document.select(FOCUSABLE)? {
            let style = document.computed_style(el, "outline-style", Some(Pseudo::Focus));
            let width = document.computed_style(el, "outline-width", Some(Pseudo::Focus));

            if !is_visible_outline(style.as_deref(), width.as_deref()) {
                issues.push(Issue::at(el, "Element without a visible focus indicator."));
            }
        }

        Ok(issues)
    }
}

/// An unset style is the initial `none`; an unset width is the initial
/// `medium`
fn is_visible_outline(style: Option<&str>, width: Option<&str>) -> bool {
    let style = style.map(|s| s.trim().to_ascii_lowercase());
    let width = width.map(|w| w.trim().to_ascii_lowercase());

    let drawn = match style.as_deref() {
        None | Some("" | "none" | "hidden" | "initial" | "unset" | "revert") => false,
        Some(_) => true,
    };
    let zero_width = width.as_deref().map_or(false, |w| {
        let number = w.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        number.parse::<f64>().ok() == Some(0.0)
    });

    drawn && !zero_width
}
