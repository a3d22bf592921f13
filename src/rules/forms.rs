// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form field labelling.

use crate::document::{Document, ElementId};
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};
use std::collections::BTreeSet;

/// Every input, select and textarea inside a form needs a `<label>`.
///
/// `type="hidden"` inputs are the one exception: they have no label list
/// at all, so they are skipped instead of counting as zero labels.
pub struct FormLabelRule;

impl Rule for FormLabelRule {
    fn id(&self) -> &str {
        "form-labels"
    }

    fn name(&self) -> &str {
        "Form Labels"
    }

    fn description(&self) -> &str {
        "Checks that form fields have an associated <label>"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        // Nested forms are invalid HTML but a field should still be checked once
        let mut checked = BTreeSet::new();

        for form in document.select("form")? {
            for field in document.select_within(form, "input, select, textarea")? {
                if !checked.insert(field) || is_hidden_input(document, field) {
                    continue;
                }
                if document.label_count(field) == 0 {
                    issues.push(Issue::at(field, "Form field without an associated label."));
                }
            }
        }

        Ok(issues)
    }
}

fn is_hidden_input(document: &dyn Document, field: ElementId) -> bool {
    document
        .attr(field, "type")
        .map_or(false, |t| t.trim().eq_ignore_ascii_case("hidden"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::run;

    #[test]
    fn test_explicit_and_wrapping_labels() {
        let html = r#"<form>
            <label for="email">Email</label><input id="email" type="email">
            <label>Name <input name="name"></label>
            <label for="c">Country</label><select id="c"></select>
            </form>"#;
        assert!(run(&FormLabelRule, html).is_empty());
    }

    #[test]
    fn test_unlabelled_fields_are_flagged() {
        let html = r#"<form>
            <input name="q">
            <textarea></textarea>
            <label for="other">Other</label><select id="s"></select>
            </form>"#;
        let issues = run(&FormLabelRule, html);
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.element.is_some()));
    }

    #[test]
    fn test_hidden_inputs_are_skipped_not_reported_unlabelled() {
        // Hidden inputs have no labels but are not reported as missing them
        let html = r#"<form><input type="hidden" name="csrf"><input type="HIDDEN"></form>"#;
        assert!(run(&FormLabelRule, html).is_empty());

        let html = r#"<form><input type="hidden" name="csrf"><input type="text" name="q"></form>"#;
        assert_eq!(run(&FormLabelRule, html).len(), 1);
    }

    #[test]
    fn test_fields_outside_forms_are_ignored() {
        let html = r#"<body><input name="search"><form></form></body>"#;
        assert!(run(&FormLabelRule, html).is_empty());
    }

    #[test]
    fn test_each_form_is_checked() {
        let html = r#"<body>
            <form><input name="a"></form>
            <form><input name="b"></form>
            </body>"#;
        assert_eq!(run(&FormLabelRule, html).len(), 2);
    }
}
