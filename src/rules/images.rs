// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text and sizing.
//!
//! Each `<img>` is put through four independent checks, and each one that
//! triggers yields its own issue:
//!
//! 1. `alt` missing or empty
//! 2. `width`/`height` attribute written as a decimal fraction (`"120.5"`)
//! 3. resolved width or height is a fractional number (`"120.5px"`)
//! 4. resolved width or height is the keyword `auto`

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("valid regex"));

/// Leading numeric part of a CSS length, e.g. `-12.5` in `-12.5px`
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid regex")
});

/// Image alt text and dimension checks
pub struct ImageRule;

impl Rule for ImageRule {
    fn id(&self) -> &str {
        "image-dimensions"
    }

    fn name(&self) -> &str {
        "Image Alt Text and Dimensions"
    }

    fn description(&self) -> &str {
        "Checks images for alt text and for fractional or auto width/height"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for img in document.select("img")? {
            if document.attr(img, "alt").map_or(true, str::is_empty) {
                issues.push(Issue::at(img, "Image without alt attribute."));
            }

            let decimal_attr = ["width", "height"]
                .iter()
                .filter_map(|name| document.attr(img, name))
                .any(|value| DECIMAL_RE.is_match(value));
            if decimal_attr {
                issues.push(Issue::at(
                    img,
                    "Image has a decimal width or height attribute. Check that width or height is not set to 'auto'.",
                ));
            }

            let width = document.computed_style(img, "width", None);
            let height = document.computed_style(img, "height", None);

            let fractional = [&width, &height]
                .into_iter()
                .flatten()
                .filter_map(|value| leading_number(value))
                .any(|n| n.fract() != 0.0);
            if fractional {
                issues.push(Issue::at(
                    img,
                    "Image has a fractional width or height. CSS may set width or height to 'auto'.",
                ));
            }

            let auto = [&width, &height]
                .into_iter()
                .flatten()
                .any(|value| value.trim().eq_ignore_ascii_case("auto"));
            if auto {
                issues.push(Issue::at(img, "Image width or height is set to 'auto' in CSS."));
            }
        }

        Ok(issues)
    }
}

/// Numeric prefix of a length value; `None` for keywords like `auto`
fn leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER_RE
        .find(value.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::run;

    #[test]
    fn test_clean_image() {
        let html = r#"<img src="a.png" alt="A cat" width="300" height="200">"#;
        assert!(run(&ImageRule, html).is_empty());
    }

    #[test]
    fn test_missing_and_empty_alt() {
        let html = r#"<img src="a.png"><img src="b.png" alt="">"#;
        let issues = run(&ImageRule, html);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.message == "Image without alt attribute."));
        assert_ne!(issues[0].element, issues[1].element);
    }

    #[test]
    fn test_decimal_attribute_also_resolves_fractional() {
        let html = r#"<img src="a.png" alt="x" width="120.5">"#;
        let issues = run(&ImageRule, html);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.starts_with("Image has a decimal"));
        assert!(issues[1].message.starts_with("Image has a fractional"));
    }

    #[test]
    fn test_fractional_from_stylesheet() {
        let html = r#"<html><head><style>img { height: 33.3px }</style></head>
            <body><img src="a.png" alt="x"></body></html>"#;
        let issues = run(&ImageRule, html);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("fractional"));
    }

    #[test]
    fn test_auto_from_inline_style() {
        let html = r#"<img src="a.png" alt="x" style="width: auto">"#;
        let issues = run(&ImageRule, html);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Image width or height is set to 'auto' in CSS.");
    }

    #[test]
    fn test_all_four_checks_on_one_image() {
        let html = r#"<img src="a.png" width="10.5" style="height: auto">"#;
        assert_eq!(run(&ImageRule, html).len(), 4);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("120px"), Some(120.0));
        assert_eq!(leading_number("12.75em"), Some(12.75));
        assert_eq!(leading_number(".5px"), Some(0.5));
        assert_eq!(leading_number("auto"), None);
        assert_eq!(leading_number("50%"), Some(50.0));
    }
}
