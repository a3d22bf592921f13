// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text/background contrast.
//!
//! Compares each element's resolved `background-color` with its resolved
//! `color` using the WCAG luminance formula. Only hex colors with
//! two-digit channels (`#rrggbb`, optionally `#rrggbbaa`) are understood;
//! anything else makes the element indeterminate and it is skipped.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};
use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})?$")
        .expect("valid regex")
});

/// Flags elements whose colors fall below a contrast threshold
pub struct ContrastRule {
    min_ratio: f64,
}

impl ContrastRule {
    pub fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }
}

impl Default for ContrastRule {
    fn default() -> Self {
        Self::new(4.5)
    }
}

impl Rule for ContrastRule {
    fn id(&self) -> &str {
        "contrast"
    }

    fn name(&self) -> &str {
        "Color Contrast"
    }

    fn description(&self) -> &str {
        "Checks text/background contrast ratios against the WCAG minimum"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for el in document.select("*")? {
            let background = document
                .computed_style(el, "background-color", None)
                .and_then(|v| parse_hex_color(&v));
            let foreground = document
                .computed_style(el, "color", None)
                .and_then(|v| parse_hex_color(&v));

            let (Some(bg), Some(fg)) = (background, foreground) else {
                continue;
            };

            let ratio = contrast_ratio(bg, fg);
            if ratio < self.min_ratio {
                issues.push(Issue::at(el, format!("Low contrast ratio ({:.2}).", ratio)));
            }
        }

        Ok(issues)
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` into (r, g, b); alpha is ignored
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let caps = HEX_COLOR_RE.captures(value.trim())?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some((channel(1)?, channel(2)?, channel(3)?))
}

/// Relative luminance per WCAG 2.0
/// <https://www.w3.org/TR/WCAG20/#relativeluminancedef>
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let linear = [r, g, b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2]
}

/// Contrast ratio between two colors, from 1.0 to 21.0.
///
/// Symmetric in its arguments.
pub fn contrast_ratio(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(a.0, a.1, a.2);
    let l2 = relative_luminance(b.0, b.1, b.2);
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}
