// SPDX-License-Identifier: PMPL-1.0-or-later
//! Minimal CSS cascade for computed-style lookups.
//!
//! Collects rule blocks from the page's `<style>` elements and resolves a
//! single property for a single element:
//! - importance first, then inline `style` over stylesheet, then specificity,
//!   then source order
//! - selectors ending in `:focus` only apply when resolving under
//!   [`Pseudo::Focus`]
//! - `@`-rule wrappers are ignored and their inner blocks applied as-is
//!
//! Inheritance and presentational attributes are handled by the caller.

use crate::document::Pseudo;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::debug;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));
/// `@charset`, `@import` and other block-less at-rules
static AT_STATEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[^{};]*;").expect("valid regex"));
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").expect("valid regex"));
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[\w-]+").expect("valid regex"));
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.[\w-]+|\[[^\]]*\]|:[\w-]+").expect("valid regex")
});
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s>+~(])([a-zA-Z][\w-]*)").expect("valid regex")
});
static RGB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rgba?\([^)]*\)").expect("valid regex"));

/// Properties whose computed value falls back to the parent's
const INHERITED_PROPERTIES: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-weight",
    "line-height",
    "visibility",
];

/// Whether `property` inherits from the parent element
pub fn is_inherited(property: &str) -> bool {
    INHERITED_PROPERTIES.contains(&property)
}

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Selector specificity as (ids, classes, types)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Approximate specificity of a selector's source text
    pub fn of(selector: &str) -> Self {
        let classes = CLASS_RE.find_iter(selector).count() as u32;
        let stripped = CLASS_RE.replace_all(selector, " ");
        let ids = ID_RE.find_iter(&stripped).count() as u32;
        let types = TYPE_RE.find_iter(&ID_RE.replace_all(&stripped, " ")).count() as u32;
        Specificity(ids, classes, types)
    }
}

#[derive(Debug)]
struct StyleRule {
    selector: Selector,
    specificity: Specificity,
    focus_only: bool,
    order: usize,
    declarations: Vec<Declaration>,
}

/// Cascade ordering key; higher wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Precedence {
    important: bool,
    inline: bool,
    specificity: Specificity,
    order: usize,
}

/// Parsed author stylesheet for one page
#[derive(Debug, Default)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Parse CSS source text; selectors the engine cannot match are dropped
    pub fn parse(css: &str) -> Self {
        let mut sheet = Stylesheet::default();
        sheet.append(css);
        sheet
    }

    /// Append the rules of another style block, after the existing ones
    pub fn append(&mut self, css: &str) {
        let css = COMMENT_RE.replace_all(css, "");
        let css = AT_STATEMENT_RE.replace_all(&css, "");

        for caps in BLOCK_RE.captures_iter(&css) {
            let selector_list = caps[1].trim();
            if selector_list.is_empty() || selector_list.starts_with('@') {
                continue;
            }

            let declarations = parse_declarations(&caps[2]);
            if declarations.is_empty() {
                continue;
            }

            for raw in selector_list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let (base, focus_only) = match raw.strip_suffix(":focus") {
                    Some(base) => (base.trim(), true),
                    None => (raw, false),
                };
                let base = if base.is_empty() { "*" } else { base };

                match Selector::parse(base) {
                    Ok(selector) => self.rules.push(StyleRule {
                        selector,
                        specificity: Specificity::of(raw),
                        focus_only,
                        order: self.rules.len(),
                        declarations: declarations.clone(),
                    }),
                    Err(e) => debug!("Skipping unsupported selector {:?}: {:?}", raw, e),
                }
            }
        }
    }

    /// Number of selector rules kept
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Winning value of `property` for `element` from the stylesheet and the
    /// element's own `style` attribute
    pub fn cascade(
        &self,
        element: &ElementRef<'_>,
        property: &str,
        pseudo: Option<Pseudo>,
    ) -> Option<String> {
        let mut candidates: Vec<(Precedence, String)> = Vec::new();

        for rule in &self.rules {
            if rule.focus_only && pseudo != Some(Pseudo::Focus) {
                continue;
            }
            if !rule.selector.matches(element) {
                continue;
            }
            for decl in rule.declarations.iter().filter(|d| d.property == property) {
                candidates.push((
                    Precedence {
                        important: decl.important,
                        inline: false,
                        specificity: rule.specificity,
                        order: rule.order,
                    },
                    decl.value.clone(),
                ));
            }
        }

        if let Some(style) = element.value().attr("style") {
            for (idx, decl) in parse_declarations(style).into_iter().enumerate() {
                if decl.property != property {
                    continue;
                }
                candidates.push((
                    Precedence {
                        important: decl.important,
                        inline: true,
                        specificity: Specificity::default(),
                        order: idx,
                    },
                    decl.value,
                ));
            }
        }

        // Ties go to the later declaration
        candidates
            .into_iter()
            .max_by_key(|(precedence, _)| *precedence)
            .map(|(_, value)| value)
    }
}

/// Parse the body of a rule block or a `style` attribute.
///
/// Shorthands also yield longhands: `background` gives `background-color`
/// when it carries a color, and `outline` gives `outline-style`,
/// `outline-width` and `outline-color`, reset to their initial values when
/// omitted.
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    for part in split_declarations(block) {
        let Some((property, value)) = part.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let mut value = value.trim();
        if property.is_empty() || value.is_empty() {
            continue;
        }

        let important = value.to_ascii_lowercase().ends_with("!important");
        if important {
            value = value[..value.len() - "!important".len()].trim_end();
        }

        if property == "background" {
            if let Some(color) = shorthand_color(value) {
                declarations.push(Declaration {
                    property: "background-color".to_string(),
                    value: color,
                    important,
                });
            }
        }

        if property == "outline" {
            for (longhand, longhand_value) in expand_outline(value) {
                declarations.push(Declaration {
                    property: longhand.to_string(),
                    value: longhand_value,
                    important,
                });
            }
        }

        declarations.push(Declaration {
            property,
            value: value.to_string(),
            important,
        });
    }

    declarations
}

/// Split on `;` outside parentheses and quotes, so `url(data:...;base64,...)`
/// stays in one piece
fn split_declarations(block: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in block.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&block[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&block[start..]);
    parts
}

const OUTLINE_STYLES: &[&str] = &[
    "auto", "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset",
    "outset",
];

/// Longhands of an `outline` shorthand value
fn expand_outline(value: &str) -> Vec<(&'static str, String)> {
    let lower = value.to_ascii_lowercase();
    if matches!(lower.as_str(), "inherit" | "initial" | "unset" | "revert") {
        return ["outline-style", "outline-width", "outline-color"]
            .into_iter()
            .map(|p| (p, lower.clone()))
            .collect();
    }

    let mut style = None;
    let mut width = None;
    let mut color = Vec::new();
    for token in lower.split_whitespace() {
        if style.is_none() && OUTLINE_STYLES.contains(&token) {
            style = Some(token.to_string());
        } else if width.is_none() && is_line_width(token) {
            width = Some(token.to_string());
        } else {
            color.push(token);
        }
    }

    vec![
        ("outline-style", style.unwrap_or_else(|| "none".to_string())),
        ("outline-width", width.unwrap_or_else(|| "medium".to_string())),
        (
            "outline-color",
            if color.is_empty() {
                "currentcolor".to_string()
            } else {
                color.join(" ")
            },
        ),
    ]
}

fn is_line_width(token: &str) -> bool {
    matches!(token, "thin" | "medium" | "thick")
        || token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Pull the color component out of a `background` shorthand value
fn shorthand_color(value: &str) -> Option<String> {
    if let Some(hex) = value.split_whitespace().find(|t| t.starts_with('#')) {
        return Some(hex.to_string());
    }
    if let Some(m) = RGB_RE.find(value) {
        return Some(m.as_str().to_string());
    }
    let mut tokens = value.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(word), None) if word.chars().all(|c| c.is_ascii_alphabetic()) => {
            Some(word.to_string())
        }
        _ => None,
    }
}
