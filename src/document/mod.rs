// SPDX-License-Identifier: PMPL-1.0-or-later
//! Read-mostly view of a loaded page.
//!
//! Rules only ever see a [`Document`]: they query elements by CSS selector,
//! read attributes, text and computed style, and never touch the tree
//! directly. The one write is [`Document::annotate`], used by the reporter to
//! mark flagged elements.

pub mod html;
pub mod serialize;
pub mod style;

pub use html::HtmlPage;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Handle to an element, stable for the lifetime of the document.
///
/// Ids follow document (pre-order) order, so sorting ids sorts elements the
/// way a tree walk would visit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element #{}", self.0)
    }
}

/// Pseudo-class state to resolve computed style under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pseudo {
    /// `:focus`
    Focus,
}

/// Everything a rule may ask of a page
pub trait Document {
    /// Address the page was loaded from
    fn url(&self) -> &str;

    /// Title text, `None` when absent or blank
    fn title(&self) -> Option<String>;

    /// All elements matching `selector`, in document order
    fn select(&self, selector: &str) -> Result<Vec<ElementId>>;

    /// Descendants of `scope` matching `selector`, in document order
    fn select_within(&self, scope: ElementId, selector: &str) -> Result<Vec<ElementId>>;

    /// Whether any element matches `selector`
    fn exists(&self, selector: &str) -> Result<bool> {
        Ok(!self.select(selector)?.is_empty())
    }

    /// Raw attribute value
    fn attr(&self, element: ElementId, name: &str) -> Option<&str>;

    fn has_attr(&self, element: ElementId, name: &str) -> bool {
        self.attr(element, name).is_some()
    }

    /// Concatenated text of the element and its descendants
    fn text_content(&self, element: ElementId) -> String;

    /// Resolved value of a CSS property, `None` when nothing sets it
    fn computed_style(&self, element: ElementId, property: &str, pseudo: Option<Pseudo>)
        -> Option<String>;

    /// Number of `<label>` elements associated with a form control
    fn label_count(&self, element: ElementId) -> usize;

    /// Short rendering of the element for logs and reports
    fn describe(&self, element: ElementId) -> String;

    /// Apply a CSS declaration to the element's presentation.
    ///
    /// Applying the same declaration again is a no-op.
    fn annotate(&mut self, element: ElementId, declaration: &str);
}
