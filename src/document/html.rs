// SPDX-License-Identifier: PMPL-1.0-or-later
//! [`Document`] implementation over a parsed HTML page.

use crate::document::style::{self, Stylesheet};
use crate::document::{Document, ElementId, Pseudo};
use crate::error::{AuditError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Elements a `<label>` can be associated with
const LABELABLE_ELEMENTS: &[&str] = &[
    "button", "input", "meter", "output", "progress", "select", "textarea",
];

/// A parsed page plus the state an audit run attaches to it
pub struct HtmlPage<'a> {
    html: &'a Html,
    url: String,
    elements: Vec<ElementRef<'a>>,
    stylesheet: Stylesheet,
    annotations: BTreeMap<ElementId, Vec<String>>,
}

impl<'a> HtmlPage<'a> {
    /// Index the page's elements and collect its `<style>` blocks
    pub fn new(html: &'a Html, url: impl Into<String>) -> Self {
        let elements: Vec<ElementRef<'a>> = html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();

        let mut stylesheet = Stylesheet::default();
        for element in elements.iter().filter(|e| e.value().name() == "style") {
            stylesheet.append(&element.text().collect::<String>());
        }

        Self {
            html,
            url: url.into(),
            elements,
            stylesheet,
            annotations: BTreeMap::new(),
        }
    }

    /// The underlying parse tree
    pub fn html(&self) -> &'a Html {
        self.html
    }

    /// Number of elements in the page
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Declarations applied so far, keyed by element
    pub fn annotations(&self) -> &BTreeMap<ElementId, Vec<String>> {
        &self.annotations
    }

    fn element(&self, id: ElementId) -> Option<&ElementRef<'a>> {
        self.elements.get(id.0)
    }

    fn matching(
        &self,
        selector: &str,
        keep: impl Fn(&ElementRef<'a>) -> bool,
    ) -> Result<Vec<ElementId>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| selector.matches(*e) && keep(*e))
            .map(|(idx, _)| ElementId(idx))
            .collect())
    }

    fn inherited_style(&self, element: &ElementRef<'a>, property: &str) -> Option<String> {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find_map(|ancestor| self.stylesheet.cascade(&ancestor, property, None))
    }

    /// Whether `label` (a `<label>` without `for`) labels `control`
    fn wraps_as_label(label: &ElementRef<'a>, control: &ElementRef<'a>) -> bool {
        label
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|e| is_labelable(e))
            .map_or(false, |first| first.id() == control.id())
    }
}

impl Document for HtmlPage<'_> {
    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> Option<String> {
        let title = self
            .elements
            .iter()
            .find(|e| e.value().name() == "title")?
            .text()
            .collect::<String>();
        let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }

    fn select(&self, selector: &str) -> Result<Vec<ElementId>> {
        self.matching(selector, |_| true)
    }

    fn select_within(&self, scope: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        let Some(scope) = self.element(scope) else {
            return Ok(Vec::new());
        };
        let scope_id = scope.id();
        self.matching(selector, |e| e.ancestors().any(|a| a.id() == scope_id))
    }

    fn attr(&self, element: ElementId, name: &str) -> Option<&str> {
        self.element(element)?.value().attr(name)
    }

    fn text_content(&self, element: ElementId) -> String {
        self.element(element)
            .map(|e| e.text().collect())
            .unwrap_or_default()
    }

    fn computed_style(
        &self,
        element: ElementId,
        property: &str,
        pseudo: Option<Pseudo>,
    ) -> Option<String> {
        let el = self.element(element)?;
        let property = property.to_ascii_lowercase();

        if let Some(value) = self.stylesheet.cascade(el, &property, pseudo) {
            return Some(value);
        }
        if style::is_inherited(&property) {
            if let Some(value) = self.inherited_style(el, &property) {
                return Some(value);
            }
        }
        match property.as_str() {
            "width" | "height" => el.value().attr(&property).and_then(presentational_length),
            _ => None,
        }
    }

    fn label_count(&self, element: ElementId) -> usize {
        let Some(control) = self.element(element) else {
            return 0;
        };
        if !is_labelable(control) {
            return 0;
        }

        let explicit = match control.value().attr("id").filter(|id| !id.is_empty()) {
            Some(id) => self
                .elements
                .iter()
                .filter(|e| e.value().name() == "label" && e.value().attr("for") == Some(id))
                .count(),
            None => 0,
        };

        let implicit = control
            .ancestors()
            .filter_map(ElementRef::wrap)
            .filter(|a| a.value().name() == "label" && a.value().attr("for").is_none())
            .filter(|label| Self::wraps_as_label(label, control))
            .count();

        explicit + implicit
    }

    fn describe(&self, element: ElementId) -> String {
        match self.element(element) {
            Some(e) => {
                let attrs: String = e
                    .value()
                    .attrs()
                    .map(|(k, v)| format!(" {}=\"{}\"", k, v))
                    .collect();
                format!("<{}{}>", e.value().name(), attrs)
            }
            None => element.to_string(),
        }
    }

    fn annotate(&mut self, element: ElementId, declaration: &str) {
        if self.element(element).is_none() {
            return;
        }
        let applied = self.annotations.entry(element).or_default();
        if !applied.iter().any(|d| d == declaration) {
            applied.push(declaration.to_string());
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AuditError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

fn is_labelable(element: &ElementRef<'_>) -> bool {
    let name = element.value().name();
    if !LABELABLE_ELEMENTS.contains(&name) {
        return false;
    }
    !(name == "input"
        && element
            .value()
            .attr("type")
            .map_or(false, |t| t.eq_ignore_ascii_case("hidden")))
}

/// `width="300"` maps to `300px`; percentages pass through
fn presentational_length(value: &str) -> Option<String> {
    let value = value.trim();
    if let Some(pct) = value.strip_suffix('%') {
        return pct.parse::<f64>().ok().map(|_| value.to_string());
    }
    value.parse::<f64>().ok().map(|_| format!("{}px", value))
}
