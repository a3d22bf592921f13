// SPDX-License-Identifier: PMPL-1.0-or-later
//! Write a page back out as HTML with its annotations applied.
//!
//! Flagged elements get the reporter's declarations appended to their
//! `style` attribute, so opening the output in a browser shows the
//! offending elements outlined in place.

use crate::document::{ElementId, HtmlPage};
use scraper::{ElementRef, Node};
use std::collections::BTreeMap;

/// Elements with no closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Render the page, including annotations, as an HTML string
pub fn to_annotated_html(page: &HtmlPage<'_>) -> String {
    let mut writer = Writer {
        out: String::new(),
        annotations: page.annotations(),
        next_id: 0,
    };

    for child in page.html().tree.root().children() {
        writer.node(child.value(), ElementRef::wrap(child), false);
    }

    writer.out
}

struct Writer<'p> {
    out: String,
    annotations: &'p BTreeMap<ElementId, Vec<String>>,
    // Elements are visited in the same pre-order the page indexed them in
    next_id: usize,
}

impl Writer<'_> {
    fn node(&mut self, node: &Node, element: Option<ElementRef<'_>>, raw_text: bool) {
        match node {
            Node::Doctype(doctype) => {
                self.out.push_str("<!DOCTYPE ");
                self.out.push_str(doctype.name());
                self.out.push('>');
            }
            Node::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            Node::Text(text) => {
                if raw_text {
                    self.out.push_str(text);
                } else {
                    self.out.push_str(&escape_text(text));
                }
            }
            Node::Element(_) => {
                if let Some(element) = element {
                    self.element(element);
                }
            }
            _ => {}
        }
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let name = element.value().name();
        let extra = self.annotations.get(&id);
        let mut style_written = false;

        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in element.value().attrs() {
            let value = match (key, extra) {
                ("style", Some(declarations)) => {
                    style_written = true;
                    merge_style(value, declarations)
                }
                _ => value.to_string(),
            };
            self.push_attr(key, &value);
        }
        if let (false, Some(declarations)) = (style_written, extra) {
            self.push_attr("style", &declarations.join("; "));
        }
        self.out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
        for child in element.children() {
            self.node(child.value(), ElementRef::wrap(child), raw_text);
        }

        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn push_attr(&mut self, key: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(key);
        self.out.push_str("=\"");
        self.out.push_str(&escape_attr(value));
        self.out.push('"');
    }
}

fn merge_style(existing: &str, declarations: &[String]) -> String {
    let existing = existing.trim().trim_end_matches(';').trim_end();
    if existing.is_empty() {
        declarations.join("; ")
    } else {
        format!("{}; {}", existing, declarations.join("; "))
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use scraper::{Html, Selector};

    #[test]
    fn test_annotations_land_in_style_attribute() {
        let source = r#"<!DOCTYPE html><html><head><title>t</title></head><body>
            <p style="color: #000;">one</p><img src="a.png"><p>a &lt; b</p></body></html>"#;
        let html = Html::parse_document(source);
        let mut page = HtmlPage::new(&html, "https://example.com/");
        let paragraphs = page.select("p").unwrap();
        let img = page.select("img").unwrap()[0];
        page.annotate(paragraphs[0], "border: 2px dashed red");
        page.annotate(img, "border: 2px dashed red");

        let output = to_annotated_html(&page);
        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("a &lt; b"));

        let reparsed = Html::parse_document(&output);
        let styles: Vec<Option<&str>> = reparsed
            .select(&Selector::parse("p, img").unwrap())
            .map(|e| e.value().attr("style"))
            .collect();
        assert_eq!(
            styles,
            vec![
                Some("color: #000; border: 2px dashed red"),
                Some("border: 2px dashed red"),
                None,
            ]
        );
    }

    #[test]
    fn test_unannotated_page_round_trips_structure() {
        let source = r#"<html><head><script>if (a < b) {}</script></head><body><br><div id="x">hi</div></body></html>"#;
        let html = Html::parse_document(source);
        let page = HtmlPage::new(&html, "https://example.com/");
        let output = to_annotated_html(&page);
        assert!(output.contains("<script>if (a < b) {}</script>"));
        assert!(output.contains("<br>"));
        assert!(!output.contains("</br>"));
        assert!(output.contains(r#"<div id="x">hi</div>"#));
    }
}
