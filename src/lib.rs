// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pageauditbot - SEO and Accessibility Page Auditor
//!
//! Part of the gitbot-fleet ecosystem. Pageauditbot loads an HTML page, runs
//! a fixed catalog of SEO, accessibility and performance rules against it,
//! numbers every finding in report order, and marks flagged elements with a
//! dashed red border so they can be found in the rendered page.
//!
//! ## Rules
//!
//! - **Metadata**: title, meta description, canonical link, Open Graph and
//!   Twitter Card tags
//! - **Structure**: headings, URL characters, duplicated text blocks
//! - **Images**: alt text, fractional and `auto` dimensions
//! - **Accessibility**: ARIA labels, focus outlines, color contrast, form
//!   labels, media titles
//! - **Performance**: render-blocking scripts
//! - **Reminders**: robots.txt and sitemap.xml

pub mod auditor;
pub mod config;
pub mod document;
pub mod error;
pub mod finding;
pub mod report;
pub mod reporter;
pub mod rules;
pub mod scanner;

pub use auditor::{AuditReport, Auditor};
pub use config::Config;
pub use document::{Document, ElementId, HtmlPage};
pub use error::{AuditError, Result};
pub use finding::{Category, Finding, FindingSet};
