// SPDX-License-Identifier: PMPL-1.0-or-later
//! Reminders for crawler files that live next to the page on the server.
//!
//! Nothing is fetched: a static page cannot tell whether the files exist, so
//! each rule always emits its reminder.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};

/// Unconditional "check the server for this file" reminder
pub struct ServerFileReminder {
    id: &'static str,
    name: &'static str,
    file: &'static str,
}

impl ServerFileReminder {
    pub fn robots_txt() -> Self {
        Self {
            id: "robots-txt",
            name: "robots.txt Reminder",
            file: "robots.txt",
        }
    }

    pub fn sitemap_xml() -> Self {
        Self {
            id: "sitemap-xml",
            name: "sitemap.xml Reminder",
            file: "sitemap.xml",
        }
    }
}

impl Rule for ServerFileReminder {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Always reminds to verify the file exists on the server"
    }

    fn category(&self) -> Category {
        Category::Seo
    }

    fn inspect(&self, _document: &dyn Document) -> Result<Vec<Issue>> {
        Ok(vec![Issue::page(format!(
            "Check that {} exists on the server.",
            self.file
        ))])
    }
}
