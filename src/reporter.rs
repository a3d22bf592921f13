// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding sink for a single audit run.
//!
//! Every report gets the next sequence number (starting at 1), is logged as
//! `"<seq>: <message>"`, and, when it concerns an element, marks that element
//! with the flag style.

use crate::document::{Document, ElementId};
use crate::finding::{Category, Finding, FindingSet};
use tracing::warn;

/// Collects findings for one run; build a fresh one per document
#[derive(Debug)]
pub struct Reporter {
    next_seq: u64,
    flag_style: String,
    findings: FindingSet,
}

impl Reporter {
    /// Create a reporter that marks elements with `flag_style`
    pub fn new(flag_style: impl Into<String>) -> Self {
        Self {
            next_seq: 1,
            flag_style: flag_style.into(),
            findings: FindingSet::new(),
        }
    }

    /// Record a finding and return its sequence number
    pub fn report(
        &mut self,
        document: &mut dyn Document,
        rule_id: &str,
        category: Category,
        message: &str,
        element: Option<ElementId>,
    ) -> u64 {
        let seq = self.next_seq;
        let mut finding = Finding::new(seq, rule_id, category, message);

        match element {
            Some(id) => {
                let html = document.describe(id);
                warn!(rule = rule_id, element = %html, "{}", finding.log_line());
                document.annotate(id, &self.flag_style);
                finding = finding.with_element(id, html);
            }
            None => warn!(rule = rule_id, "{}", finding.log_line()),
        }

        self.findings.add(finding);
        self.next_seq += 1;
        seq
    }

    /// Sequence number the next report will get
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Number of findings reported so far
    pub fn reported(&self) -> usize {
        self.findings.len()
    }

    /// Total for the end-of-run summary.
    ///
    /// The legacy count is the next sequence number, one more than the
    /// findings actually reported.
    pub fn summary_count(&self, legacy: bool) -> u64 {
        if legacy {
            self.next_seq
        } else {
            self.findings.len() as u64
        }
    }

    pub fn findings(&self) -> &FindingSet {
        &self.findings
    }

    pub fn into_findings(self) -> FindingSet {
        self.findings
    }
}
