// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit orchestration.
//!
//! The [`Auditor`] owns the ordered rule catalog. Each [`run`](Auditor::run)
//! gets a fresh [`Reporter`], so sequence numbers restart at 1 and repeated
//! runs over the same page produce the same findings.

use crate::config::Config;
use crate::document::Document;
use crate::error::{AuditError, Result};
use crate::finding::{Category, FindingSet};
use crate::reporter::Reporter;
use crate::rules::{self, Rule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Result of auditing one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub run_id: Uuid,
    /// Page URL the rules saw
    pub url: String,
    /// File the page was loaded from, when there was one
    pub source: Option<PathBuf>,
    pub audited_at: DateTime<Utc>,
    /// Ids of the rules that ran, in order
    pub rules_run: Vec<String>,
    /// Ids of the rules that faulted
    pub failed_rules: Vec<String>,
    pub findings: FindingSet,
    /// Total printed in the summary line
    pub summary_count: u64,
}

impl AuditReport {
    /// The end-of-run summary line
    pub fn summary_line(&self) -> String {
        format!(
            "SEO and accessibility check complete. Issues found: {}.",
            self.summary_count
        )
    }
}

/// Runs an ordered rule catalog against documents
pub struct Auditor {
    rules: Vec<Box<dyn Rule>>,
    config: Config,
}

impl Auditor {
    /// The full catalog minus rules disabled in `config`
    pub fn new(config: Config) -> Self {
        let rules = rules::default_rules(&config)
            .into_iter()
            .filter(|r| config.rules.is_enabled(r.id()))
            .collect();
        Self { rules, config }
    }

    /// Use a custom catalog; `config.rules.disabled` is not applied
    pub fn with_rules(config: Config, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules, config }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every rule in order against `document`.
    ///
    /// A rule that errors or panics is reported as an engine finding and the
    /// rest still run, unless `engine.isolate_failures` is off, in which case
    /// the fault ends the run.
    pub fn run(&self, document: &mut dyn Document) -> Result<AuditReport> {
        let mut reporter = Reporter::new(self.config.annotation.style.clone());
        let mut rules_run = Vec::with_capacity(self.rules.len());
        let mut failed_rules = Vec::new();
        let url = document.url().to_string();

        info!("Auditing {}", url);

        for rule in &self.rules {
            debug!(rule = rule.id(), "Running {}", rule.name());
            rules_run.push(rule.id().to_string());

            let doc: &dyn Document = &*document;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.inspect(doc)))
                .unwrap_or_else(|payload| {
                    Err(AuditError::rule(rule.id(), panic_message(&*payload)))
                });

            match outcome {
                Ok(issues) => {
                    for issue in issues {
                        reporter.report(
                            document,
                            rule.id(),
                            rule.category(),
                            &issue.message,
                            issue.element,
                        );
                    }
                }
                Err(e) if self.config.engine.isolate_failures => {
                    error!(rule = rule.id(), "Rule failed: {}", e);
                    let message = match &e {
                        AuditError::Rule { .. } => e.to_string(),
                        other => AuditError::rule(rule.id(), other).to_string(),
                    };
                    reporter.report(document, rule.id(), Category::Engine, &message, None);
                    failed_rules.push(rule.id().to_string());
                }
                Err(e) => {
                    return Err(match e {
                        AuditError::Rule { .. } => e,
                        other => AuditError::rule(rule.id(), other),
                    })
                }
            }
        }

        let summary_count = reporter.summary_count(self.config.summary.legacy_count);
        let report = AuditReport {
            run_id: Uuid::new_v4(),
            url,
            source: None,
            audited_at: Utc::now(),
            rules_run,
            failed_rules,
            findings: reporter.into_findings(),
            summary_count,
        };

        info!("{}", report.summary_line());
        Ok(report)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
