// SPDX-License-Identifier: PMPL-1.0-or-later
//! Loading pages from disk and auditing them.
//!
//! A single file is audited with [`audit_file`]; [`scan_directory`] walks a
//! tree and audits every page it finds, each with its own document and
//! reporter.

use crate::auditor::{AuditReport, Auditor};
use crate::config::ScanConfig;
use crate::document::{serialize, HtmlPage};
use crate::error::{AuditError, Result};
use scraper::Html;
use std::path::Path;
use tracing::{debug, info, warn};
use url::Url;
use walkdir::WalkDir;

/// Outcome of auditing one page
#[derive(Debug, Clone)]
pub struct FileAudit {
    pub report: AuditReport,
    /// The page with flagged elements marked, when requested
    pub annotated_html: Option<String>,
}

/// Audit HTML source as if loaded from `url`
pub fn audit_source(source: &str, url: &str, auditor: &Auditor, annotate: bool) -> Result<FileAudit> {
    let html = Html::parse_document(source);
    let mut page = HtmlPage::new(&html, url);
    debug!("Parsed {} elements from {}", page.element_count(), url);

    let report = auditor.run(&mut page)?;
    let annotated_html = annotate.then(|| serialize::to_annotated_html(&page));

    Ok(FileAudit {
        report,
        annotated_html,
    })
}

/// Audit one HTML file.
///
/// The page URL is `url_override` when given, else the file's `file://` URL.
/// Either way the rules see the normalized form a browser would report, with
/// spaces and non-ASCII characters percent-encoded.
pub fn audit_file(
    path: &Path,
    url_override: Option<&str>,
    auditor: &Auditor,
    annotate: bool,
) -> Result<FileAudit> {
    let source = std::fs::read_to_string(path)?;
    let url = match url_override {
        Some(raw) => Url::parse(raw)?.to_string(),
        None => page_url(path)?.to_string(),
    };

    let mut audit = audit_source(&source, &url, auditor, annotate)?;
    audit.report.source = Some(path.to_path_buf());
    Ok(audit)
}

/// `file://` URL for a page on disk
pub fn page_url(path: &Path) -> Result<Url> {
    let absolute = path.canonicalize()?;
    Url::from_file_path(&absolute).map_err(|_| AuditError::FileUrl(absolute))
}

/// Audit every page under `dir`.
///
/// Hidden directories and those in `scan.exclude` are skipped. Unreadable
/// files are logged and skipped; a rule fault with isolation disabled ends
/// the scan.
pub fn scan_directory(dir: &Path, auditor: &Auditor, scan: &ScanConfig) -> Result<Vec<AuditReport>> {
    let mut reports = Vec::new();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() && e.depth() > 0 {
                return !scan.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !scan.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)) {
            continue;
        }

        match audit_file(path, None, auditor, false) {
            Ok(audit) => reports.push(audit.report),
            Err(AuditError::Io(e)) => warn!("Skipping {}: {}", path.display(), e),
            Err(e) => return Err(e),
        }
    }

    let issues: usize = reports.iter().map(|r| r.findings.len()).sum();
    info!("Audited {} pages, found {} issues", reports.len(), issues);

    Ok(reports)
}
