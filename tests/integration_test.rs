// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for pageauditbot

use pageauditbot::config::{self, Config};
use pageauditbot::report::{generate_report, OutputFormat};
use pageauditbot::{scanner, Auditor, Category};
use std::path::Path;

const PAGE_URL: &str = "https://example.com/widgets";

fn audit_fixture(name: &str, config: Config) -> scanner::FileAudit {
    let auditor = Auditor::new(config);
    scanner::audit_file(
        &Path::new("tests/fixtures").join(name),
        Some(PAGE_URL),
        &auditor,
        true,
    )
    .expect("audit should succeed")
}

#[test]
fn test_clean_fixture_only_gets_reminders() {
    let audit = audit_fixture("clean.html", Config::default());
    let report = &audit.report;

    let rules: Vec<&str> = report.findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert_eq!(rules, vec!["robots-txt", "sitemap-xml"]);
    assert_eq!(report.findings.findings[0].seq, 1);
    assert_eq!(report.findings.findings[1].seq, 2);
    assert_eq!(report.summary_count, 2);
    assert!(report.failed_rules.is_empty());
}

#[test]
fn test_poor_fixture_findings_per_rule() {
    let audit = audit_fixture("poor.html", Config::default());
    let findings = &audit.report.findings;

    let expected = [
        ("title", 1),
        ("meta-description", 1),
        ("headings", 1),
        ("image-dimensions", 4),
        ("canonical", 1),
        ("aria-label", 1),
        ("focus-visible", 2),
        ("contrast", 1),
        ("open-graph", 3),
        ("twitter-card", 4),
        ("robots-txt", 1),
        ("sitemap-xml", 1),
        ("url-structure", 0),
        ("form-labels", 1),
        ("duplicate-content", 1),
        ("blocking-scripts", 1),
        ("media-title", 1),
    ];
    for (rule, count) in expected {
        assert_eq!(findings.by_rule(rule).len(), count, "unexpected count for {}", rule);
    }

    assert_eq!(findings.len(), 25);
    assert_eq!(audit.report.summary_count, 25);
    let seqs: Vec<u64> = findings.iter().map(|f| f.seq).collect();
    assert_eq!(seqs, (1..=25).collect::<Vec<u64>>());
    assert_eq!(findings.by_category(Category::Performance).len(), 1);
}

#[test]
fn test_poor_fixture_contrast_and_duplicates() {
    let audit = audit_fixture("poor.html", Config::default());
    let findings = &audit.report.findings;

    let contrast = findings.by_rule("contrast");
    assert!(contrast[0].message.starts_with("Low contrast ratio (1."));
    assert_eq!(contrast[0].element_html.as_deref(), Some(r#"<p class="faint">"#));

    // The third paragraph repeats the first
    let duplicate = findings.by_rule("duplicate-content");
    assert_eq!(duplicate[0].message, "Duplicated text content.");
    assert_eq!(duplicate[0].element_html.as_deref(), Some("<p>"));
}

#[test]
fn test_annotated_output_marks_flagged_elements() {
    let audit = audit_fixture("poor.html", Config::default());
    let html = audit.annotated_html.expect("annotation requested");

    assert!(html.contains(r#"<audio src="a.mp3" style="border: 2px dashed red">"#));
    assert!(html.contains(r#"<p class="faint" style="border: 2px dashed red">"#));
    // One mark per flagged element, however many findings it has
    assert_eq!(html.matches("border: 2px dashed red").count(), 8);
}

#[test]
fn test_runs_are_repeatable() {
    let first = audit_fixture("poor.html", Config::default());
    let second = audit_fixture("poor.html", Config::default());
    assert_eq!(first.report.findings, second.report.findings);
    assert_ne!(first.report.run_id, second.report.run_id);
}

#[test]
fn test_config_file_disables_rules_and_restyles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pageauditbot.toml");
    std::fs::write(
        &path,
        r#"
[rules]
disabled = ["robots-txt", "sitemap-xml", "open-graph", "twitter-card"]

[annotation]
style = "outline: 3px solid magenta"

[summary]
legacy_count = true
"#,
    )
    .unwrap();

    let config = config::load_config(&path).unwrap();
    let audit = audit_fixture("poor.html", config);

    assert_eq!(audit.report.findings.len(), 16);
    assert_eq!(audit.report.summary_count, 17);
    assert!(audit.report.findings.by_rule("open-graph").is_empty());
    let html = audit.annotated_html.unwrap();
    assert!(html.contains("outline: 3px solid magenta"));
    assert!(!html.contains("dashed red"));
}

#[test]
fn test_scan_directory_skips_hidden_and_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("blog")).unwrap();
    std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    std::fs::create_dir_all(root.join(".cache")).unwrap();

    let poor = std::fs::read_to_string("tests/fixtures/poor.html").unwrap();
    let clean = std::fs::read_to_string("tests/fixtures/clean.html").unwrap();
    std::fs::write(root.join("index.html"), &clean).unwrap();
    std::fs::write(root.join("blog/post.htm"), &poor).unwrap();
    std::fs::write(root.join("blog/notes.txt"), "not a page").unwrap();
    std::fs::write(root.join("node_modules/pkg/readme.html"), &poor).unwrap();
    std::fs::write(root.join(".cache/page.html"), &poor).unwrap();

    let config = Config::default();
    let auditor = Auditor::new(config.clone());
    let reports = scanner::scan_directory(root, &auditor, &config.scan).unwrap();

    assert_eq!(reports.len(), 2);
    let sources: Vec<String> = reports
        .iter()
        .map(|r| r.source.as_ref().unwrap().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(sources, vec!["post.htm", "index.html"]);
    assert!(reports.iter().all(|r| r.url.starts_with("file://")));
    // Each page numbers its own findings from 1
    assert!(reports.iter().all(|r| r.findings.findings[0].seq == 1));
}

#[test]
fn test_reports_in_every_format() {
    let audit = audit_fixture("poor.html", Config::default());
    let reports = [audit.report];

    let text = generate_report(&reports, OutputFormat::Text);
    assert!(text.contains("SEO and accessibility check complete. Issues found: 25."));
    assert!(text.contains("1: The <title> tag is missing."));

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&reports, OutputFormat::Json)).unwrap();
    assert_eq!(json[0]["findings"]["findings"].as_array().unwrap().len(), 25);
    assert_eq!(json[0]["url"], PAGE_URL);

    let sarif: serde_json::Value =
        serde_json::from_str(&generate_report(&reports, OutputFormat::Sarif)).unwrap();
    assert_eq!(sarif["runs"][0]["results"].as_array().unwrap().len(), 25);
}

#[test]
fn test_missing_file_is_an_error() {
    let auditor = Auditor::new(Config::default());
    let result = scanner::audit_file(Path::new("tests/fixtures/missing.html"), None, &auditor, false);
    assert!(result.is_err());
}
