// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for audit results.
//!
//! Supports multiple output formats:
//! - Text: numbered findings per page, ending with the summary line
//! - JSON: the full audit reports for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::auditor::AuditReport;
use crate::finding::Category;
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

/// Generate a report covering one or more audited pages
pub fn generate_report(reports: &[AuditReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(reports),
        OutputFormat::Json => generate_json_report(reports),
        OutputFormat::Sarif => generate_sarif_report(reports),
    }
}

/// Generate human-readable text report
fn generate_text_report(reports: &[AuditReport]) -> String {
    let mut output = String::new();

    output.push_str("=== Pageauditbot SEO & Accessibility Report ===\n");

    if reports.is_empty() {
        output.push_str("\nNo pages audited.\n");
        return output;
    }

    for report in reports {
        output.push('\n');
        match report.source {
            Some(ref source) => output.push_str(&format!("Page: {} ({})\n", report.url, source.display())),
            None => output.push_str(&format!("Page: {}\n", report.url)),
        }
        output.push_str(&format!(
            "Audited: {}  Run: {}\n\n",
            report.audited_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.run_id
        ));

        for finding in &report.findings {
            output.push_str(&format!(
                "{} [{}/{}]\n",
                finding.log_line(),
                finding.category,
                finding.rule_id
            ));
            if let Some(ref html) = finding.element_html {
                output.push_str(&format!("    Element: {}\n", html));
            }
        }

        if !report.failed_rules.is_empty() {
            output.push_str(&format!("\nFailed rules: {}\n", report.failed_rules.join(", ")));
        }

        output.push_str(&format!("\n{}\n", report.summary_line()));
    }

    if reports.len() > 1 {
        let total: usize = reports.iter().map(|r| r.findings.len()).sum();
        output.push_str(&format!(
            "\nAudited {} pages, {} issue(s) in total.\n",
            reports.len(),
            total
        ));
    }

    output
}

/// Generate JSON report
fn generate_json_report(reports: &[AuditReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize reports: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
    #[serde(rename = "logicalLocations", skip_serializing_if = "Vec::is_empty")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    name: String,
    kind: String,
}

/// Generate SARIF report
fn generate_sarif_report(reports: &[AuditReport]) -> String {
    let results: Vec<SarifResult> = reports
        .iter()
        .flat_map(|report| {
            let uri = report
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| report.url.clone());

            report.findings.iter().map(move |f| {
                let level = match f.category {
                    Category::Engine => "error",
                    _ => "warning",
                };

                let logical_locations = f
                    .element_html
                    .iter()
                    .map(|html| SarifLogicalLocation {
                        name: html.clone(),
                        kind: "element".to_string(),
                    })
                    .collect();

                SarifResult {
                    rule_id: f.rule_id.clone(),
                    level: level.to_string(),
                    message: SarifMessage {
                        text: f.message.clone(),
                    },
                    locations: vec![SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation { uri: uri.clone() },
                        },
                        logical_locations,
                    }],
                }
            })
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "pageauditbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/pageauditbot".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
