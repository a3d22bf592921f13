// SPDX-License-Identifier: PMPL-1.0-or-later
//! Benchmarks for pageauditbot rules and the full audit

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pageauditbot::config::Config;
use pageauditbot::document::{serialize, HtmlPage};
use pageauditbot::rules::{contrast::ContrastRule, structure::DuplicateContentRule, Rule};
use pageauditbot::Auditor;
use scraper::Html;

const URL: &str = "https://example.com/widgets";

fn fixture() -> String {
    std::fs::read_to_string("tests/fixtures/poor.html").expect("fixture present")
}

/// A long page with repeated sections
fn large_page() -> String {
    let mut body = String::new();
    for i in 0..200 {
        body.push_str(&format!(
            r#"<section><h2>Section {i}</h2><p class="faint">Shared text</p>
            <img src="/img/{i}.png" width="10.5"><a href="/{i}">Link {i}</a></section>"#
        ));
    }
    format!(
        r#"<html><head><style>.faint {{ background-color: #777777; color: #888888 }}</style></head>
        <body>{body}</body></html>"#
    )
}

fn bench_parse_page(c: &mut Criterion) {
    let source = large_page();
    c.bench_function("parse_page", |b| {
        b.iter(|| {
            let html = Html::parse_document(black_box(&source));
            HtmlPage::new(&html, URL).element_count()
        })
    });
}

fn bench_contrast_rule(c: &mut Criterion) {
    let html = Html::parse_document(&large_page());
    let page = HtmlPage::new(&html, URL);
    let rule = ContrastRule::default();

    c.bench_function("contrast_rule", |b| b.iter(|| rule.inspect(black_box(&page))));
}

fn bench_duplicate_content_rule(c: &mut Criterion) {
    let html = Html::parse_document(&large_page());
    let page = HtmlPage::new(&html, URL);

    c.bench_function("duplicate_content_rule", |b| {
        b.iter(|| DuplicateContentRule.inspect(black_box(&page)))
    });
}

fn bench_full_audit(c: &mut Criterion) {
    let source = fixture();
    let auditor = Auditor::new(Config::default());

    c.bench_function("full_audit", |b| {
        b.iter(|| {
            let html = Html::parse_document(black_box(&source));
            let mut page = HtmlPage::new(&html, URL);
            let report = auditor.run(&mut page);
            let annotated = serialize::to_annotated_html(&page);
            (report.map(|r| r.findings.len()), annotated.len())
        })
    });
}

criterion_group!(
    benches,
    bench_parse_page,
    bench_contrast_rule,
    bench_duplicate_content_rule,
    bench_full_audit
);
criterion_main!(benches);
