// SPDX-License-Identifier: PMPL-1.0-or-later
//! Render-blocking scripts.

use crate::document::Document;
use crate::error::Result;
use crate::finding::Category;
use crate::rules::{Issue, Rule};

/// Flags same-origin or inline scripts loaded without `async`/`defer`.
///
/// A `src` containing `://` marks the script as cross-origin and exempts it.
pub struct BlockingScriptRule;

impl Rule for BlockingScriptRule {
    fn id(&self) -> &str {
        "blocking-scripts"
    }

    fn name(&self) -> &str {
        "Render-Blocking Scripts"
    }

    fn description(&self) -> &str {
        "Checks for local or inline scripts without async or defer"
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn inspect(&self, document: &dyn Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for script in document.select("script")? {
            if document.has_attr(script, "async") || document.has_attr(script, "defer") {
                continue;
            }
            let src = document.attr(script, "src").unwrap_or_default();
            if src.contains("://") {
                continue;
            }
            issues.push(Issue::at(
                script,
                "Script without async or defer may block rendering.",
            ));
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::run;

    #[test]
    fn test_cross_origin_script_is_not_flagged() {
        let html = r#"<script src="https://cdn.example.com/a.js"></script>"#;
        assert!(run(&BlockingScriptRule, html).is_empty());
    }

    #[test]
    fn test_local_script_is_flagged() {
        let html = r#"<script src="/local.js"></script>"#;
        assert_eq!(run(&BlockingScriptRule, html).len(), 1);
    }

    #[test]
    fn test_deferred_local_script_is_not_flagged() {
        let html = r#"<script src="/local.js" defer></script><script src="/b.js" async></script>"#;
        assert!(run(&BlockingScriptRule, html).is_empty());
    }

    #[test]
    fn test_inline_script_is_flagged() {
        let html = r#"<head><script>window.x = 1;</script></head>"#;
        let issues = run(&BlockingScriptRule, html);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Script without async or defer may block rendering."
        );
    }

    #[test]
    fn test_protocol_relative_src_counts_as_local() {
        let html = r#"<script src="//cdn.example.com/a.js"></script>"#;
        assert_eq!(run(&BlockingScriptRule, html).len(), 1);
    }
}
