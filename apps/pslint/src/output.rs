//! Output rendering for lint and submission reports.
//!
//! Supports `human` (default) and `json` outputs. Human lint output keeps
//! the classic `<line>: <severity>: <message>[: '<text>']` shape so it can
//! be compared line by line across runs.

use crate::error::LintError;
use crate::models::{Issue, LintResult, Severity};
use crate::submissions::SubmissionReport;
use crate::utils::{error_prefix, use_colors};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Render one issue (without detail lines).
pub fn render_issue(is: &Issue, color: bool) -> String {
    let sev = match (is.severity, color) {
        (Severity::Error, true) => "error".red().bold().to_string(),
        (Severity::Warning, true) => "warning".yellow().bold().to_string(),
        (sev, false) => sev.to_string(),
    };
    match &is.text {
        Some(t) => format!("{}: {}: {}: '{}'", is.line, sev, is.message, t),
        None => format!("{}: {}: {}", is.line, sev, is.message),
    }
}

/// All stdout lines for one lint result, summary included.
pub fn render_lint(res: &LintResult, color: bool) -> Vec<String> {
    let mut out = Vec::new();
    for is in &res.issues {
        out.push(render_issue(is, color));
        out.extend(is.details.iter().cloned());
    }
    let s = &res.summary;
    let summary = format!(
        "errors={} warnings={} rules={} lines={}",
        s.errors, s.warnings, s.rules, s.lines
    );
    if color {
        out.push(summary.bold().to_string());
    } else {
        out.push(summary);
    }
    out
}

/// Print lint results in the requested format.
pub fn print_lint(results: &[LintResult], output: &str, errors: &[LintError]) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_lint_json(results, errors)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            let headed = results.len() + errors.len() > 1;
            for res in results {
                if headed {
                    if color {
                        println!("{}", res.file.bold());
                    } else {
                        println!("{}", res.file);
                    }
                }
                for line in render_lint(res, color) {
                    println!("{}", line);
                }
            }
            for e in errors {
                eprintln!("{} {}", error_prefix(), e);
            }
        }
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(results: &[LintResult], errors: &[LintError]) -> JsonVal {
    let items: Vec<JsonVal> = results
        .iter()
        .map(|r| serde_json::to_value(r).unwrap_or(JsonVal::Null))
        .collect();
    let failures: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    let summary = json!({
        "errors": results.iter().map(|r| r.summary.errors).sum::<usize>(),
        "warnings": results.iter().map(|r| r.summary.warnings).sum::<usize>(),
        "files": results.len(),
        "failed": errors.len(),
    });
    json!({"results": items, "failures": failures, "summary": summary})
}

/// Human lines for a submission report.
pub fn render_submissions(rep: &SubmissionReport) -> Vec<String> {
    let mut out = Vec::new();
    if !rep.misordered_titles.is_empty() {
        out.push("The following submissions were entered in the wrong order:".to_string());
        for p in &rep.misordered_titles {
            out.push(format!("\t{}: '{}' before '{}'", p.line, p.before, p.after));
        }
    }
    for sub in rep.submissions.iter().filter(|s| !s.misordered.is_empty()) {
        out.push(format!(
            "The submission for {} (line {}) contains domains in an improper order, which are:",
            sub.title, sub.line
        ));
        for p in &sub.misordered {
            out.push(format!("\t{}: '{}' before '{}'", p.line, p.before, p.after));
        }
    }
    out.push(format!(
        "submissions={} misordered_titles={} misordered_domains={}",
        rep.submissions.len(),
        rep.misordered_titles.len(),
        rep.misordered_domains()
    ));
    out
}

pub fn print_submissions(rep: &SubmissionReport, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(rep) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", error_prefix(), e),
        },
        _ => {
            for line in render_submissions(rep) {
                println!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{lint_str, LintOptions};
    use crate::submissions::analyze_str;
    use std::path::PathBuf;

    #[test]
    fn test_render_issue_with_and_without_echo() {
        let res = lint_str(
            "// ===BEGIN ICANN DOMAINS===\nEXAMPLE.COM\n// ===END ICANN DOMAINS===\n",
            LintOptions::default(),
        );
        assert_eq!(
            render_issue(&res.issues[0], false),
            "2: error: Rule must be lowercase: 'EXAMPLE.COM'"
        );
        assert_eq!(
            render_issue(&res.issues[1], false),
            "3: warning: No PRIVATE section found"
        );
    }

    #[test]
    fn test_render_lint_includes_details_and_summary() {
        let res = lint_str(
            "// ===BEGIN ICANN DOMAINS===\nb.com\na.com\n",
            LintOptions { check_order: true },
        );
        let lines = render_lint(&res, false);
        assert_eq!(lines[0], "3: warning: Incorrectly sorted group of domains");
        assert_eq!(lines[1], "  [b.com, a.com]");
        assert_eq!(lines[3], "Correct sorting would be:");
        assert_eq!(lines[4], "a.com");
        assert_eq!(lines.last().unwrap(), "errors=1 warnings=2 rules=2 lines=3");
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let res = lint_str("foo.bar\n", LintOptions::default());
        let err = LintError::Open {
            path: PathBuf::from("missing.dat"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let out = compose_lint_json(&[res], &[err]);
        assert_eq!(out["summary"]["files"], 1);
        assert_eq!(out["summary"]["failed"], 1);
        assert_eq!(out["summary"]["errors"], 1);
        assert_eq!(out["results"][0]["issues"][0]["rule"], "rule-outside-section");
        assert_eq!(out["results"][0]["issues"][0]["severity"], "error");
        assert_eq!(out["results"][0]["issues"][0]["text"], "foo.bar");
        assert!(out["failures"][0].as_str().unwrap().contains("missing.dat"));
    }

    #[test]
    fn test_render_submissions() {
        let rep = analyze_str(
            "// ===BEGIN PRIVATE DOMAINS===\n// B : https://b.example\nb.example\n\
             // A : https://a.example\nz.a.example\ny.a.example\n// ===END PRIVATE DOMAINS===\n",
        );
        let lines = render_submissions(&rep);
        assert_eq!(
            lines[0],
            "The following submissions were entered in the wrong order:"
        );
        assert_eq!(lines[1], "\t4: 'B' before 'A'");
        assert!(lines[2].starts_with("The submission for A (line 4)"));
        assert_eq!(lines[3], "\t6: 'z.a.example' before 'y.a.example'");
        assert_eq!(
            lines[4],
            "submissions=2 misordered_titles=1 misordered_domains=1"
        );
    }
}
