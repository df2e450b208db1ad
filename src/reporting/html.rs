//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the suite outcome as a standalone HTML page.
//!
//! 将套件结果渲染为独立的 HTML 页面。

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;

use crate::core::models::SuiteOutcome;
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = "
body { font-family: sans-serif; margin: 2em; color: #222; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }
th { background: #f0f0f0; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
.status-Passed { color: #1a7f37; font-weight: bold; }
.status-Failed { color: #cf222e; font-weight: bold; }
.summary { margin: 1em 0; font-size: 1.1em; }
";

/// Builds the report markup.
pub fn render_html_report(outcome: &SuiteOutcome) -> Markup {
    let title = t!("html_report.title", name = &outcome.suite);
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (HTML_STYLE) }
            }
            body {
                h1 { (title) }
                p {
                    (t!("html_report.generated_at", time = outcome.started_at.format("%Y-%m-%d %H:%M:%S")))
                }
                p.summary {
                    @if outcome.is_success() {
                        span."status-Passed" { (t!("summary.all_passed")) }
                    } @else {
                        span."status-Failed" { (t!("summary.failed", code = outcome.exit_code())) }
                    }
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.phase")) }
                            th { (t!("html_report.status")) }
                            th { (t!("html_report.simulator")) }
                            th { (t!("html_report.passed")) }
                            th { (t!("html_report.failed")) }
                            th { (t!("html_report.post_run")) }
                            th { (t!("html_report.exit_code")) }
                            th { (t!("html_report.duration")) }
                        }
                    }
                    tbody {
                        @for phase in &outcome.phases {
                            tr {
                                td { (phase.name) }
                                @if phase.is_success() {
                                    td."status-Passed" { (t!("summary.status_passed")) }
                                } @else {
                                    td."status-Failed" { (t!("summary.status_failed")) }
                                }
                                td { (phase.simulator) }
                                td.num { (phase.result.passed) }
                                td.num { (phase.result.failed) }
                                td.num { (phase.post_run_failures) }
                                td.num { (phase.exit_code) }
                                td.num { (format!("{:.2?}", phase.duration)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Writes the HTML report for `outcome` to `output_path`.
pub fn generate_html_report(outcome: &SuiteOutcome, output_path: &Path) -> Result<()> {
    let markup = render_html_report(outcome);
    fs::write(output_path, markup.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}
