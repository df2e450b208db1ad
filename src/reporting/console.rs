//! # Console Reporting Module / 控制台报告模块
//!
//! Prints the colored end-of-run summary.
//!
//! 打印运行结束时的彩色摘要。

use colored::*;

use crate::core::models::{PhaseOutcome, SuiteOutcome};
use crate::infra::t;

/// Prints a formatted summary of every phase of the suite run.
///
/// # Output Format / 输出格式
/// ```text
/// --- Suite Summary ---
///   - Passed   | Bitvis VIP AXI Stream          | pass  20 | fail   0 | post-run 0 |     312.40s
///   - Failed   | VVC generator                  | pass   0 | fail   0 | post-run 0 |      45.02s
/// ```
pub fn print_summary(outcome: &SuiteOutcome) {
    println!("\n{}", t!("summary.banner").bold());

    for phase in &outcome.phases {
        println!(
            "  - {:<8} | {:<30} | pass {:>3} | fail {:>3} | post-run {} | {:>10}",
            status_colored(phase),
            phase.name,
            phase.result.passed,
            phase.result.failed,
            phase.post_run_failures,
            format!("{:.2?}", phase.duration),
        );
    }

    if outcome.is_success() {
        println!("\n{}", t!("summary.all_passed").green().bold());
    } else {
        println!(
            "\n{}",
            t!("summary.failed", code = outcome.exit_code()).red().bold()
        );
    }
}

fn status_colored(phase: &PhaseOutcome) -> ColoredString {
    if phase.is_success() {
        t!("summary.status_passed").green()
    } else {
        t!("summary.status_failed").red()
    }
}

/// Prints captured output attached to an error, framed like a log section.
pub fn print_error_output(title: &str, output: &str) {
    if output.trim().is_empty() {
        return;
    }
    println!("\n--- {} ---\n", title.yellow());
    println!("{}", output.trim_end());
    println!("\n{}", "-".repeat(80));
}
