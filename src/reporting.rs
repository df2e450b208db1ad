//! # Reporting Module / 报告模块
//!
//! This module prints the end-of-run summary to the console and writes the
//! optional HTML and JSON reports.
//!
//! 此模块在控制台打印运行结束摘要，并写出可选的 HTML 和 JSON 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_error_output, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;
