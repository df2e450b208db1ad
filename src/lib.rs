//! # VIP Regress Library / VIP Regress 库
//!
//! This library provides the core functionality for vip-regress, the
//! maintenance test runner for UVVM verification IP. It builds generic
//! matrices for VHDL testbenches, drives the HDLRegression engine, checks
//! the VVC code generator and keeps the simulation working directory clean.
//!
//! 此库为 vip-regress 提供核心功能，这是 UVVM 验证 IP 的维护测试运行器。
//! 它为 VHDL 测试平台构建泛型矩阵，驱动 HDLRegression 引擎，
//! 检查 VVC 代码生成器，并保持仿真工作目录整洁。
//!
//! ## Modules / 模块
//!
//! - `core` - Suite configuration, matrix builder, regression driver and generator harness
//! - `infra` - Process execution, file system operations and the engine backend
//! - `reporting` - Console summary and HTML/JSON reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 套件配置、矩阵构建器、回归驱动和生成器测试
//! - `infra` - 进程执行、文件系统操作和引擎后端
//! - `reporting` - 控制台摘要和 HTML/JSON 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::matrix;
pub use core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Maps a requested locale onto one the application ships.
///
/// The full locale is tried first (e.g. "zh-CN"), then the language part
/// only (e.g. "en" from "en-US"), and finally the default "en".
pub fn resolve_locale(locale: String) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .find(|available| {
                    **available == lang_code || available.split('-').next() == Some(lang_code)
                })
                .map(|available| available.to_string())
        })
        .unwrap_or_else(|| "en".to_string())
}
