//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for vip-regress: process
//! execution with scripted stdin, working-directory file operations, the
//! HDLRegression engine backend and logging setup.
//!
//! 此模块为 vip-regress 提供基础设施服务：带预设 stdin 的进程执行、
//! 工作目录文件操作、HDLRegression 引擎后端以及日志设置。

pub mod command;
pub mod fs;
pub mod hdlregression;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
