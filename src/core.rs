//! # Core Module / 核心模块
//!
//! This module contains the core functionality of vip-regress: data models,
//! suite configuration, the test-matrix builder, the regression driver and
//! the code-generator harness.
//!
//! 此模块包含 vip-regress 的核心功能：数据模型、套件配置、
//! 测试矩阵构建器、回归驱动和代码生成器测试。

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod execution;
pub mod generator;
pub mod matrix;
pub mod models;
pub mod planner;
pub mod simulator;

// Re-exports
pub use config::Suite;
pub use engine::RegressionEngine;
pub use error::RegressError;
pub use execution::run_suite;
