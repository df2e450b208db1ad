//! # Error Taxonomy / 错误分类
//!
//! Domain errors raised by the regression driver, the generator harness and the
//! suite loader. The application layer wraps them in `anyhow` with context.
//!
//! 回归驱动、生成器测试和套件加载器产生的领域错误。
//! 应用层使用 `anyhow` 为其附加上下文。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegressError {
    /// The regression engine module could not be imported by the interpreter.
    #[error("Unable to import the HDLRegression module with '{interpreter}'. See the HDLRegression documentation for installation instructions.")]
    MissingEngine { interpreter: String },

    /// The suite description is inconsistent.
    #[error("invalid suite '{suite}': {reason}")]
    InvalidSuite { suite: String, reason: String },

    /// The engine ran but did not report a result line.
    #[error("regression engine did not report a result (exit code {code:?})")]
    EngineProtocol { code: Option<i32>, output: String },

    /// A generator scenario failed or its answers went out of step with the prompts.
    #[error("generator scenario '{scenario}' failed: {reason}")]
    Generator {
        scenario: String,
        reason: String,
        output: String,
    },

    /// The generator finished without leaving its output directory behind.
    #[error("generator scenario '{scenario}' produced no output directory at {}", path.display())]
    MissingOutput { scenario: String, path: PathBuf },

    /// The run was interrupted by the user.
    #[error("run cancelled")]
    Cancelled,
}

impl RegressError {
    pub fn invalid_suite(suite: &str, reason: impl Into<String>) -> Self {
        RegressError::InvalidSuite {
            suite: suite.to_string(),
            reason: reason.into(),
        }
    }

    /// Captured process output attached to the error, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            RegressError::EngineProtocol { output, .. } => Some(output),
            RegressError::Generator { output, .. } => Some(output),
            _ => None,
        }
    }
}
