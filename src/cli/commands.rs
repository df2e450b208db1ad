//! # CLI Commands / CLI 命令
//!
//! One module per subcommand.
//!
//! 每个子命令一个模块。

pub mod clean;
pub mod init;
pub mod plan;
pub mod run;
