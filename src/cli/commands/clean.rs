//! # Clean Command Module / 清理命令模块
//!
//! Standalone access to the working-directory cleanup.
//!
//! 单独调用工作目录清理。

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::infra::fs::{CleanupReport, absolute_path, cleanup_sim_dir};
use crate::infra::t;

pub fn execute(sim_dir: &Path, sentinel: &str) -> Result<()> {
    let sim_dir = absolute_path(sim_dir)?;
    println!("{}", t!("cleanup.previous_runs"));
    match cleanup_sim_dir(&sim_dir, sentinel)? {
        CleanupReport::Skipped { expected, .. } => {
            println!("{}", t!("cleanup.skipped", expected = expected).yellow());
        }
        CleanupReport::Cleaned { removed, failed } => {
            println!(
                "{}",
                t!("cleanup.done", count = removed, path = sim_dir.display()).green()
            );
            if !failed.is_empty() {
                println!("{}", t!("cleanup.failures", count = failed.len()).yellow());
                for path in failed {
                    println!("  {}", path.display());
                }
            }
        }
    }
    Ok(())
}
