//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a suite file from
//! one of the built-in templates, either directly or through an interactive
//! wizard.
//!
//! 此模块实现 `init` 命令，它根据内置模板之一写出套件文件，
//! 可以直接写出，也可以通过交互式向导完成。
//!
//! ## Features / 功能特性
//!
//! - **Template Selection**: the built-in suites serve as starting points
//! - **Suite Naming**: the display name can be changed in the wizard
//! - **Overwrite Protection**: confirmation (or `--force`) before replacing a file
//!
//! - **模板选择**: 内置套件作为起点
//! - **套件命名**: 可以在向导中修改显示名称
//! - **覆盖保护**: 替换文件前需要确认（或 `--force`）

use anyhow::{Context, Result, anyhow};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{Suite, builtin_suite_names, builtin_suite_source};
use crate::infra::t;

/// The default name for the suite file.
const SUITE_FILE_NAME: &str = "VipRegress.toml";

const DEFAULT_TEMPLATE: &str = "bitvis-vip-axistream";

/// Writes a suite file from a template.
///
/// # Arguments
/// * `output` - Path for the new suite file, `VipRegress.toml` if not given
/// * `template` - Built-in suite to start from
/// * `force` - Overwrite an existing file without asking
/// * `non_interactive` - Skip the wizard
pub fn execute(
    output: Option<PathBuf>,
    template: Option<String>,
    force: bool,
    non_interactive: bool,
) -> Result<()> {
    if non_interactive {
        let output = output.unwrap_or_else(|| PathBuf::from(SUITE_FILE_NAME));
        let template = template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
        if output.exists() && !force {
            println!("{}", t!("init.file_exists", path = output.display()).red());
            println!("{}", t!("init.use_force").yellow());
            return Ok(());
        }
        let content = template_source(&template)?;
        return write_suite(&output, content);
    }

    run_init_wizard(output, template, force)
}

/// Runs the interactive wizard.
fn run_init_wizard(output: Option<PathBuf>, template: Option<String>, force: bool) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("\n{}", t!("init.wizard_welcome").bold().cyan());

    let names = builtin_suite_names();
    let template = match template {
        Some(template) => template,
        None => {
            let default = names.iter().position(|n| *n == DEFAULT_TEMPLATE).unwrap_or(0);
            let index = Select::with_theme(&theme)
                .with_prompt(t!("init.select_template").to_string())
                .items(&names)
                .default(default)
                .interact()
                .context(t!("init.prompt_failed").to_string())?;
            names[index].to_string()
        }
    };
    let content = template_source(&template)?;
    let current_name = Suite::from_toml(content)?.name;

    let name: String = Input::with_theme(&theme)
        .with_prompt(t!("init.suite_name_prompt").to_string())
        .default(current_name.clone())
        .interact_text()
        .context(t!("init.prompt_failed").to_string())?;

    let output = match output {
        Some(output) => output,
        None => {
            let path: String = Input::with_theme(&theme)
                .with_prompt(t!("init.output_prompt").to_string())
                .default(SUITE_FILE_NAME.to_string())
                .interact_text()
                .context(t!("init.prompt_failed").to_string())?;
            PathBuf::from(path)
        }
    };

    if output.exists() && !force && !confirm_overwrite(&theme, &output)? {
        println!("{}", t!("init.aborted").yellow());
        return Ok(());
    }

    let content = rename_suite(content, &current_name, &name);
    write_suite(&output, &content)
}

fn template_source(template: &str) -> Result<&'static str> {
    builtin_suite_source(template).ok_or_else(|| {
        anyhow!(
            "Unknown template '{}'. Available: {}",
            template,
            builtin_suite_names().join(", ")
        )
    })
}

/// Replaces the top-level `name = "..."` line of a template.
pub fn rename_suite(content: &str, current: &str, new_name: &str) -> String {
    if current == new_name {
        return content.to_string();
    }
    let old_line = format!("name = {}", toml::Value::from(current));
    let new_line = format!("name = {}", toml::Value::from(new_name));
    content.replacen(&old_line, &new_line, 1)
}

fn confirm_overwrite(theme: &ColorfulTheme, output: &Path) -> Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(t!("init.overwrite_prompt", path = output.display()).to_string())
        .default(false)
        .interact()
        .context(t!("init.prompt_failed").to_string())
}

fn write_suite(output: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", path = parent.display()).to_string()
            })?;
        }
    }

    fs::write(output, content)
        .with_context(|| t!("init.write_failed", path = output.display()).to_string())?;

    println!(
        "{} {}",
        "✔".green(),
        t!("init.success", path = output.display()).bold()
    );
    println!("{}", t!("init.next_steps", path = output.display()));
    Ok(())
}
