//! # Plan Command Module / 计划命令模块
//!
//! Prints what a suite would register with the engine without running it.
//!
//! 打印套件将要注册到引擎的内容，而不实际运行。

use anyhow::Result;
use colored::*;

use crate::cli::commands::run::SuiteSource;
use crate::core::planner::plan_suite;
use crate::core::simulator::display_command;
use crate::infra::t;

pub fn execute(source: SuiteSource, lang_overridden: bool) -> Result<()> {
    let suite = source.load()?;
    if !lang_overridden {
        rust_i18n::set_locale(&crate::resolve_locale(suite.language.clone()));
    }
    let plan = plan_suite(&suite);

    println!("{}", t!("verify_suite", name = &suite.name).bold());

    println!("\n{}", t!("plan.sources", count = plan.sources.len()).cyan());
    for group in &plan.sources {
        println!("  {:<28} {}", group.library, group.pattern);
    }

    println!("\n{}", t!("plan.assignments", count = plan.assignments.len()).cyan());
    for assignment in &plan.assignments {
        let generics = assignment
            .generics
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {:<28} {}", assignment.entity, generics);
    }

    if !suite.simulators.is_empty() {
        println!("\n{}", t!("plan.simulators").cyan());
        for profile in &suite.simulators {
            println!("  {}", profile.names.join(" | ").bold());
            if let Some(sim_options) = &profile.sim_options {
                println!("    sim_options:    {}", sim_options);
            }
            if !profile.global_options.is_empty() {
                println!("    global_options: {}", profile.global_options.join(" "));
            }
            if let Some(com_options) = &profile.com_options {
                println!("    com_options:    {}", com_options.join(" "));
            }
            for argv in &profile.post_run {
                println!("    post_run:       {}", display_command(argv));
            }
        }
    }

    if !plan.scenarios.is_empty() {
        println!("\n{}", t!("plan.scenarios", count = plan.scenarios.len()).cyan());
        for scenario in &plan.scenarios {
            println!(
                "  {:>2}. {:<10} -> {:<20} [{}]  {}",
                scenario.index,
                scenario.name,
                scenario.renamed_dir,
                scenario.library,
                scenario.answers.join(", ").dimmed()
            );
        }
    }

    Ok(())
}
