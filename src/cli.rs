// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::execution::PhaseSelection;
use crate::infra::{logging, t};

pub mod commands;

use commands::run::{RunArgs, SuiteSource};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn suite_args(cmd: Command, locale: &str) -> Command {
    cmd.arg(
        Arg::new("suite")
            .short('s')
            .long("suite")
            .help(t!("arg_suite", locale = locale).to_string())
            .value_name("SUITE")
            .default_value("VipRegress.toml")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("builtin")
            .short('b')
            .long("builtin")
            .help(t!("arg_builtin", locale = locale).to_string())
            .value_name("NAME")
            .value_parser(crate::core::config::builtin_suite_names())
            .action(ArgAction::Set),
    )
}

fn engine_args(cmd: Command, locale: &str) -> Command {
    cmd.arg(
        Arg::new("sim-dir")
            .long("sim-dir")
            .help(t!("arg_sim_dir", locale = locale).to_string())
            .value_name("SIM_DIR")
            .default_value(".")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("python")
            .long("python")
            .help(t!("arg_python", locale = locale).to_string())
            .value_name("PYTHON")
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("simulator")
            .long("simulator")
            .help(t!("arg_simulator", locale = locale).to_string())
            .value_name("SIMULATOR")
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("keep-output")
            .long("keep-output")
            .help(t!("arg_keep_output", locale = locale).to_string())
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("html")
            .long("html")
            .help(t!("arg_html", locale = locale).to_string())
            .value_name("HTML")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .help(t!("arg_json", locale = locale).to_string())
            .value_name("JSON")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("engine-args")
            .help(t!("arg_engine_args", locale = locale).to_string())
            .value_name("ENGINE_ARGS")
            .num_args(1..)
            .allow_hyphen_values(true)
            .last(true)
            .action(ArgAction::Append),
    )
}

pub fn build_cli(locale: &str) -> Command {
    let run = engine_args(
        suite_args(
            Command::new("run").about(t!("cmd_run_about", locale = locale).to_string()),
            locale,
        ),
        locale,
    );
    let generate = engine_args(
        suite_args(
            Command::new("generate").about(t!("cmd_generate_about", locale = locale).to_string()),
            locale,
        ),
        locale,
    );
    let plan = suite_args(
        Command::new("plan").about(t!("cmd_plan_about", locale = locale).to_string()),
        locale,
    );

    Command::new("vip-regress")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli_verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(run)
        .subcommand(generate)
        .subcommand(plan)
        .subcommand(
            Command::new("clean")
                .about(t!("cmd_clean_about", locale = locale).to_string())
                .arg(
                    Arg::new("sim-dir")
                        .long("sim-dir")
                        .help(t!("arg_sim_dir", locale = locale).to_string())
                        .value_name("SIM_DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("sentinel")
                        .long("sentinel")
                        .help(t!("arg_sentinel", locale = locale).to_string())
                        .value_name("NAME")
                        .default_value("sim")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .help(t!("arg_template", locale = locale).to_string())
                        .value_name("TEMPLATE")
                        .value_parser(crate::core::config::builtin_suite_names())
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn suite_source(matches: &ArgMatches) -> SuiteSource {
    match matches.get_one::<String>("builtin") {
        Some(name) => SuiteSource::Builtin(name.clone()),
        None => SuiteSource::File(
            matches
                .get_one::<PathBuf>("suite")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("VipRegress.toml")),
        ),
    }
}

fn run_args(matches: &ArgMatches, lang_overridden: bool) -> RunArgs {
    RunArgs {
        suite: suite_source(matches),
        sim_dir: matches
            .get_one::<PathBuf>("sim-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        python: matches.get_one::<String>("python").cloned(),
        simulator: matches.get_one::<String>("simulator").cloned(),
        keep_output: matches.get_flag("keep-output"),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
        engine_args: matches
            .get_many::<String>("engine-args")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        lang_overridden,
    }
}

/// Parses the command line, runs the selected command and returns the
/// process exit code: the number of failing tests for `run` and `generate`.
pub async fn run() -> Result<u8> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let language = crate::resolve_locale(
        explicit_language
            .clone()
            .unwrap_or_else(|| sys_locale::get_locale().unwrap_or_else(|| "en".to_string())),
    );
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();
    logging::init(matches.get_count("verbose"));
    let lang_overridden = explicit_language.is_some();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(run_args(run_matches, lang_overridden), PhaseSelection::ALL).await
        }
        Some(("generate", gen_matches)) => {
            commands::run::execute(
                run_args(gen_matches, lang_overridden),
                PhaseSelection::GENERATOR_ONLY,
            )
            .await
        }
        Some(("plan", plan_matches)) => {
            commands::plan::execute(suite_source(plan_matches), lang_overridden)?;
            Ok(0)
        }
        Some(("clean", clean_matches)) => {
            let sim_dir = clean_matches
                .get_one::<PathBuf>("sim-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("."));
            let sentinel = clean_matches
                .get_one::<String>("sentinel")
                .cloned()
                .unwrap_or_else(|| "sim".to_string());
            commands::clean::execute(&sim_dir, &sentinel)?;
            Ok(0)
        }
        Some(("init", init_matches)) => {
            commands::init::execute(
                init_matches.get_one::<PathBuf>("output").cloned(),
                init_matches.get_one::<String>("template").cloned(),
                init_matches.get_flag("force"),
                init_matches.get_flag("non-interactive"),
            )?;
            Ok(0)
        }
        _ => {
            // `subcommand_required` makes clap print help and exit before this.
            Ok(0)
        }
    }
}
