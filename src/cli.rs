//! # Command-Line Interface / 命令行接口
//!
//! Builds the `clap` command tree and dispatches to the commands. Running the
//! binary without a subcommand is the same as `run` with every default, which
//! executes `test-queries/` against both engine configurations.
//!
//! 构建 `clap` 命令树并分发到各个命令。不带子命令运行等同于使用全部默认值的 `run`。

pub mod commands;

use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, parser::ValueSource};
use std::{env, path::PathBuf};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::infra::t;
use commands::run::RunOptions;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

const RUN_ARG_IDS: [&str; 5] = ["config", "cases-dir", "delay", "repetitions", "keep-going"];

/// Run options are global so they are honored on either side of `run`.
fn run_args(locale: &str) -> Vec<Arg> {
    let args = vec![
        Arg::new("config")
            .short('c')
            .long("config")
            .help(t!("cli.arg_config", locale = locale, default = DEFAULT_CONFIG_FILE).to_string())
            .value_name("CONFIG")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("cases-dir")
            .long("cases-dir")
            .help(t!("cli.arg_cases_dir", locale = locale).to_string())
            .value_name("DIR")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("delay")
            .long("delay")
            .help(t!("cli.arg_delay", locale = locale).to_string())
            .value_name("SECONDS")
            .value_parser(clap::value_parser!(u64))
            .action(ArgAction::Set),
        Arg::new("repetitions")
            .short('n')
            .long("repetitions")
            .help(t!("cli.arg_repetitions", locale = locale).to_string())
            .value_name("COUNT")
            .value_parser(clap::value_parser!(u32))
            .action(ArgAction::Set),
        Arg::new("keep-going")
            .long("keep-going")
            .help(t!("cli.arg_keep_going", locale = locale).to_string())
            .action(ArgAction::SetTrue),
    ];
    args.into_iter().map(|arg| arg.global(true)).collect()
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("sparql-bench-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.arg_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .args(run_args(locale))
        .subcommand(
            Command::new("run").about(t!("cli.cmd_run_about", locale = locale).to_string()),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.arg_output", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_options(matches: &ArgMatches, lang: Option<String>) -> RunOptions {
    RunOptions {
        config: matches.get_one::<PathBuf>("config").cloned(),
        cases_dir: matches.get_one::<PathBuf>("cases-dir").cloned(),
        delay_secs: matches.get_one::<u64>("delay").copied(),
        repetitions: matches.get_one::<u32>("repetitions").copied(),
        keep_going: matches.get_flag("keep-going"),
        lang,
    }
}

/// Global run options reach `init` too, where they have no meaning.
fn reject_run_args(matches: &ArgMatches, locale: &str) -> Result<()> {
    for id in RUN_ARG_IDS {
        if matches.value_source(id) == Some(ValueSource::CommandLine) {
            bail!(t!("cli.run_arg_not_allowed", locale = locale, arg = id, command = "init").to_string());
        }
    }
    Ok(())
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested_lang = pre_parse_language();
    let locale = crate::init(requested_lang.as_deref());

    let matches = build_cli(&locale).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(run_options(run_matches, requested_lang)).await?;
        }
        Some(("init", init_matches)) => {
            reject_run_args(init_matches, &locale)?;
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            let force = init_matches.get_flag("force");
            commands::init::execute(output, force, &locale)?;
        }
        _ => {
            // No subcommand: run with the top-level flags.
            commands::run::execute(run_options(&matches, requested_lang)).await?;
        }
    }
    Ok(())
}
