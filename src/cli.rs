// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum, builder::EnumValueParser};
use std::env;
use std::process::ExitCode;

use crate::{
    commands,
    infra::{fs::expand_path, t},
};

/// How results are written to stdout.
/// 结果写入 stdout 的方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colorful, localized console output / 彩色本地化控制台输出
    #[default]
    Text,
    /// A single JSON document and nothing else / 仅输出一个 JSON 文档
    Json,
}

/// Options of `exec` that consume the following argument as their value.
const EXEC_VALUE_OPTIONS: &[&str] = &[
    "-w", "--chdir", "-u", "--user", "--backend", "--timeout", "--format",
];

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    language_from_args(&args)
}

/// Finds the value of `--lang <VALUE>` or `--lang=<VALUE>` in `args`
/// (program name first).
///
/// Scanning stops at `--` and, for `exec`, at the container name: the words
/// after it belong to the command run in the container.
///
/// 在 `args` 中查找 `--lang` 的值。遇到 `--` 或 `exec` 的容器名时停止扫描。
pub fn language_from_args(args: &[String]) -> Option<String> {
    let mut language = None;
    let mut in_exec = false;
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        if arg == "--" {
            break;
        }
        if arg == "--lang" {
            language = rest.next().cloned();
            continue;
        }
        if let Some(value) = arg.strip_prefix("--lang=") {
            language = Some(value.to_string());
            continue;
        }
        if !in_exec {
            in_exec = arg == "exec";
            continue;
        }
        if EXEC_VALUE_OPTIONS.contains(&arg.as_str()) {
            rest.next();
        } else if !arg.starts_with('-') {
            break;
        }
    }
    language
}

fn runner_args(cmd: Command, locale: &str) -> Command {
    cmd.arg(
        Arg::new("backend")
            .long("backend")
            .help(t!("arg_backend", locale = locale).to_string())
            .value_name("BACKEND")
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("timeout")
            .long("timeout")
            .help(t!("arg_timeout", locale = locale).to_string())
            .value_name("SECONDS")
            .value_parser(clap::value_parser!(u64).range(1..))
            .action(ArgAction::Set),
    )
}

fn format_arg(locale: &str) -> Arg {
    Arg::new("format")
        .long("format")
        .help(t!("arg_format", locale = locale).to_string())
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(EnumValueParser::<OutputFormat>::new())
        .action(ArgAction::Set)
}

fn verbose_arg(locale: &str) -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(t!("arg_verbose", locale = locale).to_string())
        .action(ArgAction::SetTrue)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("container-command")
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
        .subcommand(
            runner_args(
                Command::new("exec")
                    .about(t!("cmd_exec_about", locale = locale).to_string())
                    .arg(
                        Arg::new("chdir")
                            .short('w')
                            .long("chdir")
                            .help(t!("arg_chdir", locale = locale).to_string())
                            .value_name("DIR")
                            .action(ArgAction::Set),
                    )
                    .arg(
                        Arg::new("user")
                            .short('u')
                            .long("user")
                            .help(t!("arg_user", locale = locale).to_string())
                            .value_name("USER")
                            .action(ArgAction::Set),
                    )
                    .arg(format_arg(locale))
                    .arg(verbose_arg(locale))
                    .arg(
                        Arg::new("container")
                            .help(t!("arg_container", locale = locale).to_string())
                            .value_name("CONTAINER")
                            .required(true)
                            .action(ArgAction::Set),
                    )
                    .arg(
                        Arg::new("command")
                            .help(t!("arg_command", locale = locale).to_string())
                            .value_name("COMMAND")
                            .required(true)
                            .num_args(1..)
                            .trailing_var_arg(true)
                            .allow_hyphen_values(true)
                            .action(ArgAction::Append),
                    ),
                locale,
            ),
        )
        .subcommand(runner_args(
            Command::new("apply")
                .about(t!("cmd_apply_about", locale = locale).to_string())
                .arg(
                    Arg::new("input")
                        .help(t!("arg_input", locale = locale).to_string())
                        .value_name("FILE")
                        .default_value("-")
                        .action(ArgAction::Set),
                ),
            locale,
        ))
        .subcommand(runner_args(
            Command::new("play")
                .about(t!("cmd_play_about", locale = locale).to_string())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("Tasks.toml")
                        .action(ArgAction::Set),
                )
                .arg(format_arg(locale))
                .arg(verbose_arg(locale)),
            locale,
        ))
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_init_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("Tasks.toml")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn runner_overrides(matches: &ArgMatches) -> commands::RunnerOverrides {
    commands::RunnerOverrides {
        backend: matches.get_one::<String>("backend").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
    }
}

fn output_format(matches: &ArgMatches) -> OutputFormat {
    matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or_default()
}

pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let language = crate::init_locale(explicit_language.as_deref());

    let matches = build_cli(&language).get_matches();

    let code = match matches.subcommand() {
        Some(("exec", exec_matches)) => {
            let args = commands::exec::ExecArgs {
                container: exec_matches
                    .get_one::<String>("container")
                    .cloned()
                    .unwrap_or_default(),
                command: exec_matches
                    .get_many::<String>("command")
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default(),
                chdir: exec_matches.get_one::<String>("chdir").cloned(),
                user: exec_matches.get_one::<String>("user").cloned(),
                overrides: runner_overrides(exec_matches),
                format: output_format(exec_matches),
                verbose: exec_matches.get_flag("verbose"),
            };
            commands::exec::execute(args).await?
        }
        Some(("apply", apply_matches)) => {
            let input = apply_matches
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or("-");
            commands::apply::execute(input, runner_overrides(apply_matches)).await?
        }
        Some(("play", play_matches)) => {
            let config = play_matches
                .get_one::<String>("config")
                .map(String::as_str)
                .unwrap_or("Tasks.toml");
            commands::play::execute(
                expand_path(config)?,
                runner_overrides(play_matches),
                output_format(play_matches),
                play_matches.get_flag("verbose"),
                explicit_language.is_some(),
            )
            .await?
        }
        Some(("init", init_matches)) => {
            let config = init_matches
                .get_one::<String>("config")
                .map(String::as_str)
                .unwrap_or("Tasks.toml");
            commands::init::run_init_wizard(
                &expand_path(config)?,
                &language,
                init_matches.get_flag("non-interactive"),
            )?;
            ExitCode::SUCCESS
        }
        // `subcommand_required` makes clap exit with usage before this point.
        _ => ExitCode::FAILURE,
    };
    Ok(code)
}
