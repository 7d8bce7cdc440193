// src/commands/play.rs

use anyhow::Result;
use colored::*;
use std::path::Path;
use std::process::ExitCode;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    cli::OutputFormat,
    commands::RunnerOverrides,
    core::{
        play::{PlayOptions, run_play, was_interrupted},
        runner::CommandRunner,
    },
    infra::{fs::read_task_file, t},
    reporting::{print_failure_details, print_json, print_summary},
};

/// Runs every task of the task file at `config`.
///
/// `explicit_language` is true when `--lang` was given; otherwise the task
/// file's `language` picks the message locale.
pub async fn execute(
    config: impl AsRef<Path>,
    overrides: RunnerOverrides,
    format: OutputFormat,
    verbose: bool,
    explicit_language: bool,
) -> Result<ExitCode> {
    let (task_file, config_path) = read_task_file(config.as_ref())?;
    if !explicit_language {
        crate::init_locale(Some(&task_file.language));
    }
    let quiet = format == OutputFormat::Json;

    let runner_config = overrides.apply(task_file.runner.clone())?;
    let runner = CommandRunner::new(runner_config);

    if !quiet {
        println!(
            "{}",
            t!("play.loading_tasks", path = config_path.display())
        );
        println!(
            "{}",
            t!(
                "play.runner_settings",
                backend = runner.config().backend.yellow(),
                timeout = runner.config().timeout_secs
            )
            .cyan()
        );
    }

    if task_file.tasks.is_empty() {
        if quiet {
            print_json(&task_file.tasks)?;
        } else {
            println!("{}", t!("play.no_tasks").green());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let stop_token = setup_signal_handler(quiet);
    let results = run_play(
        &runner,
        &task_file.tasks,
        &stop_token,
        PlayOptions { quiet, verbose },
    )
    .await;

    let has_failures = results.iter().any(|r| r.is_failure());
    let interrupted = was_interrupted(&results);

    if quiet {
        print_json(&results)?;
    } else {
        print_summary(&results);
        if has_failures {
            print_failure_details(&results);
            println!("\n{}", t!("play.failed").red().bold());
        } else if interrupted {
            println!("\n{}", t!("play.interrupted").yellow().bold());
        } else {
            println!("\n{}", t!("play.succeeded").green().bold());
        }
    }

    if has_failures || interrupted {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn setup_signal_handler(quiet: bool) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            if !quiet {
                println!("\n{}", t!("play.shutdown_signal").yellow());
            }
            token_clone.cancel();
        }
    });

    token
}
