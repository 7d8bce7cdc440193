// src/commands/exec.rs

use anyhow::Result;
use colored::*;
use std::process::ExitCode;

use crate::{
    cli::OutputFormat,
    commands::{RunnerOverrides, process_exit_code},
    core::{
        config::RunnerConfig,
        report::ExecutionReport,
        request::{CommandSpec, ExecutionRequest},
        runner::CommandRunner,
    },
    infra::t,
    reporting::{print_exec_report, print_json},
};

/// Arguments of the `exec` subcommand.
#[derive(Debug, Clone)]
pub struct ExecArgs {
    pub container: String,
    /// The words after the container name. A single word is the string
    /// form and is split on whitespace; several words are passed as-is.
    pub command: Vec<String>,
    pub chdir: Option<String>,
    pub user: Option<String>,
    pub overrides: RunnerOverrides,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl ExecArgs {
    pub fn command_spec(&self) -> CommandSpec {
        match self.command.as_slice() {
            [line] => CommandSpec::Line(line.clone()),
            words => CommandSpec::Argv(words.to_vec()),
        }
    }

    pub fn to_request(&self) -> Result<ExecutionRequest> {
        let mut request = ExecutionRequest::new(self.container.clone(), self.command_spec())?;
        if let Some(dir) = &self.chdir {
            request = request.with_working_directory(dir.clone());
        }
        if let Some(user) = &self.user {
            request = request.with_user(user.clone());
        }
        Ok(request)
    }
}

pub async fn execute(args: ExecArgs) -> Result<ExitCode> {
    let request = args.to_request()?;
    let config = args.overrides.clone().apply(RunnerConfig::default())?;
    let runner = CommandRunner::new(config);

    if args.verbose && args.format == OutputFormat::Text {
        eprintln!(
            "{} {}",
            t!("exec.command_prefix").blue(),
            runner.invocation(&request)
        );
    }

    let outcome = runner.run(&request).await;
    let report = ExecutionReport::from_outcome(&outcome, request.command());

    match args.format {
        OutputFormat::Text => print_exec_report(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(ExitCode::from(process_exit_code(report.rc)))
}
