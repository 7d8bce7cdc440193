// src/commands/apply.rs

use anyhow::{Context, Result};
use std::process::ExitCode;

use crate::{
    commands::RunnerOverrides,
    core::{
        config::RunnerConfig, report::ExecutionReport, request::ExecutionRequest,
        runner::CommandRunner,
    },
    infra::fs::read_input,
    reporting::print_json,
};

/// Parses one JSON request (`container`, `command`, `chdir`, `user`).
pub fn parse_request(content: &str) -> Result<ExecutionRequest> {
    serde_json::from_str(content).context("Invalid request")
}

/// Runs the request read from `input` (a path, or `-` for stdin) and prints
/// the JSON report. Exits 0 when the command succeeded and 1 otherwise.
pub async fn execute(input: &str, overrides: RunnerOverrides) -> Result<ExitCode> {
    let request = parse_request(&read_input(input)?)?;
    let runner = CommandRunner::new(overrides.apply(RunnerConfig::default())?);

    let outcome = runner.run(&request).await;
    let report = ExecutionReport::from_outcome(&outcome, request.command());
    print_json(&report)?;

    if report.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
