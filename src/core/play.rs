//! # Task Play Module / 任务执行模块
//!
//! Runs the tasks of a task file one after another. The first failure of a
//! task without `ignore_errors` halts the play, and every remaining task is
//! reported as skipped. Nothing is retried.
//!
//! 依次运行任务文件中的任务。第一个未设置 `ignore_errors` 的任务失败后，
//! 流程停止，剩余任务都报告为跳过。不进行任何重试。

use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::Task,
        outcome::ExecutionOutcome,
        report::ExecutionReport,
        runner::CommandRunner,
    },
    infra::t,
};

/// How a task ended / 任务的结束状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Ok,
    Failed,
    /// Failed, but the task has `ignore_errors` set.
    /// 失败，但任务设置了 `ignore_errors`。
    Ignored,
    /// Never started because an earlier task failed or the play was interrupted.
    /// 由于之前的任务失败或流程被中断而未开始。
    Skipped,
}

/// The result of one task of a play.
/// 流程中单个任务的结果。
#[derive(Debug, Clone, Serialize)]
pub struct TaskResult {
    pub name: String,
    pub status: TaskStatus,
    /// `None` for skipped tasks / 跳过的任务为 `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ExecutionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "duration_secs")]
    pub duration: Option<Duration>,
    /// Skipped because the play was stopped, not because a task failed.
    /// 因流程被中断而跳过，而不是因为任务失败。
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub interrupted: bool,
}

impl TaskResult {
    fn skipped(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            status: TaskStatus::Skipped,
            report: None,
            started_at: None,
            duration: None,
            interrupted: false,
        }
    }

    fn interrupted(task: &Task) -> Self {
        Self {
            interrupted: true,
            ..Self::skipped(task)
        }
    }

    fn completed(
        task: &Task,
        outcome: &ExecutionOutcome,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        let report = ExecutionReport::from_outcome(outcome, task.request.command());
        let status = match (report.is_failure(), task.ignore_errors) {
            (false, _) => TaskStatus::Ok,
            (true, true) => TaskStatus::Ignored,
            (true, false) => TaskStatus::Failed,
        };
        Self {
            name: task.name.clone(),
            status,
            report: Some(report),
            started_at: Some(started_at),
            duration: Some(duration),
            interrupted: false,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == TaskStatus::Failed
    }
}

/// True when the stop signal kept at least one task from running. A signal
/// that arrives while the last task runs leaves the play complete.
/// 当停止信号使至少一个任务未能运行时返回 true。
pub fn was_interrupted(results: &[TaskResult]) -> bool {
    results.iter().any(|r| r.interrupted)
}

/// Options controlling console output during a play.
/// 控制流程中控制台输出的选项。
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Suppress progress lines (used when stdout carries JSON).
    /// 不输出进度行（在 stdout 输出 JSON 时使用）。
    pub quiet: bool,
    /// Echo each backend invocation before running it.
    /// 在运行前回显每个后端调用。
    pub verbose: bool,
}

/// Runs `tasks` in order and returns one result per task, in the same order.
///
/// `stop` is checked before each task starts; a task already running is
/// never interrupted.
///
/// 按顺序运行 `tasks`，并按相同顺序为每个任务返回一个结果。
/// 每个任务开始前检查 `stop`；已经在运行的任务不会被中断。
pub async fn run_play(
    runner: &CommandRunner,
    tasks: &[Task],
    stop: &CancellationToken,
    options: PlayOptions,
) -> Vec<TaskResult> {
    let mut results = Vec::with_capacity(tasks.len());
    let mut halted = false;

    for task in tasks {
        if halted {
            results.push(TaskResult::skipped(task));
            continue;
        }
        if stop.is_cancelled() {
            results.push(TaskResult::interrupted(task));
            continue;
        }

        if !options.quiet {
            println!("{}", t!("play.task_start", name = &task.name).blue());
            if options.verbose {
                let invocation = runner.invocation(&task.request);
                println!("  {} {}", t!("play.command_prefix").dimmed(), invocation);
            }
        }

        let started_at = Utc::now();
        let start = Instant::now();
        let outcome = runner.run(&task.request).await;
        let result = TaskResult::completed(task, &outcome, started_at, start.elapsed());

        if !options.quiet {
            print_task_line(&result);
        }

        if result.is_failure() {
            halted = true;
        }
        results.push(result);
    }

    results
}

fn print_task_line(result: &TaskResult) {
    let secs = result.duration.unwrap_or_default().as_secs_f64();
    let duration = format!("{secs:.2}");
    let rc = result.report.as_ref().map(|r| r.rc).unwrap_or_default();
    match result.status {
        TaskStatus::Ok => println!(
            "{}",
            t!("play.task_ok", name = &result.name, duration = &duration).green()
        ),
        TaskStatus::Ignored => println!(
            "{}",
            t!("play.task_ignored", name = &result.name, rc = rc).yellow()
        ),
        TaskStatus::Failed => println!(
            "{}",
            t!("play.task_failed", name = &result.name, rc = rc, duration = &duration).red()
        ),
        TaskStatus::Skipped => {}
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_f64(d.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }
}
