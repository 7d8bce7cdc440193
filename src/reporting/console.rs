//! # Console Reporting Module / 控制台报告模块
//!
//! Prints colorful, localized summaries of single dispatches and of whole
//! plays to the console.
//!
//! 在控制台打印单次分发和整个流程的彩色本地化摘要。

use colored::*;

use crate::core::play::{TaskResult, TaskStatus};
use crate::core::report::ExecutionReport;
use crate::infra::t;

/// Prints the report of a single `exec` dispatch.
///
/// Captured stdout goes to stdout and captured stderr to stderr, unchanged,
/// so the wrapper can be used in pipelines. The status line goes to stderr.
///
/// 打印单次 `exec` 分发的报告。
/// 捕获的 stdout 原样写到 stdout，捕获的 stderr 原样写到 stderr。
pub fn print_exec_report(report: &ExecutionReport) {
    if !report.stdout.is_empty() {
        print!("{}", report.stdout);
    }
    if !report.stderr.is_empty() {
        eprint!("{}", report.stderr);
    }
    match &report.msg {
        Some(msg) => eprintln!("{}", msg.red()),
        None => eprintln!("{}", t!("exec.succeeded").green()),
    }
}

/// Prints a table of every task with its status, return code and duration.
///
/// # Output Format / 输出格式
/// ```text
/// --- Play Summary ---
///   - OK        | install dependencies                     | rc=0     1.23s
///   - Failed    | run migrations                           | rc=2     0.45s
///   - Skipped   | warm cache                               |           N/A
/// ```
pub fn print_summary(results: &[TaskResult]) {
    println!("\n{}", t!("summary.banner").bold());

    for result in results {
        let status = status_label(result.status);
        let status = match result.status {
            TaskStatus::Ok => status.green(),
            TaskStatus::Failed => status.red(),
            TaskStatus::Ignored => status.yellow(),
            TaskStatus::Skipped => status.dimmed(),
        };
        let rc = result
            .report
            .as_ref()
            .map(|r| format!("rc={}", r.rc))
            .unwrap_or_default();
        let duration = result
            .duration
            .map(|d| format!("{:.2?}", d))
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "  - {:<10} | {:<40} | {:<7} {:>8}",
            status, result.name, rc, duration
        );
    }
}

/// Prints the captured output of every failed task so the cause is visible
/// without re-running anything.
/// 打印每个失败任务的捕获输出。
pub fn print_failure_details(results: &[TaskResult]) {
    let failures: Vec<_> = results.iter().filter(|r| r.is_failure()).collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("summary.failure_banner").red().bold());
    for result in failures {
        let Some(report) = &result.report else {
            continue;
        };
        println!(
            "\n{}",
            t!("summary.failure_header", name = &result.name).red()
        );
        if let Some(msg) = &report.msg {
            println!("  {}", msg);
        }
        println!("  {} {}", t!("summary.command_label").dimmed(), report.cmd);
        if !report.stdout.trim().is_empty() {
            println!("  {}", t!("summary.stdout_label").dimmed());
            println!("{}", indent(report.stdout.trim_end()));
        }
        if !report.stderr.trim().is_empty() {
            println!("  {}", t!("summary.stderr_label").dimmed());
            println!("{}", indent(report.stderr.trim_end()));
        }
    }
}

fn status_label(status: TaskStatus) -> String {
    match status {
        TaskStatus::Ok => t!("summary.status_ok"),
        TaskStatus::Failed => t!("summary.status_failed"),
        TaskStatus::Ignored => t!("summary.status_ignored"),
        TaskStatus::Skipped => t!("summary.status_skipped"),
    }
    .to_string()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
