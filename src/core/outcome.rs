//! # Execution Outcome Module / 执行结果模块
//!
//! This module defines the normalized result of a single command dispatch.
//! Every request produces exactly one `ExecutionOutcome`, regardless of
//! whether the command exited, timed out, or could not be launched.
//!
//! 此模块定义单次命令分发的标准化结果。
//! 无论命令正常退出、超时还是无法启动，每个请求都恰好产生一个 `ExecutionOutcome`。

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exit code reported for failures that happen inside the runner itself.
/// 运行器内部失败时报告的退出码。
pub const INTERNAL_FAILURE_CODE: i32 = 1;

/// How the child process reached the `Completed` state.
/// 子进程到达完成状态的方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The process ran and exited on its own (with any code).
    /// 进程运行并自行退出（任意退出码）。
    Exited,
    /// The deadline expired and the process was killed.
    /// 超过截止时间，进程被终止。
    TimedOut,
    /// The process could not be started.
    /// 进程无法启动。
    LaunchFailed,
}

/// The closed set of ways a dispatch can fail.
/// 分发失败的封闭类型集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The backend could not be launched.
    Launch { message: String },
    /// The command exceeded its deadline and was killed.
    Timeout { limit: Duration },
    /// The command ran to completion with a non-zero exit code.
    NonZeroExit { code: i32 },
}

/// The three-field result of a dispatch, plus how it terminated.
///
/// `stdout` and `stderr` are always set; on internal failures `stdout` is
/// empty and `stderr` carries the description.
///
/// 分发的三字段结果，外加终止方式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub termination: Termination,
    /// The deadline that expired; only set for timed out outcomes.
    /// 已超过的截止时间；仅在超时结果中设置。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Duration>,
}

impl ExecutionOutcome {
    pub fn exited(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            termination: Termination::Exited,
            deadline: None,
        }
    }

    /// The outcome of a command killed at its deadline. Any output captured
    /// before the kill is dropped.
    pub fn timed_out(limit: Duration) -> Self {
        Self {
            exit_code: INTERNAL_FAILURE_CODE,
            stdout: String::new(),
            stderr: timeout_message(limit),
            termination: Termination::TimedOut,
            deadline: Some(limit),
        }
    }

    pub fn launch_failed(message: impl Into<String>) -> Self {
        Self {
            exit_code: INTERNAL_FAILURE_CODE,
            stdout: String::new(),
            stderr: message.into(),
            termination: Termination::LaunchFailed,
            deadline: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Classifies the outcome into the failure taxonomy, or `None` on success.
    /// 将结果归类到失败类型中；成功时返回 `None`。
    pub fn failure(&self) -> Option<Failure> {
        match self.termination {
            Termination::LaunchFailed => Some(Failure::Launch {
                message: self.stderr.clone(),
            }),
            Termination::TimedOut => Some(Failure::Timeout {
                limit: self.deadline.unwrap_or_default(),
            }),
            Termination::Exited if self.exit_code != 0 => Some(Failure::NonZeroExit {
                code: self.exit_code,
            }),
            Termination::Exited => None,
        }
    }
}

/// Renders the fixed timeout message, e.g. "Command timed out after 5 minutes".
/// 生成固定的超时消息。
pub fn timeout_message(limit: Duration) -> String {
    format!("Command timed out after {}", humanize(limit))
}

fn humanize(limit: Duration) -> String {
    let secs = limit.as_secs();
    let (value, unit) = if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deadline_renders_five_minutes() {
        assert_eq!(
            timeout_message(Duration::from_secs(300)),
            "Command timed out after 5 minutes"
        );
    }

    #[test]
    fn odd_deadlines_render_in_seconds() {
        assert_eq!(timeout_message(Duration::from_secs(1)), "Command timed out after 1 second");
        assert_eq!(timeout_message(Duration::from_secs(90)), "Command timed out after 90 seconds");
        assert_eq!(timeout_message(Duration::from_secs(60)), "Command timed out after 1 minute");
    }

    #[test]
    fn timeout_outcome_is_fully_populated() {
        let outcome = ExecutionOutcome::timed_out(Duration::from_secs(300));
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.stdout, "");
        assert_eq!(outcome.stderr, "Command timed out after 5 minutes");
        assert_eq!(
            outcome.failure(),
            Some(Failure::Timeout {
                limit: Duration::from_secs(300)
            })
        );
    }
}
