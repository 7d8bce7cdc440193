//! # Execution Report Module / 执行报告模块
//!
//! Maps an `ExecutionOutcome` to the record handed back to callers:
//! `changed` on success, `failed` plus a message naming the return code
//! otherwise. The original command is echoed back in the form it was given.
//!
//! 将 `ExecutionOutcome` 映射为返回给调用方的记录：
//! 成功时为 `changed`，否则为 `failed` 并附带包含返回码的消息。

use serde::{Deserialize, Serialize};

use crate::core::outcome::ExecutionOutcome;
use crate::core::request::CommandSpec;

/// The structured success/failure record for one dispatch.
/// 单次分发的结构化成功/失败记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub changed: bool,
    pub failed: bool,
    /// Only present on failure / 仅在失败时出现
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    pub stdout: String,
    pub stderr: String,
    pub rc: i32,
    pub cmd: CommandSpec,
}

impl ExecutionReport {
    pub fn from_outcome(outcome: &ExecutionOutcome, cmd: &CommandSpec) -> Self {
        let succeeded = outcome.is_success();
        Self {
            changed: succeeded,
            failed: !succeeded,
            msg: (!succeeded).then(|| failure_message(outcome.exit_code)),
            stdout: outcome.stdout.clone(),
            stderr: outcome.stderr.clone(),
            rc: outcome.exit_code,
            cmd: cmd.clone(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failed
    }
}

/// The human-readable failure message, e.g. "Command failed with return code 2".
pub fn failure_message(rc: i32) -> String {
    format!("Command failed with return code {rc}")
}
