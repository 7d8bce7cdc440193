use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::core::request::{CommandSpec, ExecutionRequest, RawRequest, RequestError};

/// Default container runtime CLI used as the backend.
/// 默认作为后端使用的容器运行时 CLI。
pub const DEFAULT_BACKEND: &str = "docker";

/// Default deadline for a single command, in seconds.
/// 单条命令的默认截止时间（秒）。
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Settings shared by every dispatch made through one `CommandRunner`.
/// 通过同一个 `CommandRunner` 进行的所有分发共享的设置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// The executable invoked as `<backend> exec ...`, resolved on `PATH`.
    /// 以 `<backend> exec ...` 形式调用的可执行文件，在 `PATH` 中查找。
    pub backend: String,
    /// Wall-clock ceiling for one command. The command is killed when it
    /// runs longer than this.
    /// 单条命令的墙钟时间上限。超过后命令将被终止。
    pub timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RunnerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Applies command-line overrides on top of file or default values.
    /// 在文件值或默认值之上应用命令行覆盖。
    pub fn with_overrides(mut self, backend: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(backend) = backend {
            self.backend = backend;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend.trim().is_empty() {
            bail!("runner backend must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("runner timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

/// A single named step of a task file.
/// 任务文件中的单个命名步骤。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(try_from = "RawTask", into = "RawTask")]
pub struct Task {
    /// The unique name of the task, used in progress output and summaries.
    /// 任务的唯一名称，用于进度输出和摘要。
    pub name: String,
    /// What to run and where / 运行什么以及在哪里运行
    pub request: ExecutionRequest,
    /// If `true`, a failure of this task is reported but does not stop the play.
    /// 如果为 `true`，该任务的失败会被报告，但不会中止整个流程。
    pub ignore_errors: bool,
}

/// The on-disk shape of a task. Unknown keys are rejected so a misspelled
/// `user` or `chdir` cannot silently drop its modifier.
/// 任务在文件中的形态。未知键会被拒绝。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawTask {
    pub name: String,
    pub container: String,
    pub command: CommandSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chdir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default)]
    pub ignore_errors: bool,
}

impl TryFrom<RawTask> for Task {
    type Error = RequestError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let request = ExecutionRequest::try_from(RawRequest {
            container: raw.container,
            command: raw.command,
            chdir: raw.chdir,
            user: raw.user,
        })?;
        Ok(Task {
            name: raw.name,
            request,
            ignore_errors: raw.ignore_errors,
        })
    }
}

impl From<Task> for RawTask {
    fn from(task: Task) -> Self {
        let RawRequest {
            container,
            command,
            chdir,
            user,
        } = RawRequest::from(task.request);
        RawTask {
            name: task.name,
            container,
            command,
            chdir,
            user,
            ignore_errors: task.ignore_errors,
        }
    }
}

/// The contents of a task file (`Tasks.toml`).
/// 任务文件（`Tasks.toml`）的内容。
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// The language for progress messages (e.g., "en", "zh-CN").
    /// 进度消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// Runner settings; every field falls back to its default.
    /// 运行器设置；每个字段都有默认值。
    #[serde(default)]
    pub runner: RunnerConfig,

    /// The tasks, run in file order.
    /// 按文件顺序运行的任务。
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskFile {
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: TaskFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<()> {
        self.runner.validate()?;
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if task.name.trim().is_empty() {
                bail!("task names must not be empty");
            }
            if !seen.insert(task.name.as_str()) {
                bail!("duplicate task name: {}", task.name);
            }
        }
        Ok(())
    }
}

fn default_language() -> String {
    "en".to_string()
}
