//! # Execution Request Module / 执行请求模块
//!
//! This module defines the validated input of a single container command
//! dispatch: which container to target, what to run, and the optional user
//! and working directory modifiers.
//!
//! 此模块定义单次容器命令分发的已验证输入：
//! 目标容器、要运行的命令，以及可选的用户和工作目录修饰。

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons an `ExecutionRequest` cannot be constructed.
/// 无法构造 `ExecutionRequest` 的原因。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The container identifier was empty or only whitespace.
    /// 容器标识为空或仅包含空白。
    #[error("container name must not be empty")]
    EmptyTarget,
    /// The command produced no tokens.
    /// 命令未产生任何参数。
    #[error("command must not be empty")]
    EmptyCommand,
}

/// The command to run inside the container, in one of two forms.
///
/// A `Line` is split on runs of whitespace before it is handed to the
/// backend, so quoted arguments with embedded spaces cannot be expressed
/// with it. An `Argv` is passed through unchanged.
///
/// 要在容器内运行的命令，有两种形式。
/// `Line` 在交给后端之前按空白拆分，因此无法表达包含空格的引号参数。
/// `Argv` 原样传递。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    /// A single command line, tokenized on whitespace / 单行命令，按空白拆分
    Line(String),
    /// An already tokenized argument list / 已拆分好的参数列表
    Argv(Vec<String>),
}

impl CommandSpec {
    /// Returns the argument tokens handed to the backend after the target.
    /// 返回在目标之后传给后端的参数。
    pub fn tokens(&self) -> Vec<String> {
        match self {
            CommandSpec::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            CommandSpec::Argv(args) => args.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CommandSpec::Line(line) => line.split_whitespace().next().is_none(),
            CommandSpec::Argv(args) => args.is_empty(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Line(line) => f.write_str(line),
            CommandSpec::Argv(args) => {
                let quoted = shlex::try_join(args.iter().map(String::as_str))
                    .unwrap_or_else(|_| args.join(" "));
                f.write_str(&quoted)
            }
        }
    }
}

impl From<&str> for CommandSpec {
    fn from(line: &str) -> Self {
        CommandSpec::Line(line.to_string())
    }
}

impl From<String> for CommandSpec {
    fn from(line: String) -> Self {
        CommandSpec::Line(line)
    }
}

impl From<Vec<String>> for CommandSpec {
    fn from(args: Vec<String>) -> Self {
        CommandSpec::Argv(args)
    }
}

/// The wire shape of a request, using the field names callers know:
/// `container`, `command`, `chdir` and `user`.
/// 请求的外部形态，使用调用方熟悉的字段名。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawRequest {
    pub container: String,
    pub command: CommandSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chdir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A validated request to run one command in one container.
///
/// Fields are private so a request can only be obtained through
/// [`ExecutionRequest::new`] or deserialization, both of which validate.
/// Empty optional values are normalized to `None`.
///
/// 在一个容器中运行一条命令的已验证请求。
/// 字段是私有的，只能通过 `new` 或反序列化获得，两者都会进行验证。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawRequest", into = "RawRequest")]
pub struct ExecutionRequest {
    target: String,
    command: CommandSpec,
    working_directory: Option<String>,
    run_as_user: Option<String>,
}

impl ExecutionRequest {
    pub fn new(
        target: impl Into<String>,
        command: impl Into<CommandSpec>,
    ) -> Result<Self, RequestError> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(RequestError::EmptyTarget);
        }
        let command = command.into();
        if command.is_empty() {
            return Err(RequestError::EmptyCommand);
        }
        Ok(Self {
            target,
            command,
            working_directory: None,
            run_as_user: None,
        })
    }

    /// Sets the working directory inside the container (`docker exec -w`).
    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = non_empty(Some(dir.into()));
        self
    }

    /// Sets the user the command runs as inside the container (`docker exec -u`).
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.run_as_user = non_empty(Some(user.into()));
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    pub fn working_directory(&self) -> Option<&str> {
        self.working_directory.as_deref()
    }

    pub fn run_as_user(&self) -> Option<&str> {
        self.run_as_user.as_deref()
    }
}

impl TryFrom<RawRequest> for ExecutionRequest {
    type Error = RequestError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        let mut request = ExecutionRequest::new(raw.container, raw.command)?;
        request.working_directory = non_empty(raw.chdir);
        request.run_as_user = non_empty(raw.user);
        Ok(request)
    }
}

impl From<ExecutionRequest> for RawRequest {
    fn from(request: ExecutionRequest) -> Self {
        RawRequest {
            container: request.target,
            command: request.command,
            chdir: request.working_directory,
            user: request.run_as_user,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
