//! # Command Runner Module / 命令运行器模块
//!
//! This module turns an `ExecutionRequest` into a `<backend> exec ...`
//! invocation, runs it as a child process under the configured deadline, and
//! folds every way that can end into a single `ExecutionOutcome`.
//!
//! 此模块将 `ExecutionRequest` 转换为 `<backend> exec ...` 调用，
//! 在配置的截止时间内以子进程方式运行，并将所有结束方式归并为单个 `ExecutionOutcome`。
//!
//! ## Invocation Layout / 调用布局
//!
//! ```text
//! <backend> exec [-u <user>] [-w <chdir>] <container> <command tokens...>
//! ```

use std::fmt;

use crate::core::config::RunnerConfig;
use crate::core::outcome::ExecutionOutcome;
use crate::core::request::ExecutionRequest;
use crate::infra::command::{self, Captured};

/// The exact argument vector handed to the operating system.
/// 交给操作系统的完整参数向量。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The backend executable / 后端可执行文件
    pub program: String,
    /// Everything after the program, starting with `exec`.
    /// 程序名之后的所有参数，以 `exec` 开头。
    pub args: Vec<String>,
}

impl Invocation {
    /// The full argument list, program included.
    /// 完整的参数列表，包括程序名。
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let argv = self.argv();
        match shlex::try_join(argv.iter().map(String::as_str)) {
            Ok(line) => f.write_str(&line),
            Err(_) => f.write_str(&argv.join(" ")),
        }
    }
}

/// Dispatches commands into running containers through the backend CLI.
///
/// The runner holds only immutable configuration, so one instance can be
/// cloned or shared across tasks and threads. Each call to [`run`] spawns
/// exactly one child process and owns it until it is reaped.
///
/// 通过后端 CLI 将命令分发到运行中的容器。
/// 运行器只持有不可变配置，因此一个实例可以在任务和线程之间克隆或共享。
///
/// [`run`]: CommandRunner::run
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Assembles the backend invocation for `request` without running it.
    /// 为 `request` 组装后端调用，但不执行。
    pub fn invocation(&self, request: &ExecutionRequest) -> Invocation {
        let mut args = vec!["exec".to_string()];

        if let Some(user) = request.run_as_user() {
            args.push("-u".to_string());
            args.push(user.to_string());
        }
        if let Some(dir) = request.working_directory() {
            args.push("-w".to_string());
            args.push(dir.to_string());
        }

        args.push(request.target().to_string());
        args.extend(request.command().tokens());

        Invocation {
            program: self.config.backend.clone(),
            args,
        }
    }

    /// Runs `request` and returns its outcome.
    ///
    /// This never fails: launch errors and deadline expiry are reported as
    /// outcomes with exit code 1 and a description on stderr.
    ///
    /// 运行 `request` 并返回其结果。
    /// 此函数不会失败：启动错误和超时都以退出码 1 及 stderr 中的描述报告。
    pub async fn run(&self, request: &ExecutionRequest) -> ExecutionOutcome {
        let invocation = self.invocation(request);
        let deadline = self.config.timeout();

        match command::spawn_and_capture(invocation.to_command(), deadline).await {
            Ok(Captured::Finished {
                status,
                stdout,
                stderr,
            }) => ExecutionOutcome::exited(command::exit_code(&status), stdout, stderr),
            Ok(Captured::TimedOut) => ExecutionOutcome::timed_out(deadline),
            Err(e) => ExecutionOutcome::launch_failed(format!(
                "Failed to run '{}': {}",
                invocation.program, e
            )),
        }
    }

    /// Runs `request` on a private current-thread runtime, blocking the
    /// calling thread for at most the configured deadline.
    ///
    /// Must not be called from inside an async context.
    ///
    /// 在私有的单线程运行时上运行 `request`，阻塞调用线程至多截止时间。
    pub fn run_blocking(&self, request: &ExecutionRequest) -> ExecutionOutcome {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.run(request)),
            Err(e) => ExecutionOutcome::launch_failed(format!(
                "Failed to start async runtime: {}",
                e
            )),
        }
    }
}
