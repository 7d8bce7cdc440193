//! # Container Command Library / Container Command 库
//!
//! This library runs commands inside running containers through a container
//! runtime's exec facility (`docker exec` by default), with a bounded
//! deadline, and reports the result as a fixed structured record.
//!
//! 此库通过容器运行时的 exec 功能（默认 `docker exec`）在运行中的容器内执行命令，
//! 带有截止时间，并以固定的结构化记录报告结果。
//!
//! ## Modules / 模块
//!
//! - `core` - Requests, outcomes, the command runner and task plays
//! - `infra` - Child process capture, file system helpers and i18n
//! - `reporting` - Console and JSON reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 请求、结果、命令运行器和任务流程
//! - `infra` - 子进程捕获、文件系统辅助和国际化
//! - `reporting` - 控制台和 JSON 报告
//! - `cli` - 命令行接口和命令
//!
//! ## Example / 示例
//!
//! ```no_run
//! use container_command::{CommandRunner, ExecutionRequest};
//!
//! # async fn demo() -> Result<(), container_command::RequestError> {
//! let request = ExecutionRequest::new("myshop-test", "composer install --no-dev")?
//!     .with_working_directory("/var/www/myshop/current");
//! let outcome = CommandRunner::default().run(&request).await;
//! println!("rc={} stdout={}", outcome.exit_code, outcome.stdout);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config::{RunnerConfig, TaskFile};
pub use core::{
    CommandRunner, CommandSpec, ExecutionOutcome, ExecutionReport, ExecutionRequest, Failure,
    Invocation, RequestError, Termination,
};

/// Picks and activates the language for console messages.
///
/// An explicit `preferred` locale wins; otherwise the system locale is
/// detected. The full locale (e.g. "zh-CN") is tried first, then the
/// language part (e.g. "en" from "en-US"), then the default "en".
///
/// 选择并激活控制台消息的语言。
/// 显式指定的语言优先，否则检测系统语言。
pub fn init_locale(preferred: Option<&str>) -> String {
    let locale = preferred
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let lang = resolve_locale(&locale);
    rust_i18n::set_locale(&lang);
    lang
}

/// Maps a requested locale onto one of the bundled translations.
/// 将请求的语言映射到内置翻译之一。
pub fn resolve_locale(locale: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale) {
        return locale.to_string();
    }
    locale
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales.iter().find(|available| {
                available
                    .split('-')
                    .next()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(lang_code))
            })
        })
        .map(|lang| lang.to_string())
        .unwrap_or_else(|| "en".to_string())
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
