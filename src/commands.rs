//! # Commands Module / 命令模块
//!
//! One submodule per CLI subcommand.
//!
//! 每个 CLI 子命令对应一个子模块。

pub mod apply;
pub mod exec;
pub mod init;
pub mod play;

use crate::core::config::RunnerConfig;

/// Runner settings given on the command line; they win over file values.
/// 命令行上给出的运行器设置，优先于文件中的值。
#[derive(Debug, Clone, Default)]
pub struct RunnerOverrides {
    pub backend: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RunnerOverrides {
    pub fn apply(self, config: RunnerConfig) -> anyhow::Result<RunnerConfig> {
        let config = config.with_overrides(self.backend, self.timeout_secs);
        config.validate()?;
        Ok(config)
    }
}

/// Maps a report's return code to the wrapper's own process exit code.
///
/// Zero stays zero. Codes in `1..=255` pass through; anything else
/// (signals reported as negative codes, out-of-range values) becomes `1`.
///
/// 将报告的返回码映射为包装器自身的进程退出码。
pub fn process_exit_code(rc: i32) -> u8 {
    match u8::try_from(rc) {
        Ok(code) => code,
        Err(_) => 1,
    }
}
