//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Container Command:
//! requests and outcomes, runner configuration, the command runner itself,
//! the caller-side report mapping, and sequential task plays.
//!
//! 此模块包含 Container Command 的核心功能：
//! 请求与结果、运行器配置、命令运行器本身、调用方报告映射以及顺序任务流程。

pub mod config;
pub mod outcome;
pub mod play;
pub mod report;
pub mod request;
pub mod runner;

// Re-exports
pub use outcome::{ExecutionOutcome, Failure, Termination};
pub use report::ExecutionReport;
pub use request::{CommandSpec, ExecutionRequest, RequestError};
pub use runner::{CommandRunner, Invocation};
