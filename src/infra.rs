//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Container Command,
//! including child process capture, file system helpers, and i18n support.
//!
//! 此模块为 Container Command 提供基础设施服务，
//! 包括子进程输出捕获、文件系统辅助功能和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
