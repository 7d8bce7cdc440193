//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system helpers used by the commands:
//! expanding user-supplied paths and reading request or task files.
//!
//! 此模块提供命令使用的文件系统辅助功能：
//! 展开用户提供的路径以及读取请求或任务文件。

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::config::TaskFile;

/// Expands `~` and environment variables in a user-supplied path.
///
/// # Arguments
/// * `raw` - The path as typed on the command line
///
/// # Returns
/// The expanded path, or an error naming the undefined variable
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Reads and validates a task file.
///
/// # Returns
/// The parsed file and its canonical path
pub fn read_task_file(path: &Path) -> Result<(TaskFile, PathBuf)> {
    let canonical = fs::canonicalize(path)
        .with_context(|| format!("Failed to read task file: {}", path.display()))?;
    let content = fs::read_to_string(&canonical)
        .with_context(|| format!("Failed to read task file: {}", canonical.display()))?;
    let task_file = TaskFile::from_toml(&content)
        .with_context(|| format!("Failed to parse task file: {}", canonical.display()))?;
    Ok((task_file, canonical))
}

/// Reads a whole input source; `-` means standard input.
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read request from stdin")?;
        return Ok(content);
    }
    let path = expand_path(source)?;
    fs::read_to_string(&path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))
}
