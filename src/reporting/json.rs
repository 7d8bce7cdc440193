use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Writes `value` as pretty JSON followed by a newline to stdout.
/// 将 `value` 以格式化 JSON 写入 stdout。
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("Failed to serialize report")?;
    writeln!(writer).context("Failed to write report")?;
    Ok(())
}
