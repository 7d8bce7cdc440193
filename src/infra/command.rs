//! # Child Process Module / 子进程模块
//!
//! Spawns a child process with piped stdout and stderr, reads both streams
//! concurrently into separate buffers, and waits for the process under a
//! deadline. The child is always reaped before this module returns.
//!
//! 以管道方式派生子进程，并发地将 stdout 和 stderr 读取到独立的缓冲区，
//! 并在截止时间内等待进程结束。返回前子进程总会被回收。

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// What happened to a spawned child.
/// 已派生子进程的结果。
#[derive(Debug)]
pub enum Captured {
    /// The child exited before the deadline.
    /// 子进程在截止时间前退出。
    Finished {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    /// The deadline expired; the child was killed and reaped and its
    /// partial output discarded.
    /// 超过截止时间；子进程已被终止并回收，部分输出被丢弃。
    TimedOut,
}

/// Spawns `cmd` and captures its stdout and stderr independently.
///
/// Stdin is closed. Errors are only returned when the process cannot be
/// spawned or waited on; a non-zero exit is a `Captured::Finished`.
///
/// 派生 `cmd` 并分别捕获其 stdout 和 stderr。
/// 仅在进程无法派生或等待时返回错误；非零退出属于 `Captured::Finished`。
pub async fn spawn_and_capture(mut cmd: Command, deadline: Duration) -> io::Result<Captured> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("failed to capture stderr"))?;

    // Both pipes must be drained while waiting, or a chatty child blocks on a full pipe.
    let mut stdout_handle = read_to_string(stdout);
    let mut stderr_handle = read_to_string(stderr);

    // The deadline covers draining the pipes too: a grandchild holding them
    // open keeps the readers alive after the child itself has exited.
    let finished = tokio::time::timeout(deadline, async {
        let status = child.wait().await?;
        let stdout = (&mut stdout_handle).await.unwrap_or_default();
        let stderr = (&mut stderr_handle).await.unwrap_or_default();
        Ok::<_, io::Error>((status, stdout, stderr))
    })
    .await;

    match finished {
        Ok(Ok((status, stdout, stderr))) => Ok(Captured::Finished {
            status,
            stdout,
            stderr,
        }),
        Ok(Err(e)) => {
            stdout_handle.abort();
            stderr_handle.abort();
            Err(e)
        }
        Err(_) => {
            stdout_handle.abort();
            stderr_handle.abort();
            // `kill` also waits, so the child is reaped here. An already
            // reaped child reports `InvalidInput`.
            match child.kill().await {
                Err(e) if e.kind() != io::ErrorKind::InvalidInput => Err(e),
                _ => Ok(Captured::TimedOut),
            }
        }
    }
}

fn read_to_string<R>(mut reader: R) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        // A read error mid-stream keeps what was read so far.
        let _ = reader.read_to_end(&mut buf).await;
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Maps an exit status to the integer code reported to callers.
///
/// On Unix a process killed by signal `N` reports `-N`; otherwise a missing
/// code is reported as `1`.
///
/// 将退出状态映射为报告给调用方的整数代码。
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    1
}
