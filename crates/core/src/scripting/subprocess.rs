//! Shared subprocess management utilities.
//!
//! [`run_command`] spawns a prepared [`tokio::process::Command`], captures
//! stdout/stderr in full, and enforces a wall-clock timeout. Both the
//! initialization script runner and the connectivity probe go through here.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{RunError, ScriptOutcome};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Output exceeding this limit is truncated.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Spawn `cmd` with extra environment entries, capture its output, and kill
/// it if it outlives `timeout`.
///
/// The caller sets the program and arguments. Stdin is closed.
pub async fn run_command(
    cmd: &mut Command,
    env_vars: &[(String, String)],
    timeout: Duration,
) -> Result<ScriptOutcome, RunError> {
    // `kill_on_drop(true)` ensures the child is killed when dropped (e.g. on timeout).
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(RunError::Launch)?;

    // Read both pipes in spawned tasks so `child.wait()` can borrow `&mut child`.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    let stdout_abort = stdout_task.abort_handle();
    let stderr_abort = stderr_task.abort_handle();

    // One deadline covers the exit and both pipes: a background process that
    // inherited stdout/stderr keeps them open after the script itself exits.
    let collected = tokio::time::timeout(timeout, async {
        let status = child.wait().await?;
        let stdout_bytes = stdout_task.await.unwrap_or_default();
        let stderr_bytes = stderr_task.await.unwrap_or_default();
        Ok::<_, std::io::Error>((status, stdout_bytes, stderr_bytes))
    })
    .await;

    match collected {
        Ok(Ok((status, stdout_bytes, stderr_bytes))) => Ok(ScriptOutcome {
            stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
            exit_code: status.code().unwrap_or(-1),
            duration_ms: start.elapsed().as_millis() as u64,
        }),
        Ok(Err(e)) => {
            stdout_abort.abort();
            stderr_abort.abort();
            Err(RunError::Launch(e))
        }
        Err(_elapsed) => {
            stdout_abort.abort();
            stderr_abort.abort();
            // Also killed on drop; this covers the case where it already exited.
            let _ = child.start_kill();
            Err(RunError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
