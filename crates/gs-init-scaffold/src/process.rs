//! Subprocess execution with line-by-line output streaming

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Split};
use tokio::process::{ChildStderr, ChildStdout, Command};
use tracing::{debug, warn};

/// Resolve `program` on PATH
pub fn ensure_available(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| Error::command_not_found(program))
}

/// Human readable command line for logs and errors
pub fn describe(cmd: &Command) -> String {
    let std_cmd = cmd.as_std();
    std::iter::once(std_cmd.get_program())
        .chain(std_cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command, streaming its stdout and stderr to the console.
///
/// A single reader task drains both pipes and prints every non-blank line.
/// Once the child exits the reader gets `grace` to flush what is left before
/// it is aborted.
///
/// # Errors
/// Returns error if the command cannot be spawned or exits unsuccessfully.
pub async fn run_command(mut cmd: Command, grace: Duration) -> Result<()> {
    let label = describe(&cmd);
    debug!("Running: {}", label);

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            let program = cmd.as_std().get_program().to_string_lossy().into_owned();
            Error::command_not_found(program)
        } else {
            Error::command_failed(&label, e.to_string())
        }
    })?;

    let mut reader = tokio::spawn(drain_output(child.stdout.take(), child.stderr.take()));

    let status = child
        .wait()
        .await
        .map_err(|e| Error::command_failed(&label, e.to_string()))?;

    match tokio::time::timeout(grace, &mut reader).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warn!("Reading output of `{}` failed: {}", label, e),
        Ok(Err(e)) => warn!("Output reader for `{}` stopped: {}", label, e),
        Err(_) => {
            debug!("Output of `{}` still open after {:?}, detaching", label, grace);
            reader.abort();
        }
    }

    if !status.success() {
        return Err(Error::command_failed(label, status.to_string()));
    }

    Ok(())
}

enum Stream {
    Stdout,
    Stderr,
}

async fn drain_output(
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
) -> std::io::Result<()> {
    let mut out = stdout.map(|s| BufReader::new(s).split(b'\n'));
    let mut err = stderr.map(|s| BufReader::new(s).split(b'\n'));

    loop {
        let (stream, segment) = tokio::select! {
            segment = next_segment(&mut out), if out.is_some() => (Stream::Stdout, segment?),
            segment = next_segment(&mut err), if err.is_some() => (Stream::Stderr, segment?),
            else => break,
        };

        match (stream, segment) {
            (Stream::Stdout, None) => out = None,
            (Stream::Stderr, None) => err = None,
            (_, Some(bytes)) => {
                if let Some(line) = printable_line(&bytes) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}

async fn next_segment<R>(lines: &mut Option<Split<R>>) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    match lines {
        Some(lines) => lines.next_segment().await,
        None => Ok(None),
    }
}

/// Decode one raw output line; blank lines yield `None`
fn printable_line(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    let line = String::from_utf8_lossy(bytes);
    if line.trim().is_empty() {
        None
    } else {
        Some(line.into_owned())
    }
}
