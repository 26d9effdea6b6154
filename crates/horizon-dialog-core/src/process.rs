//! Deadline-bound subprocess execution.

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use wait_timeout::ChildExt;

use crate::deadline::Deadline;
use crate::error::{DialogError, Result};
use crate::logging::targets;

/// Captured output of a finished dialog process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout as text.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stderr as trimmed text.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Turn an unexpected exit into an error.
    pub fn failure(&self, program: &str) -> DialogError {
        DialogError::process_failed(program, self.code, self.stderr_text())
    }
}

/// Run `command` to completion, feeding `input` on stdin.
///
/// With a bounded deadline the child is killed once the deadline passes and
/// the call returns [`DialogError::Timeout`]. After the child exits the
/// deadline is checked again so a late expiry is never reported as a
/// regular exit.
pub fn run_with_deadline(
    command: &mut Command,
    input: Option<&[u8]>,
    deadline: &Deadline,
) -> Result<ProcessOutput> {
    deadline.check()?;

    let program = command.get_program().to_string_lossy().into_owned();
    command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::debug!(
        target: targets::PROCESS,
        %program,
        args = ?command.get_args().collect::<Vec<_>>(),
        timeout = ?deadline.limit(),
        "spawning dialog process"
    );

    let mut child = command
        .spawn()
        .map_err(|err| DialogError::launch(&program, err))?;

    let writer = match (input, child.stdin.take()) {
        (Some(data), Some(mut stdin)) => {
            let data = data.to_vec();
            Some(thread::spawn(move || stdin.write_all(&data)))
        }
        _ => None,
    };
    let stdout = spawn_reader(child.stdout.take());
    let stderr = spawn_reader(child.stderr.take());

    let status = match deadline.remaining() {
        None => child.wait()?,
        Some(left) => match child.wait_timeout(left)? {
            Some(status) => status,
            None => {
                tracing::debug!(target: targets::PROCESS, %program, "deadline elapsed, killing dialog process");
                let _ = child.kill();
                let _ = child.wait();
                // Grandchildren may still hold the pipes; the readers are left detached.
                return Err(deadline.timeout_error());
            }
        },
    };

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Err(err)) if err.kind() != io::ErrorKind::BrokenPipe => return Err(err.into()),
            _ => {}
        }
    }

    let output = ProcessOutput {
        code: status.code(),
        stdout: join_reader(stdout)?,
        stderr: join_reader(stderr)?,
    };

    tracing::trace!(target: targets::PROCESS, %program, code = ?output.code, "dialog process exited");
    deadline.resolve(Ok(output))
}

type Reader = Option<JoinHandle<io::Result<Vec<u8>>>>;

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_reader(reader: Reader) -> Result<Vec<u8>> {
    match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| DialogError::output("output reader panicked"))?
            .map_err(DialogError::from),
        None => Ok(Vec::new()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn test_captures_output_and_code() {
        let out = run_with_deadline(&mut sh("echo hello; echo oops >&2; exit 3"), None, &Deadline::none())
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout_text(), "hello\n");
        assert_eq!(out.stderr_text(), "oops");
        assert!(!out.success());
    }

    #[test]
    fn test_feeds_stdin() {
        let out = run_with_deadline(&mut sh("cat"), Some(b"script body"), &Deadline::none()).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, b"script body");
    }

    #[test]
    fn test_deadline_kills_child() {
        let start = Instant::now();
        let deadline = Deadline::after(Duration::from_millis(200));
        let err = run_with_deadline(&mut sh("exec sleep 10"), None, &deadline).unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let mut cmd = Command::new("horizon-dialog-definitely-missing");
        let err = run_with_deadline(&mut cmd, None, &Deadline::none()).unwrap_err();
        assert!(matches!(err, DialogError::Launch { .. }));
    }

    #[test]
    fn test_elapsed_deadline_never_spawns() {
        let err = run_with_deadline(&mut sh("exit 0"), None, &Deadline::after(Duration::ZERO))
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
