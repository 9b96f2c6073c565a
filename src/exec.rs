//! Child process execution for dcos-net-setup.
//!
//! Every wrapped command goes through [`run`], which echoes the command line
//! before and after execution and forwards any captured stderr. The actual
//! spawning sits behind [`CommandRunner`] so dispatch logic can be driven by
//! a scripted runner in tests.

use crate::error::{Result, SetupError};
use crate::exit_codes;
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

/// Which output stream of the child is piped back to the caller.
///
/// Streams that are not captured are inherited from this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Both streams inherited.
    None,
    /// Standard output captured; standard error inherited.
    Stdout,
    /// Standard error captured; standard output inherited.
    Stderr,
}

/// Result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code. Signal deaths are reported as `128 + signal`.
    pub code: i32,
    /// Captured standard output (empty unless `Capture::Stdout`).
    pub stdout: Vec<u8>,
    /// Captured standard error (empty unless `Capture::Stderr`).
    pub stderr: Vec<u8>,
}

impl RunOutput {
    /// Returns true if the child exited with code 0.
    pub fn success(&self) -> bool {
        self.code == exit_codes::SUCCESS
    }

    /// Returns true if `needle` occurs anywhere in the captured stdout.
    pub fn stdout_contains(&self, needle: &[u8]) -> bool {
        !needle.is_empty() && self.stdout.windows(needle.len()).any(|w| w == needle)
    }

    /// Captured stderr with surrounding ASCII whitespace removed.
    pub fn stderr_trimmed(&self) -> &[u8] {
        self.stderr.trim_ascii()
    }

    /// Captured stdout as text, trimmed.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }
}

/// Something that can start a command and wait for it.
pub trait CommandRunner {
    /// Run `argv[0]` with the remaining arguments and block until it exits.
    fn execute(&self, argv: &[String], capture: Capture) -> Result<RunOutput>;
}

/// Runs commands as real child processes of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(&self, argv: &[String], capture: Capture) -> Result<RunOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SetupError::UserError("no command to execute".to_string()))?;

        let (stdout, stderr) = match capture {
            Capture::None => (Stdio::inherit(), Stdio::inherit()),
            Capture::Stdout => (Stdio::piped(), Stdio::inherit()),
            Capture::Stderr => (Stdio::inherit(), Stdio::piped()),
        };

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(stderr)
            .output()
            .map_err(|e| SetupError::SpawnError {
                command: argv.join(" "),
                source: e,
            })?;

        Ok(RunOutput {
            code: status_code(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Map an exit status to a shell-style exit code.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exit_codes::SIGNAL_BASE + signal;
        }
    }

    exit_codes::SIGNAL_BASE
}

/// Run a command through `runner`, echoing it before and after.
///
/// Prints ``command: `<argv>` `` to stdout, runs the command, writes any
/// captured stderr through to our own stderr, then prints the command again
/// with its exit status.
pub fn run(runner: &dyn CommandRunner, argv: &[String], capture: Capture) -> Result<RunOutput> {
    run_with(
        runner,
        argv,
        capture,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}

/// [`run`] with explicit streams for the echo lines and forwarded stderr.
///
/// The first line is flushed before the child starts so it precedes any
/// output the child writes to an inherited stream. A failed write to either
/// stream never fails the command.
pub fn run_with(
    runner: &dyn CommandRunner,
    argv: &[String],
    capture: Capture,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunOutput> {
    let command = argv.join(" ");
    emit(out, format_args!("command: `{}`\n", command));

    let output = runner.execute(argv, capture)?;

    if !output.stderr.is_empty()
        && let Err(e) = err.write_all(&output.stderr).and_then(|_| err.flush())
    {
        log::debug!("failed to forward stderr of `{}`: {}", command, e);
    }

    emit(
        out,
        format_args!("command: `{}` exited with status `{}`\n", command, output.code),
    );
    Ok(output)
}

fn emit(out: &mut dyn Write, line: std::fmt::Arguments<'_>) {
    if let Err(e) = out.write_fmt(line).and_then(|_| out.flush()) {
        log::debug!("failed to write command echo: {}", e);
    }
}
