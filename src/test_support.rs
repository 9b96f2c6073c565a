use crate::error::Result;
use crate::exec::{Capture, CommandRunner, RunOutput};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Records every command and answers with queued outputs.
///
/// When the queue runs dry the runner answers with a bare exit code 0.
#[derive(Default)]
pub(crate) struct FakeRunner {
    calls: RefCell<Vec<(Vec<String>, Capture)>>,
    outputs: RefCell<VecDeque<RunOutput>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the output for the next command.
    pub(crate) fn then(self, output: RunOutput) -> Self {
        self.outputs.borrow_mut().push_back(output);
        self
    }

    pub(crate) fn commands(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|(cmd, _)| cmd.clone()).collect()
    }

    pub(crate) fn captures(&self) -> Vec<Capture> {
        self.calls.borrow().iter().map(|(_, c)| *c).collect()
    }

    pub(crate) fn ran(&self, cmd: &[&str]) -> bool {
        let cmd = argv(cmd);
        self.calls.borrow().iter().any(|(c, _)| *c == cmd)
    }
}

impl CommandRunner for FakeRunner {
    fn execute(&self, argv: &[String], capture: Capture) -> Result<RunOutput> {
        self.calls.borrow_mut().push((argv.to_vec(), capture));
        Ok(self.outputs.borrow_mut().pop_front().unwrap_or_default())
    }
}

impl RunOutput {
    pub(crate) fn with_stdout(mut self, bytes: &[u8]) -> Self {
        self.stdout = bytes.to_vec();
        self
    }

    pub(crate) fn with_stderr(mut self, bytes: &[u8]) -> Self {
        self.stderr = bytes.to_vec();
        self
    }
}

pub(crate) fn exited(code: i32) -> RunOutput {
    RunOutput {
        code,
        ..RunOutput::default()
    }
}

pub(crate) fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
