//! Command runner that records invocations instead of spawning

#![allow(dead_code)]

use async_trait::async_trait;
use mq_cafe::error::Result;
use mq_cafe::process::{CommandOutput, CommandRunner, Invocation};
use std::sync::Mutex;

/// Records every invocation and answers from scripted responses
///
/// Responses are matched by command-line prefix, first match wins.
/// Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    responses: Mutex<Vec<(String, CommandOutput)>>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `stdout`
    pub fn respond(&self, prefix: &str, stdout: &str) {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), CommandOutput::ok(stdout)));
    }

    /// Fail commands starting with `prefix`
    pub fn fail(&self, prefix: &str, stderr: &str) {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), CommandOutput::failed(1, stderr)));
    }

    /// All invocations so far
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines of all invocations so far
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    /// Whether any command started with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|c| c.starts_with(prefix))
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        let line = invocation.command_line();
        let responses = self.responses.lock().unwrap();
        Ok(responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default())
    }
}
