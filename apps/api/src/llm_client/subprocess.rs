use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{Completion, ModelClient};

/// Runs the model as a child process: `{program} {args..} {prompt}`.
///
/// The child gets a null stdin and is killed if the call is abandoned, so a
/// timed-out completion does not leave a process behind.
#[derive(Debug, Clone)]
pub struct SubprocessModelClient {
    program: String,
    args: Vec<String>,
}

impl SubprocessModelClient {
    /// `ollama run <model> <prompt>` style invocation.
    pub fn new(program: String, model: String) -> Self {
        Self::with_args(program, vec!["run".to_string(), model])
    }

    /// Arbitrary argv prefix; the prompt is appended as the last argument.
    pub fn with_args(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ModelClient for SubprocessModelClient {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Completion {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!("Failed to run {}: {e}", self.program);
                return Completion::ProcessError {
                    message: e.to_string(),
                };
            }
            Err(_) => {
                warn!(
                    "{} timed out after {}s",
                    self.program,
                    timeout.as_secs_f64()
                );
                return Completion::Timeout;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                "{} failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr
            );
            return Completion::ProcessError { message: stderr };
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("{} returned {} bytes", self.program, stdout.len());
        Completion::from_output(&stdout)
    }

    fn backend_name(&self) -> &'static str {
        "subprocess"
    }
}
