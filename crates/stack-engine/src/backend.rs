//! External encoder backends.

use std::process::{Command, Stdio};

use sentry_stack_common::error::{StackError, StackResult};

use crate::job::EncodeJob;

/// Trait for encoder backends.
pub trait EncoderBackend {
    /// Run the encoder for `job` to completion.
    fn encode(&mut self, job: &EncodeJob) -> StackResult<()>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Runs an ffmpeg-compatible binary as a blocking child process.
///
/// stdout and stderr are inherited so the encoder's own progress output
/// reaches the terminal. stdin is closed to keep ffmpeg from waiting on
/// interactive keys.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    binary: String,
}

impl FfmpegBackend {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl EncoderBackend for FfmpegBackend {
    fn encode(&mut self, job: &EncodeJob) -> StackResult<()> {
        let args = job.args();
        tracing::debug!(binary = %self.binary, args = ?args, "Running encoder");

        let started = std::time::Instant::now();
        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| StackError::encoder(format!("Failed to start {}: {e}", self.binary)))?;

        if !status.success() {
            return Err(StackError::encoder(format!(
                "{} failed ({status})",
                self.binary
            )));
        }

        tracing::debug!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Encoder finished"
        );
        Ok(())
    }

    fn is_available(&self) -> bool {
        command_exists(&self.binary)
    }

    fn name(&self) -> &str {
        &self.binary
    }
}

fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(r#"command -v "$1" >/dev/null 2>&1"#)
        .arg("sh")
        .arg(binary)
        .stdin(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("sentry-stack-no-such-encoder"));
    }
}
