//! Batch execution of encode jobs.
//!
//! Each job ends in exactly one [`RunResult`]. Failures are recorded and
//! the batch moves on; nothing is retried.

use std::path::PathBuf;

use crate::backend::EncoderBackend;
use crate::job::EncodeJob;

/// Terminal outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Output already present and overwrite is off.
    SkippedExists { output: PathBuf },

    /// Command printed, encoder not invoked.
    DryRun { command: String },

    /// Encoder exited successfully.
    Success { output: PathBuf },

    /// Encoder could not start or exited non-zero.
    EncoderFailure { output: PathBuf, message: String },
}

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub skipped: usize,
    pub dry_run: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &RunResult) {
        match result {
            RunResult::SkippedExists { .. } => self.skipped += 1,
            RunResult::DryRun { .. } => self.dry_run += 1,
            RunResult::Success { .. } => self.succeeded += 1,
            RunResult::EncoderFailure { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.skipped + self.dry_run + self.succeeded + self.failed
    }
}

/// Applies the skip / dry-run / execute policy to each job.
pub struct Runner {
    backend: Box<dyn EncoderBackend>,
    dry_run: bool,
}

impl Runner {
    pub fn new(backend: Box<dyn EncoderBackend>, dry_run: bool) -> Self {
        Self { backend, dry_run }
    }

    /// Warn when the encoder cannot be found. Dry runs never need it.
    pub fn preflight(&self) -> bool {
        if self.dry_run {
            return true;
        }
        let available = self.backend.is_available();
        if !available {
            tracing::warn!(
                encoder = self.backend.name(),
                "Encoder not found in PATH, every job will fail"
            );
        }
        available
    }

    /// Run a single job to its terminal state.
    pub fn run(&mut self, job: &EncodeJob) -> RunResult {
        let output = job.output_path.clone();

        if !job.overwrite && job.output_exists() {
            tracing::info!(
                output = %output.display(),
                "Output exists, skipping. See --overwrite."
            );
            return RunResult::SkippedExists { output };
        }

        if !job.global_options.is_empty() {
            tracing::debug!(global_options = ?job.global_options, "Passing global options to encoder");
        }

        if self.dry_run {
            let command = job.command_line();
            println!("{command}");
            return RunResult::DryRun { command };
        }

        if let Some(parent) = output.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                let message = format!("Failed to create {}: {e}", parent.display());
                tracing::error!(output = %output.display(), "{message}");
                return RunResult::EncoderFailure { output, message };
            }
        }

        tracing::info!(
            event = %job.event.dir().display(),
            cameras = job.event.present_views().len(),
            output = %output.display(),
            "Stacking sentry event"
        );

        match self.backend.encode(job) {
            Ok(()) => {
                tracing::info!(output = %output.display(), "Stacked");
                RunResult::Success { output }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(output = %output.display(), error = %message, "Encoder failed");
                RunResult::EncoderFailure { output, message }
            }
        }
    }

    /// Run every job in order, continuing past failures.
    pub fn run_batch(&mut self, jobs: impl IntoIterator<Item = EncodeJob>) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for job in jobs {
            let result = self.run(&job);
            summary.record(&result);
        }
        tracing::info!(
            total = summary.total(),
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            dry_run = summary.dry_run,
            "Batch finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.record(&RunResult::Success {
            output: PathBuf::from("a.mp4"),
        });
        summary.record(&RunResult::EncoderFailure {
            output: PathBuf::from("b.mp4"),
            message: "boom".to_string(),
        });
        summary.record(&RunResult::SkippedExists {
            output: PathBuf::from("c.mp4"),
        });
        assert_eq!(
            summary,
            BatchSummary {
                skipped: 1,
                dry_run: 0,
                succeeded: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.total(), 3);
    }
}
