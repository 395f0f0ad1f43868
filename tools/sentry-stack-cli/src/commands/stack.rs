//! Stack every sentry event under a directory.

use std::path::Path;

use anyhow::Context;
use sentry_stack_engine::{EncodeJob, FfmpegBackend, JobSettings, Runner};
use sentry_stack_event_model::EventScanner;

pub fn run(sentry_dir: &Path, settings: &JobSettings, dry_run: bool) -> anyhow::Result<()> {
    let events = EventScanner::new(sentry_dir)
        .events()
        .with_context(|| format!("Failed to scan {}", sentry_dir.display()))?;

    let backend = FfmpegBackend::new(settings.encoder.binary.clone());
    let mut runner = Runner::new(Box::new(backend), dry_run);
    runner.preflight();

    let summary = runner.run_batch(events.map(|event| EncodeJob::plan(event, settings)));
    if summary.total() == 0 {
        tracing::info!(sentry_dir = %sentry_dir.display(), "No sentry events found");
    }

    // Per-job failures are logged by the runner and do not fail the batch.
    Ok(())
}
