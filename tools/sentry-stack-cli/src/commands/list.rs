//! List sentry event directories.

use std::path::Path;

use anyhow::Context;
use sentry_stack_event_model::EventScanner;

pub fn run(sentry_dir: &Path) -> anyhow::Result<()> {
    let dirs = EventScanner::new(sentry_dir)
        .event_dirs()
        .with_context(|| format!("Failed to scan {}", sentry_dir.display()))?;

    for dir in &dirs {
        println!("{}", dir.path.display());
        for event in &dir.events {
            let cameras = event
                .present_views()
                .iter()
                .map(|view| view.tag())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {}  [{}]", event.timestamp(), cameras);
        }
    }

    tracing::info!(dirs = dirs.len(), "Listed sentry event directories");
    Ok(())
}
