//! Sentry root classification.
//!
//! A sentry root (usually `TeslaCam/SentryClips`) holds one directory per
//! event. [`EventScanner`] walks the immediate subdirectories, keeps those
//! whose name is a sentry timestamp, and groups the clips inside into
//! [`SentryEvent`]s. Anything that does not fit is skipped without error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use sentry_stack_common::error::{StackError, StackResult};

use crate::camera::parse_clip_name;
use crate::event::{parse_timestamp, CameraClips, SentryEvent};

/// Walks a sentry root and yields events.
#[derive(Debug, Clone)]
pub struct EventScanner {
    root: PathBuf,
}

/// A classified event directory and the events found in it.
#[derive(Debug, Clone)]
pub struct EventDir {
    pub path: PathBuf,
    pub events: Vec<SentryEvent>,
}

impl EventScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lazily iterate over every event under the root.
    ///
    /// Only the root listing happens up front; each candidate directory is
    /// read when the iterator reaches it. Calling this again rescans the
    /// filesystem.
    pub fn events(&self) -> StackResult<SentryEvents> {
        let candidates = self.candidate_dirs()?;
        Ok(SentryEvents {
            candidates: candidates.into_iter(),
            pending: Vec::new().into_iter(),
        })
    }

    /// Event directories holding at least one event, in name order.
    pub fn event_dirs(&self) -> StackResult<Vec<EventDir>> {
        let mut dirs = Vec::new();
        for (path, timestamp) in self.candidate_dirs()? {
            match classify_dir(&path, timestamp) {
                Ok(events) if !events.is_empty() => dirs.push(EventDir { path, events }),
                Ok(_) => {
                    tracing::debug!(dir = %path.display(), "No camera clips, skipping");
                }
                Err(e) => {
                    tracing::warn!(dir = %path.display(), error = %e, "Failed to read event directory");
                }
            }
        }
        Ok(dirs)
    }

    /// Subdirectories named like a sentry timestamp, sorted by name.
    fn candidate_dirs(&self) -> StackResult<Vec<(PathBuf, NaiveDateTime)>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StackError::DirectoryNotFound {
                path: self.root.clone(),
            },
            _ => StackError::scan(format!(
                "Failed to read sentry directory {}: {e}",
                self.root.display()
            )),
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let timestamp = entry.file_name().to_str().and_then(parse_timestamp);
            match timestamp {
                Some(timestamp) => candidates.push((path, timestamp)),
                None => {
                    tracing::debug!(dir = %path.display(), "Not a sentry event directory");
                }
            }
        }
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(candidates)
    }
}

/// Lazy iterator returned by [`EventScanner::events`].
#[derive(Debug)]
pub struct SentryEvents {
    candidates: std::vec::IntoIter<(PathBuf, NaiveDateTime)>,
    pending: std::vec::IntoIter<SentryEvent>,
}

impl Iterator for SentryEvents {
    type Item = SentryEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.next() {
                return Some(event);
            }
            let (dir, timestamp) = self.candidates.next()?;
            match classify_dir(&dir, timestamp) {
                Ok(events) => self.pending = events.into_iter(),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to read event directory");
                }
            }
        }
    }
}

/// Group the clips in one event directory into events.
///
/// Bare clip names (`front.mp4`) take `dir_timestamp`; timestamped names
/// are grouped by their own prefix. Events come back in time order. When
/// two files claim the same camera and time, the first by name wins.
pub fn classify_dir(dir: &Path, dir_timestamp: NaiveDateTime) -> StackResult<Vec<SentryEvent>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut groups: BTreeMap<NaiveDateTime, CameraClips> = BTreeMap::new();
    for path in files {
        let Some(clip) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_clip_name)
        else {
            continue;
        };
        let timestamp = clip.timestamp.unwrap_or(dir_timestamp);
        let clips = groups.entry(timestamp).or_default();
        if clips.get(clip.view).is_some() {
            tracing::debug!(clip = %path.display(), view = %clip.view, "Duplicate camera clip ignored");
            continue;
        }
        clips.set(clip.view, path);
    }

    Ok(groups
        .into_iter()
        .filter_map(|(timestamp, clips)| SentryEvent::new(dir.to_path_buf(), timestamp, clips))
        .collect())
}
