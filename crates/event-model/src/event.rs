//! Sentry events: one timestamped set of camera clips.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::camera::CameraView;

/// Timestamp layout Tesla uses for directory and clip names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}$").expect("timestamp regex is valid")
    })
}

/// Parse a sentry timestamp such as `2020-01-31_12-06-38`.
///
/// The shape is checked strictly before handing off to chrono, which
/// alone would accept signed or over-long years.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if !timestamp_regex().is_match(s) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Clip paths for the four cameras. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraClips {
    pub front: Option<PathBuf>,
    pub back: Option<PathBuf>,
    pub left_repeater: Option<PathBuf>,
    pub right_repeater: Option<PathBuf>,
}

impl CameraClips {
    pub fn get(&self, view: CameraView) -> Option<&Path> {
        match view {
            CameraView::Front => self.front.as_deref(),
            CameraView::Back => self.back.as_deref(),
            CameraView::LeftRepeater => self.left_repeater.as_deref(),
            CameraView::RightRepeater => self.right_repeater.as_deref(),
        }
    }

    pub fn set(&mut self, view: CameraView, path: PathBuf) {
        let slot = match view {
            CameraView::Front => &mut self.front,
            CameraView::Back => &mut self.back,
            CameraView::LeftRepeater => &mut self.left_repeater,
            CameraView::RightRepeater => &mut self.right_repeater,
        };
        *slot = Some(path);
    }

    /// Number of cameras with a clip.
    pub fn count(&self) -> usize {
        CameraView::GRID_ORDER
            .iter()
            .filter(|view| self.get(**view).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// A recognized sentry event.
///
/// Only constructed through [`SentryEvent::new`], which refuses empty clip
/// sets, so every event has at least one camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentryEvent {
    dir: PathBuf,
    timestamp: NaiveDateTime,
    clips: CameraClips,
}

impl SentryEvent {
    /// Build an event. Returns `None` when no camera clip is present.
    pub fn new(dir: PathBuf, timestamp: NaiveDateTime, clips: CameraClips) -> Option<Self> {
        if clips.is_empty() {
            return None;
        }
        Some(Self {
            dir,
            timestamp,
            clips,
        })
    }

    /// Directory holding the clips.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Time of the clip set.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn clip(&self, view: CameraView) -> Option<&Path> {
        self.clips.get(view)
    }

    /// Cameras with a clip, in grid order.
    pub fn present_views(&self) -> Vec<CameraView> {
        CameraView::GRID_ORDER
            .into_iter()
            .filter(|view| self.clip(*view).is_some())
            .collect()
    }

    /// Cameras without a clip, in grid order.
    pub fn missing_views(&self) -> Vec<CameraView> {
        CameraView::GRID_ORDER
            .into_iter()
            .filter(|view| self.clip(*view).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.clips.count() == CameraView::GRID_ORDER.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp_valid() {
        let t = ts("2020-01-31_12-06-38");
        assert_eq!(t.format("%Y-%m-%d %H:%M:%S").to_string(), "2020-01-31 12:06:38");
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_shapes() {
        assert!(parse_timestamp("2020-01-31").is_none());
        assert!(parse_timestamp("2020-01-31_12-06-38-front").is_none());
        assert!(parse_timestamp("+2020-01-31_12-06-38").is_none());
        assert!(parse_timestamp("2020-02-30_12-06-38").is_none());
        assert!(parse_timestamp("2020-01-31 12:06:38").is_none());
        assert!(parse_timestamp("RecentClips").is_none());
    }

    #[test]
    fn test_event_requires_a_clip() {
        let dir = PathBuf::from("/sentry/2020-01-31_12-06-38");
        assert!(SentryEvent::new(dir, ts("2020-01-31_12-06-38"), CameraClips::default()).is_none());
    }

    #[test]
    fn test_present_and_missing_views() {
        let dir = PathBuf::from("/sentry/2020-01-31_12-06-38");
        let mut clips = CameraClips::default();
        clips.set(CameraView::Front, dir.join("front.mp4"));
        clips.set(CameraView::LeftRepeater, dir.join("left_repeater.mp4"));

        let event = SentryEvent::new(dir.clone(), ts("2020-01-31_12-06-38"), clips).unwrap();
        assert_eq!(
            event.present_views(),
            vec![CameraView::Front, CameraView::LeftRepeater]
        );
        assert_eq!(
            event.missing_views(),
            vec![CameraView::Back, CameraView::RightRepeater]
        );
        assert!(!event.is_complete());
        assert_eq!(
            event.clip(CameraView::Front),
            Some(dir.join("front.mp4").as_path())
        );
    }

    proptest! {
        #[test]
        fn prop_formatted_timestamps_parse_back(
            year in 2017i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
        ) {
            let t = chrono::NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, minute, second))
                .unwrap();
            let name = t.format(TIMESTAMP_FORMAT).to_string();
            prop_assert_eq!(parse_timestamp(&name), Some(t));
        }
    }
}
