//! Camera views and clip file naming.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::event::parse_timestamp;

/// One of the four fixed sentry cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CameraView {
    Front,
    Back,
    LeftRepeater,
    RightRepeater,
}

impl CameraView {
    /// All views in grid order: top row front|back, bottom row right|left.
    pub const GRID_ORDER: [CameraView; 4] = [
        CameraView::Front,
        CameraView::Back,
        CameraView::RightRepeater,
        CameraView::LeftRepeater,
    ];

    /// Tag used in clip file names.
    pub fn tag(self) -> &'static str {
        match self {
            CameraView::Front => "front",
            CameraView::Back => "back",
            CameraView::LeftRepeater => "left_repeater",
            CameraView::RightRepeater => "right_repeater",
        }
    }

    /// Short label used for filter-graph pads.
    pub fn label(self) -> &'static str {
        match self {
            CameraView::Front => "front",
            CameraView::Back => "back",
            CameraView::LeftRepeater => "left",
            CameraView::RightRepeater => "right",
        }
    }

    /// Parse a clip file-name tag. Unknown cameras (e.g. pillars) are `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "front" => Some(CameraView::Front),
            "back" => Some(CameraView::Back),
            "left_repeater" => Some(CameraView::LeftRepeater),
            "right_repeater" => Some(CameraView::RightRepeater),
            _ => None,
        }
    }
}

impl fmt::Display for CameraView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A recognized clip file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipName {
    /// Timestamp prefix, absent for bare `front.mp4` names.
    pub timestamp: Option<NaiveDateTime>,

    /// Which camera recorded the clip.
    pub view: CameraView,
}

fn clip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(?P<ts>\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})-)?(?P<view>[a-z_]+)\.mp4$")
            .expect("clip name regex is valid")
    })
}

/// Parse a clip file name such as `2020-01-31_12-05-52-front.mp4` or
/// `back.mp4`. Returns `None` for anything else.
pub fn parse_clip_name(file_name: &str) -> Option<ClipName> {
    let caps = clip_regex().captures(file_name)?;
    let view = CameraView::from_tag(caps.name("view")?.as_str())?;
    let timestamp = match caps.name("ts") {
        Some(ts) => Some(parse_timestamp(ts.as_str())?),
        None => None,
    };
    Some(ClipName { timestamp, view })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for view in CameraView::GRID_ORDER {
            assert_eq!(CameraView::from_tag(view.tag()), Some(view));
        }
    }

    #[test]
    fn test_grid_order_covers_every_camera_once() {
        let mut views = CameraView::GRID_ORDER.to_vec();
        views.sort();
        views.dedup();
        assert_eq!(views.len(), 4);
    }

    #[test]
    fn test_parse_bare_clip_name() {
        let clip = parse_clip_name("left_repeater.mp4").unwrap();
        assert_eq!(clip.view, CameraView::LeftRepeater);
        assert!(clip.timestamp.is_none());
    }

    #[test]
    fn test_parse_timestamped_clip_name() {
        let clip = parse_clip_name("2020-01-31_12-05-52-right_repeater.mp4").unwrap();
        assert_eq!(clip.view, CameraView::RightRepeater);
        assert_eq!(
            clip.timestamp.unwrap().to_string(),
            "2020-01-31 12:05:52"
        );
    }

    #[test]
    fn test_rejects_unknown_or_foreign_files() {
        assert!(parse_clip_name("2020-01-31_12-05-52-left_pillar.mp4").is_none());
        assert!(parse_clip_name("front.mov").is_none());
        assert!(parse_clip_name("event.json").is_none());
        assert!(parse_clip_name("thumb.png").is_none());
        assert!(parse_clip_name("2020-13-31_12-05-52-front.mp4").is_none());
    }
}
