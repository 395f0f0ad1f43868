//! Encode jobs and output naming.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use sentry_stack_common::config::EncoderDefaults;
use sentry_stack_event_model::{CameraView, SentryEvent};

use crate::filter::build_filter_graph;

/// Output-affecting stacking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackParams {
    /// Divisor applied to each clip's width and height.
    pub scale: u32,
    /// Playback speed multiplier.
    pub speed: u32,
    /// CRF value handed to the encoder.
    pub quality: u32,
}

impl StackParams {
    pub fn from_defaults(defaults: &EncoderDefaults) -> Self {
        Self {
            scale: defaults.scale,
            speed: defaults.speed,
            quality: defaults.quality,
        }
    }
}

/// Batch-wide settings shared by every job.
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub params: StackParams,

    /// Encoder binary, codec, container and camera geometry.
    pub encoder: EncoderDefaults,

    /// Where outputs go. `None` writes next to the clips.
    pub output_dir: Option<PathBuf>,

    /// Replace existing outputs instead of skipping them.
    pub overwrite: bool,

    /// Pass-through tokens placed right after the encoder binary.
    pub global_options: Vec<String>,
}

/// Everything needed to produce one stacked video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    pub event: SentryEvent,
    pub params: StackParams,
    pub binary: String,
    pub video_codec: String,
    /// Size of a blank grid slot, already divided by the scale.
    pub blank_size: (u32, u32),
    pub output_path: PathBuf,
    pub overwrite: bool,
    pub global_options: Vec<String>,
}

/// Output file name for an event, e.g. `2020-01-31-12-06-38_st4_sp8_q30.mp4`.
pub fn output_file_name(timestamp: NaiveDateTime, params: StackParams, extension: &str) -> String {
    format!(
        "{}_st{}_sp{}_q{}.{}",
        timestamp.format("%Y-%m-%d-%H-%M-%S"),
        params.scale,
        params.speed,
        params.quality,
        extension
    )
}

impl EncodeJob {
    /// Plan the job for `event` under `settings`.
    pub fn plan(event: SentryEvent, settings: &JobSettings) -> Self {
        let params = settings.params;
        let dir = settings
            .output_dir
            .clone()
            .unwrap_or_else(|| event.dir().to_path_buf());
        let output_path = dir.join(output_file_name(
            event.timestamp(),
            params,
            &settings.encoder.extension,
        ));
        let scale = params.scale.max(1);

        Self {
            event,
            params,
            binary: settings.encoder.binary.clone(),
            video_codec: settings.encoder.video_codec.clone(),
            blank_size: (
                settings.encoder.camera_width / scale,
                settings.encoder.camera_height / scale,
            ),
            output_path,
            overwrite: settings.overwrite,
            global_options: settings.global_options.clone(),
        }
    }

    /// Encoder arguments, excluding the binary itself.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.global_options.clone();
        if self.overwrite {
            args.push("-y".to_string());
        } else if !self.has_overwrite_option() {
            // ffmpeg exits when it sees both -y and -n.
            args.push("-n".to_string());
        }

        for view in self.input_views() {
            if let Some(path) = self.event.clip(view) {
                args.push("-i".to_string());
                args.push(path.to_string_lossy().into_owned());
            }
        }

        args.extend([
            "-an".to_string(),
            "-filter_complex".to_string(),
            build_filter_graph(&self.event, self.params, self.blank_size),
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-crf".to_string(),
            self.params.quality.to_string(),
            "-map".to_string(),
            "[res]".to_string(),
            self.output_path.to_string_lossy().into_owned(),
        ]);
        args
    }

    /// Views fed to the encoder as inputs, in input-index order.
    pub fn input_views(&self) -> Vec<CameraView> {
        self.event.present_views()
    }

    /// The full invocation as one line a POSIX shell would accept.
    pub fn command_line(&self) -> String {
        std::iter::once(self.binary.clone())
            .chain(self.args())
            .map(|arg| shell_quote(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn output_exists(&self) -> bool {
        self.output_path.exists()
    }

    /// Whether the global options already pick `-y` or `-n`.
    fn has_overwrite_option(&self) -> bool {
        self.global_options
            .iter()
            .any(|opt| opt == "-y" || opt == "-n")
    }
}

/// Single-quote `arg` if a shell would otherwise split or expand it.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
