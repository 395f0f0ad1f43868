//! sentry-stack Event Model
//!
//! Defines how Tesla Sentry-mode recordings look on disk:
//! - **Cameras:** The four fixed camera angles and their clip file names
//! - **Events:** One timestamped set of up to four synchronized clips
//! - **Scanner:** Classification of a sentry root into events
//!
//! Tesla writes one directory per sentry event, named after the trigger
//! time (`2020-01-31_12-06-38`). Inside, each camera contributes one clip
//! per recorded minute (`2020-01-31_12-05-52-front.mp4`). Bare
//! `front.mp4`-style names are accepted too and are stamped with the
//! directory's own time.

pub mod camera;
pub mod event;
pub mod scan;

pub use camera::*;
pub use event::*;
pub use scan::*;
