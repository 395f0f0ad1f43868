//! sentry-stack Engine
//!
//! Turns classified sentry events into external encoder invocations and
//! runs them one at a time.
//!
//! # Grid Layout
//!
//! ```text
//! front.mp4 ──────────┐
//!                     ├── hstack ──┐
//! back.mp4 ───────────┘            │
//!                                  ├── vstack ── setpts ── libx264 ── output.mp4
//! right_repeater.mp4 ─┐            │
//!                     ├── hstack ──┘
//! left_repeater.mp4 ──┘
//! ```
//!
//! Each clip is scaled by `1/scale` before stacking. A missing camera is
//! replaced by a black source of the same size.

pub mod backend;
pub mod filter;
pub mod job;
pub mod runner;

pub use backend::*;
pub use job::*;
pub use runner::*;
