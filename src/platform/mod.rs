//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - The per-frame schedule and focus detection (browser only)

pub mod schedule;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use schedule::FrameSchedule;
pub use time::PlatformTimeSource;
