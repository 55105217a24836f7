//! Bouncy Balls - real-time 2D ball physics core
//!
//! Core modules:
//! - `sim`: Simulation (ball store, clock, viewport, per-tick physics)
//! - `platform`: Time sources and the browser host binding
//! - `config`: Data-driven simulation parameters
//! - `error`: Construction/configuration errors

pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use config::{SimConfig, VelocityMode};
pub use error::SimError;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Number of balls created by default
    pub const BALL_COUNT: usize = 20;

    /// Ball radius range
    pub const MIN_RADIUS: f32 = 10.0;
    pub const MAX_RADIUS: f32 = 60.0;

    /// Initial speed range
    pub const MIN_SPEED: f32 = 50.0;
    pub const MAX_SPEED: f32 = 100.0;

    /// Default RNG seed for reproducible runs
    pub const DEFAULT_SEED: u64 = 42;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
