//! Simulation parameters
//!
//! Loaded from JSON by the hosts; every field has a default so a partial
//! document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// How initial velocities are built from the drawn speed and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VelocityMode {
    /// `cos(dir) * (MAX_SPEED - MIN_SPEED) + MIN_SPEED` per axis. The drawn
    /// speed is ignored and the result is biased toward +x/+y.
    #[default]
    Literal,
    /// `speed` along `dir`
    Polar,
}

impl VelocityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityMode::Literal => "Literal",
            VelocityMode::Polar => "Polar",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "literal" => Some(VelocityMode::Literal),
            "polar" | "corrected" => Some(VelocityMode::Polar),
            _ => None,
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of balls, fixed for the lifetime of a simulation
    pub ball_count: usize,

    // === Bodies ===
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub velocity_mode: VelocityMode,

    // === Determinism ===
    /// Seed for the uniform source used at initialization
    pub seed: u64,

    // === Collision ===
    /// Skip pairs whose centers coincide instead of dividing by zero
    pub skip_coincident: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,

            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            velocity_mode: VelocityMode::Literal,

            seed: DEFAULT_SEED,

            skip_coincident: true,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the preconditions initialization relies on
    pub fn validate(&self) -> Result<(), SimError> {
        if self.ball_count == 0 {
            return Err(SimError::InvalidConfig("ball_count must be > 0".into()));
        }
        let ranges = [
            ("radius", self.min_radius, self.max_radius),
            ("speed", self.min_speed, self.max_speed),
        ];
        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() {
                return Err(SimError::InvalidConfig(format!("{name} range must be finite")));
            }
            if min > max {
                return Err(SimError::InvalidConfig(format!(
                    "min_{name} ({min}) exceeds max_{name} ({max})"
                )));
            }
        }
        if self.min_radius <= 0.0 {
            return Err(SimError::InvalidConfig("min_radius must be > 0".into()));
        }
        Ok(())
    }

    /// Width of the radius range
    pub fn radius_span(&self) -> f32 {
        self.max_radius - self.min_radius
    }

    /// Width of the speed range
    pub fn speed_span(&self) -> f32 {
        self.max_speed - self.min_speed
    }
}
