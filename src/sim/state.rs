//! Simulation state
//!
//! `Simulation` owns everything one running demo needs: the balls, the
//! viewport, the clock and the running flag. Hosts call `tick()` once per
//! frame and read `state()` in between.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::balls::{Ball, BallCollection, BallsView};
use super::clock::{Clock, TimeSource};
use super::tick::{StepOptions, step};
use super::viewport::Viewport;
use crate::config::SimConfig;
use crate::error::SimError;

/// Copied-out ball columns, safe to keep across ticks or send elsewhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub width: u32,
    pub height: u32,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,
    pub radius: Vec<f32>,
}

/// A self-contained ball simulation
#[derive(Debug)]
pub struct Simulation<S> {
    balls: BallCollection,
    viewport: Viewport,
    clock: Clock<S>,
    options: StepOptions,
    running: bool,
    /// Number of completed steps
    ticks: u64,
}

impl<S: TimeSource> Simulation<S> {
    /// Create `config.ball_count` random balls inside a `width` x `height`
    /// viewport, seeded from `config.seed`, and start running.
    pub fn initialize(
        width: u32,
        height: u32,
        config: &SimConfig,
        source: S,
    ) -> Result<Self, SimError> {
        let viewport = Viewport::new(width, height)?;
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let sim = Self::with_rng(config, viewport, &mut rng, source)?;
        log::info!(
            "Initialized {} balls in {}x{} (seed {})",
            sim.count(),
            width,
            height,
            config.seed
        );
        Ok(sim)
    }

    /// Same as [`Simulation::initialize`] with a caller-supplied uniform source
    pub fn with_rng<R: rand::Rng>(
        config: &SimConfig,
        viewport: Viewport,
        rng: &mut R,
        source: S,
    ) -> Result<Self, SimError> {
        let balls = BallCollection::initialize(config, &viewport, rng)?;
        Ok(Self::assemble(
            balls,
            viewport,
            source,
            StepOptions {
                skip_coincident: config.skip_coincident,
            },
        ))
    }

    /// Build from explicit rows (replays, scripted scenarios)
    pub fn from_balls(rows: &[Ball], viewport: Viewport, source: S) -> Result<Self, SimError> {
        let balls = BallCollection::from_balls(rows)?;
        Ok(Self::assemble(balls, viewport, source, StepOptions::default()))
    }

    fn assemble(balls: BallCollection, viewport: Viewport, source: S, options: StepOptions) -> Self {
        Self {
            balls,
            viewport,
            clock: Clock::new(source),
            options,
            running: true,
            ticks: 0,
        }
    }

    /// Replace the bounds used by future wall checks.
    ///
    /// Existing balls are not moved. Zero dimensions are rejected and the
    /// previous bounds stay in place.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SimError> {
        match Viewport::new(width, height) {
            Ok(viewport) => {
                log::debug!("Resized viewport to {}x{}", width, height);
                self.viewport = viewport;
                Ok(())
            }
            Err(e) => {
                log::warn!("Ignoring resize: {}", e);
                Err(e)
            }
        }
    }

    /// Resume ticking. The clock restarts, so the first delta afterwards
    /// covers only the time since this call.
    pub fn start_schedule(&mut self) {
        self.clock.start();
        if !self.running {
            log::info!("Simulation started at tick {}", self.ticks);
        }
        self.running = true;
    }

    /// Stop ticking. State is left untouched.
    pub fn stop_schedule(&mut self) {
        if self.running {
            log::info!("Simulation stopped at tick {}", self.ticks);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by the wall-clock time since the previous tick.
    ///
    /// Returns the delta used, or `None` when stopped.
    pub fn tick(&mut self) -> Option<f32> {
        if !self.running {
            return None;
        }
        let delta = self.clock.tick();
        self.step(delta);
        Some(delta)
    }

    /// Advance by an explicit `delta` seconds, regardless of the running flag
    pub fn step(&mut self, delta: f32) {
        step(&mut self.balls, &self.viewport, delta, self.options);
        self.ticks += 1;
    }

    /// Read-only view of the ball columns
    pub fn state(&self) -> BallsView<'_> {
        self.balls.view()
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        let view = self.balls.view();
        Snapshot {
            tick: self.ticks,
            width: self.viewport.width(),
            height: self.viewport.height(),
            x: view.x.to_vec(),
            y: view.y.to_vec(),
            vx: view.vx.to_vec(),
            vy: view.vy.to_vec(),
            radius: view.radius.to_vec(),
        }
    }

    /// Current state as a JSON document
    pub fn snapshot_json(&self) -> Result<String, SimError> {
        serde_json::to_string(&self.snapshot()).map_err(SimError::Serialize)
    }

    pub fn count(&self) -> usize {
        self.balls.len()
    }

    pub fn balls(&self) -> &BallCollection {
        &self.balls
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn clock(&self) -> &Clock<S> {
        &self.clock
    }
}
