//! Per-tick physics update
//!
//! One tick is a fixed pipeline of three full passes over the balls:
//! ball-ball collision response, integration, wall reflection. A pass never
//! starts before the previous one has finished for every ball.

use super::balls::BallCollection;
use super::collision::{reflect_off_walls, resolve_ball_collisions};
use super::viewport::Viewport;

/// Collision options that affect a tick
#[derive(Debug, Clone, Copy)]
pub struct StepOptions {
    pub skip_coincident: bool,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            skip_coincident: true,
        }
    }
}

/// Pass 2: move every ball along its velocity
pub fn integrate(balls: &mut BallCollection, dt: f32) {
    let cols = balls.columns_mut();
    for i in 0..cols.x.len() {
        cols.x[i] += cols.vx[i] * dt;
        cols.y[i] += cols.vy[i] * dt;
    }
}

/// Advance the balls by `dt` seconds
pub fn step(balls: &mut BallCollection, viewport: &Viewport, dt: f32, options: StepOptions) {
    resolve_ball_collisions(balls, options.skip_coincident);
    integrate(balls, dt);
    reflect_off_walls(balls, viewport);
}
