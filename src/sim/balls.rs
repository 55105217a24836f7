//! Ball storage
//!
//! Balls are stored as five parallel columns (x, y, vx, vy, radius) rather
//! than a `Vec<Ball>`, so hosts can hand each column to a renderer as a flat
//! `f32` array. A ball's identity is its index, and the count never changes
//! after construction.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::config::{SimConfig, VelocityMode};
use crate::error::SimError;
use crate::polar_to_cartesian;

/// One row of the collection, copied out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }
}

/// Column identifiers, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    X,
    Y,
    Vx,
    Vy,
    Radius,
}

impl Column {
    /// Fixed column order of the exported layout
    pub const ALL: [Column; 5] = [Column::X, Column::Y, Column::Vx, Column::Vy, Column::Radius];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::X => "x",
            Column::Y => "y",
            Column::Vx => "vx",
            Column::Vy => "vy",
            Column::Radius => "radius",
        }
    }
}

/// Fixed-count struct-of-arrays ball store
#[derive(Debug, Clone, PartialEq)]
pub struct BallCollection {
    x: Vec<f32>,
    y: Vec<f32>,
    vx: Vec<f32>,
    vy: Vec<f32>,
    radius: Vec<f32>,
}

/// Mutable borrow of every column at once, for the per-tick passes
pub(crate) struct ColumnsMut<'a> {
    pub x: &'a mut [f32],
    pub y: &'a mut [f32],
    pub vx: &'a mut [f32],
    pub vy: &'a mut [f32],
    pub radius: &'a [f32],
}

impl BallCollection {
    /// Reserve `count` zeroed rows, reporting allocation failure
    fn allocate(count: usize) -> Result<Self, SimError> {
        fn column(count: usize) -> Result<Vec<f32>, SimError> {
            let mut col = Vec::new();
            col.try_reserve_exact(count)
                .map_err(|_| SimError::Allocation { count })?;
            col.resize(count, 0.0);
            Ok(col)
        }

        Ok(Self {
            x: column(count)?,
            y: column(count)?,
            vx: column(count)?,
            vy: column(count)?,
            radius: column(count)?,
        })
    }

    /// Create `config.ball_count` balls with random size, placement and velocity.
    ///
    /// Each ball draws, in order: radius, x, y, speed, direction. Balls start
    /// fully inside the viewport but may overlap each other.
    pub fn initialize<R: Rng>(
        config: &SimConfig,
        viewport: &Viewport,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let mut balls = Self::allocate(config.ball_count)?;

        let width = viewport.right();
        let height = viewport.bottom();
        let speed_span = config.speed_span();

        for i in 0..config.ball_count {
            let radius = rng.random::<f32>() * config.radius_span() + config.min_radius;
            let x = rng.random::<f32>() * (width - radius * 2.0) + radius;
            let y = rng.random::<f32>() * (height - radius * 2.0) + radius;
            let speed = rng.random::<f32>() * speed_span + config.min_speed;
            let dir = rng.random::<f32>() * std::f32::consts::TAU;

            let vel = match config.velocity_mode {
                VelocityMode::Literal => Vec2::new(
                    dir.cos() * speed_span + config.min_speed,
                    dir.sin() * speed_span + config.min_speed,
                ),
                VelocityMode::Polar => polar_to_cartesian(speed, dir),
            };

            balls.x[i] = x;
            balls.y[i] = y;
            balls.vx[i] = vel.x;
            balls.vy[i] = vel.y;
            balls.radius[i] = radius;
        }

        Ok(balls)
    }

    /// Build a collection from explicit rows
    pub fn from_balls(rows: &[Ball]) -> Result<Self, SimError> {
        if rows.is_empty() {
            return Err(SimError::InvalidConfig("ball collection cannot be empty".into()));
        }
        let mut balls = Self::allocate(rows.len())?;
        for (i, ball) in rows.iter().enumerate() {
            balls.x[i] = ball.pos.x;
            balls.y[i] = ball.pos.y;
            balls.vx[i] = ball.vel.x;
            balls.vy[i] = ball.vel.y;
            balls.radius[i] = ball.radius;
        }
        Ok(balls)
    }

    /// Number of balls (fixed)
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false for a constructed collection
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Ball> {
        (i < self.len()).then(|| Ball {
            pos: Vec2::new(self.x[i], self.y[i]),
            vel: Vec2::new(self.vx[i], self.vy[i]),
            radius: self.radius[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Ball> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// Read-only view over all columns
    pub fn view(&self) -> BallsView<'_> {
        BallsView {
            x: &self.x,
            y: &self.y,
            vx: &self.vx,
            vy: &self.vy,
            radius: &self.radius,
        }
    }

    /// Split mutable borrow of the columns. Radius stays read-only.
    pub(crate) fn columns_mut(&mut self) -> ColumnsMut<'_> {
        ColumnsMut {
            x: &mut self.x,
            y: &mut self.y,
            vx: &mut self.vx,
            vy: &mut self.vy,
            radius: &self.radius,
        }
    }
}

/// Read-only view handed to renderers between ticks
#[derive(Debug, Clone, Copy)]
pub struct BallsView<'a> {
    pub x: &'a [f32],
    pub y: &'a [f32],
    pub vx: &'a [f32],
    pub vy: &'a [f32],
    pub radius: &'a [f32],
}

impl<'a> BallsView<'a> {
    pub fn count(&self) -> usize {
        self.x.len()
    }

    pub fn column(&self, column: Column) -> &'a [f32] {
        match column {
            Column::X => self.x,
            Column::Y => self.y,
            Column::Vx => self.vx,
            Column::Vy => self.vy,
            Column::Radius => self.radius,
        }
    }

    /// Raw native-endian bytes of a column, for zero-copy export
    pub fn column_bytes(&self, column: Column) -> &'a [u8] {
        bytemuck::cast_slice(self.column(column))
    }
}
