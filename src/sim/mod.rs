//! Ball simulation module
//!
//! All physics lives here. This module must stay pure:
//! - Randomness and wall-clock time are injected
//! - Stable iteration order (by ball index)
//! - No rendering or platform dependencies

pub mod balls;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;
pub mod viewport;

pub use balls::{Ball, BallCollection, BallsView, Column};
pub use clock::{Clock, TimeSource, Timestamp};
pub use collision::{hits_wall, overlap_push, reflect_off_walls, resolve_ball_collisions};
pub use state::{Simulation, Snapshot};
pub use tick::{StepOptions, integrate, step};
pub use viewport::Viewport;
