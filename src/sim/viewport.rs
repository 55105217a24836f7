//! Rectangular simulation bounds

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Bounds used for initial placement and wall reflection.
///
/// Origin is the top-left corner; both dimensions are positive. A viewport is
/// only ever replaced as a whole, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width as a float, for comparison against positions
    #[inline]
    pub fn right(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float, for comparison against positions
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.height as f32
    }
}
