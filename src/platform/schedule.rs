//! Animation frame bookkeeping
//!
//! Tracks the one outstanding `requestAnimationFrame` id. A render callback
//! can restart the schedule while its own frame is still being handled, so
//! the frame loop only re-arms when nothing is pending afterwards.

/// At most one pending frame request
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameSchedule {
    pending: Option<i32>,
}

impl FrameSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending frame fired; its id is no longer valid
    pub fn begin_frame(&mut self) {
        self.pending = None;
    }

    /// Whether a new frame should be requested
    pub fn needs_request(&self, running: bool) -> bool {
        running && self.pending.is_none()
    }

    /// Record the id returned by a frame request
    pub fn armed(&mut self, id: i32) {
        if let Some(old) = self.pending.replace(id) {
            log::warn!("Frame {} replaced pending frame {}", id, old);
        }
    }

    /// Forget the pending frame, returning its id for cancellation
    pub fn cancel(&mut self) -> Option<i32> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }
}
