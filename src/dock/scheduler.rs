//! Deferred window work: coalesced move/resize requests and the delayed
//! sub-dock leave.

use std::time::{Duration, Instant};

use tracing::trace;

use super::{placement, Dock, LayoutContext};

/// A window operation the host should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    MoveResize { x: i32, y: i32, width: i32, height: i32 },
}

/// Single-slot scheduler for work that must run at most once per idle
/// cycle, however many times it was requested in between.
#[derive(Debug, Default)]
pub struct IdleScheduler {
    move_resize_pending: bool,
    leave_deadline: Option<Instant>,
}

impl IdleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the move/resize slot; repeated calls coalesce into one request.
    pub fn request_move_resize(&mut self) {
        self.move_resize_pending = true;
    }

    pub fn has_pending_move_resize(&self) -> bool {
        self.move_resize_pending
    }

    /// Consume the pending move/resize, if any, resolving it against the
    /// dock's current maximal size.
    ///
    /// The slot is cleared before the geometry is computed, so a handler
    /// that re-arms the scheduler gets a fresh cycle instead of losing its
    /// request.
    pub fn drain(&mut self, dock: &Dock, ctx: &LayoutContext) -> Option<WindowRequest> {
        if !self.move_resize_pending {
            return None;
        }
        self.move_resize_pending = false;

        let width = dock.max_width;
        let height = dock.max_height;
        let (x, y) = placement::window_position_at_balance(dock, ctx, width, height);
        let request = if dock.horizontal {
            WindowRequest::MoveResize {
                x,
                y,
                width: width.round() as i32,
                height: height.round() as i32,
            }
        } else {
            WindowRequest::MoveResize {
                x: y,
                y: x,
                width: height.round() as i32,
                height: width.round() as i32,
            }
        };
        trace!(?request, "draining window request");
        Some(request)
    }

    /// Arm the delayed leave, keeping an earlier deadline if one is already
    /// pending.
    pub fn schedule_leave(&mut self, delay_ms: u64, now: Instant) {
        if self.leave_deadline.is_none() {
            self.leave_deadline = Some(now + Duration::from_millis(delay_ms));
        }
    }

    /// Disarm the delayed leave; the pointer came back in time.
    pub fn cancel_leave(&mut self) {
        self.leave_deadline = None;
    }

    pub fn leave_pending(&self) -> bool {
        self.leave_deadline.is_some()
    }

    /// True exactly once, when the armed deadline has elapsed.
    pub fn poll_leave(&mut self, now: Instant) -> bool {
        match self.leave_deadline {
            Some(deadline) if now >= deadline => {
                self.leave_deadline = None;
                true
            }
            _ => false,
        }
    }
}
