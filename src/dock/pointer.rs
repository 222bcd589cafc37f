//! Pointer-zone classification and the reactions it drives: growing,
//! shrinking and enter/leave emulation.

use std::time::Instant;

use tracing::trace;

use crate::config::LayoutConfig;

use super::scheduler::IdleScheduler;
use super::{wave, Dock, DockFlags, InputState, GROWTH_STEPS};

/// Where the pointer sits relative to the dock's useful area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MousePosition {
    Inside,
    /// Inside the window but off the icon band; the dock should deflate
    /// without emitting a leave.
    OnEdge,
    #[default]
    Outside,
}

/// Reactions the host is expected to translate into widget events or
/// animation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockSignal {
    /// Emulate an enter-notify on the dock window.
    Enter,
    /// Emulate a leave-notify on the dock window.
    Leave,
    StartGrowing,
    StartShrinking,
    /// Begin sliding an auto-hidden dock back on screen.
    StartShowing,
}

/// Classify the pointer against the flat band, store the result on the
/// dock and return it.
///
/// A permanently flat dock only counts its minimal strip as "inside"
/// vertically; the window may be taller than what it visually occupies.
pub fn classify_pointer(dock: &mut Dock) -> MousePosition {
    let width = dock.window.width;
    let height = if dock.magnitude_max != 0.0 {
        dock.window.height
    } else {
        dock.min_height
    };
    let mouse_x = dock.mouse_x;
    let mouse_y = if dock.direction_up {
        dock.window.height - dock.mouse_y
    } else {
        dock.mouse_y
    };

    let x_abs = mouse_x + (dock.flat_width - width) / 2.0;
    let inside_x =
        x_abs >= 0.0 && x_abs <= dock.flat_width && mouse_x > 0.0 && mouse_x < width;

    let position = if !inside_x {
        if dock.auto_hide {
            // leaving right after entering an auto-hidden dock is too
            // punishing, keep it deployed
            MousePosition::Inside
        } else {
            let side_margin = (dock.align - 0.5).abs() * (width - dock.flat_width);
            if x_abs < -side_margin || x_abs > dock.flat_width + side_margin {
                MousePosition::Outside
            } else {
                MousePosition::OnEdge
            }
        }
    } else if mouse_y >= 0.0 && mouse_y < height {
        MousePosition::Inside
    } else {
        MousePosition::Outside
    };

    dock.mouse_position = position;
    position
}

/// Act on the stored pointer position: decide whether the dock should
/// grow, shrink, or emulate an enter/leave, honoring the input state and
/// the sub-dock leave delay.
pub fn react_to_position(
    dock: &mut Dock,
    cfg: &LayoutConfig,
    scheduler: &mut IdleScheduler,
    now: Instant,
) -> Vec<DockSignal> {
    let mut signals = Vec::new();
    match dock.mouse_position {
        MousePosition::Inside => {
            // the pointer came back: a leave armed during the excursion no
            // longer applies
            scheduler.cancel_leave();
            let needs_growth = (dock.magnitude_index < GROWTH_STEPS && !dock.is_growing())
                || dock.is_shrinking();
            if dock.entrance_disabled
                || !needs_growth
                || dock.input_state == InputState::Hidden
                || (dock.input_state == InputState::AtRest
                    && !dock.flags.contains(DockFlags::DRAGGING))
            {
                return signals;
            }
            // a sub-dock only reacts once its parent actually sent it an
            // enter event
            if dock.is_subdock && !dock.flags.contains(DockFlags::INSIDE) {
                return signals;
            }
            if (dock.magnitude_index == 0 && !dock.is_subdock && !dock.auto_hide)
                || !dock.flags.contains(DockFlags::INSIDE)
            {
                trace!("emulating an enter event");
                signals.push(DockSignal::Enter);
            } else {
                dock.start_growing();
                signals.push(DockSignal::StartGrowing);
                if dock.auto_hide && !dock.is_subdock {
                    signals.push(DockSignal::StartShowing);
                }
            }
        }
        MousePosition::OnEdge => {
            if dock.magnitude_index > 0 && !dock.is_growing() {
                dock.start_shrinking();
                signals.push(DockSignal::StartShrinking);
            }
        }
        MousePosition::Outside => {
            if !dock.is_growing()
                && !dock.is_shrinking()
                && !scheduler.leave_pending()
                && dock.magnitude_index > 0
                && !dock.flags.contains(DockFlags::ICON_FLYING)
            {
                if dock.is_subdock && cfg.leave_subdock_delay_ms > 0 {
                    scheduler.schedule_leave(cfg.leave_subdock_delay_ms, now);
                } else {
                    trace!("emulating a leave event");
                    signals.push(DockSignal::Leave);
                }
            }
        }
    }
    signals
}

/// Full per-pointer-move layout pass: resolve the wave, classify the
/// pointer, and return the pointed icon only while the pointer is truly
/// inside.
pub fn calculate_dock_icons(dock: &mut Dock, cfg: &LayoutConfig) -> Option<usize> {
    let pointed = wave::apply_wave(dock, cfg);
    let position = classify_pointer(dock);
    if position == MousePosition::Inside {
        pointed
    } else {
        None
    }
}
