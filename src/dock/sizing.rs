//! Auto-fit sizing: converge the dock ratio so the maximal footprint
//! respects the authorized width and the screen height.

use tracing::{debug, warn};

use crate::config::LayoutConfig;

use super::scheduler::IdleScheduler;
use super::{input_shape, placement, rest, wave, Dock, Visibility};

/// Hard bound on the ratio-convergence loop; a configuration that still
/// oscillates after this many rounds is accepted as final.
const MAX_SIZING_ITERATIONS: u32 = 8;

/// Width ceiling the dock may occupy on screen.
pub fn max_authorized_width(dock: &Dock, ctx: &super::LayoutContext) -> f64 {
    if dock.is_subdock {
        (ctx.screen.width - dock.left_margin).max(0.0)
    } else {
        ctx.screen.width
    }
}

/// Recompute rest positions, the max-width sweep and the four derived dock
/// sizes from the current icon dimensions.
fn compute_size(dock: &mut Dock, cfg: &LayoutConfig) {
    dock.first_drawn =
        rest::compute_rest_positions(&mut dock.icons, dock.flat_width, 0.0, cfg.icon_gap)
            .unwrap_or(0);
    let extra = 2.0 * cfg.frame_margin + cfg.line_width;
    dock.max_width = wave::max_dock_width_sweep(dock, cfg);
    dock.max_height = cfg.line_width
        + cfg.frame_margin
        + (1.0 + cfg.amplitude * dock.magnitude_max) * dock.max_icon_height;
    dock.min_width = dock.flat_width + extra;
    dock.min_height = cfg.line_width + cfg.frame_margin + dock.max_icon_height;
}

/// Re-derive `ratio` and the max/min dock sizes after any icon-set mutation
/// or configuration change.
///
/// Icons' `width`/`height` come out holding ratio-applied dimensions
/// consistent with the final sizes, the icons are re-laid out, the input
/// shape is rebuilt, and a coalesced window move/resize is scheduled when
/// the footprint changed. Returns the refreshed strut when a root dock in
/// `Reserve` visibility changed height.
pub fn update_dock_size(
    dock: &mut Dock,
    ctx: &super::LayoutContext,
    scheduler: &mut IdleScheduler,
) -> Option<placement::Strut> {
    let cfg = &ctx.config;
    let prev_max_width = dock.max_width;
    let prev_max_height = dock.max_height;

    // restore reference dimensions, otherwise the sweep would measure an
    // already-shrunk dock
    if dock.ratio != 0.0 {
        for icon in &mut dock.icons {
            icon.width /= dock.ratio;
            icon.height /= dock.ratio;
        }
        dock.ratio = 1.0;
        dock.refresh_flat_metrics(cfg);
    }
    compute_size(dock, cfg);

    let mut hmax = dock.max_icon_height;
    let authorized_width = max_authorized_width(dock, ctx);
    let mut n = 0;
    loop {
        let prev_ratio = dock.ratio;

        if dock.max_width > authorized_width {
            dock.ratio *= authorized_width / dock.max_width;
        } else {
            let max_ratio = if dock.is_subdock {
                cfg.subdock_size_ratio
            } else {
                1.0
            };
            if dock.ratio < max_ratio {
                dock.ratio = (dock.ratio * authorized_width / dock.max_width).min(max_ratio);
            } else {
                dock.ratio = max_ratio;
            }
        }

        if dock.max_height > ctx.screen.height {
            dock.ratio = dock
                .ratio
                .min(prev_ratio * ctx.screen.height / dock.max_height);
        }

        if prev_ratio != dock.ratio {
            let factor = dock.ratio / prev_ratio;
            for icon in &mut dock.icons {
                icon.width *= factor;
                icon.height *= factor;
            }
            dock.refresh_flat_metrics(cfg);
            hmax *= factor;
            compute_size(dock, cfg);
        }

        n += 1;
        let unsatisfied = dock.max_width > authorized_width
            || dock.max_height > ctx.screen.height
            || (dock.ratio < 1.0 && dock.max_width < authorized_width - 5.0);
        if !unsatisfied || n >= MAX_SIZING_ITERATIONS {
            break;
        }
    }
    if dock.max_width > authorized_width || dock.max_height > ctx.screen.height {
        warn!(
            max_width = dock.max_width,
            max_height = dock.max_height,
            authorized_width,
            "dock sizing did not converge within {MAX_SIZING_ITERATIONS} iterations"
        );
    }
    dock.max_icon_height = hmax;
    debug!(
        ratio = dock.ratio,
        max_width = dock.max_width,
        max_height = dock.max_height,
        flat_width = dock.flat_width,
        iterations = n,
        "dock sizing settled"
    );

    // sizing altered every layout input, re-resolve the icons
    wave::apply_wave(dock, cfg);
    input_shape::update_input_shape(dock);

    if prev_max_width != dock.max_width || prev_max_height != dock.max_height {
        scheduler.request_move_resize();
    }

    if !dock.is_subdock
        && dock.visibility == Visibility::Reserve
        && prev_max_height != dock.max_height
    {
        Some(placement::reserve_space(dock, ctx, true))
    } else {
        None
    }
}
