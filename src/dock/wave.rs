//! The magnification wave: continuous recomputation of every icon's scale
//! and position as a function of pointer distance.
//!
//! Positions are never computed independently: the pointed icon is anchored
//! under the cursor, then neighbors are resolved sequentially outward
//! (forward from the ring anchor, backward from the pointed icon), so icons
//! cannot overlap whatever their scales. The traversal is two bounded loops
//! over the materialized ring order rather than a linked-list walk.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::LayoutConfig;

use super::{Dock, Icon};

/// Run one wave pass over the icon ring.
///
/// `x_abs` is the pointer abscissa in the flat frame (0 at the left edge of
/// the minimal dock). `width`/`height` are the current window dimensions;
/// a zero width marks the synthetic sweep used to size the dock, which
/// disables pointer clamping and the neighbor-bound constraints. Returns the
/// index of the pointed icon: the icon whose span contains `x_abs`, or the
/// nearest ring end when the pointer is beyond the row.
#[allow(clippy::too_many_arguments)]
pub fn compute_wave(
    icons: &mut [Icon],
    first_drawn: usize,
    x_abs: f64,
    magnitude: f64,
    flat_width: f64,
    width: f64,
    height: f64,
    align: f64,
    folding_factor: f64,
    direction_up: bool,
    cfg: &LayoutConfig,
) -> Option<usize> {
    let n = icons.len();
    if n == 0 {
        return None;
    }

    // keep the pointer inside the flat frame while the dock is displayed,
    // otherwise icons shrink away too fast when leaving through the sides
    let mut x_abs = x_abs;
    if width > 0.0 {
        x_abs = x_abs.clamp(0.0, flat_width);
    }

    let first_drawn = first_drawn % n;
    let order: Vec<usize> = (0..n).map(|i| (first_drawn + i) % n).collect();

    // position in `order` of the pointed icon; left of the whole row, the
    // anchor itself plays that role
    let mut pointed_pos: Option<usize> = if x_abs < 0.0 { Some(0) } else { None };
    let mut offset = 0.0;
    let mut x_cumulated = 0.0;

    for (pos, &i) in order.iter().enumerate() {
        let w_i = icons[i].width;
        x_cumulated = icons[i].x_at_rest;
        let x_middle = x_cumulated + w_i / 2.0;

        // phase is π/2 under the cursor and saturates at the sinusoid ends
        let phase = ((x_middle - x_abs) / cfg.sinusoid_width * PI + FRAC_PI_2).clamp(0.0, PI);
        icons[i].phase = phase;
        let mut scale = 1.0 + magnitude * cfg.amplitude * phase.sin();
        let flat_scale = scale;

        let factor = icons[i].insert_remove_factor;
        if width > 0.0 && factor != 0.0 {
            if factor > 0.0 {
                scale *= factor;
            } else {
                scale *= 1.0 + factor;
            }
        }
        icons[i].scale = scale;

        icons[i].y = if direction_up {
            height - cfg.line_width - cfg.frame_margin - scale * icons[i].height
        } else {
            cfg.line_width + cfg.frame_margin
        };

        if pointed_pos.is_some() {
            if pos == 0 {
                // pointer is off the left edge; the anchor starts the row flat
                icons[i].x = x_cumulated - (flat_width - width) / 2.0;
            } else {
                let prev = order[pos - 1];
                let mut x = icons[prev].x + (icons[prev].width + cfg.icon_gap) * icons[prev].scale;

                // clamp rightward growth against the recorded extremal bound
                let slack = cfg.amplitude * magnitude * (w_i + 1.5 * cfg.icon_gap);
                if x + w_i * scale > icons[i].x_max - slack / 8.0 && width != 0.0 {
                    let delta = x + w_i * scale - (icons[i].x_max - slack / 16.0);
                    if cfg.amplitude != 0.0 {
                        x -= delta * (1.0 - (scale - 1.0) / cfg.amplitude) * magnitude;
                    }
                }
                icons[i].x = x;
            }
            icons[i].x = align * width + (icons[i].x - align * width) * (1.0 - folding_factor);
        }

        let spans_pointer = pointed_pos.is_none()
            && x_cumulated + w_i + 0.5 * cfg.icon_gap >= x_abs
            && x_cumulated - 0.5 * cfg.icon_gap <= x_abs;
        if spans_pointer {
            pointed_pos = Some(pos);
            // a pointer parked exactly on the row ends points at nothing
            icons[i].pointed = x_abs != 0.0 && x_abs != flat_width;
            // fractional offset keeping the cursor visually centered on the
            // icon as it grows
            let x = x_cumulated - (flat_width - width) / 2.0
                + (1.0 - scale) * (x_abs - x_cumulated + 0.5 * cfg.icon_gap);
            icons[i].x = align * width + (x - align * width) * (1.0 - folding_factor);
        } else {
            icons[i].pointed = false;
        }

        // net width change of the transient, to be redistributed so the
        // neighbors are not pushed around by an appearing/vanishing icon
        if width > 0.0 && factor != 0.0 {
            let sign = if pointed_pos.is_none() { 1.0 } else { -1.0 };
            if pointed_pos != Some(pos) {
                offset += w_i * (flat_scale - scale) * sign;
            } else {
                offset += 2.0 * (x_middle - x_abs) * (flat_scale - scale) * sign;
            }
        }
    }

    let pointed_pos = match pointed_pos {
        Some(pos) => pos,
        None => {
            // pointer right of every icon: the ring's last element anchors
            // the backward pass
            let pos = n - 1;
            let i = order[pos];
            let x = x_cumulated - (flat_width - width) / 2.0
                + (1.0 - icons[i].scale) * (icons[i].width + 0.5 * cfg.icon_gap);
            icons[i].x = align * width + (x - align * width) * (1.0 - folding_factor);
            pos
        }
    };

    // resolve icons left of the pointed one, walking the ring backwards
    let mut pos = pointed_pos;
    while pos != 0 {
        let cur = order[pos];
        let prev = order[pos - 1];
        let mut x = icons[cur].x - (icons[prev].width + cfg.icon_gap) * icons[prev].scale;

        let slack = cfg.amplitude * magnitude * (icons[prev].width + 1.5 * cfg.icon_gap);
        // 'magnitude > 0' avoids a small jump from the constraints left of
        // the pointed icon when the dock is flat
        if x < icons[prev].x_min + slack / 8.0 && width != 0.0 && x_abs < width && magnitude > 0.0 {
            let delta = x - (icons[prev].x_min + slack / 16.0);
            if cfg.amplitude != 0.0 {
                x -= delta * (1.0 - (icons[prev].scale - 1.0) / cfg.amplitude) * magnitude;
            }
        }
        icons[prev].x = align * width + (x - align * width) * (1.0 - folding_factor);
        pos -= 1;
    }

    // half of the transient's net width change re-centers the whole row;
    // this only partially cancels the visual push on neighbors, which is
    // the historical behavior this engine preserves
    let half_offset = offset / 2.0;
    for icon in icons.iter_mut() {
        if half_offset != 0.0 {
            icon.x -= half_offset;
        }
        icon.draw_x = icon.x;
    }

    Some(order[pointed_pos])
}

/// Wave pass driven by the dock's live pointer position and animation state.
pub fn apply_wave(dock: &mut Dock, cfg: &LayoutConfig) -> Option<usize> {
    let dx = dock.mouse_x - dock.window.width / 2.0;
    let x_abs = dx + dock.flat_width / 2.0;
    let magnitude = dock.effective_magnitude();
    compute_wave(
        &mut dock.icons,
        dock.first_drawn,
        x_abs,
        magnitude,
        dock.flat_width,
        dock.window.width,
        dock.window.height,
        dock.align,
        dock.folding_factor,
        dock.direction_up,
        cfg,
    )
}

/// Frame width needed to hold the whole dock at its peak magnitude.
///
/// Simulates the pointer sweeping across the flat width, records every
/// icon's extremal positions into `x_min`/`x_max`, and returns the maximal
/// bounding width. Afterwards the recorded bounds are recentered on the
/// result and icons are reset to their rest positions.
pub fn max_dock_width_sweep(dock: &mut Dock, cfg: &LayoutConfig) -> f64 {
    let extra = 2.0 * cfg.frame_margin + cfg.line_width;
    if dock.icons.is_empty() {
        return extra;
    }

    for icon in &mut dock.icons {
        icon.x_max = -1e4;
        icon.x_min = 1e4;
    }

    let order: Vec<usize> = dock.ring().collect();
    let probes: Vec<f64> = dock
        .icons
        .iter()
        .map(|icon| icon.x_at_rest)
        .chain(std::iter::once(dock.flat_width - 1.0))
        .collect();
    for (k, &x_abs) in probes.iter().enumerate() {
        // the last probe runs with the dock's own alignment, like a live pass
        let align = if k + 1 == probes.len() { dock.align } else { 0.5 };
        compute_wave(
            &mut dock.icons,
            dock.first_drawn,
            x_abs,
            dock.magnitude_max,
            dock.flat_width,
            0.0,
            0.0,
            align,
            0.0,
            dock.direction_up,
            cfg,
        );
        for &i in &order {
            let icon = &mut dock.icons[i];
            icon.x_max = icon.x_max.max(icon.x + icon.width * icon.scale);
            icon.x_min = icon.x_min.min(icon.x);
        }
    }

    let span = dock.icons[order[order.len() - 1]].x_max - dock.icons[order[0]].x_min;
    let max_width = (span + extra).ceil() + 1.0;

    for icon in &mut dock.icons {
        icon.x_min += max_width / 2.0;
        icon.x_max += max_width / 2.0;
        icon.x = icon.x_at_rest;
        icon.draw_x = icon.x;
        icon.scale = 1.0;
    }

    max_width
}

/// Width currently covered by the drawn icons, frame margins included.
pub fn current_width(dock: &Dock, cfg: &LayoutConfig) -> f64 {
    let mut ring = dock.ring();
    let Some(first) = ring.next() else {
        // empty dock degrades to a margins-only footprint
        return 1.0 + 2.0 * cfg.frame_margin;
    };
    let last = ring.last().unwrap_or(first);
    let (first, last) = (&dock.icons[first], &dock.icons[last]);
    last.x - first.x + last.width * last.scale + 2.0 * cfg.frame_margin
}
