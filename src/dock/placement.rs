//! Window placement: from a dock size to absolute on-screen coordinates,
//! plus gap persistence and screen-space reservation.

use super::{Dock, LayoutContext};

/// Screen-edge reservation produced for a root dock in `Reserve`
/// visibility: thickness per edge plus the span it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strut {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub left_span: (i32, i32),
    pub right_span: (i32, i32),
    pub top_span: (i32, i32),
    pub bottom_span: (i32, i32),
}

/// Anchoring a sub-dock derives from its parent: alignment and persisted
/// gaps, ready to assign before sizing the sub-dock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdockAnchor {
    pub align: f64,
    pub gap_x: f64,
    pub gap_y: f64,
}

/// Position the dock window would take at the given size.
///
/// This is a stateless projection of size to position: it is used for the
/// real window, but also queried at the minimum size for input-shape and
/// reservation purposes without resizing anything.
pub fn window_position_at_balance(
    dock: &Dock,
    ctx: &LayoutContext,
    width: f64,
    height: f64,
) -> (i32, i32) {
    let cfg = &ctx.config;
    let screen = ctx.screen;

    let mut x = (screen.width - width) * dock.align + dock.gap_x;
    if !dock.is_subdock && dock.align != 0.5 {
        // blend toward the width-independent max-width position so an
        // off-center dock does not slide around as it grows
        x += (0.5 - dock.align) * (dock.max_width - width);
    }
    let mut y = if dock.direction_up {
        screen.height - height - dock.gap_y
    } else {
        dock.gap_y
    };

    if !dock.is_subdock {
        if x + width < cfg.visibility_margin {
            x = cfg.visibility_margin - width;
        } else if x > screen.width - cfg.visibility_margin {
            x = screen.width - cfg.visibility_margin;
        }
    } else if x < -dock.left_margin {
        x = -dock.left_margin;
    } else if x > screen.width - width + dock.min_right_margin {
        x = screen.width - width + dock.min_right_margin;
    }

    // never drift past the perpendicular edge by more than one icon height
    if y < -dock.max_icon_height {
        y = -dock.max_icon_height;
    } else if y > screen.height - height + dock.max_icon_height {
        y = screen.height - height + dock.max_icon_height;
    }

    (x.round() as i32, y.round() as i32)
}

/// Re-derive the persisted gaps from the window's current invariant point,
/// clamped so the dock cannot wander off-screen across resolution changes.
pub fn keep_on_screen(dock: &mut Dock, ctx: &LayoutContext) {
    let screen = ctx.screen;
    let x = dock.window.x + dock.window.width * dock.align;
    let y = if dock.direction_up {
        dock.window.y + dock.window.height
    } else {
        dock.window.y
    };

    dock.gap_x =
        (x - screen.width * dock.align).clamp(-screen.width / 2.0, screen.width / 2.0);
    let gap_y = if dock.direction_up { screen.height - y } else { y };
    dock.gap_y = gap_y.clamp(0.0, screen.height);
}

/// Strut the dock reserves at its minimum size; an empty strut when
/// `reserve` is false (used to release a previous reservation).
pub fn reserve_space(dock: &Dock, ctx: &LayoutContext, reserve: bool) -> Strut {
    let mut strut = Strut::default();
    if !reserve {
        return strut;
    }

    let width = dock.min_width;
    let height = dock.min_height;
    let (x, _) = window_position_at_balance(dock, ctx, width, height);
    let thickness = (height + dock.gap_y).round() as i32;
    let span = (x, x + width.round() as i32);

    match (dock.direction_up, dock.horizontal) {
        (true, true) => {
            strut.bottom = thickness;
            strut.bottom_span = span;
        }
        (true, false) => {
            strut.right = thickness;
            strut.right_span = span;
        }
        (false, true) => {
            strut.top = thickness;
            strut.top_span = span;
        }
        (false, false) => {
            strut.left = thickness;
            strut.left_span = span;
        }
    }
    strut
}

/// Anchor a sub-dock centered above the parent icon currently pointing at
/// it (same-orientation case).
pub fn subdock_placement(parent: &Dock, pointed: usize, ctx: &LayoutContext) -> SubdockAnchor {
    let icon = &parent.icons[pointed];
    let icon_x =
        icon.x_at_rest - (parent.flat_width - parent.max_width) / 2.0 + icon.width / 2.0;

    let mut gap_y = parent.gap_y + parent.max_height;
    if parent.magnitude_max == 0.0 {
        // a flat parent only accepts input on its minimal strip, so the
        // sub-dock hugs that strip instead of the full window
        gap_y -= parent.window.height - parent.min_height;
    }

    SubdockAnchor {
        align: 0.5,
        gap_x: icon_x + parent.window.x - ctx.screen.width / 2.0,
        gap_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::dock::{Icon, IconKind, IdleScheduler};
    use crate::geometry::{Rect, Screen};

    fn ctx() -> LayoutContext {
        LayoutContext::with_screen(LayoutConfig::default(), Screen::new(1920.0, 1080.0))
    }

    #[test]
    fn centered_root_dock_balances_exactly() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.gap_x = 12.0;
        dock.gap_y = 0.0;
        dock.max_icon_height = 48.0;

        let (x, y) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        assert_eq!(x, ((1920.0 - 400.0) / 2.0 + 12.0) as i32);
        assert_eq!(y, (1080.0 - 60.0) as i32);
    }

    #[test]
    fn off_center_root_dock_blends_toward_max_width_position() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.align = 0.0;
        dock.max_width = 600.0;
        dock.max_icon_height = 48.0;

        let (x, _) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        // base 0 plus the (0.5 - align) * (max - w) re-centering term
        assert_eq!(x, (0.5 * (600.0 - 400.0)) as i32);
    }

    #[test]
    fn root_dock_keeps_the_visibility_margin_on_screen() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.max_icon_height = 48.0;
        dock.max_width = 400.0;

        dock.gap_x = -5000.0;
        let (x, _) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        assert_eq!(x, (ctx.config.visibility_margin - 400.0) as i32);

        dock.gap_x = 5000.0;
        let (x, _) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        assert_eq!(x, (1920.0 - ctx.config.visibility_margin) as i32);
    }

    #[test]
    fn subdock_clamps_against_caller_margins() {
        let ctx = ctx();
        let mut dock = Dock::subdock();
        dock.left_margin = 30.0;
        dock.min_right_margin = 10.0;
        dock.max_icon_height = 48.0;

        dock.gap_x = -5000.0;
        let (x, _) = window_position_at_balance(&dock, &ctx, 200.0, 60.0);
        assert_eq!(x, -30);

        dock.gap_x = 5000.0;
        let (x, _) = window_position_at_balance(&dock, &ctx, 200.0, 60.0);
        assert_eq!(x, (1920.0 - 200.0 + 10.0) as i32);
    }

    #[test]
    fn vertical_drift_is_capped_at_one_icon_height() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.max_icon_height = 48.0;

        dock.gap_y = 5000.0;
        let (_, y) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        assert_eq!(y, -48);

        dock.gap_y = -5000.0;
        let (_, y) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        assert_eq!(y, (1080.0 - 60.0 + 48.0) as i32);
    }

    #[test]
    fn keep_on_screen_makes_gaps_reproduce_the_position() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.max_icon_height = 48.0;
        dock.max_width = 400.0;
        dock.window = Rect::new(700.0, 1020.0, 400.0, 60.0);

        keep_on_screen(&mut dock, &ctx);
        let (x, y) = window_position_at_balance(&dock, &ctx, 400.0, 60.0);
        assert_eq!(x, 700);
        assert_eq!(y, 1020);
    }

    #[test]
    fn keep_on_screen_clamps_runaway_gaps() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.window = Rect::new(-30000.0, -500.0, 400.0, 60.0);

        keep_on_screen(&mut dock, &ctx);
        assert_eq!(dock.gap_x, -1920.0 / 2.0);
        assert_eq!(dock.gap_y, 1080.0);
    }

    #[test]
    fn bottom_dock_reserves_a_bottom_strut() {
        let ctx = ctx();
        let mut dock = Dock::new();
        dock.set_icons(vec![Icon::new(IconKind::Launcher, 48.0, 48.0)], &ctx.config);
        let mut scheduler = IdleScheduler::new();
        crate::dock::sizing::update_dock_size(&mut dock, &ctx, &mut scheduler);

        let strut = reserve_space(&dock, &ctx, true);
        assert_eq!(strut.bottom, (dock.min_height + dock.gap_y) as i32);
        assert_eq!(strut.top, 0);
        let (start, end) = strut.bottom_span;
        assert!(end - start >= dock.min_width as i32);

        assert_eq!(reserve_space(&dock, &ctx, false), Strut::default());
    }

    #[test]
    fn subdock_anchors_over_the_pointed_icon() {
        let ctx = ctx();
        let mut parent = Dock::new();
        parent.set_icons(
            vec![
                Icon::new(IconKind::Launcher, 48.0, 48.0),
                Icon::new(IconKind::Launcher, 48.0, 48.0),
            ],
            &ctx.config,
        );
        let mut scheduler = IdleScheduler::new();
        crate::dock::sizing::update_dock_size(&mut parent, &ctx, &mut scheduler);
        parent.window = Rect::new(900.0, 980.0, parent.max_width, parent.max_height);

        let anchor = subdock_placement(&parent, 1, &ctx);
        assert_eq!(anchor.align, 0.5);
        assert_eq!(anchor.gap_y, parent.gap_y + parent.max_height);

        // a flat parent pulls the sub-dock down to its minimal strip
        parent.magnitude_max = 0.0;
        let anchor = subdock_placement(&parent, 1, &ctx);
        assert_eq!(
            anchor.gap_y,
            parent.gap_y + parent.max_height - (parent.window.height - parent.min_height)
        );
    }
}
