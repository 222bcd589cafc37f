//! Drop-zone evaluation while an icon is dragged over the dock.

use crate::config::LayoutConfig;

use super::{Dock, DockFlags, Icon, IconKind};

fn make_icon_avoid_mouse(icon: &mut Icon, amplitude: f64) {
    icon.avoiding_mouse = true;
    icon.alpha = 0.75;
    if amplitude != 0.0 {
        let side = if icon.phase < std::f64::consts::FRAC_PI_2 {
            -1.0
        } else {
            1.0
        };
        icon.draw_x += icon.width / 2.0 * (icon.scale - 1.0) / amplitude * side;
    }
}

fn stop_marking_icon(icon: &mut Icon) {
    icon.avoiding_mouse = false;
    icon.alpha = 1.0;
    icon.draw_x = icon.x;
}

/// One pass over the ring: mark the icons flanking the pointer as avoiding
/// it when the dragged kind may land between them, clear the rest. Returns
/// whether a drop is currently acceptable.
fn check_can_drop_at(dock: &mut Dock, kind: IconKind, margin: f64, amplitude: f64) -> bool {
    let mut can_drop = false;
    let order: Vec<usize> = dock.ring().collect();
    let n = order.len();
    let mouse_x = dock.mouse_x;

    let mut pos = 0;
    while pos < n {
        let i = order[pos];
        if dock.icons[i].pointed {
            let icon = &dock.icons[i];
            if mouse_x < icon.draw_x + icon.width * icon.scale * margin {
                // left half of the pointed icon: insertion before it
                let prev = dock.prev_in_ring(i);
                if dock.icons[i].kind.group() == kind.group()
                    || dock.icons[prev].kind.group() == kind.group()
                {
                    make_icon_avoid_mouse(&mut dock.icons[i], amplitude);
                    make_icon_avoid_mouse(&mut dock.icons[prev], amplitude);
                    can_drop = true;
                }
            } else if mouse_x > icon.draw_x + icon.width * icon.scale * (1.0 - margin) {
                // right half: insertion after it; the next icon needs the
                // exact same kind here, not just the same group
                let next = dock.next_in_ring(i);
                if dock.icons[i].kind == kind || dock.icons[next].kind == kind {
                    make_icon_avoid_mouse(&mut dock.icons[i], amplitude);
                    make_icon_avoid_mouse(&mut dock.icons[next], amplitude);
                    can_drop = true;
                }
                // the next icon was handled above, skip it
                pos += 1;
                if pos >= n {
                    break;
                }
            }
        } else {
            stop_marking_icon(&mut dock.icons[i]);
        }
        pos += 1;
    }

    can_drop
}

/// Refresh `CAN_DROP` and the per-icon avoidance marks from the current
/// pointer position; a no-op on an empty dock.
pub fn check_can_drop(dock: &mut Dock, cfg: &LayoutConfig) {
    if dock.icons.is_empty() {
        return;
    }

    let can_drop = match (dock.flags.contains(DockFlags::DRAGGING), dock.avoiding_kind) {
        (true, Some(kind)) => {
            check_can_drop_at(dock, kind, cfg.avoiding_mouse_margin, cfg.amplitude)
        }
        _ => false,
    };
    dock.flags.set(DockFlags::CAN_DROP, can_drop);
}

/// Clear every avoidance mark, restoring alpha and draw positions.
pub fn stop_marking_icons(dock: &mut Dock) {
    for icon in &mut dock.icons {
        stop_marking_icon(icon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::{IdleScheduler, LayoutContext};
    use crate::geometry::{Rect, Screen};

    fn ctx() -> LayoutContext {
        LayoutContext::with_screen(LayoutConfig::default(), Screen::new(1920.0, 1080.0))
    }

    fn dock_with_kinds(kinds: &[IconKind], ctx: &LayoutContext) -> Dock {
        let mut dock = Dock::new();
        let icons = kinds
            .iter()
            .map(|&kind| Icon::new(kind, 48.0, 48.0))
            .collect();
        dock.set_icons(icons, &ctx.config);
        let mut scheduler = IdleScheduler::new();
        crate::dock::sizing::update_dock_size(&mut dock, ctx, &mut scheduler);
        dock.window = Rect::new(0.0, 0.0, dock.max_width, dock.max_height);
        dock
    }

    fn start_drag(dock: &mut Dock, kind: IconKind) {
        dock.flags.insert(DockFlags::DRAGGING);
        dock.avoiding_kind = Some(kind);
    }

    fn point_at_left_half(dock: &mut Dock, index: usize, cfg: &LayoutConfig) {
        // aim just inside the icon's left drop margin
        let target = dock.icons[index].x_at_rest + 1.0;
        dock.mouse_x = target + (dock.window.width - dock.flat_width) / 2.0;
        dock.mouse_y = dock.window.height - 10.0;
        crate::dock::pointer::calculate_dock_icons(dock, cfg);
    }

    #[test]
    fn matching_kind_between_launchers_accepts_the_drop() {
        let ctx = ctx();
        let mut dock = dock_with_kinds(
            &[IconKind::Launcher, IconKind::Launcher, IconKind::Launcher],
            &ctx,
        );
        start_drag(&mut dock, IconKind::Launcher);
        // fully grown, so the avoidance shift has a visible magnitude
        dock.magnitude_index = crate::dock::GROWTH_STEPS;
        point_at_left_half(&mut dock, 1, &ctx.config);

        check_can_drop(&mut dock, &ctx.config);
        assert!(dock.flags.contains(DockFlags::CAN_DROP));
        assert!(dock.icons[1].avoiding_mouse);
        assert!(dock.icons[0].avoiding_mouse);
        assert_eq!(dock.icons[1].alpha, 0.75);
        // the flanking icons slid apart to visualize the slot
        assert!(dock.icons[1].draw_x > dock.icons[1].x);
        assert!(dock.icons[0].draw_x < dock.icons[0].x);
    }

    #[test]
    fn mismatched_kinds_on_both_sides_refuse_the_drop() {
        let ctx = ctx();
        let mut dock = dock_with_kinds(&[IconKind::AppTask, IconKind::Applet], &ctx);
        start_drag(&mut dock, IconKind::Launcher);
        point_at_left_half(&mut dock, 1, &ctx.config);

        check_can_drop(&mut dock, &ctx.config);
        assert!(!dock.flags.contains(DockFlags::CAN_DROP));
        assert!(!dock.icons[0].avoiding_mouse);
        assert!(!dock.icons[1].avoiding_mouse);
    }

    #[test]
    fn no_drag_in_progress_clears_can_drop() {
        let ctx = ctx();
        let mut dock = dock_with_kinds(&[IconKind::Launcher, IconKind::Launcher], &ctx);
        dock.flags.insert(DockFlags::CAN_DROP);

        check_can_drop(&mut dock, &ctx.config);
        assert!(!dock.flags.contains(DockFlags::CAN_DROP));
    }

    #[test]
    fn empty_dock_is_a_no_op() {
        let ctx = ctx();
        let mut dock = Dock::new();
        start_drag(&mut dock, IconKind::Launcher);
        check_can_drop(&mut dock, &ctx.config);
        assert!(!dock.flags.contains(DockFlags::CAN_DROP));
    }

    #[test]
    fn stop_marking_restores_every_icon() {
        let ctx = ctx();
        let mut dock = dock_with_kinds(
            &[IconKind::Launcher, IconKind::Launcher, IconKind::Launcher],
            &ctx,
        );
        start_drag(&mut dock, IconKind::Launcher);
        point_at_left_half(&mut dock, 1, &ctx.config);
        check_can_drop(&mut dock, &ctx.config);
        assert!(dock.icons.iter().any(|icon| icon.avoiding_mouse));

        stop_marking_icons(&mut dock);
        for icon in &dock.icons {
            assert!(!icon.avoiding_mouse);
            assert_eq!(icon.alpha, 1.0);
            assert_eq!(icon.draw_x, icon.x);
        }
    }
}
