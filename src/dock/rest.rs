//! Equilibrium ("at rest") icon positions.

use super::Icon;

/// Fill every icon's `x_at_rest` by cumulative summation of
/// `width + icon_gap`, wrapping positions whose midpoint falls outside
/// `[0, flat_width]` back into range so the sequence behaves as a ring.
/// Returns the index of the width-minimal position, which becomes the wrap
/// anchor for the wave traversal; `None` on an empty set.
pub fn compute_rest_positions(
    icons: &mut [Icon],
    flat_width: f64,
    x_offset: f64,
    icon_gap: f64,
) -> Option<usize> {
    let mut x_cumulated = x_offset;
    let mut x_min = f64::INFINITY;
    let mut first_drawn = None;

    for (i, icon) in icons.iter_mut().enumerate() {
        if x_cumulated + icon.width / 2.0 < 0.0 {
            icon.x_at_rest = x_cumulated + flat_width;
        } else if x_cumulated + icon.width / 2.0 > flat_width {
            icon.x_at_rest = x_cumulated - flat_width;
        } else {
            icon.x_at_rest = x_cumulated;
        }

        if icon.x_at_rest < x_min {
            x_min = icon.x_at_rest;
            first_drawn = Some(i);
        }

        x_cumulated += icon.width + icon_gap;
    }

    first_drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::{Icon, IconKind};

    fn icons(widths: &[f64]) -> Vec<Icon> {
        widths
            .iter()
            .map(|&w| Icon::new(IconKind::Launcher, w, w))
            .collect()
    }

    #[test]
    fn empty_set_has_no_anchor() {
        assert_eq!(compute_rest_positions(&mut [], 0.0, 0.0, 4.0), None);
    }

    #[test]
    fn cumulative_positions_without_offset() {
        let mut icons = icons(&[48.0, 48.0, 48.0]);
        let flat = 3.0 * 48.0 + 2.0 * 4.0;
        let anchor = compute_rest_positions(&mut icons, flat, 0.0, 4.0);
        assert_eq!(anchor, Some(0));
        assert_eq!(icons[0].x_at_rest, 0.0);
        assert_eq!(icons[1].x_at_rest, 52.0);
        assert_eq!(icons[2].x_at_rest, 104.0);
    }

    #[test]
    fn offset_wraps_overflowing_icons_and_moves_anchor() {
        let mut icons = icons(&[48.0, 48.0, 48.0]);
        let flat = 3.0 * 48.0 + 2.0 * 4.0; // 152
        // push the last icon's midpoint past the right edge
        let anchor = compute_rest_positions(&mut icons, flat, 60.0, 4.0);
        assert_eq!(icons[0].x_at_rest, 60.0);
        assert_eq!(icons[1].x_at_rest, 112.0);
        // 164 + 24 > 152, wraps to 164 - 152 = 12
        assert_eq!(icons[2].x_at_rest, 12.0);
        assert_eq!(anchor, Some(2));
    }

    #[test]
    fn negative_offset_wraps_leading_icons() {
        let mut icons = icons(&[48.0, 48.0, 48.0]);
        let flat = 3.0 * 48.0 + 2.0 * 4.0;
        let anchor = compute_rest_positions(&mut icons, flat, -30.0, 4.0);
        // -30 + 24 < 0, wraps to -30 + 152 = 122
        assert_eq!(icons[0].x_at_rest, 122.0);
        assert_eq!(icons[1].x_at_rest, 22.0);
        assert_eq!(icons[2].x_at_rest, 74.0);
        assert_eq!(anchor, Some(1));
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let mut a = icons(&[32.0, 64.0, 48.0, 16.0]);
        let mut b = a.clone();
        let flat = 32.0 + 64.0 + 48.0 + 16.0 + 3.0 * 4.0;
        let ra = compute_rest_positions(&mut a, flat, 10.0, 4.0);
        let rb = compute_rest_positions(&mut b, flat, 10.0, 4.0);
        assert_eq!(ra, rb);
        for (ia, ib) in a.iter().zip(&b) {
            assert_eq!(ia.x_at_rest, ib.x_at_rest);
        }
    }
}
