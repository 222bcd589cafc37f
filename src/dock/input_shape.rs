//! Input-shape masks: which sub-rectangle of the window accepts pointer
//! events while the dock sits at rest or hides itself.

use super::Dock;

/// Which of the masks is currently applied to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// The whole window accepts input.
    Active,
    /// Only the minimal footprint accepts input.
    #[default]
    AtRest,
    /// A 1x1 corner pixel keeps the window mapped but inert.
    Hidden,
}

/// A rectangular input region inside a window, in window pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMask {
    pub width: u32,
    pub height: u32,
    pub active_x: u32,
    pub active_y: u32,
    pub active_width: u32,
    pub active_height: u32,
}

impl ShapeMask {
    /// Build the mask for a window of maximal size with an active rectangle
    /// of the given size, anchored to the dock's screen edge.
    fn new(dock: &Dock, active_width: f64, active_height: f64) -> Self {
        let (window_w, window_h) = if dock.horizontal {
            (dock.max_width, dock.max_height)
        } else {
            (dock.max_height, dock.max_width)
        };
        let window_w = window_w.round().max(1.0) as u32;
        let window_h = window_h.round().max(1.0) as u32;

        let (w, h) = if dock.horizontal {
            (active_width, active_height)
        } else {
            (active_height, active_width)
        };
        let w = (w.round() as u32).clamp(1, window_w);
        let h = (h.round() as u32).clamp(1, window_h);

        let (x, y) = if dock.horizontal {
            let x = (window_w - w) / 2;
            let y = if dock.direction_up { window_h - h } else { 0 };
            (x, y)
        } else {
            let x = if dock.direction_up { window_w - w } else { 0 };
            let y = (window_h - h) / 2;
            (x, y)
        };

        Self {
            width: window_w,
            height: window_h,
            active_x: x,
            active_y: y,
            active_width: w,
            active_height: h,
        }
    }

    /// Whether a window-local point falls inside the active rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.active_x
            && x < self.active_x + self.active_width
            && y >= self.active_y
            && y < self.active_y + self.active_height
    }

    /// Row-major 1-bit rasterization of the active rectangle, one byte per
    /// 8 pixels, rows padded to whole bytes. This is the format window
    /// systems take for shape regions.
    pub fn rasterize(&self) -> Vec<u8> {
        let stride = ((self.width + 7) / 8) as usize;
        let mut bits = vec![0u8; stride * self.height as usize];
        for y in self.active_y..self.active_y + self.active_height {
            let row = y as usize * stride;
            for x in self.active_x..self.active_x + self.active_width {
                bits[row + (x / 8) as usize] |= 1 << (x % 8);
            }
        }
        bits
    }
}

/// Rebuild both masks from the current dock sizes.
///
/// A dock whose sizes are not usable yet, or a sub-dock (which is only
/// mapped while hovered), gets no masks and falls back to a fully active
/// window.
pub fn update_input_shape(dock: &mut Dock) {
    dock.shape = None;
    dock.hidden_shape = None;

    if dock.min_width <= 0.0
        || dock.min_height <= 0.0
        || dock.max_width <= 0.0
        || dock.max_height <= 0.0
        || dock.is_subdock
    {
        if dock.input_state != InputState::Active {
            dock.input_state = InputState::Active;
        }
        return;
    }

    dock.shape = Some(ShapeMask::new(dock, dock.min_width, dock.min_height));
    dock.hidden_shape = Some(ShapeMask::new(dock, 1.0, 1.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::Dock;

    fn sized_dock() -> Dock {
        let mut dock = Dock::new();
        dock.max_width = 400.0;
        dock.max_height = 100.0;
        dock.min_width = 200.0;
        dock.min_height = 54.0;
        dock
    }

    #[test]
    fn unusable_sizes_fall_back_to_a_fully_active_window() {
        let mut dock = Dock::new();
        dock.input_state = InputState::AtRest;
        update_input_shape(&mut dock);
        assert_eq!(dock.input_state, InputState::Active);
        assert!(dock.shape.is_none());
        assert!(dock.hidden_shape.is_none());
    }

    #[test]
    fn subdocks_never_carry_a_mask() {
        let mut dock = sized_dock();
        dock.is_subdock = true;
        update_input_shape(&mut dock);
        assert_eq!(dock.input_state, InputState::Active);
        assert!(dock.shape.is_none());
    }

    #[test]
    fn bottom_dock_mask_hugs_the_bottom_edge() {
        let mut dock = sized_dock();
        update_input_shape(&mut dock);

        let shape = dock.shape.expect("rest mask");
        assert_eq!(shape.width, 400);
        assert_eq!(shape.height, 100);
        assert_eq!(shape.active_width, 200);
        assert_eq!(shape.active_height, 54);
        assert_eq!(shape.active_x, 100);
        assert_eq!(shape.active_y, 100 - 54);

        assert!(shape.contains(200, 99));
        assert!(!shape.contains(200, 0));
        assert!(!shape.contains(50, 99));
    }

    #[test]
    fn hidden_mask_is_a_single_pixel() {
        let mut dock = sized_dock();
        update_input_shape(&mut dock);
        let hidden = dock.hidden_shape.expect("hidden mask");
        assert_eq!(hidden.active_width, 1);
        assert_eq!(hidden.active_height, 1);
    }

    #[test]
    fn vertical_dock_transposes_the_mask() {
        let mut dock = sized_dock();
        dock.horizontal = false;
        update_input_shape(&mut dock);

        let shape = dock.shape.expect("rest mask");
        // window dims swap, the active strip hugs the right edge
        assert_eq!(shape.width, 100);
        assert_eq!(shape.height, 400);
        assert_eq!(shape.active_width, 54);
        assert_eq!(shape.active_height, 200);
        assert_eq!(shape.active_x, 100 - 54);
        assert_eq!(shape.active_y, 100);
    }

    #[test]
    fn rasterized_rows_match_contains() {
        let shape = ShapeMask {
            width: 20,
            height: 4,
            active_x: 6,
            active_y: 1,
            active_width: 9,
            active_height: 2,
        };
        let bits = shape.rasterize();
        let stride = 3;
        assert_eq!(bits.len(), stride * 4);
        for y in 0..4u32 {
            for x in 0..20u32 {
                let set = bits[y as usize * stride + (x / 8) as usize] >> (x % 8) & 1 == 1;
                assert_eq!(set, shape.contains(x, y), "pixel ({x}, {y})");
            }
        }
    }
}
