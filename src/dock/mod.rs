//! Dock and icon state, plus the animation bookkeeping shared by the
//! layout passes.
//!
//! The icon collection is an ordered `Vec` with ring semantics: the wave
//! computation traverses it starting from a rotating anchor
//! (`first_drawn`) and wraps modulo the icon count. All geometry lives in
//! the dock's own frame, `x` along the dock and `y` perpendicular to it.

use bitflags::bitflags;
use std::f64::consts::FRAC_PI_2;

use crate::config::LayoutConfig;
use crate::geometry::{Rect, Screen};

pub mod drop;
pub mod input_shape;
pub mod placement;
pub mod pointer;
pub mod rest;
pub mod scheduler;
pub mod sizing;
pub mod wave;

pub use drop::{check_can_drop, stop_marking_icons};
pub use input_shape::{update_input_shape, InputState, ShapeMask};
pub use placement::{keep_on_screen, reserve_space, subdock_placement, window_position_at_balance, Strut, SubdockAnchor};
pub use pointer::{calculate_dock_icons, classify_pointer, react_to_position, DockSignal, MousePosition};
pub use rest::compute_rest_positions;
pub use scheduler::{IdleScheduler, WindowRequest};
pub use sizing::{max_authorized_width, update_dock_size};
pub use wave::{apply_wave, compute_wave, current_width};

/// Number of steps of the grow/shrink animation; the hover magnitude is
/// fully reached after this many growth ticks.
pub const GROWTH_STEPS: u32 = 10;

/// Smoothed magnitude for a given animation step, in [0, 1].
pub fn magnitude(index: u32) -> f64 {
    let index = index.min(GROWTH_STEPS);
    (FRAC_PI_2 * index as f64 / GROWTH_STEPS as f64).sin()
}

/// What an icon stands for. Determines its neighbor-compatibility group
/// during drag-and-drop and whether it counts toward the max icon height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Launcher,
    Separator,
    AppTask,
    Applet,
}

impl IconKind {
    /// Ordering group used by the drop evaluator; icons only accept a drop
    /// between neighbors of a matching group.
    pub fn group(self) -> u8 {
        match self {
            IconKind::Launcher => 0,
            IconKind::Separator => 1,
            IconKind::AppTask => 2,
            IconKind::Applet => 3,
        }
    }
}

/// One icon of the dock, with its intrinsic size and live transform.
#[derive(Debug, Clone)]
pub struct Icon {
    pub kind: IconKind,
    /// Ratio-applied reference width; divide by the dock ratio to get the
    /// configured size back.
    pub width: f64,
    pub height: f64,
    /// Equilibrium position in the flat frame, filled by
    /// [`compute_rest_positions`].
    pub x_at_rest: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Angular distance to the pointer, in [0, π]; 0 right under the cursor.
    pub phase: f64,
    pub pointed: bool,
    /// Render offset; equals `x` except while avoiding the mouse during a
    /// drag.
    pub draw_x: f64,
    pub alpha: f64,
    /// Extremal positions recorded by the max-width sweep, used to clamp
    /// neighbor growth afterwards.
    pub x_min: f64,
    pub x_max: f64,
    /// Transient scale multiplier during insertion (0, 1] or removal
    /// [-1, 0); 0 when no transient is running.
    pub insert_remove_factor: f64,
    pub avoiding_mouse: bool,
}

impl Icon {
    pub fn new(kind: IconKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            x_at_rest: 0.0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            phase: 0.0,
            pointed: false,
            draw_x: 0.0,
            alpha: 1.0,
            x_min: 1e4,
            x_max: -1e4,
            insert_remove_factor: 0.0,
            avoiding_mouse: false,
        }
    }

    /// Begin the grow-from-zero insertion transient.
    pub fn start_insert_animation(&mut self) {
        self.insert_remove_factor = 0.05;
    }

    /// Begin the shrink-to-zero removal transient; the icon should be
    /// dropped from the dock once the transient finishes.
    pub fn start_remove_animation(&mut self) {
        self.insert_remove_factor = -0.05;
    }

    /// Advance the insert/remove transient by one animation step. Returns
    /// true when the transient just finished: an inserted icon is back at
    /// full size, a removed icon has shrunk to nothing.
    pub fn insert_remove_tick(&mut self, step: f64) -> bool {
        if self.insert_remove_factor > 0.0 {
            self.insert_remove_factor = (self.insert_remove_factor + step).min(1.0);
            if self.insert_remove_factor >= 1.0 {
                self.insert_remove_factor = 0.0;
                return true;
            }
        } else if self.insert_remove_factor < 0.0 {
            self.insert_remove_factor = (self.insert_remove_factor - step).max(-1.0);
            if self.insert_remove_factor <= -1.0 {
                return true;
            }
        }
        false
    }
}

bitflags! {
    /// Animation and drag state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DockFlags: u8 {
        const GROWING = 1 << 0;
        const SHRINKING = 1 << 1;
        const DRAGGING = 1 << 2;
        const ICON_FLYING = 1 << 3;
        const INSIDE = 1 << 4;
        const CAN_DROP = 1 << 5;
    }
}

/// How the dock claims screen space when idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Normal,
    /// Reserve a strut at the screen edge for the minimal footprint.
    Reserve,
    AutoHide,
}

/// Immutable per-call context: configuration constants plus the screen the
/// dock lives on.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    pub config: LayoutConfig,
    pub screen: Screen,
}

impl LayoutContext {
    pub fn new(config: LayoutConfig) -> Self {
        let screen = config.screen;
        Self { config, screen }
    }

    pub fn with_screen(config: LayoutConfig, screen: Screen) -> Self {
        Self { config, screen }
    }
}

/// A dock: the icon ring plus every piece of geometry derived from it.
#[derive(Debug, Clone)]
pub struct Dock {
    pub icons: Vec<Icon>,
    /// Wrap anchor: index of the icon the wave traversal starts from.
    pub first_drawn: usize,
    /// Sum of unscaled widths and gaps, without the trailing gap.
    pub flat_width: f64,
    pub max_icon_height: f64,
    /// Global shrink factor applied to icon dimensions so the dock fits its
    /// authorized bounds.
    pub ratio: f64,
    /// Horizontal balance point in [0, 1]; 0.5 centers the dock.
    pub align: f64,
    /// Persisted offsets anchoring the dock to a fixed screen point across
    /// resizes.
    pub gap_x: f64,
    pub gap_y: f64,
    pub max_width: f64,
    pub max_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Peak hover intensity; 0 keeps the dock permanently flat.
    pub magnitude_max: f64,
    /// Current step of the grow/shrink animation, 0..=[`GROWTH_STEPS`].
    pub magnitude_index: u32,
    /// 1 = fully folded (sub-dock collapse), 0 = unfolded.
    pub folding_factor: f64,
    /// Current window geometry as last applied by the host.
    pub window: Rect,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub horizontal: bool,
    pub direction_up: bool,
    pub is_subdock: bool,
    /// Sub-dock placement clamps supplied by the parent dock.
    pub left_margin: f64,
    pub min_right_margin: f64,
    pub auto_hide: bool,
    pub entrance_disabled: bool,
    pub visibility: Visibility,
    pub input_state: InputState,
    pub shape: Option<ShapeMask>,
    pub hidden_shape: Option<ShapeMask>,
    pub mouse_position: MousePosition,
    pub flags: DockFlags,
    /// Icon kind being dragged over the dock, if any.
    pub avoiding_kind: Option<IconKind>,
}

impl Default for Dock {
    fn default() -> Self {
        Self::new()
    }
}

impl Dock {
    /// A root dock, horizontal, growing upwards from the bottom edge.
    pub fn new() -> Self {
        Self {
            icons: Vec::new(),
            first_drawn: 0,
            flat_width: 0.0,
            max_icon_height: 0.0,
            ratio: 1.0,
            align: 0.5,
            gap_x: 0.0,
            gap_y: 0.0,
            max_width: 0.0,
            max_height: 0.0,
            min_width: 0.0,
            min_height: 0.0,
            magnitude_max: 1.0,
            magnitude_index: 0,
            folding_factor: 0.0,
            window: Rect::default(),
            mouse_x: 0.0,
            mouse_y: 0.0,
            horizontal: true,
            direction_up: true,
            is_subdock: false,
            left_margin: 0.0,
            min_right_margin: 0.0,
            auto_hide: false,
            entrance_disabled: false,
            visibility: Visibility::Normal,
            input_state: InputState::AtRest,
            shape: None,
            hidden_shape: None,
            mouse_position: MousePosition::Outside,
            flags: DockFlags::empty(),
            avoiding_kind: None,
        }
    }

    /// A sub-dock attached to a parent icon.
    pub fn subdock() -> Self {
        Self {
            is_subdock: true,
            ..Self::new()
        }
    }

    /// Replace the icon set. Resets the ratio; run
    /// [`update_dock_size`] before reading any window geometry.
    pub fn set_icons(&mut self, icons: Vec<Icon>, cfg: &LayoutConfig) {
        self.icons = icons;
        self.ratio = 1.0;
        self.first_drawn = 0;
        self.refresh_flat_metrics(cfg);
    }

    /// Insert an icon, applying the current ratio to its reference size so
    /// it matches its already-shrunk neighbors.
    pub fn insert_icon(&mut self, index: usize, mut icon: Icon, cfg: &LayoutConfig) {
        icon.width *= self.ratio;
        icon.height *= self.ratio;
        let index = index.min(self.icons.len());
        self.icons.insert(index, icon);
        self.refresh_flat_metrics(cfg);
    }

    pub fn remove_icon(&mut self, index: usize, cfg: &LayoutConfig) -> Option<Icon> {
        if index >= self.icons.len() {
            return None;
        }
        let icon = self.icons.remove(index);
        if self.first_drawn >= self.icons.len() {
            self.first_drawn = 0;
        }
        self.refresh_flat_metrics(cfg);
        Some(icon)
    }

    /// Recompute `flat_width` and `max_icon_height` from the current icon
    /// dimensions.
    pub fn refresh_flat_metrics(&mut self, cfg: &LayoutConfig) {
        if self.icons.is_empty() {
            self.flat_width = 0.0;
            self.max_icon_height = 0.0;
            return;
        }
        let mut flat = -cfg.icon_gap;
        let mut hmax = 0.0f64;
        for icon in &self.icons {
            flat += icon.width + cfg.icon_gap;
            if icon.kind != IconKind::Separator {
                hmax = hmax.max(icon.height);
            }
        }
        self.flat_width = flat;
        // a dock of only separators still needs a nonzero height
        self.max_icon_height = if hmax == 0.0 { 10.0 } else { hmax };
    }

    /// Indices in drawing order, starting at the wrap anchor.
    pub fn ring(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.icons.len();
        let first = if n == 0 { 0 } else { self.first_drawn % n };
        (0..n).map(move |i| (first + i) % n)
    }

    pub fn next_in_ring(&self, index: usize) -> usize {
        (index + 1) % self.icons.len()
    }

    pub fn prev_in_ring(&self, index: usize) -> usize {
        (index + self.icons.len() - 1) % self.icons.len()
    }

    pub fn pointed_icon(&self) -> Option<usize> {
        self.icons.iter().position(|icon| icon.pointed)
    }

    /// Magnitude currently in effect, combining the animation step with the
    /// dock's peak intensity.
    pub fn effective_magnitude(&self) -> f64 {
        magnitude(self.magnitude_index) * self.magnitude_max
    }

    pub fn is_growing(&self) -> bool {
        self.flags.contains(DockFlags::GROWING)
    }

    pub fn is_shrinking(&self) -> bool {
        self.flags.contains(DockFlags::SHRINKING)
    }

    pub fn start_growing(&mut self) {
        self.flags.remove(DockFlags::SHRINKING);
        self.flags.insert(DockFlags::GROWING);
    }

    pub fn start_shrinking(&mut self) {
        self.flags.remove(DockFlags::GROWING);
        self.flags.insert(DockFlags::SHRINKING);
    }

    /// Advance the grow/shrink animation by one step; the host calls this
    /// once per animation tick and re-runs the wave afterwards.
    pub fn animation_tick(&mut self) {
        if self.flags.contains(DockFlags::GROWING) {
            self.magnitude_index += 1;
            if self.magnitude_index >= GROWTH_STEPS {
                self.magnitude_index = GROWTH_STEPS;
                self.flags.remove(DockFlags::GROWING);
            }
        } else if self.flags.contains(DockFlags::SHRINKING) {
            if self.magnitude_index > 0 {
                self.magnitude_index -= 1;
            }
            if self.magnitude_index == 0 {
                self.flags.remove(DockFlags::SHRINKING);
            }
        }
    }

    /// Start the sub-dock unfold transient; without animation the dock pops
    /// up fully open.
    pub fn start_unfolding(&mut self, cfg: &LayoutConfig) {
        self.folding_factor = if cfg.animate_subdocks && !self.icons.is_empty() {
            0.99
        } else {
            0.0
        };
    }
}
