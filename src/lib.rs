//! Geometry and animation engine for a magnifying icon dock.
//!
//! The crate is windowing-agnostic: it turns pointer positions and icon
//! sets into icon transforms, window footprints and input-shape masks, and
//! leaves applying them to the host. Everything is driven through a
//! [`dock::Dock`] plus a [`dock::LayoutContext`]; the typical cycle is
//! [`dock::update_dock_size`] after any icon mutation, then
//! [`dock::calculate_dock_icons`] and [`dock::react_to_position`] on every
//! pointer move.

pub mod config;
pub mod dock;
pub mod geometry;

pub use config::LayoutConfig;
pub use dock::{Dock, Icon, IconKind, LayoutContext};
