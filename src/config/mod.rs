use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::map::Entry;
use tracing::warn;

use crate::geometry::Screen;

/// Layout constants consumed by every geometry computation.
///
/// Loaded once and passed around as an explicit immutable context; the
/// engine never reads ambient global state, so tests can run against
/// synthetic configurations and screen sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Flat-frame spacing between two neighboring icons, in reference units.
    #[serde(default = "default_icon_gap")]
    pub icon_gap: f64,
    /// Half-period of the magnification wave: how far from the pointer the
    /// scale bump decays back to 1.
    #[serde(default = "default_sinusoid_width")]
    pub sinusoid_width: f64,
    /// Peak extra scale at the pointer; an icon under the cursor reaches
    /// `1 + amplitude` at full magnitude.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Upper ratio bound the auto-fit loop converges to for sub-docks.
    #[serde(default = "default_subdock_size_ratio")]
    pub subdock_size_ratio: f64,
    /// Frame outline thickness, part of the fixed vertical margins.
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Inner margin between the frame and the icons.
    #[serde(default = "default_frame_margin")]
    pub frame_margin: f64,
    /// Minimum number of pixels a root dock must keep on-screen when its
    /// anchor point would push it past a screen edge.
    #[serde(default = "default_visibility_margin")]
    pub visibility_margin: f64,
    /// Grace period before a sub-dock honors a pointer leave, in
    /// milliseconds. 0 emits the leave immediately.
    #[serde(default = "default_leave_subdock_delay_ms")]
    pub leave_subdock_delay_ms: u64,
    /// Fraction of the pointed icon's scaled width counting as the left or
    /// right drop margin during a drag.
    #[serde(default = "default_avoiding_mouse_margin")]
    pub avoiding_mouse_margin: f64,
    /// Whether sub-docks unfold with an animation or pop up fully open.
    #[serde(default = "default_animate_subdocks")]
    pub animate_subdocks: bool,
    /// Screen dimensions used when none are supplied at runtime.
    #[serde(default = "default_screen")]
    pub screen: Screen,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            icon_gap: default_icon_gap(),
            sinusoid_width: default_sinusoid_width(),
            amplitude: default_amplitude(),
            subdock_size_ratio: default_subdock_size_ratio(),
            line_width: default_line_width(),
            frame_margin: default_frame_margin(),
            visibility_margin: default_visibility_margin(),
            leave_subdock_delay_ms: default_leave_subdock_delay_ms(),
            avoiding_mouse_margin: default_avoiding_mouse_margin(),
            animate_subdocks: default_animate_subdocks(),
            screen: default_screen(),
        }
    }
}

fn default_icon_gap() -> f64 {
    4.0
}

fn default_sinusoid_width() -> f64 {
    250.0
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_subdock_size_ratio() -> f64 {
    0.8
}

fn default_line_width() -> f64 {
    2.0
}

fn default_frame_margin() -> f64 {
    2.0
}

fn default_visibility_margin() -> f64 {
    20.0
}

fn default_leave_subdock_delay_ms() -> u64 {
    330
}

fn default_avoiding_mouse_margin() -> f64 {
    0.25
}

fn default_animate_subdocks() -> bool {
    true
}

fn default_screen() -> Screen {
    Screen::new(1920.0, 1080.0)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LayoutConfig {
    /// Load the merged configuration, lowest priority first: built-in
    /// defaults, the system file, the XDG user file, then a working-directory
    /// override for development. Missing files are skipped silently; files
    /// that exist but fail to parse are skipped with a warning.
    pub fn load() -> Self {
        let mut merged =
            toml::Value::try_from(Self::default()).expect("default config is always valid toml");

        for path in [
            get_system_config_path(),
            get_user_config_path(),
            Some(PathBuf::from("wavedock.toml")),
        ]
        .into_iter()
        .flatten()
        {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            match content.parse::<toml::Value>() {
                Ok(value) => {
                    merge_value(&mut merged, value);
                    tracing::info!("loaded config from {}", path.display());
                }
                Err(err) => warn!("failed to parse {}: {err}", path.display()),
            }
        }

        match merged.try_into() {
            Ok(config) => config,
            Err(err) => {
                warn!("invalid merged config, falling back to defaults: {err}");
                Self::default()
            }
        }
    }

    /// Load a single explicit file on top of the defaults. Unlike [`load`],
    /// an unreadable or invalid file is reported to the caller.
    ///
    /// [`load`]: Self::load
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let value = content
            .parse::<toml::Value>()
            .map_err(|source| ConfigError::Parse {
                path: path.to_owned(),
                source,
            })?;

        let mut merged =
            toml::Value::try_from(Self::default()).expect("default config is always valid toml");
        merge_value(&mut merged, value);
        merged.try_into().map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

fn get_system_config_path() -> Option<PathBuf> {
    let path = PathBuf::from("/etc/wavedock/config.toml");
    path.exists().then_some(path)
}

fn get_user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    let path = base.join("wavedock").join("config.toml");
    path.exists().then_some(path)
}

/// Recursively merge `incoming` into `base`. Tables merge key by key; any
/// other value type replaces the existing one.
fn merge_value(base: &mut toml::Value, incoming: toml::Value) {
    match (base, incoming) {
        (toml::Value::Table(base_table), toml::Value::Table(incoming_table)) => {
            for (key, value) in incoming_table {
                match base_table.entry(key) {
                    Entry::Occupied(mut entry) => merge_value(entry.get_mut(), value),
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                }
            }
        }
        (base, incoming) => *base = incoming,
    }
}
