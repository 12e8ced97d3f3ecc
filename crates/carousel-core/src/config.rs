use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::options::{
    Easing, ModalContext, SwipeMode, TrackAnimation, TrackOptions, ViewsToShow,
};
use crate::styles::{Palette, PaletteOverrides};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselSettings,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file, image cache)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSettings {
    /// Hide header, footer and navigation after 3s without activity
    #[serde(default = "default_true")]
    pub hide_controls_when_idle: bool,
    /// Wrap around at both ends
    #[serde(default)]
    pub infinite: bool,
    /// Skip transition animations (defaults to on for non-touch terminals)
    #[serde(default)]
    pub instant: Option<bool>,
    /// Index of the first view shown
    #[serde(default)]
    pub start_index: usize,
    /// Views on screen at once (0 = auto)
    #[serde(default = "default_views_to_show")]
    pub views_to_show: usize,
    /// Views moved per step
    #[serde(default = "default_views_to_move")]
    pub views_to_move: usize,
    /// Which devices may swipe: "enabled", "disabled", "mouse", "touch"
    #[serde(default = "default_swipe")]
    pub swipe: SwipeMode,
    /// Treat the terminal as touch capable
    #[serde(default)]
    pub touch: bool,
    /// Start in fullscreen
    #[serde(default)]
    pub fullscreen: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            hide_controls_when_idle: default_true(),
            infinite: false,
            instant: None,
            start_index: 0,
            views_to_show: default_views_to_show(),
            views_to_move: default_views_to_move(),
            swipe: default_swipe(),
            touch: false,
            fullscreen: false,
        }
    }
}

impl CarouselSettings {
    /// Track options for these settings, animation taken from `ui`
    pub fn track_options(&self, ui: &UiConfig) -> TrackOptions {
        TrackOptions {
            infinite: Some(self.infinite),
            instant: self.instant,
            swipe: Some(self.swipe),
            views_to_move: Some(self.views_to_move),
            views_to_show: Some(match self.views_to_show {
                0 => ViewsToShow::Auto,
                n => ViewsToShow::Count(n),
            }),
            animation: Some(TrackAnimation {
                duration_ms: ui.animation_duration_ms,
                easing: ui.easing,
            }),
            ..Default::default()
        }
    }

    /// The terminal viewer is hosted like a lightbox, so it is always modal
    pub fn modal_context(&self) -> ModalContext {
        ModalContext {
            is_fullscreen: self.fullscreen,
            allow_fullscreen: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a transition is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Transition duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Transition easing: "none", "linear", "cubic", "quintic", "ease_out"
    #[serde(default)]
    pub easing: Easing,
    /// Color overrides, hex strings
    #[serde(default)]
    pub colors: PaletteOverrides,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            animation_duration_ms: default_animation_duration(),
            easing: Easing::default(),
            colors: PaletteOverrides::default(),
        }
    }
}

impl UiConfig {
    pub fn palette(&self) -> Palette {
        Palette::default().with_overrides(&self.colors)
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-n>" (Ctrl+n), "<S-Tab>", "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Show the previous view
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Show the next view
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Jump to the first view
    #[serde(default = "default_key_first")]
    pub first: String,
    /// Jump to the last view
    #[serde(default = "default_key_last")]
    pub last: String,
    /// Close the carousel
    #[serde(default = "default_key_close")]
    pub close: String,
    /// Toggle fullscreen
    #[serde(default = "default_key_fullscreen")]
    pub fullscreen: String,
    /// Open the current view in the system viewer
    #[serde(default = "default_key_open_external")]
    pub open_external: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            prev: default_key_prev(),
            next: default_key_next(),
            first: default_key_first(),
            last: default_key_last(),
            close: default_key_close(),
            fullscreen: default_key_fullscreen(),
            open_external: default_key_open_external(),
        }
    }
}

fn default_key_prev() -> String { "h".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_first() -> String { "gg".to_string() }
fn default_key_last() -> String { "G".to_string() }
fn default_key_close() -> String { "q".to_string() }
fn default_key_fullscreen() -> String { "f".to_string() }
fn default_key_open_external() -> String { "o".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carousel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_views_to_show() -> usize {
    1
}

fn default_views_to_move() -> usize {
    1
}

fn default_swipe() -> SwipeMode {
    SwipeMode::Touch
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_animation_duration() -> u64 {
    250
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaults when it does not exist
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/carousel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("carousel")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("carousel.log")
    }

    /// Get the downloaded image cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir().join("images")
    }
}
