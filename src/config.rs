//! Configuration loading.
//!
//! JSON file with per-field defaults, so a partial config only overrides
//! what it names. The default path lives under the user config dir; an
//! explicitly passed path that fails to load is a hard error, while a broken
//! default-path config just logs and falls back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Target frames per second for the render loop
    #[serde(default = "default_fps")]
    pub fps: u64,

    /// Disable every animation: reveals, smooth scroll, stars, cursor
    #[serde(default = "default_false")]
    pub reduced_motion: bool,

    #[serde(default)]
    pub effects: EffectsConfig,

    #[serde(default)]
    pub terminal: TerminalConfig,

    #[serde(default)]
    pub splash: SplashConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    #[serde(default = "default_star_count")]
    pub star_count: usize,

    /// Star drift speed in cells per second
    #[serde(default = "default_star_speed")]
    pub star_speed: f32,

    /// Pointer influence radius in cells
    #[serde(default = "default_pointer_influence")]
    pub pointer_influence: f32,

    /// Link stars closer than this many cells
    #[serde(default = "default_connection_distance")]
    pub connection_distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Typewriter speed per character, in milliseconds
    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Force the ready state after this long without media
    #[serde(default = "default_splash_timeout")]
    pub timeout_ms: u64,

    /// Auto-enter delay once the ready state was forced
    #[serde(default = "default_auto_enter")]
    pub auto_enter_ms: u64,
}

fn default_theme_name() -> String {
    "core".to_string()
}

fn default_fps() -> u64 {
    30
}

fn default_false() -> bool {
    false
}

fn default_true() -> bool {
    true
}

fn default_star_count() -> usize {
    120
}

fn default_star_speed() -> f32 {
    1.2
}

fn default_pointer_influence() -> f32 {
    12.0
}

fn default_connection_distance() -> f32 {
    9.0
}

fn default_prompt() -> String {
    crate::term::content::DEFAULT_PROMPT.to_string()
}

fn default_history_limit() -> usize {
    100
}

fn default_typing_speed() -> u64 {
    50
}

fn default_splash_timeout() -> u64 {
    5000
}

fn default_auto_enter() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            fps: default_fps(),
            reduced_motion: false,
            effects: EffectsConfig::default(),
            terminal: TerminalConfig::default(),
            splash: SplashConfig::default(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            star_count: default_star_count(),
            star_speed: default_star_speed(),
            pointer_influence: default_pointer_influence(),
            connection_distance: default_connection_distance(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_limit: default_history_limit(),
            typing_speed_ms: default_typing_speed(),
        }
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: default_splash_timeout(),
            auto_enter_ms: default_auto_enter(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Default config file location: `<config dir>/coreterm/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("coreterm").join("config.json"))
    }

    /// Load from the default path if one exists; anything wrong with it is
    /// logged and ignored.
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
