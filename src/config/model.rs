// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [matrix]
/// width = 32
/// height = 32
/// hardware = "none"
///
/// [server]
/// port = 3003
///
/// [assets]
/// fonts_dir = "fonts"
/// animations_dir = "animations"
/// emojis_dir = "images/emojis"
///
/// [queue]
/// max_pending = 50
/// ```
///
/// All sections are optional and have reasonable defaults, so running
/// without a config file at all is fine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub matrix: MatrixSection,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub assets: AssetsSection,

    #[serde(default)]
    pub queue: QueueSection,
}

/// `[matrix]` section: panel geometry and backend selection.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixSection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Which backend drives the panel.
    ///
    /// `"none"` renders to the log only; anything else is reserved for a
    /// real hardware backend plugged in behind the `Driver` trait.
    #[serde(default = "default_hardware")]
    pub hardware: String,
}

fn default_width() -> u32 {
    32
}

fn default_height() -> u32 {
    32
}

fn default_hardware() -> String {
    "none".to_string()
}

impl Default for MatrixSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            hardware: default_hardware(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3003
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// `[assets]` section: directories the per-kind parameter resolution draws
/// from (fonts for text, gif catalog for animations, png set for emojis).
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsSection {
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,

    #[serde(default = "default_animations_dir")]
    pub animations_dir: PathBuf,

    #[serde(default = "default_emojis_dir")]
    pub emojis_dir: PathBuf,
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts")
}

fn default_animations_dir() -> PathBuf {
    PathBuf::from("animations")
}

fn default_emojis_dir() -> PathBuf {
    PathBuf::from("images/emojis")
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            animations_dir: default_animations_dir(),
            emojis_dir: default_emojis_dir(),
        }
    }
}

/// `[queue]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSection {
    /// Hard cap on pending jobs. Exceeding it flushes the whole queue.
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

fn default_max_pending() -> usize {
    50
}

impl Default for QueueSection {
    fn default() -> Self {
        Self {
            max_pending: default_max_pending(),
        }
    }
}
