// src/task/catalog.rs

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::AssetsSection;

/// Lowest valid emoji id shipped with the asset set.
pub const EMOJI_MIN: u32 = 1;
/// Highest valid emoji id shipped with the asset set.
pub const EMOJI_MAX: u32 = 846;
/// Fallback emoji when the submission omits an id or sends one out of range.
pub const EMOJI_DEFAULT: u32 = 704;

/// Clamp a submitted emoji id into the valid range.
///
/// Out-of-range and missing ids resolve to the default rather than erroring:
/// submitters never see a failure for a bad id.
pub fn resolve_emoji_id(id: Option<u32>) -> u32 {
    match id {
        Some(id) if (EMOJI_MIN..=EMOJI_MAX).contains(&id) => id,
        _ => EMOJI_DEFAULT,
    }
}

/// On-disk asset locations backing per-kind parameter resolution.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    fonts_dir: PathBuf,
    animations_dir: PathBuf,
    emojis_dir: PathBuf,
}

impl AssetCatalog {
    pub fn new(assets: &AssetsSection) -> Self {
        Self {
            fonts_dir: assets.fonts_dir.clone(),
            animations_dir: assets.animations_dir.clone(),
            emojis_dir: assets.emojis_dir.clone(),
        }
    }

    pub fn from_dirs(
        fonts_dir: impl Into<PathBuf>,
        animations_dir: impl Into<PathBuf>,
        emojis_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            animations_dir: animations_dir.into(),
            emojis_dir: emojis_dir.into(),
        }
    }

    pub fn font_path(&self, name: &str) -> PathBuf {
        self.fonts_dir.join(format!("{name}.ttf"))
    }

    pub fn animation_path(&self, name: &str) -> PathBuf {
        self.animations_dir.join(format!("{name}.gif"))
    }

    pub fn emoji_path(&self, id: u32) -> PathBuf {
        self.emojis_dir.join(format!("{id}.png"))
    }

    /// Pick a random gif from the animations directory.
    ///
    /// The directory is listed on every call so dropping a new gif in does
    /// not require a restart. Returns `None` when the directory is missing
    /// or holds no gifs.
    pub fn random_animation(&self) -> Option<PathBuf> {
        let files = self.list_animations();
        let picked = files.choose(&mut rand::thread_rng()).cloned();

        if picked.is_none() {
            debug!(dir = ?self.animations_dir, "no animations available to pick from");
        }
        picked
    }

    fn list_animations(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.animations_dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_gif(path))
            .collect()
    }
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gif"))
        .unwrap_or(false)
}
