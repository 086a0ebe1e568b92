// src/task/mod.rs

//! Renderable units of work.
//!
//! A [`Task`] is fully resolved at the transport boundary: defaults are
//! filled in, asset names are turned into paths, and from then on the queue
//! and the runtime treat it as an opaque, immutable value. No kind-specific
//! state leaks past this module.

pub mod catalog;

use std::fmt;
use std::path::PathBuf;

pub use catalog::AssetCatalog;

/// Admission policy tag consumed by the job queue.
///
/// This is a submission-time hint, not part of the task itself: once a task
/// is in the queue its original priority is irrelevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    #[default]
    Normal,
    /// Hard interrupt: replaces the whole queue and preempts the current
    /// render.
    High,
    /// Best-effort: admitted only while the device is idle, silently
    /// dropped otherwise.
    Low,
}

impl Priority {
    /// Map a free-form submission hint to a priority.
    ///
    /// Matches the wire contract: `"high"` and `"low"` are recognised
    /// (case-insensitively), anything else, including absence, is normal.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(|s| s.trim().to_lowercase()) {
            Some(ref s) if s == "high" => Priority::High,
            Some(ref s) if s == "low" => Priority::Low,
            _ => Priority::Normal,
        }
    }
}

/// One unit of renderable work, closed over the five supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Text(TextParams),
    Animation(AnimationParams),
    Emoji(EmojiParams),
    Rain(EffectParams),
    Perlin(EffectParams),
}

/// Parameters for a scrolling text banner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParams {
    pub text: String,
    /// Resolved font file, or `None` for the device default font.
    pub font: Option<PathBuf>,
}

/// Parameters for a pre-rendered gif animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationParams {
    /// Resolved gif path. The file may turn out not to exist; that is a
    /// render-time failure, not a submission error.
    pub file: PathBuf,
}

/// Parameters for a single emoji image.
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiParams {
    pub id: u32,
    pub image: PathBuf,
}

/// Parameters for the generated effects (rain, perlin noise).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectParams {
    /// How long to run the effect, in seconds. `None` means the driver's
    /// own default.
    pub duration: Option<u64>,
}

impl Task {
    /// Build a text task. A missing font name means the device default.
    pub fn text(text: String, font_name: Option<&str>, catalog: &AssetCatalog) -> Self {
        Task::Text(TextParams {
            text,
            font: font_name.map(|name| catalog.font_path(name)),
        })
    }

    /// Build an animation task.
    ///
    /// With a name, resolves `<animations_dir>/<name>.gif`. Without one,
    /// picks uniformly at random from the catalog; an empty catalog still
    /// yields a task, whose path will fail at render time on a real driver.
    pub fn animation(name: Option<&str>, catalog: &AssetCatalog) -> Self {
        let file = match name {
            Some(name) => catalog.animation_path(name),
            None => catalog
                .random_animation()
                .unwrap_or_else(|| catalog.animation_path("default")),
        };
        Task::Animation(AnimationParams { file })
    }

    /// Build an emoji task, clamping the id into the valid range.
    pub fn emoji(id: Option<u32>, catalog: &AssetCatalog) -> Self {
        let id = catalog::resolve_emoji_id(id);
        Task::Emoji(EmojiParams {
            id,
            image: catalog.emoji_path(id),
        })
    }

    pub fn rain(duration: Option<u64>) -> Self {
        Task::Rain(EffectParams { duration })
    }

    pub fn perlin(duration: Option<u64>) -> Self {
        Task::Perlin(EffectParams { duration })
    }

    /// Short kind tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Task::Text(_) => "text",
            Task::Animation(_) => "animation",
            Task::Emoji(_) => "emoji",
            Task::Rain(_) => "rain",
            Task::Perlin(_) => "perlin",
        }
    }
}

impl fmt::Display for Task {
    /// Human-readable summary of the resolved parameters, logged when the
    /// task starts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Text(p) => {
                write!(f, "text {:?}", p.text)?;
                if let Some(ref font) = p.font {
                    write!(f, " (font: {})", font.display())?;
                }
                Ok(())
            }
            Task::Animation(p) => write!(f, "animation {}", p.file.display()),
            Task::Emoji(p) => write!(f, "emoji {} ({})", p.id, p.image.display()),
            Task::Rain(p) => write_effect(f, "rain", p),
            Task::Perlin(p) => write_effect(f, "perlin", p),
        }
    }
}

fn write_effect(f: &mut fmt::Formatter<'_>, name: &str, p: &EffectParams) -> fmt::Result {
    match p.duration {
        Some(secs) => write!(f, "{name} ({secs}s)"),
        None => write!(f, "{name}"),
    }
}
