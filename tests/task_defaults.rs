use std::error::Error;
use std::fs;
use std::path::PathBuf;

use matrixd::task::catalog::{resolve_emoji_id, EMOJI_DEFAULT};
use matrixd::task::{AssetCatalog, Priority, Task};

type TestResult = Result<(), Box<dyn Error>>;

fn catalog() -> AssetCatalog {
    AssetCatalog::from_dirs("fonts", "animations", "images/emojis")
}

#[test]
fn emoji_ids_clamp_to_default_outside_valid_range() {
    assert_eq!(resolve_emoji_id(Some(0)), EMOJI_DEFAULT);
    assert_eq!(resolve_emoji_id(Some(847)), EMOJI_DEFAULT);
    assert_eq!(resolve_emoji_id(None), EMOJI_DEFAULT);

    assert_eq!(resolve_emoji_id(Some(500)), 500);
    assert_eq!(resolve_emoji_id(Some(1)), 1);
    assert_eq!(resolve_emoji_id(Some(846)), 846);
}

#[test]
fn emoji_task_resolves_image_path_from_id() {
    let task = Task::emoji(Some(500), &catalog());

    match task {
        Task::Emoji(p) => {
            assert_eq!(p.id, 500);
            assert_eq!(p.image, PathBuf::from("images/emojis/500.png"));
        }
        other => panic!("expected emoji task, got {other:?}"),
    }
}

#[test]
fn emoji_task_defaults_when_id_is_missing() {
    let task = Task::emoji(None, &catalog());

    match task {
        Task::Emoji(p) => {
            assert_eq!(p.id, EMOJI_DEFAULT);
            assert_eq!(p.image, PathBuf::from("images/emojis/704.png"));
        }
        other => panic!("expected emoji task, got {other:?}"),
    }
}

#[test]
fn named_animation_resolves_to_gif_in_catalog_dir() {
    let task = Task::animation(Some("fire"), &catalog());

    match task {
        Task::Animation(p) => assert_eq!(p.file, PathBuf::from("animations/fire.gif")),
        other => panic!("expected animation task, got {other:?}"),
    }
}

#[test]
fn unnamed_animation_picks_from_the_catalog_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("sparkle.gif"), b"gif")?;
    fs::write(dir.path().join("notes.txt"), b"not a gif")?;

    let catalog = AssetCatalog::from_dirs("fonts", dir.path(), "images/emojis");
    let task = Task::animation(None, &catalog);

    match task {
        Task::Animation(p) => assert_eq!(p.file, dir.path().join("sparkle.gif")),
        other => panic!("expected animation task, got {other:?}"),
    }
    Ok(())
}

#[test]
fn unnamed_animation_with_empty_catalog_still_yields_a_task() -> TestResult {
    let dir = tempfile::tempdir()?;

    let catalog = AssetCatalog::from_dirs("fonts", dir.path(), "images/emojis");
    let task = Task::animation(None, &catalog);

    // The path will fail at render time on a real driver; submission
    // itself never errors.
    match task {
        Task::Animation(p) => assert_eq!(p.file, dir.path().join("default.gif")),
        other => panic!("expected animation task, got {other:?}"),
    }
    Ok(())
}

#[test]
fn text_task_resolves_font_name_to_ttf_path() {
    let task = Task::text("HELLO".to_string(), Some("helvetica"), &catalog());

    match task {
        Task::Text(p) => {
            assert_eq!(p.text, "HELLO");
            assert_eq!(p.font, Some(PathBuf::from("fonts/helvetica.ttf")));
        }
        other => panic!("expected text task, got {other:?}"),
    }
}

#[test]
fn priority_hints_are_case_insensitive_and_default_to_normal() {
    assert_eq!(Priority::from_hint(Some("high")), Priority::High);
    assert_eq!(Priority::from_hint(Some("HIGH")), Priority::High);
    assert_eq!(Priority::from_hint(Some(" low ")), Priority::Low);
    assert_eq!(Priority::from_hint(Some("urgent")), Priority::Normal);
    assert_eq!(Priority::from_hint(None), Priority::Normal);
}

#[test]
fn task_descriptions_summarise_resolved_parameters() {
    let text = Task::text("HI".to_string(), Some("mono"), &catalog());
    assert_eq!(text.to_string(), "text \"HI\" (font: fonts/mono.ttf)");

    let rain = Task::rain(Some(10));
    assert_eq!(rain.to_string(), "rain (10s)");

    let perlin = Task::perlin(None);
    assert_eq!(perlin.to_string(), "perlin");
}
