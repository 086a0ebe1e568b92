use std::error::Error;
use std::path::PathBuf;

use matrixd::server::{Request, ServerEvent, Submission};
use matrixd::task::{AssetCatalog, Priority, Task};

type TestResult = Result<(), Box<dyn Error>>;

fn catalog() -> AssetCatalog {
    AssetCatalog::from_dirs("fonts", "animations", "images/emojis")
}

fn parse(line: &str) -> Result<Submission, serde_json::Error> {
    serde_json::from_str(line)
}

#[test]
fn text_command_with_priority_and_font() -> TestResult {
    let sub = parse(r#"{"cmd": "text", "text": "HELLO", "font": "helvetica", "priority": "high"}"#)?;

    match sub.into_request(&catalog()) {
        Request::Submit { task, priority } => {
            assert_eq!(priority, Priority::High);
            match task {
                Task::Text(p) => {
                    assert_eq!(p.text, "HELLO");
                    assert_eq!(p.font, Some(PathBuf::from("fonts/helvetica.ttf")));
                }
                other => panic!("expected text task, got {other:?}"),
            }
        }
        other => panic!("expected submit request, got {other:?}"),
    }
    Ok(())
}

#[test]
fn text_command_tolerates_missing_fields() -> TestResult {
    let sub = parse(r#"{"cmd": "text"}"#)?;

    match sub.into_request(&catalog()) {
        Request::Submit { task, priority } => {
            assert_eq!(priority, Priority::Normal);
            match task {
                Task::Text(p) => {
                    assert_eq!(p.text, "");
                    assert_eq!(p.font, None);
                }
                other => panic!("expected text task, got {other:?}"),
            }
        }
        other => panic!("expected submit request, got {other:?}"),
    }
    Ok(())
}

#[test]
fn emoji_command_clamps_out_of_range_and_negative_ids() -> TestResult {
    for line in [
        r#"{"cmd": "emoji", "id": 0}"#,
        r#"{"cmd": "emoji", "id": 847}"#,
        r#"{"cmd": "emoji", "id": -5}"#,
        r#"{"cmd": "emoji"}"#,
    ] {
        let sub = parse(line)?;
        match sub.into_request(&catalog()) {
            Request::Submit { task: Task::Emoji(p), .. } => assert_eq!(p.id, 704),
            other => panic!("expected emoji submit for {line}, got {other:?}"),
        }
    }

    let sub = parse(r#"{"cmd": "emoji", "id": 500}"#)?;
    match sub.into_request(&catalog()) {
        Request::Submit { task: Task::Emoji(p), .. } => assert_eq!(p.id, 500),
        other => panic!("expected emoji submit, got {other:?}"),
    }
    Ok(())
}

#[test]
fn rain_and_perlin_carry_optional_durations() -> TestResult {
    let sub = parse(r#"{"cmd": "rain", "duration": 12}"#)?;
    match sub.into_request(&catalog()) {
        Request::Submit { task: Task::Rain(p), .. } => assert_eq!(p.duration, Some(12)),
        other => panic!("expected rain submit, got {other:?}"),
    }

    let sub = parse(r#"{"cmd": "perlin"}"#)?;
    match sub.into_request(&catalog()) {
        Request::Submit { task: Task::Perlin(p), .. } => assert_eq!(p.duration, None),
        other => panic!("expected perlin submit, got {other:?}"),
    }
    Ok(())
}

#[test]
fn low_priority_hint_is_parsed() -> TestResult {
    let sub = parse(r#"{"cmd": "animation", "priority": "low"}"#)?;
    match sub.into_request(&catalog()) {
        Request::Submit { priority, .. } => assert_eq!(priority, Priority::Low),
        other => panic!("expected submit request, got {other:?}"),
    }
    Ok(())
}

#[test]
fn stop_and_hello_map_to_their_requests() -> TestResult {
    let sub = parse(r#"{"cmd": "stop"}"#)?;
    assert!(matches!(sub.into_request(&catalog()), Request::Stop));

    let sub = parse(r#"{"cmd": "hello"}"#)?;
    assert!(matches!(sub.into_request(&catalog()), Request::Hello));
    Ok(())
}

#[test]
fn malformed_and_unknown_commands_fail_to_parse() {
    assert!(parse("not json at all").is_err());
    assert!(parse(r#"{"cmd": "reboot"}"#).is_err());
    assert!(parse(r#"{"text": "no cmd tag"}"#).is_err());
}

#[test]
fn idle_event_serialises_to_a_single_line() {
    assert_eq!(ServerEvent::Idle.to_line(), "{\"event\":\"idle\"}\n");
}
