use super::*;
use crate::api::{Fetcher, MockFetcher, ProfileFetcher};
use crate::api::profile::candidate_commands;
use crate::commands::{CommandOutcome, CommandPipeline};
use std::sync::Arc;
use std::time::Duration;

const ORIGIN: &str = "http://localhost:3000";

fn fresh_session() -> Session {
    Session::new(candidate_commands(ORIGIN))
}

fn pipeline(fetcher: impl Fetcher + 'static) -> CommandPipeline {
    CommandPipeline::new(ORIGIN, Arc::new(fetcher))
}

fn profile_pipeline() -> CommandPipeline {
    pipeline(ProfileFetcher::new(ORIGIN))
}

fn assert_line_invariants(session: &Session) {
    for (position, line) in session.lines().iter().enumerate() {
        assert_eq!(line.id(), position, "ids follow positions");
        let is_input = line.as_input().is_some();
        assert_eq!(is_input, position % 2 == 0, "inputs sit at even positions");
    }

    let editable: Vec<usize> = session
        .lines()
        .iter()
        .filter_map(Line::as_input)
        .filter(|line| line.editable)
        .map(|line| line.id)
        .collect();
    if session.is_executing() {
        assert!(editable.is_empty());
    } else {
        assert_eq!(editable, vec![session.lines().len() - 1]);
    }

    for line in session.lines().iter().filter_map(Line::as_input) {
        if !line.editable {
            assert!(!line.autocomplete_enabled);
            assert!(line.suggestion.is_empty());
        }
    }
}

async fn run(session: &Session, command: &str, pipeline: &CommandPipeline) -> Session {
    session
        .update_command(command)
        .execute_command(pipeline)
        .await
}

#[test]
fn test_lines_serialize_with_type_tag() {
    let session = fresh_session();
    let value = serde_json::to_value(session.lines()).expect("lines serialize");
    assert_eq!(
        value,
        serde_json::json!([{
            "type": "input",
            "id": 0,
            "command": INITIAL_COMMAND,
            "editable": true,
            "autocomplete_enabled": true,
            "suggestion": "curl http://localhost:3000/api/me",
        }])
    );
}

#[test]
fn test_initial_session_shows_first_candidate() {
    let session = fresh_session();
    assert_eq!(session.lines().len(), 1);
    assert_line_invariants(&session);

    let live = session.live_line().expect("live line");
    assert_eq!(live.command, INITIAL_COMMAND);
    assert!(live.autocomplete_enabled);
    assert_eq!(live.suggestion, "curl http://localhost:3000/api/me");
    assert_eq!(
        live.visible_suggestion().as_deref(),
        Some("url http://localhost:3000/api/me")
    );
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[test]
fn test_update_command_keeps_suggestion_prefix_consistent() {
    let mut session = fresh_session();
    let edits = [
        "c",
        "cu",
        "curl http://localhost:3000/api/me/",
        "curl http://localhost:3000/api/me/e",
        "curl http://localhost:3000/api/me/x",
        "\u{200B}curl\u{00A0}http",
        "ls",
        "",
    ];
    for text in edits {
        session = session.update_command(text);
        let live = session.live_line().expect("live line");
        assert!(
            live.suggestion.is_empty() || live.suggestion.starts_with(&live.command),
            "stale suggestion {:?} for {:?}",
            live.suggestion,
            live.command
        );
        if !live.suggestion.is_empty() {
            assert!(session.candidates().contains(&live.suggestion));
        }
        assert_eq!(session.cycle_offset(), 0);
    }

    let session = session.update_command("curl http://localhost:3000/api/me/e");
    assert_eq!(session.suggestion_index(), Some(2));
}

#[test]
fn test_update_command_sanitizes_text() {
    let session = fresh_session().update_command("\u{200B}curl\u{00A0}x");
    assert_eq!(session.live_command(), "curl x");
}

#[test]
fn test_accept_suggestion_overwrites_command_and_stays_editable() {
    let session = fresh_session().update_command("curl http://localhost:3000/api/me/c");
    let accepted = session.accept_suggestion();
    let live = accepted.live_line().expect("still editable");
    assert_eq!(live.command, "curl http://localhost:3000/api/me/contact");
    assert_eq!(live.visible_suggestion().as_deref(), Some(""));
    assert_ne!(accepted.refocus_signal(), session.refocus_signal());
}

#[test]
fn test_accept_suggestion_without_suggestion_is_noop() {
    let session = fresh_session().update_command("ls");
    let accepted = session.accept_suggestion();
    assert_eq!(accepted.live_command(), "ls");
    assert_eq!(accepted.lines(), session.lines());
}

#[tokio::test]
async fn test_execute_appends_result_and_new_line() {
    let session = fresh_session();
    let pipeline = profile_pipeline();
    let after = run(&session, "curl http://localhost:3000/api/me", &pipeline).await;

    assert_eq!(after.lines().len(), 3);
    assert_line_invariants(&after);
    let frozen = after.lines()[0].as_input().expect("input");
    assert_eq!(frozen.command, "curl http://localhost:3000/api/me");
    assert!(!frozen.editable);

    match &after.lines()[1] {
        Line::Result(result) => assert_eq!(result.kind, ResultKind::StructuredValue),
        other => panic!("expected result line, got {other:?}"),
    }

    let live = after.live_line().expect("new live line");
    assert_eq!(live.command, "");
    assert!(!live.autocomplete_enabled, "success disables autocomplete");
    assert!(live.suggestion.is_empty());
    assert_eq!(live.visible_suggestion(), None);
}

#[tokio::test]
async fn test_error_reenables_autocomplete_with_unseen_candidate() {
    let pipeline = profile_pipeline();
    let session = run(&fresh_session(), "curl http://localhost:3000/api/me", &pipeline).await;
    let session = run(&session, "ls -la", &pipeline).await;

    match &session.lines()[3] {
        Line::Result(result) => {
            assert_eq!(result.kind, ResultKind::PlainText);
            assert_eq!(result.payload, "command not found: ls");
        }
        other => panic!("expected result line, got {other:?}"),
    }
    let live = session.live_line().expect("live line");
    assert!(live.autocomplete_enabled);
    assert_eq!(live.suggestion, "curl http://localhost:3000/api/me/bio");
    assert_eq!(session.suggestion_index(), Some(1));
}

#[tokio::test]
async fn test_all_candidates_seen_leaves_no_suggestion() {
    let pipeline = profile_pipeline();
    let mut session = fresh_session();
    for candidate in candidate_commands(ORIGIN) {
        session = run(&session, &candidate, &pipeline).await;
    }
    let session = run(&session, "nope", &pipeline).await;
    let live = session.live_line().expect("live line");
    assert!(live.autocomplete_enabled);
    assert!(live.suggestion.is_empty());
    assert_line_invariants(&session);
}

#[tokio::test]
async fn test_empty_command_still_reports_error() {
    let pipeline = profile_pipeline();
    for text in ["", "   "] {
        let session = run(&fresh_session(), text, &pipeline).await;
        assert_eq!(session.lines().len(), 3);
        assert_eq!(
            session.lines()[1],
            Line::Result(ResultLine {
                id: 1,
                kind: ResultKind::PlainText,
                payload: "command not found: ".to_string(),
            })
        );
    }
}

#[test]
fn test_submission_while_executing_is_ignored() {
    let (executing, command) = fresh_session()
        .update_command("ls")
        .begin_execution()
        .expect("idle session starts");
    assert_eq!(command, "ls");
    assert!(executing.is_executing());
    assert!(executing.live_line().is_none());
    assert_line_invariants(&executing);

    assert!(executing.begin_execution().is_none());
    let edited = executing.update_command("curl");
    assert_eq!(edited.lines(), executing.lines());
    let cycled = executing.cycle_command(CycleDirection::Previous);
    assert_eq!(cycled.lines(), executing.lines());
}

#[test]
fn test_finish_without_execution_is_ignored() {
    let session = fresh_session();
    let outcome = CommandOutcome::success("{}".to_string());
    assert_eq!(session.finish_execution(&outcome).lines(), session.lines());
}

#[tokio::test]
async fn test_cycle_previous_walks_history_in_reverse() {
    let pipeline = profile_pipeline();
    let commands = ["first", "second", "third"];
    let mut session = fresh_session();
    for command in commands {
        session = run(&session, command, &pipeline).await;
    }

    let mut restored = Vec::new();
    for _ in 0..(commands.len() + 2) {
        let next = session.cycle_command(CycleDirection::Previous);
        if next.cycle_offset() != session.cycle_offset() {
            restored.push(next.live_command().to_string());
        }
        session = next;
    }
    assert_eq!(restored, vec!["third", "second", "first"]);
    assert_eq!(session.cycle_offset(), -3);
    assert_eq!(session.live_command(), "first");
    assert_line_invariants(&session);
}

#[tokio::test]
async fn test_cycle_next_never_passes_live_line() {
    let pipeline = profile_pipeline();
    let session = run(&fresh_session(), "first", &pipeline).await;
    let session = run(&session, "second", &pipeline).await;

    let back = session
        .cycle_command(CycleDirection::Previous)
        .cycle_command(CycleDirection::Previous);
    assert_eq!(back.live_command(), "first");

    let forward = back.cycle_command(CycleDirection::Next);
    assert_eq!(forward.live_command(), "second");
    let blank = forward.cycle_command(CycleDirection::Next);
    assert_eq!(blank.live_command(), "");
    assert_eq!(blank.cycle_offset(), 0);

    let mut session = blank.update_command("draft");
    for _ in 0..5 {
        session = session.cycle_command(CycleDirection::Next);
        assert_eq!(session.cycle_offset(), 0);
        assert_eq!(session.live_command(), "draft");
    }
}

#[test]
fn test_cycle_on_fresh_session_is_noop() {
    let session = fresh_session();
    let cycled = session.cycle_command(CycleDirection::Previous);
    assert_eq!(cycled.cycle_offset(), 0);
    assert_eq!(cycled.live_command(), INITIAL_COMMAND);
    assert_eq!(cycled.refocus_signal(), session.refocus_signal());
}

#[tokio::test]
async fn test_cycle_flips_refocus_and_edit_resets_offset() {
    let pipeline = profile_pipeline();
    let session = run(&fresh_session(), "first", &pipeline).await;
    let cycled = session.cycle_command(CycleDirection::Previous);
    assert_ne!(cycled.refocus_signal(), session.refocus_signal());
    assert_eq!(cycled.cycle_offset(), -1);

    let edited = cycled.update_command("first!");
    assert_eq!(edited.cycle_offset(), 0);
}

#[test]
fn test_resolve_cycle_rejects_out_of_range() {
    let session = fresh_session();
    assert_eq!(
        resolve_cycle(session.lines(), 0, CycleDirection::Next),
        None
    );
    assert_eq!(
        resolve_cycle(session.lines(), 0, CycleDirection::Previous),
        None
    );
    assert_eq!(resolve_cycle(&[], 0, CycleDirection::Previous), None);
    assert_eq!(
        resolve_cycle(session.lines(), -1, CycleDirection::Next),
        Some(CycleResolution {
            offset: 0,
            command: String::new(),
        })
    );
}

#[tokio::test]
async fn test_bio_scenario_renders_structured_json() {
    let session = run(
        &fresh_session(),
        "curl http://localhost:3000/api/me/bio",
        &profile_pipeline(),
    )
    .await;
    let Line::Result(result) = &session.lines()[1] else {
        panic!("expected result line");
    };
    assert_eq!(result.kind, ResultKind::StructuredValue);

    let value: serde_json::Value = serde_json::from_str(&result.payload).expect("json payload");
    let text = crate::pretty::render(&value).plain_text();
    assert_eq!(value["bio"]["homebase"], "Brooklyn, NY");
    assert!(text.contains("\n  \"bio\": {\n    \"homebase\": \"Brooklyn, NY\","));
    let reparsed: serde_json::Value = serde_json::from_str(&text).expect("rendered JSON");
    assert_eq!(reparsed, value);
}

#[tokio::test]
async fn test_disallowed_origin_never_fetches() {
    let mock = MockFetcher::new().with_body("{}");
    let session = run(&fresh_session(), "curl evil.example.com/x", &pipeline(mock.clone())).await;
    let Line::Result(result) = &session.lines()[1] else {
        panic!("expected result line");
    };
    assert_eq!(result.payload, "Sorry, I can only fetch from http://localhost:3000");
    assert_eq!(result.kind, ResultKind::PlainText);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_fill_and_execute_runs_route_command() {
    let mock = MockFetcher::new().with_body(r#"{"contact":{}}"#);
    let pipeline = pipeline(mock.clone());
    let command = crate::pretty::route_command(ORIGIN, "/me/contact");
    let session = fresh_session()
        .fill_and_execute(&command, &pipeline, Duration::ZERO)
        .await;

    assert_eq!(mock.requests(), vec!["http://localhost:3000/api/me/contact"]);
    let frozen = session.lines()[0].as_input().expect("input");
    assert_eq!(frozen.command, command);
    assert_line_invariants(&session);
}

#[tokio::test(start_paused = true)]
async fn test_fill_and_execute_waits_for_settle_delay() {
    let mock = MockFetcher::new().with_body("{}");
    let pipeline = pipeline(mock.clone());
    let started = tokio::time::Instant::now();
    let _ = fresh_session()
        .fill_and_execute("curl http://localhost:3000/api/me", &pipeline, Duration::from_millis(500))
        .await;
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_is_plain_text() {
    let mock = MockFetcher::new().with_failure("dns error: no such host");
    let session = run(&fresh_session(), "curl http://localhost:3000/api/me", &pipeline(mock)).await;
    let Line::Result(result) = &session.lines()[1] else {
        panic!("expected result line");
    };
    assert_eq!(result.kind, ResultKind::PlainText);
    assert_eq!(result.payload, crate::commands::TRANSPORT_FAILURE_MESSAGE);
    assert!(session.live_line().expect("live").autocomplete_enabled);
}

#[tokio::test]
async fn test_previous_snapshot_is_untouched_by_transitions() {
    let before = fresh_session();
    let snapshot = before.lines().to_vec();
    let _ = run(&before, "curl http://localhost:3000/api/me", &profile_pipeline()).await;
    let _ = before.cycle_command(CycleDirection::Previous);
    let _ = before.update_command("zzz");
    assert_eq!(before.lines(), snapshot.as_slice());
}
