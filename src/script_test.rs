#![allow(clippy::float_cmp)]

use super::*;
use canvas::config::CameraConfig;
use canvas::input::Key;

fn core() -> EngineCore {
    let mut core = EngineCore::new(&CameraConfig::default()).unwrap();
    core.set_viewport(800.0, 600.0);
    core
}

fn parse(text: &str) -> Result<Vec<ScriptEntry>, DriverError> {
    parse_script(text.as_bytes())
}

fn run(replay: &Replay, script: &[ScriptEntry]) -> (FrameRecord, Vec<FrameRecord>) {
    let mut core = core();
    let mut frames = Vec::new();
    let last = replay
        .run(&mut core, script, |record| {
            frames.push(*record);
            Ok(())
        })
        .unwrap();
    (last, frames)
}

// --- parse_script ---

#[test]
fn parse_skips_blank_and_comment_lines() {
    let script = parse(
        "# hold w for half a second\n\
         \n\
         {\"t_ms\": 0, \"event\": {\"type\": \"key_down\", \"key\": \"w\"}}\n\
         {\"t_ms\": 500, \"event\": {\"type\": \"key_up\", \"key\": \"w\"}}\n",
    )
    .unwrap();
    assert_eq!(script.len(), 2);
    assert_eq!(script[0].event, InputEvent::KeyDown { key: Key::new("w"), modifiers: Default::default() });
}

#[test]
fn parse_orders_by_timestamp_and_keeps_ties_stable() {
    let script = parse(
        "{\"t_ms\": 40, \"event\": {\"type\": \"blur\"}}\n\
         {\"t_ms\": 10, \"event\": {\"type\": \"pointer_down\", \"button\": \"primary\"}}\n\
         {\"t_ms\": 10, \"event\": {\"type\": \"pointer_move\", \"dx\": 5, \"dy\": 0}}\n",
    )
    .unwrap();
    let times: Vec<f64> = script.iter().map(|entry| entry.t_ms).collect();
    assert_eq!(times, vec![10.0, 10.0, 40.0]);
    assert!(matches!(script[0].event, InputEvent::PointerDown { .. }));
    assert!(matches!(script[1].event, InputEvent::PointerMove { .. }));
}

#[test]
fn parse_reports_line_of_bad_entry() {
    let err = parse(
        "{\"t_ms\": 0, \"event\": {\"type\": \"blur\"}}\n\
         \n\
         {\"t_ms\": 5, \"event\": {\"type\": \"teleport\"}}\n",
    )
    .unwrap_err();
    assert!(matches!(err, DriverError::Script { line: 3, .. }), "{err}");
    assert!(err.to_string().starts_with("script line 3"));
}

#[test]
fn parse_rejects_negative_timestamp() {
    let err = parse("{\"t_ms\": -1, \"event\": {\"type\": \"blur\"}}").unwrap_err();
    assert!(matches!(err, DriverError::Timestamp { line: 1, .. }));
}

#[test]
fn parse_empty_script() {
    assert!(parse("").unwrap().is_empty());
}

// --- Replay::new ---

#[test]
fn replay_rejects_bad_fps() {
    assert!(matches!(Replay::new(0.0, true), Err(DriverError::Fps(_))));
    assert!(Replay::new(f64::NAN, true).is_err());
    assert!(Replay::new(-30.0, false).is_err());
    assert!(Replay::new(60.0, false).is_ok());
}

// --- Replay::run ---

#[test]
fn empty_script_yields_single_idle_frame() {
    let replay = Replay::new(60.0, true).unwrap();
    let (last, frames) = run(&replay, &[]);
    assert_eq!(frames.len(), 1);
    assert_eq!(last.frame, 0);
    assert_eq!(last.dt, 0.0);
    assert!(last.idle);
    assert_eq!(last.transform, Transform::IDENTITY);
}

#[test]
fn frames_advance_at_fixed_rate() {
    let script = parse("{\"t_ms\": 100, \"event\": {\"type\": \"blur\"}}").unwrap();
    let replay = Replay::new(50.0, false).unwrap();
    let (last, frames) = run(&replay, &script);
    let times: Vec<f64> = frames.iter().map(|record| record.t_ms).collect();
    assert_eq!(times, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(last.t_ms, 100.0);
    assert!((frames[1].dt - 0.02).abs() < 1e-12);
}

#[test]
fn held_key_pans_then_settles() {
    let script = parse(
        "{\"t_ms\": 0, \"event\": {\"type\": \"key_down\", \"key\": \"w\"}}\n\
         {\"t_ms\": 500, \"event\": {\"type\": \"key_up\", \"key\": \"w\"}}\n",
    )
    .unwrap();
    let replay = Replay::new(60.0, true).unwrap();
    let (last, frames) = run(&replay, &script);

    assert!(last.idle);
    assert!(last.t_ms > 500.0);
    assert!(last.transform.f > 0.0);
    assert_eq!(last.transform.e, 0.0);
    assert!(frames.iter().any(|record| !record.idle));
    // Once the key is released the pan only glides further in the same direction.
    let after_release: Vec<f64> =
        frames.iter().filter(|record| record.t_ms > 500.0).map(|record| record.transform.f).collect();
    assert!(after_release.windows(2).all(|pair| pair[1] >= pair[0]));
}

#[test]
fn no_settle_stops_at_last_event() {
    let script = parse(
        "{\"t_ms\": 0, \"event\": {\"type\": \"key_down\", \"key\": \"d\"}}\n\
         {\"t_ms\": 200, \"event\": {\"type\": \"key_up\", \"key\": \"d\"}}\n",
    )
    .unwrap();
    let replay = Replay::new(60.0, false).unwrap();
    let (last, _) = run(&replay, &script);
    assert!(last.t_ms >= 200.0);
    assert!(last.t_ms < 200.0 + 1000.0 / 60.0);
    assert!(!last.idle);
    assert!(last.transform.e < 0.0);
}

#[test]
fn settle_is_capped_when_key_stays_held() {
    let script = parse("{\"t_ms\": 0, \"event\": {\"type\": \"key_down\", \"key\": \"a\"}}").unwrap();
    let replay = Replay { max_settle_frames: 10, ..Replay::new(60.0, true).unwrap() };
    let (last, frames) = run(&replay, &script);
    assert_eq!(frames.len(), 10);
    assert!(!last.idle);
    assert!(last.transform.e > 0.0);
}

#[test]
fn wheel_on_first_frame_still_zooms() {
    let script = parse("{\"t_ms\": 0, \"event\": {\"type\": \"wheel\", \"dy\": 100}}").unwrap();
    let replay = Replay::new(60.0, true).unwrap();
    let (last, frames) = run(&replay, &script);
    assert_eq!(frames[0].dt, 0.0);
    assert!(last.idle);
    assert!(last.transform.a < 1.0);
    assert_eq!(last.transform.a, last.transform.d);
}

#[test]
fn frame_callback_error_stops_replay() {
    let script = parse("{\"t_ms\": 1000, \"event\": {\"type\": \"blur\"}}").unwrap();
    let replay = Replay::new(60.0, false).unwrap();
    let mut core = core();
    let mut seen = 0;
    let result = replay.run(&mut core, &script, |_| {
        seen += 1;
        if seen == 3 { Err(DriverError::Fps(0.0)) } else { Ok(()) }
    });
    assert!(result.is_err());
    assert_eq!(seen, 3);
}

#[test]
fn frame_record_serializes_transform() {
    let replay = Replay::new(60.0, true).unwrap();
    let (last, _) = run(&replay, &[]);
    let json = serde_json::to_value(last).unwrap();
    assert_eq!(json["frame"], 0);
    assert_eq!(json["transform"]["a"], 1.0);
    assert_eq!(json["idle"], true);
}
