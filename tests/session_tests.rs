use chrono::TimeDelta;
use rtrack::core::log::read_log;
use rtrack::core::session::SessionLogic;
use rtrack::errors::AppError;

mod common;
use common::{at, save_closed, temp_track};

#[test]
fn start_pause_resume_stop_cycle() {
    let (_dir, track) = temp_track();

    let started = SessionLogic::start(
        &track,
        "dev",
        "+rust refactor",
        vec!["rust".into()],
        at(2025, 6, 2, 9, 0),
    )
    .unwrap();
    assert!(!started.has_ended());

    SessionLogic::pause(&track, at(2025, 6, 2, 10, 0), "lunch").unwrap();
    assert!(track.open_record().unwrap().unwrap().is_paused());

    SessionLogic::resume(&track, at(2025, 6, 2, 10, 30)).unwrap();
    let stopped = SessionLogic::stop(&track, at(2025, 6, 2, 12, 0)).unwrap();

    assert_eq!(stopped.duration(None, None), TimeDelta::minutes(150));
    assert_eq!(track.load_record(started.start).unwrap(), stopped);
    assert!(track.open_record().unwrap().is_none());

    let ops: Vec<String> = read_log(&track)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert_eq!(ops, vec!["start", "pause", "resume", "stop"]);
}

#[test]
fn stopping_while_paused_ends_at_pause_start() {
    let (_dir, track) = temp_track();
    SessionLogic::start(&track, "dev", "", Vec::new(), at(2025, 6, 2, 9, 0)).unwrap();
    SessionLogic::pause(&track, at(2025, 6, 2, 11, 0), "").unwrap();

    let stopped = SessionLogic::stop(&track, at(2025, 6, 2, 12, 0)).unwrap();
    assert_eq!(stopped.end, Some(at(2025, 6, 2, 11, 0)));
    assert!(stopped.pauses.is_empty());
}

#[test]
fn second_start_is_refused_while_running() {
    let (_dir, track) = temp_track();
    SessionLogic::start(&track, "dev", "", Vec::new(), at(2025, 6, 2, 9, 0)).unwrap();

    let err = SessionLogic::start(&track, "ops", "", Vec::new(), at(2025, 6, 2, 9, 30))
        .unwrap_err();
    assert!(matches!(err, AppError::ActiveRecordExists(p) if p == "dev"));
}

#[test]
fn mutations_need_a_running_record() {
    let (_dir, track) = temp_track();
    save_closed(&track, "dev", at(2025, 6, 2, 9, 0), at(2025, 6, 2, 10, 0));

    assert!(matches!(
        SessionLogic::stop(&track, at(2025, 6, 2, 11, 0)),
        Err(AppError::NoActiveRecord)
    ));
    assert!(matches!(
        SessionLogic::pause(&track, at(2025, 6, 2, 11, 0), ""),
        Err(AppError::NoActiveRecord)
    ));
    assert!(matches!(
        SessionLogic::undo_pause(&track),
        Err(AppError::NoActiveRecord)
    ));
}

#[test]
fn pause_rules_are_enforced() {
    let (_dir, track) = temp_track();
    SessionLogic::start(&track, "dev", "", Vec::new(), at(2025, 6, 2, 9, 0)).unwrap();

    assert!(matches!(
        SessionLogic::resume(&track, at(2025, 6, 2, 9, 30)),
        Err(AppError::NoOpenPause)
    ));
    assert!(matches!(
        SessionLogic::pause(&track, at(2025, 6, 2, 8, 0), ""),
        Err(AppError::PauseBeforeRecordStart)
    ));

    SessionLogic::pause(&track, at(2025, 6, 2, 10, 0), "").unwrap();
    assert!(matches!(
        SessionLogic::pause(&track, at(2025, 6, 2, 10, 5), ""),
        Err(AppError::AlreadyPaused)
    ));

    let record = SessionLogic::undo_pause(&track).unwrap();
    assert!(record.pauses.is_empty());
    assert!(matches!(
        SessionLogic::undo_pause(&track),
        Err(AppError::NoPauses)
    ));
}

#[test]
fn delete_removes_record_and_logs() {
    let (_dir, track) = temp_track();
    let r = save_closed(&track, "dev", at(2025, 6, 2, 9, 0), at(2025, 6, 2, 10, 0));

    let deleted = SessionLogic::delete(&track, r.start).unwrap();
    assert_eq!(deleted, r);
    assert!(track.load_record(r.start).unwrap_err().is_not_found());

    let log = read_log(&track).unwrap();
    assert_eq!(log.last().map(|e| e.operation.as_str()), Some("del"));
}
