use chrono::TimeDelta;
use rtrack::core::filter::{Filter, by_tags_any};
use rtrack::core::report::{ReportLogic, TimeRange};
use rtrack::errors::AppError;
use rtrack::models::{Project, Record};

mod common;
use common::{at, save_closed, save_projects, temp_track};

fn mins(m: i64) -> TimeDelta {
    TimeDelta::minutes(m)
}

/// P -> {C1 -> {G}, C2}, plus an unrelated root Q.
fn seed(track: &rtrack::store::Track) {
    save_projects(
        track,
        &[
            ("P", None),
            ("C1", Some("P")),
            ("C2", Some("P")),
            ("G", Some("C1")),
            ("Q", None),
        ],
    );
    save_closed(track, "P", at(2025, 6, 2, 8, 0), at(2025, 6, 2, 9, 0));
    save_closed(track, "C1", at(2025, 6, 2, 9, 0), at(2025, 6, 2, 9, 30));
    save_closed(track, "C2", at(2025, 6, 2, 10, 0), at(2025, 6, 2, 10, 15));
    save_closed(track, "G", at(2025, 6, 3, 8, 0), at(2025, 6, 3, 8, 10));
    save_closed(track, "Q", at(2025, 6, 3, 9, 0), at(2025, 6, 3, 11, 0));
}

#[test]
fn totals_roll_up_through_every_level() {
    let (_dir, track) = temp_track();
    seed(&track);

    let report =
        ReportLogic::new_report(&track, &track, &[], Filter::all(), TimeRange::default()).unwrap();

    assert_eq!(report.direct["P"], mins(60));
    assert_eq!(report.totals["P"], mins(60 + 30 + 15 + 10));
    assert_eq!(report.totals["C1"], mins(40));
    assert_eq!(report.totals["C2"], mins(15));
    assert_eq!(report.totals["G"], mins(10));
    assert_eq!(report.totals["Q"], mins(120));
    assert_eq!(report.records.len(), 5);

    assert_eq!(report.time_range.start, Some(at(2025, 6, 2, 8, 0)));
    assert_eq!(report.time_range.end, Some(at(2025, 6, 3, 11, 0)));
}

#[test]
fn subset_expands_to_descendants_only() {
    let (_dir, track) = temp_track();
    seed(&track);

    let report = ReportLogic::new_report(
        &track,
        &track,
        &["C1".to_string()],
        Filter::all(),
        TimeRange::default(),
    )
    .unwrap();

    let names: Vec<&str> = report.projects.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["C1", "G"]);
    assert_eq!(report.totals["C1"], mins(40));
    assert!(!report.totals.contains_key("P"));
    assert_eq!(report.records.len(), 2);
}

#[test]
fn unknown_project_is_rejected() {
    let (_dir, track) = temp_track();
    seed(&track);

    let err = ReportLogic::new_report(
        &track,
        &track,
        &["nope".to_string()],
        Filter::all(),
        TimeRange::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::ProjectNotFound(_)));
}

#[test]
fn durations_are_clipped_to_window() {
    let (_dir, track) = temp_track();
    seed(&track);

    let window = TimeRange::new(Some(at(2025, 6, 2, 8, 30)), Some(at(2025, 6, 2, 9, 15)));
    let report = ReportLogic::new_report(&track, &track, &[], Filter::all(), window).unwrap();

    assert_eq!(report.direct["P"], mins(30));
    assert_eq!(report.direct["C1"], mins(15));
    assert_eq!(report.direct["C2"], TimeDelta::zero());
    assert_eq!(report.totals["P"], mins(45));
    assert_eq!(window.duration(), mins(45));
}

#[test]
fn pauses_are_excluded_and_filters_apply() {
    let (_dir, track) = temp_track();
    save_projects(&track, &[("dev", None)]);

    let mut tagged = Record::new("dev", "+focus", vec!["focus".into()], at(2025, 6, 2, 9, 0));
    tagged
        .insert_pause(at(2025, 6, 2, 9, 20), Some(at(2025, 6, 2, 9, 30)), "")
        .unwrap();
    tagged.end = Some(at(2025, 6, 2, 10, 0));
    track.save_record(&tagged, false).unwrap();
    save_closed(&track, "dev", at(2025, 6, 2, 11, 0), at(2025, 6, 2, 12, 0));

    let filter = Filter::all().with(by_tags_any(&["focus"]));
    let report = ReportLogic::new_report(&track, &track, &[], filter, TimeRange::default()).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.totals["dev"], mins(50));
}

#[test]
fn in_memory_project_source_is_accepted() {
    let (_dir, track) = temp_track();
    save_closed(&track, "child", at(2025, 6, 2, 9, 0), at(2025, 6, 2, 10, 0));

    let projects = vec![Project::new("root", None), Project::new("child", Some("root"))];
    let report =
        ReportLogic::new_report(&track, &projects, &[], Filter::all(), TimeRange::default())
            .unwrap();

    assert_eq!(report.totals["root"], mins(60));
    assert_eq!(report.direct["root"], TimeDelta::zero());
}
