#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use rtrack::models::{Project, Record};
use rtrack::store::Track;
use tempfile::TempDir;

pub fn rtr() -> Command {
    cargo_bin_cmd!("rtrack")
}

/// Fresh store in a temp dir; keep the `TempDir` alive for the test.
pub fn temp_track() -> (TempDir, Track) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let track = Track::new(dir.path(), "test");
    (dir, track)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, mi, 0)
        .single()
        .expect("unambiguous local time")
}

pub fn closed_record(project: &str, start: DateTime<Local>, end: DateTime<Local>) -> Record {
    let mut r = Record::new(project, "", Vec::new(), start);
    r.end = Some(end);
    r
}

pub fn save_closed(
    track: &Track,
    project: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
) -> Record {
    let r = closed_record(project, start, end);
    track.save_record(&r, false).expect("save record");
    r
}

pub fn save_projects(track: &Track, items: &[(&str, Option<&str>)]) {
    for (name, parent) in items {
        track
            .save_project(&Project::new(name, *parent), false)
            .expect("save project");
    }
}

/// 100 closed records, 20 per day on 2025-06-01..=2025-06-05, every 10
/// minutes from 08:00, 5 minutes long.
pub fn populate_five_days(track: &Track) -> Vec<Record> {
    let mut out = Vec::new();
    for day in 1..=5 {
        for i in 0..20u32 {
            let start = at(2025, 6, day, 8 + i / 6, (i % 6) * 10);
            let end = start + chrono::TimeDelta::minutes(5);
            out.push(save_closed(track, if i % 2 == 0 { "even" } else { "odd" }, start, end));
        }
    }
    out
}
