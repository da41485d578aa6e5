//! Start/stop/pause/resume of the running record.
//!
//! Every mutation validates the record and overwrites its file.

use crate::core::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::models::record::HEADER_TIME_FORMAT;
use crate::store::Track;
use chrono::{DateTime, Local};

pub struct SessionLogic;

impl SessionLogic {
    /// Create and save a new open record.
    ///
    /// Refuses to start while another record is still running.
    pub fn start(
        track: &Track,
        project: &str,
        note: &str,
        tags: Vec<String>,
        start: DateTime<Local>,
    ) -> AppResult<Record> {
        if let Some(open) = track.open_record()? {
            return Err(AppError::ActiveRecordExists(open.project));
        }

        let record = Record::new(project, note, tags, start);
        track.save_record(&record, false)?;

        ttlog_quiet(track, "start", project, &describe(&record));
        Ok(record)
    }

    /// Close the running record at `end`; stopping while paused rewinds
    /// the end to the start of the trailing pause.
    pub fn stop(track: &Track, end: DateTime<Local>) -> AppResult<Record> {
        let mut record = Self::running(track)?;
        record.stop_at(end)?;
        track.save_record(&record, true)?;

        ttlog_quiet(track, "stop", &record.project, &describe(&record));
        Ok(record)
    }

    pub fn pause(track: &Track, start: DateTime<Local>, note: &str) -> AppResult<Record> {
        let mut record = Self::running(track)?;
        record.insert_pause(start, None, note)?;
        track.save_record(&record, true)?;

        ttlog_quiet(
            track,
            "pause",
            &record.project,
            &format!("paused at {}", start.format(HEADER_TIME_FORMAT)),
        );
        Ok(record)
    }

    pub fn resume(track: &Track, end: DateTime<Local>) -> AppResult<Record> {
        let mut record = Self::running(track)?;
        record.end_pause(end)?;
        track.save_record(&record, true)?;

        ttlog_quiet(
            track,
            "resume",
            &record.project,
            &format!("resumed at {}", end.format(HEADER_TIME_FORMAT)),
        );
        Ok(record)
    }

    /// Drop the last pause of the running record.
    pub fn undo_pause(track: &Track) -> AppResult<Record> {
        let mut record = Self::running(track)?;
        let removed = record.pop_pause()?;
        track.save_record(&record, true)?;

        ttlog_quiet(
            track,
            "unpause",
            &record.project,
            &format!(
                "removed pause from {}",
                removed.start.format(HEADER_TIME_FORMAT)
            ),
        );
        Ok(record)
    }

    /// Delete the record started at `start`.
    pub fn delete(track: &Track, start: DateTime<Local>) -> AppResult<Record> {
        let record = track.load_record(start)?;
        track.delete_record(&record)?;

        ttlog_quiet(track, "del", &record.project, &describe(&record));
        Ok(record)
    }

    fn running(track: &Track) -> AppResult<Record> {
        track.open_record()?.ok_or(AppError::NoActiveRecord)
    }
}

fn describe(record: &Record) -> String {
    match record.end {
        Some(end) => format!(
            "{} - {}",
            record.start.format(HEADER_TIME_FORMAT),
            end.format(HEADER_TIME_FORMAT)
        ),
        None => format!("{} - open", record.start.format(HEADER_TIME_FORMAT)),
    }
}
