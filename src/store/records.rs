use super::{RecordScan, Track};
use crate::core::filter::Filter;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::models::record::HEADER_TIME_FORMAT;
use crate::utils::fs::{create_dir, dir_exists, remove_dir_if_empty, write_file};
use crate::utils::time::start_of_day;
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::io::{self, ErrorKind};
use std::sync::Arc;
use tracing::debug;

impl Track {
    /// Write a record to its start-time path.
    ///
    /// Fails with `AlreadyExists` when a record with the same start exists
    /// and `force` is false.
    pub fn save_record(&self, record: &Record, force: bool) -> AppResult<()> {
        record.check()?;

        let path = self.record_path(record.start);
        create_dir(&self.record_dir(record.start.date_naive()))?;
        write_file(&path, &record.to_file_string()?, force)?;

        debug!(path = %path.display(), force, "record saved");
        Ok(())
    }

    /// Load the record started exactly at `start`.
    pub fn load_record(&self, start: DateTime<Local>) -> AppResult<Record> {
        let path = self.record_path(start);
        let content = fs::read_to_string(&path).map_err(|e| not_found_or_io(e, start))?;
        Record::from_file_str(&content)
    }

    /// Remove a record's file, then its day, month and year directories,
    /// each only if it became empty.
    pub fn delete_record(&self, record: &Record) -> AppResult<()> {
        let path = self.record_path(record.start);
        fs::remove_file(&path).map_err(|e| not_found_or_io(e, record.start))?;
        debug!(path = %path.display(), "record deleted");

        let mut dir = path.parent();
        for _ in 0..3 {
            let Some(d) = dir else { break };
            if !remove_dir_if_empty(d)? {
                break;
            }
            debug!(dir = %d.display(), "removed empty directory");
            dir = d.parent();
        }
        Ok(())
    }

    /// Start a lazy scan over the records matching `filter`.
    pub fn scan(&self, filter: Filter, reverse: bool) -> RecordScan {
        RecordScan::spawn(self.records_dir(), filter, reverse)
    }

    /// All matching records in chronological order.
    pub fn load_all_records(&self, filter: Filter) -> AppResult<Vec<Record>> {
        self.scan(filter, false).collect()
    }

    /// Records started on `date`. Fails with `NoRecordsForDate` when the
    /// day directory does not exist.
    pub fn load_date_records(&self, date: NaiveDate, filter: Filter) -> AppResult<Vec<Record>> {
        if !dir_exists(&self.record_dir(date))? {
            return Err(AppError::NoRecordsForDate(date.to_string()));
        }
        self.load_all_records(filter.between(Some(date), Some(date)))
    }

    /// Records touching `date`: those started that day plus those started
    /// the day before that are still running or end after midnight.
    pub fn load_exact_day(&self, date: NaiveDate) -> AppResult<Vec<Record>> {
        let day_start = start_of_day(date)?;

        let mut records = match date.pred_opt() {
            Some(prev) => {
                let reaches_into_day =
                    Arc::new(move |r: &Record| r.end.is_none_or(|e| e > day_start));
                empty_if_missing(
                    self.load_date_records(prev, Filter::all().with(reaches_into_day)),
                )?
            }
            None => Vec::new(),
        };

        records.extend(empty_if_missing(
            self.load_date_records(date, Filter::all()),
        )?);
        Ok(records)
    }

    /// Most recent record matching `filter`, found by a reverse scan that
    /// is canceled after the first hit.
    pub fn find_latest_matching(&self, filter: Filter) -> AppResult<Option<Record>> {
        let mut scan = self.scan(filter, true);
        let first = scan.next().transpose()?;
        scan.cancel();
        Ok(first)
    }

    pub fn find_latest(&self) -> AppResult<Option<Record>> {
        self.find_latest_matching(Filter::all())
    }

    /// The latest record if it is still running.
    pub fn open_record(&self) -> AppResult<Option<Record>> {
        Ok(self.find_latest()?.filter(|r| !r.has_ended()))
    }
}

/// Only a missing file is `NotFound`; other I/O failures stay `Io`.
fn not_found_or_io(e: io::Error, start: DateTime<Local>) -> AppError {
    if e.kind() == ErrorKind::NotFound {
        AppError::NotFound(start.format(HEADER_TIME_FORMAT).to_string())
    } else {
        AppError::Io(e)
    }
}

fn empty_if_missing(result: AppResult<Vec<Record>>) -> AppResult<Vec<Record>> {
    match result {
        Err(AppError::NoRecordsForDate(_)) => Ok(Vec::new()),
        other => other,
    }
}
