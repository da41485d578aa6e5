//! Lazy, cancelable traversal of the record directory tree.
//!
//! A background thread walks `<YYYY>/<MM>/<DD>` directories, skipping
//! branches outside the filter's date bound before any file is opened, and
//! pushes matching records into a bounded channel. The consumer pulls
//! through the [`Iterator`] impl and may cancel at any time.

use crate::core::filter::Filter;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::utils::fs::{dir_exists, list_dir};
use chrono::{Datelike, NaiveDate};
use crossbeam::channel::{Receiver, Sender, bounded};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

use super::RECORD_EXT;

/// Capacity of the queue between the directory walk and the consumer.
pub const SCAN_QUEUE_CAPACITY: usize = 32;

/// Handle on a running scan. Yields `Ok(record)` items in walk order and at
/// most one `Err`, after which the sequence ends.
///
/// Dropping the handle cancels the scan.
pub struct RecordScan {
    rx: Option<Receiver<AppResult<Record>>>,
    cancel: Arc<AtomicBool>,
    loaded: Arc<AtomicUsize>,
    handle: Option<JoinHandle<()>>,
}

impl RecordScan {
    pub(crate) fn spawn(records_dir: PathBuf, filter: Filter, reverse: bool) -> Self {
        let (tx, rx) = bounded(SCAN_QUEUE_CAPACITY);
        let cancel = Arc::new(AtomicBool::new(false));
        let loaded = Arc::new(AtomicUsize::new(0));

        let walker = Walker {
            filter,
            reverse,
            tx,
            cancel: Arc::clone(&cancel),
            loaded: Arc::clone(&loaded),
        };
        let handle = thread::spawn(move || walker.run(&records_dir));

        Self {
            rx: Some(rx),
            cancel,
            loaded,
            handle: Some(handle),
        }
    }

    /// Stop the scan. Returns once the background walk has exited; no more
    /// records are read afterwards.
    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        // Dropping the receiver unblocks a producer waiting on a full queue.
        self.rx = None;
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("record scan thread panicked");
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Number of record files deserialized so far, matching or not.
    pub fn files_loaded(&self) -> usize {
        self.loaded.load(Ordering::SeqCst)
    }
}

impl Iterator for RecordScan {
    type Item = AppResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for RecordScan {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Why the walk ended early.
enum Halt {
    Stopped,
    Failed(AppError),
}

impl From<AppError> for Halt {
    fn from(e: AppError) -> Self {
        Halt::Failed(e)
    }
}

struct Walker {
    filter: Filter,
    reverse: bool,
    tx: Sender<AppResult<Record>>,
    cancel: Arc<AtomicBool>,
    loaded: Arc<AtomicUsize>,
}

impl Walker {
    fn run(self, records_dir: &Path) {
        debug!(dir = %records_dir.display(), reverse = self.reverse, "record scan started");
        match self.walk(records_dir) {
            Ok(()) => debug!("record scan completed"),
            Err(Halt::Stopped) => debug!("record scan canceled"),
            Err(Halt::Failed(e)) => {
                debug!(error = %e, "record scan failed");
                if !self.is_canceled() {
                    let _ = self.tx.send(Err(e));
                }
            }
        }
    }

    fn is_canceled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn walk(&self, records_dir: &Path) -> Result<(), Halt> {
        if !dir_exists(records_dir)? {
            return Ok(());
        }

        for (year, year_dir) in self.numeric_dirs(records_dir)? {
            let year = i32::try_from(year)
                .map_err(|_| AppError::MalformedPath(year_dir.display().to_string()))?;
            if !self.year_in_range(year) {
                continue;
            }

            for (month, month_dir) in self.numeric_dirs(&year_dir)? {
                if !self.month_in_range(year, month) {
                    continue;
                }

                for (day, day_dir) in self.numeric_dirs(&month_dir)? {
                    let date = NaiveDate::from_ymd_opt(year, month, day)
                        .ok_or_else(|| AppError::MalformedPath(day_dir.display().to_string()))?;
                    if !self.filter.includes_date(date) {
                        continue;
                    }
                    self.walk_day(&day_dir)?;
                }
            }
        }

        Ok(())
    }

    fn walk_day(&self, day_dir: &Path) -> Result<(), Halt> {
        let mut files: Vec<String> = list_dir(day_dir)?
            .into_iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.name)
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .is_some_and(|ext| ext == RECORD_EXT)
            })
            .collect();
        files.sort();
        if self.reverse {
            files.reverse();
        }

        for name in files {
            if self.is_canceled() {
                return Err(Halt::Stopped);
            }

            let path = day_dir.join(&name);
            let content = fs::read_to_string(&path).map_err(AppError::from)?;
            let record = Record::from_file_str(&content)?;
            self.loaded.fetch_add(1, Ordering::SeqCst);

            if !self.filter.matches(&record) {
                continue;
            }

            if self.is_canceled() || self.tx.send(Ok(record)).is_err() {
                return Err(Halt::Stopped);
            }
        }

        Ok(())
    }

    /// Sub-directories with numeric names, sorted in walk order. Other
    /// entries are skipped.
    fn numeric_dirs(&self, dir: &Path) -> Result<Vec<(u32, PathBuf)>, Halt> {
        let mut out: Vec<(u32, PathBuf)> = Vec::new();
        for entry in list_dir(dir)? {
            if !entry.is_dir {
                continue;
            }
            match entry.name.parse::<u32>() {
                Ok(n) => out.push((n, dir.join(&entry.name))),
                Err(_) => debug!(dir = %dir.display(), entry = %entry.name, "skipping non-numeric entry"),
            }
        }
        out.sort_by_key(|(n, _)| *n);
        if self.reverse {
            out.reverse();
        }
        Ok(out)
    }

    fn year_in_range(&self, year: i32) -> bool {
        self.filter.start.is_none_or(|s| year >= s.year())
            && self.filter.end.is_none_or(|e| year <= e.year())
    }

    fn month_in_range(&self, year: i32, month: u32) -> bool {
        self.filter
            .start
            .is_none_or(|s| (year, month) >= (s.year(), s.month()))
            && self
                .filter
                .end
                .is_none_or(|e| (year, month) <= (e.year(), e.month()))
    }
}
