//! Filesystem-backed storage: records sharded by start date, and projects.
//!
//! Layout: `<root>/<workspace>/records/<YYYY>/<MM>/<DD>/<HH-MM-SS>.yml` and
//! `<root>/<workspace>/projects/<name>.yml`.

pub mod projects;
pub mod records;
pub mod scan;

use crate::config::Config;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use std::path::PathBuf;

pub use projects::ProjectSource;
pub use scan::RecordScan;

pub const RECORDS_DIR_NAME: &str = "records";
pub const PROJECTS_DIR_NAME: &str = "projects";
pub const RECORD_EXT: &str = "yml";
pub const FILE_TIME_FORMAT: &str = "%H-%M-%S";

/// Handle on one workspace of the store.
#[derive(Debug, Clone)]
pub struct Track {
    root: PathBuf,
    workspace: String,
}

impl Track {
    pub fn new(root: impl Into<PathBuf>, workspace: &str) -> Self {
        Self {
            root: root.into(),
            workspace: workspace.to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(crate::utils::path::expand_home(&cfg.root), &cfg.workspace)
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    pub fn workspace_dir(&self) -> PathBuf {
        self.root.join(&self.workspace)
    }

    pub fn records_dir(&self) -> PathBuf {
        self.workspace_dir().join(RECORDS_DIR_NAME)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.workspace_dir().join(PROJECTS_DIR_NAME)
    }

    /// Day directory holding the records started on `date`.
    pub fn record_dir(&self, date: NaiveDate) -> PathBuf {
        self.records_dir()
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
    }

    /// File path of the record started at `start`.
    pub fn record_path(&self, start: DateTime<Local>) -> PathBuf {
        self.record_dir(start.date_naive()).join(format!(
            "{}.{}",
            start.format(FILE_TIME_FORMAT),
            RECORD_EXT
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;

    #[test]
    fn record_path_follows_date_layout() {
        let track = Track::new("/data", "work");
        let t = Local
            .with_ymd_and_hms(2025, 3, 7, 8, 5, 9)
            .single()
            .unwrap();

        let expected = Path::new("/data/work/records/2025/03/07/08-05-09.yml");
        assert_eq!(track.record_path(t), expected);
    }
}
