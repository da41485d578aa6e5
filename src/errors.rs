//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Record store
    // ---------------------------
    #[error("No record found at {0}")]
    NotFound(String),

    #[error("No records for date {0}")]
    NoRecordsForDate(String),

    #[error("Record already exists at {0}")]
    AlreadyExists(String),

    #[error("Malformed record path: {0}")]
    MalformedPath(String),

    // ---------------------------
    // Pause ledger / record consistency
    // ---------------------------
    #[error("End time is before start time")]
    EndBeforeStart,

    #[error("Pause starts before the record start")]
    PauseBeforeRecordStart,

    #[error("Pause ends after the record end")]
    PauseAfterRecordEnd,

    #[error("Pauses are not in chronological order")]
    PausesOutOfOrder,

    #[error("Pauses overlap")]
    PausesOverlap,

    #[error("Only the last pause may be open")]
    OpenPauseNotLast,

    #[error("Record is not paused")]
    NoOpenPause,

    #[error("Last pause is already closed")]
    PauseAlreadyClosed,

    #[error("Record is already paused")]
    AlreadyPaused,

    #[error("Record has no pauses")]
    NoPauses,

    // ---------------------------
    // Operational errors
    // ---------------------------
    #[error("No running record")]
    NoActiveRecord,

    #[error("Record for project '{0}' is still running")]
    ActiveRecordExists(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid project name: '{0}'")]
    InvalidProjectName(String),

    #[error("Project already exists: {0}")]
    ProjectExists(String),

    #[error("BUG! Project '{0}' not in project tree")]
    ProjectNotInTree(String),

    #[error("Project hierarchy contains a cycle at '{0}'")]
    ProjectCycle(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,
}

impl AppError {
    /// True for the "nothing stored here" conditions callers usually treat as empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::NoRecordsForDate(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
