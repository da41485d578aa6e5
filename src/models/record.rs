//! Record model, its pause ledger and duration arithmetic.

use super::pause::Pause;
use crate::errors::{AppError, AppResult};
use crate::utils::time::clipped_duration;
use chrono::{DateTime, Local, SubsecRound, TimeDelta};
use serde::{Deserialize, Serialize};

/// Marks tags inside a record note (`+tag`).
pub const TAG_PREFIX: &str = "+";

/// Prefix of the human-readable header line in record files.
pub const COMMENT_PREFIX: &str = "#";

/// Display format of the start time in the record file header.
pub const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single tracked work session for one project.
/// `end == None` means the record is still running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub project: String,
    pub start: DateTime<Local>,
    pub end: Option<DateTime<Local>>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pauses: Vec<Pause>,
}

impl Record {
    /// Open record starting at `start`, truncated to whole seconds since the
    /// start time is the record's storage key.
    pub fn new(project: &str, note: &str, tags: Vec<String>, start: DateTime<Local>) -> Self {
        Self {
            project: project.to_string(),
            start: start.trunc_subsecs(0),
            end: None,
            note: note.to_string(),
            tags,
            pauses: Vec::new(),
        }
    }

    pub fn has_ended(&self) -> bool {
        self.end.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.pauses.last().is_some_and(Pause::is_open)
    }

    /// End if closed, start otherwise.
    pub fn effective_end(&self) -> DateTime<Local> {
        self.end.unwrap_or(self.start)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    // ---------------------------
    // Pause ledger
    // ---------------------------

    /// Append a pause after the last one.
    pub fn insert_pause(
        &mut self,
        start: DateTime<Local>,
        end: Option<DateTime<Local>>,
        note: &str,
    ) -> AppResult<()> {
        match self.pauses.last() {
            Some(last) => match last.end {
                None => return Err(AppError::AlreadyPaused),
                Some(last_end) if start < last_end => return Err(AppError::PausesOverlap),
                Some(_) => {}
            },
            None if start < self.start => return Err(AppError::PauseBeforeRecordStart),
            None => {}
        }

        if let Some(e) = end
            && e < start
        {
            return Err(AppError::EndBeforeStart);
        }

        if let Some(record_end) = self.end
            && (start > record_end || end.is_none_or(|e| e > record_end))
        {
            return Err(AppError::PauseAfterRecordEnd);
        }

        self.pauses.push(Pause::new(start, end, note));
        Ok(())
    }

    /// Close the trailing open pause at `t`.
    pub fn end_pause(&mut self, t: DateTime<Local>) -> AppResult<()> {
        let record_end = self.end;
        let last = self.pauses.last_mut().ok_or(AppError::NoOpenPause)?;

        if last.end.is_some() {
            return Err(AppError::PauseAlreadyClosed);
        }
        if t < last.start {
            return Err(AppError::EndBeforeStart);
        }
        if record_end.is_some_and(|e| t > e) {
            return Err(AppError::PauseAfterRecordEnd);
        }

        last.end = Some(t);
        Ok(())
    }

    /// Remove the last pause (undo).
    pub fn pop_pause(&mut self) -> AppResult<Pause> {
        self.pauses.pop().ok_or(AppError::NoPauses)
    }

    /// Close the record at `t`.
    ///
    /// Trailing pauses that are still open or reach past the new end are
    /// discarded, and the end rewinds to where each of them began.
    pub fn stop_at(&mut self, t: DateTime<Local>) -> AppResult<()> {
        if t < self.start {
            return Err(AppError::EndBeforeStart);
        }

        let mut end = t;
        while let Some(last) = self.pauses.last() {
            if last.end.is_some_and(|e| e <= end) {
                break;
            }
            end = last.start;
            self.pauses.pop();
        }

        self.end = Some(end);
        Ok(())
    }

    /// Validate the full record, reporting the first violated rule.
    pub fn check(&self) -> AppResult<()> {
        if let Some(end) = self.end
            && end < self.start
        {
            return Err(AppError::EndBeforeStart);
        }

        let mut prev: Option<&Pause> = None;
        for pause in &self.pauses {
            if pause.start < self.start {
                return Err(AppError::PauseBeforeRecordStart);
            }
            if let Some(p) = prev {
                if pause.start < p.start {
                    return Err(AppError::PausesOutOfOrder);
                }
                match p.end {
                    None => return Err(AppError::OpenPauseNotLast),
                    Some(prev_end) if pause.start < prev_end => {
                        return Err(AppError::PausesOverlap);
                    }
                    Some(_) => {}
                }
            }
            if let Some(pause_end) = pause.end
                && pause_end < pause.start
            {
                return Err(AppError::EndBeforeStart);
            }
            if let Some(end) = self.end
                && (pause.start > end || pause.end.is_none_or(|e| e > end))
            {
                return Err(AppError::PauseAfterRecordEnd);
            }
            prev = Some(pause);
        }

        Ok(())
    }

    // ---------------------------
    // Durations
    // ---------------------------

    /// End (or now) minus start, clipped to `[min, max]`.
    pub fn total_duration(
        &self,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        self.total_duration_at(Local::now(), min, max)
    }

    /// Sum of all pause spans, clipped to `[min, max]`.
    pub fn pause_duration(
        &self,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        self.pause_duration_at(Local::now(), min, max)
    }

    /// Active work time: total minus pauses.
    pub fn duration(&self, min: Option<DateTime<Local>>, max: Option<DateTime<Local>>) -> TimeDelta {
        self.duration_at(Local::now(), min, max)
    }

    /// Length of the trailing open pause, zero when not paused.
    pub fn current_pause_duration(
        &self,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        self.current_pause_duration_at(Local::now(), min, max)
    }

    pub fn total_duration_at(
        &self,
        now: DateTime<Local>,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        clipped_duration(self.start, self.end.unwrap_or(now), min, max)
    }

    pub fn pause_duration_at(
        &self,
        now: DateTime<Local>,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        self.pauses
            .iter()
            .map(|p| p.duration_at(now, min, max))
            .fold(TimeDelta::zero(), |acc, d| acc + d)
    }

    pub fn current_pause_duration_at(
        &self,
        now: DateTime<Local>,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        match self.pauses.last() {
            Some(p) if p.is_open() => p.duration_at(now, min, max),
            _ => TimeDelta::zero(),
        }
    }

    pub fn duration_at(
        &self,
        now: DateTime<Local>,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        self.total_duration_at(now, min, max) - self.pause_duration_at(now, min, max)
    }

    // ---------------------------
    // Wire format
    // ---------------------------

    /// Serialize to the on-disk form: a header comment, a blank line, then YAML.
    pub fn to_file_string(&self) -> AppResult<String> {
        let body = serde_yaml::to_string(self)?;
        Ok(format!(
            "{} Record {}\n\n{}",
            COMMENT_PREFIX,
            self.start.format(HEADER_TIME_FORMAT),
            body
        ))
    }

    pub fn from_file_str(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Collect `+tag` words from free-text tokens, without the prefix and
    /// without duplicates, in order of first appearance.
    pub fn extract_tags<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for word in tokens.iter().flat_map(|t| t.as_ref().split_whitespace()) {
            if let Some(tag) = word.strip_prefix(TAG_PREFIX)
                && !tag.is_empty()
                && !tags.iter().any(|t| t == tag)
            {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}
