use crate::utils::time::clipped_duration;
use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};

/// A sub-interval of a record during which work was suspended.
/// `end == None` means the record is currently paused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pause {
    pub start: DateTime<Local>,
    pub end: Option<DateTime<Local>>,
    #[serde(default)]
    pub note: String,
}

impl Pause {
    pub fn new(start: DateTime<Local>, end: Option<DateTime<Local>>, note: &str) -> Self {
        Self {
            start,
            end,
            note: note.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Pause span clipped to `[min, max]`; an open pause runs until `now`.
    pub fn duration_at(
        &self,
        now: DateTime<Local>,
        min: Option<DateTime<Local>>,
        max: Option<DateTime<Local>>,
    ) -> TimeDelta {
        clipped_duration(self.start, self.end.unwrap_or(now), min, max)
    }
}
