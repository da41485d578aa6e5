//! Record filter predicates and the date bounds used to prune scans.

use crate::models::{Project, Record};
use chrono::{DateTime, Local, NaiveDate};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A pure predicate over a single record.
pub type FilterFunction = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Predicates combined by logical AND, plus an inclusive date bound on the
/// record start used to skip whole year/month/day directories.
#[derive(Clone, Default)]
pub struct Filter {
    pub functions: Vec<FilterFunction>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Filter {
    /// Matches every record in the store.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, f: FilterFunction) -> Self {
        self.functions.push(f);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Evaluated left to right, stopping at the first predicate that fails.
    pub fn matches(&self, record: &Record) -> bool {
        self.functions.iter().all(|f| f(record))
    }

    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

pub fn by_projects<S: AsRef<str>>(names: &[S]) -> FilterFunction {
    let set: HashSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    Arc::new(move |r: &Record| set.contains(&r.project))
}

/// Matches records whose project's archived flag equals `archived`.
///
/// A project missing from `projects` counts as not archived.
pub fn by_archived(archived: bool, projects: HashMap<String, Project>) -> FilterFunction {
    Arc::new(move |r: &Record| {
        projects
            .get(&r.project)
            .map(|p| p.archived)
            .unwrap_or_default()
            == archived
    })
}

pub fn by_tags_any<S: AsRef<str>>(tags: &[S]) -> FilterFunction {
    let set: HashSet<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();
    Arc::new(move |r: &Record| r.tags.iter().any(|t| set.contains(t)))
}

pub fn by_tags_all<S: AsRef<str>>(tags: &[S]) -> FilterFunction {
    let wanted: Vec<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();
    Arc::new(move |r: &Record| wanted.iter().all(|t| r.has_tag(t)))
}

/// Keeps records that overlap `(start, end)`. Absent bounds are open.
///
/// Open records are compared by their start time only.
pub fn by_time_range(
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
) -> FilterFunction {
    Arc::new(move |r: &Record| {
        let before_end = end.is_none_or(|e| r.start < e);
        match r.end {
            None => start.is_none_or(|s| r.start > s) && before_end,
            Some(rec_end) => start.is_none_or(|s| rec_end > s) && before_end,
        }
    })
}
