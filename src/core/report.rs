//! Per-project duration totals rolled up through the project tree.

use crate::core::filter::{Filter, by_projects};
use crate::core::tree::ProjectTree;
use crate::errors::{AppError, AppResult};
use crate::models::{Project, Record};
use crate::store::{ProjectSource, Track};
use chrono::{DateTime, Local, TimeDelta};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A time range where either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
}

impl TimeRange {
    pub fn new(start: Option<DateTime<Local>>, end: Option<DateTime<Local>>) -> Self {
        Self { start, end }
    }

    /// Zero unless both sides are set.
    pub fn duration(&self) -> TimeDelta {
        match (self.start, self.end) {
            (Some(s), Some(e)) => e - s,
            _ => TimeDelta::zero(),
        }
    }

    /// Widen the range to cover `[start, end]`.
    fn extend(&mut self, start: DateTime<Local>, end: DateTime<Local>) {
        if self.start.is_none_or(|s| start < s) {
            self.start = Some(start);
        }
        if self.end.is_none_or(|e| end > e) {
            self.end = Some(end);
        }
    }
}

/// Result of a report query.
#[derive(Debug, Clone)]
pub struct Report {
    /// Effective project set: requested projects plus their descendants.
    pub projects: BTreeMap<String, Project>,
    /// Own time plus the time of all descendants in the effective set.
    pub totals: BTreeMap<String, TimeDelta>,
    /// Time recorded directly on each project.
    pub direct: BTreeMap<String, TimeDelta>,
    pub records: Vec<Record>,
    /// Earliest start and latest effective end among the matched records.
    pub time_range: TimeRange,
    pub tree: ProjectTree,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Build a report over `projects` (all projects when empty) and their
    /// descendants. Record durations are clipped to `window`.
    pub fn new_report(
        track: &Track,
        source: &dyn ProjectSource,
        projects: &[String],
        filter: Filter,
        window: TimeRange,
    ) -> AppResult<Report> {
        let all_projects = source.load_all_projects()?;
        let tree = ProjectTree::new(&all_projects);
        let selected = Self::effective_projects(&all_projects, &tree, projects)?;

        let names: Vec<&String> = selected.keys().collect();
        let filter = filter.with(by_projects(&names));

        let mut direct: BTreeMap<String, TimeDelta> = selected
            .keys()
            .map(|name| (name.clone(), TimeDelta::zero()))
            .collect();
        let mut time_range = TimeRange::default();
        let mut records = Vec::new();
        let now = Local::now();

        for record in track.scan(filter, false) {
            let record = record?;
            let d = record.duration_at(now, window.start, window.end);
            *direct
                .entry(record.project.clone())
                .or_insert_with(TimeDelta::zero) += d;
            time_range.extend(record.start, record.effective_end());
            records.push(record);
        }

        let totals = Self::roll_up(&tree, &direct)?;
        debug!(
            projects = selected.len(),
            records = records.len(),
            "report aggregated"
        );

        Ok(Report {
            projects: selected,
            totals,
            direct,
            records,
            time_range,
            tree,
        })
    }

    /// The requested projects plus all their transitive descendants.
    pub fn effective_projects(
        all_projects: &HashMap<String, Project>,
        tree: &ProjectTree,
        requested: &[String],
    ) -> AppResult<BTreeMap<String, Project>> {
        if requested.is_empty() {
            return Ok(all_projects
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect());
        }

        let mut selected = BTreeMap::new();
        for name in requested {
            let project = all_projects
                .get(name)
                .ok_or_else(|| AppError::ProjectNotFound(name.clone()))?;
            selected.insert(project.name.clone(), project.clone());
            for child in tree.descendants(name)? {
                selected
                    .entry(child.name.clone())
                    .or_insert_with(|| child.clone());
            }
        }
        Ok(selected)
    }

    /// Add each project's direct time to every ancestor that is part of the
    /// same report.
    pub fn roll_up(
        tree: &ProjectTree,
        direct: &BTreeMap<String, TimeDelta>,
    ) -> AppResult<BTreeMap<String, TimeDelta>> {
        let mut totals = direct.clone();
        for (project, own) in direct {
            for ancestor in tree.ancestors(project)? {
                if let Some(total) = totals.get_mut(&ancestor.name) {
                    *total += *own;
                }
            }
        }
        Ok(totals)
    }
}
