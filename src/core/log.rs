//! Internal operation log: one JSON object per line in
//! `<root>/<workspace>/log.jsonl`.

use crate::errors::{AppError, AppResult};
use crate::store::Track;
use crate::utils::fs::create_dir;
use ansi_term::Colour;
use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

pub const LOG_FILE_NAME: &str = "log.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn log_path(track: &Track) -> PathBuf {
    track.workspace_dir().join(LOG_FILE_NAME)
}

/// Append an entry to the operation log.
pub fn ttlog(track: &Track, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let entry = LogEntry {
        date: Local::now().to_rfc3339(),
        operation: operation.to_string(),
        target: target.to_string(),
        message: message.to_string(),
    };

    create_dir(&track.workspace_dir())?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(track))?;
    writeln!(file, "{}", serde_json::to_string(&entry)?)?;
    Ok(())
}

/// Like [`ttlog`], but a failure only produces a warning.
pub fn ttlog_quiet(track: &Track, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(track, operation, target, message) {
        warn!(error = %e, "failed to write internal log");
    }
}

pub fn read_log(track: &Track) -> AppResult<Vec<LogEntry>> {
    let path = log_path(track);
    if !path.exists() {
        return Ok(Vec::new());
    }
    fs::read_to_string(path)?
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<LogEntry>(l).map_err(AppError::from))
        .collect()
}

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "stop" => Colour::Red,
        "pause" | "resume" | "unpause" => Colour::Yellow,
        "del" => Colour::Purple,
        "project" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Render the log with the operation column coloured and padded.
    pub fn render(entries: &[LogEntry]) -> Vec<String> {
        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                let op = color_for_operation(&e.operation).paint(e.operation.as_str());
                if e.target.is_empty() {
                    op.to_string()
                } else {
                    format!("{op} ({})", e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| strip_ansi(s).len())
            .max()
            .unwrap_or(10)
            .min(60);
        let id_w = entries.len().to_string().len();

        entries
            .iter()
            .zip(op_targets)
            .enumerate()
            .map(|(i, (entry, op_target))| {
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).len()));
                format!(
                    "{:>id_w$}: {} | {}{} => {}",
                    i + 1,
                    entry.date,
                    op_target,
                    padding,
                    entry.message,
                    id_w = id_w
                )
            })
            .collect()
    }

    pub fn print_log(track: &Track) -> AppResult<()> {
        let entries = read_log(track)?;
        println!("📜 Internal log:\n");
        for line in Self::render(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colour_codes() {
        let painted = Colour::Green.paint("start").to_string();
        assert_eq!(strip_ansi(&painted), "start");
    }

    #[test]
    fn render_pads_operation_column() {
        let entries = vec![
            LogEntry {
                date: "d1".into(),
                operation: "start".into(),
                target: "dev".into(),
                message: "m1".into(),
            },
            LogEntry {
                date: "d2".into(),
                operation: "stop".into(),
                target: String::new(),
                message: "m2".into(),
            },
        ];
        let lines: Vec<String> = LogLogic::render(&entries)
            .iter()
            .map(|l| strip_ansi(l))
            .collect();
        assert_eq!(lines[0], "1: d1 | start (dev) => m1");
        assert_eq!(lines[1], "2: d2 | stop        => m2");
    }
}
