//! `pause`, `resume` and `unpause`.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::store::Track;
use crate::ui::messages::success;
use crate::utils::format_hours;
use crate::utils::time::parse_optional_at;
use chrono::TimeDelta;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let track = Track::from_config(cfg);

    match cmd {
        Commands::Pause { note, at } => {
            let start = parse_optional_at(at.as_ref())?;
            let record = SessionLogic::pause(&track, start, &note.join(" "))?;
            success(format!(
                "Paused '{}' at {}",
                record.project,
                start.format(&cfg.date_format)
            ));
        }
        Commands::Resume { at } => {
            let end = parse_optional_at(at.as_ref())?;
            let record = SessionLogic::resume(&track, end)?;
            let pause = record
                .pauses
                .last()
                .map(|p| p.duration_at(end, None, None))
                .unwrap_or_else(TimeDelta::zero);
            success(format!(
                "Resumed '{}' after {}",
                record.project,
                format_hours(pause, false)
            ));
        }
        Commands::Unpause => {
            let record = SessionLogic::undo_pause(&track)?;
            success(format!(
                "Removed last pause of '{}' ({} pauses left)",
                record.project,
                record.pauses.len()
            ));
        }
        _ => {}
    }
    Ok(())
}
