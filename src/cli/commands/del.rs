use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::store::Track;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::time::{parse_time, to_local};

/// Delete the record started at `<date> <time>`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { date, time } = cmd {
        let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        let t = parse_time(time).ok_or_else(|| AppError::InvalidTime(time.to_string()))?;
        let start = to_local(d.and_time(t))?;

        let track = Track::from_config(cfg);
        let record = SessionLogic::delete(&track, start)?;

        success(format!(
            "Deleted record of '{}' started {}",
            record.project,
            record.start.format(&cfg.date_format)
        ));
    }
    Ok(())
}
