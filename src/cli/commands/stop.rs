use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::store::Track;
use crate::ui::messages::success;
use crate::utils::format_hours;
use crate::utils::time::parse_optional_at;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop { at } = cmd {
        let track = Track::from_config(cfg);
        let end = parse_optional_at(at.as_ref())?;
        let record = SessionLogic::stop(&track, end)?;

        success(format!(
            "Stopped '{}' at {} ({} worked)",
            record.project,
            record.effective_end().format(&cfg.date_format),
            format_hours(record.duration(None, None), false)
        ));
    }
    Ok(())
}
