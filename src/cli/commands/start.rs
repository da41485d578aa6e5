use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::store::{ProjectSource, Track};
use crate::ui::messages::success;
use crate::utils::time::parse_optional_at;

/// Start a record for an existing project.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { project, note, at } = cmd {
        let track = Track::from_config(cfg);

        if !track.load_all_projects()?.contains_key(project) {
            return Err(AppError::ProjectNotFound(project.clone()));
        }

        let start = parse_optional_at(at.as_ref())?;
        let tags = Record::extract_tags(note);
        let record = SessionLogic::start(&track, project, &note.join(" "), tags, start)?;

        success(format!(
            "Started '{}' at {}",
            record.project,
            record.start.format(&cfg.date_format)
        ));
    }
    Ok(())
}
