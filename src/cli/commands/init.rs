use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::store::Track;
use crate::ui::messages::{info, success};
use crate::utils::fs::create_dir;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the workspace records and projects directories
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !cli.test {
        cfg.save()?;
        info(format!("Config file : {}", Config::config_file().display()));
    }

    let track = Track::from_config(cfg);
    create_dir(&track.records_dir())?;
    create_dir(&track.projects_dir())?;

    ttlog_quiet(
        &track,
        "init",
        track.workspace(),
        &format!("Workspace initialized at {}", track.workspace_dir().display()),
    );

    success(format!(
        "Workspace '{}' initialized at {}",
        track.workspace(),
        track.workspace_dir().display()
    ));
    Ok(())
}
