use crate::cli::parser::{Commands, ProjectAction};
use crate::config::Config;
use crate::core::log::ttlog_quiet;
use crate::core::tree::ProjectTree;
use crate::errors::{AppError, AppResult};
use crate::models::Project;
use crate::store::{ProjectSource, Track};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Project { action } = cmd else {
        return Ok(());
    };
    let track = Track::from_config(cfg);

    match action {
        ProjectAction::Add {
            name,
            parent,
            archived,
        } => {
            if let Some(p) = parent
                && !track.load_all_projects()?.contains_key(p)
            {
                return Err(AppError::ProjectNotFound(p.clone()));
            }

            let project = Project::new(name, parent.as_deref()).archived(*archived);
            track.save_project(&project, false)?;
            ttlog_quiet(&track, "project", name, "project created");
            success(format!("Created project '{}'", name));
        }
        ProjectAction::List => {
            let projects = track.load_all_projects()?;
            if projects.is_empty() {
                info("No projects");
                return Ok(());
            }
            for (depth, p) in ProjectTree::new(&projects).walk() {
                let flag = if p.archived { " (archived)" } else { "" };
                println!("{}{}{}", "  ".repeat(depth), p.name, flag);
            }
        }
    }
    Ok(())
}
