//! Flat project directory: one YAML file per project.

use super::{RECORD_EXT, Track};
use crate::errors::{AppError, AppResult};
use crate::models::Project;
use crate::utils::fs::{create_dir, dir_exists, list_dir, write_file};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the full, flat project list on demand.
pub trait ProjectSource {
    fn load_all_projects(&self) -> AppResult<HashMap<String, Project>>;
}

impl ProjectSource for HashMap<String, Project> {
    fn load_all_projects(&self) -> AppResult<HashMap<String, Project>> {
        Ok(self.clone())
    }
}

impl ProjectSource for [Project] {
    fn load_all_projects(&self) -> AppResult<HashMap<String, Project>> {
        Ok(self.iter().map(|p| (p.name.clone(), p.clone())).collect())
    }
}

impl ProjectSource for Vec<Project> {
    fn load_all_projects(&self) -> AppResult<HashMap<String, Project>> {
        self.as_slice().load_all_projects()
    }
}

impl ProjectSource for Track {
    fn load_all_projects(&self) -> AppResult<HashMap<String, Project>> {
        let dir = self.projects_dir();
        let mut out = HashMap::new();
        if !dir_exists(&dir)? {
            return Ok(out);
        }

        for entry in list_dir(&dir)? {
            if entry.is_dir
                || !Path::new(&entry.name)
                    .extension()
                    .is_some_and(|ext| ext == RECORD_EXT)
            {
                continue;
            }
            let content = fs::read_to_string(dir.join(&entry.name))?;
            let project: Project = serde_yaml::from_str(&content)?;
            out.insert(project.name.clone(), project);
        }
        Ok(out)
    }
}

impl Track {
    pub fn project_path(&self, name: &str) -> PathBuf {
        self.projects_dir().join(format!("{}.{}", name, RECORD_EXT))
    }

    pub fn save_project(&self, project: &Project, force: bool) -> AppResult<()> {
        validate_project_name(&project.name)?;
        if let Some(parent) = &project.parent {
            validate_project_name(parent)?;
        }

        let path = self.project_path(&project.name);
        if !force && path.exists() {
            return Err(AppError::ProjectExists(project.name.clone()));
        }

        create_dir(&self.projects_dir())?;
        write_file(&path, &serde_yaml::to_string(project)?, force)?;
        debug!(project = %project.name, "project saved");
        Ok(())
    }
}

fn validate_project_name(name: &str) -> AppResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidProjectName(name.to_string()))
    }
}
