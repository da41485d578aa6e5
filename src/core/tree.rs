//! Parent/child hierarchy derived from a flat project snapshot.

use crate::errors::{AppError, AppResult};
use crate::models::Project;
use std::collections::{HashMap, HashSet};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Node {
    pub project: Project,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

/// Read-only index over a project snapshot, rebuilt per query.
#[derive(Debug, Clone, Default)]
pub struct ProjectTree {
    nodes: HashMap<String, Node>,
    roots: Vec<String>,
}

impl ProjectTree {
    /// Projects whose parent is missing from the snapshot become roots.
    pub fn new(projects: &HashMap<String, Project>) -> Self {
        let mut names: Vec<&String> = projects.keys().collect();
        names.sort();

        let mut nodes: HashMap<String, Node> = projects
            .iter()
            .map(|(name, p)| {
                (
                    name.clone(),
                    Node {
                        project: p.clone(),
                        parent: None,
                        children: Vec::new(),
                    },
                )
            })
            .collect();
        let mut roots = Vec::new();

        for name in names {
            match projects[name].parent.as_deref() {
                Some(parent) if projects.contains_key(parent) => {
                    if let Some(node) = nodes.get_mut(parent) {
                        node.children.push(name.clone());
                    }
                    if let Some(node) = nodes.get_mut(name) {
                        node.parent = Some(parent.to_string());
                    }
                }
                Some(parent) => {
                    warn!(project = %name, parent, "parent project not found, treating as root");
                    roots.push(name.clone());
                }
                None => roots.push(name.clone()),
            }
        }

        Self { nodes, roots }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    fn node(&self, name: &str) -> AppResult<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| AppError::ProjectNotInTree(name.to_string()))
    }

    /// Ancestors of `name`, nearest first.
    pub fn ancestors(&self, name: &str) -> AppResult<Vec<&Project>> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([name]);
        let mut current = self.node(name)?;

        while let Some(parent) = current.parent.as_deref() {
            if !seen.insert(parent) {
                return Err(AppError::ProjectCycle(parent.to_string()));
            }
            current = self.node(parent)?;
            out.push(&current.project);
        }
        Ok(out)
    }

    /// All transitive children of `name`, depth first.
    pub fn descendants(&self, name: &str) -> AppResult<Vec<&Project>> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([name]);
        let mut stack: Vec<&str> = self
            .node(name)?
            .children
            .iter()
            .rev()
            .map(String::as_str)
            .collect();

        while let Some(child) = stack.pop() {
            if !seen.insert(child) {
                continue;
            }
            let node = self.node(child)?;
            out.push(&node.project);
            stack.extend(node.children.iter().rev().map(String::as_str));
        }
        Ok(out)
    }

    /// Every project with its depth, parents before children, siblings by name.
    pub fn walk(&self) -> Vec<(usize, &Project)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, &str)> =
            self.roots.iter().rev().map(|r| (0, r.as_str())).collect();

        while let Some((depth, name)) = stack.pop() {
            let Some(node) = self.nodes.get(name) else {
                continue;
            };
            out.push((depth, &node.project));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, c.as_str())));
        }
        out
    }
}
