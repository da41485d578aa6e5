use serde::{Deserialize, Serialize};

/// A project as supplied by the project directory.
///
/// `Default` yields an unnamed, non-archived root project; filters rely on it
/// when a record references a project missing from the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Project {
    pub fn new(name: &str, parent: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            archived: false,
        }
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }
}
