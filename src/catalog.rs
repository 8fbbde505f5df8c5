//! Topic catalog
//!
//! The list of tutorial topics shown in the sidebar, read from a TOML file:
//!
//! ```toml
//! [[topics]]
//! id = "loops"
//! title = "Loops"
//! summary = "Repeat work with for and while"
//! solution = "for (let i = 0; i < 5; i++) { console.log(i); }"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::progress::TopicId;

/// A single tutorial topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Exercise solution, hidden until revealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Topic {
    pub fn new(id: impl Into<TopicId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            solution: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }
}

/// Ordered list of topics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids
    pub fn new(topics: Vec<Topic>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (idx, topic) in topics.iter().enumerate() {
            if topic.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyId(idx).into());
            }
            if !seen.insert(topic.id.as_str()) {
                return Err(CatalogError::DuplicateTopic(topic.id.to_string()).into());
            }
        }
        Ok(Self { topics })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: Catalog =
            toml::from_str(content).map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
        Self::new(raw.topics)
    }

    /// Load from `path`, falling back to the built-in catalog if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No catalog at {}, using built-in topics", path.display());
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Topics shipped with the binary
    pub fn builtin() -> Self {
        Self {
            topics: vec![
                Topic::new("variables", "Variables")
                    .with_summary("Declaring values with let and const"),
                Topic::new("loops", "Loops")
                    .with_summary("Repeating work with for and while")
                    .with_solution("for (let i = 1; i <= 10; i++) {\n  console.log(i);\n}"),
                Topic::new("arrays", "Arrays")
                    .with_summary("Ordered lists and their methods")
                    .with_solution("const evens = [1, 2, 3, 4].filter(n => n % 2 === 0);"),
                Topic::new("functions", "Functions")
                    .with_summary("Reusable blocks of code")
                    .with_solution("const square = n => n * n;"),
                Topic::new("objects", "Objects")
                    .with_summary("Grouping related data under named keys"),
                Topic::new("events", "Events")
                    .with_summary("Emitting and listening for named events")
                    .with_solution(
                        "emitter.on('greet', name => console.log(`Hello ${name}`));\nemitter.emit('greet', 'Ada');",
                    ),
                Topic::new("child-processes", "Child processes")
                    .with_summary("Running other programs with spawn and fork"),
            ],
        }
    }

    /// Look up a topic by id
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_is_valid() {
        let builtin = Catalog::builtin();
        let checked = Catalog::new(builtin.topics.clone()).unwrap();
        assert_eq!(checked, builtin);
        assert!(builtin.contains("loops"));
        assert!(builtin.contains("arrays"));
    }

    #[test]
    fn test_parse_toml() {
        let catalog = Catalog::from_toml(
            r#"
            [[topics]]
            id = "loops"
            title = "Loops"
            solution = "for (;;) {}"

            [[topics]]
            id = "arrays"
            title = "Arrays"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.topics[0].id.as_str(), "loops");
        assert!(catalog.get("loops").unwrap().solution.is_some());
        assert!(catalog.get("arrays").unwrap().summary.is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![Topic::new("loops", "A"), Topic::new("loops", "B")]).unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::DuplicateTopic(ref id)) if id == "loops"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = Catalog::new(vec![Topic::new("loops", "A"), Topic::new(" ", "B")]).unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::EmptyId(1))));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Catalog::from_toml("[[topics]]\nid = ").unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::ParseFailed(_))));
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::load_from(&temp_dir.path().join("topics.toml")).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("topics.toml");
        std::fs::write(&path, "[[topics]]\nid = \"maps\"\ntitle = \"Maps\"\n").unwrap();

        let catalog = Catalog::load_from(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("maps").unwrap().title, "Maps");
    }
}
