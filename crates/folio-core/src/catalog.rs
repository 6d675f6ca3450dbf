// Project catalog - loaded once, never mutated
use crate::{filter::ALL_CATEGORIES, models::ProjectRecord, Error, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// The data file that ships with the binary
const BUNDLED_PROJECTS: &str = include_str!("../data/projects.json");

/// Read-only collection of project records in source order
///
/// There is deliberately no `&mut` API here. Views filter and sort copies of
/// references, the records themselves stay put until the process exits.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
}

/// A record that failed validation and was left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the source array
    pub index: usize,
    pub id: Option<u64>,
    pub reason: String,
}

/// What happened while loading
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Catalog {
    /// Build a catalog from records that are already typed
    ///
    /// Still runs the same checks as the JSON loader - a typed record can
    /// still have an empty title or no categories.
    pub fn new(records: Vec<ProjectRecord>) -> (Self, LoadReport) {
        let mut validator = Validator::default();
        let mut projects = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let id = record.id;
            match validator.check(record) {
                Ok(record) => projects.push(record),
                Err(reason) => validator.reject(index, Some(id as u64), reason),
            }
        }

        validator.finish(projects)
    }

    /// Catalog from the bundled `projects.json`
    pub fn bundled() -> Result<(Self, LoadReport)> {
        Self::from_json_str(BUNDLED_PROJECTS)
    }

    /// Load from a JSON file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        debug!("Loading projects from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Either the override file or the bundled data
    pub fn load(path: Option<&Path>) -> Result<(Self, LoadReport)> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::bundled(),
        }
    }

    /// Parse a JSON array of project records
    ///
    /// The document itself must be an array; anything else is a hard error.
    /// Individual entries that don't fit the schema are dropped and reported.
    pub fn from_json_str(json: &str) -> Result<(Self, LoadReport)> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let entries = match document {
            serde_json::Value::Array(entries) => entries,
            other => {
                return Err(Error::ConfigError(format!(
                    "Project data must be a JSON array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut validator = Validator::default();
        let mut projects = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let id = entry.get("id").and_then(|v| v.as_u64());
            let parsed = serde_json::from_value::<ProjectRecord>(entry)
                .map_err(|e| e.to_string())
                .and_then(|record| validator.check(record));

            match parsed {
                Ok(record) => projects.push(record),
                Err(reason) => validator.reject(index, id, reason),
            }
        }

        Ok(validator.finish(projects))
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRecord> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProjectRecord;
    type IntoIter = std::slice::Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

#[derive(Default)]
struct Validator {
    seen_ids: HashSet<u32>,
    rejected: Vec<RejectedRecord>,
}

impl Validator {
    fn check(&mut self, mut record: ProjectRecord) -> std::result::Result<ProjectRecord, String> {
        if record.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }

        // "All" is the catch-all filter label, a project can't be filed under it
        if let Some(reserved) = record.category.iter().find(|c| c.trim() == ALL_CATEGORIES) {
            warn!("Project {} lists reserved category '{}', ignoring it", record.id, reserved.trim());
        }

        // Collapse the category list into an ordered set
        let mut seen = HashSet::new();
        record.category = record
            .category
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && c != ALL_CATEGORIES && seen.insert(c.clone()))
            .collect();

        if record.category.is_empty() {
            return Err("category list is empty".to_string());
        }

        if !self.seen_ids.insert(record.id) {
            return Err(format!("duplicate id {}", record.id));
        }

        Ok(record)
    }

    fn reject(&mut self, index: usize, id: Option<u64>, reason: String) {
        warn!(
            "{}",
            Error::InvalidRecord {
                index,
                reason: reason.clone()
            }
        );
        self.rejected.push(RejectedRecord { index, id, reason });
    }

    fn finish(self, projects: Vec<ProjectRecord>) -> (Catalog, LoadReport) {
        info!(
            "Loaded {} projects ({} rejected)",
            projects.len(),
            self.rejected.len()
        );
        let report = LoadReport {
            loaded: projects.len(),
            rejected: self.rejected,
        };
        (Catalog { projects }, report)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
