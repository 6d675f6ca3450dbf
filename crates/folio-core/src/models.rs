use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single project in the catalog
///
/// Field names on disk are camelCase so the data file can be shared with
/// other tooling that already speaks that schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub image_url: String,
    /// Ordered set - duplicates are collapsed at load time
    pub category: Vec<String>,
    pub completed_date: NaiveDate,
    pub project_type: ProjectType,
}

impl ProjectRecord {
    pub fn has_category(&self, category: &str) -> bool {
        self.category.iter().any(|c| c == category)
    }

    /// Human friendly completion date, e.g. "June 2025"
    pub fn completed_label(&self) -> String {
        self.completed_date.format("%B %Y").to_string()
    }
}

/// Whether a project was done on my own time or for a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Personal,
    Academic,
}

impl ProjectType {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Personal => "Personal Project",
            ProjectType::Academic => "Academic Project",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ProjectType::Personal => "💼",
            ProjectType::Academic => "🎓",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectType::Personal => write!(f, "personal"),
            ProjectType::Academic => write!(f, "academic"),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal valid project for tests - tweak the fields you care about
    pub fn project(id: u32, title: &str, date: (i32, u32, u32)) -> ProjectRecord {
        ProjectRecord {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            long_description: String::new(),
            tech_stack: Vec::new(),
            github_url: None,
            linkedin_url: None,
            image_url: format!("/images/{}.jpg", id),
            category: vec!["Web".to_string()],
            completed_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            project_type: ProjectType::Personal,
        }
    }
}
