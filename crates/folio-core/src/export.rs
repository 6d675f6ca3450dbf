use crate::{models::ProjectRecord, Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Writes a (possibly filtered) project list out in a shareable format
pub struct Exporter;

impl Exporter {
    /// Export to a file, format picked from the extension
    pub fn export_to_file<P: AsRef<Path>>(projects: &[&ProjectRecord], path: P) -> Result<ExportFormat> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .json, .csv, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(projects, path, format)?;
        Ok(format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        projects: &[&ProjectRecord],
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        let content = Self::render(projects, format)?;

        std::fs::write(path, content)
            .map_err(|e| Error::ExportError(format!("Failed to write {}: {}", path.display(), e)))?;

        info!("Exported {} projects to {}", projects.len(), path.display());
        Ok(())
    }

    pub fn render(projects: &[&ProjectRecord], format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(projects),
            ExportFormat::Csv => Ok(Self::to_csv(projects)),
            ExportFormat::Markdown => Ok(Self::to_markdown(projects)),
        }
    }

    pub fn to_json(projects: &[&ProjectRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(projects)?)
    }

    pub fn to_csv(projects: &[&ProjectRecord]) -> String {
        let mut output = String::new();
        output.push_str("Id,Title,Type,Categories,Tech Stack,Completed,GitHub,Description\n");

        for project in projects {
            output.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                project.id,
                Self::escape_csv(&project.title),
                project.project_type,
                Self::escape_csv(&project.category.join("; ")),
                Self::escape_csv(&project.tech_stack.join("; ")),
                project.completed_date.format("%Y-%m-%d"),
                project.github_url.as_deref().unwrap_or(""),
                Self::escape_csv(&project.description),
            ));
        }

        output
    }

    pub fn to_markdown(projects: &[&ProjectRecord]) -> String {
        let mut output = String::new();

        output.push_str("# Projects\n\n");
        output.push_str(&format!("Total projects: {}\n\n", projects.len()));
        output.push_str("---\n\n");

        for project in projects {
            match &project.github_url {
                Some(url) => output.push_str(&format!("## [{}]({})\n\n", project.title, url)),
                None => output.push_str(&format!("## {}\n\n", project.title)),
            }

            output.push_str(&format!(
                "{} **{}** | 📅 {}\n\n",
                project.project_type.icon(),
                project.project_type.label(),
                project.completed_label()
            ));

            output.push_str(&format!("{}\n\n", project.description));
            if !project.long_description.is_empty() {
                output.push_str(&format!("{}\n\n", project.long_description));
            }

            if !project.tech_stack.is_empty() {
                output.push_str("**Tech:** ");
                let techs: Vec<String> = project.tech_stack.iter().map(|t| format!("`{}`", t)).collect();
                output.push_str(&techs.join(", "));
                output.push('\n');
            }

            output.push_str(&format!("**Categories:** {}\n", project.category.join(", ")));
            output.push_str("\n---\n\n");
        }

        if !projects.is_empty() {
            output.push_str("## Summary\n\n");

            let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
            for project in projects {
                for category in &project.category {
                    *per_category.entry(category.as_str()).or_insert(0) += 1;
                }
            }

            for (category, count) in per_category {
                output.push_str(&format!("- {}: {}\n", category, count));
            }
        }

        output
    }

    /// Escape CSV special characters
    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::project;

    fn sample() -> ProjectRecord {
        let mut p = project(42, "Guardify AI", (2025, 6, 30));
        p.description = "Detects theft, in real time".to_string();
        p.tech_stack = vec!["Python".into(), "OpenCV".into()];
        p.category = vec!["AI".into(), "Full-Stack".into()];
        p.github_url = Some("https://github.com/example/guardify".into());
        p
    }

    #[test]
    fn test_export_format_detection() {
        assert_eq!(ExportFormat::from_extension("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_extension("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_extension("markdown"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_json_export_uses_data_file_schema() {
        let p = sample();
        let json = Exporter::to_json(&[&p]).unwrap();
        assert!(json.contains("\"completedDate\": \"2025-06-30\""));
        assert!(json.contains("\"projectType\": \"personal\""));
    }

    #[test]
    fn test_csv_export() {
        let p = sample();
        let csv = Exporter::to_csv(&[&p]);
        assert!(csv.starts_with("Id,Title"));
        assert!(csv.contains("42,Guardify AI,personal,AI; Full-Stack,Python; OpenCV,2025-06-30"));
        assert!(csv.contains("\"Detects theft, in real time\""));
    }

    #[test]
    fn test_markdown_export() {
        let p = sample();
        let md = Exporter::to_markdown(&[&p]);
        assert!(md.contains("## [Guardify AI](https://github.com/example/guardify)"));
        assert!(md.contains("`OpenCV`"));
        assert!(md.contains("- AI: 1"));
        assert!(md.contains("June 2025"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = sample();

        let format = Exporter::export_to_file(&[&p], dir.path().join("out.md")).unwrap();
        assert_eq!(format, ExportFormat::Markdown);

        let err = Exporter::export_to_file(&[&p], dir.path().join("out.txt")).unwrap_err();
        assert!(matches!(err, Error::ExportError(_)));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(Exporter::escape_csv("simple"), "simple");
        assert_eq!(Exporter::escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(Exporter::escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
