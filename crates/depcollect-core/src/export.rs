use crate::{Error, Result};
use depcollect_deps::{ProjectDependencies, SortedDependencyList};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One name per line, the classic stdout listing
    #[default]
    Text,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(format!(
                "unknown format '{}', expected text, json or markdown",
                other
            )),
        }
    }
}

/// Renders collected dependencies
pub struct Exporter;

impl Exporter {
    /// Render the merged list in the given format
    pub fn render(deps: &SortedDependencyList, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(Self::to_text(deps)),
            ExportFormat::Json => Self::to_json(deps),
            ExportFormat::Markdown => Ok(Self::to_markdown(deps)),
        }
    }

    /// Render the per-project breakdown in the given format
    pub fn render_projects(
        projects: &[ProjectDependencies],
        format: ExportFormat,
    ) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(Self::projects_to_text(projects)),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(projects)?),
            ExportFormat::Markdown => Ok(Self::projects_to_markdown(projects)),
        }
    }

    /// Export to a file, picking the format from its extension
    pub fn export_to_file<P: AsRef<Path>>(deps: &SortedDependencyList, path: P) -> Result<()> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .txt, .json, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(deps, path, format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        deps: &SortedDependencyList,
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let content = Self::render(deps, format)?;
        Self::write_file(path.as_ref(), &content)
    }

    pub fn write_file(path: &Path, content: &str) -> Result<()> {
        let mut file = File::create(path).map_err(|e| {
            Error::ExportError(format!("Failed to create {}: {}", path.display(), e))
        })?;

        file.write_all(content.as_bytes()).map_err(|e| {
            Error::ExportError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    pub fn to_text(deps: &SortedDependencyList) -> String {
        let mut output = String::new();
        for dep in deps {
            output.push_str(dep.as_str());
            output.push('\n');
        }
        output
    }

    pub fn to_json(deps: &SortedDependencyList) -> Result<String> {
        Ok(serde_json::to_string_pretty(deps)?)
    }

    pub fn to_markdown(deps: &SortedDependencyList) -> String {
        let mut output = String::from("# Dependencies\n\n");
        output.push_str(&format!("{} unique dependencies\n", deps.len()));

        if !deps.is_empty() {
            output.push('\n');
            for dep in deps {
                output.push_str(&format!("- {}\n", Self::escape_markdown(dep.as_str())));
            }
        }

        output
    }

    fn projects_to_text(projects: &[ProjectDependencies]) -> String {
        let mut output = String::new();

        for project in projects {
            if !project.has_manifest {
                output.push_str(&format!("{}: (no manifest)\n", project.name));
                continue;
            }

            output.push_str(&format!("{}:\n", project.name));
            for dep in &project.dependencies {
                output.push_str(&format!("  {}\n", dep));
            }
        }

        output
    }

    fn projects_to_markdown(projects: &[ProjectDependencies]) -> String {
        let mut output = String::from("# Dependencies by project\n");

        for project in projects {
            output.push_str(&format!("\n## {}\n\n", Self::escape_markdown(&project.name)));

            if !project.has_manifest {
                output.push_str("_No manifest_\n");
            } else if project.dependencies.is_empty() {
                output.push_str("_No dependencies_\n");
            } else {
                for dep in &project.dependencies {
                    output.push_str(&format!("- {}\n", Self::escape_markdown(dep.as_str())));
                }
            }
        }

        output
    }

    // Names can legally contain brackets (extras) and underscores
    fn escape_markdown(s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            if matches!(c, '\\' | '*' | '_' | '[' | ']' | '`') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }
}
