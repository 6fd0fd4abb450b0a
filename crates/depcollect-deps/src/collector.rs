use crate::error::{DepsError, Result};
use crate::models::{DependencyName, DependencySet, ProjectDependencies, SortedDependencyList};
use crate::parsers::parse_requirements;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default manifest looked up in every project directory
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Knobs for a collection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    /// File name of the manifest inside each project
    pub manifest_name: String,
    /// Drop lines starting with `#` instead of treating them as names
    pub skip_comments: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            manifest_name: DEFAULT_MANIFEST.to_string(),
            skip_comments: false,
        }
    }
}

/// Collect the unique, sorted dependency names of every project under `root`
pub fn collect(root: impl AsRef<Path>) -> Result<SortedDependencyList> {
    collect_with(root, &CollectOptions::default())
}

/// Same as [`collect`] with explicit options
pub fn collect_with(
    root: impl AsRef<Path>,
    options: &CollectOptions,
) -> Result<SortedDependencyList> {
    let root = root.as_ref();
    let mut dependencies = DependencySet::new();
    let mut projects = 0usize;

    for project_path in project_dirs(root)? {
        let manifest = project_path.join(&options.manifest_name);
        if !manifest.is_file() {
            debug!("No {} in {}, skipping", options.manifest_name, project_path.display());
            continue;
        }

        projects += 1;
        dependencies.extend(read_manifest(&manifest, options)?);
    }

    info!(
        "Collected {} unique dependencies from {} projects in {}",
        dependencies.len(),
        projects,
        root.display()
    );

    Ok(dependencies.into_sorted())
}

/// Per-project breakdown, sorted by project name
///
/// Projects without a manifest are listed with `has_manifest: false` and an
/// empty dependency list. Same error behavior as [`collect_with`].
pub fn scan_projects(
    root: impl AsRef<Path>,
    options: &CollectOptions,
) -> Result<Vec<ProjectDependencies>> {
    let mut projects = Vec::new();

    for project_path in project_dirs(root.as_ref())? {
        let name = project_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let manifest = project_path.join(&options.manifest_name);

        let (has_manifest, dependencies) = if manifest.is_file() {
            let names: DependencySet = read_manifest(&manifest, options)?.into_iter().collect();
            (true, names.into_sorted())
        } else {
            (false, SortedDependencyList::default())
        };

        projects.push(ProjectDependencies {
            name,
            path: project_path,
            has_manifest,
            dependencies,
        });
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// Immediate subdirectories of `root`; plain files are skipped
fn project_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(DepsError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let entries = fs::read_dir(root).map_err(|_| DepsError::NotFound {
        path: root.to_path_buf(),
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DepsError::ReadError {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            dirs.push(path);
        } else {
            debug!("Skipping non-directory entry {}", path.display());
        }
    }

    Ok(dirs)
}

fn read_manifest(manifest: &Path, options: &CollectOptions) -> Result<Vec<DependencyName>> {
    let content = fs::read_to_string(manifest).map_err(|source| DepsError::ReadError {
        path: manifest.to_path_buf(),
        source,
    })?;

    let names = parse_requirements(&content, options);
    debug!("Read {} entries from {}", names.len(), manifest.display());
    Ok(names)
}
