// Dependency collection
// Walks a folder of projects and gathers the names every requirements.txt declares

pub mod collector;
pub mod error;
pub mod models;
pub mod parsers;

pub use collector::{collect, collect_with, scan_projects, CollectOptions, DEFAULT_MANIFEST};
pub use error::{DepsError, Result};
pub use models::{DependencyName, DependencySet, ProjectDependencies, SortedDependencyList};
pub use parsers::{normalize_specifier, parse_requirements, VERSION_QUALIFIERS};
