use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// A bare dependency name with version qualifiers and whitespace removed
///
/// Only built through normalization, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DependencyName(String);

impl DependencyName {
    /// Wraps an already-normalized name. Callers must have checked it is non-empty.
    pub(crate) fn from_normalized(name: &str) -> Self {
        debug_assert!(!name.is_empty());
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DependencyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DependencyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DependencyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for DependencyName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Unique dependency names gathered across projects
///
/// Backed by a BTreeSet: membership is exact, case-sensitive string match,
/// and iteration is already in code-point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    names: BTreeSet<DependencyName>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the name was not already present
    pub fn insert(&mut self, name: DependencyName) -> bool {
        self.names.insert(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_sorted(self) -> SortedDependencyList {
        SortedDependencyList {
            names: self.names.into_iter().collect(),
        }
    }
}

impl Extend<DependencyName> for DependencySet {
    fn extend<I: IntoIterator<Item = DependencyName>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

impl FromIterator<DependencyName> for DependencySet {
    fn from_iter<I: IntoIterator<Item = DependencyName>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Final output of a collection pass: unique names, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortedDependencyList {
    names: Vec<DependencyName>,
}

impl SortedDependencyList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyName> {
        self.names.iter()
    }

    /// Borrowed view of the names, handy for comparisons
    pub fn as_strs(&self) -> Vec<&str> {
        self.names.iter().map(DependencyName::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a SortedDependencyList {
    type Item = &'a DependencyName;
    type IntoIter = std::slice::Iter<'a, DependencyName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Dependencies declared by a single project directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDependencies {
    pub name: String,
    pub path: PathBuf,
    /// False when the project has no manifest file
    pub has_manifest: bool,
    pub dependencies: SortedDependencyList,
}
