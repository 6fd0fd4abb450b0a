use crate::collector::CollectOptions;
use crate::models::DependencyName;

/// Characters that open a version clause (`==`, `>=`, `~=`, `!=`, `<`...)
pub const VERSION_QUALIFIERS: [char; 5] = ['<', '>', '=', '!', '~'];

/// Normalize one raw specifier line into a bare dependency name
///
/// Everything from the first version qualifier to the end of the line is
/// dropped, then surrounding whitespace. Returns None when nothing is left.
///
/// Extras and environment markers get no special treatment:
/// `pkg[extra]>=1.0` becomes `pkg[extra]`, and `pkg; python_version > "3.8"`
/// becomes `pkg; python_version`.
pub fn normalize_specifier(line: &str) -> Option<DependencyName> {
    let without_version = match line.find(|c: char| VERSION_QUALIFIERS.contains(&c)) {
        Some(idx) => &line[..idx],
        None => line,
    };

    let name = without_version.trim();
    if name.is_empty() {
        None
    } else {
        Some(DependencyName::from_normalized(name))
    }
}

/// Parse the contents of a requirements.txt into normalized names
///
/// Order follows the file and duplicates are kept; deduplication happens in
/// the collector's set. `\n`, `\r\n` and a lone `\r` all end a line.
pub fn parse_requirements(content: &str, options: &CollectOptions) -> Vec<DependencyName> {
    content
        .split(|c: char| c == '\r' || c == '\n')
        .filter(|line| !(options.skip_comments && line.trim_start().starts_with('#')))
        .filter_map(normalize_specifier)
        .collect()
}
