use depcollect_deps::{collect, collect_with, scan_projects, CollectOptions, DepsError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_project(root: &Path, project: &str, manifest: Option<&str>) {
    let dir = root.join(project);
    fs::create_dir_all(&dir).unwrap();
    if let Some(content) = manifest {
        fs::write(dir.join("requirements.txt"), content).unwrap();
    }
}

#[test]
fn test_single_project_normalization() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "api", Some("requests>=2.0\nflask==1.1\n\nclick\n"));

    let deps = collect(root.path()).unwrap();
    assert_eq!(deps.as_strs(), vec!["click", "flask", "requests"]);
}

#[test]
fn test_overlapping_dependencies_appear_once() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "api", Some("requests\nflask\n"));
    write_project(root.path(), "worker", Some("requests==2.31\ncelery\n"));

    let deps = collect(root.path()).unwrap();
    assert_eq!(deps.as_strs(), vec!["celery", "flask", "requests"]);
    assert_eq!(deps.iter().filter(|d| **d == "requests").count(), 1);
}

#[test]
fn test_project_without_manifest_contributes_nothing() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "api", Some("flask\n"));
    write_project(root.path(), "docs", None);

    let deps = collect(root.path()).unwrap();
    assert_eq!(deps.as_strs(), vec!["flask"]);
}

#[test]
fn test_stray_files_are_skipped() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "api", Some("flask\n"));
    // A requirements.txt at the root is not a project
    fs::write(root.path().join("requirements.txt"), "django\n").unwrap();
    fs::write(root.path().join("README.md"), "# components\n").unwrap();

    let deps = collect(root.path()).unwrap();
    assert_eq!(deps.as_strs(), vec!["flask"]);
}

#[test]
fn test_manifest_that_is_a_directory_is_skipped() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("odd").join("requirements.txt")).unwrap();
    write_project(root.path(), "api", Some("flask\n"));

    let deps = collect(root.path()).unwrap();
    assert_eq!(deps.as_strs(), vec!["flask"]);
}

#[test]
fn test_empty_root_yields_empty_list() {
    let root = TempDir::new().unwrap();
    let deps = collect(root.path()).unwrap();
    assert!(deps.is_empty());
}

#[test]
fn test_missing_root_is_not_found() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("components");

    match collect(&missing) {
        Err(DepsError::NotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_root_that_is_a_file_is_not_found() {
    let root = TempDir::new().unwrap();
    let file = root.path().join("components");
    fs::write(&file, "not a folder").unwrap();

    assert!(matches!(collect(&file), Err(DepsError::NotFound { .. })));
}

#[test]
fn test_unreadable_manifest_fails_fast() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "api", Some("flask\n"));
    let broken = root.path().join("broken");
    fs::create_dir_all(&broken).unwrap();
    // Invalid UTF-8 cannot be read as text
    fs::write(broken.join("requirements.txt"), [0x66, 0x6c, 0xff, 0xfe, 0x0a]).unwrap();

    match collect(root.path()) {
        Err(DepsError::ReadError { path, .. }) => {
            assert_eq!(path, broken.join("requirements.txt"));
        }
        other => panic!("expected ReadError, got {:?}", other),
    }
}

#[test]
fn test_output_is_sorted_unique_and_idempotent() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "c", Some("zope\nattrs\nZope\n"));
    write_project(root.path(), "a", Some("attrs>=22\n  six  \n"));
    write_project(root.path(), "b", Some("six~=1.16\nrequests!=2.0\n"));

    let first = collect(root.path()).unwrap();
    let second = collect(root.path()).unwrap();
    assert_eq!(first, second);

    let names = first.as_strs();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(names, vec!["Zope", "attrs", "requests", "six", "zope"]);
}

#[test]
fn test_custom_manifest_and_comment_skipping() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("api");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("requirements.txt"), "ignored\n").unwrap();
    fs::write(project.join("requirements-dev.txt"), "# tooling\npytest>=7\n").unwrap();

    let options = CollectOptions {
        manifest_name: "requirements-dev.txt".to_string(),
        skip_comments: true,
    };

    let deps = collect_with(root.path(), &options).unwrap();
    assert_eq!(deps.as_strs(), vec!["pytest"]);
}

#[test]
fn test_scan_projects_breakdown() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "worker", Some("requests\ncelery\nrequests\n"));
    write_project(root.path(), "api", Some("flask\n"));
    write_project(root.path(), "docs", None);

    let projects = scan_projects(root.path(), &CollectOptions::default()).unwrap();
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["api", "docs", "worker"]);

    assert!(projects[0].has_manifest);
    assert!(!projects[1].has_manifest);
    assert!(projects[1].dependencies.is_empty());
    assert_eq!(projects[2].dependencies.as_strs(), vec!["celery", "requests"]);
}

#[test]
fn test_carriage_return_only_manifest() {
    let root = TempDir::new().unwrap();
    write_project(root.path(), "legacy", Some("requests\rflask\rclick\r"));

    let deps = collect(root.path()).unwrap();
    assert_eq!(deps.as_strs(), vec!["click", "flask", "requests"]);
}
