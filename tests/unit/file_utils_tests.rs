/*!
 * Tests for file and directory helpers
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;

use framelate::file_utils::FileManager;
use crate::common;

#[test]
fn test_exchangePathFor_withoutOutputDir_shouldSitBesideDocument() {
    let path = FileManager::exchange_path_for("designs/poster.json", None);
    assert_eq!(path, PathBuf::from("designs/poster.csv"));
}

#[test]
fn test_exchangePathFor_withOutputDir_shouldUseIt() {
    let path = FileManager::exchange_path_for("designs/poster.json", Some(Path::new("out")));
    assert_eq!(path, PathBuf::from("out/poster.csv"));
}

#[test]
fn test_findFiles_shouldRecurseSortAndExclude() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("nested"))?;
    fs::create_dir_all(root.join("output"))?;
    common::create_test_file(root, "b.json", "{}")?;
    common::create_test_file(root, "a.JSON", "{}")?;
    common::create_test_file(root, "notes.txt", "")?;
    common::create_test_file(&root.join("nested"), "c.json", "{}")?;
    common::create_test_file(&root.join("output"), "d.json", "{}")?;

    let files = FileManager::find_files(root, "json", Some(&root.join("output")))?;

    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.JSON", "b.json", "nested/c.json"]);
    Ok(())
}

#[test]
fn test_appendToLogFile_shouldAppendTimestampedLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("logs").join("issues.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}

#[test]
fn test_existenceChecks_shouldDistinguishFilesAndDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "x.json", "{}")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.json")));
    Ok(())
}
