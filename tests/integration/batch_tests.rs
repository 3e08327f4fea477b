/*!
 * Folder export and import with per-document failures
 */

use std::fs;
use anyhow::Result;

use framelate::app_config::Config;
use framelate::document::LayoutDocument;
use framelate::Controller;
use crate::common;

#[test]
fn test_exportFolder_withCorruptDocument_shouldExportSiblingsAndLogIssue() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_layout_document(root, "a.json", common::sample_frames())?;
    common::create_test_file(root, "b.json", "{ this is not a layout")?;
    common::create_layout_document(root, "c.json", common::sample_frames())?;
    let controller = Controller::with_config(Config::default())?;

    let report = controller.export_folder(root)?;

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded.len(), 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, root.join("b.json"));
    assert!(root.join("output").join("a.csv").exists());
    assert!(root.join("output").join("c.csv").exists());
    assert!(!root.join("output").join("b.csv").exists());

    let issues = fs::read_to_string(root.join("framelate.issues.log"))?;
    assert!(issues.contains("1 failed"));
    assert!(issues.contains("b.json"));
    Ok(())
}

#[test]
fn test_exportFolder_withEmptyDocument_shouldSkipItWithoutFailing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_layout_document(root, "blank.json", Vec::new())?;
    common::create_layout_document(root, "poster.json", common::sample_frames())?;
    let controller = Controller::with_config(Config::default())?;

    let report = controller.export_folder(root)?;

    assert_eq!(report.total(), 2);
    assert_eq!(report.succeeded, vec![root.join("poster.json")]);
    assert_eq!(report.skipped, vec![root.join("blank.json")]);
    assert!(report.failed.is_empty());
    assert!(root.join("output").join("poster.csv").exists());
    assert!(!root.join("output").join("blank.csv").exists());
    assert!(!root.join("framelate.issues.log").exists());
    Ok(())
}

#[test]
fn test_importFolder_shouldUpdateDocumentsFromExchangeDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_layout_document(root, "a.json", common::sample_frames())?;
    common::create_layout_document(root, "b.json", common::sample_frames())?;

    let mut config = Config::default();
    config.reinjection.font = Some("SimSun".to_string());
    let controller = Controller::with_config(config)?;

    let exported = controller.export_folder(root)?;
    assert!(exported.failed.is_empty());

    // The exchange directory sits inside the input folder and is skipped
    let report = controller.import_folder(root, &root.join("output"))?;

    assert_eq!(report.succeeded.len(), 2);
    assert!(report.failed.is_empty());
    assert!(!root.join("framelate.issues.log").exists());
    for name in ["a.json", "b.json"] {
        let document = LayoutDocument::open(root.join(name))?;
        assert!(document.frames().iter().all(|f| f.font.as_deref() == Some("SimSun")));
    }
    Ok(())
}

#[test]
fn test_importFolder_withMissingExchangeFile_shouldReportFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_layout_document(root, "a.json", common::sample_frames())?;
    let controller = Controller::with_config(Config::default())?;

    let report = controller.import_folder(root, &root.join("output"))?;

    assert!(report.succeeded.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert!(root.join("framelate.issues.log").exists());
    Ok(())
}

#[test]
fn test_exportFolder_withEmptyDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;
    assert!(controller.export_folder(temp_dir.path()).is_err());
    Ok(())
}
