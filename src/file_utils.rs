use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;

// @module: File and directory utilities

// @const: Extension of exchange files
pub const EXCHANGE_EXTENSION: &str = "csv";

// @const: Extension of layout documents
pub const DOCUMENT_EXTENSION: &str = "json";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Exchange file path for a document
    // @params: document, output_dir (defaults to the document's directory)
    pub fn exchange_path_for<P1: AsRef<Path>>(document: P1, output_dir: Option<&Path>) -> PathBuf {
        let document = document.as_ref();

        // Same stem as the document, exchange extension
        let stem = document.file_stem().unwrap_or_default();
        let mut file_name = stem.to_string_lossy().to_string();
        file_name.push('.');
        file_name.push_str(EXCHANGE_EXTENSION);

        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| document.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        dir.join(file_name)
    }

    /// Directory batch exports are written to
    pub fn batch_output_dir<P: AsRef<Path>>(input_dir: P, subdir: &str) -> PathBuf {
        input_dir.as_ref().join(subdir)
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Get current timestamp
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        // Open file in append mode, create if it doesn't exist
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Find files with a specific extension in a directory, sorted by path.
    /// Anything under `exclude` is skipped.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if exclude.is_some_and(|excluded| path.starts_with(excluded)) {
                continue;
            }

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }
}
