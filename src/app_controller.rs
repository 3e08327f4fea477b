use anyhow::{anyhow, Context, Result};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::document::{DocumentSession, LayoutDocument};
use crate::exchange::{self, ExchangeDocument, ExchangeLayout};
use crate::file_utils::{FileManager, DOCUMENT_EXTENSION};
use crate::reinjection::{self, ApplyWarning, PlanWarning};
use crate::segmentation;

// @module: Application controller for export and import runs

// @const: Issue log written next to batch inputs
const ISSUES_LOG_NAME: &str = "framelate.issues.log";

/// Counts produced by exporting one document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Document label written to the exchange file
    pub label: String,
    /// Units read from the document
    pub units: usize,
    /// Segments after clustering
    pub segments: usize,
    /// Rows written after filtering
    pub exported: usize,
    /// Exchange file location
    pub output: PathBuf,
}

/// Outcome of importing translations into one document
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub label: String,
    /// Translations read from the exchange file
    pub translations: usize,
    /// Actions whose content write succeeded
    pub applied: usize,
    pub plan_warnings: Vec<PlanWarning>,
    pub apply_warnings: Vec<ApplyWarning>,
}

/// Per-document results of a folder run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<PathBuf>,
    /// Documents with nothing to process
    pub skipped: Vec<PathBuf>,
    /// Failed documents with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Number of documents attempted
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.skipped.len() + self.failed.len()
    }
}

// What happened to one document of a batch
enum Outcome {
    Processed,
    Skipped,
}

/// Main application controller for the translation round trip
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract, cluster, filter and write one document's exchange file.
    ///
    /// Returns `None` without writing anything when the document has no text units.
    pub fn export_session(&self, session: &dyn DocumentSession, output: &Path) -> Result<Option<ExportSummary>> {
        let label = session.label();
        let units = session
            .text_units()
            .with_context(|| format!("Failed to extract text from {}", label))?;

        if units.is_empty() {
            warn!("{}: no text units found, skipping", label);
            return Ok(None);
        }

        let extraction = &self.config.extraction;
        let segments = segmentation::cluster(&units, extraction.merge_enabled, extraction.merge_threshold);
        if extraction.merge_enabled {
            info!("{}: {} units merged into {} segments", label, units.len(), segments.len());
        }
        let segment_count = segments.len();

        let filter = &self.config.filter;
        let segments = segmentation::filter(segments, filter.export_numbers, filter.export_blanks);

        ExchangeDocument::from_segments(label.clone(), &segments)
            .write_to_path(output, self.config.reinjection.layout)
            .with_context(|| format!("Failed to write exchange file {:?} for {}", output, label))?;

        info!("{}: exported {} of {} segments to {:?}", label, segments.len(), segment_count, output);

        Ok(Some(ExportSummary {
            label,
            units: units.len(),
            segments: segment_count,
            exported: segments.len(),
            output: output.to_path_buf(),
        }))
    }

    /// Read an exchange file and write its translations into the session, then save
    pub fn import_session(&self, session: &mut dyn DocumentSession, exchange_path: &Path) -> Result<ImportSummary> {
        let label = session.label();
        let settings = &self.config.reinjection;
        let font = settings.font_name();

        let units = session
            .text_units()
            .with_context(|| format!("Failed to read text units from {}", label))?;

        let (translations, plan) = match settings.layout {
            ExchangeLayout::Positional => {
                let translations = exchange::read_from_path(exchange_path)
                    .with_context(|| format!("Failed to read translations from {:?}", exchange_path))?;
                let plan = reinjection::plan(&units, &translations, settings.mode, font);
                (translations.len(), plan)
            }
            ExchangeLayout::Keyed => {
                let translations = exchange::read_keyed_from_path(exchange_path)
                    .with_context(|| format!("Failed to read translations from {:?}", exchange_path))?;
                let plan = reinjection::plan_keyed(&units, &translations, settings.mode, font);
                (translations.len(), plan)
            }
        };

        for warning in &plan.warnings {
            warn!("{}: {}", label, warning);
        }
        debug!("{}: {} actions planned in {} mode", label, plan.actions.len(), plan.mode);

        let report = reinjection::apply(&plan, session);

        session
            .save()
            .with_context(|| format!("Failed to save {}", label))?;

        info!("{}: applied {} of {} translations ({})", label, report.applied, translations, plan.mode);

        Ok(ImportSummary {
            label,
            translations,
            applied: report.applied,
            plan_warnings: plan.warnings,
            apply_warnings: report.warnings,
        })
    }

    /// Export a layout document; the exchange file defaults to `<stem>.csv` beside it
    pub fn export_file(&self, document: &Path, output: Option<&Path>) -> Result<Option<ExportSummary>> {
        let session = LayoutDocument::open(document)?;
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| FileManager::exchange_path_for(document, None));
        self.export_session(&session, &output)
    }

    /// Import translations into a layout document and save it
    pub fn import_file(&self, document: &Path, exchange_path: &Path) -> Result<ImportSummary> {
        if !FileManager::file_exists(exchange_path) {
            return Err(anyhow!("Exchange file does not exist: {:?}", exchange_path));
        }
        let mut session = LayoutDocument::open(document)?;
        self.import_session(&mut session, exchange_path)
    }

    /// Export every layout document in a folder into its batch output sub-directory
    pub fn export_folder(&self, input_dir: &Path) -> Result<BatchReport> {
        let output_dir = FileManager::batch_output_dir(input_dir, &self.config.output.batch_subdir);
        let documents = self.find_documents(input_dir, &output_dir)?;
        FileManager::ensure_dir(&output_dir)?;

        self.log_export_settings();

        let report = self.run_batch(&documents, "Exporting", |document| {
            let output = FileManager::exchange_path_for(document, Some(&output_dir));
            let summary = self.export_file(document, Some(&output))?;
            Ok(if summary.is_some() { Outcome::Processed } else { Outcome::Skipped })
        });

        self.finish_batch(input_dir, "export", &report);
        Ok(report)
    }

    /// Import `<exchange_dir>/<stem>.csv` into every layout document in a folder
    pub fn import_folder(&self, input_dir: &Path, exchange_dir: &Path) -> Result<BatchReport> {
        let documents = self.find_documents(input_dir, exchange_dir)?;

        let report = self.run_batch(&documents, "Importing", |document| {
            let exchange_path = FileManager::exchange_path_for(document, Some(exchange_dir));
            self.import_file(document, &exchange_path).map(|_| Outcome::Processed)
        });

        self.finish_batch(input_dir, "import", &report);
        Ok(report)
    }

    fn find_documents(&self, input_dir: &Path, exclude: &Path) -> Result<Vec<PathBuf>> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let exclude = (exclude != input_dir).then_some(exclude);
        let documents = FileManager::find_files(input_dir, DOCUMENT_EXTENSION, exclude)?;
        if documents.is_empty() {
            return Err(anyhow!("No layout documents found in directory: {:?}", input_dir));
        }
        Ok(documents)
    }

    // Each document runs to completion or fails on its own
    fn run_batch<F>(&self, documents: &[PathBuf], verb: &str, mut process: F) -> BatchReport
    where
        F: FnMut(&Path) -> Result<Outcome>,
    {
        let progress = ProgressBar::new(documents.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(template_result.progress_chars("█▓▒░"));

        let mut report = BatchReport::default();
        for document in documents {
            let file_name = document
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(format!("{}: {}", verb, file_name));

            match process(document.as_path()) {
                Ok(Outcome::Processed) => report.succeeded.push(document.clone()),
                Ok(Outcome::Skipped) => {
                    info!("Skipped empty file: {}", file_name);
                    report.skipped.push(document.clone());
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    report.failed.push((document.clone(), format!("{:#}", e)));
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        report
    }

    fn finish_batch(&self, input_dir: &Path, operation: &str, report: &BatchReport) {
        let summary = format!(
            "Batch {} completed: {} succeeded, {} skipped, {} failed",
            operation,
            report.succeeded.len(),
            report.skipped.len(),
            report.failed.len()
        );
        info!("{}", summary);

        if report.failed.is_empty() {
            return;
        }

        let log_path = input_dir.join(ISSUES_LOG_NAME);
        let mut lines = vec![summary];
        lines.extend(
            report
                .failed
                .iter()
                .map(|(path, reason)| format!("  {}: {}", path.display(), reason)),
        );
        if let Err(e) = FileManager::append_to_log_file(&log_path, &lines.join("\n")) {
            warn!("Failed to write batch issues to {:?}: {}", log_path, e);
        } else {
            info!("Batch issues written to {:?}", log_path);
        }
    }

    /// Log the merge and filter settings that differ from a plain export
    pub fn log_export_settings(&self) {
        let mut settings = Vec::new();
        if self.config.extraction.merge_enabled {
            settings.push(format!("merge segments (threshold {})", self.config.extraction.merge_threshold));
        }
        if !self.config.filter.export_numbers {
            settings.push("skip numbers".to_string());
        }
        if !self.config.filter.export_blanks {
            settings.push("skip blanks".to_string());
        }
        if !settings.is_empty() {
            info!("Export settings: {}", settings.join(", "));
        }
    }
}
