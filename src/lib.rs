/*!
 * # Framelate - text frame round-trip translation
 *
 * A Rust library for exporting the text of layout documents to a translator
 * friendly CSV file and writing the translations back afterwards.
 *
 * ## Features
 *
 * - Extract text units from a document through the `DocumentSession` trait
 * - Merge vertically adjacent units into logical segments
 * - Skip blank or numbers-only segments on export
 * - BOM-prefixed UTF-8 CSV exchange files, positional or keyed by unit index
 * - Replace units in place or insert translations below them, with an optional font
 * - Batch processing of whole folders with per-document error reporting
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document collaborator trait and the JSON layout document
 * - `segmentation`: Geometry clustering and export filtering:
 *   - `segmentation::cluster`: Vertical-proximity merging
 *   - `segmentation::filter`: Blank and numeric-only filtering
 * - `exchange`: Exchange file reading and writing
 * - `reinjection`: Planning and applying translation write-back
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod exchange;
pub mod file_utils;
pub mod reinjection;
pub mod segmentation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchReport, Controller, ExportSummary, ImportSummary};
pub use document::{DocumentSession, LayoutDocument, TextFrame, TextUnit};
pub use errors::{AppError, DocumentError, ExchangeError};
pub use exchange::{ExchangeDocument, ExchangeLayout, TranslationList};
pub use reinjection::{ReinjectionAction, ReinjectionMode, ReinjectionPlan};
pub use segmentation::Segment;
