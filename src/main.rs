// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use framelate::app_config::{self, Config};
use framelate::app_controller::{BatchReport, Controller};
use framelate::exchange::ExchangeLayout;
use framelate::file_utils::FileManager;
use framelate::reinjection::ReinjectionMode;

/// CLI Wrapper for ReinjectionMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliReinjectionMode {
    Replace,
    InsertBelow,
}

impl From<CliReinjectionMode> for ReinjectionMode {
    fn from(cli_mode: CliReinjectionMode) -> Self {
        match cli_mode {
            CliReinjectionMode::Replace => ReinjectionMode::Replace,
            CliReinjectionMode::InsertBelow => ReinjectionMode::InsertBelow,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export document text to a translation CSV
    Export(ExportArgs),

    /// Write translations from a CSV back into a document
    Import(ImportArgs),

    /// Generate shell completions for framelate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Layout document or directory of documents to export
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Exchange file to write (single document only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Merge vertically adjacent text units into one segment
    #[arg(long)]
    merge: bool,

    /// Extra vertical distance still treated as adjacent when merging
    #[arg(long)]
    merge_threshold: Option<f64>,

    /// Do not export numbers-only text
    #[arg(long)]
    skip_numbers: bool,

    /// Do not export blank text
    #[arg(long)]
    skip_blanks: bool,

    /// Add a position column so import does not rely on row order
    #[arg(long)]
    keyed: bool,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Layout document or directory of documents to update
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Exchange file, or directory of exchange files for a folder import
    #[arg(value_name = "EXCHANGE_PATH")]
    exchange_path: Option<PathBuf>,

    /// Replace text in place or insert it below the original
    #[arg(short, long, value_enum)]
    mode: Option<CliReinjectionMode>,

    /// Font applied to every translated text unit
    #[arg(long)]
    font: Option<String>,

    /// Read the position column written by `export --keyed`
    #[arg(long)]
    keyed: bool,
}

/// Framelate - text frame round-trip translation
#[derive(Parser, Debug)]
#[command(name = "framelate")]
#[command(version)]
#[command(about = "Export layout text for translation and write translations back")]
#[command(long_about = "Framelate exports the text frames of layout documents to a CSV file for translators and writes the translated text back into the documents.

EXAMPLES:
    framelate export poster.json                      # Writes poster.csv next to the document
    framelate export --merge --merge-threshold 5 poster.json
    framelate export --skip-numbers --skip-blanks designs/   # Batch into designs/output/
    framelate import poster.json poster.csv           # Replace text in place
    framelate import -m insert-below --font SimSun poster.json poster.csv
    framelate import designs/ designs/output/         # Batch import
    framelate completions bash > framelate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "framelate", &mut std::io::stdout());
            Ok(())
        }
        Commands::Export(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.is_some())?;
            if args.merge {
                config.extraction.merge_enabled = true;
            }
            if let Some(threshold) = args.merge_threshold {
                config.extraction.merge_threshold = threshold;
            }
            if args.skip_numbers {
                config.filter.export_numbers = false;
            }
            if args.skip_blanks {
                config.filter.export_blanks = false;
            }
            if args.keyed {
                config.reinjection.layout = ExchangeLayout::Keyed;
            }
            run_export(Controller::with_config(config)?, &args)
        }
        Commands::Import(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.is_some())?;
            if let Some(mode) = &args.mode {
                config.reinjection.mode = mode.clone().into();
            }
            if let Some(font) = &args.font {
                config.reinjection.font = Some(font.clone());
            }
            if args.keyed {
                config.reinjection.layout = ExchangeLayout::Keyed;
            }
            run_import(Controller::with_config(config)?, &args)
        }
    }
}

// Load or create configuration, applying its log level unless the CLI set one
fn load_config(config_path: &str, log_level_overridden: bool) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if !log_level_overridden {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

fn run_export(controller: Controller, args: &ExportArgs) -> Result<()> {
    if args.input_path.is_dir() {
        if args.output.is_some() {
            return Err(anyhow!("--output applies to a single document, not a directory"));
        }
        let report = controller.export_folder(&args.input_path)?;
        return finish(report);
    }

    if !args.input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    controller.log_export_settings();
    match controller.export_file(&args.input_path, args.output.as_deref())? {
        Some(summary) => info!("Success: {:?}", summary.output),
        None => warn!("Nothing exported: {:?} has no text", args.input_path),
    }
    Ok(())
}

fn run_import(controller: Controller, args: &ImportArgs) -> Result<()> {
    if args.input_path.is_dir() {
        let exchange_dir = args.exchange_path.clone().unwrap_or_else(|| {
            FileManager::batch_output_dir(&args.input_path, &controller.config().output.batch_subdir)
        });
        let report = controller.import_folder(&args.input_path, &exchange_dir)?;
        return finish(report);
    }

    if !args.input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    let exchange_path = args
        .exchange_path
        .clone()
        .unwrap_or_else(|| FileManager::exchange_path_for(&args.input_path, None));
    let summary = controller.import_file(&args.input_path, &exchange_path)?;

    if summary.plan_warnings.is_empty() && summary.apply_warnings.is_empty() {
        info!("Success: {}", summary.label);
    } else {
        warn!(
            "{} updated with {} warning(s)",
            summary.label,
            summary.plan_warnings.len() + summary.apply_warnings.len()
        );
    }
    Ok(())
}

// A batch with failures still exits with an error after every document ran.
// Skipped documents are not failures.
fn finish(report: BatchReport) -> Result<()> {
    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} of {} documents failed", report.failed.len(), report.total()))
    }
}
