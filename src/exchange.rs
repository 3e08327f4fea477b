/*!
 * Exchange file codec.
 *
 * The exchange file is a UTF-8 CSV with a byte-order mark so spreadsheet
 * tools display non-Latin scripts correctly. Layout:
 *
 * ```text
 * 文件名: <label>
 * 原文,译文[,位置]
 * <original>,<translation>[,<positions>]
 * ...
 * ```
 *
 * The positional layout carries only the original/translation pair; the
 * keyed layout adds the enumeration indices of the units behind each row so
 * reinjection does not depend on row order.
 */

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ExchangeError;
use crate::segmentation::Segment;

/// Prefix of the label row
pub const LABEL_PREFIX: &str = "文件名: ";

/// Header of the original text column
pub const HEADER_ORIGINAL: &str = "原文";

/// Header of the translation column
pub const HEADER_TRANSLATION: &str = "译文";

/// Header of the position column in the keyed layout
pub const HEADER_POSITION: &str = "位置";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// Label row and header row
const PREAMBLE_ROWS: usize = 2;

const POSITION_SEPARATOR: &str = ";";

/// Translations in file order
pub type TranslationList = Vec<String>;

/// Column layout of an exchange file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeLayout {
    /// Two columns; rows align with document units by index
    #[default]
    Positional,
    /// Three columns; rows carry their unit indices
    Keyed,
}

/// One exported row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    /// Source text
    pub original: String,

    /// Translator-editable text, initialised to the source
    pub translation: String,

    /// Enumeration indices of the units behind the row
    pub positions: Vec<usize>,
}

/// A translation row read from a keyed exchange file
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedTranslation {
    /// 1-based line number in the file
    pub row: usize,

    /// Unit indices named by the row, first one is the anchor
    pub positions: Vec<usize>,

    /// Translated text
    pub text: String,
}

/// Label plus the ordered rows of an exchange file
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeDocument {
    /// Name of the source document
    pub label: String,

    /// Data rows
    pub records: Vec<ExportRecord>,
}

impl ExchangeDocument {
    /// Build a document whose translations start equal to the originals
    pub fn from_segments(label: impl Into<String>, segments: &[Segment]) -> Self {
        let records = segments
            .iter()
            .map(|segment| ExportRecord {
                original: segment.content.clone(),
                translation: segment.content.clone(),
                positions: segment.source_indices.clone(),
            })
            .collect();

        Self {
            label: label.into(),
            records,
        }
    }

    /// Serialize to any writer
    pub fn write<W: Write>(&self, mut writer: W, layout: ExchangeLayout) -> Result<(), ExchangeError> {
        writer.write_all(UTF8_BOM)?;

        let mut csv = WriterBuilder::new().flexible(true).from_writer(writer);
        csv.write_record([format!("{}{}", LABEL_PREFIX, self.label)])?;

        match layout {
            ExchangeLayout::Positional => {
                csv.write_record([HEADER_ORIGINAL, HEADER_TRANSLATION])?;
                for record in &self.records {
                    csv.write_record([&record.original, &record.translation])?;
                }
            }
            ExchangeLayout::Keyed => {
                csv.write_record([HEADER_ORIGINAL, HEADER_TRANSLATION, HEADER_POSITION])?;
                for record in &self.records {
                    let positions = join_positions(&record.positions);
                    csv.write_record([&record.original, &record.translation, &positions])?;
                }
            }
        }

        csv.flush()?;
        Ok(())
    }

    /// Serialize to a file, creating parent directories as needed
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P, layout: ExchangeLayout) -> Result<(), ExchangeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write(BufWriter::new(file), layout)?;
        debug!("Wrote {} rows to {:?}", self.records.len(), path);
        Ok(())
    }
}

/// Write `segments` as an exchange file labelled `label`
pub fn write_segments<W: Write>(
    segments: &[Segment],
    label: &str,
    layout: ExchangeLayout,
    writer: W,
) -> Result<(), ExchangeError> {
    ExchangeDocument::from_segments(label, segments).write(writer, layout)
}

/// Read the translation column in file order.
///
/// The two preamble rows are skipped without inspection and rows with fewer
/// than two cells are ignored. An empty result is an error.
pub fn read_translations<R: Read>(reader: R) -> Result<TranslationList, ExchangeError> {
    let translations: TranslationList = data_rows(reader)?
        .into_iter()
        .filter(|record| record.len() >= 2)
        .map(|record| record[1].to_string())
        .collect();

    if translations.is_empty() {
        return Err(ExchangeError::NoTranslations);
    }
    Ok(translations)
}

/// Read a keyed exchange file.
///
/// Every row with at least two cells must carry a position column.
pub fn read_keyed<R: Read>(reader: R) -> Result<Vec<KeyedTranslation>, ExchangeError> {
    let mut translations = Vec::new();

    for record in data_rows(reader)? {
        if record.len() < 2 {
            continue;
        }

        let row = record.position().map_or(0, |p| p.line() as usize);
        let positions = record
            .get(2)
            .and_then(parse_positions)
            .ok_or(ExchangeError::MissingPositionKey { row })?;

        translations.push(KeyedTranslation {
            row,
            positions,
            text: record[1].to_string(),
        });
    }

    if translations.is_empty() {
        return Err(ExchangeError::NoTranslations);
    }
    Ok(translations)
}

/// `read_translations` on a file
pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<TranslationList, ExchangeError> {
    let file = File::open(path.as_ref())?;
    read_translations(file)
}

/// `read_keyed` on a file
pub fn read_keyed_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<KeyedTranslation>, ExchangeError> {
    let file = File::open(path.as_ref())?;
    read_keyed(file)
}

fn data_rows<R: Read>(reader: R) -> Result<Vec<StringRecord>, ExchangeError> {
    let mut reader = BufReader::new(reader);
    if reader.fill_buf()?.starts_with(UTF8_BOM) {
        reader.consume(UTF8_BOM.len());
    }

    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv.records().skip(PREAMBLE_ROWS) {
        rows.push(record?);
    }
    Ok(rows)
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(POSITION_SEPARATOR)
}

fn parse_positions(cell: &str) -> Option<Vec<usize>> {
    let positions: Option<Vec<usize>> = cell
        .split(POSITION_SEPARATOR)
        .map(|p| p.trim().parse().ok())
        .collect();
    positions.filter(|p| !p.is_empty())
}
