/*!
 * File-backed layout document.
 *
 * A layout document is a JSON file describing the text frames of an artwork
 * or page: their contents, anchor position, optional geometric bounds and
 * font. It is the reference `DocumentSession` used by the CLI.
 */

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{DocumentSession, TextUnit};
use crate::errors::DocumentError;

/// A single text frame as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Frame text
    pub contents: String,

    /// Anchor position `[x, y]`
    pub position: [f64; 2],

    /// Geometric bounds `[top, left, bottom, right]`, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[f64; 4]>,

    /// Font applied to the frame's text range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl TextFrame {
    /// Create a frame without bounds or font
    pub fn new(contents: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            contents: contents.into(),
            position: [x, y],
            bounds: None,
            font: None,
        }
    }

    /// Builder-style setter for geometric bounds
    pub fn with_bounds(mut self, top: f64, left: f64, bottom: f64, right: f64) -> Self {
        self.bounds = Some([top, left, bottom, right]);
        self
    }

    fn height(&self) -> Option<f64> {
        self.bounds.map(|b| (b[0] - b[2]).abs())
    }
}

/// On-disk representation of a layout document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    text_frames: Vec<TextFrame>,

    /// Fonts installed for this document; absent means any font is accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fonts: Option<Vec<String>>,
}

/// JSON-backed document session
#[derive(Debug)]
pub struct LayoutDocument {
    path: PathBuf,
    layout: LayoutFile,
}

impl LayoutDocument {
    /// Open and parse a layout document
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| DocumentError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let layout: LayoutFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| DocumentError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!("Opened {:?} with {} text frames", path, layout.text_frames.len());
        Ok(Self { path, layout })
    }

    /// Build an in-memory document that will be saved to `path`
    pub fn from_frames<P: AsRef<Path>>(path: P, text_frames: Vec<TextFrame>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout: LayoutFile {
                text_frames,
                fonts: None,
            },
        }
    }

    /// Restrict the fonts that `apply_font` accepts
    pub fn with_fonts(mut self, fonts: Vec<String>) -> Self {
        self.layout.fonts = Some(fonts);
        self
    }

    /// Location the document is saved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All frames in enumeration order
    pub fn frames(&self) -> &[TextFrame] {
        &self.layout.text_frames
    }

    fn frame_mut(&mut self, index: usize) -> Result<&mut TextFrame, DocumentError> {
        let count = self.layout.text_frames.len();
        self.layout
            .text_frames
            .get_mut(index)
            .ok_or(DocumentError::IndexOutOfRange { index, count })
    }
}

impl DocumentSession for LayoutDocument {
    fn label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn text_units(&self) -> Result<Vec<TextUnit>, DocumentError> {
        Ok(self
            .layout
            .text_frames
            .iter()
            .map(|frame| {
                TextUnit::new(
                    frame.contents.clone(),
                    frame.position[0],
                    frame.position[1],
                    frame.height(),
                )
            })
            .collect())
    }

    fn set_content(&mut self, index: usize, content: &str) -> Result<(), DocumentError> {
        self.frame_mut(index)?.contents = content.to_string();
        Ok(())
    }

    fn create_unit(&mut self, x: f64, y: f64, content: &str) -> Result<usize, DocumentError> {
        self.layout.text_frames.push(TextFrame::new(content, x, y));
        Ok(self.layout.text_frames.len() - 1)
    }

    fn apply_font(&mut self, index: usize, font: &str) -> Result<(), DocumentError> {
        if let Some(fonts) = &self.layout.fonts {
            if !fonts.iter().any(|f| f == font) {
                return Err(DocumentError::FontUnavailable(font.to_string()));
            }
        }
        self.frame_mut(index)?.font = Some(font.to_string());
        Ok(())
    }

    fn save(&mut self) -> Result<(), DocumentError> {
        let save_error = |message: String| DocumentError::Save {
            path: self.path.display().to_string(),
            message,
        };

        let file = File::create(&self.path).map_err(|e| save_error(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.layout)
            .map_err(|e| save_error(e.to_string()))?;
        writer.flush().map_err(|e| save_error(e.to_string()))?;
        Ok(())
    }
}
