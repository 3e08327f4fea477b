/*!
 * Document collaborator abstraction.
 *
 * The engine never talks to an editing application directly. Every stage
 * receives a `DocumentSession` explicitly, reads `TextUnit` snapshots from it
 * and writes changes back through it.
 */

pub mod layout;

use serde::{Deserialize, Serialize};

use crate::errors::DocumentError;

pub use layout::{LayoutDocument, TextFrame};

/// Height assumed for a unit whose geometric bounds are unavailable
pub const DEFAULT_UNIT_HEIGHT: f64 = 20.0;

/// One atomic text-bearing element read from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Text content
    pub content: String,

    /// Horizontal position in document coordinates
    pub x: f64,

    /// Vertical position in document coordinates (larger is higher on the page)
    pub y: f64,

    /// Vertical extent, resolved at construction
    pub height: f64,
}

impl TextUnit {
    /// Create a unit, resolving missing bounds to `DEFAULT_UNIT_HEIGHT`
    pub fn new(content: impl Into<String>, x: f64, y: f64, height: Option<f64>) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            height: height.unwrap_or(DEFAULT_UNIT_HEIGHT),
        }
    }
}

/// Live handle on a document with single-writer semantics.
///
/// Implementations enumerate their text units in a stable native order; that
/// order is what positional reinjection indexes into.
pub trait DocumentSession {
    /// Human-readable name used as the exchange file label
    fn label(&self) -> String;

    /// Snapshot every text unit in native enumeration order
    fn text_units(&self) -> Result<Vec<TextUnit>, DocumentError>;

    /// Overwrite the content of an existing unit
    fn set_content(&mut self, index: usize, content: &str) -> Result<(), DocumentError>;

    /// Create a new unit at the given position and return its index
    fn create_unit(&mut self, x: f64, y: f64, content: &str) -> Result<usize, DocumentError>;

    /// Apply a font to the whole text range of a unit
    fn apply_font(&mut self, index: usize, font: &str) -> Result<(), DocumentError>;

    /// Persist all pending changes
    fn save(&mut self) -> Result<(), DocumentError>;
}
