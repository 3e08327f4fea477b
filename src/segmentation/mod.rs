/*!
 * Segment consolidation and export filtering.
 *
 * - `cluster`: merges vertically adjacent text units into segments
 * - `filter`: drops blank or numeric-only segments from the export set
 */

pub mod cluster;
pub mod filter;

use serde::{Deserialize, Serialize};

use crate::document::TextUnit;

pub use cluster::cluster;
pub use filter::{filter, is_blank, is_numeric};

/// One or more text units consolidated into a single translation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment text, constituent contents joined by a single space
    pub content: String,

    /// Horizontal position of the opening unit
    pub x: f64,

    /// Running vertical midpoint of the constituent units
    pub y: f64,

    /// Height of the opening unit; merging tests each incoming unit's own height
    pub height: f64,

    /// Enumeration indices of the constituent units
    pub source_indices: Vec<usize>,
}

impl Segment {
    /// Wrap a single unit at enumeration position `index`
    pub fn from_unit(index: usize, unit: &TextUnit) -> Self {
        Self {
            content: unit.content.clone(),
            x: unit.x,
            y: unit.y,
            height: unit.height,
            source_indices: vec![index],
        }
    }
}
