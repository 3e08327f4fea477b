/*!
 * Reinjection of translations into a live document.
 *
 * Planning is pure: it turns the live unit enumeration plus a translation
 * list into an ordered list of actions and non-fatal warnings. Applying a
 * plan runs those actions against a `DocumentSession`, recording per-action
 * failures instead of aborting.
 */

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentSession, TextUnit};
use crate::exchange::KeyedTranslation;

/// Vertical distance between a source unit and its inserted translation
pub const INSERT_BELOW_OFFSET: f64 = 20.0;

/// How translations are written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinjectionMode {
    /// Overwrite the unit's content in place
    #[default]
    Replace,
    /// Create a new unit below the source unit, leaving it untouched
    InsertBelow,
}

impl fmt::Display for ReinjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::InsertBelow => write!(f, "insert_below"),
        }
    }
}

/// A single write against the document
#[derive(Debug, Clone, PartialEq)]
pub enum ReinjectionAction {
    /// Set the content of unit `index`
    SetContent {
        index: usize,
        content: String,
        font: Option<String>,
    },
    /// Create a unit at `(x, y)` below unit `source_index`
    CreateBelow {
        source_index: usize,
        x: f64,
        y: f64,
        content: String,
        font: Option<String>,
    },
}

impl ReinjectionAction {
    fn new(mode: ReinjectionMode, index: usize, unit: &TextUnit, content: &str, font: Option<&str>) -> Self {
        let content = content.to_string();
        let font = font.map(str::to_string);
        match mode {
            ReinjectionMode::Replace => Self::SetContent { index, content, font },
            ReinjectionMode::InsertBelow => Self::CreateBelow {
                source_index: index,
                x: unit.x,
                y: unit.y - INSERT_BELOW_OFFSET,
                content,
                font,
            },
        }
    }

    /// Index of the unit the action refers to
    pub fn unit_index(&self) -> usize {
        match self {
            Self::SetContent { index, .. } => *index,
            Self::CreateBelow { source_index, .. } => *source_index,
        }
    }
}

/// Non-fatal conditions found while planning
#[derive(Debug, Clone, PartialEq)]
pub enum PlanWarning {
    /// Translation count differs from the live unit count
    CountMismatch { translations: usize, units: usize },
    /// A keyed row names a unit the live document does not have
    UnknownPosition { row: usize, position: usize },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { translations, units } => write!(
                f,
                "Translation count ({}) does not match text unit count ({}); make sure export and import use the same merge and filter settings",
                translations, units
            ),
            Self::UnknownPosition { row, position } => write!(
                f,
                "Row {} targets text unit {} which does not exist in the document",
                row, position
            ),
        }
    }
}

/// Ordered actions plus the warnings raised while building them
#[derive(Debug, Clone, PartialEq)]
pub struct ReinjectionPlan {
    pub mode: ReinjectionMode,
    pub actions: Vec<ReinjectionAction>,
    pub warnings: Vec<PlanWarning>,
}

/// Map translations onto units by position.
///
/// Only the first `min(units, translations)` pairs produce actions; surplus
/// units are left untouched and surplus translations are ignored. A count
/// difference is only warned about in Replace mode, where it overwrites the
/// wrong units.
pub fn plan(
    units: &[TextUnit],
    translations: &[String],
    mode: ReinjectionMode,
    font: Option<&str>,
) -> ReinjectionPlan {
    let mut warnings = Vec::new();
    if mode == ReinjectionMode::Replace && translations.len() != units.len() {
        warnings.push(PlanWarning::CountMismatch {
            translations: translations.len(),
            units: units.len(),
        });
    }

    let actions = units
        .iter()
        .zip(translations)
        .enumerate()
        .map(|(index, (unit, text))| ReinjectionAction::new(mode, index, unit, text, font))
        .collect();

    ReinjectionPlan { mode, actions, warnings }
}

/// Map keyed translations onto units by their recorded positions.
///
/// Each row writes to its first position. In Replace mode the other units of a
/// merged row are cleared so the merged text is not shown twice; in
/// InsertBelow mode they are left as they are. Rows whose anchor is outside
/// the live enumeration are skipped with an `UnknownPosition` warning.
pub fn plan_keyed(
    units: &[TextUnit],
    translations: &[KeyedTranslation],
    mode: ReinjectionMode,
    font: Option<&str>,
) -> ReinjectionPlan {
    let mut actions = Vec::new();
    let mut warnings = Vec::new();

    for entry in translations {
        let Some((&anchor, rest)) = entry.positions.split_first() else {
            continue;
        };

        let Some(unit) = units.get(anchor) else {
            warnings.push(PlanWarning::UnknownPosition {
                row: entry.row,
                position: anchor,
            });
            continue;
        };
        actions.push(ReinjectionAction::new(mode, anchor, unit, &entry.text, font));

        if rest.is_empty() {
            continue;
        }
        match mode {
            ReinjectionMode::Replace => {
                for &index in rest {
                    if index < units.len() {
                        actions.push(ReinjectionAction::SetContent {
                            index,
                            content: String::new(),
                            font: None,
                        });
                    } else {
                        debug!("Row {}: merged unit {} no longer exists", entry.row, index);
                    }
                }
                debug!("Row {} written to unit {}, cleared units {:?}", entry.row, anchor, rest);
            }
            ReinjectionMode::InsertBelow => {
                debug!("Row {} inserted below unit {}, units {:?} untouched", entry.row, anchor, rest);
            }
        }
    }

    ReinjectionPlan { mode, actions, warnings }
}

/// A write or font change that failed for one unit
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyWarning {
    /// Unit the failed action referred to
    pub index: usize,
    pub message: String,
}

impl fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text unit {}: {}", self.index, self.message)
    }
}

/// Outcome of applying a plan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Actions whose content write succeeded
    pub applied: usize,
    pub warnings: Vec<ApplyWarning>,
}

/// Execute a plan against a session.
///
/// Each failure is logged and recorded, then the next action runs. The caller
/// decides whether to save the document.
pub fn apply(plan: &ReinjectionPlan, session: &mut dyn DocumentSession) -> ApplyReport {
    let mut report = ApplyReport::default();

    for action in &plan.actions {
        let written = match action {
            ReinjectionAction::SetContent { index, content, .. } => {
                session.set_content(*index, content).map(|_| *index)
            }
            ReinjectionAction::CreateBelow { x, y, content, .. } => session.create_unit(*x, *y, content),
        };

        let target = match written {
            Ok(target) => target,
            Err(e) => {
                record(&mut report, action.unit_index(), format!("content update failed: {}", e));
                continue;
            }
        };
        report.applied += 1;

        let font = match action {
            ReinjectionAction::SetContent { font, .. } | ReinjectionAction::CreateBelow { font, .. } => font,
        };
        if let Some(font) = font {
            if let Err(e) = session.apply_font(target, font) {
                record(&mut report, action.unit_index(), format!("failed to set font: {}", e));
            }
        }
    }

    report
}

fn record(report: &mut ApplyReport, index: usize, message: String) {
    let warning = ApplyWarning { index, message };
    warn!("{}", warning);
    report.warnings.push(warning);
}
