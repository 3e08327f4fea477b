/*!
 * Geometry clustering of text units.
 *
 * Units are walked top of page first. A unit joins the open segment when its
 * vertical distance to the segment is below `height * 1.5 + threshold`, where
 * `height` is the incoming unit's own height.
 */

use std::cmp::Ordering;

use log::debug;

use super::Segment;
use crate::document::TextUnit;

/// Multiplier applied to the incoming unit's height when testing proximity
const HEIGHT_FACTOR: f64 = 1.5;

/// Group units into segments.
///
/// With `enabled == false` every unit becomes its own segment in input order.
/// Otherwise units are sorted by descending `y` and merged greedily; the
/// segment's `y` follows the midpoint of its previous `y` and the merged unit.
pub fn cluster(units: &[TextUnit], enabled: bool, threshold: f64) -> Vec<Segment> {
    if !enabled {
        return units
            .iter()
            .enumerate()
            .map(|(index, unit)| Segment::from_unit(index, unit))
            .collect();
    }

    let mut ordered: Vec<(usize, &TextUnit)> = units.iter().enumerate().collect();
    ordered.sort_by(|(_, a), (_, b)| top_down(a, b));

    let mut segments = Vec::new();
    let mut current: Option<Segment> = None;

    for (index, unit) in ordered {
        let text = unit.content.trim();

        current = match current.take() {
            None => Some(opened(index, unit, text)),
            Some(mut open) => {
                let distance = (open.y - unit.y).abs();
                if distance < unit.height * HEIGHT_FACTOR + threshold {
                    debug!("Merging unit {} into segment at y={:.1} (distance {:.1})", index, open.y, distance);
                    open.content.push(' ');
                    open.content.push_str(text);
                    open.y = (open.y + unit.y) / 2.0;
                    open.source_indices.push(index);
                    Some(open)
                } else {
                    segments.push(open);
                    Some(opened(index, unit, text))
                }
            }
        };
    }

    if let Some(last) = current {
        segments.push(last);
    }

    segments
}

fn opened(index: usize, unit: &TextUnit, text: &str) -> Segment {
    Segment {
        content: text.to_string(),
        ..Segment::from_unit(index, unit)
    }
}

// Descending y; ties broken on x, content and height so the walk order does
// not depend on enumeration order.
fn top_down(a: &TextUnit, b: &TextUnit) -> Ordering {
    b.y.total_cmp(&a.y)
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| a.content.cmp(&b.content))
        .then_with(|| a.height.total_cmp(&b.height))
}
