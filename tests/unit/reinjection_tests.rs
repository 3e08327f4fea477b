/*!
 * Tests for reinjection planning and applying
 */

use anyhow::Result;

use framelate::document::{LayoutDocument, TextFrame, TextUnit};
use framelate::exchange::KeyedTranslation;
use framelate::reinjection::{self, PlanWarning, ReinjectionAction, ReinjectionMode, INSERT_BELOW_OFFSET};
use framelate::DocumentSession;
use crate::common;

fn texts(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_plan_mismatchWarning_shouldMatchCountDifference() {
    let units = common::spaced_units(&["a", "b", "c"]);

    for count in 0..6 {
        let translations: Vec<String> = (0..count).map(|i| format!("t{}", i)).collect();
        let plan = reinjection::plan(&units, &translations, ReinjectionMode::Replace, None);

        assert_eq!(plan.actions.len(), count.min(units.len()));
        if count == units.len() {
            assert!(plan.warnings.is_empty());
        } else {
            assert_eq!(
                plan.warnings,
                vec![PlanWarning::CountMismatch { translations: count, units: 3 }]
            );
        }
    }
}

#[test]
fn test_plan_withFewerTranslations_shouldLeaveTrailingUnitsAlone() {
    let units = common::spaced_units(&["a", "b", "c"]);
    let plan = reinjection::plan(&units, &texts(&["x", "y"]), ReinjectionMode::Replace, Some("Arial"));

    let targets: Vec<usize> = plan.actions.iter().map(ReinjectionAction::unit_index).collect();
    assert_eq!(targets, vec![0, 1]);
    assert!(matches!(
        &plan.actions[1],
        ReinjectionAction::SetContent { content, font: Some(font), .. } if content == "y" && font == "Arial"
    ));
}

#[test]
fn test_plan_insertBelow_shouldOffsetEveryAction() {
    let units = common::spaced_units(&["a", "b"]);
    let plan = reinjection::plan(&units, &texts(&["x", "y"]), ReinjectionMode::InsertBelow, None);

    for (action, unit) in plan.actions.iter().zip(&units) {
        match action {
            ReinjectionAction::CreateBelow { x, y, .. } => {
                assert_eq!(*x, unit.x);
                assert_eq!(*y, unit.y - INSERT_BELOW_OFFSET);
            }
            other => panic!("expected CreateBelow, got {:?}", other),
        }
    }
}

#[test]
fn test_planKeyed_shouldTargetAnchorsOutOfOrder() {
    let units = common::spaced_units(&["a", "b", "c"]);
    let keyed = vec![
        KeyedTranslation { row: 3, positions: vec![2], text: "C".to_string() },
        KeyedTranslation { row: 4, positions: vec![0, 1], text: "AB".to_string() },
        KeyedTranslation { row: 5, positions: vec![9], text: "?".to_string() },
    ];

    let plan = reinjection::plan_keyed(&units, &keyed, ReinjectionMode::Replace, None);

    let targets: Vec<usize> = plan.actions.iter().map(ReinjectionAction::unit_index).collect();
    assert_eq!(targets, vec![2, 0, 1]);
    assert!(matches!(
        &plan.actions[2],
        ReinjectionAction::SetContent { index: 1, content, font: None } if content.is_empty()
    ));
    assert_eq!(plan.warnings, vec![PlanWarning::UnknownPosition { row: 5, position: 9 }]);
}

#[test]
fn test_plan_insertBelow_withAnyCount_shouldNeverWarn() {
    let units = common::spaced_units(&["a", "b", "c"]);

    for count in 0..6 {
        let translations: Vec<String> = (0..count).map(|i| format!("t{}", i)).collect();
        let plan = reinjection::plan(&units, &translations, ReinjectionMode::InsertBelow, None);

        assert!(plan.warnings.is_empty());
        assert_eq!(plan.actions.len(), count.min(units.len()));
    }
}

#[test]
fn test_apply_withUnavailableFont_shouldStillWriteEveryContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let frames = vec![TextFrame::new("one", 0.0, 100.0), TextFrame::new("two", 0.0, 50.0)];
    let mut document = LayoutDocument::from_frames(temp_dir.path().join("doc.json"), frames)
        .with_fonts(vec!["Arial".to_string()]);

    let units: Vec<TextUnit> = document.text_units()?;
    let plan = reinjection::plan(&units, &texts(&["uno", "dos"]), ReinjectionMode::Replace, Some("Comic"));
    let report = reinjection::apply(&plan, &mut document);

    assert_eq!(report.applied, 2);
    assert_eq!(report.warnings.len(), 2);
    let contents: Vec<&str> = document.frames().iter().map(|f| f.contents.as_str()).collect();
    assert_eq!(contents, vec!["uno", "dos"]);
    assert!(document.frames().iter().all(|f| f.font.is_none()));
    Ok(())
}
