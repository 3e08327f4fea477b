/*!
 * Tests for geometry clustering and export filtering
 */

use framelate::document::TextUnit;
use framelate::segmentation::{cluster, filter, is_blank, is_numeric, Segment};
use crate::common;

fn contents(segments: &[Segment]) -> Vec<String> {
    segments.iter().map(|s| s.content.clone()).collect()
}

/// Two lines eight units apart merge under threshold 5 (8 < 10 * 1.5 + 5)
#[test]
fn test_cluster_withAdjacentLines_shouldMergeHelloWorld() {
    let units = vec![
        TextUnit::new("Hello", 0.0, 100.0, Some(10.0)),
        TextUnit::new("World", 0.0, 92.0, Some(10.0)),
    ];

    let segments = cluster(&units, true, 5.0);

    assert_eq!(contents(&segments), vec!["Hello World"]);
}

#[test]
fn test_cluster_outputCount_shouldNeverExceedInput() {
    let units = vec![
        TextUnit::new("a", 0.0, 100.0, Some(10.0)),
        TextUnit::new("b", 0.0, 95.0, Some(10.0)),
        TextUnit::new("c", 0.0, 20.0, None),
        TextUnit::new("d", 0.0, 10.0, None),
        TextUnit::new("e", 0.0, -400.0, Some(2.0)),
    ];

    for threshold in [0.0, 1.0, 10.0, 50.0, 1000.0] {
        assert!(cluster(&units, true, threshold).len() <= units.len());
        assert_eq!(cluster(&units, false, threshold).len(), units.len());
    }
}

#[test]
fn test_cluster_withDistantUnits_shouldKeepOneSegmentEach() {
    let units = common::spaced_units(&["one", "two", "three"]);
    let segments = cluster(&units, true, 5.0);
    assert_eq!(contents(&segments), vec!["one", "two", "three"]);
}

#[test]
fn test_cluster_shouldNotDependOnInputOrder() {
    let units = vec![
        TextUnit::new("Title", 10.0, 700.0, Some(20.0)),
        TextUnit::new("Subtitle", 10.0, 690.0, Some(12.0)),
        TextUnit::new("Left", 0.0, 400.0, Some(10.0)),
        TextUnit::new("Right", 200.0, 400.0, Some(10.0)),
        TextUnit::new("Footer", 10.0, 20.0, None),
    ];
    let expected = cluster(&units, true, 3.0);

    let mut reversed = units.clone();
    reversed.reverse();
    let mut rotated = units.clone();
    rotated.rotate_left(2);

    for permutation in [reversed, rotated] {
        let actual = cluster(&permutation, true, 3.0);
        assert_eq!(contents(&actual), contents(&expected));
        let ys: Vec<f64> = actual.iter().map(|s| s.y).collect();
        let expected_ys: Vec<f64> = expected.iter().map(|s| s.y).collect();
        assert_eq!(ys, expected_ys);
    }
}

#[test]
fn test_cluster_sameRow_shouldJoinLeftToRight() {
    let units = vec![
        TextUnit::new("Right", 200.0, 400.0, Some(10.0)),
        TextUnit::new("Left", 0.0, 400.0, Some(10.0)),
    ];
    let segments = cluster(&units, true, 0.0);
    assert_eq!(contents(&segments), vec!["Left Right"]);
    assert_eq!(segments[0].source_indices, vec![1, 0]);
}

#[test]
fn test_isNumeric_withDocumentedExamples_shouldClassify() {
    assert!(is_numeric("1,234"));
    assert!(is_numeric("12.5"));
    assert!(!is_numeric("abc"));
    assert!(is_blank(""));
    assert!(!is_numeric(""));
}

/// Numbers off, blanks on: the price is dropped, the blank survives
#[test]
fn test_filter_withNumbersDisabledBlanksEnabled_shouldExportPriceAndBlank() {
    let units = common::spaced_units(&["Price", "100", ""]);
    let segments = cluster(&units, false, 0.0);

    let exported = filter(segments, false, true);

    assert_eq!(contents(&exported), vec!["Price", ""]);
}

#[test]
fn test_filter_appliedTwice_shouldBeIdempotent() {
    let units = common::spaced_units(&["Intro", "", "42", "3.14", " ", "Outro", "v2"]);
    let segments = cluster(&units, false, 0.0);

    for (numbers, blanks) in [(true, true), (true, false), (false, true), (false, false)] {
        let once = filter(segments.clone(), numbers, blanks);
        let twice = filter(once.clone(), numbers, blanks);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_filter_withEverythingEnabled_shouldPassThrough() {
    let units = common::spaced_units(&["", "7", "text"]);
    let segments = cluster(&units, false, 0.0);
    assert_eq!(filter(segments.clone(), true, true), segments);
}
