//! Animated Text Tests

use folio_core::config::TypewriterConfig;
use folio_core::node::NodeKind;
use folio_core::sections::hero;
use folio_core::text::{segment, SegmentMode, SegmentedReveal, TypewriterPhase};
use std::time::Duration;

#[test]
fn segmentation_counts() {
    assert_eq!(segment("a b c", SegmentMode::Word).len(), 3);
    assert_eq!(segment("ab", SegmentMode::Letter).len(), 2);

    let lines = segment("a\nb", SegmentMode::Line);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].break_after);
    assert!(!lines[1].break_after);
}

#[test]
fn reveal_view_keeps_segment_flags() {
    let view = SegmentedReveal::new("first\nsecond", SegmentMode::Line).view();
    let flags: Vec<(bool, bool)> = view
        .children
        .iter()
        .filter_map(|n| match n.kind {
            NodeKind::Segment {
                gap_after,
                break_after,
                ..
            } => Some((gap_after, break_after)),
            _ => None,
        })
        .collect();
    assert_eq!(flags, vec![(false, true), (false, false)]);
}

#[test]
fn configured_typewriter_cycles() {
    let config = TypewriterConfig {
        strings: vec!["hi".into(), "yo".into()],
        type_delay_ms: 10,
        delete_delay_ms: 5,
        pause_ms: 100,
        looping: true,
    };
    let tw = hero::typewriter(&config);
    // 2 * (20 typing + 100 pause + 10 deleting)
    assert_eq!(tw.period(), Duration::from_millis(260));

    let at = |ms| tw.frame_at(Duration::from_millis(ms));
    assert_eq!(at(15).text, "h");
    assert_eq!(at(50).phase, TypewriterPhase::Pausing);
    assert_eq!(at(50).text, "hi");
    assert_eq!(at(126).text, "h");
    assert_eq!(at(130 + 10).index, 1);
    assert_eq!(at(260 + 15).text, "h");
}

#[test]
fn typewriter_without_strings_is_empty() {
    let config = TypewriterConfig {
        strings: Vec::new(),
        ..TypewriterConfig::default()
    };
    let frame = hero::typewriter(&config).frame_at(Duration::from_secs(3));
    assert_eq!(frame.text, "");
    assert_eq!(frame.phase, TypewriterPhase::Done);
}
