//! Page Layout Tests

use folio_core::layout::PageLayout;
use folio_core::sections::{self, ORDER};
use folio_core::text::{SegmentMode, SegmentedReveal};
use folio_core::{Page, SiteConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn sections_stack_in_page_order() {
    init_tracing();
    let page = Page::compose(&SiteConfig::default());
    let layout = PageLayout::compute(page.tree(), 1280.0, 800.0).unwrap();
    assert_eq!(layout.len(), page.tree().node_count());

    let navbar = page.tree().find_section(sections::NAVBAR).unwrap();
    assert_eq!(layout.bounds(navbar).unwrap().y, 0.0);

    let stacked: Vec<_> = ORDER[1..]
        .iter()
        .map(|anchor| {
            let id = page.tree().find_section(anchor).unwrap();
            layout.bounds(id).unwrap()
        })
        .collect();
    for pair in stacked.windows(2) {
        assert!(pair[1].y >= pair[0].bottom() - 0.5, "{:?}", pair);
    }

    let hero = stacked[0];
    assert!(hero.height >= 800.0);
    assert!(layout.document_height() > 800.0 * 2.0);
    assert!((layout.document_height() - stacked.last().unwrap().bottom()).abs() < 1.0);
}

#[test]
fn narrow_viewports_wrap_into_a_taller_document() {
    init_tracing();
    let page = Page::compose(&SiteConfig::default());
    let wide = PageLayout::compute(page.tree(), 1280.0, 800.0).unwrap();
    let narrow = PageLayout::compute(page.tree(), 375.0, 800.0).unwrap();
    assert!(narrow.document_height() > wide.document_height());
}

#[test]
fn short_document_is_at_least_the_viewport() {
    init_tracing();
    let tree = sections::footer::build();
    let layout = PageLayout::compute(&tree, 1280.0, 5000.0).unwrap();
    assert_eq!(layout.document_height(), 5000.0);
}

#[test]
fn line_segments_stack_and_words_flow() {
    init_tracing();
    let lines = SegmentedReveal::new("first\nsecond", SegmentMode::Line).view();
    let layout = PageLayout::compute(&lines, 1280.0, 800.0).unwrap();
    let (first, second) = (layout.bounds(1).unwrap(), layout.bounds(2).unwrap());
    assert_eq!(second.x, first.x);
    assert!(second.y >= first.bottom() - 0.5);

    let words = SegmentedReveal::new("first second", SegmentMode::Word).view();
    let layout = PageLayout::compute(&words, 1280.0, 800.0).unwrap();
    let (first, second) = (layout.bounds(1).unwrap(), layout.bounds(2).unwrap());
    assert_eq!(second.y, first.y);
    assert!(second.x > first.x);
}
