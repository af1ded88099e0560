//! Mounted Page Tests
//!
//! Drives a mounted page the way a host would: scroll events, clicks, hovers and
//! fixed-rate ticks.

use folio_core::form::{ACKNOWLEDGMENT, SUBMITTING_LABEL};
use folio_core::node::{Action, NodeKind};
use folio_core::sections;
use folio_core::variants::names;
use folio_core::visibility::VisibilityChange;
use folio_core::{Field, MountedPage, NodeId, Page, SiteConfig, StateName, Viewport};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

const FRAME: Duration = Duration::from_millis(16);

fn mounted() -> (Page, MountedPage) {
    let page = Page::compose(&SiteConfig::default());
    let mounted = page.mount(Viewport::new(1280.0, 800.0)).unwrap();
    (page, mounted)
}

fn bound_to(page: &Page, variant: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    page.tree().walk(&mut |id, _, node| {
        if node.motion.as_ref().is_some_and(|m| m.variant == variant) {
            found.push(id);
        }
    });
    found
}

fn run(mounted: &mut MountedPage, frames: usize) {
    for _ in 0..frames {
        mounted.tick(FRAME).unwrap();
    }
}

#[test]
fn mount_reveals_navbar_and_hero_only() {
    init_tracing();
    let (page, mounted) = mounted();

    let navbar = page.tree().find_section(sections::NAVBAR).unwrap();
    assert_eq!(mounted.reveal_count(navbar), Some(1));
    for id in bound_to(&page, names::HERO_TEXT) {
        assert_eq!(mounted.reveal_count(id), Some(1));
    }

    let containers = bound_to(&page, names::CONTAINER);
    let about = page.tree().find_section(sections::ABOUT).unwrap();
    let about_container = containers.iter().find(|id| **id > about).unwrap();
    assert_eq!(mounted.reveal_count(*about_container), Some(0));
}

#[test]
fn progress_follows_the_scroll() {
    init_tracing();
    let (_, mut mounted) = mounted();
    let frame = mounted.tick(FRAME).unwrap();
    assert_eq!(frame.progress, 0.0);
    assert!(!frame.nav_scrolled);

    let bottom = mounted.layout().document_height();
    mounted.on_scroll(bottom).unwrap();
    let early = mounted.tick(FRAME).unwrap();
    assert!(early.progress > 0.0 && early.progress < 1.0);

    run(&mut mounted, 600);
    let frame = mounted.tick(FRAME).unwrap();
    assert_eq!(frame.progress, 1.0);
    assert_eq!(frame.scroll_y, bottom - 800.0);
}

#[test]
fn navbar_condenses_past_the_threshold() {
    init_tracing();
    let (_, mut mounted) = mounted();
    mounted.on_scroll(50.0).unwrap();
    assert!(!mounted.tick(FRAME).unwrap().nav_scrolled);
    mounted.on_scroll(60.0).unwrap();
    assert!(mounted.tick(FRAME).unwrap().nav_scrolled);
    mounted.on_scroll(10.0).unwrap();
    assert!(!mounted.tick(FRAME).unwrap().nav_scrolled);
}

#[test]
fn groups_reveal_once_over_repeated_sweeps() {
    init_tracing();
    let (page, mut mounted) = mounted();
    let bottom = mounted.layout().document_height();

    let mut y = 0.0;
    for target in [bottom, 0.0, bottom, 0.0] {
        let step = if target > y { 40.0 } else { -40.0 };
        while (target - y) * step > 0.0 {
            y += step;
            mounted.on_scroll(y).unwrap();
            mounted.tick(FRAME).unwrap();
        }
    }

    for group in page.groups() {
        let count = mounted.reveal_count(group.root.node).unwrap();
        assert_eq!(count, 1, "group at node {}", group.root.node);
    }
    assert_eq!(mounted.observed_groups(), 0);

    let footer = page.tree().find_section(sections::FOOTER).unwrap();
    let blocks: Vec<_> = bound_to(&page, names::FADE_IN_UP)
        .into_iter()
        .filter(|id| *id > footer)
        .collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks.iter().all(|id| mounted.reveal_count(*id) == Some(1)));
}

#[test]
fn hovering_a_project_card_lifts_it() {
    init_tracing();
    let (page, mut mounted) = mounted();
    let card = bound_to(&page, names::PROJECT_CARD)[0];

    let experience = page.tree().find_section(sections::EXPERIENCE).unwrap();
    let top = mounted.layout().bounds(experience).unwrap().y;
    mounted.on_scroll(top).unwrap();
    run(&mut mounted, 200);

    assert!(mounted.set_hover(card, true).unwrap());
    run(&mut mounted, 120);
    let frame = mounted.tick(FRAME).unwrap();
    let values = frame.node(card).unwrap();
    assert_eq!(values.state, StateName::Hover);
    assert!((values.y + 10.0).abs() < 0.5);
    assert!((values.opacity - 1.0).abs() < 1e-3);
    assert!(values.box_shadow.is_some());

    assert!(mounted.set_hover(card, false).unwrap());
    run(&mut mounted, 120);
    let values = mounted.tick(FRAME).unwrap().node(card).cloned().unwrap();
    assert_eq!(values.state, StateName::Visible);
    assert!(values.y.abs() < 0.5);
}

#[test]
fn hovering_a_skill_card_lifts_it() {
    init_tracing();
    let (page, mut mounted) = mounted();
    let card = bound_to(&page, names::SKILL_CARD)[0];

    let skills = page.tree().find_section(sections::SKILLS).unwrap();
    let top = mounted.layout().bounds(skills).unwrap().y;
    mounted.on_scroll(top).unwrap();
    run(&mut mounted, 200);

    assert!(mounted.set_hover(card, true).unwrap());
    run(&mut mounted, 120);
    let values = mounted.tick(FRAME).unwrap().node(card).cloned().unwrap();
    assert_eq!(values.state, StateName::Hover);
    assert!((values.y + 5.0).abs() < 0.5);
    assert!((values.opacity - 1.0).abs() < 1e-3);
}

#[test]
fn pressing_a_hovered_button_squeezes_it() {
    init_tracing();
    let (page, mut mounted) = mounted();
    let button = bound_to(&page, names::BUTTON)[0];
    run(&mut mounted, 120);

    let scale_after = |mounted: &mut MountedPage| {
        run(mounted, 120);
        let frame = mounted.tick(FRAME).unwrap();
        let values = frame.node(button).unwrap();
        (values.state, values.scale)
    };

    assert!(mounted.set_hover(button, true).unwrap());
    let (state, scale) = scale_after(&mut mounted);
    assert_eq!(state, StateName::Hover);
    assert!((scale - 1.05).abs() < 1e-3);

    assert!(mounted.set_pressed(button, true).unwrap());
    let (state, scale) = scale_after(&mut mounted);
    assert_eq!(state, StateName::Tap);
    assert!((scale - 0.95).abs() < 1e-3);

    assert!(mounted.set_pressed(button, false).unwrap());
    let (state, scale) = scale_after(&mut mounted);
    assert_eq!(state, StateName::Hover);
    assert!((scale - 1.05).abs() < 1e-3);

    // Variants without a tap state ignore presses.
    let card = bound_to(&page, names::PROJECT_CARD)[0];
    assert!(!mounted.set_pressed(card, true).unwrap());
}

#[test]
fn back_to_top_scrolls_smoothly_home() {
    init_tracing();
    let (page, mut mounted) = mounted();
    mounted.on_scroll(2000.0).unwrap();

    let mut back_to_top = None;
    page.tree().walk(&mut |id, _, node| {
        if let NodeKind::Button {
            action: Action::ScrollToTop,
            ..
        } = node.kind
        {
            back_to_top = Some(id);
        }
    });
    mounted.click(back_to_top.unwrap()).unwrap();
    assert!(mounted.is_smooth_scrolling());

    let halfway = {
        run(&mut mounted, 25);
        mounted.scroll_y()
    };
    assert!(halfway > 0.0 && halfway < 2000.0);

    run(&mut mounted, 50);
    assert!(!mounted.is_smooth_scrolling());
    assert!(mounted.scroll_y().abs() < 0.5);
}

#[test]
fn navigating_to_an_anchor_lands_on_the_section() {
    init_tracing();
    let (page, mut mounted) = mounted();
    let contact = page.tree().find_section(sections::CONTACT).unwrap();
    let max_scroll = mounted.layout().document_height() - 800.0;
    let top = mounted.layout().bounds(contact).unwrap().y.min(max_scroll);

    mounted.navigate("#contact").unwrap();
    let mut revealed = Vec::new();
    for _ in 0..60 {
        let frame = mounted.tick(FRAME).unwrap();
        revealed.extend(
            frame
                .events
                .iter()
                .filter(|e| e.change == VisibilityChange::Revealed)
                .map(|e| e.root),
        );
    }
    assert!((mounted.scroll_y() - top).abs() < 0.5);

    // Groups passed on the way down report through the frames.
    let contact_container = bound_to(&page, names::CONTAINER)
        .into_iter()
        .find(|id| *id > contact)
        .unwrap();
    assert!(revealed.contains(&contact_container));
    assert!(revealed
        .iter()
        .all(|id| mounted.reveal_count(*id) == Some(1)));
    assert!(mounted.navigate("#nowhere").is_err());
}

#[test]
fn mobile_menu_attaches_and_detaches() {
    init_tracing();
    let (page, mut mounted) = mounted();
    let base = mounted.tree().node_count();

    let mut toggle = None;
    page.tree().walk(&mut |id, _, node| {
        if let NodeKind::Button {
            action: Action::ToggleMenu,
            ..
        } = node.kind
        {
            toggle = Some(id);
        }
    });
    let toggle = toggle.unwrap();

    mounted.click(toggle).unwrap();
    assert!(mounted.navbar().is_menu_open());
    assert!(mounted.tree().node_count() > base);
    assert_eq!(mounted.reveal_count(base), Some(1));
    let frame = mounted.tick(FRAME).unwrap();
    assert!(frame.menu_open);
    assert!(frame.node(base).is_some());

    // A menu link navigates and closes the menu.
    let menu_link = base + 1;
    mounted.click(menu_link).unwrap();
    assert!(!mounted.navbar().is_menu_open());
    assert_eq!(mounted.tree().node_count(), base);
    assert!(mounted.tick(FRAME).unwrap().node(base).is_none());

    mounted.click(toggle).unwrap();
    mounted.click(toggle).unwrap();
    assert_eq!(mounted.tree().node_count(), base);

    // The close button after the links closes it too.
    mounted.click(toggle).unwrap();
    let close = mounted.tree().node_count() - 1;
    assert!(matches!(
        mounted.tree().get(close).map(|n| &n.kind),
        Some(NodeKind::Button {
            action: Action::CloseMenu,
            ..
        })
    ));
    mounted.click(close).unwrap();
    assert!(!mounted.navbar().is_menu_open());
    assert_eq!(mounted.tree().node_count(), base);
}

#[test]
fn contact_form_acknowledges_through_the_page() {
    init_tracing();
    let (_, mut mounted) = mounted();
    mounted.set_field(Field::Name, "Grace Hopper");
    mounted.set_field(Field::Email, "grace@example.com");
    mounted.set_field(Field::Message, "Let's build something.");
    mounted.submit_form().unwrap();

    let step = Duration::from_millis(100);
    for _ in 0..14 {
        let frame = mounted.tick(step).unwrap();
        assert_eq!(frame.submit_label, SUBMITTING_LABEL);
        assert!(frame.acknowledgment.is_none());
    }
    let frame = mounted.tick(step).unwrap();
    assert_eq!(frame.acknowledgment.unwrap().message, ACKNOWLEDGMENT);
    assert!(mounted.form().fields().is_blank());
}
