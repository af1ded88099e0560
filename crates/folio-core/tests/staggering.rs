//! Staggered Reveal Tests
//!
//! Start times of reveal group members under the built-in policies.

use folio_core::node::{MotionBinding, NodeKind, ViewNode};
use folio_core::page::collect_groups;
use folio_core::stagger::{RevealGroup, RevealMember, Role};
use folio_core::text::{SegmentMode, SegmentedReveal};
use folio_core::variants::{names, Length, StateName};
use folio_core::visibility::Trigger;
use folio_core::{Page, SiteConfig, StaggerPolicy, VariantRegistry};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Item i of a group with base delay D and step S starts at D + i*S.
#[test]
fn policy_places_items_linearly() {
    for (delay, step) in [(0.0, 0.1), (0.2, 0.1), (0.5, 0.05), (1.0, 0.0)] {
        let policy = StaggerPolicy::new(step, delay);
        for i in 0..20 {
            assert!(close(policy.child_delay(i), delay + i as f64 * step));
        }
    }
}

#[test]
fn unindexed_children_follow_their_position() {
    init_tracing();
    let registry = VariantRegistry::global();
    let mut group = RevealGroup::new(
        Trigger::in_view_once(0.1),
        RevealMember {
            node: 0,
            variant: names::CONTAINER,
            custom: None,
        },
    );
    for node in 1..=4 {
        group.children.push(RevealMember {
            node,
            variant: names::SCROLL_REVEAL,
            custom: None,
        });
    }

    let schedule = group.schedule(registry, 0.0).unwrap();
    let root_end = schedule.entries[0].end();
    for entry in schedule.children() {
        let Role::Child { position } = entry.role else {
            panic!("expected a child entry");
        };
        assert!(close(entry.start, root_end + 0.2 + 0.1 * position as f64));
    }
}

#[test]
fn delayed_children_start_on_their_own_delay() {
    init_tracing();
    let registry = VariantRegistry::global();
    let mut group = RevealGroup::new(
        Trigger::in_view_once(0.1),
        RevealMember {
            node: 0,
            variant: names::CONTAINER,
            custom: None,
        },
    );
    for node in 1..=3 {
        group.children.push(RevealMember {
            node,
            variant: names::AVATAR,
            custom: None,
        });
    }

    let schedule = group.schedule(registry, 0.0).unwrap();
    let root_end = schedule.entries[0].end();
    // delayChildren 0.2 plus the avatar's own 0.4, whatever the position.
    for entry in schedule.children() {
        assert!(close(entry.start - root_end, 0.6), "{}", entry.start - root_end);
    }
}

#[test]
fn segmented_text_staggers_with_its_parent() {
    init_tracing();
    let view = SegmentedReveal::new("one two three four", SegmentMode::Word)
        .with_delay(0.05)
        .view();
    let groups = collect_groups(&view, 0);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].trigger, Trigger::Mount);

    let schedule = groups[0].schedule(VariantRegistry::global(), 1.0).unwrap();
    let starts: Vec<f64> = schedule.children().map(|e| e.start).collect();
    assert_eq!(starts.len(), 4);
    for (i, start) in starts.iter().enumerate() {
        // WithChildren: the base is the parent's start, not its end.
        assert!(close(*start, 1.0 + 0.05 + 0.05 * i as f64), "{} -> {}", i, start);
    }
}

#[test]
fn hero_lines_cascade_by_index() {
    init_tracing();
    let page = Page::compose(&SiteConfig::default());
    let schedules = page.schedule("home", VariantRegistry::global()).unwrap();

    let mut hero_starts: Vec<f64> = schedules
        .iter()
        .filter_map(|s| {
            let root = &s.entries[0];
            let node = page.tree().get(root.node)?;
            (node.motion.as_ref()?.variant == names::HERO_TEXT).then_some(root.start)
        })
        .collect();
    hero_starts.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(hero_starts.len(), 4);
    for (i, start) in hero_starts.iter().enumerate() {
        assert!(close(*start, 0.1 * i as f64));
    }
}

#[test]
fn skill_bars_fill_to_their_level() {
    init_tracing();
    let registry = VariantRegistry::global();
    let bar = |level: f32| {
        let tree = ViewNode::new(NodeKind::SkillBar { level }).animate(
            MotionBinding::variant(names::SKILL_BAR)
                .custom(level)
                .in_view(0.3),
        );
        let group = collect_groups(&tree, 0).remove(0);
        group.schedule(registry, 0.0).unwrap().entries.remove(0)
    };

    let empty = bar(0.0);
    assert_eq!(empty.from.width, Some(Length::Px(0.0)));
    assert_eq!(empty.to.width, Some(Length::Percent(0.0)));
    assert_eq!(bar(100.0).to.width, Some(Length::Percent(100.0)));
    assert_eq!(bar(85.0).to.width, Some(Length::Percent(85.0)));
    assert_eq!(bar(85.0).duration, 1.0);

    let variant = registry.get(names::SKILL_BAR).unwrap();
    assert!(variant.is_parametrized(StateName::Visible));
}

#[test]
fn section_ordinals_drive_the_cascade() {
    init_tracing();
    let page = Page::compose(&SiteConfig::default());
    let schedules = page.schedule("experience", VariantRegistry::global()).unwrap();
    let section = &schedules[0];
    let root_end = section.entries[0].end();

    // Ordinal-indexed children: base + delayChildren + 0.1 * ordinal.
    let mut starts: Vec<f64> = section.children().map(|e| e.start - root_end).collect();
    starts.sort_by(|a, b| a.total_cmp(b));
    for (ordinal, offset) in starts.iter().take(8).enumerate() {
        assert!(close(*offset, 0.2 + 0.1 * ordinal as f64), "{} -> {}", ordinal, offset);
    }
}
