//! Viewport Visibility Tests
//!
//! Fire-once latches driven by the viewport observer over repeated scroll sweeps.

use folio_core::layout::Bounds;
use folio_core::visibility::{
    Trigger, ViewportObserver, Viewport, VisibilityChange, VisibilityLatch,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn sweep(from: i32, to: i32, step: i32) -> Vec<f32> {
    if from <= to {
        (from..=to).step_by(step as usize).map(|y| y as f32).collect()
    } else {
        (to..=from).rev().step_by(step as usize).map(|y| y as f32).collect()
    }
}

#[test]
fn once_group_reveals_exactly_once_across_sweeps() {
    init_tracing();
    let element = Bounds {
        x: 0.0,
        y: 1500.0,
        width: 800.0,
        height: 400.0,
    };
    let viewport = Viewport::new(800.0, 600.0);
    let trigger = Trigger::in_view_once(0.3);
    let Trigger::InView { amount, .. } = trigger else {
        unreachable!()
    };

    let mut observer = ViewportObserver::new();
    let observation = observer.register(element, amount);
    let mut latch = VisibilityLatch::for_trigger(&trigger);
    let mut reveals = 0;

    let positions = [sweep(0, 3000, 50), sweep(3000, 0, 50), sweep(0, 3000, 25)].concat();
    for y in positions {
        observer.update(&viewport.scrolled_to(y));
        while let Ok(event) = observation.events.try_recv() {
            if latch.observe(event.intersecting) == Some(VisibilityChange::Revealed) {
                reveals += 1;
            }
        }
        if latch.is_spent() {
            observer.unobserve(observation.id);
        }
    }

    assert_eq!(reveals, 1);
    assert!(latch.is_visible());
    assert_eq!(observer.active_count(), 0);
}

#[test]
fn repeating_group_reveals_on_every_entry() {
    init_tracing();
    let element = Bounds {
        x: 0.0,
        y: 1000.0,
        width: 800.0,
        height: 100.0,
    };
    let mut observer = ViewportObserver::new();
    let observation = observer.register(element, 0.5);
    let mut latch = VisibilityLatch::new(false);
    let viewport = Viewport::new(800.0, 600.0);

    let mut changes = Vec::new();
    for y in [0.0, 500.0, 0.0, 500.0, 2000.0] {
        observer.update(&viewport.scrolled_to(y));
        while let Ok(event) = observation.events.try_recv() {
            changes.extend(latch.observe(event.intersecting));
        }
    }
    assert_eq!(
        changes,
        vec![
            VisibilityChange::Revealed,
            VisibilityChange::Concealed,
            VisibilityChange::Revealed,
            VisibilityChange::Concealed,
        ]
    );
    assert_eq!(latch.reveal_count(), 2);
}

#[test]
fn zero_amount_fires_on_first_pixel() {
    init_tracing();
    let element = Bounds {
        x: 0.0,
        y: 600.0,
        width: 800.0,
        height: 200.0,
    };
    let mut observer = ViewportObserver::new();
    let observation = observer.register(element, 0.0);
    let viewport = Viewport::new(800.0, 600.0);

    observer.update(&viewport);
    assert!(!observation.events.try_recv().unwrap().intersecting);
    observer.update(&viewport.scrolled_to(1.0));
    assert!(observation.events.try_recv().unwrap().intersecting);
}
