//! # Viewport Visibility
//!
//! Decides when reveal groups fire.
//!
//! ## Responsibilities
//! - **Triggers**: on mount, or on entering the viewport past an area fraction.
//! - **Latches**: `VisibilityLatch` turns raw intersection events into reveal/conceal
//!   transitions; a fire-once latch reveals exactly once over its lifetime.
//! - **Observation**: `ViewportObserver` tracks registered element bounds and pushes
//!   `VisibilityEvent`s down one channel per registration whenever the viewport moves.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Serialize;
use tracing::debug;

use crate::layout::Bounds;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Trigger {
    /// Plays once, immediately, when the page is mounted.
    Mount,
    /// Plays when at least `amount` of the element's area is inside the viewport.
    InView { amount: f32, once: bool },
}

impl Trigger {
    pub fn in_view_once(amount: f32) -> Self {
        Trigger::InView { amount, once: true }
    }

    pub fn is_once(&self) -> bool {
        match self {
            Trigger::Mount => true,
            Trigger::InView { once, .. } => *once,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VisibilityChange {
    Revealed,
    Concealed,
}

/// Per-group visibility state.
#[derive(Clone, Debug)]
pub struct VisibilityLatch {
    once: bool,
    visible: bool,
    reveals: u32,
}

impl VisibilityLatch {
    pub fn new(once: bool) -> Self {
        Self {
            once,
            visible: false,
            reveals: 0,
        }
    }

    pub fn for_trigger(trigger: &Trigger) -> Self {
        Self::new(trigger.is_once())
    }

    /// Feeds one intersection observation, returning the transition it causes, if any.
    pub fn observe(&mut self, intersecting: bool) -> Option<VisibilityChange> {
        if self.once && self.reveals > 0 {
            return None;
        }
        match (self.visible, intersecting) {
            (false, true) => {
                self.visible = true;
                self.reveals += 1;
                Some(VisibilityChange::Revealed)
            }
            (true, false) => {
                self.visible = false;
                Some(VisibilityChange::Concealed)
            }
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn reveal_count(&self) -> u32 {
        self.reveals
    }

    /// A fire-once latch that has fired no longer needs observing.
    pub fn is_spent(&self) -> bool {
        self.once && self.reveals > 0
    }
}

/// The visible window of the document, in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            top: 0.0,
            width,
            height,
        }
    }

    pub fn scrolled_to(self, top: f32) -> Self {
        Self { top, ..self }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Fraction of `bounds` that lies inside the viewport, vertically.
pub fn intersection_ratio(bounds: &Bounds, viewport: &Viewport) -> f32 {
    let overlap = bounds.bottom().min(viewport.bottom()) - bounds.y.max(viewport.top);
    if bounds.height <= 0.0 {
        let inside = bounds.y >= viewport.top && bounds.y <= viewport.bottom();
        return if inside { 1.0 } else { 0.0 };
    }
    (overlap / bounds.height).clamp(0.0, 1.0)
}

pub type ObservationId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEvent {
    pub observation: ObservationId,
    pub ratio: f32,
    pub intersecting: bool,
}

/// A live registration: its id and the stream of events for it.
#[derive(Debug)]
pub struct Observation {
    pub id: ObservationId,
    pub events: Receiver<VisibilityEvent>,
}

#[derive(Debug)]
struct Target {
    bounds: Bounds,
    amount: f32,
    sender: Sender<VisibilityEvent>,
    last: Option<bool>,
    active: bool,
}

/// Passive intersection observer: the host moves the viewport, targets are notified
/// only when their intersecting state changes (and once on their first update).
#[derive(Debug, Default)]
pub struct ViewportObserver {
    targets: Vec<Target>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, bounds: Bounds, amount: f32) -> Observation {
        let (sender, events) = unbounded();
        let id = self.targets.len();
        self.targets.push(Target {
            bounds,
            amount,
            sender,
            last: None,
            active: true,
        });
        Observation { id, events }
    }

    pub fn unobserve(&mut self, id: ObservationId) {
        if let Some(target) = self.targets.get_mut(id) {
            target.active = false;
        }
    }

    pub fn active_count(&self) -> usize {
        self.targets.iter().filter(|t| t.active).count()
    }

    /// Re-evaluates every active target against `viewport`; returns the number of events sent.
    pub fn update(&mut self, viewport: &Viewport) -> usize {
        let mut sent = 0;
        for (id, target) in self.targets.iter_mut().enumerate() {
            if !target.active {
                continue;
            }
            let ratio = intersection_ratio(&target.bounds, viewport);
            let intersecting = if target.amount > 0.0 {
                ratio >= target.amount
            } else {
                ratio > 0.0
            };
            if target.last == Some(intersecting) {
                continue;
            }
            target.last = Some(intersecting);

            let event = VisibilityEvent {
                observation: id,
                ratio,
                intersecting,
            };
            if target.sender.send(event).is_err() {
                debug!("Observation {} dropped its receiver, deactivating", id);
                target.active = false;
                continue;
            }
            sent += 1;
        }
        sent
    }
}
