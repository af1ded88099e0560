//! # Motion Runtime
//!
//! Drives the animatable properties of every bound node over page time.
//!
//! ## Responsibilities
//! - **Tracks**: one `Animated<f32>` per property per node, rebuilt from the current
//!   value whenever the node is retargeted.
//! - **Reveals**: applies a `RevealSchedule` by holding each member until its start time.
//! - **Gestures**: hover and press move a node to its `hover`/`tap` state and back.
//!
//! ## Key Types
//! - `MotionSystem`: All node motion of a mounted page.
//! - `MotionValues`: A sampled snapshot of one node.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::animation::Animated;
use crate::errors::{FolioError, Result};
use crate::node::{NodeId, ViewNode};
use crate::stagger::RevealSchedule;
use crate::variants::{Property, StateName, TargetState, Timing, Transition, VariantRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Gesture {
    Hover,
    Press,
}

impl Gesture {
    fn state(&self) -> StateName {
        match self {
            Gesture::Hover => StateName::Hover,
            Gesture::Press => StateName::Tap,
        }
    }
}

/// A property track whose keyframe times are relative to `origin`.
#[derive(Clone, Debug)]
struct Track {
    origin: f64,
    anim: Animated<f32>,
}

impl Track {
    fn at_rest(value: f32) -> Self {
        Self {
            origin: 0.0,
            anim: Animated::new(value),
        }
    }

    fn sample(&mut self, time: f64) -> f32 {
        self.anim.update((time - self.origin).max(0.0));
        self.anim.current_value
    }

    fn end_time(&self) -> f64 {
        self.origin + self.anim.duration()
    }

    /// Replaces the track: hold the value sampled at `now` until `start`, then move to `target`.
    fn retarget(&mut self, now: f64, start: f64, target: f32, timing: &Timing) {
        let current = self.sample(now);
        let mut anim = Animated::new(current);
        anim.hold(start - now);
        match timing {
            Timing::Tween { duration, easing } => anim.add_keyframe(target, *duration, *easing),
            Timing::Spring(config) => anim.add_spring(target, *config),
        }
        self.origin = now;
        self.anim = anim;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionValues {
    pub node: NodeId,
    pub variant: &'static str,
    pub state: StateName,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<&'static str>,
}

impl MotionValues {
    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Width => self.width,
        }
    }
}

#[derive(Clone, Debug)]
struct NodeMotion {
    variant: &'static str,
    custom: Option<f32>,
    /// The state the node rests in when no gesture is active.
    base: StateName,
    hovered: bool,
    pressed: bool,
    box_shadow: Option<&'static str>,
    tracks: BTreeMap<Property, Track>,
}

impl NodeMotion {
    fn visible_state(&self) -> StateName {
        if self.pressed {
            StateName::Tap
        } else if self.hovered {
            StateName::Hover
        } else {
            self.base
        }
    }

    fn track(&mut self, property: Property) -> &mut Track {
        self.tracks
            .entry(property)
            .or_insert_with(|| Track::at_rest(property.resting()))
    }

    fn animate(&mut self, now: f64, start: f64, to: &TargetState, properties: &[Property]) {
        let transition = to.transition_or_default();
        for property in properties {
            let target = to.get(*property).unwrap_or_else(|| property.resting());
            self.track(*property)
                .retarget(now, start, target, &transition.timing);
        }
    }
}

/// `top` laid over `base`: set fields of `top` win, its transition always does.
fn overlay(base: &TargetState, top: &TargetState) -> TargetState {
    TargetState {
        opacity: top.opacity.or(base.opacity),
        x: top.x.or(base.x),
        y: top.y.or(base.y),
        scale: top.scale.or(base.scale),
        width: top.width.or(base.width),
        box_shadow: top.box_shadow.or(base.box_shadow),
        transition: top.transition,
    }
}

/// Properties a state sets.
fn touched(state: &TargetState) -> Vec<Property> {
    Property::ALL
        .iter()
        .copied()
        .filter(|p| state.get(*p).is_some())
        .collect()
}

#[derive(Debug, Default)]
pub struct MotionSystem {
    nodes: BTreeMap<NodeId, NodeMotion>,
}

impl MotionSystem {
    /// Places every bound node of `tree` in its variant's initial state.
    pub fn new(tree: &ViewNode, registry: &VariantRegistry) -> Result<Self> {
        let mut system = Self::default();
        system.bind_subtree(tree, 0, registry)?;
        Ok(system)
    }

    /// Binds the nodes of a subtree whose root has preorder id `offset`.
    pub fn bind_subtree(
        &mut self,
        subtree: &ViewNode,
        offset: NodeId,
        registry: &VariantRegistry,
    ) -> Result<()> {
        let mut failure = None;
        subtree.walk(&mut |id, _, node| {
            let Some(binding) = &node.motion else {
                return;
            };
            if failure.is_some() {
                return;
            }
            let variant = match registry.get(binding.variant) {
                Ok(v) => v,
                Err(err) => {
                    failure = Some(err);
                    return;
                }
            };
            let initial = variant.initial(binding.custom);
            let tracks = touched(&initial)
                .into_iter()
                .map(|p| (p, Track::at_rest(initial.get(p).unwrap_or_else(|| p.resting()))))
                .collect();
            self.nodes.insert(
                offset + id,
                NodeMotion {
                    variant: binding.variant,
                    custom: binding.custom,
                    base: variant.initial_state(),
                    hovered: false,
                    pressed: false,
                    box_shadow: initial.box_shadow,
                    tracks,
                },
            );
        });
        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Drops every node with an id of `from` or above.
    pub fn unbind_from(&mut self, from: NodeId) {
        self.nodes.split_off(&from);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn state_of(&self, node: NodeId) -> Option<StateName> {
        self.nodes.get(&node).map(NodeMotion::visible_state)
    }

    /// Starts every entry of a reveal schedule. `now` is the moment the group fired.
    pub fn apply(&mut self, schedule: &RevealSchedule, registry: &VariantRegistry, now: f64) {
        for entry in &schedule.entries {
            let Some(motion) = self.nodes.get_mut(&entry.node) else {
                continue;
            };
            let final_state = match registry.get(motion.variant) {
                Ok(variant) => variant.final_state(),
                Err(_) => continue,
            };
            let mut properties = touched(&entry.to);
            for p in touched(&entry.from) {
                if !properties.contains(&p) {
                    properties.push(p);
                }
            }
            motion.base = final_state;
            if entry.to.box_shadow.is_some() || entry.from.box_shadow.is_some() {
                motion.box_shadow = entry.to.box_shadow;
            }
            motion.animate(now, entry.start.max(now), &entry.to, &properties);
        }
        debug!(
            "Applied schedule with {} entries at {:.3}s",
            schedule.entries.len(),
            now
        );
    }

    /// Moves the given nodes back to their initial state.
    pub fn conceal(&mut self, nodes: &[NodeId], registry: &VariantRegistry, now: f64) {
        for node in nodes {
            let Some(motion) = self.nodes.get_mut(node) else {
                continue;
            };
            let Ok(variant) = registry.get(motion.variant) else {
                continue;
            };
            let to = variant.initial(motion.custom);
            let from = variant.revealed(motion.custom);
            let mut properties = touched(&from);
            for p in touched(&to) {
                if !properties.contains(&p) {
                    properties.push(p);
                }
            }
            motion.base = variant.initial_state();
            motion.box_shadow = to.box_shadow;
            motion.animate(now, now + to.delay(), &to, &properties);
        }
    }

    /// Turns a gesture on or off. Returns false when the node's variant has no state for it.
    pub fn set_gesture(
        &mut self,
        node: NodeId,
        gesture: Gesture,
        active: bool,
        registry: &VariantRegistry,
        now: f64,
    ) -> Result<bool> {
        let motion = self
            .nodes
            .get_mut(&node)
            .ok_or(FolioError::UnknownNode(node))?;
        let variant = registry.get(motion.variant)?;
        if !variant.has_state(gesture.state()) {
            return Ok(false);
        }

        let custom = motion.custom;
        let base = motion.base;
        let effective = |hovered: bool, pressed: bool| {
            let resolve = |state| variant.resolve(state, custom).unwrap_or_default();
            let mut state = resolve(base);
            if hovered {
                state = overlay(&state, &resolve(StateName::Hover));
            }
            if pressed {
                state = overlay(&state, &resolve(StateName::Tap));
            }
            state
        };

        let previous = motion.visible_state();
        let leaving = effective(motion.hovered, motion.pressed);
        match gesture {
            Gesture::Hover => motion.hovered = active,
            Gesture::Press => motion.pressed = active,
        }
        let next = motion.visible_state();
        if next == previous {
            return Ok(true);
        }
        let mut target = effective(motion.hovered, motion.pressed);

        let mut properties = touched(&target);
        for p in touched(&leaving) {
            if !properties.contains(&p) {
                properties.push(p);
            }
        }

        // Releasing a gesture runs on the released state's timing.
        let timing = if active {
            target.transition_or_default()
        } else {
            leaving.transition_or_default()
        };
        target.transition = Some(Transition {
            delay: 0.0,
            orchestration: None,
            ..timing
        });
        motion.box_shadow = target.box_shadow;
        motion.animate(now, now, &target, &properties);
        debug!("Node {} {} -> {}", node, previous, next);
        Ok(true)
    }

    /// Samples every node at `time`.
    pub fn sample(&mut self, time: f64) -> Vec<MotionValues> {
        self.nodes
            .iter_mut()
            .map(|(id, motion)| {
                let state = motion.visible_state();
                let variant = motion.variant;
                let box_shadow = motion.box_shadow;
                let tracks = &mut motion.tracks;
                let mut value = |p: Property| match tracks.get_mut(&p) {
                    Some(track) => track.sample(time),
                    None => p.resting(),
                };
                MotionValues {
                    node: *id,
                    variant,
                    state,
                    opacity: value(Property::Opacity),
                    x: value(Property::X),
                    y: value(Property::Y),
                    scale: value(Property::Scale),
                    width: value(Property::Width),
                    box_shadow,
                }
            })
            .collect()
    }

    /// Time at which the last running track comes to rest.
    pub fn settled_at(&self) -> f64 {
        self.nodes
            .values()
            .flat_map(|m| m.tracks.values())
            .map(Track::end_time)
            .fold(0.0, f64::max)
    }
}
