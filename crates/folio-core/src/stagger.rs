//! # Staggered Reveal Sequencing
//!
//! Orders the moment each member of a reveal group starts moving, so a section cascades
//! into view instead of appearing all at once.
//!
//! ## Responsibilities
//! - **Policy**: `StaggerPolicy` holds `stagger_children` / `delay_children` and whether the
//!   parent finishes before its children start.
//! - **Ordinals**: `OrdinalCounter` hands out running indices inside a section.
//! - **Scheduling**: `RevealGroup::schedule` resolves every member's variant and computes
//!   absolute start times and durations.
//!
//! ## Key Types
//! - `RevealGroup`: A triggered root plus the bound descendants that follow it.
//! - `RevealSchedule`: The resolved start/duration of each member.

use serde::Serialize;
use tracing::debug;

use crate::animation::spring_settle_time;
use crate::errors::VariantError;
use crate::node::NodeId;
use crate::variants::{Property, TargetState, Timing, VariantRegistry};
use crate::visibility::Trigger;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum When {
    /// The parent completes its own transition before children begin.
    BeforeChildren,
    /// Children begin together with the parent.
    WithChildren,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaggerPolicy {
    pub stagger_children: f64,
    pub delay_children: f64,
    pub when: When,
}

impl Default for StaggerPolicy {
    fn default() -> Self {
        Self {
            stagger_children: 0.0,
            delay_children: 0.0,
            when: When::WithChildren,
        }
    }
}

impl StaggerPolicy {
    pub fn new(stagger_children: f64, delay_children: f64) -> Self {
        Self {
            stagger_children,
            delay_children,
            when: When::BeforeChildren,
        }
    }

    pub fn when(mut self, when: When) -> Self {
        self.when = when;
        self
    }

    /// Start delay of the child at `index`, relative to the children's base time.
    pub fn child_delay(&self, index: usize) -> f64 {
        self.delay_children + index as f64 * self.stagger_children
    }

    /// Time from the base until the last of `count` children has finished.
    pub fn total_duration(&self, count: usize, item_duration: f64) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.child_delay(count - 1) + item_duration
    }
}

/// Running ordinal source for the items of one section.
#[derive(Clone, Debug, Default)]
pub struct OrdinalCounter {
    next: u32,
}

impl OrdinalCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn next(&mut self) -> u32 {
        let ordinal = self.next;
        self.next += 1;
        ordinal
    }

    pub fn peek(&self) -> u32 {
        self.next
    }
}

/// Time needed to move every property from `from` to `to` with `to`'s transition.
pub fn transition_duration(from: &TargetState, to: &TargetState) -> f64 {
    let transition = to.transition_or_default();
    match transition.timing {
        Timing::Tween { duration, .. } => duration,
        Timing::Spring(config) => Property::ALL
            .iter()
            .filter_map(|p| {
                let end = to.get(*p)?;
                let start = from.get(*p).unwrap_or_else(|| p.resting());
                Some(spring_settle_time(start, end, config))
            })
            .fold(0.0, f64::max),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealMember {
    pub node: NodeId,
    pub variant: &'static str,
    pub custom: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealGroup {
    pub trigger: Trigger,
    pub root: RevealMember,
    /// Bound descendants without their own trigger, in preorder.
    pub children: Vec<RevealMember>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Root,
    Child { position: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReveal {
    pub node: NodeId,
    pub role: Role,
    /// Absolute start time, in seconds.
    pub start: f64,
    pub duration: f64,
    pub from: TargetState,
    pub to: TargetState,
}

impl ScheduledReveal {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealSchedule {
    pub fired_at: f64,
    pub entries: Vec<ScheduledReveal>,
}

impl RevealSchedule {
    /// Time from firing until the last member comes to rest.
    pub fn total_duration(&self) -> f64 {
        self.entries
            .iter()
            .map(ScheduledReveal::end)
            .fold(self.fired_at, f64::max)
            - self.fired_at
    }

    pub fn children(&self) -> impl Iterator<Item = &ScheduledReveal> {
        self.entries
            .iter()
            .filter(|e| matches!(e.role, Role::Child { .. }))
    }
}

impl RevealGroup {
    pub fn new(trigger: Trigger, root: RevealMember) -> Self {
        Self {
            trigger,
            root,
            children: Vec::new(),
        }
    }

    pub fn member_count(&self) -> usize {
        1 + self.children.len()
    }

    /// Resolves the group against `registry` as if it fired at `fired_at`.
    ///
    /// A child whose revealed state carries its own delay, or is parametrized and was given
    /// an ordinal, starts at `delay_children` plus that delay; every other child is placed
    /// by its position in the group.
    pub fn schedule(
        &self,
        registry: &VariantRegistry,
        fired_at: f64,
    ) -> Result<RevealSchedule, VariantError> {
        let root_variant = registry.get(self.root.variant)?;
        let root_from = root_variant.initial(self.root.custom);
        let root_to = root_variant.revealed(self.root.custom);
        let root_transition = root_to.transition_or_default();
        let root_start = fired_at + root_transition.delay;
        let root_duration = transition_duration(&root_from, &root_to);
        let policy = root_transition.orchestration.unwrap_or_default();

        let base = match policy.when {
            When::BeforeChildren => root_start + root_duration,
            When::WithChildren => root_start,
        };

        let mut entries = Vec::with_capacity(self.member_count());
        entries.push(ScheduledReveal {
            node: self.root.node,
            role: Role::Root,
            start: root_start,
            duration: root_duration,
            from: root_from,
            to: root_to,
        });

        for (position, member) in self.children.iter().enumerate() {
            let variant = registry.get(member.variant)?;
            let from = variant.initial(member.custom);
            let to = variant.revealed(member.custom);

            let indexed =
                member.custom.is_some() && variant.is_parametrized(variant.final_state());
            let offset = if indexed || to.delay() > 0.0 {
                policy.delay_children + to.delay()
            } else {
                policy.child_delay(position) + to.delay()
            };

            let duration = transition_duration(&from, &to);
            entries.push(ScheduledReveal {
                node: member.node,
                role: Role::Child { position },
                start: base + offset,
                duration,
                from,
                to,
            });
        }

        debug!(
            "Scheduled group at node {} ({} members) fired at {:.3}s",
            self.root.node,
            entries.len(),
            fired_at
        );

        Ok(RevealSchedule { fired_at, entries })
    }
}
