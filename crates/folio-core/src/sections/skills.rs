//! Skill cards with proficiency bars.
//!
//! Cards join the section cascade and lift on hover; each bar fills on its own once it
//! is 30% in view.

use crate::content::{Skill, SKILL_CATEGORIES};
use crate::node::{MotionBinding, NodeKind, ViewNode};
use crate::stagger::OrdinalCounter;
use crate::variants::names;

pub const BAR_VISIBILITY: f32 = 0.3;

fn skill_card(skill: &Skill, ordinals: &mut OrdinalCounter) -> ViewNode {
    ViewNode::container()
        .animate(MotionBinding::variant(names::SKILL_CARD).index(ordinals.next()))
        .child(
            ViewNode::row()
                .child(ViewNode::icon(skill.icon))
                .child(ViewNode::heading(3, skill.name)),
        )
        .child(
            ViewNode::new(NodeKind::SkillBar { level: skill.level }).animate(
                MotionBinding::variant(names::SKILL_BAR)
                    .custom(skill.level)
                    .in_view(BAR_VISIBILITY),
            ),
        )
}

pub fn build() -> ViewNode {
    let mut ordinals = OrdinalCounter::new();
    let mut content = super::reveal_container(0.1).child(super::header(
        "My Skills",
        "Technical Expertise",
        &mut ordinals,
    ));

    for category in SKILL_CATEGORIES {
        let title = ViewNode::heading(3, category.title).animate(super::fade_in_up(&mut ordinals));
        let cards = ViewNode::row()
            .children(category.skills.iter().map(|skill| skill_card(skill, &mut ordinals)));
        content = content.child(ViewNode::container().child(title).child(cards));
    }

    super::section(super::SKILLS).child(content)
}
