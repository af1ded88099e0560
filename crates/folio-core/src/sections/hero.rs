//! Full-height introduction. Everything here plays on mount.

use std::time::Duration;

use crate::config::TypewriterConfig;
use crate::content::{INITIALS, OWNER, TAGLINE};
use crate::node::{MotionBinding, NodeKind, ViewNode};
use crate::text::Typewriter;
use crate::variants::names;

fn hero_text(index: u32) -> MotionBinding {
    MotionBinding::variant(names::HERO_TEXT).index(index).on_mount()
}

fn call_to_action(label: &str, href: &str, icon: &'static str) -> ViewNode {
    ViewNode::link(label, href)
        .with_icon(icon)
        .animate(MotionBinding::variant(names::BUTTON).on_mount())
}

pub fn typewriter(config: &TypewriterConfig) -> Typewriter {
    Typewriter::new(&config.strings)
        .with_delays(
            Duration::from_millis(config.type_delay_ms),
            Duration::from_millis(config.delete_delay_ms),
        )
        .with_pause(Duration::from_millis(config.pause_ms))
        .looping(config.looping)
}

pub fn build(config: &TypewriterConfig) -> ViewNode {
    let intro = ViewNode::container()
        .child(
            ViewNode::container()
                .animate(hero_text(0))
                .child(ViewNode::badge(TAGLINE)),
        )
        .child(ViewNode::heading(1, format!("Hi, I'm {}", OWNER)).animate(hero_text(1)))
        .child(
            ViewNode::container()
                .animate(hero_text(2))
                .child(typewriter(config).view()),
        )
        .child(
            ViewNode::row()
                .animate(hero_text(3))
                .child(call_to_action("Download Resume", "#", "download"))
                .child(call_to_action("Contact Me", "#contact", "send")),
        );

    let avatar = ViewNode::new(NodeKind::Avatar {
        initials: INITIALS.to_string(),
    })
    .animate(MotionBinding::variant(names::AVATAR).on_mount());

    super::section(super::HOME)
        .child(ViewNode::container().animate(MotionBinding::variant(names::BACKDROP).on_mount()))
        .child(ViewNode::row().child(intro).child(avatar))
        .child(
            ViewNode::container()
                .animate(MotionBinding::variant(names::SCROLL_HINT).on_mount())
                .child(ViewNode::paragraph("Scroll Down"))
                .child(ViewNode::icon("chevron-down")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::visibility::Trigger;

    #[test]
    fn hero_plays_on_mount_only() {
        let hero = build(&SiteConfig::default().typewriter);
        let mut hero_text = Vec::new();
        hero.walk(&mut |_, _, node| {
            if let Some(binding) = &node.motion {
                assert!(!matches!(binding.trigger, Some(Trigger::InView { .. })));
                if binding.variant == names::HERO_TEXT {
                    hero_text.push(binding.custom);
                }
            }
        });
        assert_eq!(hero_text, vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0)]);
    }
}
