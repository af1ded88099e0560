use chrono::Datelike;

use crate::content::{FOOTER_TAGLINE, OWNER, SOCIAL_LINKS};
use crate::node::{Action, MotionBinding, ViewNode};
use crate::variants::names;

pub const BACK_TO_TOP: &str = "Back to Top";

/// Each footer block reveals on its own as soon as any part of it is visible.
fn block(index: u32) -> MotionBinding {
    MotionBinding::variant(names::FADE_IN_UP).index(index).in_view(0.0)
}

pub fn build() -> ViewNode {
    let year = chrono::Local::now().year();

    let brand = ViewNode::container()
        .animate(block(0))
        .child(ViewNode::heading(2, "Kuldeep"))
        .child(ViewNode::paragraph(FOOTER_TAGLINE));

    let socials = ViewNode::row().animate(block(1)).children(SOCIAL_LINKS.iter().map(|s| {
        let link = ViewNode::link(s.title, s.link.unwrap_or("#")).with_icon(s.icon);
        if link_is_external(s.link) {
            link.new_tab()
        } else {
            link
        }
    }));

    let legal = ViewNode::row()
        .animate(block(2))
        .child(ViewNode::paragraph(format!(
            "© {} {}. All rights reserved.",
            year, OWNER
        )))
        .child(
            ViewNode::button(BACK_TO_TOP, Action::ScrollToTop)
                .with_icon("arrow-up")
                .animate(MotionBinding::variant(names::LIFT)),
        );

    super::section(super::FOOTER)
        .child(ViewNode::row().child(brand).child(socials))
        .child(legal)
}

fn link_is_external(link: Option<&str>) -> bool {
    link.is_some_and(|l| l.starts_with("http"))
}
