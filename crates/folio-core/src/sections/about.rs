use crate::content::{ABOUT_BODY, ABOUT_LEAD, EDUCATION, MISSION};
use crate::node::{NodeKind, ViewNode};
use crate::stagger::OrdinalCounter;
use crate::text::{SegmentMode, SegmentedReveal};

fn education() -> ViewNode {
    ViewNode::new(NodeKind::List).children(EDUCATION.iter().map(|row| {
        ViewNode::new(NodeKind::Label {
            text: row.degree.to_string(),
            value: Some(row.score.to_string()),
        })
    }))
}

pub fn build() -> ViewNode {
    let mut ordinals = OrdinalCounter::new();
    let header = super::header("About Me", "Get to know me", &mut ordinals);

    let story = ViewNode::container()
        .animate(super::fade_in_up(&mut ordinals))
        .child(SegmentedReveal::new(ABOUT_LEAD, SegmentMode::Word).view())
        .children(ABOUT_BODY.iter().map(|p| ViewNode::paragraph(*p)));

    let mission = ViewNode::container()
        .animate(super::fade_in_up(&mut ordinals))
        .child(ViewNode::heading(3, "My Mission"))
        .child(ViewNode::paragraph(MISSION))
        .child(ViewNode::heading(4, "Education"))
        .child(education());

    super::section(super::ABOUT).child(
        super::reveal_container(0.3)
            .child(header)
            .child(ViewNode::row().child(story).child(mission)),
    )
}
