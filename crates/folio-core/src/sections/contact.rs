//! Contact channels and the message form.

use crate::content::{ContactChannel, CONTACT_CHANNELS};
use crate::form::SUBMIT_LABEL;
use crate::node::{Action, InputKind, MotionBinding, NodeKind, ViewNode};
use crate::stagger::OrdinalCounter;
use crate::variants::names;

/// A channel card. Channels with a link open in a new tab; the rest point nowhere.
fn channel(channel: &ContactChannel, ordinals: &mut OrdinalCounter) -> ViewNode {
    let card = match channel.link {
        Some(href) => ViewNode::link(channel.title, href).new_tab(),
        None => ViewNode::link(channel.title, "#"),
    };
    card.with_icon(channel.icon)
        .animate(super::fade_in_up(ordinals))
        .child(ViewNode::paragraph(channel.value))
}

fn field(name: &'static str, label: &'static str, input: InputKind) -> ViewNode {
    ViewNode::new(NodeKind::Field {
        name,
        label,
        input,
        required: true,
    })
}

pub fn form() -> ViewNode {
    ViewNode::new(NodeKind::Form)
        .child(field("name", "Your Name", InputKind::Text))
        .child(field("email", "Your Email", InputKind::Email))
        .child(field("message", "Your Message", InputKind::TextArea { rows: 5 }))
        .child(
            ViewNode::button(SUBMIT_LABEL, Action::SubmitForm)
                .with_icon("send")
                .animate(MotionBinding::variant(names::BUTTON)),
        )
}

pub fn build() -> ViewNode {
    let mut ordinals = OrdinalCounter::new();
    let header = super::header("Get In Touch", "Contact Me", &mut ordinals);

    let channels = ViewNode::new(NodeKind::List).children(
        CONTACT_CHANNELS
            .iter()
            .map(|c| channel(c, &mut ordinals))
            .collect::<Vec<_>>(),
    );

    let message = ViewNode::container()
        .animate(super::fade_in_up(&mut ordinals))
        .child(ViewNode::heading(3, "Send Me a Message"))
        .child(form());

    super::section(super::CONTACT).child(
        super::reveal_container(0.1)
            .child(header)
            .child(ViewNode::row().child(channels).child(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_linked_channels_open_a_new_tab() {
        let mut ordinals = OrdinalCounter::new();
        let external: Vec<bool> = CONTACT_CHANNELS
            .iter()
            .map(|c| match channel(c, &mut ordinals).kind {
                NodeKind::Link { external, .. } => external,
                _ => false,
            })
            .collect();
        assert_eq!(external, vec![true, true, true, true, false]);
        assert_eq!(ordinals.peek(), 5);
    }

    #[test]
    fn form_has_three_required_fields() {
        let form = form();
        let required = form
            .children
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Field { required: true, .. }))
            .count();
        assert_eq!(required, 3);
    }
}
