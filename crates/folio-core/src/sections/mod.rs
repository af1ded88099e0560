//! # Sections
//!
//! Builders for the page sections. Each returns a `ViewNode` subtree rooted at a
//! `Section` node whose anchor matches the navigation links.
//!
//! Inside a section, animated items draw their ordinals from one `OrdinalCounter`, so the
//! cascade runs top to bottom across the whole section.

pub mod about;
pub mod contact;
pub mod experience;
pub mod footer;
pub mod hero;
pub mod navbar;
pub mod skills;

pub use navbar::NavbarState;

use crate::node::{MotionBinding, NodeKind, ViewNode};
use crate::stagger::OrdinalCounter;
use crate::variants::names;

pub const NAVBAR: &str = "navbar";
pub const HOME: &str = "home";
pub const ABOUT: &str = "about";
pub const SKILLS: &str = "skills";
pub const EXPERIENCE: &str = "experience";
pub const CONTACT: &str = "contact";
pub const FOOTER: &str = "footer";

/// Section anchors in page order.
pub const ORDER: [&str; 7] = [NAVBAR, HOME, ABOUT, SKILLS, EXPERIENCE, CONTACT, FOOTER];

pub(crate) fn section(id: &'static str) -> ViewNode {
    ViewNode::new(NodeKind::Section { id })
}

/// The staggered content wrapper of an in-view section.
pub(crate) fn reveal_container(amount: f32) -> ViewNode {
    ViewNode::container().animate(MotionBinding::variant(names::CONTAINER).in_view(amount))
}

/// Badge plus title, the first item of every content section.
pub(crate) fn header(badge: &str, title: &str, ordinals: &mut OrdinalCounter) -> ViewNode {
    ViewNode::container()
        .animate(MotionBinding::variant(names::FADE_IN_UP).index(ordinals.next()))
        .child(ViewNode::badge(badge))
        .child(ViewNode::heading(2, title))
}

pub(crate) fn fade_in_up(ordinals: &mut OrdinalCounter) -> MotionBinding {
    MotionBinding::variant(names::FADE_IN_UP).index(ordinals.next())
}
