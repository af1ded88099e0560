//! Fixed header: brand, desktop links, and the mobile menu toggle.

use serde::Serialize;

use crate::content::NAV_LINKS;
use crate::node::{Action, MotionBinding, NodeKind, ViewNode};
use crate::variants::names;

pub const CTA_LABEL: &str = "Let's Talk";
pub const CTA_HREF: &str = "#contact";

/// Scroll and menu state of the header.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarState {
    threshold: f32,
    is_scrolled: bool,
    menu_open: bool,
}

impl NavbarState {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            is_scrolled: false,
            menu_open: false,
        }
    }

    /// Returns true when the scrolled flag changed.
    pub fn on_scroll(&mut self, scroll_y: f32) -> bool {
        let scrolled = scroll_y > self.threshold;
        let changed = scrolled != self.is_scrolled;
        self.is_scrolled = scrolled;
        changed
    }

    pub fn is_scrolled(&self) -> bool {
        self.is_scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

impl Default for NavbarState {
    fn default() -> Self {
        Self::new(50.0)
    }
}

fn nav_items() -> impl Iterator<Item = ViewNode> {
    NAV_LINKS
        .iter()
        .map(|link| ViewNode::link(link.name, link.href))
        .chain(std::iter::once(ViewNode::link(CTA_LABEL, CTA_HREF)))
        .enumerate()
        .map(|(i, link)| link.animate(MotionBinding::variant(names::NAV_ITEM).index(i as u32)))
}

pub fn build() -> ViewNode {
    super::section(super::NAVBAR)
        .animate(MotionBinding::variant(names::NAVBAR).on_mount())
        .child(
            ViewNode::container()
                .animate(MotionBinding::variant(names::NAV_BRAND))
                .child(ViewNode::link("Kuldeep", "#home")),
        )
        .child(
            ViewNode::new(NodeKind::List)
                .animate(MotionBinding::variant(names::FADE_IN))
                .children(nav_items()),
        )
        .child(
            ViewNode::button("Toggle menu", Action::ToggleMenu)
                .with_icon("menu")
                .animate(MotionBinding::variant(names::FADE_IN)),
        )
}

/// The mobile menu. Only part of the page while it is open; its links come first and
/// the close button last.
pub fn mobile_menu() -> ViewNode {
    ViewNode::new(NodeKind::List)
        .animate(MotionBinding::variant(names::MENU_LIST).on_mount())
        .children(nav_items())
        .child(ViewNode::button("Close menu", Action::CloseMenu).with_icon("x"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_past_threshold() {
        let mut state = NavbarState::default();
        assert!(!state.on_scroll(50.0));
        assert!(!state.is_scrolled());
        assert!(state.on_scroll(51.0));
        assert!(state.is_scrolled());
        assert!(!state.on_scroll(400.0));
        assert!(state.on_scroll(0.0));
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut state = NavbarState::default();
        assert!(state.toggle_menu());
        assert!(!state.toggle_menu());
        state.toggle_menu();
        state.close_menu();
        assert!(!state.is_menu_open());
    }

    #[test]
    fn call_to_action_takes_the_last_ordinal() {
        let menu = mobile_menu();
        let links: Vec<_> = menu
            .children
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Link { .. }))
            .collect();
        assert_eq!(links.len(), NAV_LINKS.len() + 1);
        let last = links.last().and_then(|n| n.motion.as_ref());
        assert_eq!(last.and_then(|m| m.custom), Some(NAV_LINKS.len() as f32));
        assert!(matches!(
            menu.children.last().map(|n| &n.kind),
            Some(NodeKind::Button {
                action: Action::CloseMenu,
                ..
            })
        ));
    }
}
