//! # Presentational Tree
//!
//! The page is a tree of `ViewNode`s. A node optionally carries a `MotionBinding` that
//! names the variant driving it and, for the root of a reveal group, the trigger.
//!
//! Node ids are preorder indices, assigned when the page is mounted.

use serde::Serialize;

use crate::visibility::Trigger;

/// A preorder index into the page tree.
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    ScrollToTop,
    ToggleMenu,
    CloseMenu,
    SubmitForm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    Email,
    TextArea { rows: u8 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    Page,
    ProgressBar,
    Section {
        id: &'static str,
    },
    Container,
    Row,
    /// Wrapping run of inline children, e.g. text segments.
    Inline,
    List,
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Badge {
        text: String,
    },
    Label {
        text: String,
        value: Option<String>,
    },
    Link {
        label: String,
        href: String,
        external: bool,
        icon: Option<&'static str>,
    },
    Button {
        label: String,
        icon: Option<&'static str>,
        action: Action,
    },
    Icon {
        name: &'static str,
    },
    Avatar {
        initials: String,
    },
    SkillBar {
        level: f32,
    },
    /// One unit of a segmented text reveal.
    Segment {
        text: String,
        gap_after: bool,
        break_after: bool,
    },
    Typewriter {
        strings: Vec<String>,
        type_delay_ms: u64,
        delete_delay_ms: u64,
        looping: bool,
    },
    Form,
    Field {
        name: &'static str,
        label: &'static str,
        input: InputKind,
        required: bool,
    },
}

/// Binds a node to a variant.
///
/// A binding with a trigger starts a reveal group; one without a trigger joins the
/// group of its nearest triggered ancestor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionBinding {
    pub variant: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
}

impl MotionBinding {
    pub fn variant(variant: &'static str) -> Self {
        Self {
            variant,
            custom: None,
            trigger: None,
        }
    }

    pub fn custom(mut self, value: impl Into<f32>) -> Self {
        self.custom = Some(value.into());
        self
    }

    pub fn index(self, ordinal: u32) -> Self {
        self.custom(ordinal as f32)
    }

    pub fn on_mount(mut self) -> Self {
        self.trigger = Some(Trigger::Mount);
        self
    }

    pub fn in_view(mut self, amount: f32) -> Self {
        self.trigger = Some(Trigger::in_view_once(amount));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionBinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            motion: None,
            children: Vec::new(),
        }
    }

    pub fn container() -> Self {
        Self::new(NodeKind::Container)
    }

    pub fn row() -> Self {
        Self::new(NodeKind::Row)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Heading {
            level,
            text: text.into(),
        })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph { text: text.into() })
    }

    pub fn badge(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Badge { text: text.into() })
    }

    pub fn icon(name: &'static str) -> Self {
        Self::new(NodeKind::Icon { name })
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        let external = href.starts_with("http");
        Self::new(NodeKind::Link {
            label: label.into(),
            href,
            external,
            icon: None,
        })
    }

    pub fn button(label: impl Into<String>, action: Action) -> Self {
        Self::new(NodeKind::Button {
            label: label.into(),
            icon: None,
            action,
        })
    }

    /// Sets the leading icon of a link or button; other kinds are left as they are.
    pub fn with_icon(mut self, name: &'static str) -> Self {
        match &mut self.kind {
            NodeKind::Link { icon, .. } | NodeKind::Button { icon, .. } => *icon = Some(name),
            _ => {}
        }
        self
    }

    /// Marks a link as opening in a new browsing context.
    pub fn new_tab(mut self) -> Self {
        if let NodeKind::Link { external, .. } = &mut self.kind {
            *external = true;
        }
        self
    }

    pub fn animate(mut self, binding: MotionBinding) -> Self {
        self.motion = Some(binding);
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ViewNode::node_count).sum::<usize>()
    }

    /// Visits the subtree in preorder with each node's id and parent id.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(NodeId, Option<NodeId>, &'a ViewNode)) {
        let mut next = 0;
        self.walk_from(&mut next, None, visit);
    }

    fn walk_from<'a>(
        &'a self,
        next: &mut NodeId,
        parent: Option<NodeId>,
        visit: &mut impl FnMut(NodeId, Option<NodeId>, &'a ViewNode),
    ) {
        let id = *next;
        *next += 1;
        visit(id, parent, self);
        for child in &self.children {
            child.walk_from(next, Some(id), visit);
        }
    }

    /// Returns the node with the given preorder id.
    pub fn get(&self, id: NodeId) -> Option<&ViewNode> {
        let mut found = None;
        self.walk(&mut |node_id, _, node| {
            if node_id == id {
                found = Some(node);
            }
        });
        found
    }

    /// Finds the id of a `Section` node by its anchor.
    pub fn find_section(&self, anchor: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(&mut |id, _, node| {
            if let NodeKind::Section { id: section } = &node.kind {
                if *section == anchor && found.is_none() {
                    found = Some(id);
                }
            }
        });
        found
    }

    /// Concatenated visible text of the subtree, one entry per text-bearing node.
    pub fn text_content(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.walk(&mut |_, _, node| match &node.kind {
            NodeKind::Heading { text, .. }
            | NodeKind::Paragraph { text }
            | NodeKind::Badge { text }
            | NodeKind::Segment { text, .. } => out.push(text.clone()),
            NodeKind::Label { text, value } => {
                out.push(text.clone());
                if let Some(value) = value {
                    out.push(value.clone());
                }
            }
            NodeKind::Link { label, .. } | NodeKind::Button { label, .. } => {
                out.push(label.clone())
            }
            _ => {}
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ViewNode {
        ViewNode::new(NodeKind::Page)
            .child(
                ViewNode::new(NodeKind::Section { id: "a" })
                    .child(ViewNode::heading(2, "A"))
                    .child(ViewNode::paragraph("text")),
            )
            .child(ViewNode::new(NodeKind::Section { id: "b" }))
    }

    #[test]
    fn preorder_ids() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.walk(&mut |id, parent, _| seen.push((id, parent)));
        assert_eq!(
            seen,
            vec![(0, None), (1, Some(0)), (2, Some(1)), (3, Some(1)), (4, Some(0))]
        );
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn finds_sections_by_anchor() {
        let tree = sample();
        assert_eq!(tree.find_section("b"), Some(4));
        assert_eq!(tree.find_section("missing"), None);
        assert_eq!(tree.get(2).map(|n| n.text_content()), Some(vec!["A".to_string()]));
    }

    #[test]
    fn external_links_are_detected() {
        let ViewNode { kind, .. } = ViewNode::link("GitHub", "https://github.com/");
        assert!(matches!(kind, NodeKind::Link { external: true, .. }));
        let ViewNode { kind, .. } = ViewNode::link("Mail", "mailto:someone@example.com");
        assert!(matches!(kind, NodeKind::Link { external: false, .. }));
    }
}
