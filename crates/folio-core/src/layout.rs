//! # Layout
//!
//! Lays the page tree out with `taffy` so the viewport observer knows where every
//! element sits in the document.
//!
//! ## Responsibilities
//! - **Styles**: maps each `NodeKind` to a flexbox style (columns, wrapping rows, fixed boxes).
//! - **Measurement**: text leaves are measured from their character count and font size.
//! - **Bounds**: resolves taffy's parent-relative locations into absolute document bounds.

use serde::Serialize;
use taffy::prelude::*;
use taffy::NodeId as LayoutId;
use tracing::debug;

use crate::errors::Result;
use crate::node::{InputKind, NodeId, NodeKind, ViewNode};

/// Absolute rectangle of an element in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;
const LINE_HEIGHT: f32 = 1.5;

/// Leaf measurement input.
#[derive(Clone, Copy, Debug)]
enum Measure {
    Text {
        chars: usize,
        font_size: f32,
        trailing: f32,
    },
    Fixed {
        width: f32,
        height: f32,
    },
}

impl Measure {
    fn measure(&self, known: Size<Option<f32>>, available: Size<AvailableSpace>) -> Size<f32> {
        match *self {
            Measure::Fixed { width, height } => Size {
                width: known.width.unwrap_or(width),
                height: known.height.unwrap_or(height),
            },
            Measure::Text {
                chars,
                font_size,
                trailing,
            } => {
                let glyph = font_size * GLYPH_WIDTH;
                let full = chars as f32 * glyph + trailing;
                let limit = known.width.unwrap_or(match available.width {
                    AvailableSpace::Definite(w) => w,
                    AvailableSpace::MinContent => glyph * 12.0,
                    AvailableSpace::MaxContent => full,
                });
                let width = full.min(limit.max(glyph));
                let lines = if width > 0.0 { (full / width).ceil().max(1.0) } else { 1.0 };
                Size {
                    width: known.width.unwrap_or(width),
                    height: known.height.unwrap_or(lines * font_size * LINE_HEIGHT),
                }
            }
        }
    }
}

fn text(text: &str, font_size: f32) -> Measure {
    Measure::Text {
        chars: text.chars().count(),
        font_size,
        trailing: 0.0,
    }
}

fn base_style() -> Style {
    Style::default()
}

fn column(gap: f32) -> Style {
    let mut style = base_style();
    style.display = Display::Flex;
    style.flex_direction = FlexDirection::Column;
    style.gap = Size {
        width: LengthPercentage::length(gap),
        height: LengthPercentage::length(gap),
    };
    style
}

fn row(gap: f32) -> Style {
    let mut style = column(gap);
    style.flex_direction = FlexDirection::Row;
    style.flex_wrap = FlexWrap::Wrap;
    style
}

fn breaks_line(node: &ViewNode) -> bool {
    matches!(
        node.kind,
        NodeKind::Segment {
            break_after: true,
            ..
        }
    )
}

fn padded(mut style: Style, vertical: f32, horizontal: f32) -> Style {
    style.padding = taffy::geometry::Rect {
        left: LengthPercentage::length(horizontal),
        right: LengthPercentage::length(horizontal),
        top: LengthPercentage::length(vertical),
        bottom: LengthPercentage::length(vertical),
    };
    style
}

/// Style and optional measurement for one node.
fn style_for(node: &ViewNode, viewport: Size<f32>) -> (Style, Option<Measure>) {
    match &node.kind {
        NodeKind::Page => {
            let mut style = column(0.0);
            style.size.width = Dimension::length(viewport.width);
            (style, None)
        }
        NodeKind::ProgressBar => {
            let mut style = base_style();
            style.position = Position::Absolute;
            style.size = Size {
                width: Dimension::percent(1.0),
                height: Dimension::length(4.0),
            };
            (style, None)
        }
        NodeKind::Section { id } => {
            let mut style = padded(column(48.0), 96.0, 24.0);
            match *id {
                "navbar" => {
                    style = padded(row(24.0), 24.0, 24.0);
                    style.position = Position::Absolute;
                    style.size.width = Dimension::percent(1.0);
                }
                "home" => style.min_size.height = Dimension::length(viewport.height),
                _ => {}
            }
            (style, None)
        }
        NodeKind::Container | NodeKind::List | NodeKind::Form => (column(16.0), None),
        NodeKind::Row => (row(16.0), None),
        // Line-mode segments each end their line.
        NodeKind::Inline if node.children.iter().any(breaks_line) => (column(0.0), None),
        NodeKind::Inline => (row(0.0), None),
        NodeKind::Heading { level, text: t } => {
            let size = match *level {
                1 => 56.0,
                2 => 40.0,
                3 => 24.0,
                _ => 18.0,
            };
            (base_style(), Some(text(t, size)))
        }
        NodeKind::Paragraph { text: t } => (base_style(), Some(text(t, 18.0))),
        NodeKind::Badge { text: t } => (padded(base_style(), 4.0, 12.0), Some(text(t, 14.0))),
        NodeKind::Label { text: t, value } => {
            let joined = match value {
                Some(v) => format!("{} {}", t, v),
                None => t.clone(),
            };
            (base_style(), Some(text(&joined, 16.0)))
        }
        NodeKind::Link { label, .. } | NodeKind::Button { label, .. } => {
            (padded(base_style(), 12.0, 24.0), Some(text(label, 16.0)))
        }
        NodeKind::Segment {
            text: t, gap_after, ..
        } => {
            let size = 20.0;
            let trailing = if *gap_after { size * 0.25 } else { 0.0 };
            let measure = Measure::Text {
                chars: t.chars().count(),
                font_size: size,
                trailing,
            };
            (base_style(), Some(measure))
        }
        NodeKind::Icon { .. } => (base_style(), Some(Measure::Fixed { width: 20.0, height: 20.0 })),
        NodeKind::Avatar { .. } => (
            base_style(),
            Some(Measure::Fixed {
                width: 320.0,
                height: 320.0,
            }),
        ),
        NodeKind::SkillBar { .. } => {
            let mut style = base_style();
            style.size = Size {
                width: Dimension::percent(1.0),
                height: Dimension::length(8.0),
            };
            (style, None)
        }
        NodeKind::Typewriter { .. } => {
            let mut style = base_style();
            style.size.height = Dimension::length(48.0);
            (style, None)
        }
        NodeKind::Field { input, .. } => {
            let control = match input {
                InputKind::TextArea { rows } => *rows as f32 * 24.0 + 24.0,
                InputKind::Text | InputKind::Email => 48.0,
            };
            let mut style = base_style();
            style.size = Size {
                width: Dimension::percent(1.0),
                height: Dimension::length(control + 28.0),
            };
            (style, None)
        }
    }
}

/// Absolute bounds of every node, indexed by preorder id.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    bounds: Vec<Bounds>,
    document_height: f32,
}

impl PageLayout {
    pub fn compute(tree: &ViewNode, viewport_width: f32, viewport_height: f32) -> Result<Self> {
        let viewport = Size {
            width: viewport_width,
            height: viewport_height,
        };
        let mut taffy: TaffyTree<Measure> = TaffyTree::new();
        let mut ids: Vec<LayoutId> = Vec::with_capacity(tree.node_count());
        let mut parents: Vec<Option<NodeId>> = Vec::with_capacity(tree.node_count());

        let root = build(&mut taffy, tree, viewport, None, &mut ids, &mut parents)?;

        taffy.compute_layout_with_measure(
            root,
            Size {
                width: AvailableSpace::Definite(viewport_width),
                height: AvailableSpace::MaxContent,
            },
            |known, available, _node, context, _style| match context {
                Some(measure) => measure.measure(known, available),
                None => Size::ZERO,
            },
        )?;

        let mut bounds = vec![Bounds::default(); ids.len()];
        for (id, layout_id) in ids.iter().enumerate() {
            let layout = taffy.layout(*layout_id)?;
            let (origin_x, origin_y) = match parents[id] {
                Some(parent) => (bounds[parent].x, bounds[parent].y),
                None => (0.0, 0.0),
            };
            bounds[id] = Bounds {
                x: origin_x + layout.location.x,
                y: origin_y + layout.location.y,
                width: layout.size.width,
                height: layout.size.height,
            };
        }

        let document_height = bounds
            .first()
            .map(|b| b.height)
            .unwrap_or(0.0)
            .max(viewport_height);
        debug!(
            "Laid out {} nodes, document height {:.0}px",
            bounds.len(),
            document_height
        );

        Ok(Self {
            bounds,
            document_height,
        })
    }

    pub fn bounds(&self, id: NodeId) -> Option<Bounds> {
        self.bounds.get(id).copied()
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

/// Creates taffy nodes in preorder so `ids[preorder] == taffy id`.
fn build(
    taffy: &mut TaffyTree<Measure>,
    node: &ViewNode,
    viewport: Size<f32>,
    parent: Option<NodeId>,
    ids: &mut Vec<LayoutId>,
    parents: &mut Vec<Option<NodeId>>,
) -> Result<LayoutId> {
    let (style, measure) = style_for(node, viewport);

    // Reserve the preorder slot before descending.
    let id = ids.len();
    let placeholder = taffy.new_leaf(base_style())?;
    ids.push(placeholder);
    parents.push(parent);

    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        children.push(build(taffy, child, viewport, Some(id), ids, parents)?);
    }

    taffy.set_style(placeholder, style)?;
    if let Some(measure) = measure {
        taffy.set_node_context(placeholder, Some(measure))?;
    }
    taffy.set_children(placeholder, &children)?;
    Ok(placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_stack_vertically() {
        let tree = ViewNode::new(NodeKind::Page)
            .child(ViewNode::new(NodeKind::Section { id: "home" }).child(ViewNode::heading(1, "Hi")))
            .child(
                ViewNode::new(NodeKind::Section { id: "about" })
                    .child(ViewNode::paragraph("Some words about me.")),
            );
        let layout = PageLayout::compute(&tree, 1280.0, 800.0).unwrap();

        let home = layout.bounds(1).unwrap();
        let about = layout.bounds(3).unwrap();
        assert_eq!(home.y, 0.0);
        assert!(home.height >= 800.0, "hero fills the viewport");
        assert!(about.y >= home.bottom());

        let paragraph = layout.bounds(4).unwrap();
        assert!(paragraph.y > about.y, "child is offset by section padding");
        assert!(layout.document_height() >= about.bottom());
    }

    #[test]
    fn long_text_wraps() {
        let measure = text(&"word ".repeat(100), 18.0);
        let narrow = measure.measure(
            Size::NONE,
            Size {
                width: AvailableSpace::Definite(200.0),
                height: AvailableSpace::MaxContent,
            },
        );
        assert_eq!(narrow.width, 200.0);
        assert!(narrow.height > 18.0 * LINE_HEIGHT * 10.0);
    }
}
