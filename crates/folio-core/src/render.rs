//! # Static Rendering
//!
//! Writes a composed page as a standalone HTML document. Every bound node starts out in
//! its variant's initial state, carried as inline style, and names its variant in
//! `data-` attributes so a client script can take over the motion.

use std::fmt::Write;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::node::{Action, InputKind, NodeKind, ViewNode};
use crate::page::Page;
use crate::variants::{TargetState, VariantRegistry};
use crate::visibility::Trigger;

/// Renders `page` to an HTML document.
pub fn html(page: &Page) -> String {
    HtmlDocument::new(page).markup().into_string()
}

pub struct HtmlDocument<'a> {
    pub page: &'a Page,
    pub registry: &'a VariantRegistry,
}

/// Attributes every element carries: its class and its motion binding.
struct CommonAttrs {
    class: Option<&'static str>,
    variant: Option<&'static str>,
    custom: Option<f32>,
    trigger: Option<String>,
    style: Option<String>,
}

// maud needs literal tag names, so each arm names its tag and the shared attributes
// are spliced in here.
macro_rules! element {
    ($tag:ident [$($attr:tt)*], $common:ident, $body:ident) => {
        html! {
            $tag $($attr)* class=[$common.class] data-variant=[$common.variant]
                data-custom=[$common.custom] data-trigger=[$common.trigger.as_deref()]
                style=[$common.style.as_deref()] { ($body) }
        }
    };
}

/// Inline CSS for a target state.
pub fn inline_style(state: &TargetState) -> String {
    let mut style = String::new();
    if let Some(opacity) = state.opacity {
        let _ = write!(style, "opacity: {};", opacity);
    }
    let mut transform = Vec::new();
    if let Some(x) = state.x {
        transform.push(format!("translateX({}px)", x));
    }
    if let Some(y) = state.y {
        transform.push(format!("translateY({}px)", y));
    }
    if let Some(scale) = state.scale {
        transform.push(format!("scale({})", scale));
    }
    if !transform.is_empty() {
        let _ = write!(style, " transform: {};", transform.join(" "));
    }
    if let Some(width) = state.width {
        let _ = write!(style, " width: {};", width);
    }
    if let Some(shadow) = state.box_shadow {
        let _ = write!(style, " box-shadow: {};", shadow);
    }
    style.trim_start().to_string()
}

fn tag_for(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Page => "main",
        NodeKind::Section { id } => match *id {
            "navbar" => "header",
            "footer" => "footer",
            _ => "section",
        },
        NodeKind::Heading { level, .. } => match *level {
            1 => "h1",
            2 => "h2",
            3 => "h3",
            4 => "h4",
            5 => "h5",
            _ => "h6",
        },
        NodeKind::Paragraph { .. } => "p",
        NodeKind::Badge { .. } | NodeKind::Inline | NodeKind::Segment { .. } => "span",
        NodeKind::Typewriter { .. } => "span",
        NodeKind::Link { .. } => "a",
        NodeKind::Button { .. } => "button",
        NodeKind::Icon { .. } => "i",
        NodeKind::List => "ul",
        NodeKind::Form => "form",
        _ => "div",
    }
}

fn class_for(kind: &NodeKind) -> Option<&'static str> {
    Some(match kind {
        NodeKind::ProgressBar => "progress-bar",
        NodeKind::Row => "row",
        NodeKind::Inline => "inline",
        NodeKind::Badge { .. } => "badge",
        NodeKind::Label { .. } => "label",
        NodeKind::Icon { .. } => "icon",
        NodeKind::Avatar { .. } => "avatar",
        NodeKind::SkillBar { .. } => "skill-bar",
        NodeKind::Segment { .. } => "segment",
        NodeKind::Typewriter { .. } => "typewriter",
        NodeKind::Field { .. } => "field",
        _ => return None,
    })
}

fn trigger_attr(trigger: &Trigger) -> String {
    match trigger {
        Trigger::Mount => "mount".to_string(),
        Trigger::InView { amount, once } => {
            format!("in-view:{}{}", amount, if *once { ":once" } else { "" })
        }
    }
}

impl<'a> HtmlDocument<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self {
            page,
            registry: VariantRegistry::global(),
        }
    }

    pub fn markup(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.page.title()) }
                }
                body {
                    (self.element(self.page.tree()))
                }
            }
        }
    }

    fn common(&self, node: &ViewNode) -> CommonAttrs {
        let binding = node.motion.as_ref();
        let style = binding
            .and_then(|b| {
                let variant = self.registry.get(b.variant).ok()?;
                Some(inline_style(&variant.initial(b.custom)))
            })
            .filter(|style| !style.is_empty())
            .or_else(|| {
                matches!(node.kind, NodeKind::ProgressBar)
                    .then(|| "transform: scaleX(0);".to_string())
            });
        CommonAttrs {
            class: class_for(&node.kind),
            variant: binding.map(|b| b.variant),
            custom: binding.and_then(|b| b.custom),
            trigger: binding.and_then(|b| b.trigger.as_ref()).map(trigger_attr),
            style,
        }
    }

    /// Renders `node` and its subtree.
    pub fn element(&self, node: &ViewNode) -> Markup {
        let common = self.common(node);
        let body = html! {
            (self.content(node))
            @for child in &node.children {
                (self.element(child))
            }
        };
        match &node.kind {
            NodeKind::Page => element!(main [], common, body),
            NodeKind::Section { id } => match *id {
                "navbar" => element!(header [id=(id)], common, body),
                "footer" => element!(footer [id=(id)], common, body),
                _ => element!(section [id=(id)], common, body),
            },
            NodeKind::Heading { level, .. } => match level {
                1 => element!(h1 [], common, body),
                2 => element!(h2 [], common, body),
                3 => element!(h3 [], common, body),
                4 => element!(h4 [], common, body),
                5 => element!(h5 [], common, body),
                _ => element!(h6 [], common, body),
            },
            NodeKind::Paragraph { .. } => element!(p [], common, body),
            NodeKind::Badge { .. } | NodeKind::Inline | NodeKind::Segment { .. } => {
                element!(span [], common, body)
            }
            NodeKind::Typewriter {
                strings,
                type_delay_ms,
                delete_delay_ms,
                looping,
            } => {
                let strings = strings.join("|");
                let looping = if *looping { "true" } else { "false" };
                element!(span [data-strings=(strings) data-type-delay=(type_delay_ms)
                    data-delete-delay=(delete_delay_ms) data-loop=(looping)], common, body)
            }
            NodeKind::Link { href, external, .. } => {
                let target = external.then_some("_blank");
                let rel = external.then_some("noopener noreferrer");
                element!(a [href=(href) target=[target] rel=[rel]], common, body)
            }
            NodeKind::Button { action, .. } => {
                let (kind, name) = match action {
                    Action::SubmitForm => ("submit", "submit-form"),
                    Action::ScrollToTop => ("button", "scroll-to-top"),
                    Action::ToggleMenu => ("button", "toggle-menu"),
                    Action::CloseMenu => ("button", "close-menu"),
                };
                element!(button [type=(kind) data-action=(name)], common, body)
            }
            NodeKind::Icon { name } => {
                element!(i [data-icon=(name) aria-hidden="true"], common, body)
            }
            NodeKind::List => element!(ul [], common, body),
            NodeKind::Form => element!(form [], common, body),
            NodeKind::SkillBar { level } => element!(div [data-level=(level)], common, body),
            _ => element!(div [], common, body),
        }
    }

    /// The content written right after the opening tag, ahead of any children.
    fn content(&self, node: &ViewNode) -> Markup {
        match &node.kind {
            NodeKind::Heading { text, .. }
            | NodeKind::Paragraph { text }
            | NodeKind::Badge { text } => html! { (text) },
            NodeKind::Label { text, value } => html! {
                span { (text) }
                @if let Some(value) = value {
                    span { (value) }
                }
            },
            NodeKind::Link { label, icon, .. } | NodeKind::Button { label, icon, .. } => html! {
                @if let Some(icon) = icon {
                    i class="icon" data-icon=(icon) aria-hidden="true" {}
                }
                (label)
            },
            NodeKind::Avatar { initials } => html! { (initials) },
            NodeKind::SkillBar { .. } => html! { div class="skill-progress" {} },
            NodeKind::Segment {
                text,
                gap_after,
                break_after,
            } => html! {
                (text)
                @if *gap_after {
                    (PreEscaped("&nbsp;"))
                }
                @if *break_after {
                    br;
                }
            },
            NodeKind::Typewriter { .. } => html! { span class="cursor" { "|" } },
            NodeKind::Field {
                name,
                label,
                input: kind,
                required,
            } => html! {
                label for=(name) { (label) }
                @match kind {
                    InputKind::Text => {
                        input type="text" id=(name) name=(name) required[*required];
                    }
                    InputKind::Email => {
                        input type="email" id=(name) name=(name) required[*required];
                    }
                    InputKind::TextArea { rows } => {
                        textarea id=(name) name=(name) rows=(rows) required[*required] {}
                    }
                }
            },
            _ => html! {},
        }
    }
}
