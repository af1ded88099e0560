//! # Page Composition
//!
//! Assembles the sections in their fixed order and runs the mounted page.
//!
//! ## Responsibilities
//! - **Composition**: progress bar, then Navbar, Hero, About, Skills, Experience, Contact, Footer.
//! - **Groups**: splits the tree into reveal groups (a triggered root and the bound
//!   descendants that follow it).
//! - **Runtime**: `MountedPage` owns every piece of UI state. The host feeds it scroll
//!   positions, gestures and elapsed time; each `tick` returns a `Frame`.
//!
//! ## Key Types
//! - `Page`: The composed, immutable page.
//! - `MountedPage`: A page laid out in a viewport, with live motion.
//! - `Frame`: Everything the host needs to draw one frame.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::animation::{Animated, EasingType};
use crate::config::SiteConfig;
use crate::errors::{FolioError, FormError, Result};
use crate::form::{Acknowledgment, ContactForm, Field, SimulatedBackend};
use crate::layout::PageLayout;
use crate::motion::{Gesture, MotionSystem, MotionValues};
use crate::node::{Action, NodeId, NodeKind, ViewNode};
use crate::scroll::{scroll_progress, SpringFilter};
use crate::sections::{self, navbar, NavbarState};
use crate::stagger::{RevealGroup, RevealMember, RevealSchedule};
use crate::text::{Typewriter, TypewriterFrame};
use crate::variants::VariantRegistry;
use crate::visibility::{
    Observation, Trigger, ViewportObserver, Viewport, VisibilityChange, VisibilityLatch,
};

/// Seconds a smooth scroll takes, regardless of distance.
pub const SMOOTH_SCROLL_DURATION: f64 = 0.8;

/// Splits a subtree into reveal groups. `offset` is the preorder id of the subtree root.
///
/// A bound node with no triggered ancestor starts its own mount-triggered group.
pub fn collect_groups(tree: &ViewNode, offset: NodeId) -> Vec<RevealGroup> {
    let mut groups: Vec<RevealGroup> = Vec::new();
    let mut owner: Vec<Option<usize>> = Vec::with_capacity(tree.node_count());

    tree.walk(&mut |id, parent, node| {
        let inherited = parent.and_then(|p| owner[p]);
        let Some(binding) = &node.motion else {
            owner.push(inherited);
            return;
        };
        let member = RevealMember {
            node: offset + id,
            variant: binding.variant,
            custom: binding.custom,
        };
        let group = match (binding.trigger, inherited) {
            (None, Some(group)) => {
                groups[group].children.push(member);
                group
            }
            (trigger, _) => {
                if trigger.is_none() {
                    debug!("Node {} has no triggered ancestor, playing on mount", offset + id);
                }
                groups.push(RevealGroup::new(trigger.unwrap_or(Trigger::Mount), member));
                groups.len() - 1
            }
        };
        owner.push(Some(group));
    });
    groups
}

/// The composed page.
#[derive(Clone, Debug)]
pub struct Page {
    config: SiteConfig,
    tree: ViewNode,
}

impl Page {
    pub fn compose(config: &SiteConfig) -> Self {
        let tree = ViewNode::new(NodeKind::Page)
            .child(ViewNode::new(NodeKind::ProgressBar))
            .child(sections::navbar::build())
            .child(sections::hero::build(&config.typewriter))
            .child(sections::about::build())
            .child(sections::skills::build())
            .child(sections::experience::build())
            .child(sections::contact::build())
            .child(sections::footer::build());
        debug!("Composed page with {} nodes", tree.node_count());
        Self {
            config: config.clone(),
            tree,
        }
    }

    /// The document title.
    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn tree(&self) -> &ViewNode {
        &self.tree
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn groups(&self) -> Vec<RevealGroup> {
        collect_groups(&self.tree, 0)
    }

    /// Groups whose root lies inside the section with the given anchor.
    pub fn section_groups(&self, anchor: &str) -> Result<Vec<RevealGroup>> {
        let start = self
            .tree
            .find_section(anchor)
            .ok_or_else(|| FolioError::UnknownSection(anchor.to_string()))?;
        let size = self
            .tree
            .get(start)
            .map(ViewNode::node_count)
            .unwrap_or(1);
        Ok(self
            .groups()
            .into_iter()
            .filter(|g| (start..start + size).contains(&g.root.node))
            .collect())
    }

    /// Schedules of a section's groups, each as if fired at t = 0.
    pub fn schedule(&self, anchor: &str, registry: &VariantRegistry) -> Result<Vec<RevealSchedule>> {
        self.section_groups(anchor)?
            .iter()
            .map(|g| g.schedule(registry, 0.0).map_err(FolioError::from))
            .collect()
    }

    pub fn mount(&self, viewport: Viewport) -> Result<MountedPage> {
        MountedPage::new(self, viewport, VariantRegistry::global())
    }
}

#[derive(Debug)]
struct MountedGroup {
    group: RevealGroup,
    latch: VisibilityLatch,
    observation: Option<Observation>,
    schedule: Option<RevealSchedule>,
}

/// A visibility transition of one group, as seen by the host.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEvent {
    pub root: NodeId,
    pub variant: &'static str,
    pub change: VisibilityChange,
    pub ratio: f32,
    pub time: f64,
}

#[derive(Clone, Debug)]
struct SmoothScroll {
    origin: f64,
    track: Animated<f32>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub time: f64,
    pub scroll_y: f32,
    /// Smoothed scroll progress, the progress bar's horizontal scale.
    pub progress: f32,
    pub nav_scrolled: bool,
    pub menu_open: bool,
    pub typewriter: TypewriterFrame,
    pub submit_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgment: Option<Acknowledgment>,
    /// Visibility changes caused by a smooth scroll during this tick.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<GroupEvent>,
    pub nodes: Vec<MotionValues>,
}

impl Frame {
    pub fn node(&self, id: NodeId) -> Option<&MotionValues> {
        self.nodes.iter().find(|v| v.node == id)
    }
}

/// A page laid out in a viewport, with its motion and UI state.
pub struct MountedPage {
    title: String,
    tree: ViewNode,
    /// Node count of the composed page, before any mobile menu is attached.
    base_len: usize,
    layout: PageLayout,
    viewport: Viewport,
    registry: &'static VariantRegistry,
    groups: Vec<MountedGroup>,
    observer: ViewportObserver,
    motion: MotionSystem,
    progress: SpringFilter,
    navbar: NavbarState,
    form: ContactForm,
    typewriter: Typewriter,
    smooth_scroll: Option<SmoothScroll>,
    time: f64,
    scroll_y: f32,
}

impl MountedPage {
    fn new(page: &Page, viewport: Viewport, registry: &'static VariantRegistry) -> Result<Self> {
        let config = &page.config;
        let tree = page.tree.clone();
        let layout = PageLayout::compute(&tree, viewport.width, viewport.height)?;
        let motion = MotionSystem::new(&tree, registry)?;
        let backend = SimulatedBackend {
            delay: config.contact.submit_delay(),
        };

        let mut mounted = Self {
            title: config.title.clone(),
            base_len: tree.node_count(),
            tree,
            layout,
            viewport: viewport.scrolled_to(0.0),
            registry,
            groups: Vec::new(),
            observer: ViewportObserver::new(),
            motion,
            progress: SpringFilter::new(config.progress_spring),
            navbar: NavbarState::new(config.navbar.scrolled_threshold),
            form: ContactForm::new(Box::new(backend)),
            typewriter: sections::hero::typewriter(&config.typewriter),
            smooth_scroll: None,
            time: 0.0,
            scroll_y: 0.0,
        };

        let groups = collect_groups(&mounted.tree, 0);
        mounted.attach_groups(groups)?;
        mounted.observer.update(&mounted.viewport);
        mounted.drain_visibility()?;

        info!(
            "Mounted \"{}\": {} nodes, {} groups, document height {:.0}px",
            mounted.title,
            mounted.base_len,
            mounted.groups.len(),
            mounted.layout.document_height()
        );
        Ok(mounted)
    }

    /// Registers groups with the observer and fires the mount-triggered ones.
    fn attach_groups(&mut self, groups: Vec<RevealGroup>) -> Result<()> {
        for group in groups {
            let observation = match group.trigger {
                Trigger::Mount => None,
                Trigger::InView { amount, .. } => {
                    let bounds = self
                        .layout
                        .bounds(group.root.node)
                        .ok_or(FolioError::UnknownNode(group.root.node))?;
                    Some(self.observer.register(bounds, amount))
                }
            };
            let mount = observation.is_none();
            self.groups.push(MountedGroup {
                latch: VisibilityLatch::for_trigger(&group.trigger),
                group,
                observation,
                schedule: None,
            });
            if mount {
                let index = self.groups.len() - 1;
                self.groups[index].latch.observe(true);
                self.fire(index)?;
            }
        }
        Ok(())
    }

    fn fire(&mut self, index: usize) -> Result<()> {
        let schedule = self.groups[index]
            .group
            .schedule(self.registry, self.time)?;
        self.motion.apply(&schedule, self.registry, self.time);
        self.groups[index].schedule = Some(schedule);
        Ok(())
    }

    fn conceal(&mut self, index: usize) {
        let group = &self.groups[index].group;
        let nodes: Vec<NodeId> = std::iter::once(group.root.node)
            .chain(group.children.iter().map(|m| m.node))
            .collect();
        self.motion.conceal(&nodes, self.registry, self.time);
    }

    /// Feeds pending observer events through the latches.
    fn drain_visibility(&mut self) -> Result<Vec<GroupEvent>> {
        let mut changes = Vec::new();
        for (index, mounted) in self.groups.iter_mut().enumerate() {
            let Some(observation) = &mounted.observation else {
                continue;
            };
            while let Ok(event) = observation.events.try_recv() {
                if let Some(change) = mounted.latch.observe(event.intersecting) {
                    changes.push((index, change, event.ratio));
                }
            }
            if mounted.latch.is_spent() {
                self.observer.unobserve(observation.id);
                mounted.observation = None;
            }
        }

        let mut events = Vec::with_capacity(changes.len());
        for (index, change, ratio) in changes {
            match change {
                VisibilityChange::Revealed => self.fire(index)?,
                VisibilityChange::Concealed => self.conceal(index),
            }
            let root = &self.groups[index].group.root;
            debug!("Group at node {} {:?} ({:.2})", root.node, change, ratio);
            events.push(GroupEvent {
                root: root.node,
                variant: root.variant,
                change,
                ratio,
                time: self.time,
            });
        }
        Ok(events)
    }

    fn max_scroll(&self) -> f32 {
        (self.layout.document_height() - self.viewport.height).max(0.0)
    }

    fn apply_scroll(&mut self, scroll_y: f32) -> Result<Vec<GroupEvent>> {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll());
        self.viewport = self.viewport.scrolled_to(self.scroll_y);
        self.progress.set_target(scroll_progress(
            self.scroll_y,
            self.layout.document_height(),
            self.viewport.height,
        ));
        self.navbar.on_scroll(self.scroll_y);
        self.observer.update(&self.viewport);
        self.drain_visibility()
    }

    /// The host scrolled. Cancels any smooth scroll in progress.
    pub fn on_scroll(&mut self, scroll_y: f32) -> Result<Vec<GroupEvent>> {
        self.smooth_scroll = None;
        self.apply_scroll(scroll_y)
    }

    /// Starts a smooth scroll to `target`.
    pub fn scroll_to(&mut self, target: f32) {
        let target = target.clamp(0.0, self.max_scroll());
        let mut track = Animated::new(self.scroll_y);
        track.add_keyframe(target, SMOOTH_SCROLL_DURATION, EasingType::EaseInOut);
        self.smooth_scroll = Some(SmoothScroll {
            origin: self.time,
            track,
        });
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0.0);
    }

    /// Follows an in-page link: smooth scroll to the anchor and close the mobile menu.
    pub fn navigate(&mut self, href: &str) -> Result<()> {
        if let Some(anchor) = href.strip_prefix('#') {
            let section = self
                .tree
                .find_section(anchor)
                .ok_or_else(|| FolioError::UnknownSection(anchor.to_string()))?;
            let top = self.layout.bounds(section).map(|b| b.y).unwrap_or(0.0);
            self.scroll_to(top);
        }
        self.close_menu();
        Ok(())
    }

    /// Activates a button or link, as a click would.
    pub fn click(&mut self, node: NodeId) -> Result<()> {
        let kind = self
            .tree
            .get(node)
            .map(|n| n.kind.clone())
            .ok_or(FolioError::UnknownNode(node))?;
        match kind {
            NodeKind::Button { action, .. } => match action {
                Action::ScrollToTop => self.scroll_to_top(),
                Action::ToggleMenu => {
                    self.toggle_menu()?;
                }
                Action::CloseMenu => self.close_menu(),
                Action::SubmitForm => self.submit_form()?,
            },
            NodeKind::Link { href, .. } => self.navigate(&href)?,
            _ => {}
        }
        Ok(())
    }

    pub fn set_hover(&mut self, node: NodeId, hovered: bool) -> Result<bool> {
        self.motion
            .set_gesture(node, Gesture::Hover, hovered, self.registry, self.time)
    }

    pub fn set_pressed(&mut self, node: NodeId, pressed: bool) -> Result<bool> {
        self.motion
            .set_gesture(node, Gesture::Press, pressed, self.registry, self.time)
    }

    /// Opens or closes the mobile menu; returns whether it is now open.
    pub fn toggle_menu(&mut self) -> Result<bool> {
        if self.navbar.is_menu_open() {
            self.close_menu();
            return Ok(false);
        }
        self.navbar.toggle_menu();

        let menu = navbar::mobile_menu();
        let offset = self.tree.node_count();
        self.motion.bind_subtree(&menu, offset, self.registry)?;
        let groups = collect_groups(&menu, offset);
        self.tree.children.push(menu);
        self.attach_groups(groups)?;
        debug!("Mobile menu opened at node {}", offset);
        Ok(true)
    }

    pub fn close_menu(&mut self) {
        if !self.navbar.is_menu_open() {
            return;
        }
        self.navbar.close_menu();
        let base_len = self.base_len;
        self.groups.retain(|g| g.group.root.node < base_len);
        self.motion.unbind_from(base_len);
        self.tree.children.pop();
        debug!("Mobile menu closed");
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn submit_form(&mut self) -> std::result::Result<(), FormError> {
        self.form.submit()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Advances page time by `dt` and samples everything that moves.
    pub fn tick(&mut self, dt: Duration) -> Result<Frame> {
        self.time += dt.as_secs_f64();

        let mut events = Vec::new();
        if let Some(smooth) = self.smooth_scroll.as_mut() {
            smooth.track.update(self.time - smooth.origin);
            let y = smooth.track.current_value;
            let done = self.time - smooth.origin >= smooth.track.duration();
            if done {
                self.smooth_scroll = None;
            }
            events = self.apply_scroll(y)?;
        }

        self.progress.step(dt.as_secs_f32());
        let acknowledgment = self.form.advance(dt);
        if let Some(ack) = &acknowledgment {
            info!("Acknowledged: {}", ack.message);
        }

        Ok(Frame {
            time: self.time,
            scroll_y: self.scroll_y,
            progress: self.progress.value(),
            nav_scrolled: self.navbar.is_scrolled(),
            menu_open: self.navbar.is_menu_open(),
            typewriter: self
                .typewriter
                .frame_at(Duration::from_secs_f64(self.time)),
            submit_label: self.form.submit_label(),
            acknowledgment,
            events,
            nodes: self.motion.sample(self.time),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tree(&self) -> &ViewNode {
        &self.tree
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth_scroll.is_some()
    }

    /// Number of in-view groups still being observed.
    pub fn observed_groups(&self) -> usize {
        self.observer.active_count()
    }

    /// How many times the group rooted at `root` has been revealed.
    pub fn reveal_count(&self, root: NodeId) -> Option<u32> {
        self.groups
            .iter()
            .find(|g| g.group.root.node == root)
            .map(|g| g.latch.reveal_count())
    }

    /// The schedules of the groups that have fired inside a section.
    pub fn schedules_for(&self, anchor: &str) -> Result<Vec<&RevealSchedule>> {
        let start = self
            .tree
            .find_section(anchor)
            .ok_or_else(|| FolioError::UnknownSection(anchor.to_string()))?;
        let size = self.tree.get(start).map(ViewNode::node_count).unwrap_or(1);
        Ok(self
            .groups
            .iter()
            .filter(|g| (start..start + size).contains(&g.group.root.node))
            .filter_map(|g| g.schedule.as_ref())
            .collect())
    }
}
